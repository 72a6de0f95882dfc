//! Geometric skeleton models.
//!
//! A [`Model`] defines how the fixed-size storage vector carried by each
//! skeleton node maps to a geometric object, and the object algebra the
//! traversal algorithms need (size comparison, resizing, inclusion testing).
//! The same skeleton graph can thus be reinterpreted in object space
//! ([`Classic`]) or in a camera's projective space ([`Projective`]) without
//! duplicating any graph algorithm.
//!
//! Conversions are expressed through the [`ToStorage`] and [`ToObject`]
//! capability traits. The projective model declares the full conversion
//! surface but only geometrically meaningful combinations are implemented;
//! the rest report [`ModelError::Unsupported`], which signals a wiring bug
//! distinctly from any domain failure.

mod classic;
mod projective;

use std::fmt::{self, Debug, Display, Formatter};
use thiserror::Error;

pub use crate::skeleton::model::classic::{Classic, Classic2, Classic3};
pub use crate::skeleton::model::projective::{Orthographic, Perspective, Projective};

/// Discriminates model variants for algorithms that must special-case
/// perspective against orthographic behavior.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ModelKind {
    Euclidean,
    Perspective,
    Orthographic,
}

impl Display for ModelKind {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        formatter.write_str(match self {
            ModelKind::Euclidean => "euclidean",
            ModelKind::Perspective => "perspective",
            ModelKind::Orthographic => "orthographic",
        })
    }
}

/// Errors concerning model conversions.
#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    /// The requested conversion is declared by the model family but not
    /// implemented by this variant.
    #[error("{object} conversion is not implemented for the {model} model")]
    Unsupported {
        model: ModelKind,
        object: &'static str,
    },
}

/// A strategy converting between a fixed-size storage vector and geometric
/// objects under a chosen coordinate frame and projection.
///
/// Models are immutable values; a skeleton owns its model and branches own
/// private copies, so reinterpreting one structure never affects another.
pub trait Model: Clone {
    /// The fixed-size storage vector for one skeleton node.
    type Storage: Clone + Debug + PartialEq;

    fn kind(&self) -> ModelKind;

    /// A model-defined scalar size measure used to compare and rank nodes.
    fn size(&self, storage: &Self::Storage) -> f64;

    /// Returns a vector representing the same object rescaled to the given
    /// size.
    fn resize(&self, storage: &Self::Storage, size: f64) -> Self::Storage;

    /// Tests whether the object encoded by `inner` is geometrically contained
    /// in the object encoded by `outer` under this model's geometry.
    fn included(&self, inner: &Self::Storage, outer: &Self::Storage) -> bool;
}

/// Encodes a geometric object into the canonical storage vector of a model.
pub trait ToStorage<T>: Model {
    fn to_storage(&self, object: &T) -> Result<Self::Storage, ModelError>;
}

/// Decodes a storage vector back into a geometric object.
pub trait ToObject<T>: Model {
    fn to_object(&self, storage: &Self::Storage) -> Result<T, ModelError>;
}
