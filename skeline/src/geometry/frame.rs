use nalgebra::{SMatrix, SVector};
use std::sync::{Arc, OnceLock};
use thiserror::Error;

/// Shared handle to an immutable frame.
///
/// Frames are constructed once and then referenced by every geometric object
/// expressed in them, so they are shared by reference counting rather than
/// copied per object.
pub type FrameHandle<const D: usize> = Arc<Frame<D>>;

/// Errors concerning affine frames.
#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    /// The basis vectors of a frame are linearly dependent.
    #[error("frame basis is singular and cannot be inverted")]
    SingularBasis,
}

/// An affine basis in `D`-dimensional space: an origin and `D` basis vectors.
///
/// A `Frame` is immutable once constructed. The inverse of the basis is
/// computed at construction so coordinate maps in both directions are cheap.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame<const D: usize> {
    origin: SVector<f64, D>,
    basis: SMatrix<f64, D, D>,
    inverse: SMatrix<f64, D, D>,
}

impl<const D: usize> Frame<D> {
    pub fn origin(&self) -> &SVector<f64, D> {
        &self.origin
    }

    pub fn basis(&self) -> &SMatrix<f64, D, D> {
        &self.basis
    }

    /// Gets the basis vector along the given axis.
    pub fn axis(&self, index: usize) -> SVector<f64, D> {
        self.basis.column(index).into_owned()
    }

    /// Maps coordinates local to this frame into global coordinates.
    pub fn to_global(&self, local: &SVector<f64, D>) -> SVector<f64, D> {
        self.origin + self.basis * local
    }

    /// Maps global coordinates into coordinates local to this frame.
    pub fn to_local(&self, global: &SVector<f64, D>) -> SVector<f64, D> {
        self.inverse * (global - self.origin)
    }
}

macro_rules! impl_frame {
    ($($d:literal),*$(,)?) => {$(
        impl Frame<$d> {
            /// Constructs a frame from an origin and a basis matrix whose
            /// columns are the basis vectors.
            ///
            /// # Errors
            ///
            /// Returns an error if the basis is singular.
            pub fn new(
                origin: SVector<f64, $d>,
                basis: SMatrix<f64, $d, $d>,
            ) -> Result<Self, GeometryError> {
                let inverse = basis
                    .try_inverse()
                    .ok_or(GeometryError::SingularBasis)?;
                Ok(Frame {
                    origin,
                    basis,
                    inverse,
                })
            }

            /// Gets the canonical frame: the standard basis at the origin.
            ///
            /// The canonical frame is a per-dimension singleton and every call
            /// returns a handle to the same allocation.
            pub fn canonical() -> FrameHandle<$d> {
                static CANONICAL: OnceLock<FrameHandle<$d>> = OnceLock::new();
                CANONICAL
                    .get_or_init(|| {
                        Arc::new(Frame {
                            origin: SVector::zeros(),
                            basis: SMatrix::identity(),
                            inverse: SMatrix::identity(),
                        })
                    })
                    .clone()
            }
        }
    )*};
}
impl_frame!(2, 3, 4);
