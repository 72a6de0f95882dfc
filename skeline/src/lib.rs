//! **Skeline** is a library for curve-skeleton graphs: building them from
//! discrete shapes, separating them into branches, and reinterpreting them
//! through geometric models.
//!
//! A curve skeleton is a graph of maximal inscribed spheres that captures the
//! topology of a shape as a network of one-dimensional chains. Skeline
//! represents the raw graph as a
//! [`GraphCurveSkeleton`](crate::skeleton::GraphCurveSkeleton) and collapses
//! it into a [`ComposedCurveSkeleton`](crate::skeleton::ComposedCurveSkeleton)
//! of extremities, junctions, and the
//! [`GraphBranch`](crate::skeleton::GraphBranch)es between them.
//!
//! Node geometry is abstracted behind [`Model`](crate::skeleton::model::Model)
//! implementations: [`Classic`](crate::skeleton::model::Classic) interprets
//! storage vectors as Euclidean hyperspheres while
//! [`Projective`](crate::skeleton::model::Projective) interprets them as
//! image-space discs seen by a perspective or orthographic
//! [`Camera`](crate::camera::Camera). Graph algorithms are written once
//! against the model trait and work under either interpretation.
//!
//! The [`shape`](crate::shape) and [`boundary`](crate::boundary) modules
//! cover the discrete side: occupancy grids and the marching-squares
//! extraction of their boundary polylines.
//!
//! # Examples
//!
//! Separating a small skeleton into branches:
//!
//! ```rust
//! use nalgebra::Vector3;
//! use skeline::geometry::Frame;
//! use skeline::skeleton::model::Classic;
//! use skeline::skeleton::{separate_branches, GraphCurveSkeleton};
//!
//! let mut graph = GraphCurveSkeleton::new(Classic::<2>::new(Frame::<2>::canonical()));
//! for (id, x) in [(0u32, 0.0), (1, 1.0), (2, 2.0), (3, 2.0), (4, 2.0)] {
//!     graph.add_node(id, Vector3::new(x, id as f64, 0.5));
//! }
//! graph.add_edge(0, 1);
//! graph.add_edge(1, 2);
//! graph.add_edge(2, 3);
//! graph.add_edge(2, 4);
//!
//! let composed = separate_branches(&graph).unwrap();
//! assert_eq!(composed.node_count(), 4); // Three extremities and a junction.
//! assert_eq!(composed.edge_count(), 3); // One branch per chain.
//! ```
//!
//! Extracting the boundary of a discrete shape:
//!
//! ```rust
//! use nalgebra::Vector2;
//! use skeline::boundary::marching_squares;
//! use skeline::geometry::Frame;
//! use skeline::shape::DiscreteShape;
//!
//! let shape = DiscreteShape::from_fn(
//!     [8, 8],
//!     Vector2::new(1.0, 1.0),
//!     Frame::<2>::canonical(),
//!     |[x, y]| (2..6).contains(&x) && (2..6).contains(&y),
//! );
//! let boundary = marching_squares(&shape, 1);
//! assert!(boundary.polylines().iter().all(|p| boundary.is_closed(p)));
//! ```

pub mod boundary;
pub mod camera;
pub mod geometry;
pub mod shape;
pub mod skeleton;

/// Re-exports commonly used types and traits.
///
/// Importing the contents of this module with `use skeline::prelude::*;`
/// brings the model capability traits into scope anonymously so that their
/// conversion methods are usable without naming them.
pub mod prelude {
    pub use crate::skeleton::model::{Model as _, ToObject as _, ToStorage as _};
}
