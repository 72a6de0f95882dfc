//! Affine frames and geometric primitives.
//!
//! A [`Frame`] is an affine basis (origin and basis vectors) in
//! `D`-dimensional space. Frames are immutable and shared by reference
//! counting via [`FrameHandle`]; a canonical frame singleton exists per
//! dimension. The primitives in this module ([`HyperSphere`],
//! [`HyperEllipse`], [`Line`]) each carry a handle to the frame that defines
//! their scalar product.

mod frame;
mod primitive;

pub use crate::geometry::frame::{Frame, FrameHandle, GeometryError};
pub use crate::geometry::primitive::{HyperEllipse, HyperSphere, Line, Point};
