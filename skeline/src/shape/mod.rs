//! Discrete occupancy shapes.
//!
//! A [`DiscreteShape`] is a bounded occupancy grid: one boolean per cell, a
//! per-axis resolution, and an embedding [`Frame`]. Cell indices map to
//! positions through the resolution and the frame. Shapes are produced by an
//! external loader and are immutable once constructed; the core only reads
//! them, for boundary extraction.
//!
//! [`Frame`]: crate::geometry::Frame

use nalgebra::SVector;
use thiserror::Error;

use crate::geometry::{FrameHandle, Point};

/// Errors concerning discrete shapes.
#[derive(Debug, Error, PartialEq)]
pub enum ShapeError {
    /// The cell buffer does not match the product of the extents.
    #[error("cell count mismatch; expected {expected}, but got {actual}")]
    CellCount { expected: usize, actual: usize },
}

/// An occupancy grid over a bounded `D`-dimensional domain.
#[derive(Clone, Debug)]
pub struct DiscreteShape<const D: usize> {
    extents: [usize; D],
    resolution: SVector<f64, D>,
    frame: FrameHandle<D>,
    cells: Vec<bool>,
}

impl<const D: usize> DiscreteShape<D> {
    /// Constructs a shape from a flat cell buffer ordered with the first
    /// axis varying fastest.
    ///
    /// # Errors
    ///
    /// Returns an error if the cell buffer length does not match the extents.
    pub fn new(
        extents: [usize; D],
        resolution: SVector<f64, D>,
        frame: FrameHandle<D>,
        cells: Vec<bool>,
    ) -> Result<Self, ShapeError> {
        let expected = extents.iter().product();
        if cells.len() != expected {
            return Err(ShapeError::CellCount {
                expected,
                actual: cells.len(),
            });
        }
        Ok(DiscreteShape {
            extents,
            resolution,
            frame,
            cells,
        })
    }

    /// Constructs a shape by sampling a predicate at every cell index.
    pub fn from_fn<F>(
        extents: [usize; D],
        resolution: SVector<f64, D>,
        frame: FrameHandle<D>,
        mut occupied: F,
    ) -> Self
    where
        F: FnMut([usize; D]) -> bool,
    {
        let len = extents.iter().product();
        let mut cells = Vec::with_capacity(len);
        for linear in 0..len {
            cells.push(occupied(delinearize(extents, linear)));
        }
        DiscreteShape {
            extents,
            resolution,
            frame,
            cells,
        }
    }

    pub fn extents(&self) -> [usize; D] {
        self.extents
    }

    pub fn resolution(&self) -> &SVector<f64, D> {
        &self.resolution
    }

    pub fn frame(&self) -> &FrameHandle<D> {
        &self.frame
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Tests whether every cell is occupied.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&cell| cell)
    }

    /// Tests whether the cell at the given index is occupied. Indices outside
    /// the grid are unoccupied.
    pub fn occupied(&self, index: [usize; D]) -> bool {
        if index.iter().zip(&self.extents).any(|(i, e)| i >= e) {
            return false;
        }
        self.cells[self.linearize(index)]
    }

    /// Like [`occupied`](DiscreteShape::occupied), but accepts signed indices
    /// so callers can sample beyond the grid border.
    pub fn occupied_signed(&self, index: [isize; D]) -> bool {
        let mut unsigned = [0_usize; D];
        for axis in 0..D {
            if index[axis] < 0 {
                return false;
            }
            unsigned[axis] = index[axis] as usize;
        }
        self.occupied(unsigned)
    }

    /// Maps a cell index to its position through the resolution and the
    /// embedding frame.
    pub fn position(&self, index: [usize; D]) -> Point<D> {
        let local =
            SVector::<f64, D>::from_fn(|axis, _| index[axis] as f64 * self.resolution[axis]);
        Point::new(self.frame.to_global(&local))
    }

    fn linearize(&self, index: [usize; D]) -> usize {
        let mut linear = 0;
        let mut stride = 1;
        for axis in 0..D {
            linear += index[axis] * stride;
            stride *= self.extents[axis];
        }
        linear
    }
}

fn delinearize<const D: usize>(extents: [usize; D], mut linear: usize) -> [usize; D] {
    let mut index = [0_usize; D];
    for axis in 0..D {
        index[axis] = linear % extents[axis];
        linear /= extents[axis];
    }
    index
}
