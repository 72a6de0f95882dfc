use nalgebra::{SMatrix, SVector};

use crate::geometry::FrameHandle;

/// A point in `D`-dimensional affine space.
///
/// Coordinates are interpreted relative to whichever frame the surrounding
/// object carries; a bare point does not own a frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point<const D: usize> {
    coords: SVector<f64, D>,
}

impl<const D: usize> Point<D> {
    pub fn new(coords: SVector<f64, D>) -> Self {
        Point { coords }
    }

    pub fn coords(&self) -> &SVector<f64, D> {
        &self.coords
    }
}

impl<const D: usize> From<[f64; D]> for Point<D> {
    fn from(coords: [f64; D]) -> Self {
        Point::new(SVector::from(coords))
    }
}

/// A hypersphere: a center and a radius under the scalar product of a frame.
#[derive(Clone, Debug, PartialEq)]
pub struct HyperSphere<const D: usize> {
    frame: FrameHandle<D>,
    center: Point<D>,
    radius: f64,
}

impl<const D: usize> HyperSphere<D> {
    pub fn new(center: Point<D>, radius: f64, frame: FrameHandle<D>) -> Self {
        HyperSphere {
            frame,
            center,
            radius,
        }
    }

    pub fn center(&self) -> &Point<D> {
        &self.center
    }

    /// Gets the center in global coordinates.
    pub fn center_global(&self) -> SVector<f64, D> {
        self.frame.to_global(self.center.coords())
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn frame(&self) -> &FrameHandle<D> {
        &self.frame
    }
}

/// A hyperellipse: a center and a matrix whose columns are the semi-axes.
#[derive(Clone, Debug, PartialEq)]
pub struct HyperEllipse<const D: usize> {
    frame: FrameHandle<D>,
    center: Point<D>,
    axes: SMatrix<f64, D, D>,
}

impl<const D: usize> HyperEllipse<D> {
    pub fn new(center: Point<D>, axes: SMatrix<f64, D, D>, frame: FrameHandle<D>) -> Self {
        HyperEllipse {
            frame,
            center,
            axes,
        }
    }

    pub fn center(&self) -> &Point<D> {
        &self.center
    }

    pub fn axes(&self) -> &SMatrix<f64, D, D> {
        &self.axes
    }

    /// Gets the semi-axis vector along the given axis index.
    pub fn semi_axis(&self, index: usize) -> SVector<f64, D> {
        self.axes.column(index).into_owned()
    }

    pub fn frame(&self) -> &FrameHandle<D> {
        &self.frame
    }
}

/// A line: an origin point and a direction vector.
#[derive(Clone, Debug, PartialEq)]
pub struct Line<const D: usize> {
    frame: FrameHandle<D>,
    origin: Point<D>,
    direction: SVector<f64, D>,
}

impl<const D: usize> Line<D> {
    pub fn new(origin: Point<D>, direction: SVector<f64, D>, frame: FrameHandle<D>) -> Self {
        Line {
            frame,
            origin,
            direction,
        }
    }

    pub fn origin(&self) -> &Point<D> {
        &self.origin
    }

    pub fn direction(&self) -> &SVector<f64, D> {
        &self.direction
    }

    /// Gets the point at the given parameter along the line.
    pub fn point_at(&self, t: f64) -> Point<D> {
        Point::new(self.origin.coords() + self.direction * t)
    }

    pub fn frame(&self) -> &FrameHandle<D> {
        &self.frame
    }
}
