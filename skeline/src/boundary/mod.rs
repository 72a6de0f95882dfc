//! Discrete boundaries and marching-squares extraction.
//!
//! A [`DiscreteBoundary`] is an ordered set of boundary vertices together
//! with successor connectivity: each vertex knows which vertex follows it
//! along its contour. For a shape whose border cells form one connected
//! contour the boundary is a single closed polyline; shapes with holes or
//! several components produce several contours.

mod marching;

use fnv::FnvHashMap;

use crate::geometry::{FrameHandle, Point};

pub use crate::boundary::marching::marching_squares;

/// An ordered boundary polyline set in `D` dimensions.
#[derive(Clone, Debug)]
pub struct DiscreteBoundary<const D: usize> {
    frame: FrameHandle<D>,
    vertices: Vec<Point<D>>,
    next: FnvHashMap<usize, usize>,
}

impl<const D: usize> DiscreteBoundary<D> {
    pub fn new(frame: FrameHandle<D>) -> Self {
        DiscreteBoundary {
            frame,
            vertices: Vec::new(),
            next: FnvHashMap::default(),
        }
    }

    pub fn frame(&self) -> &FrameHandle<D> {
        &self.frame
    }

    /// Appends a vertex and returns its index.
    pub fn push_vertex(&mut self, vertex: Point<D>) -> usize {
        self.vertices.push(vertex);
        self.vertices.len() - 1
    }

    /// Connects a segment from one vertex to the vertex that follows it.
    pub fn link(&mut self, from: usize, to: usize) {
        assert!(
            from < self.vertices.len() && to < self.vertices.len(),
            "boundary segment references a vertex that does not exist",
        );
        self.next.insert(from, to);
    }

    pub fn vertex(&self, index: usize) -> &Point<D> {
        &self.vertices[index]
    }

    pub fn vertices(&self) -> &[Point<D>] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Gets the vertex that follows the given vertex along its contour.
    pub fn next(&self, index: usize) -> Option<usize> {
        self.next.get(&index).copied()
    }

    /// Decomposes the connectivity into maximal polylines, in vertex index
    /// order. Each polyline lists vertex indices; a polyline is closed when
    /// its last vertex links back to its first.
    pub fn polylines(&self) -> Vec<Vec<usize>> {
        let mut incoming = vec![false; self.vertices.len()];
        for &to in self.next.values() {
            incoming[to] = true;
        }
        let mut visited = vec![false; self.vertices.len()];
        let mut polylines = Vec::new();
        // Open chains first, so a chain is never entered mid-way.
        for start in (0..self.vertices.len()).filter(|&i| !incoming[i]) {
            polylines.push(self.walk(start, &mut visited));
        }
        for start in 0..self.vertices.len() {
            if !visited[start] {
                polylines.push(self.walk(start, &mut visited));
            }
        }
        polylines
    }

    /// Tests whether a polyline returned by
    /// [`polylines`](DiscreteBoundary::polylines) is closed.
    pub fn is_closed(&self, polyline: &[usize]) -> bool {
        match (polyline.first(), polyline.last()) {
            (Some(&first), Some(&last)) => self.next(last) == Some(first),
            _ => false,
        }
    }

    fn walk(&self, start: usize, visited: &mut [bool]) -> Vec<usize> {
        let mut polyline = vec![start];
        visited[start] = true;
        let mut current = start;
        while let Some(next) = self.next(current) {
            if next == start {
                break;
            }
            polyline.push(next);
            visited[next] = true;
            current = next;
        }
        polyline
    }
}
