//! Marching-squares boundary extraction.
//!
//! A 2x2 cell window slides across the grid at a caller-chosen stride. Each
//! window is classified by which of its four corner cells are occupied and
//! emits zero, one, or two directed boundary segments whose endpoints sit at
//! window-edge midpoints. Segments are oriented with the occupied region on
//! the left, so segments from adjacent windows chain head-to-tail into
//! polylines without any search.
//!
//! Occupancy is boolean, so the transition point on a window edge is always
//! its midpoint. All vertices therefore live on the half-step lattice and
//! are stitched by exact integer keys on the doubled lattice; no tolerance
//! is involved.

use fnv::FnvHashMap;
use nalgebra::Vector2;

use crate::boundary::DiscreteBoundary;
use crate::geometry::Point;
use crate::shape::DiscreteShape;

/// A window-edge midpoint, named after the window edge it sits on.
#[derive(Clone, Copy, Debug)]
enum Mid {
    Top,
    Right,
    Bottom,
    Left,
}

use Mid::{Bottom, Left, Right, Top};

/// Directed segments per occupancy case. The case index packs the corners as
/// `top-left * 8 + top-right * 4 + bottom-right * 2 + bottom-left`. The two
/// saddle cases (5 and 10) treat the window center as unoccupied, keeping the
/// diagonal corners disconnected.
fn segments(case: u8) -> &'static [(Mid, Mid)] {
    match case {
        1 => &[(Left, Bottom)],
        2 => &[(Bottom, Right)],
        3 => &[(Left, Right)],
        4 => &[(Right, Top)],
        5 => &[(Right, Top), (Left, Bottom)],
        6 => &[(Bottom, Top)],
        7 => &[(Left, Top)],
        8 => &[(Top, Left)],
        9 => &[(Top, Bottom)],
        10 => &[(Top, Left), (Bottom, Right)],
        11 => &[(Top, Right)],
        12 => &[(Right, Left)],
        13 => &[(Right, Bottom)],
        14 => &[(Bottom, Left)],
        _ => &[],
    }
}

/// Extracts the boundary of a discrete shape by marching squares.
///
/// The sweep starts one stride outside the grid and samples out-of-grid cells
/// as unoccupied, so shapes touching the border still produce closed
/// contours. An empty or fully occupied shape yields an empty boundary.
///
/// # Panics
///
/// Panics if `step` is zero.
pub fn marching_squares(shape: &DiscreteShape<2>, step: usize) -> DiscreteBoundary<2> {
    assert!(step > 0, "marching squares step must be positive");
    let step = step as i64;
    let [width, height] = shape.extents();
    let mut boundary = DiscreteBoundary::new(shape.frame().clone());
    // A fully occupied shape has no interior transition; the border contour
    // the sweep would synthesize around it is not a boundary of the shape.
    if shape.is_full() {
        return boundary;
    }
    let mut interned = FnvHashMap::default();

    let mut y = -step;
    while y < height as i64 {
        let mut x = -step;
        while x < width as i64 {
            for &(from, to) in segments(window_case(shape, x, y, step)) {
                let a = intern(&mut boundary, &mut interned, shape, key((x, y), step, from));
                let b = intern(&mut boundary, &mut interned, shape, key((x, y), step, to));
                boundary.link(a, b);
            }
            x += step;
        }
        y += step;
    }
    boundary
}

fn window_case(shape: &DiscreteShape<2>, x: i64, y: i64, step: i64) -> u8 {
    let mut case = 0;
    if shape.occupied_signed([x as isize, y as isize]) {
        case |= 8;
    }
    if shape.occupied_signed([(x + step) as isize, y as isize]) {
        case |= 4;
    }
    if shape.occupied_signed([(x + step) as isize, (y + step) as isize]) {
        case |= 2;
    }
    if shape.occupied_signed([x as isize, (y + step) as isize]) {
        case |= 1;
    }
    case
}

/// Midpoint coordinates on the doubled lattice, exact for any stride.
fn key(anchor: (i64, i64), step: i64, mid: Mid) -> (i64, i64) {
    let (x2, y2) = (anchor.0 * 2, anchor.1 * 2);
    match mid {
        Top => (x2 + step, y2),
        Right => (x2 + 2 * step, y2 + step),
        Bottom => (x2 + step, y2 + 2 * step),
        Left => (x2, y2 + step),
    }
}

fn intern(
    boundary: &mut DiscreteBoundary<2>,
    interned: &mut FnvHashMap<(i64, i64), usize>,
    shape: &DiscreteShape<2>,
    key: (i64, i64),
) -> usize {
    *interned.entry(key).or_insert_with(|| {
        let resolution = shape.resolution();
        let local = Vector2::new(
            key.0 as f64 * 0.5 * resolution[0],
            key.1 as f64 * 0.5 * resolution[1],
        );
        boundary.push_vertex(Point::new(shape.frame().to_global(&local)))
    })
}

#[cfg(test)]
mod tests {
    use nalgebra::Vector2;

    use crate::boundary::marching_squares;
    use crate::geometry::Frame;
    use crate::shape::DiscreteShape;

    fn shape_from<F>(extents: [usize; 2], occupied: F) -> DiscreteShape<2>
    where
        F: FnMut([usize; 2]) -> bool,
    {
        DiscreteShape::from_fn(
            extents,
            Vector2::new(1.0, 1.0),
            Frame::<2>::canonical(),
            occupied,
        )
    }

    #[test]
    fn empty_shape_has_empty_boundary() {
        let boundary = marching_squares(&shape_from([4, 4], |_| false), 1);
        assert!(boundary.is_empty());
    }

    #[test]
    fn single_cell_closes_into_a_diamond() {
        let boundary = marching_squares(&shape_from([3, 3], |[x, y]| x == 1 && y == 1), 1);
        let polylines = boundary.polylines();
        assert_eq!(boundary.vertex_count(), 4);
        assert_eq!(polylines.len(), 1);
        assert_eq!(polylines[0].len(), 4);
        assert!(boundary.is_closed(&polylines[0]));
    }

    #[test]
    fn block_touching_the_border_still_closes() {
        let boundary = marching_squares(&shape_from([3, 3], |[x, _]| x < 2), 1);
        let polylines = boundary.polylines();
        assert_eq!(polylines.len(), 1);
        assert!(boundary.is_closed(&polylines[0]));
    }

    #[test]
    fn full_shape_has_empty_boundary() {
        let boundary = marching_squares(&shape_from([4, 4], |_| true), 1);
        assert!(boundary.is_empty());
        assert!(boundary.polylines().is_empty());
    }

    #[test]
    fn hole_produces_a_second_contour() {
        // A 3x3 ring of occupied cells with an unoccupied center.
        let boundary = marching_squares(
            &shape_from([5, 5], |[x, y]| {
                (1..=3).contains(&x) && (1..=3).contains(&y) && !(x == 2 && y == 2)
            }),
            1,
        );
        let polylines = boundary.polylines();
        assert_eq!(polylines.len(), 2);
        assert!(polylines.iter().all(|p| boundary.is_closed(p)));
    }

    #[test]
    fn stride_two_subsamples_the_grid() {
        let boundary = marching_squares(
            &shape_from([6, 6], |[x, y]| (1..5).contains(&x) && (1..5).contains(&y)),
            2,
        );
        let polylines = boundary.polylines();
        assert_eq!(polylines.len(), 1);
        assert!(boundary.is_closed(&polylines[0]));
    }

    #[test]
    fn saddle_windows_stay_disconnected() {
        // Two diagonal cells share a corner; the tie-break keeps them as two
        // separate contours.
        let boundary = marching_squares(
            &shape_from([4, 4], |[x, y]| (x == 1 && y == 1) || (x == 2 && y == 2)),
            1,
        );
        let polylines = boundary.polylines();
        assert_eq!(polylines.len(), 2);
        assert!(polylines.iter().all(|p| boundary.is_closed(p)));
    }
}
