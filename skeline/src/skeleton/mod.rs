//! Curve-skeleton graphs and branch separation.
//!
//! A [`GraphCurveSkeleton`] is the raw per-cell skeleton topology: an
//! undirected graph whose nodes carry one storage vector each, interpreted
//! through a geometric [`Model`]. Most of its nodes have degree 2 and form
//! long chains. [`separate_branches`] collapses such a graph into a
//! [`ComposedCurveSkeleton`]: a coarse graph whose nodes are the extremities
//! (degree 1) and junctions (degree 3 or more) of the source graph and whose
//! edges are [`GraphBranch`]es, the maximal degree-2 chains between them.
//!
//! [`Model`]: crate::skeleton::model::Model

pub mod model;

mod branch;
mod composed;
mod graph;
mod separate;

pub use crate::skeleton::branch::GraphBranch;
pub use crate::skeleton::composed::ComposedCurveSkeleton;
pub use crate::skeleton::graph::GraphCurveSkeleton;
pub use crate::skeleton::separate::{separate_branches, SeparationError};

pub(crate) trait OptionExt<T> {
    fn expect_node(self, id: u32) -> T;

    fn expect_consistent(self) -> T;
}

impl<T> OptionExt<T> for Option<T> {
    fn expect_node(self, id: u32) -> T {
        match self {
            Some(value) => value,
            _ => panic!("node {} is not present in the skeleton", id),
        }
    }

    fn expect_consistent(self) -> T {
        match self {
            Some(value) => value,
            _ => panic!("skeleton internal consistency violated"),
        }
    }
}
