use crate::skeleton::model::Model;
use crate::skeleton::GraphCurveSkeleton;

/// A maximal degree-2 chain of a curve skeleton.
///
/// A branch stores its node storage vectors in walk order, from one endpoint
/// of the chain to the other, together with a private copy of the model that
/// interprets them. Branches are produced by
/// [`separate_branches`](crate::skeleton::separate_branches) but can also be
/// built directly.
#[derive(Clone, Debug)]
pub struct GraphBranch<M>
where
    M: Model,
{
    model: M,
    storages: Vec<M::Storage>,
}

impl<M> GraphBranch<M>
where
    M: Model,
{
    pub fn new(model: M, storages: Vec<M::Storage>) -> Self {
        GraphBranch { model, storages }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn storages(&self) -> &[M::Storage] {
        &self.storages
    }

    pub fn len(&self) -> usize {
        self.storages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storages.is_empty()
    }

    pub fn first(&self) -> Option<&M::Storage> {
        self.storages.first()
    }

    pub fn last(&self) -> Option<&M::Storage> {
        self.storages.last()
    }

    /// Rebuilds the branch as a standalone skeleton: a path graph with dense
    /// keys `0..len` in walk order.
    pub fn to_graph(&self) -> GraphCurveSkeleton<M> {
        let mut graph = GraphCurveSkeleton::new(self.model.clone());
        for (id, storage) in self.storages.iter().enumerate() {
            graph.add_node(id as u32, storage.clone());
        }
        for id in 1..self.storages.len() {
            graph.add_edge(id as u32 - 1, id as u32);
        }
        graph
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::Vector3;

    use crate::geometry::Frame;
    use crate::skeleton::model::Classic;
    use crate::skeleton::GraphBranch;

    fn branch(length: u32) -> GraphBranch<Classic<2>> {
        GraphBranch::new(
            Classic::new(Frame::<2>::canonical()),
            (0..length)
                .map(|id| Vector3::new(id as f64, 0.0, 1.0))
                .collect(),
        )
    }

    #[test]
    fn endpoints_follow_walk_order() {
        let branch = branch(4);
        assert_eq!(branch.len(), 4);
        assert_eq!(branch.first(), Some(&Vector3::new(0.0, 0.0, 1.0)));
        assert_eq!(branch.last(), Some(&Vector3::new(3.0, 0.0, 1.0)));
    }

    #[test]
    fn rebuilt_graph_is_a_path() {
        let graph = branch(5).to_graph();
        assert_eq!(graph.node_count(), 5);
        assert_eq!(graph.edge_count(), 4);
        assert_eq!(graph.nodes_with_degree(1), vec![0, 4]);
        assert_eq!(graph.nodes_with_degree(2), vec![1, 2, 3]);
    }

    #[test]
    fn empty_branch_rebuilds_empty() {
        let branch = branch(0);
        assert!(branch.is_empty());
        assert!(branch.to_graph().is_empty());
    }
}
