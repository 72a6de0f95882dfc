use fnv::FnvHashMap;
use itertools::Itertools;
use smallvec::SmallVec;

use crate::skeleton::model::Model;
use crate::skeleton::OptionExt;

/// An undirected curve-skeleton graph.
///
/// Nodes are identified by caller-chosen `u32` keys (skeletonization usually
/// derives them from cell indices, so they are sparse) and each carries one
/// storage vector interpreted through the graph's [`Model`]. Edges are
/// unweighted, undirected, and at most one per node pair; self-loops are
/// rejected.
///
/// [`Model`]: crate::skeleton::model::Model
#[derive(Clone, Debug)]
pub struct GraphCurveSkeleton<M>
where
    M: Model,
{
    model: M,
    stors: FnvHashMap<u32, M::Storage>,
    adjacency: FnvHashMap<u32, SmallVec<[u32; 4]>>,
    edge_count: usize,
}

impl<M> GraphCurveSkeleton<M>
where
    M: Model,
{
    pub fn new(model: M) -> Self {
        GraphCurveSkeleton {
            model,
            stors: FnvHashMap::default(),
            adjacency: FnvHashMap::default(),
            edge_count: 0,
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Inserts a node with the given key and storage vector. Reinserting an
    /// existing key replaces its storage and keeps its edges.
    pub fn add_node(&mut self, id: u32, storage: M::Storage) {
        self.stors.insert(id, storage);
        self.adjacency.entry(id).or_default();
    }

    /// Connects two nodes. Adding an edge that already exists is a no-op.
    ///
    /// # Panics
    ///
    /// Panics if either node is absent or if `a == b`.
    pub fn add_edge(&mut self, a: u32, b: u32) {
        assert!(a != b, "self-loops are not representable in a curve skeleton");
        assert!(self.stors.contains_key(&a), "node {} is not present in the skeleton", a);
        assert!(self.stors.contains_key(&b), "node {} is not present in the skeleton", b);
        let forward = self.adjacency.get_mut(&a).expect_node(a);
        if forward.contains(&b) {
            return;
        }
        forward.push(b);
        self.adjacency.get_mut(&b).expect_node(b).push(a);
        self.edge_count += 1;
    }

    /// Gets the neighbors of a node in insertion order.
    ///
    /// # Panics
    ///
    /// Panics if the node is absent.
    pub fn neighbors(&self, id: u32) -> &[u32] {
        self.adjacency.get(&id).expect_node(id)
    }

    /// Gets the degree of a node.
    ///
    /// # Panics
    ///
    /// Panics if the node is absent.
    pub fn degree(&self, id: u32) -> usize {
        self.neighbors(id).len()
    }

    /// Gets the keys of all nodes with the given degree, in ascending order.
    pub fn nodes_with_degree(&self, degree: usize) -> Vec<u32> {
        self.adjacency
            .iter()
            .filter(|(_, neighbors)| neighbors.len() == degree)
            .map(|(&id, _)| id)
            .sorted()
            .collect()
    }

    /// Gets all node keys in ascending order.
    pub fn node_ids(&self) -> Vec<u32> {
        self.stors.keys().copied().sorted().collect()
    }

    /// Gets the storage vector of a node.
    ///
    /// # Panics
    ///
    /// Panics if the node is absent.
    pub fn storage(&self, id: u32) -> &M::Storage {
        self.stors.get(&id).expect_node(id)
    }

    /// Gets the storage vectors of the given nodes, in caller order.
    ///
    /// # Panics
    ///
    /// Panics if any node is absent.
    pub fn storages<I>(&self, ids: I) -> Vec<M::Storage>
    where
        I: IntoIterator<Item = u32>,
    {
        ids.into_iter()
            .map(|id| self.storage(id).clone())
            .collect()
    }

    pub fn node_count(&self) -> usize {
        self.stors.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.stors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::Vector3;

    use crate::geometry::Frame;
    use crate::skeleton::model::Classic;
    use crate::skeleton::GraphCurveSkeleton;

    fn graph() -> GraphCurveSkeleton<Classic<2>> {
        GraphCurveSkeleton::new(Classic::new(Frame::<2>::canonical()))
    }

    fn disc(id: u32) -> Vector3<f64> {
        Vector3::new(id as f64, 0.0, 1.0)
    }

    #[test]
    fn nodes_and_edges_are_counted() {
        let mut graph = graph();
        for id in [7, 3, 11] {
            graph.add_node(id, disc(id));
        }
        graph.add_edge(7, 3);
        graph.add_edge(3, 11);
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.node_ids(), vec![3, 7, 11]);
        assert_eq!(graph.degree(3), 2);
        assert_eq!(graph.degree(7), 1);
    }

    #[test]
    fn duplicate_edges_are_idempotent() {
        let mut graph = graph();
        graph.add_node(0, disc(0));
        graph.add_node(1, disc(1));
        graph.add_edge(0, 1);
        graph.add_edge(1, 0);
        graph.add_edge(0, 1);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.neighbors(0), &[1]);
        assert_eq!(graph.neighbors(1), &[0]);
    }

    #[test]
    fn degree_queries_find_extremities_and_junctions() {
        // A star: 0 at the center, leaves 1..=3.
        let mut graph = graph();
        for id in 0..4 {
            graph.add_node(id, disc(id));
        }
        for leaf in 1..4 {
            graph.add_edge(0, leaf);
        }
        assert_eq!(graph.nodes_with_degree(1), vec![1, 2, 3]);
        assert_eq!(graph.nodes_with_degree(3), vec![0]);
        assert!(graph.nodes_with_degree(2).is_empty());
    }

    #[test]
    fn storages_follow_caller_order() {
        let mut graph = graph();
        for id in [2, 5, 9] {
            graph.add_node(id, disc(id));
        }
        let storages = graph.storages([9, 2]);
        assert_eq!(storages, vec![disc(9), disc(2)]);
    }

    #[test]
    fn reinserting_a_node_replaces_its_storage() {
        let mut graph = graph();
        graph.add_node(4, disc(4));
        graph.add_node(5, disc(5));
        graph.add_edge(4, 5);
        graph.add_node(4, Vector3::new(0.0, 0.0, 9.0));
        assert_eq!(graph.storage(4), &Vector3::new(0.0, 0.0, 9.0));
        assert_eq!(graph.degree(4), 1);
    }

    #[test]
    #[should_panic(expected = "node 1 is not present in the skeleton")]
    fn edges_require_both_nodes() {
        let mut graph = graph();
        graph.add_node(0, disc(0));
        graph.add_edge(0, 1);
    }

    #[test]
    #[should_panic(expected = "self-loops are not representable")]
    fn self_loops_are_rejected() {
        let mut graph = graph();
        graph.add_node(0, disc(0));
        graph.add_edge(0, 0);
    }
}
