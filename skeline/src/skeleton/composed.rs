/// A composed curve skeleton: the coarse topology of a separated skeleton.
///
/// Nodes are the extremities and junctions of a source
/// [`GraphCurveSkeleton`](crate::skeleton::GraphCurveSkeleton), keyed densely
/// from zero and remembering the source key they came from. Edges carry
/// arbitrary payloads, usually [`GraphBranch`](crate::skeleton::GraphBranch)es.
/// Unlike the source graph, a composed skeleton is a multigraph: parallel
/// edges and self-edges are meaningful (a cycle hanging off one junction is a
/// self-edge on that junction).
#[derive(Clone, Debug)]
pub struct ComposedCurveSkeleton<E> {
    sources: Vec<u32>,
    edges: Vec<(usize, usize, E)>,
}

impl<E> ComposedCurveSkeleton<E> {
    pub fn new() -> Self {
        ComposedCurveSkeleton {
            sources: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Inserts a node remembering the given source key and returns its dense
    /// key.
    pub fn add_node(&mut self, source: u32) -> usize {
        self.sources.push(source);
        self.sources.len() - 1
    }

    /// Connects two nodes with an edge payload. Self-edges and parallel edges
    /// are allowed.
    ///
    /// # Panics
    ///
    /// Panics if either key is out of range.
    pub fn add_edge(&mut self, a: usize, b: usize, payload: E) {
        assert!(
            a < self.sources.len() && b < self.sources.len(),
            "composed skeleton edge references a node that does not exist"
        );
        self.edges.push((a, b, payload));
    }

    pub fn node_count(&self) -> usize {
        self.sources.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Gets the source key a node was created from.
    ///
    /// # Panics
    ///
    /// Panics if the key is out of range.
    pub fn source(&self, node: usize) -> u32 {
        self.sources[node]
    }

    /// Finds the node created from the given source key, if any.
    pub fn node_of(&self, source: u32) -> Option<usize> {
        self.sources.iter().position(|&s| s == source)
    }

    /// Iterates over all edges as `(a, b, payload)` in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, &E)> {
        self.edges.iter().map(|(a, b, payload)| (*a, *b, payload))
    }

    /// Gets the payloads of all edges between two nodes, in either
    /// orientation.
    pub fn edges_between(&self, a: usize, b: usize) -> Vec<&E> {
        self.edges
            .iter()
            .filter(|(x, y, _)| (*x == a && *y == b) || (*x == b && *y == a))
            .map(|(_, _, payload)| payload)
            .collect()
    }

    /// Gets the degree of a node. A self-edge contributes two.
    pub fn degree(&self, node: usize) -> usize {
        self.edges
            .iter()
            .map(|(a, b, _)| (*a == node) as usize + (*b == node) as usize)
            .sum()
    }
}

impl<E> Default for ComposedCurveSkeleton<E> {
    fn default() -> Self {
        ComposedCurveSkeleton::new()
    }
}

#[cfg(test)]
mod tests {
    use crate::skeleton::ComposedCurveSkeleton;

    #[test]
    fn nodes_are_keyed_densely() {
        let mut composed = ComposedCurveSkeleton::<()>::new();
        assert_eq!(composed.add_node(17), 0);
        assert_eq!(composed.add_node(4), 1);
        assert_eq!(composed.source(0), 17);
        assert_eq!(composed.node_of(4), Some(1));
        assert_eq!(composed.node_of(99), None);
    }

    #[test]
    fn parallel_edges_are_kept() {
        let mut composed = ComposedCurveSkeleton::new();
        let a = composed.add_node(0);
        let b = composed.add_node(1);
        composed.add_edge(a, b, "upper");
        composed.add_edge(b, a, "lower");
        assert_eq!(composed.edge_count(), 2);
        assert_eq!(composed.edges_between(a, b), vec![&"upper", &"lower"]);
        assert_eq!(composed.degree(a), 2);
    }

    #[test]
    fn self_edges_count_twice() {
        let mut composed = ComposedCurveSkeleton::new();
        let junction = composed.add_node(5);
        composed.add_edge(junction, junction, "loop");
        assert_eq!(composed.degree(junction), 2);
        assert_eq!(composed.edges_between(junction, junction), vec![&"loop"]);
    }

    #[test]
    #[should_panic(expected = "edge references a node that does not exist")]
    fn edges_require_existing_nodes() {
        let mut composed = ComposedCurveSkeleton::new();
        let a = composed.add_node(0);
        composed.add_edge(a, a + 1, ());
    }
}
