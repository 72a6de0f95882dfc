use fnv::FnvHashSet;
use itertools::Itertools;
use std::collections::VecDeque;
use thiserror::Error;

use crate::skeleton::model::Model;
use crate::skeleton::{ComposedCurveSkeleton, GraphBranch, GraphCurveSkeleton, OptionExt};

/// Errors concerning branch separation.
#[derive(Debug, Error, PartialEq)]
pub enum SeparationError {
    /// The graph has no node of degree other than 2, so no walk can start.
    #[error("curve skeleton has no extremity or junction to seed a branch walk")]
    NoExtremity,
}

/// Separates a curve skeleton into its maximal degree-2 branches.
///
/// Extremities (degree 1) and junctions (degree 3 or more) of the source
/// graph become the nodes of the composed skeleton, keyed densely in
/// ascending order of their source keys. Each branch is walked from an
/// endpoint through interior degree-2 nodes to the opposite endpoint and
/// becomes one composed edge carrying the chain as a [`GraphBranch`]. Every
/// source edge belongs to exactly one branch. A cycle attached to a junction
/// comes back as a self-edge on that junction.
///
/// Walks are seeded from extremities first and junctions are enqueued as
/// they are discovered, so on a connected graph with at least one extremity
/// every branch is oriented away from the extremity side. An empty graph
/// separates into an empty composed skeleton.
///
/// # Errors
///
/// Returns an error if the graph is non-empty but every node has degree 2,
/// since such a pure cycle has no endpoint to anchor a branch.
pub fn separate_branches<M>(
    graph: &GraphCurveSkeleton<M>,
) -> Result<ComposedCurveSkeleton<GraphBranch<M>>, SeparationError>
where
    M: Model,
{
    if graph.is_empty() {
        return Ok(ComposedCurveSkeleton::new());
    }
    let mut seeds: VecDeque<u32> = graph.nodes_with_degree(1).into();
    if seeds.is_empty() {
        seeds = graph
            .node_ids()
            .into_iter()
            .filter(|&id| graph.degree(id) > 2)
            .collect();
    }
    if seeds.is_empty() {
        return Err(SeparationError::NoExtremity);
    }

    let mut used = FnvHashSet::default();
    let mut branches: Vec<(u32, u32, Vec<u32>)> = Vec::new();
    while let Some(seed) = seeds.pop_front() {
        for &next in graph.neighbors(seed) {
            if used.contains(&undirected(seed, next)) {
                continue;
            }
            used.insert(undirected(seed, next));
            let mut chain = vec![seed, next];
            let mut previous = seed;
            let mut current = next;
            while graph.degree(current) == 2 && current != seed {
                let step = graph
                    .neighbors(current)
                    .iter()
                    .copied()
                    .find(|&neighbor| neighbor != previous)
                    .expect_consistent();
                used.insert(undirected(current, step));
                previous = current;
                current = step;
                chain.push(current);
            }
            if graph.degree(current) > 2 {
                seeds.push_back(current);
            }
            branches.push((seed, current, chain));
        }
    }

    let endpoints: Vec<u32> = branches
        .iter()
        .flat_map(|&(a, b, _)| [a, b])
        .sorted()
        .dedup()
        .collect();
    let mut composed = ComposedCurveSkeleton::new();
    for &endpoint in &endpoints {
        composed.add_node(endpoint);
    }
    for (a, b, chain) in branches {
        let a = endpoints.binary_search(&a).ok().expect_consistent();
        let b = endpoints.binary_search(&b).ok().expect_consistent();
        let branch = GraphBranch::new(graph.model().clone(), graph.storages(chain));
        composed.add_edge(a, b, branch);
    }
    Ok(composed)
}

fn undirected(a: u32, b: u32) -> (u32, u32) {
    (a.min(b), a.max(b))
}

#[cfg(test)]
mod tests {
    use nalgebra::Vector3;

    use crate::geometry::Frame;
    use crate::skeleton::model::Classic;
    use crate::skeleton::{separate_branches, GraphCurveSkeleton, SeparationError};

    // Storage vectors encode the node key in their first component so tests
    // can recognize nodes inside branch chains.
    fn graph_of(nodes: &[u32], edges: &[(u32, u32)]) -> GraphCurveSkeleton<Classic<2>> {
        let mut graph = GraphCurveSkeleton::new(Classic::new(Frame::<2>::canonical()));
        for &id in nodes {
            graph.add_node(id, Vector3::new(id as f64, 0.0, 1.0));
        }
        for &(a, b) in edges {
            graph.add_edge(a, b);
        }
        graph
    }

    fn keys(storages: &[Vector3<f64>]) -> Vec<u32> {
        storages.iter().map(|storage| storage[0] as u32).collect()
    }

    #[test]
    fn empty_graph_separates_trivially() {
        let graph = graph_of(&[], &[]);
        let composed = separate_branches(&graph).unwrap();
        assert!(composed.is_empty());
        assert_eq!(composed.edge_count(), 0);
    }

    #[test]
    fn path_collapses_to_a_single_branch() {
        let graph = graph_of(&[0, 1, 2, 3, 4], &[(0, 1), (1, 2), (2, 3), (3, 4)]);
        let composed = separate_branches(&graph).unwrap();
        assert_eq!(composed.node_count(), 2);
        assert_eq!(composed.edge_count(), 1);
        let (a, b, branch) = composed.edges().next().unwrap();
        assert_eq!(composed.source(a), 0);
        assert_eq!(composed.source(b), 4);
        assert_eq!(keys(branch.storages()), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn junction_splits_branches() {
        // One chain 0-1-2 joining a junction at 2 with leaves 3 and 4.
        let graph = graph_of(&[0, 1, 2, 3, 4], &[(0, 1), (1, 2), (2, 3), (2, 4)]);
        let composed = separate_branches(&graph).unwrap();
        assert_eq!(composed.node_count(), 4);
        assert_eq!(composed.edge_count(), 3);
        let junction = composed.node_of(2).unwrap();
        assert_eq!(composed.degree(junction), 3);

        let long = composed.edges_between(composed.node_of(0).unwrap(), junction);
        assert_eq!(long.len(), 1);
        assert_eq!(keys(long[0].storages()), vec![0, 1, 2]);
        let short = composed.edges_between(composed.node_of(3).unwrap(), junction);
        assert_eq!(keys(short[0].storages()), vec![3, 2]);
    }

    #[test]
    fn pure_cycle_has_no_seed() {
        let graph = graph_of(&[0, 1, 2, 3], &[(0, 1), (1, 2), (2, 3), (3, 0)]);
        assert_eq!(
            separate_branches(&graph).err(),
            Some(SeparationError::NoExtremity)
        );
    }

    #[test]
    fn every_edge_lands_in_exactly_one_branch() {
        // Two junctions (2 and 5) joined directly, each with two leaves.
        let graph = graph_of(
            &[0, 1, 2, 3, 4, 5, 6],
            &[(0, 2), (1, 2), (2, 5), (3, 5), (4, 5), (5, 6)],
        );
        let composed = separate_branches(&graph).unwrap();
        assert_eq!(composed.node_count(), 7);
        assert_eq!(composed.edge_count(), 6);
        let mut covered: Vec<(u32, u32)> = composed
            .edges()
            .flat_map(|(_, _, branch)| {
                let chain = keys(branch.storages());
                chain
                    .windows(2)
                    .map(|pair| (pair[0].min(pair[1]), pair[0].max(pair[1])))
                    .collect::<Vec<_>>()
            })
            .collect();
        covered.sort();
        assert_eq!(
            covered,
            vec![(0, 2), (1, 2), (2, 5), (3, 5), (4, 5), (5, 6)]
        );
    }

    #[test]
    fn cycle_on_a_junction_becomes_a_self_edge() {
        // A leaf chain 0-1 into junction 1 carrying the cycle 1-2-3-4-1.
        let graph = graph_of(
            &[0, 1, 2, 3, 4],
            &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 1)],
        );
        let composed = separate_branches(&graph).unwrap();
        assert_eq!(composed.node_count(), 2);
        assert_eq!(composed.edge_count(), 2);
        let junction = composed.node_of(1).unwrap();
        let loops = composed.edges_between(junction, junction);
        assert_eq!(loops.len(), 1);
        assert_eq!(keys(loops[0].storages()), vec![1, 2, 3, 4, 1]);
        assert_eq!(composed.degree(junction), 3);
    }

    #[test]
    fn junctions_seed_walks_when_no_extremity_exists() {
        // A theta graph: junctions 0 and 3 joined by three parallel chains.
        let graph = graph_of(
            &[0, 1, 2, 3, 4, 5],
            &[(0, 1), (1, 3), (0, 2), (2, 3), (0, 4), (4, 5), (5, 3)],
        );
        let composed = separate_branches(&graph).unwrap();
        assert_eq!(composed.node_count(), 2);
        assert_eq!(composed.edge_count(), 3);
        let (a, b) = (composed.node_of(0).unwrap(), composed.node_of(3).unwrap());
        assert_eq!(composed.edges_between(a, b).len(), 3);
    }
}
