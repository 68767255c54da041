//! Read-only graph query surface consumed by the layout engine.
//!
//! Layout algorithms never mutate the graph. They only need node
//! enumeration, successor/predecessor queries and degrees, which is what
//! [`GraphQuery`] captures. Implementations are provided for petgraph's
//! `Graph` and `StableGraph` in both directed and undirected flavours.

pub mod tree;

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

use petgraph::graph::{IndexType, NodeIndex};
use petgraph::stable_graph::StableGraph;
use petgraph::visit::EdgeRef;
use petgraph::{Direction, EdgeType, Graph};

pub use tree::{roots, sub_tree};

/// The graph operations a layout algorithm is allowed to perform.
///
/// Successors and predecessors are returned as distinct nodes in edge
/// insertion order. For undirected graphs both return the full
/// neighbourhood.
pub trait GraphQuery {
    /// Node identity. Nodes carry no position of their own.
    type Node: Copy + Eq + Hash + Ord + fmt::Debug;

    /// All nodes, in a stable order for the duration of the call.
    fn nodes(&self) -> Vec<Self::Node>;

    fn node_count(&self) -> usize;

    fn contains(&self, node: Self::Node) -> bool;

    fn successors(&self, node: Self::Node) -> Vec<Self::Node>;

    fn predecessors(&self, node: Self::Node) -> Vec<Self::Node>;

    /// Number of incident edge endpoints; a self-loop counts twice.
    fn degree(&self, node: Self::Node) -> usize;

    fn is_directed(&self) -> bool;
}

/// petgraph yields neighbours most-recent-first and may repeat them for
/// parallel edges. Reverse into insertion order and drop repeats.
fn distinct_in_insertion_order<N: Copy + Eq + Hash>(
    neighbors: impl Iterator<Item = N>,
) -> Vec<N> {
    let mut collected: Vec<N> = neighbors.collect();
    collected.reverse();
    let mut seen = HashSet::with_capacity(collected.len());
    collected.retain(|&n| seen.insert(n));
    collected
}

macro_rules! impl_graph_query {
    ($graph:ident) => {
        impl<N, E, Ty: EdgeType, Ix: IndexType> GraphQuery for $graph<N, E, Ty, Ix> {
            type Node = NodeIndex<Ix>;

            fn nodes(&self) -> Vec<Self::Node> {
                self.node_indices().collect()
            }

            fn node_count(&self) -> usize {
                $graph::node_count(self)
            }

            fn contains(&self, node: Self::Node) -> bool {
                self.node_weight(node).is_some()
            }

            fn successors(&self, node: Self::Node) -> Vec<Self::Node> {
                if !GraphQuery::contains(self, node) {
                    return Vec::new();
                }
                distinct_in_insertion_order(self.neighbors_directed(node, Direction::Outgoing))
            }

            fn predecessors(&self, node: Self::Node) -> Vec<Self::Node> {
                if !GraphQuery::contains(self, node) {
                    return Vec::new();
                }
                distinct_in_insertion_order(self.neighbors_directed(node, Direction::Incoming))
            }

            fn degree(&self, node: Self::Node) -> usize {
                if !GraphQuery::contains(self, node) {
                    return 0;
                }
                if Ty::is_directed() {
                    self.edges_directed(node, Direction::Outgoing).count()
                        + self.edges_directed(node, Direction::Incoming).count()
                } else {
                    // Undirected iteration reports a self-loop once.
                    self.edges(node)
                        .map(|e| if e.source() == e.target() { 2 } else { 1 })
                        .sum()
                }
            }

            fn is_directed(&self) -> bool {
                Ty::is_directed()
            }
        }
    };
}

impl_graph_query!(Graph);
impl_graph_query!(StableGraph);

#[cfg(test)]
mod tests {
    use super::*;
    use petgraph::stable_graph::{StableDiGraph, StableUnGraph};

    #[test]
    fn test_successors_in_insertion_order() {
        let mut g: StableDiGraph<&str, ()> = StableDiGraph::default();
        let a = g.add_node("a");
        let b = g.add_node("b");
        let c = g.add_node("c");
        let d = g.add_node("d");
        g.add_edge(a, b, ());
        g.add_edge(a, c, ());
        g.add_edge(a, d, ());

        assert_eq!(g.successors(a), vec![b, c, d]);
        assert_eq!(g.predecessors(c), vec![a]);
        assert!(g.successors(b).is_empty());
    }

    #[test]
    fn test_parallel_edges_reported_once() {
        let mut g: StableDiGraph<(), ()> = StableDiGraph::default();
        let a = g.add_node(());
        let b = g.add_node(());
        g.add_edge(a, b, ());
        g.add_edge(a, b, ());

        assert_eq!(g.successors(a), vec![b]);
        assert_eq!(g.degree(a), 2);
    }

    #[test]
    fn test_wide_star_with_repeated_edges() {
        let mut g: StableDiGraph<(), ()> = StableDiGraph::default();
        let hub = g.add_node(());
        let leaves: Vec<_> = (0..20_000).map(|_| g.add_node(())).collect();
        for &leaf in &leaves {
            g.add_edge(hub, leaf, ());
        }
        for &leaf in leaves.iter().rev() {
            g.add_edge(hub, leaf, ());
        }

        assert_eq!(g.successors(hub), leaves);
        assert_eq!(g.predecessors(leaves[7]), vec![hub]);
        assert_eq!(g.degree(hub), 40_000);
    }

    #[test]
    fn test_undirected_neighbourhood() {
        let mut g: StableUnGraph<(), ()> = StableUnGraph::default();
        let a = g.add_node(());
        let b = g.add_node(());
        let c = g.add_node(());
        g.add_edge(a, b, ());
        g.add_edge(c, a, ());

        let mut succ = g.successors(a);
        succ.sort();
        let mut pred = g.predecessors(a);
        pred.sort();
        assert_eq!(succ, vec![b, c]);
        assert_eq!(pred, vec![b, c]);
        assert_eq!(g.degree(a), 2);
        assert!(!g.is_directed());
    }

    #[test]
    fn test_self_loop_degree() {
        let mut directed: StableDiGraph<(), ()> = StableDiGraph::default();
        let a = directed.add_node(());
        directed.add_edge(a, a, ());
        assert_eq!(directed.degree(a), 2);

        let mut undirected: StableUnGraph<(), ()> = StableUnGraph::default();
        let b = undirected.add_node(());
        undirected.add_edge(b, b, ());
        assert_eq!(undirected.degree(b), 2);
    }

    #[test]
    fn test_removed_node_is_absent() {
        let mut g: StableDiGraph<(), ()> = StableDiGraph::default();
        let a = g.add_node(());
        let b = g.add_node(());
        g.add_edge(a, b, ());
        g.remove_node(b);

        assert!(!GraphQuery::contains(&g, b));
        assert_eq!(GraphQuery::node_count(&g), 1);
        assert!(g.successors(a).is_empty());
        assert_eq!(g.degree(b), 0);
    }
}
