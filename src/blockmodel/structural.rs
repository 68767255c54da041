//! Structural equivalence.
//!
//! Nodes `a` and `b` are structurally equivalent when, ignoring `a` and `b`
//! themselves, they have the same predecessors and the same successors, an
//! edge `a -> b` exists exactly when `b -> a` does, and `a` has a self-loop
//! exactly when `b` does. Finding all classes takes O(V²) pair tests.

use std::collections::HashSet;

use super::VertexPartition;
use crate::graph::GraphQuery;

type PairFilter<'f, N> = Box<dyn Fn(N, N) -> bool + 'f>;

/// Partitions a graph into structurally equivalent classes.
pub struct StructurallyEquivalent<'f, N> {
    filter: Option<PairFilter<'f, N>>,
}

impl<N: Copy> Default for StructurallyEquivalent<'_, N> {
    fn default() -> Self {
        Self { filter: None }
    }
}

impl<'f, N: Copy> StructurallyEquivalent<'f, N> {
    /// Test every pair of nodes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip the full test for pairs rejected by `filter`, e.g. nodes from
    /// different sides of a bipartite graph. Should be cheap.
    pub fn with_filter(filter: impl Fn(N, N) -> bool + 'f) -> Self {
        Self {
            filter: Some(Box::new(filter)),
        }
    }

    fn can_be_equivalent(&self, a: N, b: N) -> bool {
        self.filter.as_ref().is_none_or(|f| f(a, b))
    }

    /// Group the nodes of `graph` into structurally equivalent classes.
    pub fn partition<'g, G>(&self, graph: &'g G) -> VertexPartition<'g, G>
    where
        G: GraphQuery<Node = N>,
    {
        let nodes = graph.nodes();
        let mut sets = DisjointSets::new(nodes.len());
        let mut merged = vec![false; nodes.len()];

        for i in 0..nodes.len() {
            if merged[i] {
                continue;
            }
            for j in (i + 1)..nodes.len() {
                if merged[j] || !self.can_be_equivalent(nodes[i], nodes[j]) {
                    continue;
                }
                if is_structurally_equivalent(graph, nodes[i], nodes[j]) {
                    sets.union(i, j);
                    merged[j] = true;
                }
            }
        }

        let labelled: Vec<_> = (0..nodes.len()).map(|i| (nodes[i], sets.find(i))).collect();
        let partition = VertexPartition::from_labels(graph, labelled);
        tracing::debug!(
            nodes = nodes.len(),
            classes = partition.class_count(),
            "structural equivalence computed"
        );
        partition
    }
}

/// The pairwise test. Symmetric in `a` and `b`.
pub(crate) fn is_structurally_equivalent<G: GraphQuery>(graph: &G, a: G::Node, b: G::Node) -> bool {
    if graph.degree(a) != graph.degree(b) {
        return false;
    }

    let others = |ns: Vec<G::Node>| -> HashSet<G::Node> {
        ns.into_iter().filter(|&n| n != a && n != b).collect()
    };
    if others(graph.predecessors(a)) != others(graph.predecessors(b)) {
        return false;
    }

    let succ_a = graph.successors(a);
    let succ_b = graph.successors(b);
    if others(succ_a.clone()) != others(succ_b.clone()) {
        return false;
    }

    succ_a.contains(&b) == succ_b.contains(&a) && succ_a.contains(&a) == succ_b.contains(&b)
}

/// Union-find over `0..n`. The smaller index becomes the representative so
/// results don't depend on merge order.
struct DisjointSets {
    parent: Vec<usize>,
}

impl DisjointSets {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    fn find(&mut self, mut i: usize) -> usize {
        while self.parent[i] != i {
            self.parent[i] = self.parent[self.parent[i]];
            i = self.parent[i];
        }
        i
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            let (lo, hi) = if ra < rb { (ra, rb) } else { (rb, ra) };
            self.parent[hi] = lo;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petgraph::graph::{DiGraph, NodeIndex, UnGraph};

    fn assert_covering<G: GraphQuery>(graph: &G, partition: &VertexPartition<'_, G>) {
        let mut seen = HashSet::new();
        for class in partition.classes() {
            assert!(!class.is_empty());
            for &n in class {
                assert!(seen.insert(n), "{n:?} in two classes");
            }
        }
        assert_eq!(seen.len(), graph.node_count());
    }

    #[test]
    fn test_isolated_nodes_are_equivalent() {
        let mut g: UnGraph<(), ()> = UnGraph::default();
        let a = g.add_node(());
        let b = g.add_node(());
        let c = g.add_node(());
        let d = g.add_node(());
        g.add_edge(c, d, ());

        let partition = StructurallyEquivalent::new().partition(&g);
        assert_covering(&g, &partition);
        assert_eq!(partition.class_of(a), Some(&[a, b][..]));
        // c and d are each other's only neighbour
        assert_eq!(partition.class_of(c), Some(&[c, d][..]));
        assert_eq!(partition.class_count(), 2);
    }

    #[test]
    fn test_disjoint_neighbourhoods_not_merged() {
        // a - x, b - y: a and b have the same degree but different
        // neighbours, while each edge's endpoints mirror each other
        let mut g: UnGraph<(), ()> = UnGraph::default();
        let a = g.add_node(());
        let b = g.add_node(());
        let x = g.add_node(());
        let y = g.add_node(());
        g.add_edge(a, x, ());
        g.add_edge(b, y, ());

        let partition = StructurallyEquivalent::new().partition(&g);
        assert_covering(&g, &partition);
        assert_ne!(partition.assignments()[&a], partition.assignments()[&b]);
        assert_eq!(partition.class_of(a), Some(&[a, x][..]));
        assert_eq!(partition.class_of(y), Some(&[b, y][..]));
        assert_eq!(partition.class_count(), 2);
    }

    #[test]
    fn test_shared_hub_leaves_merge() {
        // star: leaves share the hub as their only neighbour
        let mut g: UnGraph<(), ()> = UnGraph::default();
        let hub = g.add_node(());
        let leaves: Vec<NodeIndex> = (0..4).map(|_| g.add_node(())).collect();
        for &l in &leaves {
            g.add_edge(hub, l, ());
        }
        let partition = StructurallyEquivalent::new().partition(&g);
        assert_eq!(partition.class_of(hub), Some(&[hub][..]));
        assert_eq!(partition.class_of(leaves[2]), Some(leaves.as_slice()));
    }

    #[test]
    fn test_clique_forms_one_class() {
        let mut g: UnGraph<(), ()> = UnGraph::default();
        let nodes: Vec<NodeIndex> = (0..5).map(|_| g.add_node(())).collect();
        for i in 0..nodes.len() {
            for j in (i + 1)..nodes.len() {
                g.add_edge(nodes[i], nodes[j], ());
            }
        }
        let partition = StructurallyEquivalent::new().partition(&g);
        assert_eq!(partition.class_count(), 1);
        assert_eq!(partition.classes()[0], nodes);
    }

    #[test]
    fn test_one_way_edge_breaks_equivalence() {
        let mut g: DiGraph<(), ()> = DiGraph::default();
        let a = g.add_node(());
        let b = g.add_node(());
        let c = g.add_node(());
        g.add_edge(c, a, ());
        g.add_edge(c, b, ());
        assert!(is_structurally_equivalent(&g, a, b));

        g.add_edge(a, b, ());
        assert!(!is_structurally_equivalent(&g, a, b));
        g.add_edge(b, a, ());
        assert!(is_structurally_equivalent(&g, a, b));
    }

    #[test]
    fn test_self_loop_must_match() {
        let mut g: DiGraph<(), ()> = DiGraph::default();
        let a = g.add_node(());
        let b = g.add_node(());
        let c = g.add_node(());
        g.add_edge(c, a, ());
        g.add_edge(c, b, ());
        g.add_edge(a, a, ());
        assert!(!is_structurally_equivalent(&g, a, b));
        g.add_edge(b, b, ());
        assert!(is_structurally_equivalent(&g, a, b));
    }

    #[test]
    fn test_filter_rejects_pairs() {
        let mut g: UnGraph<u8, ()> = UnGraph::default();
        let a = g.add_node(0);
        let b = g.add_node(1);
        let graph = &g;
        let same_side = |x: NodeIndex, y: NodeIndex| graph[x] == graph[y];
        let partition = StructurallyEquivalent::with_filter(same_side).partition(graph);
        assert_eq!(partition.class_count(), 2);
        assert_ne!(partition.assignments()[&a], partition.assignments()[&b]);
    }
}
