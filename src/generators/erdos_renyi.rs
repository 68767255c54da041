//! Erdős–Rényi G(n, p) random graphs.

use petgraph::stable_graph::{NodeIndex, StableUnGraph};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::{LayoutError, Result};

/// Builds undirected graphs where each of the `n(n-1)/2` node pairs is
/// joined independently with probability `p`.
pub struct ErdosRenyiGenerator<N, F: FnMut() -> N> {
    node_supplier: F,
    node_count: usize,
    p: f64,
    rng: ChaCha8Rng,
}

impl<N, F: FnMut() -> N> ErdosRenyiGenerator<N, F> {
    /// `node_count` must be positive and `p` within `[0, 1]`.
    ///
    /// The generator starts from an entropy seed; call
    /// [`set_seed`](Self::set_seed) for reproducible output.
    pub fn new(node_supplier: F, node_count: usize, p: f64) -> Result<Self> {
        if node_count == 0 {
            return Err(LayoutError::invalid(
                "node_count",
                "Number of vertices must be positive",
            ));
        }
        if !(0.0..=1.0).contains(&p) {
            return Err(LayoutError::invalid(
                "p",
                format!("Probability of connection must be in [0, 1], got {p}"),
            ));
        }
        Ok(Self {
            node_supplier,
            node_count,
            p,
            rng: ChaCha8Rng::from_entropy(),
        })
    }

    /// Restart the edge sequence from `seed`.
    pub fn set_seed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    /// Generate a graph with fresh nodes from the supplier.
    pub fn generate(&mut self) -> StableUnGraph<N, ()> {
        let n = self.node_count;
        let mut graph = StableUnGraph::with_capacity(n, 0);
        let nodes: Vec<NodeIndex> = (0..n)
            .map(|_| graph.add_node((self.node_supplier)()))
            .collect();

        for i in 0..n {
            for j in (i + 1)..n {
                if self.rng.gen_range(0.0..1.0) < self.p {
                    graph.add_edge(nodes[i], nodes[j], ());
                }
            }
        }

        tracing::debug!(
            nodes = n,
            edges = graph.edge_count(),
            p = self.p,
            "erdos-renyi graph generated"
        );
        graph
    }
}
