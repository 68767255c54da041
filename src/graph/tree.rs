//! Forest helpers: root discovery and subtree extraction.

use std::collections::{HashMap, HashSet, VecDeque};

use petgraph::Directed;
use petgraph::graph::{IndexType, NodeIndex};
use petgraph::stable_graph::StableGraph;
use petgraph::visit::EdgeRef;

use super::GraphQuery;
use crate::error::{LayoutError, Result};

/// Nodes with no incoming edges, in node enumeration order.
pub fn roots<G: GraphQuery>(graph: &G) -> Vec<G::Node> {
    graph
        .nodes()
        .into_iter()
        .filter(|&n| graph.predecessors(n).is_empty())
        .collect()
}

/// Copy the subtree rooted at `root` into a new graph.
///
/// The result holds `root` and every node reachable from it, with node and
/// edge weights cloned from the source. Nodes reachable along several
/// paths appear once.
pub fn sub_tree<N, E, Ix>(
    tree: &StableGraph<N, E, Directed, Ix>,
    root: NodeIndex<Ix>,
) -> Result<StableGraph<N, E, Directed, Ix>>
where
    N: Clone,
    E: Clone,
    Ix: IndexType,
{
    let root_weight = tree
        .node_weight(root)
        .ok_or(LayoutError::UnknownNode(root.index() as u32))?;

    let mut out = StableGraph::default();
    let mut mapped: HashMap<NodeIndex<Ix>, NodeIndex<Ix>> = HashMap::new();
    let mut seen_edges = HashSet::new();
    mapped.insert(root, out.add_node(root_weight.clone()));

    let mut queue = VecDeque::from([root]);
    while let Some(parent) = queue.pop_front() {
        let mut outgoing: Vec<_> = tree.edges(parent).collect();
        // Preserve edge insertion order in the copy.
        outgoing.reverse();
        for edge in outgoing {
            if !seen_edges.insert(edge.id()) {
                continue;
            }
            let child = edge.target();
            let new_child = match mapped.get(&child) {
                Some(&existing) => existing,
                None => {
                    let created = out.add_node(tree[child].clone());
                    mapped.insert(child, created);
                    queue.push_back(child);
                    created
                }
            };
            out.add_edge(mapped[&parent], new_child, edge.weight().clone());
        }
    }

    Ok(out)
}
