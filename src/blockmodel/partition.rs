use std::collections::HashMap;

use crate::graph::GraphQuery;

/// Disjoint classes of nodes covering a whole graph.
///
/// Classes are ordered by their first member in node enumeration order,
/// and members within a class keep that order too.
#[derive(Debug)]
pub struct VertexPartition<'g, G: GraphQuery> {
    graph: &'g G,
    classes: Vec<Vec<G::Node>>,
    assignments: HashMap<G::Node, usize>,
}

impl<'g, G: GraphQuery> VertexPartition<'g, G> {
    /// Build a partition from one class label per node.
    ///
    /// Labels may be arbitrary; they are renumbered in order of first
    /// appearance.
    pub(crate) fn from_labels(
        graph: &'g G,
        labelled: impl IntoIterator<Item = (G::Node, usize)>,
    ) -> Self {
        let mut renumber: HashMap<usize, usize> = HashMap::new();
        let mut classes: Vec<Vec<G::Node>> = Vec::new();
        let mut assignments = HashMap::new();
        for (node, label) in labelled {
            let class = *renumber.entry(label).or_insert_with(|| {
                classes.push(Vec::new());
                classes.len() - 1
            });
            classes[class].push(node);
            assignments.insert(node, class);
        }
        Self {
            graph,
            classes,
            assignments,
        }
    }

    /// The graph this partition was computed from.
    pub fn graph(&self) -> &'g G {
        self.graph
    }

    /// All classes, ordered by first member.
    pub fn classes(&self) -> &[Vec<G::Node>] {
        &self.classes
    }

    /// The class containing `node`, or `None` for a node not in the graph.
    pub fn class_of(&self, node: G::Node) -> Option<&[G::Node]> {
        self.assignments
            .get(&node)
            .map(|&i| self.classes[i].as_slice())
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Node to class index.
    pub fn assignments(&self) -> &HashMap<G::Node, usize> {
        &self.assignments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petgraph::graph::{NodeIndex, UnGraph};

    #[test]
    fn test_labels_renumbered_in_order() {
        let mut g: UnGraph<(), ()> = UnGraph::default();
        let n: Vec<NodeIndex> = (0..4).map(|_| g.add_node(())).collect();
        let labels = [(n[0], 9), (n[1], 3), (n[2], 9), (n[3], 3)];
        let partition = VertexPartition::from_labels(&g, labels);

        assert_eq!(partition.class_count(), 2);
        assert_eq!(partition.classes()[0], vec![n[0], n[2]]);
        assert_eq!(partition.class_of(n[3]), Some(&[n[1], n[3]][..]));
        assert_eq!(partition.assignments()[&n[1]], 1);
        assert_eq!(partition.class_of(NodeIndex::new(42)), None);
    }
}
