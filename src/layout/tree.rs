//! Top-down tree layout for forests.
//!
//! Roots are the nodes with no incoming edges. Siblings are separated by
//! `dist_x`, depth levels by `dist_y`, and every parent is centered over
//! the span of its children.
//!
//! # Algorithm Overview
//!
//! 1. **Width pass:** for every node reachable from a root, compute the
//!    horizontal span its subtree needs:
//!    `span(leaf) = 0`, `span(n) = max(0, sum(span(c) + dist_x) - dist_x)`.
//! 2. **Placement pass:** walk each tree depth-first with a cursor. At each
//!    node the cursor drops one level, the node is written at the cursor,
//!    its children are centered inside the parent's span left to right, and
//!    the cursor climbs back up one level.
//!
//! Nodes reachable along several paths are placed once, under the first
//! parent that reaches them.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::LayoutAlgorithm;
use crate::error::{LayoutError, Result};
use crate::graph::{self, GraphQuery};
use crate::model::{LayoutModel, PointModel};

/// Default horizontal spacing between siblings.
pub const DEFAULT_DIST_X: i32 = 50;
/// Default vertical spacing between levels.
pub const DEFAULT_DIST_Y: i32 = 50;

/// Vertical position of the cursor before the first level is placed.
const TOP_MARGIN: i64 = 20;

/// Spacing configuration for [`TreeLayout`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TreeLayoutConfig {
    /// Horizontal spacing between adjacent siblings.
    pub dist_x: i32,
    /// Vertical spacing between adjacent levels.
    pub dist_y: i32,
}

impl Default for TreeLayoutConfig {
    fn default() -> Self {
        Self {
            dist_x: DEFAULT_DIST_X,
            dist_y: DEFAULT_DIST_Y,
        }
    }
}

impl TreeLayoutConfig {
    /// Both spacings must be positive.
    pub fn validate(&self) -> Result<()> {
        if self.dist_x < 1 {
            return Err(LayoutError::invalid("dist_x", "X distance must be positive"));
        }
        if self.dist_y < 1 {
            return Err(LayoutError::invalid("dist_y", "Y distance must be positive"));
        }
        Ok(())
    }
}

/// Where a placed node goes. The default writes it into the model.
pub(crate) type PlaceFn<'a, G, M> =
    dyn FnMut(&mut LayoutModel<G, M>, <G as GraphQuery>::Node, f64, f64) -> Result<()> + 'a;

/// Working state for one layout run.
struct TreeRun<N> {
    /// Subtree span per node.
    spans: HashMap<N, i64>,
    /// Nodes already placed in this run.
    done: HashSet<N>,
    /// Cursor `(x, y)`; tracks the most recently placed node.
    cursor: (i64, i64),
}

/// The tree layout algorithm.
#[derive(Debug, Clone)]
pub struct TreeLayout {
    config: TreeLayoutConfig,
}

impl TreeLayout {
    /// Create a tree layout, validating `config`.
    pub fn new(config: TreeLayoutConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Tree layout with 50 x 50 spacing.
    pub fn with_defaults() -> Self {
        Self {
            config: TreeLayoutConfig::default(),
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &TreeLayoutConfig {
        &self.config
    }

    /// Run both passes over every root, handing each placement to `place`.
    ///
    /// The model's bounds grow to fit every placed node before `place` is
    /// called for it.
    pub(crate) fn build_tree<G: GraphQuery, M: PointModel>(
        &self,
        model: &mut LayoutModel<G, M>,
        place: &mut PlaceFn<'_, G, M>,
    ) -> Result<()> {
        let roots = graph::roots(model.graph());
        if roots.is_empty() {
            return Err(LayoutError::NoRoots);
        }

        let mut run = TreeRun {
            spans: HashMap::new(),
            done: HashSet::new(),
            cursor: (0, TOP_MARGIN),
        };

        let mut on_path = HashSet::new();
        for &root in &roots {
            self.calculate_span(model.graph(), root, &mut run.spans, &mut on_path);
        }

        let dist_x = i64::from(self.config.dist_x);
        for &root in &roots {
            let span = run.spans.get(&root).copied().unwrap_or(0);
            run.cursor.0 += span / 2 + dist_x;
            let x = run.cursor.0;
            self.place_subtree(model, &mut run, root, x, place)?;
        }

        tracing::debug!(
            roots = roots.len(),
            placed = run.done.len(),
            width = model.width(),
            height = model.height(),
            "tree layout complete"
        );
        Ok(())
    }

    /// Width pass. Spans are memoized; an edge back onto the current path
    /// contributes nothing, so cycles below a root terminate.
    fn calculate_span<G: GraphQuery>(
        &self,
        graph: &G,
        node: G::Node,
        spans: &mut HashMap<G::Node, i64>,
        on_path: &mut HashSet<G::Node>,
    ) -> i64 {
        if let Some(&span) = spans.get(&node) {
            return span;
        }
        if !on_path.insert(node) {
            return 0;
        }

        let dist_x = i64::from(self.config.dist_x);
        let mut size = 0;
        for child in graph.successors(node) {
            size += self.calculate_span(graph, child, spans, on_path) + dist_x;
        }
        let size = (size - dist_x).max(0);

        on_path.remove(&node);
        spans.insert(node, size);
        size
    }

    /// Placement pass for the subtree under `node`, centered at `x`.
    fn place_subtree<G: GraphQuery, M: PointModel>(
        &self,
        model: &mut LayoutModel<G, M>,
        run: &mut TreeRun<G::Node>,
        node: G::Node,
        x: i64,
        place: &mut PlaceFn<'_, G, M>,
    ) -> Result<()> {
        if !run.done.insert(node) {
            return Ok(());
        }

        let dist_x = i64::from(self.config.dist_x);
        let dist_y = i64::from(self.config.dist_y);

        run.cursor = (x, run.cursor.1 + dist_y);
        self.set_current_position_for(model, node, run.cursor, place)?;

        let span = run.spans.get(&node).copied().unwrap_or(0);
        let mut last_x = x - span / 2;
        for child in model.graph().successors(node) {
            let child_span = run.spans.get(&child).copied().unwrap_or(0);
            let child_x = last_x + child_span / 2;
            self.place_subtree(model, run, child, child_x, place)?;
            last_x += child_span + dist_x;
        }

        run.cursor.1 -= dist_y;
        Ok(())
    }

    fn set_current_position_for<G: GraphQuery, M: PointModel>(
        &self,
        model: &mut LayoutModel<G, M>,
        node: G::Node,
        (x, y): (i64, i64),
        place: &mut PlaceFn<'_, G, M>,
    ) -> Result<()> {
        let (x, y) = (x as f64, y as f64);
        let dist_x = f64::from(self.config.dist_x);
        let dist_y = f64::from(self.config.dist_y);

        let mut width = model.width();
        let mut height = model.height();
        if x < 0.0 {
            width -= x;
        }
        if x >= width - dist_x {
            width = x + dist_x;
        }
        if y < 0.0 {
            height -= y;
        }
        if y >= height - dist_y {
            height = y + dist_y;
        }
        if model.width() < width || model.height() < height {
            model.set_size(width.max(model.width()), height.max(model.height()))?;
        }

        place(model, node, x, y)
    }
}

impl<G: GraphQuery, M: PointModel> LayoutAlgorithm<G, M> for TreeLayout {
    fn visit(&self, model: &mut LayoutModel<G, M>) -> Result<()> {
        self.build_tree(
            model,
            &mut |model: &mut LayoutModel<G, M>, node: G::Node, x: f64, y: f64| {
                model.set(node, x, y);
                Ok(())
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Point;
    use petgraph::stable_graph::{NodeIndex, StableDiGraph};

    struct Fixture {
        model: LayoutModel<StableDiGraph<&'static str, ()>>,
        ids: HashMap<&'static str, NodeIndex>,
    }

    fn fixture(width: f64, height: f64) -> Fixture {
        let mut g = StableDiGraph::default();
        let mut ids = HashMap::new();
        for name in ["root", "c1", "c2", "g11", "g12", "g21", "g22"] {
            ids.insert(name, g.add_node(name));
        }
        for (a, b) in [
            ("root", "c1"),
            ("root", "c2"),
            ("c1", "g11"),
            ("c1", "g12"),
            ("c2", "g21"),
            ("c2", "g22"),
        ] {
            g.add_edge(ids[a], ids[b], ());
        }
        let model = LayoutModel::new(g, width, height).unwrap().with_seed(3);
        Fixture { model, ids }
    }

    #[test]
    fn test_invalid_spacing_rejected() {
        assert!(TreeLayout::new(TreeLayoutConfig { dist_x: 0, dist_y: 50 }).is_err());
        assert!(TreeLayout::new(TreeLayoutConfig { dist_x: 50, dist_y: -3 }).is_err());
        assert!(TreeLayout::new(TreeLayoutConfig::default()).is_ok());
    }

    #[test]
    fn test_binary_tree_positions() {
        let Fixture { mut model, ids } = fixture(600.0, 600.0);
        TreeLayout::with_defaults().visit(&mut model).unwrap();

        let expected = [
            ("root", 125.0, 70.0),
            ("c1", 75.0, 120.0),
            ("g11", 50.0, 170.0),
            ("g12", 100.0, 170.0),
            ("c2", 175.0, 120.0),
            ("g21", 150.0, 170.0),
            ("g22", 200.0, 170.0),
        ];
        for (name, x, y) in expected {
            assert_eq!(model.position(ids[name]), Some(Point::new(x, y)), "{name}");
        }
        assert_eq!((model.width(), model.height()), (600.0, 600.0));
    }

    #[test]
    fn test_bounds_grow_to_fit() {
        let Fixture { mut model, .. } = fixture(100.0, 100.0);
        TreeLayout::with_defaults().visit(&mut model).unwrap();
        assert_eq!(model.width(), 250.0);
        assert_eq!(model.height(), 220.0);
    }

    #[test]
    fn test_parent_centered_over_children() {
        let Fixture { mut model, ids } = fixture(600.0, 600.0);
        TreeLayout::with_defaults().visit(&mut model).unwrap();
        let x = |n: &str| model.position(ids[n]).unwrap().x;
        assert_eq!(x("c1"), (x("g11") + x("g12")) / 2.0);
        assert_eq!(x("root"), (x("c1") + x("c2")) / 2.0);
    }

    #[test]
    fn test_deterministic_across_fresh_models() {
        let run = || {
            let Fixture { mut model, ids } = fixture(100.0, 100.0);
            TreeLayout::new(TreeLayoutConfig { dist_x: 30, dist_y: 70 })
                .unwrap()
                .visit(&mut model)
                .unwrap();
            let mut placed: Vec<_> = ids
                .iter()
                .map(|(name, &id)| (*name, model.position(id).unwrap()))
                .collect();
            placed.sort_by(|a, b| a.0.cmp(b.0));
            placed
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_same_depth_nodes_separated() {
        // Complete ternary tree of depth 3.
        let mut g: StableDiGraph<u32, ()> = StableDiGraph::default();
        let root = g.add_node(0);
        let mut levels = vec![vec![root]];
        for depth in 1..=3 {
            let mut next = Vec::new();
            for &parent in &levels[depth - 1] {
                for _ in 0..3 {
                    let child = g.add_node(depth as u32);
                    g.add_edge(parent, child, ());
                    next.push(child);
                }
            }
            levels.push(next);
        }
        let mut model = LayoutModel::new(g, 100.0, 100.0).unwrap();
        let layout = TreeLayout::new(TreeLayoutConfig { dist_x: 40, dist_y: 60 }).unwrap();
        layout.visit(&mut model).unwrap();

        for level in &levels[1..] {
            let mut xs: Vec<f64> = level.iter().map(|&n| model.position(n).unwrap().x).collect();
            let y = model.position(level[0]).unwrap().y;
            assert!(level.iter().all(|&n| model.position(n).unwrap().y == y));
            xs.sort_by(|a, b| a.partial_cmp(b).unwrap());
            for pair in xs.windows(2) {
                assert!(pair[1] - pair[0] >= 40.0, "overlap at level: {xs:?}");
            }
        }
    }

    #[test]
    fn test_leaf_root_centered_on_cursor() {
        let mut g: StableDiGraph<(), ()> = StableDiGraph::default();
        let lone = g.add_node(());
        let mut model = LayoutModel::new(g, 500.0, 500.0).unwrap();
        TreeLayout::with_defaults().visit(&mut model).unwrap();
        // cursor starts at (0, 20): x += 0 / 2 + 50, y += 50
        assert_eq!(model.position(lone), Some(Point::new(50.0, 70.0)));
    }

    #[test]
    fn test_forest_roots_left_to_right() {
        let mut g: StableDiGraph<(), ()> = StableDiGraph::default();
        let a = g.add_node(());
        let b = g.add_node(());
        let a1 = g.add_node(());
        let a2 = g.add_node(());
        g.add_edge(a, a1, ());
        g.add_edge(a, a2, ());
        let mut model = LayoutModel::new(g, 500.0, 500.0).unwrap();
        TreeLayout::with_defaults().visit(&mut model).unwrap();

        let xa = model.position(a).unwrap().x;
        let xb = model.position(b).unwrap().x;
        assert!(xb > xa);
        assert_eq!(model.position(b).unwrap().y, model.position(a).unwrap().y);
    }

    #[test]
    fn test_no_roots_is_an_error() {
        let mut g: StableDiGraph<(), ()> = StableDiGraph::default();
        let a = g.add_node(());
        let b = g.add_node(());
        g.add_edge(a, b, ());
        g.add_edge(b, a, ());
        let mut model = LayoutModel::new(g, 100.0, 100.0).unwrap();
        assert!(matches!(
            TreeLayout::with_defaults().visit(&mut model),
            Err(LayoutError::NoRoots)
        ));
    }

    #[test]
    fn test_shared_descendant_placed_once() {
        let mut g: StableDiGraph<(), ()> = StableDiGraph::default();
        let a = g.add_node(());
        let b = g.add_node(());
        let shared = g.add_node(());
        g.add_edge(a, shared, ());
        g.add_edge(b, shared, ());
        let mut model = LayoutModel::new(g, 500.0, 500.0).unwrap();
        TreeLayout::with_defaults().visit(&mut model).unwrap();

        // Placed under `a`, directly below it.
        let pa = model.position(a).unwrap();
        let ps = model.position(shared).unwrap();
        assert_eq!(ps.x, pa.x);
        assert_eq!(ps.y, pa.y + 50.0);
    }

    #[test]
    fn test_cycle_below_root_terminates() {
        let mut g: StableDiGraph<(), ()> = StableDiGraph::default();
        let r = g.add_node(());
        let a = g.add_node(());
        let b = g.add_node(());
        g.add_edge(r, a, ());
        g.add_edge(a, b, ());
        g.add_edge(b, a, ());
        let mut model = LayoutModel::new(g, 100.0, 100.0).unwrap();
        TreeLayout::with_defaults().visit(&mut model).unwrap();
        assert_eq!(model.locations().count(), 3);
    }

    #[test]
    fn test_locked_node_keeps_position() {
        let Fixture { mut model, ids } = fixture(600.0, 600.0);
        model.set(ids["c2"], 1.0, 2.0);
        model.lock(ids["c2"], true);
        TreeLayout::with_defaults().visit(&mut model).unwrap();
        assert_eq!(model.position(ids["c2"]), Some(Point::new(1.0, 2.0)));
        assert_eq!(model.position(ids["g21"]), Some(Point::new(150.0, 170.0)));
    }
}
