//! LayoutModel - the coordinate store layout algorithms write into.
//!
//! The model is bound to one graph and one canvas size. It keeps at most
//! one position per node, materializing missing positions lazily from an
//! [`Initializer`]. Locked nodes are never overwritten; rendering code and
//! interactive dragging go through the same `set` path, so the lock is the
//! single coordination point between a running layout and the user.

use std::collections::{HashMap, HashSet};

use super::initializer::{Initializer, RandomLocations};
use super::point::{DefaultPointModel, PointModel};
use crate::error::{LayoutError, Result};
use crate::graph::GraphQuery;

/// Per-node coordinate store with bounds and lock flags.
pub struct LayoutModel<G: GraphQuery, M: PointModel = DefaultPointModel> {
    /// The graph whose nodes are being positioned.
    graph: G,

    /// Strategy for creating and mutating points.
    point_model: M,

    /// Materialized positions.
    locations: HashMap<G::Node, M::Point>,

    /// Nodes exempt from layout writes.
    locked: HashSet<G::Node>,

    /// When set, every write is ignored.
    all_locked: bool,

    width: f64,
    height: f64,

    /// Supplies positions for nodes read before they were ever set.
    initializer: Box<dyn Initializer<G::Node, M>>,
}

fn check_size(width: f64, height: f64) -> Result<()> {
    if !(width.is_finite() && width > 0.0) {
        return Err(LayoutError::invalid("width", format!("must be positive, got {width}")));
    }
    if !(height.is_finite() && height > 0.0) {
        return Err(LayoutError::invalid("height", format!("must be positive, got {height}")));
    }
    Ok(())
}

impl<G: GraphQuery> LayoutModel<G, DefaultPointModel> {
    /// Create a model over `graph` with the given canvas size.
    ///
    /// Unset positions are drawn uniformly at random within the bounds,
    /// from a fixed seed unless [`with_seed`](Self::with_seed) overrides it.
    pub fn new(graph: G, width: f64, height: f64) -> Result<Self> {
        Self::with_point_model(graph, DefaultPointModel, width, height)
    }
}

impl<G: GraphQuery, M: PointModel> LayoutModel<G, M> {
    /// Create a model that stores points of `point_model`'s representation.
    pub fn with_point_model(graph: G, point_model: M, width: f64, height: f64) -> Result<Self> {
        check_size(width, height)?;
        Ok(Self {
            graph,
            point_model,
            locations: HashMap::new(),
            locked: HashSet::new(),
            all_locked: false,
            width,
            height,
            initializer: Box::new(RandomLocations::default()),
        })
    }

    /// Replace the policy used for nodes with no stored position.
    pub fn with_initializer(mut self, initializer: impl Initializer<G::Node, M> + 'static) -> Self {
        self.initializer = Box::new(initializer);
        self
    }

    /// Shorthand for a seeded [`RandomLocations`] initializer.
    pub fn with_seed(self, seed: u64) -> Self {
        self.with_initializer(RandomLocations::new(seed))
    }

    // =========================================================================
    // Graph and bounds
    // =========================================================================

    /// The graph being laid out.
    pub fn graph(&self) -> &G {
        &self.graph
    }

    /// Mutable access for callers that grow the graph between layout runs.
    /// Call [`prune`](Self::prune) after removing nodes.
    pub fn graph_mut(&mut self) -> &mut G {
        &mut self.graph
    }

    /// The strategy used to build and read points.
    pub fn point_model(&self) -> &M {
        &self.point_model
    }

    /// Canvas width.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Canvas height.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Resize the canvas.
    ///
    /// The bounds never shrink below [`extent`](Self::extent); smaller
    /// requests are clamped.
    pub fn set_size(&mut self, width: f64, height: f64) -> Result<()> {
        check_size(width, height)?;
        let (max_x, max_y) = self.extent();
        let new_width = width.max(max_x);
        let new_height = height.max(max_y);
        if new_width > width || new_height > height {
            tracing::warn!(
                requested_width = width,
                requested_height = height,
                new_width,
                new_height,
                "layout size clamped to placed nodes"
            );
        }
        self.width = new_width;
        self.height = new_height;
        Ok(())
    }

    /// Largest x and y over all stored positions (never negative).
    pub fn extent(&self) -> (f64, f64) {
        self.locations.values().fold((0.0f64, 0.0f64), |(mx, my), p| {
            (mx.max(self.point_model.x(p)), my.max(self.point_model.y(p)))
        })
    }

    /// Midpoint of the canvas.
    pub fn center(&self) -> M::Point {
        self.point_model.new_point(self.width / 2.0, self.height / 2.0)
    }

    // =========================================================================
    // Positions
    // =========================================================================

    /// Current position of `node`, initializing and storing it on first access.
    ///
    /// Nodes not in the graph get an initializer position that is not stored.
    pub fn get(&mut self, node: G::Node) -> M::Point {
        if let Some(p) = self.locations.get(&node) {
            return *p;
        }
        let p = self
            .initializer
            .initial(&node, &self.point_model, self.width, self.height);
        if self.graph.contains(node) {
            self.locations.insert(node, p);
        }
        p
    }

    /// Stored position of `node`, without initializing it.
    pub fn position(&self, node: G::Node) -> Option<M::Point> {
        self.locations.get(&node).copied()
    }

    /// Move `node` to `(x, y)`.
    ///
    /// Returns `false` and leaves the store untouched when the node is
    /// locked, the whole model is locked, or the node is not in the graph.
    pub fn set(&mut self, node: G::Node, x: f64, y: f64) -> bool {
        if self.all_locked || self.locked.contains(&node) || !self.graph.contains(node) {
            tracing::trace!(?node, "ignored write to locked or unknown node");
            return false;
        }
        let pm = &self.point_model;
        self.locations
            .entry(node)
            .and_modify(|p| pm.set_location(p, x, y))
            .or_insert_with(|| pm.new_point(x, y));
        true
    }

    /// [`set`](Self::set) taking a point.
    pub fn set_point(&mut self, node: G::Node, p: &M::Point) -> bool {
        let (x, y) = (self.point_model.x(p), self.point_model.y(p));
        self.set(node, x, y)
    }

    /// All stored positions.
    pub fn locations(&self) -> impl Iterator<Item = (G::Node, M::Point)> + '_ {
        self.locations.iter().map(|(&n, &p)| (n, p))
    }

    /// Forget every stored position. Locks are kept.
    pub fn reset(&mut self) {
        self.locations.clear();
    }

    /// Drop positions and locks of nodes no longer in the graph.
    pub fn prune(&mut self) {
        let graph = &self.graph;
        self.locations.retain(|&n, _| graph.contains(n));
        self.locked.retain(|&n| graph.contains(n));
    }

    // =========================================================================
    // Locks
    // =========================================================================

    /// Lock or unlock a single node.
    pub fn lock(&mut self, node: G::Node, locked: bool) {
        if locked {
            self.locked.insert(node);
        } else {
            self.locked.remove(&node);
        }
    }

    /// Whether `node` itself is locked. See also [`is_all_locked`](Self::is_all_locked).
    pub fn is_locked(&self, node: G::Node) -> bool {
        self.locked.contains(&node)
    }

    /// Ignore every write while set, regardless of per-node locks.
    pub fn lock_all(&mut self, locked: bool) {
        self.all_locked = locked;
    }

    pub fn is_all_locked(&self) -> bool {
        self.all_locked
    }

    /// Whether a write to `node` would be ignored.
    pub fn is_frozen(&self, node: G::Node) -> bool {
        self.all_locked || self.locked.contains(&node)
    }
}
