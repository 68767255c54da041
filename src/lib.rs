//! Trellis Layout - graph layout engine
//!
//! Assigns 2-D coordinates to graph nodes from connectivity alone. The crate
//! is usable natively as a library and compiles to WebAssembly with a
//! JavaScript-friendly facade ([`LayoutSession`]).
//!
//! # Architecture
//!
//! - `graph`: the read-only [`GraphQuery`] surface over petgraph, plus tree utilities
//! - `model`: points, polar conversion and the [`LayoutModel`] coordinate store
//! - `layout`: tree, radial tree, circle, Fruchterman–Reingold and static layouts
//! - `blockmodel`: structural equivalence partitioning
//! - `generators`: Erdős–Rényi random graphs

use js_sys::Float32Array;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences, NodeIndexable};
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

pub mod blockmodel;
pub mod error;
pub mod generators;
pub mod graph;
pub mod layout;
pub mod model;

pub use blockmodel::{StructurallyEquivalent, VertexPartition};
pub use error::{LayoutError, Result};
pub use generators::ErdosRenyiGenerator;
pub use graph::GraphQuery;
pub use layout::{LayoutAlgorithm, LayoutKind, create_layout};
pub use model::{LayoutModel, Point, PointModel, PolarPoint};

/// Initialize the WASM module: panic messages and `tracing` output go to
/// the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        tracing_wasm::set_as_global_default();
    }
}

/// Node weights are the ids handed out to JavaScript.
pub type SessionGraph = StableDiGraph<u32, ()>;

type JsResult<T> = std::result::Result<T, JsError>;

/// A directed graph bound to a layout model, exposed to JavaScript.
///
/// Node ids are dense `u32`s in creation order. Layout configs are plain
/// objects with camelCase keys; `undefined` or `null` selects the defaults.
#[wasm_bindgen]
pub struct LayoutSession {
    model: LayoutModel<SessionGraph>,
}

#[wasm_bindgen]
impl LayoutSession {
    /// Create an empty session with the given canvas size.
    ///
    /// Unplaced nodes start at uniformly random positions drawn from `seed`,
    /// or from a fixed default seed when it is omitted.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64, seed: Option<u32>) -> JsResult<LayoutSession> {
        Ok(Self::try_new(SessionGraph::default(), width, height, seed)?)
    }

    /// A session over an Erdős–Rényi G(n, p) graph. Each undirected edge
    /// becomes one edge from the lower to the higher id.
    #[wasm_bindgen(js_name = erdosRenyi)]
    pub fn erdos_renyi(
        n: u32,
        p: f64,
        seed: u32,
        width: f64,
        height: f64,
    ) -> JsResult<LayoutSession> {
        Ok(Self::random(n, p, seed, width, height)?)
    }

    // =========================================================================
    // Graph
    // =========================================================================

    /// Add a node and return its id.
    #[wasm_bindgen(js_name = addNode)]
    pub fn add_node(&mut self) -> u32 {
        let graph = self.model.graph_mut();
        let id = graph.node_bound() as u32;
        graph.add_node(id).index() as u32
    }

    /// Add a directed edge. Returns the edge id.
    #[wasm_bindgen(js_name = addEdge)]
    pub fn add_edge(&mut self, source: u32, target: u32) -> JsResult<u32> {
        let (s, t) = (self.node(source)?, self.node(target)?);
        Ok(self.model.graph_mut().add_edge(s, t, ()).index() as u32)
    }

    #[wasm_bindgen(js_name = nodeCount)]
    pub fn node_count(&self) -> u32 {
        self.model.graph().node_count() as u32
    }

    #[wasm_bindgen(js_name = edgeCount)]
    pub fn edge_count(&self) -> u32 {
        self.model.graph().edge_count() as u32
    }

    // =========================================================================
    // Bounds and positions
    // =========================================================================

    /// Resize the canvas. Never shrinks below the placed nodes.
    #[wasm_bindgen(js_name = setSize)]
    pub fn set_size(&mut self, width: f64, height: f64) -> JsResult<()> {
        Ok(self.model.set_size(width, height)?)
    }

    pub fn width(&self) -> f64 {
        self.model.width()
    }

    pub fn height(&self) -> f64 {
        self.model.height()
    }

    /// Move a node. Returns false when the node is locked.
    #[wasm_bindgen(js_name = setPosition)]
    pub fn set_position(&mut self, node_id: u32, x: f64, y: f64) -> JsResult<bool> {
        let node = self.node(node_id)?;
        Ok(self.model.set(node, x, y))
    }

    /// X coordinate of a node, initializing it if unplaced.
    #[wasm_bindgen(js_name = getX)]
    pub fn get_x(&mut self, node_id: u32) -> JsResult<f64> {
        Ok(self.position(node_id)?.x)
    }

    /// Y coordinate of a node, initializing it if unplaced.
    #[wasm_bindgen(js_name = getY)]
    pub fn get_y(&mut self, node_id: u32) -> JsResult<f64> {
        Ok(self.position(node_id)?.y)
    }

    /// All positions as `[x0, y0, x1, y1, ...]` in id order.
    pub fn positions(&mut self) -> Float32Array {
        Float32Array::from(&self.interleaved_positions()[..])
    }

    // =========================================================================
    // Locks
    // =========================================================================

    /// Exempt a node from layout writes, or release it.
    pub fn lock(&mut self, node_id: u32, locked: bool) -> JsResult<()> {
        let node = self.node(node_id)?;
        self.model.lock(node, locked);
        Ok(())
    }

    #[wasm_bindgen(js_name = isLocked)]
    pub fn is_locked(&self, node_id: u32) -> bool {
        self.model.is_locked(NodeIndex::new(node_id as usize))
    }

    /// Freeze or release every node at once.
    #[wasm_bindgen(js_name = lockAll)]
    pub fn lock_all(&mut self, locked: bool) {
        self.model.lock_all(locked);
    }

    // =========================================================================
    // Layouts
    // =========================================================================

    /// Top-down tree layout. Config: `{ distX, distY }`.
    #[wasm_bindgen(js_name = applyTreeLayout)]
    pub fn apply_tree_layout(&mut self, config: JsValue) -> JsResult<()> {
        Ok(self.apply(LayoutKind::Tree(parse_config(config)?))?)
    }

    /// Radial tree layout. Config: `{ distX, distY }`.
    #[wasm_bindgen(js_name = applyRadialTreeLayout)]
    pub fn apply_radial_tree_layout(&mut self, config: JsValue) -> JsResult<()> {
        Ok(self.apply(LayoutKind::RadialTree(parse_config(config)?))?)
    }

    /// Circle layout. Config: `{ radius }`.
    #[wasm_bindgen(js_name = applyCircleLayout)]
    pub fn apply_circle_layout(&mut self, config: JsValue) -> JsResult<()> {
        Ok(self.apply(LayoutKind::Circle(parse_config(config)?))?)
    }

    /// Fruchterman–Reingold layout. Config keys match [`FrLayoutConfig`](layout::FrLayoutConfig).
    #[wasm_bindgen(js_name = applyFrLayout)]
    pub fn apply_fr_layout(&mut self, config: JsValue) -> JsResult<()> {
        Ok(self.apply(LayoutKind::Fr(parse_config(config)?))?)
    }

    /// Give every unplaced node its initial position.
    #[wasm_bindgen(js_name = applyStaticLayout)]
    pub fn apply_static_layout(&mut self) -> JsResult<()> {
        Ok(self.apply(LayoutKind::Static)?)
    }

    // =========================================================================
    // Analysis and queries
    // =========================================================================

    /// Structural equivalence class index for every node, in id order.
    #[wasm_bindgen(js_name = structuralEquivalence)]
    pub fn structural_equivalence(&self) -> Vec<u32> {
        self.equivalence_classes()
    }
}

/// Native entry points used by the JavaScript methods above.
impl LayoutSession {
    /// Native constructor behind `new`.
    pub fn try_new(
        graph: SessionGraph,
        width: f64,
        height: f64,
        seed: Option<u32>,
    ) -> Result<Self> {
        let model = LayoutModel::new(graph, width, height)?;
        let model = match seed {
            Some(seed) => model.with_seed(u64::from(seed)),
            None => model,
        };
        Ok(Self { model })
    }

    /// Native constructor behind `erdosRenyi`.
    pub fn random(n: u32, p: f64, seed: u32, width: f64, height: f64) -> Result<Self> {
        let mut next = 0u32;
        let mut generator = ErdosRenyiGenerator::new(
            || {
                next += 1;
                next - 1
            },
            n as usize,
            p,
        )?;
        generator.set_seed(u64::from(seed));
        let undirected = generator.generate();

        let mut graph =
            SessionGraph::with_capacity(undirected.node_count(), undirected.edge_count());
        for i in undirected.node_indices() {
            graph.add_node(undirected[i]);
        }
        for e in undirected.edge_references() {
            let (a, b) = (e.source(), e.target());
            let (lo, hi) = if a < b { (a, b) } else { (b, a) };
            graph.add_edge(lo, hi, ());
        }
        Self::try_new(graph, width, height, Some(seed))
    }

    pub fn model(&self) -> &LayoutModel<SessionGraph> {
        &self.model
    }

    /// Run `kind` against the session's model.
    pub fn apply(&mut self, kind: LayoutKind) -> Result<()> {
        tracing::debug!(?kind, nodes = self.model.graph().node_count(), "applying layout");
        create_layout(kind)?.visit(&mut self.model)
    }

    /// Positions as `[x0, y0, x1, y1, ...]`, initializing unplaced nodes.
    pub fn interleaved_positions(&mut self) -> Vec<f32> {
        let nodes = self.model.graph().nodes();
        let mut out = Vec::with_capacity(nodes.len() * 2);
        for node in nodes {
            let p = self.model.get(node);
            out.push(p.x as f32);
            out.push(p.y as f32);
        }
        out
    }

    /// Class index per node id, in id order.
    pub fn equivalence_classes(&self) -> Vec<u32> {
        let graph = self.model.graph();
        let partition = StructurallyEquivalent::new().partition(graph);
        graph
            .nodes()
            .into_iter()
            .map(|n| partition.assignments().get(&n).map_or(u32::MAX, |&c| c as u32))
            .collect()
    }

    fn node(&self, id: u32) -> Result<NodeIndex> {
        let node = NodeIndex::new(id as usize);
        if self.model.graph().contains(node) {
            Ok(node)
        } else {
            Err(LayoutError::UnknownNode(id))
        }
    }

    fn position(&mut self, id: u32) -> Result<Point> {
        let node = self.node(id)?;
        Ok(self.model.get(node))
    }
}

fn parse_config<T: DeserializeOwned + Default>(config: JsValue) -> Result<T> {
    if config.is_undefined() || config.is_null() {
        return Ok(T::default());
    }
    serde_wasm_bindgen::from_value(config).map_err(|e| LayoutError::Config(e.to_string()))
}
