//! Layout algorithms.
//!
//! Every algorithm reads the graph held by a [`LayoutModel`] and writes
//! positions back through [`LayoutModel::set`], so per-node locks are
//! honored uniformly. Algorithms keep no state between runs; configuration
//! is fixed at construction.

pub mod circle;
pub mod fr;
pub mod radial_tree;
pub mod static_layout;
pub mod tree;

pub use circle::{CircleLayout, CircleLayoutConfig};
pub use fr::{FrLayout, FrLayoutConfig};
pub use radial_tree::{RadialTreeLayout, RadialTreeLayoutConfig};
pub use static_layout::StaticLayout;
pub use tree::{TreeLayout, TreeLayoutConfig};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::graph::GraphQuery;
use crate::model::{LayoutModel, PointModel};

/// A strategy that positions every node of a model's graph.
pub trait LayoutAlgorithm<G: GraphQuery, M: PointModel> {
    /// Compute positions and write them into `model`.
    fn visit(&self, model: &mut LayoutModel<G, M>) -> Result<()>;
}

/// Selects an algorithm together with its configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum LayoutKind {
    Tree(TreeLayoutConfig),
    RadialTree(RadialTreeLayoutConfig),
    Circle(CircleLayoutConfig),
    Fr(FrLayoutConfig),
    Static,
}

/// Build the algorithm described by `kind`, validating its configuration.
pub fn create_layout<G: GraphQuery, M: PointModel>(
    kind: LayoutKind,
) -> Result<Box<dyn LayoutAlgorithm<G, M>>> {
    Ok(match kind {
        LayoutKind::Tree(config) => Box::new(TreeLayout::new(config)?),
        LayoutKind::RadialTree(config) => Box::new(RadialTreeLayout::new(config)?),
        LayoutKind::Circle(config) => Box::new(CircleLayout::new(config)?),
        LayoutKind::Fr(config) => Box::new(FrLayout::new(config)?),
        LayoutKind::Static => Box::new(StaticLayout),
    })
}
