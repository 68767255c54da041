//! Static layout: every node keeps whatever the model already holds.
//!
//! Running it only materializes missing positions from the model's
//! initializer, so a caller can seed positions and render without moving
//! anything that was placed before.

use super::LayoutAlgorithm;
use crate::error::Result;
use crate::graph::GraphQuery;
use crate::model::{LayoutModel, PointModel};

/// Keeps stored positions and fills in the missing ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticLayout;

impl<G: GraphQuery, M: PointModel> LayoutAlgorithm<G, M> for StaticLayout {
    fn visit(&self, model: &mut LayoutModel<G, M>) -> Result<()> {
        for node in model.graph().nodes() {
            model.get(node);
        }
        Ok(())
    }
}
