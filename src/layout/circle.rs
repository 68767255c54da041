//! Circle layout: nodes evenly spaced around one ring, in enumeration order.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use super::LayoutAlgorithm;
use crate::error::{LayoutError, Result};
use crate::graph::GraphQuery;
use crate::model::{LayoutModel, PointModel};

/// Share of the smaller canvas dimension used as radius when none is given.
const DEFAULT_RADIUS_FACTOR: f64 = 0.45;

/// Circle layout parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CircleLayoutConfig {
    /// Fixed ring radius. `None` scales with the canvas.
    pub radius: Option<f64>,
}

impl CircleLayoutConfig {
    /// Reject a radius that is not positive and finite.
    pub fn validate(&self) -> Result<()> {
        match self.radius {
            Some(r) if !(r.is_finite() && r > 0.0) => Err(LayoutError::invalid(
                "radius",
                format!("must be positive, got {r}"),
            )),
            _ => Ok(()),
        }
    }
}

/// Places nodes evenly on one ring around the canvas center.
#[derive(Debug, Clone, Default)]
pub struct CircleLayout {
    config: CircleLayoutConfig,
}

impl CircleLayout {
    /// Create a circle layout, validating `config`.
    pub fn new(config: CircleLayoutConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CircleLayoutConfig {
        &self.config
    }

    fn radius_for(&self, width: f64, height: f64) -> f64 {
        self.config
            .radius
            .unwrap_or(DEFAULT_RADIUS_FACTOR * width.min(height))
    }
}

impl<G: GraphQuery, M: PointModel> LayoutAlgorithm<G, M> for CircleLayout {
    fn visit(&self, model: &mut LayoutModel<G, M>) -> Result<()> {
        let nodes = model.graph().nodes();
        if nodes.is_empty() {
            return Ok(());
        }

        let radius = self.radius_for(model.width(), model.height());
        let (cx, cy) = (model.width() / 2.0, model.height() / 2.0);
        let step = TAU / nodes.len() as f64;
        for (i, node) in nodes.into_iter().enumerate() {
            let angle = step * i as f64;
            model.set(node, cx + radius * angle.cos(), cy + radius * angle.sin());
        }

        tracing::debug!(radius, "circle layout complete");
        Ok(())
    }
}
