//! Radial variant of the tree layout.
//!
//! The tree placement runs into a scratch map; x is then read as an angle
//! around the canvas center and depth as a radius. Every node at a given
//! depth lands on the same ring.

use std::collections::HashMap;
use std::f64::consts::TAU;

use super::LayoutAlgorithm;
use super::tree::{TreeLayout, TreeLayoutConfig};
use crate::error::Result;
use crate::graph::GraphQuery;
use crate::model::{LayoutModel, PointModel, PolarPoint, polar_to_cartesian};

/// Radial layouts take the same spacing knobs as the flat tree.
pub type RadialTreeLayoutConfig = TreeLayoutConfig;

/// Tree layout bent around the canvas center, one ring per depth.
#[derive(Debug, Clone)]
pub struct RadialTreeLayout {
    tree: TreeLayout,
}

impl RadialTreeLayout {
    /// Create a radial layout, validating `config`.
    pub fn new(config: RadialTreeLayoutConfig) -> Result<Self> {
        Ok(Self {
            tree: TreeLayout::new(config)?,
        })
    }

    /// Radial layout with the default spacing.
    pub fn with_defaults() -> Self {
        Self {
            tree: TreeLayout::with_defaults(),
        }
    }

    pub fn config(&self) -> &RadialTreeLayoutConfig {
        self.tree.config()
    }

    /// Polar position of every node relative to the canvas center.
    ///
    /// Grows the model bounds exactly as the tree layout does, but writes no
    /// positions.
    pub fn polar_locations<G: GraphQuery, M: PointModel>(
        &self,
        model: &mut LayoutModel<G, M>,
    ) -> Result<HashMap<G::Node, PolarPoint>> {
        let mut flat: HashMap<G::Node, (f64, f64)> = HashMap::new();
        self.tree.build_tree(
            model,
            &mut |_: &mut LayoutModel<G, M>, node: G::Node, x: f64, y: f64| {
                flat.insert(node, (x, y));
                Ok(())
            },
        )?;

        let (max_x, max_y) = flat
            .values()
            .fold((0.0f64, 0.0f64), |(mx, my), &(x, y)| (mx.max(x), my.max(y)));
        let max_x = max_x.max(model.width());
        let theta_step = TAU / max_x;
        let delta_radius = model.width() / 2.0 / max_y;
        let dist_y = f64::from(self.tree.config().dist_y);

        Ok(flat
            .into_iter()
            .map(|(node, (x, y))| {
                (node, PolarPoint::new(x * theta_step, (y - dist_y) * delta_radius))
            })
            .collect())
    }
}

impl<G: GraphQuery, M: PointModel> LayoutAlgorithm<G, M> for RadialTreeLayout {
    fn visit(&self, model: &mut LayoutModel<G, M>) -> Result<()> {
        let polar = self.polar_locations(model)?;

        let pm = model.point_model();
        let center = model.center();
        let (cx, cy) = (pm.x(&center), pm.y(&center));
        let placements: Vec<_> = polar
            .iter()
            .map(|(&node, p)| {
                let offset = polar_to_cartesian(pm, p);
                (node, cx + pm.x(&offset), cy + pm.y(&offset))
            })
            .collect();

        for (node, x, y) in placements {
            model.set(node, x, y);
        }
        tracing::debug!(nodes = polar.len(), "radial tree layout complete");
        Ok(())
    }
}
