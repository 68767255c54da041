//! Fruchterman–Reingold force-directed layout.
//!
//! Every pair of nodes repels, every edge attracts, and the step a node may
//! take in one iteration is capped by a temperature that cools linearly to
//! zero over the iteration budget. Starting positions come from the model
//! (its initializer fills any gaps), so a seeded model gives a reproducible
//! run.

use std::collections::HashMap;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::LayoutAlgorithm;
use crate::error::{LayoutError, Result};
use crate::graph::GraphQuery;
use crate::model::{LayoutModel, PointModel};

/// Lower bound on distances so coincident nodes don't divide by zero.
const MIN_DISTANCE: f64 = 1e-6;

/// Fraction of each dimension kept clear along the canvas edges.
const BORDER_FACTOR: f64 = 1.0 / 50.0;

/// Fruchterman–Reingold parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FrLayoutConfig {
    /// Iteration budget; the temperature reaches zero at the last one.
    pub max_iterations: usize,
    /// Scales the optimal edge length used for attraction.
    pub attraction_multiplier: f64,
    /// Scales the optimal edge length used for repulsion.
    pub repulsion_multiplier: f64,
    /// Stop once an iteration moves all nodes by less than this in total.
    pub epsilon: f64,
    /// Seed for the jitter applied when a node is pushed into the border.
    pub seed: Option<u64>,
}

impl Default for FrLayoutConfig {
    fn default() -> Self {
        Self {
            max_iterations: 700,
            attraction_multiplier: 0.75,
            repulsion_multiplier: 0.75,
            epsilon: 0.1,
            seed: None,
        }
    }
}

impl FrLayoutConfig {
    /// Check that the budget and multipliers are usable.
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(LayoutError::invalid("max_iterations", "must be at least 1"));
        }
        for (what, value) in [
            ("attraction_multiplier", self.attraction_multiplier),
            ("repulsion_multiplier", self.repulsion_multiplier),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(LayoutError::invalid(what, format!("must be positive, got {value}")));
            }
        }
        if !(self.epsilon.is_finite() && self.epsilon >= 0.0) {
            return Err(LayoutError::invalid(
                "epsilon",
                format!("must be non-negative, got {}", self.epsilon),
            ));
        }
        Ok(())
    }
}

/// Force-directed layout over all nodes of the model.
#[derive(Debug, Clone, Default)]
pub struct FrLayout {
    config: FrLayoutConfig,
}

impl FrLayout {
    /// Create a force layout, validating `config`.
    pub fn new(config: FrLayoutConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Current configuration.
    pub fn config(&self) -> &FrLayoutConfig {
        &self.config
    }

    /// Run the simulation and write the result into `model`.
    ///
    /// Returns the number of iterations performed.
    pub fn run<G: GraphQuery, M: PointModel>(
        &self,
        model: &mut LayoutModel<G, M>,
    ) -> Result<usize> {
        let nodes = model.graph().nodes();
        let n = nodes.len();
        if n == 0 {
            return Ok(0);
        }

        let index: HashMap<G::Node, usize> =
            nodes.iter().enumerate().map(|(i, &v)| (v, i)).collect();
        let directed = model.graph().is_directed();
        let mut edges = Vec::new();
        for (i, &v) in nodes.iter().enumerate() {
            for w in model.graph().successors(v) {
                if let Some(&j) = index.get(&w) {
                    // Undirected neighbourhoods list each edge from both ends.
                    if i != j && (directed || i < j) {
                        edges.push((i, j));
                    }
                }
            }
        }

        let frozen: Vec<bool> = nodes.iter().map(|&v| model.is_frozen(v)).collect();
        let mut pos: Vec<(f64, f64)> = nodes
            .iter()
            .map(|&v| {
                let p = model.get(v);
                (model.point_model().x(&p), model.point_model().y(&p))
            })
            .collect();

        let (width, height) = (model.width(), model.height());
        let force_constant = (width * height / n as f64).sqrt();
        let attraction = self.config.attraction_multiplier * force_constant;
        let repulsion = self.config.repulsion_multiplier * force_constant;
        let initial_temperature = width / 10.0;
        let mut rng = match self.config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let max_iterations = self.config.max_iterations;
        let mut temperature = initial_temperature;
        let mut iterations = 0;
        let mut disp = vec![(0.0f64, 0.0f64); n];

        while iterations < max_iterations {
            disp.iter_mut().for_each(|d| *d = (0.0, 0.0));

            for i in 0..n {
                for j in (i + 1)..n {
                    let (dx, dy) = (pos[i].0 - pos[j].0, pos[i].1 - pos[j].1);
                    let len = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
                    let force = repulsion * repulsion / len;
                    let (fx, fy) = (dx / len * force, dy / len * force);
                    disp[i].0 += fx;
                    disp[i].1 += fy;
                    disp[j].0 -= fx;
                    disp[j].1 -= fy;
                }
            }

            for &(i, j) in &edges {
                let (dx, dy) = (pos[i].0 - pos[j].0, pos[i].1 - pos[j].1);
                let len = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
                let force = len * len / attraction;
                let (fx, fy) = (dx / len * force, dy / len * force);
                disp[i].0 -= fx;
                disp[i].1 -= fy;
                disp[j].0 += fx;
                disp[j].1 += fy;
            }

            let mut moved = 0.0;
            for i in 0..n {
                if frozen[i] {
                    continue;
                }
                let (dx, dy) = disp[i];
                let len = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
                let step = len.min(temperature);
                let x = clamp_with_jitter(pos[i].0 + dx / len * step, width, &mut rng);
                let y = clamp_with_jitter(pos[i].1 + dy / len * step, height, &mut rng);
                moved += ((x - pos[i].0).powi(2) + (y - pos[i].1).powi(2)).sqrt();
                pos[i] = (x, y);
            }

            iterations += 1;
            temperature = initial_temperature * (1.0 - iterations as f64 / max_iterations as f64);
            tracing::trace!(iterations, temperature, moved, "fr iteration");
            if moved < self.config.epsilon {
                break;
            }
        }

        for (&v, &(x, y)) in nodes.iter().zip(&pos) {
            model.set(v, x, y);
        }
        tracing::debug!(nodes = n, iterations, temperature, "fr layout complete");
        Ok(iterations)
    }
}

/// Keep a coordinate inside `[border, extent - border]`, nudging pinned
/// values a random distance back into the canvas so nodes don't pile up
/// on the edge.
fn clamp_with_jitter(value: f64, extent: f64, rng: &mut ChaCha8Rng) -> f64 {
    let border = extent * BORDER_FACTOR;
    if value < border {
        border + rng.gen_range(0.0..1.0) * border * 2.0
    } else if value > extent - border {
        extent - border - rng.gen_range(0.0..1.0) * border * 2.0
    } else {
        value
    }
}

impl<G: GraphQuery, M: PointModel> LayoutAlgorithm<G, M> for FrLayout {
    fn visit(&self, model: &mut LayoutModel<G, M>) -> Result<()> {
        self.run(model).map(|_| ())
    }
}
