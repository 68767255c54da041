//! Policies that supply a node's position the first time it is read.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::point::PointModel;

/// Seed of the initializer a [`LayoutModel`](super::LayoutModel) starts with.
pub const DEFAULT_SEED: u64 = 0x7e11;

/// Supplies the starting position of a node with no stored location.
pub trait Initializer<N, M: PointModel> {
    fn initial(&mut self, node: &N, pm: &M, width: f64, height: f64) -> M::Point;
}

/// Uniformly random positions within `[0, width) x [0, height)`.
///
/// Seeded instances produce the same sequence for the same access order.
#[derive(Debug, Clone)]
pub struct RandomLocations {
    rng: ChaCha8Rng,
}

impl RandomLocations {
    /// Seeded generator.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomLocations {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl<N, M: PointModel> Initializer<N, M> for RandomLocations {
    fn initial(&mut self, _node: &N, pm: &M, width: f64, height: f64) -> M::Point {
        let x = self.rng.gen_range(0.0..1.0) * width;
        let y = self.rng.gen_range(0.0..1.0) * height;
        pm.new_point(x, y)
    }
}

/// Every node starts at the same coordinate.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation {
    pub x: f64,
    pub y: f64,
}

impl<N, M: PointModel> Initializer<N, M> for FixedLocation {
    fn initial(&mut self, _node: &N, pm: &M, _width: f64, _height: f64) -> M::Point {
        pm.new_point(self.x, self.y)
    }
}
