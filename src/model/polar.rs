//! Polar coordinates and conversions to and from Cartesian points.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::point::PointModel;

/// Distance and angle from the origin.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PolarPoint {
    /// Angle in radians.
    pub theta: f64,
    pub radius: f64,
}

impl PolarPoint {
    pub fn new(theta: f64, radius: f64) -> Self {
        Self { theta, radius }
    }

    /// Copy both components from `other`.
    pub fn set_location(&mut self, other: &PolarPoint) {
        self.theta = other.theta;
        self.radius = other.radius;
    }
}

impl fmt::Display for PolarPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PolarPoint[{},{}]", self.radius, self.theta)
    }
}

/// Convert around the origin.
pub fn polar_to_cartesian<M: PointModel>(pm: &M, polar: &PolarPoint) -> M::Point {
    polar_to_cartesian_parts(pm, polar.theta, polar.radius)
}

/// [`polar_to_cartesian`] from bare components.
pub fn polar_to_cartesian_parts<M: PointModel>(pm: &M, theta: f64, radius: f64) -> M::Point {
    pm.new_point(radius * theta.cos(), radius * theta.sin())
}

/// Angle is `atan2(y, x)`, so the origin maps to `(0, 0)` rather than NaN.
pub fn cartesian_to_polar<M: PointModel>(pm: &M, point: &M::Point) -> PolarPoint {
    cartesian_to_polar_parts(pm.x(point), pm.y(point))
}

/// [`cartesian_to_polar`] from bare components.
pub fn cartesian_to_polar_parts(x: f64, y: f64) -> PolarPoint {
    PolarPoint::new(y.atan2(x), (x * x + y * y).sqrt())
}
