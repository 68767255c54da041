//! Cartesian points and the strategy used to manipulate them.
//!
//! Algorithms never touch point fields directly. They go through a
//! [`PointModel`], so the same tree or force layout can drive any point
//! representation a renderer prefers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A mutable 2-D coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point[{}, {}]", self.x, self.y)
    }
}

/// Creates, reads and mutates points of one concrete representation.
///
/// Inputs are expected to be finite; NaN and infinities are not checked.
pub trait PointModel {
    type Point: Copy + fmt::Debug;

    fn new_point(&self, x: f64, y: f64) -> Self::Point;

    fn x(&self, p: &Self::Point) -> f64;

    fn y(&self, p: &Self::Point) -> f64;

    fn set_location(&self, p: &mut Self::Point, x: f64, y: f64);

    fn set_location_from(&self, p: &mut Self::Point, from: &Self::Point) {
        let (x, y) = (self.x(from), self.y(from));
        self.set_location(p, x, y);
    }

    fn offset(&self, p: &mut Self::Point, dx: f64, dy: f64) {
        let (x, y) = (self.x(p) + dx, self.y(p) + dy);
        self.set_location(p, x, y);
    }

    fn distance(&self, a: &Self::Point, b: &Self::Point) -> f64 {
        let dx = self.x(a) - self.x(b);
        let dy = self.y(a) - self.y(b);
        (dx * dx + dy * dy).sqrt()
    }
}

/// Point model for [`Point`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPointModel;

impl PointModel for DefaultPointModel {
    type Point = Point;

    #[inline]
    fn new_point(&self, x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[inline]
    fn x(&self, p: &Point) -> f64 {
        p.x
    }

    #[inline]
    fn y(&self, p: &Point) -> f64 {
        p.y
    }

    #[inline]
    fn set_location(&self, p: &mut Point, x: f64, y: f64) {
        p.x = x;
        p.y = y;
    }
}

/// Point model for plain `(x, y)` tuples.
#[derive(Debug, Clone, Copy, Default)]
pub struct TuplePointModel;

impl PointModel for TuplePointModel {
    type Point = (f64, f64);

    fn new_point(&self, x: f64, y: f64) -> (f64, f64) {
        (x, y)
    }

    fn x(&self, p: &(f64, f64)) -> f64 {
        p.0
    }

    fn y(&self, p: &(f64, f64)) -> f64 {
        p.1
    }

    fn set_location(&self, p: &mut (f64, f64), x: f64, y: f64) {
        *p = (x, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_and_set_location() {
        let pm = DefaultPointModel;
        let mut p = pm.new_point(1.0, 2.0);
        pm.offset(&mut p, 3.0, -1.0);
        assert_eq!(p, Point::new(4.0, 1.0));

        let other = pm.new_point(-5.0, 7.5);
        pm.set_location_from(&mut p, &other);
        assert_eq!(p, other);
    }

    #[test]
    fn test_tuple_model_matches_default() {
        let pm = TuplePointModel;
        let mut p = pm.new_point(0.0, 0.0);
        pm.offset(&mut p, 3.0, 4.0);
        assert_eq!(p, (3.0, 4.0));
        assert_eq!(pm.distance(&p, &(0.0, 0.0)), 5.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Point::new(1.5, -2.0)), "Point[1.5, -2]");
    }
}
