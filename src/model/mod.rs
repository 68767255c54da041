//! Coordinate model and the per-node layout store.
//!
//! - `point`: Cartesian points and the [`PointModel`] strategy
//! - `polar`: polar coordinates and conversions
//! - `initializer`: policies for first-read positions
//! - `layout_model`: the [`LayoutModel`] coordinate store

pub mod initializer;
pub mod layout_model;
pub mod point;
pub mod polar;

pub use initializer::{DEFAULT_SEED, FixedLocation, Initializer, RandomLocations};
pub use layout_model::LayoutModel;
pub use point::{DefaultPointModel, Point, PointModel, TuplePointModel};
pub use polar::{PolarPoint, cartesian_to_polar, polar_to_cartesian};
