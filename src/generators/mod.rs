//! Synthetic graph generators for tests and demos.

mod erdos_renyi;

pub use erdos_renyi::ErdosRenyiGenerator;
