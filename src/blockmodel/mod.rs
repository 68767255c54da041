//! Blockmodeling: partitions of a graph's nodes into equivalence classes.

mod partition;
mod structural;

pub use partition::VertexPartition;
pub use structural::StructurallyEquivalent;
