//! Error type shared by the layout engine.

/// Errors surfaced by layout construction and execution.
///
/// Every variant is a caller contract violation; nothing here is retried.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("invalid {what}: {reason}")]
    InvalidArgument {
        what: &'static str,
        reason: String,
    },
    #[error("graph has no roots (every node has a predecessor)")]
    NoRoots,
    #[error("unknown node: {0}")]
    UnknownNode(u32),
    #[error("invalid layout configuration: {0}")]
    Config(String),
}

impl LayoutError {
    pub(crate) fn invalid(what: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            what,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LayoutError>;
