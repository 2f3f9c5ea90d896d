//! Solver errors

use thiserror::Error;

/// Solver result type
pub type Result<T> = std::result::Result<T, Error>;

/// Solver errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("grid resolution must be at least 2, got {resolution}")]
    ResolutionTooSmall { resolution: usize },

    #[error("no field kernel configured")]
    MissingKernel,

    #[error("{setting} must be nonzero")]
    ZeroBatchSize { setting: &'static str },

    #[error("channel length mismatch in {channel}: expected {expected}, got {actual}")]
    ChannelLengthMismatch {
        channel: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("solve cancelled")]
    Cancelled,
}
