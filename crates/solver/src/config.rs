//! Solver configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Resolution above which `Auto` switches to streaming growth.
///
/// Tuning guideline, not a hard limit: direct pre-allocation stays faster
/// for small grids, streaming growth keeps very large grids viable.
pub const DIRECT_RESOLUTION_LIMIT: usize = 50;

/// Result-array strategy for the sampling pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleStrategy {
    /// Pick by resolution: direct up to [`DIRECT_RESOLUTION_LIMIT`],
    /// streaming above it
    Auto,
    /// Reserve capacity for all `n³` points up front
    Direct,
    /// Grow result arrays batch by batch
    Streaming,
}

impl SampleStrategy {
    /// Resolve `Auto` against a concrete grid resolution
    pub fn resolve(self, resolution: usize) -> SampleStrategy {
        match self {
            SampleStrategy::Auto if resolution > DIRECT_RESOLUTION_LIMIT => {
                SampleStrategy::Streaming
            }
            SampleStrategy::Auto => SampleStrategy::Direct,
            other => other,
        }
    }
}

/// Numeric knobs for one solve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Grid points per axis (`n³` samples total)
    pub resolution: usize,
    /// Points evaluated between cooperative yields while sampling
    pub batch_size: usize,
    /// Chunk length for the magnitude/normalization/bounds passes
    pub process_batch_size: usize,
    /// Inter-batch delay while sampling in streaming mode, milliseconds
    pub batch_delay_ms: u64,
    /// Delay taken every tenth aggregation chunk, milliseconds
    pub chunk_delay_ms: u64,
    /// Result-array strategy
    pub strategy: SampleStrategy,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            resolution: 45,
            batch_size: 1000,
            process_batch_size: 100_000,
            batch_delay_ms: 2,
            chunk_delay_ms: 1,
            strategy: SampleStrategy::Auto,
        }
    }
}

impl SolverConfig {
    /// Check the invariants the pipeline divides or indexes by
    pub fn validate(&self) -> Result<()> {
        if self.resolution < 2 {
            return Err(Error::ResolutionTooSmall {
                resolution: self.resolution,
            });
        }
        if self.batch_size == 0 {
            return Err(Error::ZeroBatchSize {
                setting: "batch_size",
            });
        }
        if self.process_batch_size == 0 {
            return Err(Error::ZeroBatchSize {
                setting: "process_batch_size",
            });
        }
        Ok(())
    }

    /// Total number of grid points for this resolution
    pub fn total_points(&self) -> usize {
        self.resolution.pow(3)
    }

    pub(crate) fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }

    pub(crate) fn chunk_delay(&self) -> Duration {
        Duration::from_millis(self.chunk_delay_ms)
    }
}
