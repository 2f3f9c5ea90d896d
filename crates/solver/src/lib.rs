//! Voxfield Solver
//!
//! Samples a pluggable physical field kernel over a uniform 3-D grid and
//! packages the result into a flat, index-addressable volume suitable for
//! isosurface extraction.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod grid;
pub mod sampler;
pub mod solver;
pub mod types;
pub mod volume;

pub use aggregate::Bounds;
pub use config::{SampleStrategy, SolverConfig, DIRECT_RESOLUTION_LIMIT};
pub use error::{Error, Result};
pub use grid::{Grid, GridPoint, GridPoints};
pub use sampler::RawResults;
pub use solver::FieldSolver;
pub use types::{
    Assembly, CancelFlag, GridBounds, KernelFn, KernelSample, ProgressFn, ProgressSink,
};
pub use volume::{dense_field, FieldVolume};
