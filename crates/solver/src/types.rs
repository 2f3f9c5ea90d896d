//! Shared pipeline types
//!
//! The kernel and progress plug points are boxed closures registered on the
//! solver, so any field model with the right call signature can drive a
//! solve.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Axis-aligned sampling extents, one `[lo, hi]` pair per axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridBounds {
    pub x: [f64; 2],
    pub y: [f64; 2],
    pub z: [f64; 2],
}

impl GridBounds {
    /// Cubic extents centered on the origin
    pub fn cube(half_extent: f64) -> Self {
        let range = [-half_extent, half_extent];
        Self {
            x: range,
            y: range,
            z: range,
        }
    }
}

/// Per-point kernel output: an optional vector field plus optional scalar
/// channels.
///
/// Channel counts fix on the first non-empty observation of a run; a later
/// sample that omits a channel contributes nothing for that point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KernelSample {
    /// Vector field components at the sampled position
    pub field: Option<[f64; 3]>,
    /// Scalar channel values at the sampled position
    pub scalars: Option<Vec<f64>>,
}

impl KernelSample {
    /// Sample carrying nothing (contributes a hole to every channel)
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Function that evaluates the field at one grid position
pub type KernelFn = Box<dyn Fn([f64; 3]) -> KernelSample + Send + Sync>;

/// Function that receives progress updates as `(percent, message)`
pub type ProgressFn = Box<dyn Fn(f64, &str) + Send + Sync>;

/// Raw vs normalized volume assembly; never mixed within one volume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Assembly {
    /// Bounds and channels keep physical units
    Raw,
    /// Every channel is normalized to `|v| / max|v|` before bounds
    Normalized,
}

/// Progress fan-out point; an absent callback makes reporting a no-op
#[derive(Default)]
pub struct ProgressSink {
    callback: Option<ProgressFn>,
}

impl ProgressSink {
    /// Install the progress callback
    pub fn set(&mut self, callback: ProgressFn) {
        self.callback = Some(callback);
    }

    /// Report progress as a percentage in `[0, 100]`
    pub fn report(&self, percent: f64, message: &str) {
        if let Some(callback) = &self.callback {
            callback(percent, message);
        }
    }
}

/// Shared cancellation flag checked at suspension points.
///
/// A cancelled solve yields `Error::Cancelled` and no partial results.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of the solve sharing this flag
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Suspend between batches: sleep when a delay is configured, otherwise
/// hand the scheduler one turn.
pub(crate) async fn cooperative_yield(delay: Duration) {
    if delay.is_zero() {
        tokio::task::yield_now().await;
    } else {
        tokio::time::sleep(delay).await;
    }
}
