//! Batched field sampling
//!
//! Drives the grid enumerator in fixed-size batches, invoking the kernel at
//! every point and appending into parallel result arrays. Progress reports
//! occupy the 10–90 band; control yields cooperatively between batches.

use std::time::Duration;

use tracing::{debug, trace};

use crate::config::{SampleStrategy, SolverConfig};
use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::types::{cooperative_yield, CancelFlag, KernelFn, ProgressSink};

/// Parallel sample arrays in enumerator order.
///
/// All present channels stay index-aligned with `x`/`y`/`z` as long as the
/// kernel reports consistently; a kernel that omits a channel after first
/// reporting it leaves that channel short. Aggregation validates alignment
/// before indexing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawResults {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    /// Vector field component channels, allocated on first observation
    pub field_components: Option<[Vec<f64>; 3]>,
    /// Scalar channels, count fixed on first observation
    pub scalars: Vec<Vec<f64>>,
}

impl RawResults {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            x: Vec::with_capacity(capacity),
            y: Vec::with_capacity(capacity),
            z: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Number of sampled points
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Evaluate `kernel` at every grid point in enumerator order.
///
/// The strategy decides resource behavior only: `Direct` reserves capacity
/// for the exact final length and yields with a bare scheduler turn,
/// `Streaming` grows from empty and sleeps the configured inter-batch
/// delay. Both produce identical results for the same grid and kernel.
pub async fn sample_grid(
    grid: &Grid,
    kernel: &KernelFn,
    config: &SolverConfig,
    progress: &ProgressSink,
    cancel: &CancelFlag,
) -> Result<RawResults> {
    let total = grid.total_points();
    let strategy = config.strategy.resolve(grid.resolution());
    let channel_capacity = match strategy {
        SampleStrategy::Direct => total,
        _ => 0,
    };
    debug!(total, ?strategy, "sampling grid");

    let mut results = RawResults::with_capacity(channel_capacity);
    let mut points = grid.points();
    let mut done = 0usize;

    progress.report(10.0, "Calculating field...");

    loop {
        let mut drawn = 0usize;
        for point in points.by_ref().take(config.batch_size) {
            let sample = kernel(point.position);

            results.x.push(point.position[0]);
            results.y.push(point.position[1]);
            results.z.push(point.position[2]);

            if results.field_components.is_none() && sample.field.is_some() {
                results.field_components = Some([
                    Vec::with_capacity(channel_capacity),
                    Vec::with_capacity(channel_capacity),
                    Vec::with_capacity(channel_capacity),
                ]);
            }
            if results.scalars.is_empty() {
                if let Some(scalars) = &sample.scalars {
                    results.scalars = scalars
                        .iter()
                        .map(|_| Vec::with_capacity(channel_capacity))
                        .collect();
                }
            }

            if let (Some(components), Some(field)) =
                (results.field_components.as_mut(), sample.field)
            {
                components[0].push(field[0]);
                components[1].push(field[1]);
                components[2].push(field[2]);
            }
            if let Some(scalars) = &sample.scalars {
                for (channel, value) in results.scalars.iter_mut().zip(scalars) {
                    channel.push(*value);
                }
            }

            drawn += 1;
        }

        if drawn == 0 {
            break;
        }
        done += drawn;

        let percent = 10.0 + 80.0 * done as f64 / total as f64;
        progress.report(percent, &format!("Calculated {done}/{total} points"));
        trace!(done, total, "sampling batch complete");

        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        match strategy {
            SampleStrategy::Streaming => cooperative_yield(config.batch_delay()).await,
            _ => cooperative_yield(Duration::ZERO).await,
        }
    }

    debug!(points = results.len(), "sampling complete");
    Ok(results)
}
