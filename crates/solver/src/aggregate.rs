//! Chunked aggregation over sampled arrays
//!
//! Each operation walks its input in fixed-size chunks and yields every
//! tenth chunk so a host scheduler can stay responsive. The operations
//! compose independently; the solve driver sequences them per assembly
//! mode.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::cooperative_yield;

/// Min/max extents of the sampled coordinates and the primary value channel.
///
/// Pairs are seeded at `(+∞, −∞)` and must not be trusted until at least
/// one point contributed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: [f64; 2],
    pub y: [f64; 2],
    pub z: [f64; 2],
    pub values: [f64; 2],
}

impl Bounds {
    /// Empty bounds, every pair seeded at `(+∞, −∞)`
    pub fn empty() -> Self {
        let seed = [f64::INFINITY, f64::NEG_INFINITY];
        Self {
            x: seed,
            y: seed,
            z: seed,
            values: seed,
        }
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::empty()
    }
}

fn include(pair: &mut [f64; 2], value: f64) {
    pair[0] = pair[0].min(value);
    pair[1] = pair[1].max(value);
}

/// Elementwise `sqrt(fx² + fy² + fz²)` over the three component arrays.
///
/// The component arrays must be equal-length; a kernel that stopped
/// reporting one component mid-run surfaces here as
/// [`Error::ChannelLengthMismatch`].
pub async fn field_magnitude(
    components: &[Vec<f64>; 3],
    chunk_size: usize,
    chunk_delay: Duration,
) -> Result<Vec<f64>> {
    let len = components[0].len();
    for (axis, channel) in components.iter().enumerate() {
        if channel.len() != len {
            return Err(Error::ChannelLengthMismatch {
                channel: ["fx", "fy", "fz"][axis],
                expected: len,
                actual: channel.len(),
            });
        }
    }

    let mut magnitude = Vec::with_capacity(len);
    let mut start = 0;
    while start < len {
        let end = (start + chunk_size).min(len);
        for j in start..end {
            let fx = components[0][j];
            let fy = components[1][j];
            let fz = components[2][j];
            magnitude.push((fx * fx + fy * fy + fz * fz).sqrt());
        }
        if start % (chunk_size * 10) == 0 {
            cooperative_yield(chunk_delay).await;
        }
        start = end;
    }
    Ok(magnitude)
}

/// Normalize a channel to `|v| / max|v|`, substituting 1 for a zero max.
///
/// Discards sign; callers that need signed values keep the raw channel
/// instead of normalizing.
pub async fn normalize(values: &[f64], chunk_size: usize, chunk_delay: Duration) -> Vec<f64> {
    let len = values.len();
    let mut max = 0.0f64;

    let mut start = 0;
    while start < len {
        let end = (start + chunk_size).min(len);
        for value in &values[start..end] {
            max = max.max(value.abs());
        }
        if start % (chunk_size * 10) == 0 {
            cooperative_yield(chunk_delay).await;
        }
        start = end;
    }

    if max == 0.0 {
        max = 1.0;
    }

    let mut normalized = Vec::with_capacity(len);
    let mut start = 0;
    while start < len {
        let end = (start + chunk_size).min(len);
        for value in &values[start..end] {
            normalized.push(value.abs() / max);
        }
        if start % (chunk_size * 10) == 0 {
            cooperative_yield(chunk_delay).await;
        }
        start = end;
    }
    normalized
}

/// Chunked min/max reduction over the coordinate arrays and the primary
/// value channel, if one exists.
pub async fn compute_bounds(
    x: &[f64],
    y: &[f64],
    z: &[f64],
    primary: Option<&[f64]>,
    chunk_size: usize,
    chunk_delay: Duration,
) -> Bounds {
    let mut bounds = Bounds::empty();
    let len = x.len();

    let mut start = 0;
    while start < len {
        let end = (start + chunk_size).min(len);
        for j in start..end {
            include(&mut bounds.x, x[j]);
            include(&mut bounds.y, y[j]);
            include(&mut bounds.z, z[j]);
            if let Some(primary) = primary {
                if j < primary.len() {
                    include(&mut bounds.values, primary[j]);
                }
            }
        }
        if start % (chunk_size * 10) == 0 {
            cooperative_yield(chunk_delay).await;
        }
        start = end;
    }
    bounds
}
