//! Terminal field-volume artifact and the consumer index remap

use serde::{Deserialize, Serialize};

use crate::aggregate::Bounds;

/// Flat, index-addressable sampling of one field over a cubic grid.
///
/// Created once per solve and immutable afterwards; a later solve produces
/// a new volume rather than mutating an old one. Channels the sampler
/// never observed stay absent instead of serializing as empty arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldVolume {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    /// Primary value channel driving isosurface thresholds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_magnitude: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_components: Option<[Vec<f64>; 3]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scalars: Option<Vec<Vec<f64>>>,
    pub dimensions: [usize; 3],
    pub bounds: Bounds,
}

impl FieldVolume {
    /// Dense copy of the primary channel in consumer order, if present
    pub fn dense_values(&self) -> Option<Vec<f64>> {
        self.values
            .as_ref()
            .map(|values| dense_field(values, self.dimensions))
    }
}

/// Re-address a flat values array into natural `(i, j, k)` row-major order.
///
/// Element `(i, j, k)` of the dense output reads
/// `values[i·ny·nz + j·nz + k]`; indices past the end of `values` fill with
/// `0.0`. The formula pairs with the enumerator's axis-swapped emission
/// order and must not be changed independently of it.
pub fn dense_field(values: &[f64], dimensions: [usize; 3]) -> Vec<f64> {
    let [nx, ny, nz] = dimensions;
    let mut dense = Vec::with_capacity(nx * ny * nz);
    for i in 0..nx {
        for j in 0..ny {
            for k in 0..nz {
                let index = i * ny * nz + j * nz + k;
                dense.push(values.get(index).copied().unwrap_or(0.0));
            }
        }
    }
    dense
}
