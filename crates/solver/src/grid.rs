//! Grid construction and point enumeration
//!
//! Points are emitted with the first and third grid axes swapped: position
//! `[z[k], y[j], x[i]]` and index triple `[k, j, i]`. The downstream volume
//! consumer's index arithmetic assumes exactly this order, so the
//! permutation is a fixed interface contract.

use crate::error::{Error, Result};
use crate::types::GridBounds;

/// Uniform discretization of a bounding box, one coordinate axis per field
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    x: Vec<f64>,
    y: Vec<f64>,
    z: Vec<f64>,
    resolution: usize,
}

impl Grid {
    /// Build a grid with `resolution` linearly spaced samples per axis
    pub fn build(bounds: &GridBounds, resolution: usize) -> Result<Grid> {
        if resolution < 2 {
            return Err(Error::ResolutionTooSmall { resolution });
        }

        let axis = |range: [f64; 2]| -> Vec<f64> {
            (0..resolution)
                .map(|i| range[0] + (range[1] - range[0]) * i as f64 / (resolution - 1) as f64)
                .collect()
        };

        Ok(Grid {
            x: axis(bounds.x),
            y: axis(bounds.y),
            z: axis(bounds.z),
            resolution,
        })
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Total number of grid points (`n³`)
    pub fn total_points(&self) -> usize {
        self.resolution.pow(3)
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn z(&self) -> &[f64] {
        &self.z
    }

    /// Fresh traversal over all `n³` points; create one per pass
    pub fn points(&self) -> GridPoints<'_> {
        GridPoints {
            grid: self,
            i: 0,
            j: 0,
            k: 0,
            done: false,
        }
    }
}

/// One enumerated sample site
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPoint {
    /// Sample position in axis-swapped emission order
    pub position: [f64; 3],
    /// Grid indices matching `position`
    pub indices: [usize; 3],
}

/// Cursor-based traversal of the full index space in fixed nested order
pub struct GridPoints<'a> {
    grid: &'a Grid,
    i: usize,
    j: usize,
    k: usize,
    done: bool,
}

impl Iterator for GridPoints<'_> {
    type Item = GridPoint;

    fn next(&mut self) -> Option<GridPoint> {
        if self.done {
            return None;
        }

        let grid = self.grid;
        let point = GridPoint {
            position: [grid.z[self.k], grid.y[self.j], grid.x[self.i]],
            indices: [self.k, self.j, self.i],
        };

        self.k += 1;
        if self.k == grid.resolution {
            self.k = 0;
            self.j += 1;
        }
        if self.j == grid.resolution {
            self.j = 0;
            self.i += 1;
        }
        if self.i == grid.resolution {
            self.done = true;
        }

        Some(point)
    }
}
