//! Circular-loop Biot–Savart field model

use std::f64::consts::PI;

use voxfield_solver::{KernelFn, KernelSample};

/// Circular current loop of unit radius in the xz-plane.
///
/// The loop is discretized into straight segments; the field at a point is
/// the Biot–Savart sum `μI/4π · Σ ds × r / |r|³` over the segments.
#[derive(Debug, Clone, PartialEq)]
pub struct WireLoop {
    /// Magnetic permeability μ
    pub permeability: f64,
    /// Loop current I
    pub current: f64,
    /// Number of discrete wire segments
    pub segments: usize,
}

impl Default for WireLoop {
    fn default() -> Self {
        Self {
            permeability: 1.0,
            current: 10.0,
            segments: 5000,
        }
    }
}

impl WireLoop {
    /// Discretize the loop into sample positions and central-difference
    /// segment vectors
    fn discretize(&self) -> (Vec<[f64; 3]>, Vec<[f64; 3]>) {
        let n = self.segments;
        let mut wire = Vec::with_capacity(n);
        for i in 0..n {
            let t = i as f64 / n as f64;
            wire.push([(2.0 * PI * t).cos(), 0.0, (2.0 * PI * t).sin()]);
        }

        let mut ds = Vec::with_capacity(n);
        for i in 0..n {
            let prev = wire[(i + n - 1) % n];
            let next = wire[(i + 1) % n];
            ds.push([
                (next[0] - prev[0]) / 2.0,
                (next[1] - prev[1]) / 2.0,
                (next[2] - prev[2]) / 2.0,
            ]);
        }
        (wire, ds)
    }

    /// Wire sample positions, for rendering the conductor geometry
    pub fn geometry(&self) -> Vec<[f64; 3]> {
        self.discretize().0
    }

    /// Build the sampling kernel: `field = B`, `scalars = [|B_y|]`
    pub fn into_kernel(self) -> KernelFn {
        let (wire, ds) = self.discretize();
        let scale = self.permeability * self.current / (4.0 * PI);

        Box::new(move |r| {
            let mut b = [0.0f64; 3];
            for (pos, dl) in wire.iter().zip(&ds) {
                let rx = r[0] - pos[0];
                let ry = r[1] - pos[1];
                let rz = r[2] - pos[2];
                let rmag = (rx * rx + ry * ry + rz * rz).sqrt();
                if rmag < 1e-12 {
                    continue;
                }
                let cross = [
                    dl[1] * rz - dl[2] * ry,
                    dl[2] * rx - dl[0] * rz,
                    dl[0] * ry - dl[1] * rx,
                ];
                let factor = scale / rmag.powi(3);
                b[0] += factor * cross[0];
                b[1] += factor * cross[1];
                b[2] += factor * cross[2];
            }
            KernelSample {
                scalars: Some(vec![b[1].abs()]),
                field: Some(b),
            }
        })
    }
}
