//! Coulomb field models: point charges and charged parallel plates

use voxfield_solver::{KernelFn, KernelSample};

/// Coulomb constant k, N·m²/C²
pub const COULOMB_CONSTANT: f64 = 8.99e9;

/// One point charge with a hard exclusion radius.
///
/// Field contributions are skipped inside the radius; the potential clamps
/// to its surface value there instead of diverging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointCharge {
    pub charge: f64,
    pub position: [f64; 3],
    pub radius: f64,
}

/// Superposition of point charges
#[derive(Debug, Clone, PartialEq)]
pub struct ChargeSet {
    pub coulomb_constant: f64,
    pub charges: Vec<PointCharge>,
}

impl Default for ChargeSet {
    /// The two-charge demo scene
    fn default() -> Self {
        Self::new(vec![
            PointCharge {
                charge: 2e-6,
                position: [-0.5, 0.0, 0.0],
                radius: 0.1,
            },
            PointCharge {
                charge: -1.5e-6,
                position: [0.7, 0.0, 0.0],
                radius: 0.08,
            },
        ])
    }
}

impl ChargeSet {
    pub fn new(charges: Vec<PointCharge>) -> Self {
        Self {
            coulomb_constant: COULOMB_CONSTANT,
            charges,
        }
    }

    /// Electric field by superposition, skipping contributions inside a
    /// charge radius
    pub fn field_at(&self, r: [f64; 3]) -> [f64; 3] {
        let mut e = [0.0f64; 3];
        for charge in &self.charges {
            let rx = r[0] - charge.position[0];
            let ry = r[1] - charge.position[1];
            let rz = r[2] - charge.position[2];
            let distance = (rx * rx + ry * ry + rz * rz).sqrt();
            if distance < charge.radius {
                continue;
            }
            let magnitude =
                self.coulomb_constant * charge.charge.abs() / (distance * distance * distance);
            let sign = charge.charge.signum();
            e[0] += sign * magnitude * rx;
            e[1] += sign * magnitude * ry;
            e[2] += sign * magnitude * rz;
        }
        e
    }

    /// Electric potential, constant inside a charge radius
    pub fn potential_at(&self, r: [f64; 3]) -> f64 {
        let mut potential = 0.0;
        for charge in &self.charges {
            let rx = r[0] - charge.position[0];
            let ry = r[1] - charge.position[1];
            let rz = r[2] - charge.position[2];
            let distance = (rx * rx + ry * ry + rz * rz).sqrt();
            if distance < charge.radius {
                potential += self.coulomb_constant * charge.charge / charge.radius;
            } else {
                potential += self.coulomb_constant * charge.charge / distance;
            }
        }
        potential
    }

    /// Kernel emitting `field = E`, `scalars = [potential]`
    pub fn into_kernel(self) -> KernelFn {
        Box::new(move |r| KernelSample {
            field: Some(self.field_at(r)),
            scalars: Some(vec![self.potential_at(r)]),
        })
    }
}

/// One finite charged plate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plate {
    pub position: [f64; 3],
    /// Dominant component decides which plane the plate spans
    pub normal: [f64; 3],
    pub width: f64,
    pub height: f64,
    pub charge: f64,
}

/// Two charged plates discretized into surface point charges
#[derive(Debug, Clone, PartialEq)]
pub struct ParallelPlates {
    pub plates: [Plate; 2],
    /// Point charges each plate's charge is spread over
    pub charges_per_plate: usize,
}

impl Default for ParallelPlates {
    fn default() -> Self {
        Self {
            plates: [
                Plate {
                    position: [0.0, 0.15, 0.0],
                    normal: [0.0, -1.0, 0.0],
                    width: 2.0,
                    height: 2.0,
                    charge: 1e-6,
                },
                Plate {
                    position: [0.0, -0.15, 0.0],
                    normal: [0.0, 1.0, 0.0],
                    width: 2.0,
                    height: 2.0,
                    charge: -1e-6,
                },
            ],
            charges_per_plate: 1000,
        }
    }
}

impl ParallelPlates {
    /// Spread each plate's charge over a square lattice of surface charges
    pub fn surface_charges(&self) -> Vec<PointCharge> {
        let per_side = (self.charges_per_plate as f64).sqrt() as usize;
        let mut charges = Vec::with_capacity(self.plates.len() * per_side * per_side);

        for plate in &self.plates {
            let charge_per_point = plate.charge / self.charges_per_plate as f64;
            for i in 0..per_side {
                for j in 0..per_side {
                    let u = (i as f64 / (per_side - 1) as f64 - 0.5) * plate.width;
                    let v = (j as f64 / (per_side - 1) as f64 - 0.5) * plate.height;

                    let position = if plate.normal[1].abs() > 0.5 {
                        [plate.position[0] + u, plate.position[1], plate.position[2] + v]
                    } else if plate.normal[0].abs() > 0.5 {
                        [plate.position[0], plate.position[1] + u, plate.position[2] + v]
                    } else {
                        [plate.position[0] + u, plate.position[1] + v, plate.position[2]]
                    };

                    charges.push(PointCharge {
                        charge: charge_per_point,
                        position,
                        radius: 0.01,
                    });
                }
            }
        }
        charges
    }

    /// Reduce to a charge-set kernel
    pub fn into_kernel(self) -> KernelFn {
        ChargeSet::new(self.surface_charges()).into_kernel()
    }
}
