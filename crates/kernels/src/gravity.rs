//! Newtonian n-body gravitational field model

use voxfield_solver::{KernelFn, KernelSample};

/// Gravitational constant G, m³/(kg·s²)
pub const GRAVITATIONAL_CONSTANT: f64 = 6.674_30e-11;

/// One point mass with a hard exclusion radius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub mass: f64,
    pub position: [f64; 3],
    pub radius: f64,
}

/// Superposition of point masses
#[derive(Debug, Clone, PartialEq)]
pub struct BodySet {
    pub gravitational_constant: f64,
    pub bodies: Vec<Body>,
}

impl Default for BodySet {
    /// The two-body demo scene
    fn default() -> Self {
        Self::new(vec![
            Body {
                mass: 1e7,
                position: [-0.5, 0.0, 0.0],
                radius: 0.1,
            },
            Body {
                mass: 8e6,
                position: [0.7, 0.0, 0.0],
                radius: 0.08,
            },
        ])
    }
}

impl BodySet {
    pub fn new(bodies: Vec<Body>) -> Self {
        Self {
            gravitational_constant: GRAVITATIONAL_CONSTANT,
            bodies,
        }
    }

    /// Gravitational acceleration by superposition, always attractive,
    /// skipping contributions inside a body radius
    pub fn field_at(&self, r: [f64; 3]) -> [f64; 3] {
        let mut g = [0.0f64; 3];
        for body in &self.bodies {
            let rx = r[0] - body.position[0];
            let ry = r[1] - body.position[1];
            let rz = r[2] - body.position[2];
            let distance = (rx * rx + ry * ry + rz * rz).sqrt();
            if distance < body.radius {
                continue;
            }
            let magnitude =
                self.gravitational_constant * body.mass / (distance * distance * distance);
            g[0] -= magnitude * rx;
            g[1] -= magnitude * ry;
            g[2] -= magnitude * rz;
        }
        g
    }

    /// Gravitational potential, clamped to the surface value inside a body
    pub fn potential_at(&self, r: [f64; 3]) -> f64 {
        let mut potential = 0.0;
        for body in &self.bodies {
            let rx = r[0] - body.position[0];
            let ry = r[1] - body.position[1];
            let rz = r[2] - body.position[2];
            let distance = (rx * rx + ry * ry + rz * rz).sqrt();
            if distance < body.radius {
                potential += -self.gravitational_constant * body.mass / body.radius;
            } else {
                potential += -self.gravitational_constant * body.mass / distance;
            }
        }
        potential
    }

    /// Kernel emitting `field = g`, `scalars = [potential]`
    pub fn into_kernel(self) -> KernelFn {
        Box::new(move |r| KernelSample {
            field: Some(self.field_at(r)),
            scalars: Some(vec![self.potential_at(r)]),
        })
    }
}
