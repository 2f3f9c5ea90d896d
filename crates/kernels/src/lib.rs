//! Field models for the voxfield solver
//!
//! Each model is a configuration struct plus a pure evaluator; building one
//! yields the boxed kernel the sampler invokes at every grid point. The
//! preset registry maps stable names to ready-to-run configurations for
//! the CLI runner.

pub mod charges;
pub mod gravity;
pub mod wire;

use indexmap::IndexMap;

use voxfield_solver::{Assembly, GridBounds, KernelFn};

pub use charges::{ChargeSet, ParallelPlates, Plate, PointCharge, COULOMB_CONSTANT};
pub use gravity::{Body, BodySet, GRAVITATIONAL_CONSTANT};
pub use wire::WireLoop;

/// Ready-to-run model configuration
pub struct ModelPreset {
    pub name: &'static str,
    pub description: &'static str,
    /// Default grid resolution for this model
    pub resolution: usize,
    /// Default sampling extents
    pub bounds: GridBounds,
    /// Assembly mode the model shipped with
    pub assembly: Assembly,
    /// Build the model's kernel with its default scene
    pub build: fn() -> KernelFn,
}

/// Built-in presets, one per field model
pub fn presets() -> IndexMap<&'static str, ModelPreset> {
    let mut map = IndexMap::new();
    for preset in [
        ModelPreset {
            name: "wire-loop",
            description: "Magnetic field of a circular current loop (Biot-Savart)",
            resolution: 100,
            bounds: GridBounds {
                x: [-2.0, 2.0],
                y: [-4.0, 4.0],
                z: [-2.0, 2.0],
            },
            assembly: Assembly::Raw,
            build: || WireLoop::default().into_kernel(),
        },
        ModelPreset {
            name: "point-charges",
            description: "Electric field of a set of point charges (Coulomb)",
            resolution: 150,
            bounds: GridBounds::cube(7.1),
            assembly: Assembly::Raw,
            build: || ChargeSet::default().into_kernel(),
        },
        ModelPreset {
            name: "capacitor",
            description: "Electric field between two charged parallel plates",
            resolution: 80,
            bounds: GridBounds {
                x: [-4.1, 4.1],
                y: [-3.1, 3.1],
                z: [-4.1, 4.1],
            },
            assembly: Assembly::Raw,
            build: || ParallelPlates::default().into_kernel(),
        },
        ModelPreset {
            name: "n-body",
            description: "Gravitational field of a set of point masses",
            resolution: 100,
            bounds: GridBounds::cube(7.1),
            assembly: Assembly::Normalized,
            build: || BodySet::default().into_kernel(),
        },
    ] {
        map.insert(preset.name, preset);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_lists_every_model() {
        let models = presets();
        let names: Vec<&str> = models.keys().copied().collect();
        assert_eq!(
            names,
            vec!["wire-loop", "point-charges", "capacitor", "n-body"]
        );
    }

    #[test]
    fn test_presets_build_working_kernels() {
        for (name, preset) in presets() {
            assert!(preset.resolution >= 2, "{name}");
            let kernel = (preset.build)();
            let sample = kernel([0.1, 0.2, 0.3]);
            assert!(sample.field.is_some(), "{name} kernel emits no field");
            assert!(sample.scalars.is_some(), "{name} kernel emits no scalars");
        }
    }
}
