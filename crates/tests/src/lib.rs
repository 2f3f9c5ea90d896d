//! Integration test harness for voxfield.
//!
//! This crate provides utilities for end-to-end testing of the full
//! pipeline: Grid → Sample → Aggregate → Assemble → Verify.

use std::sync::{Arc, Mutex};

use voxfield_solver::{
    Assembly, CancelFlag, FieldSolver, FieldVolume, GridBounds, KernelFn, Result, SampleStrategy,
    SolverConfig,
};

/// Test harness that drives full solves on an owned single-thread runtime,
/// so integration tests stay synchronous.
pub struct TestHarness {
    solver: FieldSolver,
    bounds: GridBounds,
    runtime: tokio::runtime::Runtime,
    progress: Arc<Mutex<Vec<(f64, String)>>>,
}

impl TestHarness {
    /// Harness over a unit cube with all delays zeroed.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid or the runtime cannot start.
    pub fn from_kernel(resolution: usize, kernel: KernelFn) -> Self {
        Self::with_config(Self::test_config(resolution), kernel)
    }

    /// Zero-delay configuration with small batches, suitable for tests
    pub fn test_config(resolution: usize) -> SolverConfig {
        SolverConfig {
            resolution,
            batch_size: 16,
            process_batch_size: 8,
            batch_delay_ms: 0,
            chunk_delay_ms: 0,
            strategy: SampleStrategy::Auto,
        }
    }

    pub fn with_config(config: SolverConfig, kernel: KernelFn) -> Self {
        let progress = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&progress);

        let mut solver = FieldSolver::new(config).expect("valid test configuration");
        solver.set_kernel(kernel);
        solver.set_progress_callback(Box::new(move |percent, message| {
            sink.lock().unwrap().push((percent, message.to_string()));
        }));

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .expect("tokio runtime");

        Self {
            solver,
            bounds: GridBounds::cube(1.0),
            runtime,
            progress,
        }
    }

    pub fn set_bounds(&mut self, bounds: GridBounds) {
        self.bounds = bounds;
    }

    pub fn cancel_flag(&self) -> CancelFlag {
        self.solver.cancel_flag()
    }

    /// Run one solve to completion with scalar channel 0 as primary
    pub fn solve(&self, assembly: Assembly) -> Result<FieldVolume> {
        self.runtime
            .block_on(self.solver.solve(&self.bounds, assembly, 0))
    }

    /// Progress reports captured so far, in callback order
    pub fn progress(&self) -> Vec<(f64, String)> {
        self.progress.lock().unwrap().clone()
    }
}
