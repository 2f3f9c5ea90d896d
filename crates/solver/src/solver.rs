//! Solve orchestration
//!
//! `FieldSolver` wires configuration, a kernel, and an optional progress
//! callback into one grid → volume pipeline: build the grid, sample every
//! point in batches, aggregate derived channels in chunks, assemble the
//! volume.

use tracing::{info, instrument};

use crate::aggregate;
use crate::config::SolverConfig;
use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::sampler::{self, RawResults};
use crate::types::{Assembly, CancelFlag, GridBounds, KernelFn, ProgressFn, ProgressSink};
use crate::volume::FieldVolume;

/// Drives one grid → volume solve end to end
pub struct FieldSolver {
    config: SolverConfig,
    kernel: Option<KernelFn>,
    progress: ProgressSink,
    cancel: CancelFlag,
}

impl FieldSolver {
    /// Create a solver with a validated configuration
    pub fn new(config: SolverConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            kernel: None,
            progress: ProgressSink::default(),
            cancel: CancelFlag::new(),
        })
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Install the field kernel evaluated at every grid point
    pub fn set_kernel(&mut self, kernel: KernelFn) {
        self.kernel = Some(kernel);
    }

    /// Install the progress callback
    pub fn set_progress_callback(&mut self, callback: ProgressFn) {
        self.progress.set(callback);
    }

    /// Flag shared with this solver's suspension points
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Sample the field over `bounds` and assemble the volume.
    ///
    /// `primary_scalar` selects the scalar channel driving `values` and the
    /// value bounds; when that channel is absent or empty the field
    /// magnitude takes over, and with neither the volume carries no values.
    #[instrument(skip(self, bounds), fields(resolution = self.config.resolution))]
    pub async fn solve(
        &self,
        bounds: &GridBounds,
        assembly: Assembly,
        primary_scalar: usize,
    ) -> Result<FieldVolume> {
        let kernel = self.kernel.as_ref().ok_or(Error::MissingKernel)?;

        self.progress.report(0.0, "Setting up field calculation...");
        let grid = Grid::build(bounds, self.config.resolution)?;

        let results =
            sampler::sample_grid(&grid, kernel, &self.config, &self.progress, &self.cancel)
                .await?;

        self.progress.report(90.0, "Processing field data...");
        if self.cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let volume = match assembly {
            Assembly::Raw => self.assemble_raw(&grid, results, primary_scalar).await?,
            Assembly::Normalized => {
                self.assemble_normalized(&grid, results, primary_scalar)
                    .await?
            }
        };

        self.progress.report(100.0, "Field calculation complete!");
        info!(points = volume.x.len(), "solve complete");
        Ok(volume)
    }

    /// Assemble with physical units preserved
    async fn assemble_raw(
        &self,
        grid: &Grid,
        results: RawResults,
        primary_scalar: usize,
    ) -> Result<FieldVolume> {
        let chunk = self.config.process_batch_size;
        let delay = self.config.chunk_delay();
        let RawResults {
            x,
            y,
            z,
            field_components,
            scalars,
        } = results;

        let field_magnitude = match &field_components {
            Some(components) => Some(aggregate::field_magnitude(components, chunk, delay).await?),
            None => None,
        };

        let values = scalars
            .get(primary_scalar)
            .filter(|channel| !channel.is_empty())
            .cloned()
            .or_else(|| field_magnitude.clone());

        let bounds = aggregate::compute_bounds(&x, &y, &z, values.as_deref(), chunk, delay).await;

        Ok(FieldVolume {
            x,
            y,
            z,
            values,
            field_magnitude,
            field_components,
            scalars: if scalars.is_empty() {
                None
            } else {
                Some(scalars)
            },
            dimensions: [grid.resolution(); 3],
            bounds,
        })
    }

    /// Assemble with every channel normalized before bounds.
    ///
    /// The raw component channels still pass through untouched; only the
    /// magnitude and scalar channels lose sign and units.
    async fn assemble_normalized(
        &self,
        grid: &Grid,
        results: RawResults,
        primary_scalar: usize,
    ) -> Result<FieldVolume> {
        let chunk = self.config.process_batch_size;
        let delay = self.config.chunk_delay();
        let RawResults {
            x,
            y,
            z,
            field_components,
            scalars,
        } = results;

        let field_magnitude = match &field_components {
            Some(components) => {
                let magnitude = aggregate::field_magnitude(components, chunk, delay).await?;
                Some(aggregate::normalize(&magnitude, chunk, delay).await)
            }
            None => None,
        };

        let mut normalized_scalars = Vec::with_capacity(scalars.len());
        for channel in &scalars {
            normalized_scalars.push(aggregate::normalize(channel, chunk, delay).await);
        }

        let values = normalized_scalars
            .get(primary_scalar)
            .filter(|channel| !channel.is_empty())
            .cloned()
            .or_else(|| field_magnitude.clone());

        let bounds = aggregate::compute_bounds(&x, &y, &z, values.as_deref(), chunk, delay).await;

        Ok(FieldVolume {
            x,
            y,
            z,
            values,
            field_magnitude,
            field_components,
            scalars: if normalized_scalars.is_empty() {
                None
            } else {
                Some(normalized_scalars)
            },
            dimensions: [grid.resolution(); 3],
            bounds,
        })
    }
}
