//! The grid entity: samples plus the policy that interprets them.

use std::sync::Arc;

use datum_common::{Coordinate, GridGeometry, GridType, TransformError, TransformResult};

use crate::interpolation::interpolate;
use crate::provider::GridProvider;
use crate::shift::{apply_shift, shift_vector};

/// A loaded grid together with its `GridType`.
///
/// Cheap to clone; the samples are shared and never mutated, so a grid can
/// be sampled from any number of threads.
#[derive(Debug, Clone)]
pub struct Grid {
    grid_type: GridType,
    provider: Arc<dyn GridProvider>,
}

impl Grid {
    /// Wrap a provider, checking that its band layout suits the grid type.
    ///
    /// - `Localization`: any number of bands (one per target ordinate).
    /// - `Offset`: one band per grid axis.
    /// - `Nadcon`: a 2-D grid with a longitude band and a latitude band.
    pub fn new(grid_type: GridType, provider: Arc<dyn GridProvider>) -> TransformResult<Self> {
        let dims = provider.geometry().dimensions();
        let bands = provider.band_count();

        match grid_type {
            GridType::Localization => {
                if bands == 0 {
                    return Err(TransformError::invalid_grid(
                        "a localization grid needs at least one band",
                    ));
                }
            }
            GridType::Offset => {
                if bands != dims {
                    return Err(TransformError::invalid_grid(format!(
                        "an offset grid needs one band per axis: {} axes, {} bands",
                        dims, bands
                    )));
                }
            }
            GridType::Nadcon => {
                if dims != 2 || bands != 2 {
                    return Err(TransformError::invalid_grid(format!(
                        "a NADCON grid must be 2-D with longitude and latitude bands: {} axes, {} bands",
                        dims, bands
                    )));
                }
            }
        }

        tracing::debug!(
            grid_type = %grid_type,
            dims,
            bands,
            nodes = provider.geometry().len(),
            "Grid ready for sampling"
        );

        Ok(Self {
            grid_type,
            provider,
        })
    }

    pub fn grid_type(&self) -> GridType {
        self.grid_type
    }

    pub fn geometry(&self) -> &GridGeometry {
        self.provider.geometry()
    }

    pub fn band_count(&self) -> usize {
        self.provider.band_count()
    }

    pub fn provider(&self) -> &Arc<dyn GridProvider> {
        &self.provider
    }

    /// Number of ordinates of the positions looked up in this grid.
    pub fn source_dimensions(&self) -> usize {
        self.geometry().dimensions()
    }

    /// Number of ordinates produced by `evaluate`.
    pub fn target_dimensions(&self) -> usize {
        match self.grid_type {
            GridType::Localization => self.band_count(),
            GridType::Offset | GridType::Nadcon => self.source_dimensions(),
        }
    }

    /// Interpolated values of every band at `position`.
    pub fn sample(&self, position: &[f64]) -> TransformResult<Vec<f64>> {
        interpolate(self.provider.as_ref(), position)
    }

    /// Sample at `position` and apply the grid type's policy.
    pub fn evaluate(&self, position: &[f64]) -> TransformResult<Coordinate> {
        let sampled = self.sample(position)?;
        apply_shift(self.grid_type, position, &sampled)
    }

    /// Shift added at `position`, in source units. None for localization grids.
    pub fn shift_at(&self, position: &[f64]) -> TransformResult<Option<Vec<f64>>> {
        let sampled = self.sample(position)?;
        shift_vector(self.grid_type, &sampled)
    }
}
