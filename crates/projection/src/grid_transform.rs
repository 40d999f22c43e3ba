//! Transforms backed by a localization, offset or NADCON grid.

use datum_common::{Coordinate, GridType, TransformError, TransformResult};
use grid_processor::{Grid, GridProcessorConfig, InverseIteration};

use crate::transform::Transform;

/// Interpolation in a grid, interpreted according to its `GridType`.
#[derive(Debug, Clone)]
pub struct GridTransform {
    grid: Grid,
    inverse: Option<InverseIteration>,
}

impl GridTransform {
    /// Build a grid transform; `config` decides whether it can be inverted.
    pub fn new(grid: Grid, config: &GridProcessorConfig) -> TransformResult<Self> {
        config.validate()?;

        tracing::debug!(
            grid_type = %grid.grid_type(),
            source_dims = grid.source_dimensions(),
            target_dims = grid.target_dimensions(),
            invertible = config.inverse.is_some() && grid.grid_type().is_additive(),
            "Created grid transform"
        );

        Ok(Self {
            grid,
            inverse: config.inverse,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_type(&self) -> GridType {
        self.grid.grid_type()
    }

    pub(crate) fn source_dimensions(&self) -> usize {
        self.grid.source_dimensions()
    }

    pub(crate) fn target_dimensions(&self) -> usize {
        self.grid.target_dimensions()
    }

    pub(crate) fn apply(&self, coordinate: &[f64]) -> TransformResult<Coordinate> {
        self.grid.evaluate(coordinate)
    }

    pub(crate) fn inverse(&self) -> TransformResult<InverseGridTransform> {
        if self.grid_type() == GridType::Localization {
            return Err(TransformError::not_invertible(
                "localization grids have no inverse",
            ));
        }
        let iteration = self.inverse.ok_or_else(|| {
            TransformError::not_invertible(format!(
                "inversion of {} grids is not enabled",
                self.grid_type()
            ))
        })?;
        Ok(InverseGridTransform {
            forward: self.clone(),
            iteration,
        })
    }
}

/// Fixed-point inverse of an offset or NADCON grid.
///
/// Solves `x + shift(x) = target` by iterating `x <- target - shift(x)`,
/// starting from `target`.
#[derive(Debug, Clone)]
pub struct InverseGridTransform {
    forward: GridTransform,
    iteration: InverseIteration,
}

impl InverseGridTransform {
    /// The grid transform this one undoes.
    pub fn forward(&self) -> &GridTransform {
        &self.forward
    }

    pub fn iteration(&self) -> InverseIteration {
        self.iteration
    }

    pub(crate) fn source_dimensions(&self) -> usize {
        self.forward.target_dimensions()
    }

    pub(crate) fn target_dimensions(&self) -> usize {
        self.forward.source_dimensions()
    }

    pub(crate) fn apply(&self, target: &[f64]) -> TransformResult<Coordinate> {
        let grid = &self.forward.grid;
        let mut estimate = target.to_vec();
        let mut residual = f64::INFINITY;

        for _ in 0..self.iteration.max_iterations {
            let shift = grid.shift_at(&estimate)?.ok_or_else(|| {
                TransformError::not_invertible("localization grids have no inverse")
            })?;
            let next: Coordinate = target.iter().zip(&shift).map(|(t, s)| t - s).collect();
            residual = max_abs_difference(&next, &estimate);
            estimate = next;
            if residual <= self.iteration.tolerance {
                return Ok(estimate);
            }
        }

        tracing::warn!(
            iterations = self.iteration.max_iterations,
            residual,
            tolerance = self.iteration.tolerance,
            "Grid inverse did not converge"
        );
        Err(TransformError::NoConvergence {
            iterations: self.iteration.max_iterations,
            residual,
        })
    }
}

/// Largest ordinate difference, NaN if any difference is NaN.
fn max_abs_difference(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, |max, d| if d.is_nan() || d > max { d } else { max })
}

/// A transform that interpolates in `grid`.
pub fn grid_transform(grid: Grid, config: &GridProcessorConfig) -> TransformResult<Transform> {
    Transform::grid(grid, config)
}
