//! Transforming packed arrays of coordinates.
//!
//! Points are stored back to back: `[x0, y0, x1, y1, ...]` for a 2-D source.
//! The output is packed the same way with the target dimensionality.

use datum_common::{TransformError, TransformResult};
use rayon::prelude::*;

use crate::transform::Transform;

/// Minimum number of points handed to each rayon task.
const MIN_POINTS_PER_TASK: usize = 256;

impl Transform {
    /// Transform every point of a packed array, in order.
    ///
    /// Stops at the first failing point.
    pub fn transform_points(&self, points: &[f64]) -> TransformResult<Vec<f64>> {
        let dims = self.check_packed(points)?;
        let mut result = Vec::with_capacity(points.len() / dims * self.target_dimensions());
        for point in points.chunks_exact(dims) {
            result.extend(self.transform(point)?);
        }
        Ok(result)
    }

    /// Like [`transform_points`](Self::transform_points), spread over the rayon pool.
    ///
    /// Every chunk runs to its own first failure; the error returned is the
    /// one of the earliest failing point, as `transform_points` reports it.
    pub fn par_transform_points(&self, points: &[f64]) -> TransformResult<Vec<f64>> {
        let dims = self.check_packed(points)?;
        let chunk =
            (points.len() / dims / rayon::current_num_threads()).max(MIN_POINTS_PER_TASK) * dims;

        let parts: Vec<TransformResult<Vec<f64>>> = points
            .par_chunks(chunk)
            .map(|part| self.transform_points(part))
            .collect();
        let parts = parts.into_iter().collect::<TransformResult<Vec<_>>>()?;
        Ok(parts.concat())
    }

    /// Source dimensionality, if `points` holds whole coordinates.
    fn check_packed(&self, points: &[f64]) -> TransformResult<usize> {
        let dims = self.source_dimensions();
        if dims == 0 {
            return Err(TransformError::InvalidDimension(0));
        }
        let partial = points.len() % dims;
        if partial != 0 {
            // Report the length of the incomplete trailing coordinate.
            return Err(TransformError::DimensionMismatch {
                expected: dims,
                actual: partial,
            });
        }
        Ok(dims)
    }
}
