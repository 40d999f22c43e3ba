//! Affine transforms in homogeneous matrix form.

use std::sync::Arc;

use datum_common::{Coordinate, TransformError, TransformResult};
use nalgebra::{DMatrix, DVector};

use crate::transform::MathTransform;

/// An affine map stored as an `(m + 1) x (n + 1)` homogeneous matrix.
///
/// Maps `n` source ordinates to `m` target ordinates. The last row is
/// always `[0, ..., 0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Affine {
    matrix: DMatrix<f64>,
}

impl Affine {
    /// Wrap a homogeneous matrix, checking its last row.
    pub fn from_matrix(matrix: DMatrix<f64>) -> TransformResult<Self> {
        let (rows, cols) = matrix.shape();
        if rows < 2 || cols < 2 {
            return Err(TransformError::InvalidMatrix(format!(
                "a homogeneous matrix needs at least 2x2, got {}x{}",
                rows, cols
            )));
        }
        let last = matrix.row(rows - 1);
        let homogeneous = last
            .iter()
            .enumerate()
            .all(|(j, &v)| v == if j == cols - 1 { 1.0 } else { 0.0 });
        if !homogeneous {
            return Err(TransformError::InvalidMatrix(
                "last row must be [0, ..., 0, 1]".to_string(),
            ));
        }
        Ok(Self { matrix })
    }

    pub fn identity(dims: usize) -> Self {
        Self {
            matrix: DMatrix::identity(dims + 1, dims + 1),
        }
    }

    /// Adds `offsets` to a coordinate of the same length.
    pub fn translation(offsets: &[f64]) -> Self {
        let dims = offsets.len();
        let mut matrix = DMatrix::identity(dims + 1, dims + 1);
        for (i, &offset) in offsets.iter().enumerate() {
            matrix[(i, dims)] = offset;
        }
        Self { matrix }
    }

    /// Multiplies each ordinate by the matching factor.
    pub fn scale(factors: &[f64]) -> Self {
        let dims = factors.len();
        let mut matrix = DMatrix::identity(dims + 1, dims + 1);
        for (i, &factor) in factors.iter().enumerate() {
            matrix[(i, i)] = factor;
        }
        Self { matrix }
    }

    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }
}

impl MathTransform for Affine {
    fn source_dimensions(&self) -> usize {
        self.matrix.ncols() - 1
    }

    fn target_dimensions(&self) -> usize {
        self.matrix.nrows() - 1
    }

    fn transform(&self, coordinate: &[f64]) -> TransformResult<Coordinate> {
        TransformError::check_dimension(self.source_dimensions(), coordinate.len())?;
        let homogeneous = DVector::from_iterator(
            coordinate.len() + 1,
            coordinate.iter().copied().chain(std::iter::once(1.0)),
        );
        let result = &self.matrix * homogeneous;
        Ok(result.iter().take(self.target_dimensions()).copied().collect())
    }

    fn inverse(&self) -> TransformResult<Arc<dyn MathTransform>> {
        if !self.matrix.is_square() {
            return Err(TransformError::not_invertible(format!(
                "affine map from {} to {} dimensions",
                self.source_dimensions(),
                self.target_dimensions()
            )));
        }
        let inverse = self
            .matrix
            .clone()
            .try_inverse()
            .ok_or_else(|| TransformError::not_invertible("singular affine matrix"))?;
        Ok(Arc::new(Affine::from_matrix(inverse)?))
    }

    fn height_extension(&self) -> Option<Arc<dyn MathTransform>> {
        if self.source_dimensions() != 2 || self.target_dimensions() != 2 {
            return None;
        }
        // Height is carried through with an identity row and column.
        let lift = |i: usize| if i == 2 { 3 } else { i };
        let mut matrix = DMatrix::identity(4, 4);
        for i in 0..3 {
            for j in 0..3 {
                matrix[(lift(i), lift(j))] = self.matrix[(i, j)];
            }
        }
        Some(Arc::new(Affine { matrix }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translation_and_scale() {
        let t = Affine::translation(&[1.0, -2.0]);
        assert_eq!(t.transform(&[3.0, 4.0]).unwrap(), vec![4.0, 2.0]);
        let s = Affine::scale(&[2.0, 0.5, 1.0]);
        assert_eq!(s.transform(&[3.0, 4.0, 5.0]).unwrap(), vec![6.0, 2.0, 5.0]);
    }

    #[test]
    fn test_non_homogeneous_rejected() {
        let m = DMatrix::from_row_slice(2, 2, &[1.0, 0.0, 1.0, 1.0]);
        assert!(matches!(
            Affine::from_matrix(m),
            Err(TransformError::InvalidMatrix(_))
        ));
        assert!(Affine::from_matrix(DMatrix::identity(1, 1)).is_err());
    }

    #[test]
    fn test_singular_not_invertible() {
        let flat = Affine::scale(&[1.0, 0.0]);
        assert!(matches!(
            flat.inverse(),
            Err(TransformError::NotInvertible(_))
        ));
    }

    #[test]
    fn test_inverse_round_trip() {
        let t = Affine::translation(&[1.0, -2.0]);
        let inverse = t.inverse().unwrap();
        assert_eq!(inverse.transform(&[4.0, 2.0]).unwrap(), vec![3.0, 4.0]);
    }

    #[test]
    fn test_height_extension_keeps_height() {
        let lifted = Affine::translation(&[1.0, 2.0]).height_extension().unwrap();
        assert_eq!(lifted.source_dimensions(), 3);
        assert_eq!(
            lifted.transform(&[0.0, 0.0, 7.0]).unwrap(),
            vec![1.0, 2.0, 7.0]
        );
        assert!(Affine::identity(3).height_extension().is_none());
    }
}
