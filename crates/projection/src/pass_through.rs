//! Applying a transform to a window of a longer coordinate.

use datum_common::{Coordinate, OrdinateWindow, TransformError, TransformResult};

use crate::transform::{Transform, TransformKind};

/// A sub-transform applied to ordinates `[first_affected, first_affected + n)`.
///
/// Leading and trailing ordinates are copied unchanged. Only
/// [`compose`] builds these, so a pass-through never has an empty
/// leading-plus-trailing window and never wraps another pass-through.
#[derive(Debug, Clone)]
pub struct PassThrough {
    first_affected: usize,
    inner: Transform,
    num_trailing: usize,
}

impl PassThrough {
    /// The wrapped sub-transform.
    pub fn inner(&self) -> &Transform {
        &self.inner
    }

    pub fn first_affected(&self) -> usize {
        self.first_affected
    }

    pub fn num_trailing(&self) -> usize {
        self.num_trailing
    }

    /// Window of the source coordinate handed to the sub-transform.
    pub fn source_window(&self) -> OrdinateWindow {
        OrdinateWindow {
            first_affected: self.first_affected,
            width: self.inner.source_dimensions(),
            num_trailing: self.num_trailing,
        }
    }

    /// Window of the target coordinate written by the sub-transform.
    pub fn target_window(&self) -> OrdinateWindow {
        OrdinateWindow {
            first_affected: self.first_affected,
            width: self.inner.target_dimensions(),
            num_trailing: self.num_trailing,
        }
    }

    pub(crate) fn source_dimensions(&self) -> usize {
        self.source_window().dimensions()
    }

    pub(crate) fn target_dimensions(&self) -> usize {
        self.target_window().dimensions()
    }

    pub(crate) fn apply(&self, coordinate: &[f64]) -> TransformResult<Coordinate> {
        let window = self.source_window();
        let inner = self.inner.transform(&coordinate[window.affected()])?;

        let mut result = Vec::with_capacity(self.target_dimensions());
        result.extend_from_slice(&coordinate[..self.first_affected]);
        result.extend(inner);
        result.extend_from_slice(&coordinate[window.trailing()]);
        Ok(result)
    }

    pub(crate) fn inverse(&self) -> TransformResult<PassThrough> {
        Ok(PassThrough {
            first_affected: self.first_affected,
            inner: self.inner.invert()?,
            num_trailing: self.num_trailing,
        })
    }
}

/// Apply `sub` to `window` of a longer coordinate.
///
/// `window.width` must equal the sub-transform's source dimensionality.
/// A window with nothing before or after it returns `sub` unchanged, and
/// wrapping a pass-through merges the two windows.
pub fn compose(sub: Transform, window: OrdinateWindow) -> TransformResult<Transform> {
    TransformError::check_dimension(sub.source_dimensions(), window.width)?;
    if window.is_full() {
        return Ok(sub);
    }

    let nested = match sub.kind() {
        TransformKind::PassThrough(nested) => Some((
            nested.first_affected,
            nested.inner.clone(),
            nested.num_trailing,
        )),
        _ => None,
    };
    let (leading, inner, trailing) = nested.unwrap_or((0, sub, 0));
    let first_affected = window.first_affected + leading;
    let num_trailing = window.num_trailing + trailing;

    tracing::debug!(
        first_affected,
        width = inner.source_dimensions(),
        num_trailing,
        "Composed pass-through transform"
    );

    Ok(Transform::new(TransformKind::PassThrough(PassThrough {
        first_affected,
        inner,
        num_trailing,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::affine::Affine;

    fn shift_xy() -> Transform {
        Transform::from_math(Affine::translation(&[10.0, 20.0]))
    }

    #[test]
    fn test_window_untouched_ordinates() {
        let pt = Transform::pass_through(1, shift_xy(), 2).unwrap();
        assert_eq!(pt.source_dimensions(), 5);
        assert_eq!(pt.target_dimensions(), 5);
        assert_eq!(
            pt.transform(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap(),
            vec![1.0, 12.0, 23.0, 4.0, 5.0]
        );
    }

    #[test]
    fn test_full_window_returns_sub() {
        let sub = shift_xy();
        let composed = compose(sub.clone(), OrdinateWindow::new(0, 2, 0).unwrap()).unwrap();
        assert!(Transform::ptr_eq(&sub, &composed));
    }

    #[test]
    fn test_width_must_match_sub() {
        let err = compose(shift_xy(), OrdinateWindow::new(0, 3, 1).unwrap()).unwrap_err();
        assert_eq!(
            err,
            TransformError::DimensionMismatch {
                expected: 2,
                actual: 3
            }
        );
    }

    #[test]
    fn test_nested_windows_merge() {
        let sub = shift_xy();
        let inner = Transform::pass_through(1, sub.clone(), 0).unwrap();
        let outer = Transform::pass_through(2, inner, 1).unwrap();

        let TransformKind::PassThrough(pt) = outer.kind() else {
            panic!("expected a pass-through, got {:?}", outer);
        };
        assert_eq!(pt.first_affected(), 3);
        assert_eq!(pt.num_trailing(), 1);
        assert!(Transform::ptr_eq(pt.inner(), &sub));
        assert_eq!(
            outer.transform(&[0.0, 0.0, 0.0, 1.0, 1.0, 7.0]).unwrap(),
            vec![0.0, 0.0, 0.0, 11.0, 21.0, 7.0]
        );
    }

    #[test]
    fn test_dimension_changing_sub() {
        let drop_y = Affine::from_matrix(nalgebra::DMatrix::from_row_slice(
            2,
            3,
            &[1.0, 0.0, 5.0, 0.0, 0.0, 1.0],
        ))
        .unwrap();
        let pt = Transform::pass_through(1, Transform::from_math(drop_y), 1).unwrap();
        assert_eq!(pt.source_dimensions(), 4);
        assert_eq!(pt.target_dimensions(), 3);
        assert_eq!(pt.transform(&[9.0, 1.0, 2.0, 8.0]).unwrap(), vec![9.0, 6.0, 8.0]);
    }

    #[test]
    fn test_inverse_wraps_sub_inverse() {
        let pt = Transform::pass_through(1, shift_xy(), 1).unwrap();
        let inverse = pt.invert().unwrap();
        assert_eq!(
            inverse.transform(&[1.0, 12.0, 23.0, 4.0]).unwrap(),
            vec![1.0, 2.0, 3.0, 4.0]
        );
        assert!(Transform::ptr_eq(&inverse.invert().unwrap(), &pt));
    }

    #[test]
    fn test_wrong_length_rejected() {
        let pt = Transform::pass_through(1, shift_xy(), 1).unwrap();
        assert!(matches!(
            pt.transform(&[1.0, 2.0, 3.0]),
            Err(TransformError::DimensionMismatch {
                expected: 4,
                actual: 3
            })
        ));
    }
}
