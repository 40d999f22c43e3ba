//! Presenting 3-D transforms with 2-D sources or targets, and back.

use datum_common::{Coordinate, TransformError, TransformResult};

use crate::transform::{Transform, TransformKind};

/// A 2-D/3-D transform presented with a different number of heights.
///
/// When the wrapped transform takes a height the adapter does not receive,
/// a zero height is appended. When the wrapped transform yields a height the
/// adapter does not return, it is dropped. The wrapped transform has at
/// least as many ordinates as the adapter on each side.
#[derive(Debug, Clone)]
pub struct HeightAdapter {
    inner: Transform,
    source_3d: bool,
    target_3d: bool,
}

impl HeightAdapter {
    /// The transform being adapted.
    pub fn inner(&self) -> &Transform {
        &self.inner
    }

    pub fn source_3d(&self) -> bool {
        self.source_3d
    }

    pub fn target_3d(&self) -> bool {
        self.target_3d
    }

    pub(crate) fn source_dimensions(&self) -> usize {
        if self.source_3d {
            3
        } else {
            2
        }
    }

    pub(crate) fn target_dimensions(&self) -> usize {
        if self.target_3d {
            3
        } else {
            2
        }
    }

    pub(crate) fn apply(&self, coordinate: &[f64]) -> TransformResult<Coordinate> {
        let mut result = if self.inner.source_dimensions() > coordinate.len() {
            self.inner.transform(&[coordinate[0], coordinate[1], 0.0])?
        } else {
            self.inner.transform(coordinate)?
        };
        result.truncate(self.target_dimensions());
        Ok(result)
    }

    pub(crate) fn inverse(&self) -> TransformResult<HeightAdapter> {
        Ok(HeightAdapter {
            inner: self.inner.invert()?,
            source_3d: self.target_3d,
            target_3d: self.source_3d,
        })
    }
}

/// `transform` with 2-D or 3-D source and target as requested.
pub(crate) fn with_heights(
    transform: &Transform,
    source_3d: bool,
    target_3d: bool,
) -> TransformResult<Transform> {
    let source = transform.source_dimensions();
    let target = transform.target_dimensions();
    for dims in [source, target] {
        if dims != 2 && dims != 3 {
            return Err(TransformError::InvalidDimension(dims));
        }
    }
    if (source == 3) == source_3d && (target == 3) == target_3d {
        return Ok(transform.clone());
    }

    // Padding a zero height or dropping one works on the transform as is;
    // gaining a height needs the 3-D form of the computation.
    let gains_height = (source_3d && source == 2) || (target_3d && target == 2);
    let inner = if gains_height {
        three_dimensional_core(transform)?
    } else {
        match transform.kind() {
            TransformKind::Heights(adapter) => adapter.inner.clone(),
            _ => transform.clone(),
        }
    };
    if (inner.source_dimensions() == 3) == source_3d
        && (inner.target_dimensions() == 3) == target_3d
    {
        return Ok(inner);
    }

    tracing::debug!(
        source_3d,
        target_3d,
        inner_source_dims = inner.source_dimensions(),
        inner_target_dims = inner.target_dimensions(),
        "Adapted transform heights"
    );
    Ok(Transform::new(TransformKind::Heights(HeightAdapter {
        inner,
        source_3d,
        target_3d,
    })))
}

/// The 3-D -> 3-D transform that `transform` is a 2-D view of.
///
/// Grid, pass-through and concatenated 2-D transforms carry the height
/// through unchanged. Analytic transforms must supply their own extension.
fn three_dimensional_core(transform: &Transform) -> TransformResult<Transform> {
    let source = transform.source_dimensions();
    let target = transform.target_dimensions();
    if source == 3 && target == 3 {
        return Ok(transform.clone());
    }
    let unsupported =
        |reason: &str| TransformError::unsupported_dimension_change(source, target, reason);

    match transform.kind() {
        TransformKind::Heights(adapter) => three_dimensional_core(&adapter.inner),
        TransformKind::Analytic(math) => {
            let extension = math
                .height_extension()
                .ok_or_else(|| unsupported("the formula has no height extension"))?;
            if extension.source_dimensions() != 3 || extension.target_dimensions() != 3 {
                return Err(unsupported("the height extension is not 3-D to 3-D"));
            }
            Ok(Transform::analytic(extension))
        }
        TransformKind::Concatenated(steps) => {
            let mut cores = steps.steps().iter().map(three_dimensional_core);
            let first = cores
                .next()
                .ok_or_else(|| unsupported("empty concatenation"))??;
            cores.try_fold(first, |chain, core| chain.then(&core?))
        }
        TransformKind::PassThrough(_)
        | TransformKind::GridBacked(_)
        | TransformKind::InverseGrid(_)
            if source == 2 && target == 2 =>
        {
            Transform::pass_through(0, transform.clone(), 1)
        }
        _ => Err(unsupported("no 3-D form is known for this transform")),
    }
}
