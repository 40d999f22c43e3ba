//! The transform handle and the closed set of transform kinds.
//!
//! A [`Transform`] is a cheap, clonable handle. Every handle belongs to an
//! inverse pair: a small shared arena holding the forward kind and, once
//! somebody asked for it, the inverse kind. Inverting a handle returns the
//! other member of its pair, so inverting twice gives back the very same
//! instance, and both members live as long as either handle is held.

use std::fmt;
use std::sync::{Arc, OnceLock};

use datum_common::{Coordinate, OrdinateWindow, TransformError, TransformResult};
use grid_processor::{Grid, GridProcessorConfig};

use crate::concat::{concatenate, Concatenated};
use crate::grid_transform::{GridTransform, InverseGridTransform};
use crate::heights::{with_heights, HeightAdapter};
use crate::pass_through::{compose, PassThrough};

/// A coordinate mapping supplied from outside this crate.
///
/// This is the contract any embeddable transform must satisfy: known source
/// and target dimensionality, a forward evaluation and optionally an inverse.
pub trait MathTransform: Send + Sync + fmt::Debug {
    /// Number of ordinates consumed.
    fn source_dimensions(&self) -> usize;

    /// Number of ordinates produced.
    fn target_dimensions(&self) -> usize;

    /// Evaluate the mapping. `coordinate` has `source_dimensions()` ordinates.
    fn transform(&self, coordinate: &[f64]) -> TransformResult<Coordinate>;

    /// The inverse mapping, if one exists.
    fn inverse(&self) -> TransformResult<Arc<dyn MathTransform>> {
        Err(TransformError::not_invertible(format!(
            "{:?} has no inverse",
            self
        )))
    }

    /// A 3-D -> 3-D form of this mapping that reduces to it at zero height.
    ///
    /// Only meaningful for 2-D mappings. `None` means the formula has no
    /// defined height extension.
    fn height_extension(&self) -> Option<Arc<dyn MathTransform>> {
        None
    }
}

/// The closed set of transforms the engine knows how to compose.
#[derive(Debug)]
pub enum TransformKind {
    /// A closed-form mapping, typically supplied by a collaborator.
    Analytic(Arc<dyn MathTransform>),
    /// A transform applied to a window of a longer coordinate.
    PassThrough(PassThrough),
    /// A 3-D transform presented with a 2-D source and/or target.
    Heights(HeightAdapter),
    /// Interpolation in a localization or offset grid.
    GridBacked(GridTransform),
    /// Iterative inverse of an offset grid.
    InverseGrid(InverseGridTransform),
    /// Several transforms applied in sequence.
    Concatenated(Concatenated),
}

impl TransformKind {
    fn source_dimensions(&self) -> usize {
        match self {
            TransformKind::Analytic(math) => math.source_dimensions(),
            TransformKind::PassThrough(pt) => pt.source_dimensions(),
            TransformKind::Heights(adapter) => adapter.source_dimensions(),
            TransformKind::GridBacked(grid) => grid.source_dimensions(),
            TransformKind::InverseGrid(grid) => grid.source_dimensions(),
            TransformKind::Concatenated(steps) => steps.source_dimensions(),
        }
    }

    fn target_dimensions(&self) -> usize {
        match self {
            TransformKind::Analytic(math) => math.target_dimensions(),
            TransformKind::PassThrough(pt) => pt.target_dimensions(),
            TransformKind::Heights(adapter) => adapter.target_dimensions(),
            TransformKind::GridBacked(grid) => grid.target_dimensions(),
            TransformKind::InverseGrid(grid) => grid.target_dimensions(),
            TransformKind::Concatenated(steps) => steps.target_dimensions(),
        }
    }

    /// Evaluate; the input length has already been checked.
    fn apply(&self, coordinate: &[f64]) -> TransformResult<Coordinate> {
        match self {
            TransformKind::Analytic(math) => {
                let result = math.transform(coordinate)?;
                TransformError::check_dimension(math.target_dimensions(), result.len())?;
                Ok(result)
            }
            TransformKind::PassThrough(pt) => pt.apply(coordinate),
            TransformKind::Heights(adapter) => adapter.apply(coordinate),
            TransformKind::GridBacked(grid) => grid.apply(coordinate),
            TransformKind::InverseGrid(grid) => grid.apply(coordinate),
            TransformKind::Concatenated(steps) => steps.apply(coordinate),
        }
    }

    fn inverse(&self) -> TransformResult<TransformKind> {
        Ok(match self {
            TransformKind::Analytic(math) => TransformKind::Analytic(math.inverse()?),
            TransformKind::PassThrough(pt) => TransformKind::PassThrough(pt.inverse()?),
            TransformKind::Heights(adapter) => TransformKind::Heights(adapter.inverse()?),
            TransformKind::GridBacked(grid) => TransformKind::InverseGrid(grid.inverse()?),
            TransformKind::InverseGrid(grid) => TransformKind::GridBacked(grid.forward().clone()),
            TransformKind::Concatenated(steps) => TransformKind::Concatenated(steps.inverse()?),
        })
    }
}

/// Shared arena of a forward transform and its lazily computed inverse.
struct InversePair {
    forward: Arc<TransformKind>,
    inverse: OnceLock<Arc<TransformKind>>,
}

/// An immutable coordinate transform.
///
/// Handles are cheap to clone and safe to use from many threads at once.
#[derive(Clone)]
pub struct Transform {
    kind: Arc<TransformKind>,
    pair: Arc<InversePair>,
}

impl Transform {
    /// Wrap a transform kind in a new handle.
    pub fn new(kind: TransformKind) -> Self {
        let kind = Arc::new(kind);
        Self {
            pair: Arc::new(InversePair {
                forward: Arc::clone(&kind),
                inverse: OnceLock::new(),
            }),
            kind,
        }
    }

    /// Wrap an externally supplied mapping.
    pub fn analytic(math: Arc<dyn MathTransform>) -> Self {
        Self::new(TransformKind::Analytic(math))
    }

    /// Wrap a concrete mapping.
    pub fn from_math<T: MathTransform + 'static>(math: T) -> Self {
        Self::analytic(Arc::new(math))
    }

    /// Apply `sub` to the ordinates `[first_affected, first_affected + sub.source)`
    /// of a longer coordinate with `num_trailing` ordinates after them.
    pub fn pass_through(
        first_affected: usize,
        sub: Transform,
        num_trailing: usize,
    ) -> TransformResult<Self> {
        let window = OrdinateWindow::new(first_affected, sub.source_dimensions(), num_trailing)?;
        compose(sub, window)
    }

    /// Interpolate in `grid` according to its grid type.
    pub fn grid(grid: Grid, config: &GridProcessorConfig) -> TransformResult<Self> {
        Ok(Self::new(TransformKind::GridBacked(GridTransform::new(
            grid, config,
        )?)))
    }

    pub fn kind(&self) -> &TransformKind {
        &self.kind
    }

    /// Number of ordinates consumed.
    pub fn source_dimensions(&self) -> usize {
        self.kind.source_dimensions()
    }

    /// Number of ordinates produced.
    pub fn target_dimensions(&self) -> usize {
        self.kind.target_dimensions()
    }

    /// Transform one coordinate.
    ///
    /// Fails with `DimensionMismatch` if the coordinate length differs from
    /// `source_dimensions()`.
    pub fn transform(&self, coordinate: &[f64]) -> TransformResult<Coordinate> {
        TransformError::check_dimension(self.source_dimensions(), coordinate.len())?;
        self.kind.apply(coordinate)
    }

    /// The inverse transform.
    ///
    /// Computed on first use and cached; inverting the result gives back
    /// this instance. Fails with `NotInvertible` when no inverse exists.
    pub fn invert(&self) -> TransformResult<Transform> {
        let pair = &self.pair;
        if !Arc::ptr_eq(&self.kind, &pair.forward) {
            return Ok(self.sibling(Arc::clone(&pair.forward)));
        }
        if let Some(inverse) = pair.inverse.get() {
            return Ok(self.sibling(Arc::clone(inverse)));
        }

        // Racing threads may each build an inverse here; the first one stored wins.
        let candidate = Arc::new(self.kind.inverse()?);
        let inverse = pair.inverse.get_or_init(|| {
            tracing::debug!(
                source_dims = candidate.source_dimensions(),
                target_dims = candidate.target_dimensions(),
                "Cached inverse transform"
            );
            candidate
        });
        Ok(self.sibling(Arc::clone(inverse)))
    }

    fn sibling(&self, kind: Arc<TransformKind>) -> Transform {
        Transform {
            kind,
            pair: Arc::clone(&self.pair),
        }
    }

    /// A variant with a 2-D or 3-D source and target.
    ///
    /// A missing source height is taken as zero; an unwanted target height
    /// is dropped. Returns this instance when it already has the requested
    /// dimensionality.
    pub fn with_heights(&self, source_3d: bool, target_3d: bool) -> TransformResult<Transform> {
        with_heights(self, source_3d, target_3d)
    }

    /// Like [`with_heights`](Self::with_heights), from dimension counts.
    ///
    /// Only 2 and 3 are accepted; anything else fails with `InvalidDimension`.
    pub fn with_dimensions(&self, source: usize, target: usize) -> TransformResult<Transform> {
        for dims in [source, target] {
            if dims != 2 && dims != 3 {
                return Err(TransformError::InvalidDimension(dims));
            }
        }
        self.with_heights(source == 3, target == 3)
    }

    /// This transform followed by `next`.
    pub fn then(&self, next: &Transform) -> TransformResult<Transform> {
        concatenate(self, next)
    }

    /// Whether two handles refer to the same transform instance.
    pub fn ptr_eq(a: &Transform, b: &Transform) -> bool {
        Arc::ptr_eq(&a.kind, &b.kind)
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Transform").field(&self.kind).finish()
    }
}

impl From<GridTransform> for Transform {
    fn from(grid: GridTransform) -> Self {
        Transform::new(TransformKind::GridBacked(grid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::affine::Affine;

    #[test]
    fn test_double_inversion_returns_same_instance() {
        let forward = Transform::from_math(Affine::translation(&[1.0, 2.0]));
        let inverse = forward.invert().unwrap();
        let again = inverse.invert().unwrap();

        assert!(Transform::ptr_eq(&forward, &again));
        assert!(!Transform::ptr_eq(&forward, &inverse));
        assert!(Transform::ptr_eq(&inverse, &forward.invert().unwrap()));
    }

    #[test]
    fn test_inverse_outlives_forward() {
        let inverse = Transform::from_math(Affine::translation(&[1.0, 2.0]))
            .invert()
            .unwrap();
        let forward = inverse.invert().unwrap();

        assert_eq!(forward.transform(&[0.0, 0.0]).unwrap(), vec![1.0, 2.0]);
        assert!(Transform::ptr_eq(&inverse, &forward.invert().unwrap()));
    }

    #[test]
    fn test_dimension_checked() {
        let t = Transform::from_math(Affine::identity(2));
        assert_eq!(
            t.transform(&[1.0, 2.0, 3.0]),
            Err(TransformError::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        );
    }

    #[test]
    fn test_with_dimensions_rejects_4d() {
        let t = Transform::from_math(Affine::identity(2));
        assert_eq!(
            t.with_dimensions(4, 2).unwrap_err(),
            TransformError::InvalidDimension(4)
        );
    }

    #[derive(Debug)]
    struct BadOutput;

    impl MathTransform for BadOutput {
        fn source_dimensions(&self) -> usize {
            2
        }
        fn target_dimensions(&self) -> usize {
            2
        }
        fn transform(&self, _coordinate: &[f64]) -> TransformResult<Coordinate> {
            Ok(vec![0.0])
        }
    }

    #[test]
    fn test_analytic_output_length_checked() {
        let t = Transform::from_math(BadOutput);
        assert!(matches!(
            t.transform(&[1.0, 1.0]),
            Err(TransformError::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        ));
        assert!(matches!(t.invert(), Err(TransformError::NotInvertible(_))));
    }
}
