//! Point-oriented view of 2-D -> 2-D transforms.

use datum_common::{TransformError, TransformResult};

use crate::transform::Transform;

/// A transform known to map 2-D points to 2-D points.
#[derive(Debug, Clone)]
pub struct Transform2D(Transform);

impl Transform2D {
    /// Transform a single `(x, y)` point.
    pub fn transform_point(&self, x: f64, y: f64) -> TransformResult<(f64, f64)> {
        let result = self.0.transform(&[x, y])?;
        Ok((result[0], result[1]))
    }

    /// The inverse, still as a 2-D view.
    pub fn invert(&self) -> TransformResult<Transform2D> {
        Ok(Transform2D(self.0.invert()?))
    }

    pub fn as_transform(&self) -> &Transform {
        &self.0
    }

    pub fn into_inner(self) -> Transform {
        self.0
    }
}

impl TryFrom<Transform> for Transform2D {
    type Error = TransformError;

    fn try_from(transform: Transform) -> TransformResult<Self> {
        TransformError::check_dimension(2, transform.source_dimensions())?;
        TransformError::check_dimension(2, transform.target_dimensions())?;
        Ok(Transform2D(transform))
    }
}

impl From<Transform2D> for Transform {
    fn from(view: Transform2D) -> Self {
        view.0
    }
}
