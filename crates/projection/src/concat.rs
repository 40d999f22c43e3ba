//! Transforms applied one after another.

use datum_common::{Coordinate, TransformError, TransformResult};

use crate::transform::{Transform, TransformKind};

/// A flat sequence of at least two transforms.
#[derive(Debug, Clone)]
pub struct Concatenated {
    steps: Vec<Transform>,
}

impl Concatenated {
    pub fn steps(&self) -> &[Transform] {
        &self.steps
    }

    pub(crate) fn source_dimensions(&self) -> usize {
        self.steps.first().map_or(0, Transform::source_dimensions)
    }

    pub(crate) fn target_dimensions(&self) -> usize {
        self.steps.last().map_or(0, Transform::target_dimensions)
    }

    pub(crate) fn apply(&self, coordinate: &[f64]) -> TransformResult<Coordinate> {
        let mut current = coordinate.to_vec();
        for step in &self.steps {
            current = step.transform(&current)?;
        }
        Ok(current)
    }

    pub(crate) fn inverse(&self) -> TransformResult<Concatenated> {
        let steps = self
            .steps
            .iter()
            .rev()
            .map(Transform::invert)
            .collect::<TransformResult<Vec<_>>>()?;
        Ok(Concatenated { steps })
    }
}

/// `first` followed by `second`.
pub(crate) fn concatenate(first: &Transform, second: &Transform) -> TransformResult<Transform> {
    TransformError::check_dimension(first.target_dimensions(), second.source_dimensions())?;

    let mut steps = Vec::new();
    for transform in [first, second] {
        match transform.kind() {
            TransformKind::Concatenated(chain) => steps.extend(chain.steps.iter().cloned()),
            _ => steps.push(transform.clone()),
        }
    }

    Ok(Transform::new(TransformKind::Concatenated(Concatenated {
        steps,
    })))
}
