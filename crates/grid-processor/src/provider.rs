//! Grid value providers.
//!
//! Loading grid files, caching them and choosing which grid applies are the
//! job of the caller. This module only defines how a loaded grid hands its
//! samples to the interpolator.

use std::fmt;

use datum_common::{GridGeometry, TransformError, TransformResult};

/// Source of grid samples at integer node indices.
///
/// Implementations must be safe to sample from many threads at once and must
/// not change their contents after construction.
pub trait GridProvider: Send + Sync + fmt::Debug {
    /// Geometry of the grid nodes.
    fn geometry(&self) -> &GridGeometry;

    /// Number of values stored per node.
    fn band_count(&self) -> usize;

    /// Value of `band` at node `index`.
    ///
    /// Callers only pass indices inside `geometry().extent()` and bands
    /// below `band_count()`.
    fn value(&self, index: &[usize], band: usize) -> f64;
}

/// A fully loaded grid held in memory.
///
/// Samples are stored band-interleaved as `f32`, nodes ordered with axis 0
/// varying fastest (row-major for 2-D grids).
#[derive(Clone)]
pub struct InMemoryGrid {
    geometry: GridGeometry,
    bands: usize,
    data: Vec<f32>,
}

impl InMemoryGrid {
    /// Create a grid from band-interleaved samples.
    pub fn new(geometry: GridGeometry, bands: usize, data: Vec<f32>) -> TransformResult<Self> {
        if bands == 0 {
            return Err(TransformError::invalid_grid("a grid needs at least one band"));
        }
        let expected = geometry.len() * bands;
        if data.len() != expected {
            return Err(TransformError::invalid_grid(format!(
                "expected {} samples ({} nodes x {} bands), got {}",
                expected,
                geometry.len(),
                bands,
                data.len()
            )));
        }
        Ok(Self {
            geometry,
            bands,
            data,
        })
    }

    /// Create a grid from one sample array per band.
    pub fn from_bands(geometry: GridGeometry, bands: Vec<Vec<f32>>) -> TransformResult<Self> {
        let nodes = geometry.len();
        if let Some(band) = bands.iter().position(|b| b.len() != nodes) {
            return Err(TransformError::invalid_grid(format!(
                "band {} has {} samples, expected {}",
                band,
                bands[band].len(),
                nodes
            )));
        }

        let mut data = Vec::with_capacity(nodes * bands.len());
        for node in 0..nodes {
            data.extend(bands.iter().map(|b| b[node]));
        }
        Self::new(geometry, bands.len(), data)
    }

    /// Create a grid by evaluating `f` at every node index.
    ///
    /// `f` must return `bands` values per node.
    pub fn from_fn<F>(geometry: GridGeometry, bands: usize, mut f: F) -> TransformResult<Self>
    where
        F: FnMut(&[usize]) -> Vec<f32>,
    {
        let dims = geometry.dimensions();
        let mut data = Vec::with_capacity(geometry.len() * bands);
        let mut index = vec![0usize; dims];

        for _ in 0..geometry.len() {
            let values = f(&index);
            if values.len() != bands {
                return Err(TransformError::invalid_grid(format!(
                    "node {:?} produced {} values, expected {}",
                    index,
                    values.len(),
                    bands
                )));
            }
            data.extend(values);

            // odometer increment, axis 0 fastest
            for (axis, i) in index.iter_mut().enumerate() {
                *i += 1;
                if *i < geometry.extent()[axis] {
                    break;
                }
                *i = 0;
            }
        }
        Self::new(geometry, bands, data)
    }

    /// The raw band-interleaved samples.
    pub fn data(&self) -> &[f32] {
        &self.data
    }
}

impl GridProvider for InMemoryGrid {
    fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    fn band_count(&self) -> usize {
        self.bands
    }

    #[inline]
    fn value(&self, index: &[usize], band: usize) -> f64 {
        self.data[self.geometry.flat_index(index) * self.bands + band] as f64
    }
}

impl fmt::Debug for InMemoryGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryGrid")
            .field("geometry", &self.geometry)
            .field("bands", &self.bands)
            .field("samples", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(width: usize, height: usize) -> GridGeometry {
        GridGeometry::new_2d((0.0, 0.0), (1.0, 1.0), (width, height)).unwrap()
    }

    #[test]
    fn test_sample_count_checked() {
        assert!(InMemoryGrid::new(geometry(2, 2), 1, vec![0.0; 3]).is_err());
        assert!(InMemoryGrid::new(geometry(2, 2), 2, vec![0.0; 8]).is_ok());
        assert!(InMemoryGrid::new(geometry(2, 2), 0, vec![]).is_err());
    }

    #[test]
    fn test_from_bands_interleaves() {
        let grid = InMemoryGrid::from_bands(
            geometry(2, 1),
            vec![vec![1.0, 2.0], vec![10.0, 20.0]],
        )
        .unwrap();
        assert_eq!(grid.data(), &[1.0, 10.0, 2.0, 20.0]);
        assert_eq!(grid.value(&[1, 0], 1), 20.0);
    }

    #[test]
    fn test_from_fn_visits_every_node() {
        let grid = InMemoryGrid::from_fn(geometry(3, 2), 1, |index| {
            vec![(index[0] * 1000 + index[1]) as f32]
        })
        .unwrap();

        assert_eq!(grid.value(&[0, 0], 0), 0.0);
        assert_eq!(grid.value(&[2, 0], 0), 2000.0);
        assert_eq!(grid.value(&[1, 1], 0), 1001.0);
    }

    #[test]
    fn test_from_fn_band_count_checked() {
        let result = InMemoryGrid::from_fn(geometry(2, 2), 2, |_| vec![0.0]);
        assert!(matches!(result, Err(TransformError::InvalidGrid(_))));
    }
}
