//! Grid geometry and grid value semantics.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{TransformError, TransformResult};

/// How the values sampled from a grid are turned into a result coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GridType {
    /// Grid values are the target coordinates.
    Localization,
    /// Grid values are added to the source coordinates, in the grid's units.
    /// Longitude shifts are positive toward east.
    Offset,
    /// Grid values are longitude/latitude shifts in arcseconds.
    /// Longitude shifts are positive toward west.
    Nadcon,
}

impl GridType {
    /// Whether sampled values are added to the source coordinate.
    pub fn is_additive(&self) -> bool {
        match self {
            GridType::Localization => false,
            GridType::Offset | GridType::Nadcon => true,
        }
    }
}

impl fmt::Display for GridType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GridType::Localization => "LOCALIZATION",
            GridType::Offset => "OFFSET",
            GridType::Nadcon => "NADCON",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for GridType {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "LOCALIZATION" => Ok(GridType::Localization),
            "OFFSET" => Ok(GridType::Offset),
            "NADCON" => Ok(GridType::Nadcon),
            _ => Err(TransformError::Config(format!("unknown grid type: {}", s))),
        }
    }
}

/// Geometry of a regular N-dimensional grid.
///
/// Node `index` sits at `origin + index * cell_size` on each axis. Cell sizes
/// may be negative for grids stored north to south.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGridGeometry")]
pub struct GridGeometry {
    origin: Vec<f64>,
    cell_size: Vec<f64>,
    extent: Vec<usize>,
}

impl GridGeometry {
    /// Create a validated grid geometry.
    pub fn new(origin: Vec<f64>, cell_size: Vec<f64>, extent: Vec<usize>) -> TransformResult<Self> {
        let dims = origin.len();
        if dims == 0 {
            return Err(TransformError::invalid_grid("a grid needs at least one axis"));
        }
        if cell_size.len() != dims || extent.len() != dims {
            return Err(TransformError::invalid_grid(format!(
                "axis count mismatch: origin {}, cell size {}, extent {}",
                dims,
                cell_size.len(),
                extent.len()
            )));
        }
        if let Some(axis) = origin.iter().position(|o| !o.is_finite()) {
            return Err(TransformError::invalid_grid(format!(
                "origin is not finite on axis {}",
                axis
            )));
        }
        if let Some(axis) = cell_size.iter().position(|c| !c.is_finite() || *c == 0.0) {
            return Err(TransformError::invalid_grid(format!(
                "cell size must be finite and non-zero on axis {}",
                axis
            )));
        }
        if let Some(axis) = extent.iter().position(|&n| n == 0) {
            return Err(TransformError::invalid_grid(format!(
                "extent must be at least 1 on axis {}",
                axis
            )));
        }
        Ok(Self {
            origin,
            cell_size,
            extent,
        })
    }

    /// Convenience constructor for a 2-D grid.
    pub fn new_2d(
        origin: (f64, f64),
        cell_size: (f64, f64),
        extent: (usize, usize),
    ) -> TransformResult<Self> {
        Self::new(
            vec![origin.0, origin.1],
            vec![cell_size.0, cell_size.1],
            vec![extent.0, extent.1],
        )
    }

    /// Number of axes.
    pub fn dimensions(&self) -> usize {
        self.origin.len()
    }

    pub fn origin(&self) -> &[f64] {
        &self.origin
    }

    pub fn cell_size(&self) -> &[f64] {
        &self.cell_size
    }

    pub fn extent(&self) -> &[usize] {
        &self.extent
    }

    /// Total number of grid nodes.
    pub fn len(&self) -> usize {
        self.extent.iter().product()
    }

    /// Always false: every axis has at least one node.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Convert a position to fractional grid indices.
    ///
    /// Fails with `OutOfGridBounds` if any axis falls outside
    /// `[0, extent - 1]`; positions are never clamped.
    pub fn fractional_index(&self, position: &[f64]) -> TransformResult<Vec<f64>> {
        TransformError::check_dimension(self.dimensions(), position.len())?;

        let mut index = Vec::with_capacity(position.len());
        for (axis, &p) in position.iter().enumerate() {
            let f = (p - self.origin[axis]) / self.cell_size[axis];
            let last = (self.extent[axis] - 1) as f64;
            // written so that NaN fails too
            if !(f >= 0.0 && f <= last) {
                return Err(TransformError::OutOfGridBounds {
                    axis,
                    index: f,
                    extent: self.extent[axis],
                });
            }
            index.push(f);
        }
        Ok(index)
    }

    /// Coordinates of the node at `index`, or None if outside the grid.
    pub fn node_position(&self, index: &[usize]) -> Option<Vec<f64>> {
        if index.len() != self.dimensions() || index.iter().zip(&self.extent).any(|(i, n)| i >= n) {
            return None;
        }
        Some(
            index
                .iter()
                .enumerate()
                .map(|(axis, &i)| self.origin[axis] + i as f64 * self.cell_size[axis])
                .collect(),
        )
    }

    /// Flat node number for an index, axis 0 varying fastest.
    ///
    /// In 2-D this is the usual row-major `row * width + col`.
    pub fn flat_index(&self, index: &[usize]) -> usize {
        let mut flat = 0;
        let mut stride = 1;
        for (axis, &i) in index.iter().enumerate() {
            flat += i * stride;
            stride *= self.extent[axis];
        }
        flat
    }

    /// Lower and upper corner of the area covered by grid nodes.
    pub fn envelope(&self) -> (Vec<f64>, Vec<f64>) {
        let mut lower = Vec::with_capacity(self.dimensions());
        let mut upper = Vec::with_capacity(self.dimensions());
        for axis in 0..self.dimensions() {
            let first = self.origin[axis];
            let last = first + (self.extent[axis] - 1) as f64 * self.cell_size[axis];
            lower.push(first.min(last));
            upper.push(first.max(last));
        }
        (lower, upper)
    }

    /// Whether a position can be sampled.
    pub fn contains(&self, position: &[f64]) -> bool {
        self.fractional_index(position).is_ok()
    }
}

/// Unvalidated form used when deserializing.
#[derive(Deserialize)]
struct RawGridGeometry {
    origin: Vec<f64>,
    cell_size: Vec<f64>,
    extent: Vec<usize>,
}

impl TryFrom<RawGridGeometry> for GridGeometry {
    type Error = TransformError;

    fn try_from(raw: RawGridGeometry) -> Result<Self, Self::Error> {
        GridGeometry::new(raw.origin, raw.cell_size, raw.extent)
    }
}

/// Well-known grid geometries.
pub mod grids {
    use super::*;

    /// NADCON conterminous US grid: 0.25° cells from 131°W, 20°N.
    pub fn nadcon_conus() -> GridGeometry {
        GridGeometry {
            origin: vec![-131.0, 20.0],
            cell_size: vec![0.25, 0.25],
            extent: vec![273, 121],
        }
    }

    /// Global 1° longitude/latitude grid, south-west origin.
    pub fn global_1deg() -> GridGeometry {
        GridGeometry {
            origin: vec![-180.0, -90.0],
            cell_size: vec![1.0, 1.0],
            extent: vec![361, 181],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nadcon_conus_envelope() {
        let grid = grids::nadcon_conus();
        let (lower, upper) = grid.envelope();

        assert_eq!(lower, vec![-131.0, 20.0]);
        assert!((upper[0] - (-63.0)).abs() < 1e-9);
        assert!((upper[1] - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_fractional_index() {
        let grid = GridGeometry::new_2d((0.0, 0.0), (1.0, 1.0), (2, 2)).unwrap();
        assert_eq!(grid.fractional_index(&[0.5, 0.5]).unwrap(), vec![0.5, 0.5]);
        assert_eq!(grid.fractional_index(&[1.0, 1.0]).unwrap(), vec![1.0, 1.0]);
    }

    #[test]
    fn test_fractional_index_out_of_bounds() {
        let grid = GridGeometry::new_2d((0.0, 0.0), (1.0, 1.0), (2, 2)).unwrap();
        let err = grid.fractional_index(&[1.5, 0.5]).unwrap_err();
        assert_eq!(
            err,
            TransformError::OutOfGridBounds {
                axis: 0,
                index: 1.5,
                extent: 2
            }
        );
        assert!(grid.fractional_index(&[0.5, f64::NAN]).is_err());
        assert!(grid.fractional_index(&[-0.001, 0.5]).is_err());
    }

    #[test]
    fn test_negative_cell_size() {
        // North-to-south rows
        let grid = GridGeometry::new_2d((0.0, 90.0), (0.25, -0.25), (1440, 721)).unwrap();
        let index = grid.fractional_index(&[1.0, 89.0]).unwrap();
        assert!((index[0] - 4.0).abs() < 1e-12);
        assert!((index[1] - 4.0).abs() < 1e-12);
        assert!(!grid.contains(&[1.0, 90.5]));
    }

    #[test]
    fn test_flat_index_row_major() {
        let grid = GridGeometry::new_2d((0.0, 0.0), (1.0, 1.0), (3, 2)).unwrap();
        assert_eq!(grid.flat_index(&[0, 0]), 0);
        assert_eq!(grid.flat_index(&[2, 0]), 2);
        assert_eq!(grid.flat_index(&[0, 1]), 3);
        assert_eq!(grid.flat_index(&[2, 1]), 5);
        assert_eq!(grid.len(), 6);
    }

    #[test]
    fn test_node_position() {
        let grid = grids::nadcon_conus();
        assert_eq!(grid.node_position(&[4, 8]), Some(vec![-130.0, 22.0]));
        assert_eq!(grid.node_position(&[273, 0]), None);
    }

    #[test]
    fn test_grid_type_parse() {
        assert_eq!("nadcon".parse::<GridType>().unwrap(), GridType::Nadcon);
        assert_eq!("OFFSET".parse::<GridType>().unwrap(), GridType::Offset);
        assert!("bilinear".parse::<GridType>().is_err());
        assert!(GridType::Offset.is_additive());
        assert!(!GridType::Localization.is_additive());
    }
}
