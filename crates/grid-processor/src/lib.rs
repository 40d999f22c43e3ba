//! Grid sampling for datum-shift and localization grids.
//!
//! This crate evaluates empirical corrections stored on regular grids. It
//! does not read grid files: callers load a grid, expose it through
//! [`GridProvider`], and this crate interpolates it.
//!
//! # Architecture
//!
//! ```text
//! position
//!      │
//!      ▼
//! GridGeometry::fractional_index  ──► OutOfGridBounds
//!      │
//!      ▼
//! interpolate (multilinear over the enclosing cell)
//!      │
//!      ▼
//! apply_shift(GridType)
//!      ├─► LOCALIZATION: sampled values
//!      ├─► OFFSET:       position + sampled
//!      └─► NADCON:       position + arcsec shift, longitude west-positive
//! ```
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use datum_common::{GridGeometry, GridType};
//! use grid_processor::{Grid, InMemoryGrid};
//!
//! let geometry = GridGeometry::new_2d((0.0, 0.0), (1.0, 1.0), (2, 2)).unwrap();
//! let samples = InMemoryGrid::new(geometry, 2, vec![
//!     0.0, 0.0,   10.0, 0.0,
//!     0.0, 10.0,  10.0, 10.0,
//! ]).unwrap();
//! let grid = Grid::new(GridType::Localization, Arc::new(samples)).unwrap();
//!
//! assert_eq!(grid.sample(&[0.5, 0.5]).unwrap(), vec![5.0, 5.0]);
//! assert!(grid.sample(&[1.5, 0.5]).is_err());
//! ```

pub mod config;
pub mod grid;
pub mod interpolation;
pub mod provider;
pub mod shift;

// Re-export commonly used types at crate root
pub use config::{GridProcessorConfig, InverseIteration};
pub use grid::Grid;
pub use interpolation::interpolate;
pub use provider::{GridProvider, InMemoryGrid};
pub use shift::{apply_shift, shift_vector, ARCSECONDS_PER_DEGREE};
