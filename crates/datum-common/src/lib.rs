//! Common types shared by the grid processor and the transform algebra.

pub mod coord;
pub mod error;
pub mod grid;

pub use coord::{Coordinate, OrdinateWindow};
pub use error::{TransformError, TransformResult};
pub use grid::{GridGeometry, GridType};
