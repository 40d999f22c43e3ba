//! Coordinate transform composition.
//!
//! Transforms are immutable [`Transform`] handles over a closed set of
//! [`TransformKind`]s. They compose three ways:
//!
//! ```text
//!   pass_through(first, sub, trailing)   [a, b | x, y | c]  ->  [a, b | x', y' | c]
//!   with_heights(source_3d, target_3d)   (x, y) -> (x, y, 0) -> core -> (x', y')
//!   then(next)                           a -> b -> ...
//! ```
//!
//! Grid-backed datum shifts come from [`grid_transform`], driven by a
//! [`grid_processor::Grid`] and its `GridType`.
//!
//! # Example
//!
//! ```
//! use projection::{Affine, Transform};
//!
//! let shift = Transform::from_math(Affine::translation(&[10.0, 20.0]));
//! let windowed = Transform::pass_through(1, shift, 1).unwrap();
//!
//! assert_eq!(
//!     windowed.transform(&[1.0, 2.0, 3.0, 4.0]).unwrap(),
//!     vec![1.0, 12.0, 23.0, 4.0]
//! );
//!
//! let back = windowed.invert().unwrap();
//! assert!(Transform::ptr_eq(&back.invert().unwrap(), &windowed));
//! ```

pub mod affine;
mod batch;
pub mod concat;
pub mod grid_transform;
pub mod heights;
pub mod pass_through;
pub mod transform;
pub mod two_d;

pub use affine::Affine;
pub use concat::Concatenated;
pub use grid_transform::{grid_transform, GridTransform, InverseGridTransform};
pub use heights::HeightAdapter;
pub use pass_through::{compose, PassThrough};
pub use transform::{MathTransform, Transform, TransformKind};
pub use two_d::Transform2D;

pub use datum_common::{Coordinate, OrdinateWindow, TransformError, TransformResult};
