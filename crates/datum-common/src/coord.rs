//! Coordinates and ordinate windows.

use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::error::{TransformError, TransformResult};

/// An ordered, fixed-length sequence of ordinates.
pub type Coordinate = Vec<f64>;

/// The contiguous range of ordinates a sub-transform consumes.
///
/// A coordinate of `first_affected + width + num_trailing` ordinates is split
/// into three parts: the leading ordinates and the trailing ordinates are
/// copied verbatim, the `width` ordinates in between are handed to the
/// sub-transform. The sub-transform may produce a different number of
/// ordinates; the leading and trailing counts stay the same on both sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawOrdinateWindow")]
pub struct OrdinateWindow {
    /// Number of leading ordinates passed through unchanged.
    pub first_affected: usize,
    /// Number of ordinates consumed by the sub-transform.
    pub width: usize,
    /// Number of trailing ordinates passed through unchanged.
    pub num_trailing: usize,
}

impl OrdinateWindow {
    /// Create a new window. The width must be at least one ordinate.
    pub fn new(first_affected: usize, width: usize, num_trailing: usize) -> TransformResult<Self> {
        if width == 0 {
            return Err(TransformError::InvalidWindow(
                "a window must affect at least one ordinate".to_string(),
            ));
        }
        Ok(Self {
            first_affected,
            width,
            num_trailing,
        })
    }

    /// Total number of ordinates of a coordinate seen through this window.
    pub fn dimensions(&self) -> usize {
        self.first_affected + self.width + self.num_trailing
    }

    /// Indices of the ordinates handed to the sub-transform.
    pub fn affected(&self) -> Range<usize> {
        self.first_affected..self.first_affected + self.width
    }

    /// Indices of the trailing ordinates.
    pub fn trailing(&self) -> Range<usize> {
        let start = self.first_affected + self.width;
        start..start + self.num_trailing
    }

    /// The same leading and trailing counts around a window of another width.
    ///
    /// Used to describe the target side of a sub-transform that changes the
    /// number of ordinates.
    pub fn with_width(&self, width: usize) -> TransformResult<Self> {
        Self::new(self.first_affected, width, self.num_trailing)
    }

    /// Whether this window covers the whole coordinate.
    pub fn is_full(&self) -> bool {
        self.first_affected == 0 && self.num_trailing == 0
    }
}

#[derive(Deserialize)]
struct RawOrdinateWindow {
    first_affected: usize,
    width: usize,
    num_trailing: usize,
}

impl TryFrom<RawOrdinateWindow> for OrdinateWindow {
    type Error = TransformError;

    fn try_from(raw: RawOrdinateWindow) -> Result<Self, Self::Error> {
        OrdinateWindow::new(raw.first_affected, raw.width, raw.num_trailing)
    }
}
