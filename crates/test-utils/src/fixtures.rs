//! Common test fixtures for grid and transform tests.
//!
//! Fixtures return a geometry, a band count and band-interleaved samples so
//! tests can build whichever provider they need.

use datum_common::GridGeometry;

use crate::generators::{create_constant_grid, create_linear_shift_grid};

/// Geometry, band count and interleaved samples of a fixture grid.
pub type GridFixture = (GridGeometry, usize, Vec<f32>);

/// The 2x2 unit-square grid with two bands.
///
/// Corners hold `(0, 0)`, `(10, 0)`, `(0, 10)` and `(10, 10)` at nodes
/// `(0, 0)`, `(1, 0)`, `(0, 1)` and `(1, 1)`, so the centroid samples to
/// `(5, 5)`. Origin `(0, 0)`, cell size `(1, 1)`.
pub fn unit_square_grid() -> GridFixture {
    let geometry = GridGeometry::new_2d((0.0, 0.0), (1.0, 1.0), (2, 2))
        .expect("unit square geometry is valid");
    let data = vec![
        0.0, 0.0, //
        10.0, 0.0, //
        0.0, 10.0, //
        10.0, 10.0,
    ];
    (geometry, 2, data)
}

/// A small longitude/latitude grid over Kansas with constant shifts.
///
/// Covers 100°W..95°W, 35°N..40°N at 1° spacing. Every node holds
/// `shift` (two bands), so any in-grid position samples to exactly `shift`.
pub fn kansas_constant_shift_grid(shift: (f32, f32)) -> GridFixture {
    let geometry = GridGeometry::new_2d((-100.0, 35.0), (1.0, 1.0), (6, 6))
        .expect("kansas geometry is valid");
    let data = create_constant_grid(6, 6, &[shift.0, shift.1]);
    (geometry, 2, data)
}

/// A NADCON-style arcsecond shift grid that varies across the region.
///
/// Same area as [`kansas_constant_shift_grid`]. Longitude shift grows by
/// 0.1" per column from 1.0", latitude shift by 0.05" per row from -0.5".
pub fn kansas_nadcon_grid() -> GridFixture {
    let geometry = GridGeometry::new_2d((-100.0, 35.0), (1.0, 1.0), (6, 6))
        .expect("kansas geometry is valid");
    let data = create_linear_shift_grid(6, 6, (1.0, -0.5), (0.1, 0.05));
    (geometry, 2, data)
}

/// A 3x3 localization grid mapping grid space to a rotated, scaled plane.
///
/// Node `(col, row)` holds `(100 + 2 * row, 200 + 3 * col)`.
pub fn localization_grid() -> GridFixture {
    let geometry = GridGeometry::new_2d((0.0, 0.0), (1.0, 1.0), (3, 3))
        .expect("localization geometry is valid");
    let mut data = Vec::with_capacity(18);
    for row in 0..3 {
        for col in 0..3 {
            data.push(100.0 + 2.0 * row as f32);
            data.push(200.0 + 3.0 * col as f32);
        }
    }
    (geometry, 2, data)
}
