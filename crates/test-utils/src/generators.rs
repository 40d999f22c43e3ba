//! Test data generators for synthetic grids.
//!
//! These generators create predictable, verifiable sample patterns. All of
//! them return row-major `f32` data (column index varying fastest), and the
//! multi-band ones interleave bands per node, matching the layout expected
//! by `InMemoryGrid::new`.

/// Creates a single-band test grid with predictable values.
///
/// Each cell value is calculated as: `col * 1000 + row`
///
/// This makes it easy to verify that data is being read correctly
/// by checking that grid[row][col] == col * 1000 + row.
///
/// # Example
///
/// ```
/// use test_utils::create_test_grid;
///
/// let grid = create_test_grid(10, 5);
/// assert_eq!(grid.len(), 50); // 10 * 5
/// assert_eq!(grid[0], 0.0);   // col=0, row=0 -> 0*1000 + 0
/// assert_eq!(grid[1], 1000.0); // col=1, row=0 -> 1*1000 + 0
/// assert_eq!(grid[10], 1.0);  // col=0, row=1 -> 0*1000 + 1
/// ```
pub fn create_test_grid(width: usize, height: usize) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            data.push((col * 1000 + row) as f32);
        }
    }
    data
}

/// Creates a grid where every node holds the same values.
///
/// `values` is repeated once per node, so the result has
/// `width * height * values.len()` samples.
pub fn create_constant_grid(width: usize, height: usize, values: &[f32]) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height * values.len());
    for _ in 0..width * height {
        data.extend_from_slice(values);
    }
    data
}

/// Creates a two-band shift grid varying linearly across the grid.
///
/// Band 0 at node `(col, row)` is `base.0 + col * step.0`, band 1 is
/// `base.1 + row * step.1`. Bilinear interpolation reproduces linear fields
/// exactly, which makes expected values easy to compute by hand.
pub fn create_linear_shift_grid(
    width: usize,
    height: usize,
    base: (f32, f32),
    step: (f32, f32),
) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height * 2);
    for row in 0..height {
        for col in 0..width {
            data.push(base.0 + col as f32 * step.0);
            data.push(base.1 + row as f32 * step.1);
        }
    }
    data
}

/// Creates a single-band grid with NaN values at specified positions.
///
/// Useful for testing missing data handling.
///
/// * `nan_positions` - List of (col, row) positions that should be NaN
pub fn create_grid_with_nans(
    width: usize,
    height: usize,
    nan_positions: &[(usize, usize)],
) -> Vec<f32> {
    let mut data = vec![0.0f32; width * height];
    for &(col, row) in nan_positions {
        if col < width && row < height {
            data[row * width + col] = f32::NAN;
        }
    }
    data
}
