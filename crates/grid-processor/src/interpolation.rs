//! Multilinear interpolation of grid samples.

use datum_common::TransformResult;

use crate::provider::GridProvider;

/// Interpolate every band of a grid at a real-valued position.
///
/// The enclosing cell is found from `(position - origin) / cell_size`. Each of
/// its `2^n` corners is weighted by the product of `t` or `1 - t` over the
/// axes, where `t` is the fractional offset inside the cell; in 2-D this is
/// the bilinear weighting `(1-u)(1-v), u(1-v), (1-u)v, uv`.
///
/// Positions outside the grid fail with `OutOfGridBounds`. There is no
/// extrapolation and no clamping.
pub fn interpolate(provider: &dyn GridProvider, position: &[f64]) -> TransformResult<Vec<f64>> {
    let geometry = provider.geometry();
    let fractional = geometry.fractional_index(position)?;
    let dims = fractional.len();
    let bands = provider.band_count();

    let mut lower = Vec::with_capacity(dims);
    let mut offset = Vec::with_capacity(dims);
    for (axis, &f) in fractional.iter().enumerate() {
        // Last cell is reused on the upper edge, with all weight on its upper corner.
        let cell = (f.floor() as usize).min(geometry.extent()[axis].saturating_sub(2));
        lower.push(cell);
        offset.push(f - cell as f64);
    }

    let mut result = vec![0.0; bands];
    let mut corner = vec![0usize; dims];
    for mask in 0..(1usize << dims) {
        let mut weight = 1.0;
        for axis in 0..dims {
            if mask >> axis & 1 == 1 {
                weight *= offset[axis];
                corner[axis] = lower[axis] + 1;
            } else {
                weight *= 1.0 - offset[axis];
                corner[axis] = lower[axis];
            }
        }
        // Also keeps single-node axes from reading past their extent.
        if weight == 0.0 {
            continue;
        }
        for (band, value) in result.iter_mut().enumerate() {
            *value += weight * provider.value(&corner, band);
        }
    }

    Ok(result)
}
