//! Turning sampled grid values into result coordinates.

use datum_common::{Coordinate, GridType, TransformError, TransformResult};

/// Arcseconds in one degree.
pub const ARCSECONDS_PER_DEGREE: f64 = 3600.0;

/// Combine a source coordinate with the values sampled at its position.
///
/// - `Localization`: the sampled values are the result.
/// - `Offset`: sampled values are added componentwise.
/// - `Nadcon`: sampled values are arcsecond shifts; the longitude shift is
///   positive toward west and is therefore subtracted.
///
/// Fails with `DimensionMismatch` when `sampled` does not have the length the
/// grid type expects for `source`.
pub fn apply_shift(
    grid_type: GridType,
    source: &[f64],
    sampled: &[f64],
) -> TransformResult<Coordinate> {
    match grid_type {
        GridType::Localization => Ok(sampled.to_vec()),
        GridType::Offset => {
            TransformError::check_dimension(source.len(), sampled.len())?;
            Ok(source.iter().zip(sampled).map(|(s, d)| s + d).collect())
        }
        GridType::Nadcon => {
            TransformError::check_dimension(2, source.len())?;
            let [dx, dy] = nadcon_shift(sampled)?;
            Ok(vec![source[0] + dx, source[1] + dy])
        }
    }
}

/// The shift added to the source coordinate, in source units.
///
/// None for localization grids, where the result does not depend on the
/// source coordinate.
pub fn shift_vector(grid_type: GridType, sampled: &[f64]) -> TransformResult<Option<Vec<f64>>> {
    match grid_type {
        GridType::Localization => Ok(None),
        GridType::Offset => Ok(Some(sampled.to_vec())),
        GridType::Nadcon => Ok(Some(nadcon_shift(sampled)?.to_vec())),
    }
}

fn nadcon_shift(sampled: &[f64]) -> TransformResult<[f64; 2]> {
    TransformError::check_dimension(2, sampled.len())?;
    Ok([
        -sampled[0] / ARCSECONDS_PER_DEGREE,
        sampled[1] / ARCSECONDS_PER_DEGREE,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_localization_discards_source() {
        let result =
            apply_shift(GridType::Localization, &[1.0, 2.0], &[100.0, 200.0, 3.0]).unwrap();
        assert_eq!(result, vec![100.0, 200.0, 3.0]);
    }

    #[test]
    fn test_offset_adds() {
        let result = apply_shift(GridType::Offset, &[-100.0, 40.0], &[0.5, -0.25]).unwrap();
        assert_eq!(result, vec![-99.5, 39.75]);
    }

    #[test]
    fn test_nadcon_scales_and_flips_longitude() {
        let result = apply_shift(GridType::Nadcon, &[-100.0, 40.0], &[3.6, 7.2]).unwrap();
        assert!((result[0] - (-100.001)).abs() < 1e-12);
        assert!((result[1] - 40.002).abs() < 1e-12);
    }

    #[test]
    fn test_shift_vector_matches_apply() {
        let source = [-90.0, 35.0];
        let sampled = [1.8, -3.6];
        for grid_type in [GridType::Offset, GridType::Nadcon] {
            let shift = shift_vector(grid_type, &sampled).unwrap().unwrap();
            let applied = apply_shift(grid_type, &source, &sampled).unwrap();
            assert!((applied[0] - (source[0] + shift[0])).abs() < 1e-12);
            assert!((applied[1] - (source[1] + shift[1])).abs() < 1e-12);
        }
        assert!(shift_vector(GridType::Localization, &sampled).unwrap().is_none());
    }

    #[test]
    fn test_short_nadcon_input_rejected() {
        assert_eq!(
            apply_shift(GridType::Nadcon, &[1.0], &[3.6]).unwrap_err(),
            TransformError::DimensionMismatch {
                expected: 2,
                actual: 1
            }
        );
        assert_eq!(
            apply_shift(GridType::Nadcon, &[1.0, 2.0], &[3.6]).unwrap_err(),
            TransformError::DimensionMismatch {
                expected: 2,
                actual: 1
            }
        );
        assert!(shift_vector(GridType::Nadcon, &[3.6]).is_err());
    }

    #[test]
    fn test_offset_length_mismatch_rejected() {
        assert_eq!(
            apply_shift(GridType::Offset, &[1.0, 2.0, 3.0], &[0.5]).unwrap_err(),
            TransformError::DimensionMismatch {
                expected: 3,
                actual: 1
            }
        );
    }
}
