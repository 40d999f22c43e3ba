//! Configuration for grid-backed transforms.

use datum_common::{TransformError, TransformResult};
use serde::{Deserialize, Serialize};

/// Configuration for the grid processor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GridProcessorConfig {
    /// Iterative inversion of offset grids.
    ///
    /// `None` means grid transforms report themselves as not invertible.
    #[serde(default)]
    pub inverse: Option<InverseIteration>,
}

/// Stopping rule for the fixed-point inversion of an offset grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InverseIteration {
    /// Largest accepted residual on any ordinate, in the grid's units.
    pub tolerance: f64,
    /// Number of refinement steps before giving up.
    pub max_iterations: usize,
}

impl Default for InverseIteration {
    fn default() -> Self {
        Self {
            tolerance: 1e-9,
            max_iterations: 20,
        }
    }
}

impl InverseIteration {
    /// Validate the stopping rule.
    pub fn validate(&self) -> TransformResult<()> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(TransformError::Config(
                "inverse tolerance must be a positive finite number".to_string(),
            ));
        }
        if self.max_iterations == 0 {
            return Err(TransformError::Config(
                "inverse max_iterations must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl GridProcessorConfig {
    /// Config with iterative inversion enabled using the default stopping rule.
    pub fn with_inverse() -> Self {
        Self {
            inverse: Some(InverseIteration::default()),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// `GRID_INVERSE_TOLERANCE` enables iterative inversion when it parses;
    /// `GRID_INVERSE_MAX_ITERATIONS` overrides the iteration bound.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("GRID_INVERSE_TOLERANCE") {
            if let Ok(tolerance) = val.parse() {
                config.inverse = Some(InverseIteration {
                    tolerance,
                    ..InverseIteration::default()
                });
            }
        }

        if let Ok(val) = std::env::var("GRID_INVERSE_MAX_ITERATIONS") {
            if let (Some(inverse), Ok(max)) = (config.inverse.as_mut(), val.parse()) {
                inverse.max_iterations = max;
            }
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> TransformResult<()> {
        match &self.inverse {
            Some(inverse) => inverse.validate(),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_fails_closed() {
        let config = GridProcessorConfig::default();
        assert!(config.inverse.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = GridProcessorConfig::with_inverse();
        assert!(config.validate().is_ok());

        config.inverse = Some(InverseIteration {
            tolerance: 0.0,
            max_iterations: 10,
        });
        assert!(config.validate().is_err());

        config.inverse = Some(InverseIteration {
            tolerance: f64::NAN,
            max_iterations: 10,
        });
        assert!(config.validate().is_err());

        config.inverse = Some(InverseIteration {
            tolerance: 1e-6,
            max_iterations: 0,
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_json() {
        let config: GridProcessorConfig = serde_json::from_str(
            r#"{"inverse":{"tolerance":1e-7,"max_iterations":8}}"#,
        )
        .unwrap();
        assert_eq!(
            config.inverse,
            Some(InverseIteration {
                tolerance: 1e-7,
                max_iterations: 8
            })
        );

        let empty: GridProcessorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, GridProcessorConfig::default());
    }
}
