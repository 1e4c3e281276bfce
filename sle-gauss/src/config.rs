//! Solver configuration shared by every component of a solve.

use crate::errors::SLEError;

use serde::{Deserialize, Serialize};

/// Largest number of decimals accepted for floating output.
const MAX_DECIMAL_PLACES: usize = 12;

/// Which scalar representation a solve runs in. Fixed for the whole solve.
#[derive(Default, Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberMode {
    /// Exact fractions; zero tests are exact.
    #[default]
    Rational,
    /// `f64` values; zero tests use the tolerance.
    Floating,
}

/// Parameters controlling number conversion, negligibility and output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub mode: NumberMode,
    /// Negligibility threshold for floating values, and the maximum distance
    /// allowed when approximating a floating input by a fraction.
    pub tolerance: f64,
    /// Upper bound of the denominator search when converting floating input.
    pub max_denominator: u64,
    /// Decimals used when a floating value is not integral.
    pub decimal_places: usize,
    pub variable_prefix: String,
    pub parameter_prefix: String,
    /// Record the scaling step even when the pivot already equals 1.
    pub record_unit_scaling: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            mode: NumberMode::Rational,
            tolerance: 1e-9,
            max_denominator: 1_000_000,
            decimal_places: 4,
            variable_prefix: "x".to_string(),
            parameter_prefix: "t".to_string(),
            record_unit_scaling: true,
        }
    }
}

impl SolverConfig {
    /// Creates a validated configuration with default naming and trace policy.
    pub fn try_with(
        mode: NumberMode,
        tolerance: f64,
        max_denominator: u64,
        decimal_places: usize,
    ) -> Result<Self, SLEError> {
        let config = Self {
            mode,
            tolerance,
            max_denominator,
            decimal_places,
            ..Self::default()
        };
        config.validate()?;

        Ok(config)
    }

    /// Parses a JSON document; missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Self, SLEError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SLEError> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(SLEError::InvalidParameters(format!(
                "Tolerance must be a positive finite number, got {}",
                self.tolerance
            )));
        }

        if self.max_denominator == 0 {
            return Err(SLEError::InvalidParameters(
                "Maximum denominator must be >= 1".to_string(),
            ));
        }

        if self.decimal_places > MAX_DECIMAL_PLACES {
            return Err(SLEError::InvalidParameters(format!(
                "Decimal places must be <= {}, got {}",
                MAX_DECIMAL_PLACES, self.decimal_places
            )));
        }

        if self.variable_prefix.is_empty() || self.parameter_prefix.is_empty() {
            return Err(SLEError::InvalidParameters(
                "Variable and parameter prefixes must not be empty".to_string(),
            ));
        }

        if self.variable_prefix == self.parameter_prefix {
            return Err(SLEError::InvalidParameters(
                "Variable and parameter prefixes must differ".to_string(),
            ));
        }

        Ok(())
    }

    /// Human name of the variable at `column` (`x1` for column 0).
    pub fn variable_name(&self, column: usize) -> String {
        format!("{}{}", self.variable_prefix, column + 1)
    }

    /// Name of the `index`-th free parameter (`t1` for index 0).
    pub fn parameter_name(&self, index: usize) -> String {
        format!("{}{}", self.parameter_prefix, index + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SolverConfig::default().validate().is_ok());
    }

    #[test]
    fn test_try_with_rejects_bad_tolerance() {
        assert!(SolverConfig::try_with(NumberMode::Floating, 0.0, 10, 4).is_err());
        assert!(SolverConfig::try_with(NumberMode::Floating, f64::NAN, 10, 4).is_err());
        assert!(SolverConfig::try_with(NumberMode::Floating, 1e-6, 10, 4).is_ok());
    }

    #[test]
    fn test_try_with_rejects_zero_denominator_bound() {
        assert!(SolverConfig::try_with(NumberMode::Rational, 1e-9, 0, 4).is_err());
    }

    #[test]
    fn test_from_json_partial() -> Result<(), SLEError> {
        let config = SolverConfig::from_json(r#"{"mode": "floating", "decimal_places": 2}"#)?;
        assert_eq!(config.mode, NumberMode::Floating);
        assert_eq!(config.decimal_places, 2);
        assert_eq!(config.max_denominator, 1_000_000);
        Ok(())
    }

    #[test]
    fn test_from_json_validates() {
        assert!(SolverConfig::from_json(r#"{"parameter_prefix": "x"}"#).is_err());
    }

    #[test]
    fn test_names() {
        let config = SolverConfig::default();
        assert_eq!(config.variable_name(0), "x1");
        assert_eq!(config.parameter_name(2), "t3");
    }
}
