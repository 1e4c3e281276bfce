//! Floating companion mode: plain `f64` with tolerance-based zero tests.

use crate::config::{NumberMode, SolverConfig};
use crate::errors::SLEError;
use crate::field::Scalar;

impl Scalar for f64 {
    const MODE: NumberMode = NumberMode::Floating;

    fn from_integer(value: i64) -> Self {
        value as f64
    }

    fn try_from_f64(value: f64, _config: &SolverConfig) -> Result<Self, SLEError> {
        if !value.is_finite() {
            return Err(SLEError::ParseNumber(format!(
                "{} is not a finite number",
                value
            )));
        }

        Ok(value)
    }

    fn magnitude(&self) -> Self {
        self.abs()
    }

    fn is_negligible(&self, tolerance: f64) -> bool {
        self.abs() <= tolerance
    }

    fn is_negative(&self) -> bool {
        *self < 0.0
    }

    fn approx_f64(&self) -> f64 {
        *self
    }

    /// Rounds to `decimal_places` digits; values that are integral after
    /// rounding drop the decimals. A rounded negative zero loses its sign.
    fn render(&self, decimal_places: usize) -> String {
        let mut rendered = format!("{:.*}", decimal_places, self);
        if let Some((whole, fraction)) = rendered.split_once('.') {
            if fraction.bytes().all(|b| b == b'0') {
                rendered = whole.to_string();
            }
        }

        match rendered.strip_prefix('-') {
            Some(unsigned) if unsigned.bytes().all(|b| b == b'0' || b == b'.') => {
                unsigned.to_string()
            }
            _ => rendered,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        assert_eq!(Scalar::render(&3.0_f64, 4), "3");
        assert_eq!(Scalar::render(&-2.0_f64, 4), "-2");
        assert_eq!(Scalar::render(&0.5_f64, 4), "0.5000");
        assert_eq!(Scalar::render(&(1.0_f64 / 3.0), 2), "0.33");
        assert_eq!(Scalar::render(&-0.0_f64, 4), "0");
        assert_eq!(Scalar::render(&-0.00001_f64, 2), "0");
        assert_eq!(Scalar::render(&-0.004_f64, 2), "0");
        assert_eq!(Scalar::render(&1.25_f64, 0), "1");
    }

    #[test]
    fn test_render_integral_after_rounding() {
        assert_eq!(Scalar::render(&2.000_000_000_01_f64, 4), "2");
        assert_eq!(Scalar::render(&-1.999_999_99_f64, 4), "-2");
        assert_eq!(Scalar::render(&2.000_07_f64, 4), "2.0001");
        assert!(!2.000_000_000_01_f64.is_compound(4));
    }

    #[test]
    fn test_negligible_uses_tolerance() {
        assert!(Scalar::is_negligible(&1e-12_f64, 1e-9));
        assert!(Scalar::is_negligible(&-1e-10_f64, 1e-9));
        assert!(!Scalar::is_negligible(&1e-6_f64, 1e-9));
    }

    #[test]
    fn test_conversion_rejects_non_finite() {
        let config = SolverConfig::default();
        assert!(<f64 as Scalar>::try_from_f64(f64::NAN, &config).is_err());
        assert_eq!(<f64 as Scalar>::try_from_f64(0.1, &config).unwrap(), 0.1);
    }

    #[test]
    fn test_compound() {
        assert!(0.25_f64.is_compound(4));
        assert!(!4.0_f64.is_compound(4));
    }
}
