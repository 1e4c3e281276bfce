//! Exact rational numbers over arbitrary precision integers.
//!
//! [`Rational`] wraps `num_rational::BigRational`, which keeps every value in
//! lowest terms with a positive denominator, so equality and zero tests are
//! structural. On top of it sit the checked constructor, the parser and the
//! smallest-denominator approximation of floating input.

use crate::config::{NumberMode, SolverConfig};
use crate::errors::SLEError;
use crate::field::Scalar;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use std::fmt;
use std::mem;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rational(BigRational);

impl Rational {
    /// Creates `numer / denom` in lowest terms.
    ///
    /// # Errors
    ///
    /// Returns `SLEError::ZeroDenominator` if `denom` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// # use sle_gauss::field::Rational;
    /// let half = Rational::new(3, -6).unwrap();
    /// assert_eq!(half.to_string(), "-1/2");
    /// assert!(Rational::new(1, 0).is_err());
    /// ```
    pub fn new(numer: impl Into<BigInt>, denom: impl Into<BigInt>) -> Result<Self, SLEError> {
        let denom = denom.into();
        if denom.is_zero() {
            return Err(SLEError::ZeroDenominator);
        }

        Ok(Self(BigRational::new(numer.into(), denom)))
    }

    /// Creates `value / 1`.
    pub fn from_integer(value: i64) -> Self {
        Self(BigRational::from_integer(BigInt::from(value)))
    }

    pub fn numer(&self) -> &BigInt {
        self.0.numer()
    }

    pub fn denom(&self) -> &BigInt {
        self.0.denom()
    }

    pub fn is_integer(&self) -> bool {
        self.0.is_integer()
    }

    pub fn is_positive(&self) -> bool {
        self.0.is_positive()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Returns `1 / self`, or `None` for zero.
    pub fn checked_recip(&self) -> Option<Self> {
        if self.0.is_zero() {
            return None;
        }

        Some(Self(self.0.recip()))
    }

    /// Largest integer not greater than the value.
    pub fn floor(&self) -> BigInt {
        self.0.floor().to_integer()
    }

    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(f64::NAN)
    }

    /// The exact value of a finite `f64` (every finite double is a dyadic fraction).
    pub fn from_f64_exact(value: f64) -> Option<Self> {
        BigRational::from_float(value).map(Self)
    }

    /// Finds the fraction with the smallest denominator within `tolerance` of `value`.
    ///
    /// # Errors
    ///
    /// Returns `SLEError::Precision` if that denominator exceeds `max_denominator`,
    /// and `SLEError::ParseNumber` for NaN or infinite input.
    ///
    /// # Example
    ///
    /// ```
    /// # use sle_gauss::field::Rational;
    /// let third = Rational::approximate(1.0 / 3.0, 1e-9, 1_000_000).unwrap();
    /// assert_eq!(third, Rational::new(1, 3).unwrap());
    /// assert!(Rational::approximate(1.5e-9, 1e-9, 1_000_000).is_err());
    /// ```
    pub fn approximate(value: f64, tolerance: f64, max_denominator: u64) -> Result<Self, SLEError> {
        let exact = Self::from_f64_exact(value).ok_or_else(|| {
            SLEError::ParseNumber(format!("{} is not a finite number", value))
        })?;
        let slack = Self::from_f64_exact(tolerance.abs()).ok_or_else(|| {
            SLEError::InvalidParameters(format!("Tolerance {} is not finite", tolerance))
        })?;

        let lower = exact.clone() - slack.clone();
        let upper = exact + slack;
        if !lower.is_positive() && !upper.is_negative() {
            return Ok(Self::zero());
        }

        let (lower, upper, negate) = if upper.is_negative() {
            (-upper, -lower, true)
        } else {
            (lower, upper, false)
        };

        let simplest = simplest_between(lower, upper, &BigInt::from(max_denominator)).ok_or(
            SLEError::Precision {
                value,
                max_denominator,
            },
        )?;

        Ok(if negate { -simplest } else { simplest })
    }
}

/// Fraction with the smallest denominator in `[lower, upper]`, `0 < lower <= upper`.
///
/// Walks the continued fraction shared by both bounds, accumulating the
/// convergent `h / k`, and stops at the first level where an integer fits
/// between them. Returns `None` as soon as `k` exceeds `max_denominator`.
fn simplest_between(
    mut lower: Rational,
    mut upper: Rational,
    max_denominator: &BigInt,
) -> Option<Rational> {
    let (mut h_prev, mut h) = (BigInt::zero(), BigInt::one());
    let (mut k_prev, mut k) = (BigInt::one(), BigInt::zero());

    loop {
        let floor = lower.floor();
        let closes = lower.is_integer() || Rational::from(&floor + 1u32) <= upper;
        let term = if closes && !lower.is_integer() {
            &floor + 1u32
        } else {
            floor.clone()
        };

        let next_h = &term * &h + &h_prev;
        let next_k = &term * &k + &k_prev;
        if &next_k > max_denominator {
            return None;
        }
        if closes {
            return Some(Rational(BigRational::new(next_h, next_k)));
        }

        h_prev = mem::replace(&mut h, next_h);
        k_prev = mem::replace(&mut k, next_k);

        let base = Rational::from(floor);
        let next_lower = (upper - base.clone()).checked_recip()?;
        let next_upper = (lower - base).checked_recip()?;
        lower = next_lower;
        upper = next_upper;
    }
}

impl From<BigInt> for Rational {
    fn from(value: BigInt) -> Self {
        Self(BigRational::from_integer(value))
    }
}

impl From<i64> for Rational {
    fn from(value: i64) -> Self {
        Self::from_integer(value)
    }
}

impl From<BigRational> for Rational {
    fn from(value: BigRational) -> Self {
        Self(value)
    }
}

/// `n` for integers, `n/d` otherwise.
impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Rational {
    type Err = SLEError;

    /// Accepts integers (`-3`), fractions (`3/4`) and plain decimals (`0.25`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let invalid = || SLEError::ParseNumber(format!("'{}' is not a rational number", s));

        if let Some((numer, denom)) = text.split_once('/') {
            let numer: BigInt = numer.trim().parse().map_err(|_| invalid())?;
            let denom: BigInt = denom.trim().parse().map_err(|_| invalid())?;
            return Self::new(numer, denom);
        }

        if let Some((whole, fraction)) = text.split_once('.') {
            let negative = whole.starts_with('-');
            let digits = whole.strip_prefix(['-', '+']).unwrap_or(whole);
            let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
            if fraction.is_empty() || !all_digits(fraction) || !all_digits(digits) {
                return Err(invalid());
            }

            let whole: BigInt = if digits.is_empty() {
                BigInt::zero()
            } else {
                digits.parse().map_err(|_| invalid())?
            };
            let scale = num_traits::pow(BigInt::from(10u32), fraction.len());
            let fraction: BigInt = fraction.parse().map_err(|_| invalid())?;
            let magnitude = whole * &scale + fraction;

            return Self::new(if negative { -magnitude } else { magnitude }, scale);
        }

        let value: BigInt = text.parse().map_err(|_| invalid())?;
        Ok(Self::from(value))
    }
}

impl Add for Rational {
    type Output = Rational;

    fn add(self, rhs: Rational) -> Rational {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Rational {
    type Output = Rational;

    fn sub(self, rhs: Rational) -> Rational {
        Self(self.0 - rhs.0)
    }
}

impl Mul for Rational {
    type Output = Rational;

    fn mul(self, rhs: Rational) -> Rational {
        Self(self.0 * rhs.0)
    }
}

impl Div for Rational {
    type Output = Rational;

    /// # Panics
    ///
    /// Panics if `rhs` is zero.
    fn div(self, rhs: Rational) -> Rational {
        Self(self.0 / rhs.0)
    }
}

impl Neg for Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        Self(-self.0)
    }
}

impl Zero for Rational {
    fn zero() -> Self {
        Self(BigRational::zero())
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl One for Rational {
    fn one() -> Self {
        Self(BigRational::one())
    }
}

impl Scalar for Rational {
    const MODE: NumberMode = NumberMode::Rational;

    fn from_integer(value: i64) -> Self {
        Rational::from_integer(value)
    }

    fn try_from_f64(value: f64, config: &SolverConfig) -> Result<Self, SLEError> {
        Rational::approximate(value, config.tolerance, config.max_denominator)
    }

    fn magnitude(&self) -> Self {
        self.abs()
    }

    /// Exact: only zero is negligible.
    fn is_negligible(&self, _tolerance: f64) -> bool {
        self.is_zero()
    }

    fn is_negative(&self) -> bool {
        Rational::is_negative(self)
    }

    fn approx_f64(&self) -> f64 {
        self.to_f64()
    }

    fn render(&self, _decimal_places: usize) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(n: i64, d: i64) -> Rational {
        Rational::new(n, d).unwrap()
    }

    #[test]
    fn test_lowest_terms() {
        assert_eq!(r(4, 8), r(1, 2));
        assert_eq!(r(-4, -8), r(1, 2));
        assert_eq!(r(4, -8).to_string(), "-1/2");
        assert_eq!(r(0, -5).to_string(), "0");
        assert_eq!(r(0, -5).denom(), &BigInt::one());
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(r(1, 2) + r(1, 3), r(5, 6));
        assert_eq!(r(1, 2) - r(1, 3), r(1, 6));
        assert_eq!(r(2, 3) * r(9, 4), r(3, 2));
        assert_eq!(r(2, 3) / r(4, 9), r(3, 2));
        assert_eq!(-r(2, 3), r(-2, 3));
        assert_eq!(r(3, 4) - r(3, 4), Rational::zero());
    }

    #[test]
    #[should_panic]
    fn test_division_by_zero_panics() {
        let _ = r(1, 2) / Rational::zero();
    }

    #[test]
    fn test_ordering_and_floor() {
        assert!(r(-1, 2) < r(1, 3));
        assert!(r(2, 3) > r(3, 5));
        assert_eq!(r(7, 2).floor(), BigInt::from(3));
        assert_eq!(r(-7, 2).floor(), BigInt::from(-4));
    }

    #[test]
    fn test_exact_from_f64() {
        assert_eq!(Rational::from_f64_exact(0.5), Some(r(1, 2)));
        assert_eq!(Rational::from_f64_exact(-12.0), Some(r(-12, 1)));
        assert_eq!(Rational::from_f64_exact(f64::NAN), None);
        // 0.1 is not exactly representable in binary
        assert_ne!(Rational::from_f64_exact(0.1), Some(r(1, 10)));
    }

    #[test]
    fn test_approximate_simple_values() -> Result<(), SLEError> {
        assert_eq!(Rational::approximate(0.1, 1e-9, 1_000_000)?, r(1, 10));
        assert_eq!(Rational::approximate(2.0 / 3.0, 1e-9, 1_000_000)?, r(2, 3));
        assert_eq!(Rational::approximate(-0.75, 1e-9, 1_000_000)?, r(-3, 4));
        assert_eq!(Rational::approximate(3.0, 1e-9, 1_000_000)?, r(3, 1));
        assert_eq!(Rational::approximate(-7.0, 1e-9, 1_000_000)?, r(-7, 1));
        assert_eq!(Rational::approximate(1e-12, 1e-9, 1_000_000)?, Rational::zero());
        Ok(())
    }

    #[test]
    fn test_approximate_irrational_within_tolerance() -> Result<(), SLEError> {
        let pi = Rational::approximate(std::f64::consts::PI, 1e-9, 1_000_000)?;
        assert!((pi.to_f64() - std::f64::consts::PI).abs() <= 1e-9);
        assert!(pi.denom() <= &BigInt::from(1_000_000));
        Ok(())
    }

    #[test]
    fn test_approximate_picks_smallest_denominator() -> Result<(), SLEError> {
        // 355/113 is within 3e-7 of pi; 22/7 is not.
        let approx = Rational::approximate(std::f64::consts::PI, 1e-6, 1_000_000)?;
        assert_eq!(approx, r(355, 113));
        Ok(())
    }

    #[test]
    fn test_approximate_precision_error() {
        let result = Rational::approximate(1.5e-9, 1e-9, 1_000_000);
        assert!(matches!(result, Err(SLEError::Precision { .. })));
        assert!(Rational::approximate(0.123_456_7, 1e-9, 100).is_err());
        assert!(matches!(
            Rational::approximate(f64::INFINITY, 1e-9, 100),
            Err(SLEError::ParseNumber(_))
        ));
    }

    #[test]
    fn test_parse() -> Result<(), SLEError> {
        assert_eq!("3".parse::<Rational>()?, r(3, 1));
        assert_eq!(" -3/6 ".parse::<Rational>()?, r(-1, 2));
        assert_eq!("0.25".parse::<Rational>()?, r(1, 4));
        assert_eq!("-1.5".parse::<Rational>()?, r(-3, 2));
        assert_eq!(".5".parse::<Rational>()?, r(1, 2));
        assert!("1/0".parse::<Rational>().is_err());
        assert!("abc".parse::<Rational>().is_err());
        assert!("1.".parse::<Rational>().is_err());
        Ok(())
    }

    #[test]
    fn test_scalar_policy() {
        assert!(Scalar::is_negligible(&Rational::zero(), 1e-9));
        assert!(!Scalar::is_negligible(&r(1, 1_000_000_000_000), 1e-9));
        assert_eq!(Scalar::render(&r(6, 4), 4), "3/2");
        assert!(r(-1, 2).is_compound(4));
        assert!(!r(-3, 1).is_compound(4));
    }
}
