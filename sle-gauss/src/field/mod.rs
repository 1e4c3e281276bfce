//! # Field Module
//!
//! The scalar types the engine computes with. Both implement [`Scalar`], which
//! carries the arithmetic, the zero test and the formatter of one numeric mode:
//! [`Rational`] for exact fractions and `f64` for the floating companion mode.

pub mod float;
pub mod helper;
pub mod matrix_ops;
pub mod rational;

use crate::config::{NumberMode, SolverConfig};
use crate::errors::SLEError;

use num_traits::{One, Zero};

use std::fmt;
use std::ops::{Div, Neg, Sub};

/// Represents a mathematical vector of scalars.
pub type Vector<S> = Vec<S>;
/// Represents a mathematical matrix as a vector of rows.
pub type Matrix<S> = Vec<Vec<S>>;

pub use rational::Rational;

/// A field element the reduction engine can work with.
///
/// Implementations decide what "effectively zero" means and how a value is
/// shown to a reader; the engine never inspects which implementation it runs on.
pub trait Scalar:
    Clone
    + fmt::Debug
    + PartialEq
    + PartialOrd
    + Zero
    + One
    + Sub<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    /// The numeric mode this representation implements.
    const MODE: NumberMode;

    /// Exact conversion of an integer.
    fn from_integer(value: i64) -> Self;

    /// Conversion of a floating input under the given configuration.
    fn try_from_f64(value: f64, config: &SolverConfig) -> Result<Self, SLEError>;

    /// Absolute value.
    fn magnitude(&self) -> Self;

    /// Whether the value counts as zero for pivoting and elimination decisions.
    fn is_negligible(&self, tolerance: f64) -> bool;

    fn is_negative(&self) -> bool;

    /// Nearest `f64`, for residual checks and reports.
    fn approx_f64(&self) -> f64;

    /// Human-readable rendering: an integer when integral, otherwise the
    /// natural form of the representation.
    fn render(&self, decimal_places: usize) -> String;

    /// Whether the rendering is a compound form (a fraction or a decimal)
    /// that needs parentheses when used as a coefficient.
    fn is_compound(&self, decimal_places: usize) -> bool {
        let rendered = self.magnitude().render(decimal_places);
        rendered.contains('/') || rendered.contains('.')
    }
}
