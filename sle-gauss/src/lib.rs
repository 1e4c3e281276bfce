pub mod config;
pub mod errors;
pub mod field;
pub mod matrix_equation;
pub mod report;
pub mod sle;

pub use config::{NumberMode, SolverConfig};
pub use errors::SLEError;
pub use field::{Rational, Scalar};
pub use matrix_equation::MatrixEquation;
pub use sle::{ExactGauss, FloatingGauss, Gauss, Status};
