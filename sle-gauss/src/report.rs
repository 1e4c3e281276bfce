//! Mode-dispatching entry points returning serializable reports.
//!
//! Callers hand over raw `f64` input and a [`SolverConfig`]; the configured
//! [`NumberMode`] picks the scalar type the engine runs on.

use crate::config::{NumberMode, SolverConfig};
use crate::errors::SLEError;
use crate::field::{Rational, Scalar};
use crate::matrix_equation::{MatrixEquation, OverallClassification};
use crate::sle::{Classification, Gauss, PivotEntry, Status, Step};

use serde::{Deserialize, Serialize};

/// Everything a presentation layer needs about one solved system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemReport {
    pub mode: NumberMode,
    pub status: Status,
    pub classification: Classification,
    pub solution: Vec<String>,
    pub steps: Vec<Step>,
    pub pivot_report: Vec<PivotEntry>,
    pub pivot_lines: Vec<String>,
    /// Rendered reduced row-echelon form, coefficients then right-hand side.
    pub reduced_matrix: Vec<Vec<String>>,
    pub reduced_rhs: Vec<String>,
    /// Largest `|A·x - b|` entry, present for unique solutions.
    pub max_residual: Option<f64>,
}

impl SystemReport {
    fn from_engine<S: Scalar>(gauss: &Gauss<S>) -> Result<Self, SLEError> {
        let config = gauss.config();
        let classification = gauss.get_classification().cloned().ok_or_else(|| {
            SLEError::InvalidParameters("Report requested before solving".to_string())
        })?;
        let (reduced_matrix, reduced_rhs) = gauss
            .get_reduced_matrix()
            .map(|rref| rref.snapshot(config.decimal_places))
            .unwrap_or_default();

        Ok(Self {
            mode: config.mode,
            status: classification.status,
            classification,
            solution: gauss.get_formatted_solution(),
            steps: gauss.get_steps().to_vec(),
            pivot_report: gauss.get_pivot_report().to_vec(),
            pivot_lines: gauss.get_pivot_lines(),
            reduced_matrix,
            reduced_rhs,
            max_residual: gauss.max_residual(),
        })
    }

    pub fn to_json(&self) -> Result<String, SLEError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Per-column reports of `A·X = B` plus their aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquationReport {
    pub mode: NumberMode,
    pub columns: Vec<SystemReport>,
    pub overall: OverallClassification,
}

impl EquationReport {
    fn from_equation<S: Scalar>(equation: &MatrixEquation<S>) -> Result<Self, SLEError> {
        let columns = (0..equation.column_count())
            .filter_map(|j| equation.column_engine(j))
            .map(SystemReport::from_engine)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            mode: equation.config().mode,
            columns,
            overall: equation.get_overall_classification(),
        })
    }

    pub fn to_json(&self) -> Result<String, SLEError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Solves `coefficients · x = rhs` in the configured mode.
pub fn solve_system(
    coefficients: &[Vec<f64>],
    rhs: &[f64],
    config: &SolverConfig,
) -> Result<SystemReport, SLEError> {
    match config.mode {
        NumberMode::Rational => run_system::<Rational>(coefficients, rhs, config),
        NumberMode::Floating => run_system::<f64>(coefficients, rhs, config),
    }
}

/// Solves `a · X = b` column by column in the configured mode.
pub fn solve_matrix_equation(
    a: &[Vec<f64>],
    b: &[Vec<f64>],
    config: &SolverConfig,
) -> Result<EquationReport, SLEError> {
    match config.mode {
        NumberMode::Rational => {
            let equation = MatrixEquation::<Rational>::try_from_f64(a, b, config.clone())?;
            EquationReport::from_equation(&equation)
        }
        NumberMode::Floating => {
            let equation = MatrixEquation::<f64>::try_from_f64(a, b, config.clone())?;
            EquationReport::from_equation(&equation)
        }
    }
}

fn run_system<S: Scalar>(
    coefficients: &[Vec<f64>],
    rhs: &[f64],
    config: &SolverConfig,
) -> Result<SystemReport, SLEError> {
    let mut gauss = Gauss::<S>::try_from_f64(coefficients, rhs, config.clone())?;
    gauss.solve();
    SystemReport::from_engine(&gauss)
}
