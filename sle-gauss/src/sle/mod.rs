//! # SLE Module
//!
//! Solves a system of linear equations `A·x = b` by Gauss–Jordan reduction.
//!
//! [`Gauss`] owns a private copy of the system. [`Gauss::solve`] reduces it,
//! classifies it, builds the (possibly parametric) solution and the pivot
//! report; the `get_*` queries then expose those results read-only.
//! Degenerate systems are ordinary outcomes, reported through [`Status`].

pub mod augmented;
pub mod classifier;
pub mod expression;
pub mod pivots;
pub mod reducer;

pub use augmented::Augmented;
pub use classifier::{Classification, Status, classify};
pub use expression::{Expression, Parameter, ParametricSolution, Solution, Term, build_solution};
pub use pivots::{PivotEntry, PivotRole, pivot_columns, pivot_report};
pub use reducer::{PivotPosition, Reducer, Reduction, Step, StepKind};

use crate::config::SolverConfig;
use crate::errors::SLEError;
use crate::field::helper::{try_map_matrix, try_map_vector, validate_system};
use crate::field::matrix_ops::{matrix_vector_mul, vector_sub};
use crate::field::{Matrix, Rational, Scalar, Vector};

/// Result of [`Gauss::solve`]; `solution` is `None` for inconsistent systems.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveOutcome<S> {
    pub status: Status,
    pub classification: Classification,
    pub solution: Option<Solution<S>>,
}

/// Everything derived by one solve. Replaced wholesale on every solve.
#[derive(Debug, Clone)]
struct Solved<S> {
    reduction: Reduction<S>,
    classification: Classification,
    pivot_report: Vec<PivotEntry>,
    solution: Solution<S>,
}

#[derive(Debug, Clone)]
pub struct Gauss<S: Scalar> {
    config: SolverConfig,
    coefficients: Matrix<S>,
    rhs: Vector<S>,
    solved: Option<Solved<S>>,
}

/// Exact solver.
pub type ExactGauss = Gauss<Rational>;
/// Floating companion solver.
pub type FloatingGauss = Gauss<f64>;

impl<S: Scalar> Gauss<S> {
    /// Validates the system and takes a private copy of it.
    ///
    /// # Errors
    ///
    /// - `SLEError::EmptyMatrix` if there is no row or no column,
    /// - `SLEError::RaggedRows` if rows differ in length,
    /// - `SLEError::RhsLengthMismatch` if `rhs` does not have one entry per row,
    /// - `SLEError::InvalidParameters` if the configuration is invalid or its
    ///   mode does not match the scalar type.
    pub fn try_with(
        coefficients: &[Vec<S>],
        rhs: &[S],
        config: SolverConfig,
    ) -> Result<Self, SLEError> {
        validate_system(coefficients, rhs)?;
        Self::check_config(&config)?;

        Ok(Self {
            config,
            coefficients: coefficients.to_vec(),
            rhs: rhs.to_vec(),
            solved: None,
        })
    }

    /// Converts floating input with [`Scalar::try_from_f64`] after validating its shape.
    pub fn try_from_f64(
        coefficients: &[Vec<f64>],
        rhs: &[f64],
        config: SolverConfig,
    ) -> Result<Self, SLEError> {
        validate_system(coefficients, rhs)?;
        Self::check_config(&config)?;

        let convert = |value: &f64| S::try_from_f64(*value, &config);
        let coefficients = try_map_matrix(coefficients, &convert)?;
        let rhs = try_map_vector(rhs, &convert)?;

        Self::try_with(&coefficients, &rhs, config)
    }

    pub fn try_from_i64(
        coefficients: &[Vec<i64>],
        rhs: &[i64],
        config: SolverConfig,
    ) -> Result<Self, SLEError> {
        validate_system(coefficients, rhs)?;

        let convert = |value: &i64| Ok::<S, SLEError>(S::from_integer(*value));
        let coefficients = try_map_matrix(coefficients, &convert)?;
        let rhs = try_map_vector(rhs, &convert)?;

        Self::try_with(&coefficients, &rhs, config)
    }

    pub(crate) fn check_config(config: &SolverConfig) -> Result<(), SLEError> {
        config.validate()?;
        if config.mode != S::MODE {
            return Err(SLEError::InvalidParameters(format!(
                "Configured mode {:?} does not match the {:?} scalar type",
                config.mode,
                S::MODE
            )));
        }

        Ok(())
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Number of equations and variables, `(m, n)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.coefficients.len(), self.coefficients[0].len())
    }

    /// Runs the full reduction. Every result of a previous solve is discarded first.
    pub fn solve(&mut self) -> SolveOutcome<S> {
        self.solved = None;

        let (rows, variables) = self.dimensions();
        let tolerance = self.config.tolerance;
        log::debug!(
            "Solving {}x{} system in {:?} mode",
            rows,
            variables,
            self.config.mode
        );

        let reduction = Reducer::new(&self.coefficients, &self.rhs, &self.config).reduce();
        let classification = classify(&reduction.reduced, tolerance);
        let pivot_report = pivot_report(&reduction.reduced, tolerance);

        let traced: Vec<usize> = reduction.pivots.iter().map(|p| p.column).collect();
        if traced != classification.pivot_columns {
            log::error!(
                "Pivot columns of the reduction {:?} disagree with the reduced matrix {:?}",
                traced,
                classification.pivot_columns
            );
        }

        let solution = build_solution(&reduction.reduced, &classification, &self.config);
        log::debug!(
            "System is {} (rank {}, {} steps)",
            classification.status,
            classification.rank,
            reduction.steps.len()
        );

        let outcome = SolveOutcome {
            status: classification.status,
            classification: classification.clone(),
            solution: (classification.status != Status::Inconsistent).then(|| solution.clone()),
        };

        self.solved = Some(Solved {
            reduction,
            classification,
            pivot_report,
            solution,
        });

        outcome
    }

    pub fn is_solved(&self) -> bool {
        self.solved.is_some()
    }

    /// Reduction trace; empty until [`Gauss::solve`] has run.
    pub fn get_steps(&self) -> &[Step] {
        self.solved
            .as_ref()
            .map(|solved| solved.reduction.steps.as_slice())
            .unwrap_or_default()
    }

    pub fn get_classification(&self) -> Option<&Classification> {
        self.solved.as_ref().map(|solved| &solved.classification)
    }

    pub fn get_pivot_report(&self) -> &[PivotEntry] {
        self.solved
            .as_ref()
            .map(|solved| solved.pivot_report.as_slice())
            .unwrap_or_default()
    }

    pub fn get_pivot_positions(&self) -> &[PivotPosition] {
        self.solved
            .as_ref()
            .map(|solved| solved.reduction.pivots.as_slice())
            .unwrap_or_default()
    }

    pub fn get_solution(&self) -> Option<&Solution<S>> {
        self.solved.as_ref().map(|solved| &solved.solution)
    }

    pub fn get_echelon_matrix(&self) -> Option<&Augmented<S>> {
        self.solved.as_ref().map(|solved| &solved.reduction.echelon)
    }

    pub fn get_reduced_matrix(&self) -> Option<&Augmented<S>> {
        self.solved.as_ref().map(|solved| &solved.reduction.reduced)
    }

    /// Human-readable solution lines; empty until solved.
    pub fn get_formatted_solution(&self) -> Vec<String> {
        self.get_solution()
            .map(|solution| solution.format_lines(&self.config))
            .unwrap_or_default()
    }

    /// `A·x - b` for a candidate solution `x`.
    ///
    /// # Errors
    ///
    /// Returns `SLEError::DimensionMismatch` if `x` does not have one entry per variable.
    pub fn residual(&self, x: &Vector<S>) -> Result<Vector<S>, SLEError> {
        let product = matrix_vector_mul(&self.coefficients, x)?;
        vector_sub(&product, &self.rhs)
    }

    /// Largest absolute residual of the unique solution; `None` otherwise.
    pub fn max_residual(&self) -> Option<f64> {
        let Some(Solution::Unique(values)) = self.get_solution() else {
            return None;
        };
        let residual = self.residual(values).ok()?;
        Some(
            residual
                .iter()
                .map(|value| value.approx_f64().abs())
                .fold(0.0, f64::max),
        )
    }

    /// `x1: pivot in row 1`, … one line per column.
    pub fn get_pivot_lines(&self) -> Vec<String> {
        self.get_pivot_report()
            .iter()
            .map(|entry| entry.describe(&self.config))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NumberMode;

    #[test]
    fn test_queries_are_empty_before_solve() -> Result<(), SLEError> {
        let gauss = ExactGauss::try_from_i64(&[vec![1, 2]], &[3], SolverConfig::default())?;
        assert!(!gauss.is_solved());
        assert!(gauss.get_steps().is_empty());
        assert!(gauss.get_classification().is_none());
        assert!(gauss.get_pivot_report().is_empty());
        assert!(gauss.get_formatted_solution().is_empty());
        Ok(())
    }

    #[test]
    fn test_validation() {
        let config = SolverConfig::default();
        assert!(matches!(
            ExactGauss::try_from_i64(&[], &[], config.clone()),
            Err(SLEError::EmptyMatrix)
        ));
        assert!(matches!(
            ExactGauss::try_from_i64(&[vec![1, 2], vec![3]], &[1, 2], config.clone()),
            Err(SLEError::RaggedRows { row: 1, .. })
        ));
        assert!(matches!(
            ExactGauss::try_from_i64(&[vec![1, 2]], &[1, 2], config),
            Err(SLEError::RhsLengthMismatch { rows: 1, rhs: 2 })
        ));
    }

    #[test]
    fn test_mode_mismatch_is_rejected() {
        let floating = SolverConfig {
            mode: NumberMode::Floating,
            ..SolverConfig::default()
        };
        assert!(matches!(
            ExactGauss::try_from_i64(&[vec![1]], &[1], floating.clone()),
            Err(SLEError::InvalidParameters(_))
        ));
        assert!(FloatingGauss::try_from_i64(&[vec![1]], &[1], floating).is_ok());
    }

    #[test]
    fn test_precision_error_from_floating_input() {
        let result = ExactGauss::try_from_f64(&[vec![1.5e-9]], &[1.0], SolverConfig::default());
        assert!(matches!(result, Err(SLEError::Precision { .. })));
    }

    #[test]
    fn test_shape_is_validated_before_conversion() {
        let result =
            ExactGauss::try_from_f64(&[vec![1.5e-9]], &[1.0, 2.0], SolverConfig::default());
        assert!(matches!(result, Err(SLEError::RhsLengthMismatch { .. })));
    }

    #[test]
    fn test_resolve_resets_state() -> Result<(), SLEError> {
        let mut gauss =
            ExactGauss::try_from_i64(&[vec![2, 1], vec![1, 1]], &[3, 2], SolverConfig::default())?;
        let first = gauss.solve();
        let first_steps = gauss.get_steps().to_vec();
        let second = gauss.solve();

        assert_eq!(first, second);
        assert_eq!(gauss.get_steps(), first_steps.as_slice());
        Ok(())
    }

    #[test]
    fn test_floating_solve() -> Result<(), SLEError> {
        let config = SolverConfig {
            mode: NumberMode::Floating,
            decimal_places: 2,
            ..SolverConfig::default()
        };
        let a = vec![vec![3.0, 0.0], vec![0.0, 4.0]];
        let mut gauss = FloatingGauss::try_from_f64(&a, &[1.0, 2.0], config)?;
        let outcome = gauss.solve();
        assert_eq!(outcome.status, Status::Unique);
        assert_eq!(gauss.get_formatted_solution(), vec!["x1 = 0.33", "x2 = 0.50"]);
        assert!(gauss.max_residual().is_some_and(|r| r < 1e-12));
        Ok(())
    }

    #[test]
    fn test_floating_rank_drops_within_tolerance() -> Result<(), SLEError> {
        let config = SolverConfig {
            mode: NumberMode::Floating,
            ..SolverConfig::default()
        };
        let a = vec![vec![1.0, 2.0], vec![2.0, 4.0 + 1e-12]];
        let mut gauss = FloatingGauss::try_from_f64(&a, &[3.0, 6.0], config)?;
        let outcome = gauss.solve();

        assert_eq!(outcome.status, Status::Infinite);
        assert_eq!(gauss.get_classification().map(|c| c.rank), Some(1));
        match outcome.solution {
            Some(Solution::Parametric(parametric)) => assert_eq!(parametric.parameters.len(), 1),
            other => panic!("expected a parametric solution, got {:?}", other),
        }
        assert_eq!(
            gauss.get_formatted_solution(),
            vec!["t1 is a free parameter (x2)", "x1 = 3 - 2*t1", "x2 = t1"]
        );
        Ok(())
    }

    #[test]
    fn test_inconsistent_outcome_has_no_solution() -> Result<(), SLEError> {
        let mut gauss =
            ExactGauss::try_from_i64(&[vec![1, 1], vec![2, 2]], &[1, 3], SolverConfig::default())?;
        let outcome = gauss.solve();
        assert_eq!(outcome.status, Status::Inconsistent);
        assert!(outcome.solution.is_none());
        assert_eq!(gauss.get_solution(), Some(&Solution::Inconsistent));
        assert_eq!(gauss.max_residual(), None);
        Ok(())
    }

    #[test]
    fn test_residual() -> Result<(), SLEError> {
        let gauss =
            ExactGauss::try_from_i64(&[vec![2, 1], vec![1, 1]], &[3, 2], SolverConfig::default())?;
        let x = vec![Rational::from_integer(1), Rational::from_integer(2)];
        assert_eq!(
            gauss.residual(&x)?,
            vec![Rational::from_integer(1), Rational::from_integer(1)]
        );
        assert!(gauss.residual(&vec![Rational::from_integer(1)]).is_err());
        Ok(())
    }
}
