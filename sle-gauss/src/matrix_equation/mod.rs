//! # Matrix Equation Module
//!
//! Solves `A·X = B` column by column. Every column of `B` gets its own
//! [`Gauss`] engine holding a private copy of `A`, so the columns share no
//! state; the per-column results are then aggregated into an
//! [`OverallClassification`].

use crate::config::SolverConfig;
use crate::errors::SLEError;
use crate::field::helper::{try_map_matrix, validate_rectangular};
use crate::field::matrix_ops::{column, matrix_mul, vector_sub};
use crate::field::{Matrix, Scalar};
use crate::sle::{Classification, Gauss, PivotEntry, Solution, Status, Step};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use std::fmt;

/// Aggregate status over all right-hand-side columns.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    Unique,
    Infinite,
    Inconsistent,
    /// The columns do not share a status.
    Mixed,
}

impl From<Status> for OverallStatus {
    fn from(status: Status) -> Self {
        match status {
            Status::Unique => OverallStatus::Unique,
            Status::Infinite => OverallStatus::Infinite,
            Status::Inconsistent => OverallStatus::Inconsistent,
        }
    }
}

impl fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverallStatus::Unique => write!(f, "unique"),
            OverallStatus::Infinite => write!(f, "infinite"),
            OverallStatus::Inconsistent => write!(f, "inconsistent"),
            OverallStatus::Mixed => write!(f, "mixed"),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct OverallClassification {
    /// True only if every column is consistent.
    pub consistent: bool,
    pub status: OverallStatus,
    /// Common rank of the columns; `None` when they disagree.
    pub rank: Option<usize>,
    pub rank_agreement: bool,
    /// Taken from the first column.
    pub variables: usize,
}

#[derive(Debug, Clone)]
pub struct MatrixEquation<S: Scalar> {
    config: SolverConfig,
    coefficients: Matrix<S>,
    rhs: Matrix<S>,
    columns: Vec<Gauss<S>>,
}

impl<S: Scalar> MatrixEquation<S> {
    /// Validates `A` and `B`, then solves one system per column of `B`.
    ///
    /// # Errors
    ///
    /// - the errors of [`Gauss::try_with`] for `A` and the configuration,
    /// - `SLEError::EmptyRightHandSide` if `B` has no row or no column,
    /// - `SLEError::RaggedRows` if rows of `B` differ in length,
    /// - `SLEError::RhsLengthMismatch` if `B` and `A` have different row counts.
    pub fn try_with(a: &[Vec<S>], b: &[Vec<S>], config: SolverConfig) -> Result<Self, SLEError> {
        let (rows, _) = validate_rectangular(a)?;
        let (rhs_rows, rhs_columns) = match validate_rectangular(b) {
            Err(SLEError::EmptyMatrix) => return Err(SLEError::EmptyRightHandSide),
            other => other?,
        };
        if rhs_rows != rows {
            return Err(SLEError::RhsLengthMismatch {
                rows,
                rhs: rhs_rows,
            });
        }

        let coefficients = a.to_vec();
        let rhs = b.to_vec();
        let mut columns = Vec::with_capacity(rhs_columns);
        for j in 0..rhs_columns {
            let mut gauss = Gauss::try_with(a, &column(&rhs, j)?, config.clone())?;
            gauss.solve();
            columns.push(gauss);
        }

        log::debug!(
            "Solved matrix equation with {} right-hand side(s)",
            columns.len()
        );

        Ok(Self {
            config,
            coefficients,
            rhs,
            columns,
        })
    }

    /// Shape is validated before any floating value is converted.
    pub fn try_from_f64(
        a: &[Vec<f64>],
        b: &[Vec<f64>],
        config: SolverConfig,
    ) -> Result<Self, SLEError> {
        validate_rectangular(a)?;
        match validate_rectangular(b) {
            Err(SLEError::EmptyMatrix) => return Err(SLEError::EmptyRightHandSide),
            other => other?,
        };
        Gauss::<S>::check_config(&config)?;

        let convert = |value: &f64| S::try_from_f64(*value, &config);
        let a = try_map_matrix(a, &convert)?;
        let b = try_map_matrix(b, &convert)?;

        Self::try_with(&a, &b, config)
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Number of right-hand-side columns, `k`.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// The engine that solved column `j`.
    pub fn column_engine(&self, j: usize) -> Option<&Gauss<S>> {
        self.columns.get(j)
    }

    pub fn get_solutions(&self) -> Vec<&Solution<S>> {
        self.columns
            .iter()
            .filter_map(|gauss| gauss.get_solution())
            .collect()
    }

    pub fn get_formatted_solutions(&self) -> Vec<Vec<String>> {
        self.columns
            .iter()
            .map(|gauss| gauss.get_formatted_solution())
            .collect()
    }

    pub fn get_all_steps(&self) -> Vec<&[Step]> {
        self.columns.iter().map(|gauss| gauss.get_steps()).collect()
    }

    pub fn get_all_classifications(&self) -> Vec<&Classification> {
        self.columns
            .iter()
            .filter_map(|gauss| gauss.get_classification())
            .collect()
    }

    pub fn get_all_pivot_reports(&self) -> Vec<&[PivotEntry]> {
        self.columns
            .iter()
            .map(|gauss| gauss.get_pivot_report())
            .collect()
    }

    pub fn get_overall_classification(&self) -> OverallClassification {
        let classifications = self.get_all_classifications();

        let consistent = classifications.iter().all(|c| c.consistent);
        let status = if classifications.iter().map(|c| c.status).all_equal() {
            classifications
                .first()
                .map_or(OverallStatus::Mixed, |c| c.status.into())
        } else {
            OverallStatus::Mixed
        };

        let rank_agreement = classifications.iter().map(|c| c.rank).all_equal();
        if !rank_agreement {
            log::warn!(
                "Right-hand sides disagree on the rank: {:?}",
                classifications.iter().map(|c| c.rank).collect::<Vec<_>>()
            );
        }
        let rank = classifications
            .first()
            .filter(|_| rank_agreement)
            .map(|c| c.rank);

        OverallClassification {
            consistent,
            status,
            rank,
            rank_agreement,
            variables: classifications.first().map_or(0, |c| c.variables),
        }
    }

    /// `A·X - B` for a candidate `n×k` solution matrix `X`.
    pub fn residual(&self, x: &Matrix<S>) -> Result<Matrix<S>, SLEError> {
        let product = matrix_mul(&self.coefficients, x)?;
        if product.first().map(Vec::len) != self.rhs.first().map(Vec::len) {
            return Err(SLEError::DimensionMismatch(format!(
                "Solution matrix must have {} columns",
                self.columns.len()
            )));
        }

        product
            .iter()
            .zip(&self.rhs)
            .map(|(row, rhs_row)| vector_sub(row, rhs_row))
            .collect()
    }

    /// `X` as an `n×k` matrix when every column has a unique solution.
    pub fn solution_matrix(&self) -> Option<Matrix<S>> {
        let columns: Vec<&Vec<S>> = self
            .get_solutions()
            .into_iter()
            .map(|solution| match solution {
                Solution::Unique(values) => Some(values),
                _ => None,
            })
            .collect::<Option<_>>()?;

        let variables = columns.first()?.len();
        Some(
            (0..variables)
                .map(|i| columns.iter().map(|values| values[i].clone()).collect())
                .collect(),
        )
    }
}
