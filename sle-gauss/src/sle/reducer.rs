//! Gauss–Jordan reduction with partial pivoting and a replayable trace.
//!
//! The forward pass brings the augmented matrix to row-echelon form, choosing
//! in every column the remaining row of largest magnitude. The backward pass
//! then clears the entries above each pivot. Every elementary operation is
//! recorded as a [`Step`] carrying a rendered snapshot of the matrix.

use crate::config::SolverConfig;
use crate::field::Scalar;
use crate::sle::augmented::Augmented;

use serde::{Deserialize, Serialize};

/// Position of a pivot; a reduction's pivots increase strictly in both coordinates.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PivotPosition {
    pub row: usize,
    pub column: usize,
}

/// What a trace entry records. Row indices are zero-based.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepKind {
    Initial,
    Swap { first: usize, second: usize },
    Scale { row: usize, factor: String },
    Combine { target: usize, source: usize, factor: String },
    EchelonReached,
    ReducedReached,
}

impl StepKind {
    /// Milestones mark progress; they do not change the matrix.
    pub fn is_milestone(&self) -> bool {
        matches!(
            self,
            StepKind::Initial | StepKind::EchelonReached | StepKind::ReducedReached
        )
    }
}

/// One entry of the reduction trace.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub kind: StepKind,
    /// Human description, with one-based row labels (`R2 = R2 - 3 * R1`).
    pub description: String,
    /// Coefficients after the operation.
    pub matrix: Vec<Vec<String>>,
    /// Right-hand side after the operation.
    pub rhs: Vec<String>,
}

/// Everything a reduction produces.
#[derive(Debug, Clone)]
pub struct Reduction<S> {
    /// The matrix right after the forward pass.
    pub echelon: Augmented<S>,
    /// The final reduced row-echelon form.
    pub reduced: Augmented<S>,
    pub pivots: Vec<PivotPosition>,
    pub steps: Vec<Step>,
}

pub struct Reducer<'a, S: Scalar> {
    matrix: Augmented<S>,
    config: &'a SolverConfig,
    pivots: Vec<PivotPosition>,
    steps: Vec<Step>,
}

impl<'a, S: Scalar> Reducer<'a, S> {
    /// Takes an owned copy of `coefficients | rhs`; the caller's data is never touched.
    pub fn new(coefficients: &[Vec<S>], rhs: &[S], config: &'a SolverConfig) -> Self {
        Self::from_augmented(Augmented::from_parts(coefficients, rhs), config)
    }

    pub fn from_augmented(matrix: Augmented<S>, config: &'a SolverConfig) -> Self {
        Self {
            matrix,
            config,
            pivots: Vec::new(),
            steps: Vec::new(),
        }
    }

    pub fn reduce(mut self) -> Reduction<S> {
        self.record(StepKind::Initial, "Initial matrix".to_string());

        self.forward();
        let echelon = self.matrix.clone();
        self.record(StepKind::EchelonReached, "Echelon form reached".to_string());

        self.backward();
        self.record(StepKind::ReducedReached, "Reduced form reached".to_string());

        Reduction {
            echelon,
            reduced: self.matrix,
            pivots: self.pivots,
            steps: self.steps,
        }
    }

    fn forward(&mut self) {
        let rows = self.matrix.row_count();
        let tolerance = self.config.tolerance;
        let mut row = 0;

        for column in 0..self.matrix.variable_count() {
            if row == rows {
                break;
            }

            let (selected, magnitude) = self.select_pivot(row, column);
            if magnitude.is_negligible(tolerance) {
                // No pivot left in this column: it stays free.
                continue;
            }

            if selected != row {
                self.matrix.swap_rows(row, selected);
                self.record(
                    StepKind::Swap {
                        first: row,
                        second: selected,
                    },
                    format!("R{} <-> R{}", row + 1, selected + 1),
                );
            }

            let pivot = self.matrix.get(row, column).clone();
            if !pivot.is_one() || self.config.record_unit_scaling {
                let factor = S::one() / pivot;
                self.matrix.scale_row(row, &factor, column);
                let rendered = factor.render(self.config.decimal_places);
                self.record(
                    StepKind::Scale {
                        row,
                        factor: rendered.clone(),
                    },
                    format!("R{} = {} * R{}", row + 1, rendered, row + 1),
                );
            }

            for target in (row + 1)..rows {
                self.eliminate(target, row, column);
            }

            self.pivots.push(PivotPosition { row, column });
            row += 1;
        }
    }

    fn backward(&mut self) {
        let pivots = self.pivots.clone();
        for pivot in pivots.iter().rev() {
            for target in 0..pivot.row {
                self.eliminate(target, pivot.row, pivot.column);
            }
        }
    }

    /// Row in `start..` with the largest magnitude in `column`; the first one wins ties.
    fn select_pivot(&self, start: usize, column: usize) -> (usize, S) {
        let mut selected = start;
        let mut best = self.matrix.get(start, column).magnitude();
        for row in (start + 1)..self.matrix.row_count() {
            let magnitude = self.matrix.get(row, column).magnitude();
            if magnitude > best {
                selected = row;
                best = magnitude;
            }
        }

        (selected, best)
    }

    /// Clears `target`'s entry in `column` using the pivot row `source`,
    /// whose entry in `column` is one. Negligible entries are left alone.
    fn eliminate(&mut self, target: usize, source: usize, column: usize) {
        let factor = self.matrix.get(target, column).clone();
        if factor.is_negligible(self.config.tolerance) {
            return;
        }

        self.matrix.subtract_multiple(target, source, &factor, column);

        let decimal_places = self.config.decimal_places;
        let sign = if factor.is_negative() { '+' } else { '-' };
        self.record(
            StepKind::Combine {
                target,
                source,
                factor: factor.render(decimal_places),
            },
            format!(
                "R{} = R{} {} {} * R{}",
                target + 1,
                target + 1,
                sign,
                factor.magnitude().render(decimal_places),
                source + 1
            ),
        );
    }

    fn record(&mut self, kind: StepKind, description: String) {
        log::trace!("step {}: {}", self.steps.len(), description);
        let (matrix, rhs) = self.matrix.snapshot(self.config.decimal_places);
        self.steps.push(Step {
            kind,
            description,
            matrix,
            rhs,
        });
    }
}
