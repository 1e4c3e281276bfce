//! Augmented matrix storage and the three elementary row operations.

use crate::field::{Matrix, Scalar};

/// An `m × (n + 1)` matrix whose last column holds the right-hand side.
#[derive(Debug, Clone, PartialEq)]
pub struct Augmented<S> {
    rows: Matrix<S>,
    variables: usize,
}

impl<S: Scalar> Augmented<S> {
    /// Builds an owned augmented matrix from already validated parts.
    pub fn from_parts(coefficients: &[Vec<S>], rhs: &[S]) -> Self {
        let variables = coefficients.first().map_or(0, Vec::len);
        let rows = coefficients
            .iter()
            .zip(rhs.iter())
            .map(|(row, value)| {
                let mut augmented = Vec::with_capacity(variables + 1);
                augmented.extend(row.iter().cloned());
                augmented.push(value.clone());
                augmented
            })
            .collect();

        Self { rows, variables }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of coefficient columns, `n`.
    pub fn variable_count(&self) -> usize {
        self.variables
    }

    pub fn get(&self, row: usize, column: usize) -> &S {
        &self.rows[row][column]
    }

    pub fn rhs(&self, row: usize) -> &S {
        &self.rows[row][self.variables]
    }

    pub fn coefficients(&self, row: usize) -> &[S] {
        &self.rows[row][..self.variables]
    }

    /// First coefficient column of `row` holding a non-negligible entry.
    pub fn leading_column(&self, row: usize, tolerance: f64) -> Option<usize> {
        self.coefficients(row)
            .iter()
            .position(|value| !value.is_negligible(tolerance))
    }

    pub fn swap_rows(&mut self, first: usize, second: usize) {
        self.rows.swap(first, second);
    }

    /// Multiplies `row` by `factor`; the entry at `pivot_column` is then set
    /// to exactly one.
    pub fn scale_row(&mut self, row: usize, factor: &S, pivot_column: usize) {
        for value in self.rows[row].iter_mut() {
            *value = value.clone() * factor.clone();
        }
        self.rows[row][pivot_column] = S::one();
    }

    /// `target ← target − factor · source`; the entry at `column` is then set
    /// to exactly zero.
    pub fn subtract_multiple(&mut self, target: usize, source: usize, factor: &S, column: usize) {
        let source_row = self.rows[source].clone();
        for (value, source_value) in self.rows[target].iter_mut().zip(source_row) {
            *value = value.clone() - factor.clone() * source_value;
        }
        self.rows[target][column] = S::zero();
    }

    /// Rendered copy of the coefficients and of the right-hand side.
    pub fn snapshot(&self, decimal_places: usize) -> (Vec<Vec<String>>, Vec<String>) {
        let matrix = (0..self.row_count())
            .map(|row| {
                self.coefficients(row)
                    .iter()
                    .map(|value| value.render(decimal_places))
                    .collect()
            })
            .collect();
        let rhs = (0..self.row_count())
            .map(|row| self.rhs(row).render(decimal_places))
            .collect();

        (matrix, rhs)
    }
}
