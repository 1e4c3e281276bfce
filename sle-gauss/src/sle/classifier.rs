use crate::field::Scalar;
use crate::sle::augmented::Augmented;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use std::fmt;

/// Solution status of a single-right-hand-side system.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Unique,
    Infinite,
    Inconsistent,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Unique => write!(f, "unique"),
            Status::Infinite => write!(f, "infinite"),
            Status::Inconsistent => write!(f, "inconsistent"),
        }
    }
}

/// Classification of a reduced system. Immutable once derived.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub status: Status,
    pub consistent: bool,
    /// Rank of the coefficient part.
    pub rank: usize,
    /// Number of equations, `m`.
    pub rows: usize,
    /// Number of variables, `n`.
    pub variables: usize,
    /// Distinct pivot columns in increasing order; `rank` is their count.
    pub pivot_columns: Vec<usize>,
}

/// Classifies a matrix in reduced row-echelon form.
///
/// The pivot columns are recomputed from the matrix itself (first
/// non-negligible coefficient of each row) instead of being taken from the
/// reduction trace. They are reported for inconsistent systems as well.
pub fn classify<S: Scalar>(rref: &Augmented<S>, tolerance: f64) -> Classification {
    let rows = rref.row_count();
    let variables = rref.variable_count();

    let inconsistent = (0..rows).any(|row| {
        rref.leading_column(row, tolerance).is_none() && !rref.rhs(row).is_negligible(tolerance)
    });

    let pivot_columns: Vec<usize> = (0..rows)
        .filter_map(|row| rref.leading_column(row, tolerance))
        .sorted_unstable()
        .dedup()
        .collect();
    let rank = pivot_columns.len();

    let status = if inconsistent {
        Status::Inconsistent
    } else if rank == variables {
        Status::Unique
    } else {
        Status::Infinite
    };

    Classification {
        status,
        consistent: status != Status::Inconsistent,
        rank,
        rows,
        variables,
        pivot_columns,
    }
}
