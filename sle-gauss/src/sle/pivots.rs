use crate::config::SolverConfig;
use crate::field::Scalar;
use crate::sle::augmented::Augmented;

use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum PivotRole {
    Pivot { row: usize },
    Free,
}

/// Role of one coefficient column in the reduced system.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PivotEntry {
    pub column: usize,
    #[serde(flatten)]
    pub role: PivotRole,
}

impl PivotEntry {
    pub fn is_pivot(&self) -> bool {
        matches!(self.role, PivotRole::Pivot { .. })
    }

    /// `x1: pivot in row 1` or `x2: free variable`.
    pub fn describe(&self, config: &SolverConfig) -> String {
        let variable = config.variable_name(self.column);
        match self.role {
            PivotRole::Pivot { row } => format!("{}: pivot in row {}", variable, row + 1),
            PivotRole::Free => format!("{}: free variable", variable),
        }
    }
}

/// Scans the reduced matrix row by row and gives the first non-negligible
/// column of each row that row as its pivot row. Unclaimed columns are free.
pub fn pivot_report<S: Scalar>(rref: &Augmented<S>, tolerance: f64) -> Vec<PivotEntry> {
    let mut roles = vec![PivotRole::Free; rref.variable_count()];

    for row in 0..rref.row_count() {
        let Some(column) = rref.leading_column(row, tolerance) else {
            continue;
        };
        if roles[column] == PivotRole::Free {
            roles[column] = PivotRole::Pivot { row };
        }
    }

    roles
        .into_iter()
        .enumerate()
        .map(|(column, role)| PivotEntry { column, role })
        .collect()
}

/// Columns a report marks as pivots, in increasing order.
pub fn pivot_columns(report: &[PivotEntry]) -> Vec<usize> {
    report
        .iter()
        .filter(|entry| entry.is_pivot())
        .map(|entry| entry.column)
        .collect()
}
