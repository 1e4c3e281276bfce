#[derive(thiserror::Error, Debug)]
pub enum SLEError {
    /// The coefficient matrix has no rows or no columns.
    #[error("EmptyMatrix: the coefficient matrix must have at least one row and one column")]
    EmptyMatrix,
    /// A coefficient row differs in length from the first row.
    #[error("RaggedRows: row {row} has length {found} but expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// The right-hand side does not have one entry per equation.
    #[error("RhsLengthMismatch: matrix has {rows} rows but the right-hand side has {rhs} entries")]
    RhsLengthMismatch { rows: usize, rhs: usize },
    /// A matrix right-hand side without any column.
    #[error("EmptyRightHandSide: the right-hand side matrix must have at least one column")]
    EmptyRightHandSide,
    #[error("DimensionMismatch: {0}")]
    DimensionMismatch(String),

    /// A floating input has no rational approximation within the configured bounds.
    #[error("PrecisionError: {value} has no rational approximation with denominator <= {max_denominator}")]
    Precision { value: f64, max_denominator: u64 },
    #[error("ZeroDenominator: a rational value cannot have a zero denominator")]
    ZeroDenominator,
    #[error("ParseNumber: {0}")]
    ParseNumber(String),

    #[error("InvalidParameters: {0}")]
    InvalidParameters(String),

    #[error("Data serialization: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl SLEError {
    /// Whether the error is an input-shape failure raised before any reduction work.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            SLEError::EmptyMatrix
                | SLEError::RaggedRows { .. }
                | SLEError::RhsLengthMismatch { .. }
                | SLEError::EmptyRightHandSide
                | SLEError::DimensionMismatch(_)
        )
    }
}
