use crate::errors::SLEError;
use crate::field::{Matrix, Scalar, Vector};

/// A·x where A is an m×n matrix and x is a length–n vector.
/// Returns an m‐vector.
pub fn matrix_vector_mul<S: Scalar>(a: &Matrix<S>, x: &Vector<S>) -> Result<Vector<S>, SLEError> {
    let m = a.len();
    if m == 0 {
        return Ok(Vec::new());
    }
    let n = a[0].len();
    if x.len() != n {
        return Err(SLEError::DimensionMismatch(format!(
            "Matrix columns ({}) must match vector length ({})",
            n,
            x.len()
        )));
    }

    let mut y = Vec::with_capacity(m);
    for (i, row) in a.iter().enumerate() {
        if row.len() != n {
            return Err(SLEError::DimensionMismatch(format!(
                "Row {} has length {} but expected {}",
                i,
                row.len(),
                n
            )));
        }
        let sum = row
            .iter()
            .zip(x.iter())
            .fold(S::zero(), |acc, (aij, xj)| acc + aij.clone() * xj.clone());
        y.push(sum);
    }
    Ok(y)
}

/// Computes the vector difference `c = a - b`.
///
/// # Errors
///
/// Returns `SLEError::DimensionMismatch` if the vectors have different lengths.
pub fn vector_sub<S: Scalar>(a: &Vector<S>, b: &Vector<S>) -> Result<Vector<S>, SLEError> {
    if a.len() != b.len() {
        return Err(SLEError::DimensionMismatch(format!(
            "Vector lengths must match for subtraction ({} vs {})",
            a.len(),
            b.len()
        )));
    }
    Ok(a.iter()
        .zip(b.iter())
        .map(|(x, y)| x.clone() - y.clone())
        .collect())
}

/// Computes the matrix product `C = AB`.
///
/// # Errors
///
/// Returns `SLEError::DimensionMismatch` if the inner dimensions of the matrices do not match
/// or if rows within the matrices have inconsistent lengths.
pub fn matrix_mul<S: Scalar>(a: &Matrix<S>, b: &Matrix<S>) -> Result<Matrix<S>, SLEError> {
    let n = a.len(); // rows in A
    if n == 0 {
        return Ok(Matrix::new());
    }
    let m_common = a[0].len(); // cols in A
    if b.len() != m_common {
        return Err(SLEError::DimensionMismatch(format!(
            "Inner dimensions must match for matrix multiplication ({} vs {})",
            m_common,
            b.len()
        )));
    }
    let p = b.first().map_or(0, |row| row.len()); // cols in B
    if let Some(k) = b.iter().position(|row| row.len() != p) {
        return Err(SLEError::DimensionMismatch(format!(
            "Matrix B row {} has incorrect length (expected {})",
            k, p
        )));
    }

    let mut c = Vec::with_capacity(n);
    for (i, row) in a.iter().enumerate() {
        if row.len() != m_common {
            return Err(SLEError::DimensionMismatch(format!(
                "Matrix A row {} has incorrect length (expected {})",
                i, m_common
            )));
        }
        let c_row = (0..p)
            .map(|j| {
                row.iter()
                    .zip(b.iter())
                    .fold(S::zero(), |acc, (aik, b_row)| acc + aik.clone() * b_row[j].clone())
            })
            .collect();
        c.push(c_row);
    }
    Ok(c)
}

/// Extracts column `j` of a matrix.
///
/// # Errors
///
/// Returns `SLEError::DimensionMismatch` if some row is too short.
pub fn column<S: Scalar>(matrix: &Matrix<S>, j: usize) -> Result<Vector<S>, SLEError> {
    matrix
        .iter()
        .enumerate()
        .map(|(i, row)| {
            row.get(j).cloned().ok_or_else(|| {
                SLEError::DimensionMismatch(format!("Row {} has no column {}", i, j))
            })
        })
        .collect()
}
