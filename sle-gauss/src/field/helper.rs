use crate::errors::SLEError;
use crate::field::{Matrix, Vector};

/// Maps each element of a matrix using a fallible mapping function.
///
/// # Arguments
/// * `matrix` - The input matrix to transform
/// * `mapper` - A function that maps each element
///
/// # Returns
/// A new matrix with each element transformed, or the first mapping error
pub fn try_map_matrix<T, S>(
    matrix: &[Vec<T>],
    mapper: &dyn Fn(&T) -> Result<S, SLEError>,
) -> Result<Matrix<S>, SLEError> {
    matrix
        .iter()
        .map(|row| try_map_vector(row, mapper))
        .collect()
}

/// Maps each element of a vector using a fallible mapping function.
pub fn try_map_vector<T, S>(
    vector: &[T],
    mapper: &dyn Fn(&T) -> Result<S, SLEError>,
) -> Result<Vector<S>, SLEError> {
    vector.iter().map(mapper).collect()
}

/// Checks that `matrix` is a non-empty rectangle and returns `(rows, columns)`.
pub fn validate_rectangular<T>(matrix: &[Vec<T>]) -> Result<(usize, usize), SLEError> {
    let columns = match matrix.first() {
        Some(first) if !first.is_empty() => first.len(),
        _ => return Err(SLEError::EmptyMatrix),
    };

    if let Some((row, found)) = matrix
        .iter()
        .map(Vec::len)
        .enumerate()
        .find(|&(_, len)| len != columns)
    {
        return Err(SLEError::RaggedRows {
            row,
            expected: columns,
            found,
        });
    }

    Ok((matrix.len(), columns))
}

/// Shape check for `coefficients · x = rhs`, run before any conversion or reduction.
pub fn validate_system<T, U>(coefficients: &[Vec<T>], rhs: &[U]) -> Result<(usize, usize), SLEError> {
    let (rows, columns) = validate_rectangular(coefficients)?;
    if rhs.len() != rows {
        return Err(SLEError::RhsLengthMismatch {
            rows,
            rhs: rhs.len(),
        });
    }

    Ok((rows, columns))
}
