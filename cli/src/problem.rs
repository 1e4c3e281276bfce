use serde::Deserialize;
use sle_gauss::SolverConfig;

/// Right-hand side of a problem file: one column `b` or a matrix `B`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RightHandSide {
    Vector(Vec<f64>),
    Matrix(Vec<Vec<f64>>),
}

/// A JSON problem file.
///
/// ```json
/// { "coefficients": [[2, 1], [1, 1]], "rhs": [3, 2], "config": { "mode": "rational" } }
/// ```
#[derive(Debug, Deserialize)]
pub struct Problem {
    pub coefficients: Vec<Vec<f64>>,
    pub rhs: RightHandSide,
    #[serde(default)]
    pub config: SolverConfig,
}

impl Problem {
    pub fn from_json(json: &str) -> Result<Self, sle_gauss::SLEError> {
        let problem: Self = serde_json::from_str(json)?;
        problem.config.validate()?;

        Ok(problem)
    }
}
