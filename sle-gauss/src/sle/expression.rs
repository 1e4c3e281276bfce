//! Concrete and parametric solutions read off a reduced system.

use crate::config::SolverConfig;
use crate::errors::SLEError;
use crate::field::{Scalar, Vector};
use crate::sle::augmented::Augmented;
use crate::sle::classifier::{Classification, Status};

use serde::{Deserialize, Serialize};

/// A free column together with the parameter standing for it.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub column: usize,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Term<S> {
    pub parameter: String,
    pub coefficient: S,
}

/// `constant + Σ coefficient · parameter`; zero coefficients are not stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression<S> {
    pub constant: S,
    pub terms: Vec<Term<S>>,
}

impl<S: Scalar> Expression<S> {
    fn identity(parameter: &str) -> Self {
        Self {
            constant: S::zero(),
            terms: vec![Term {
                parameter: parameter.to_string(),
                coefficient: S::one(),
            }],
        }
    }

    /// Evaluates the expression; `value_of` maps a parameter name to its value.
    pub fn evaluate(&self, value_of: impl Fn(&str) -> Option<S>) -> Option<S> {
        self.terms.iter().try_fold(self.constant.clone(), |acc, term| {
            Some(acc + term.coefficient.clone() * value_of(term.parameter.as_str())?)
        })
    }

    /// Renders as `2 - t1`, `(1/2)*t1 + 3*t2`, or `0`.
    pub fn render(&self, config: &SolverConfig) -> String {
        let decimal_places = config.decimal_places;
        let mut rendered = String::new();
        if !self.constant.is_negligible(config.tolerance) || self.terms.is_empty() {
            rendered = self.constant.render(decimal_places);
        }

        for term in &self.terms {
            let magnitude = term.coefficient.magnitude();
            let shown = magnitude.render(decimal_places);
            let body = if magnitude.is_one() || shown == "1" {
                term.parameter.clone()
            } else if magnitude.is_compound(decimal_places) {
                format!("({})*{}", shown, term.parameter)
            } else {
                format!("{}*{}", shown, term.parameter)
            };

            let negative = term.coefficient.is_negative();
            if rendered.is_empty() {
                if negative {
                    rendered.push('-');
                }
            } else {
                rendered.push_str(if negative { " - " } else { " + " });
            }
            rendered.push_str(&body);
        }

        rendered
    }
}

/// General solution of a system with free variables.
#[derive(Debug, Clone, PartialEq)]
pub struct ParametricSolution<S> {
    /// Free columns in increasing order, named `t1, t2, …` in the same order.
    pub parameters: Vec<Parameter>,
    /// One expression per variable.
    pub expressions: Vec<Expression<S>>,
}

impl<S: Scalar> ParametricSolution<S> {
    /// Evaluates every variable for the given parameter values (in parameter order).
    ///
    /// # Errors
    ///
    /// Returns `SLEError::DimensionMismatch` if `values` has the wrong length.
    pub fn instantiate(&self, values: &[S]) -> Result<Vector<S>, SLEError> {
        if values.len() != self.parameters.len() {
            return Err(SLEError::DimensionMismatch(format!(
                "Expected {} parameter values, got {}",
                self.parameters.len(),
                values.len()
            )));
        }

        let value_of = |name: &str| {
            self.parameters
                .iter()
                .position(|parameter| parameter.name == name)
                .map(|index| values[index].clone())
        };

        self.expressions
            .iter()
            .enumerate()
            .map(|(column, expression)| {
                expression.evaluate(&value_of).ok_or_else(|| {
                    SLEError::DimensionMismatch(format!(
                        "Expression of variable {} refers to an unknown parameter",
                        column
                    ))
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Solution<S> {
    Unique(Vector<S>),
    Parametric(ParametricSolution<S>),
    Inconsistent,
}

impl<S: Scalar> Solution<S> {
    /// One line per parameter declaration, then one line per variable.
    pub fn format_lines(&self, config: &SolverConfig) -> Vec<String> {
        match self {
            Solution::Unique(values) => values
                .iter()
                .enumerate()
                .map(|(column, value)| {
                    format!(
                        "{} = {}",
                        config.variable_name(column),
                        value.render(config.decimal_places)
                    )
                })
                .collect(),
            Solution::Parametric(parametric) => {
                let declarations = parametric.parameters.iter().map(|parameter| {
                    format!(
                        "{} is a free parameter ({})",
                        parameter.name,
                        config.variable_name(parameter.column)
                    )
                });
                let assignments = parametric.expressions.iter().enumerate().map(|(column, e)| {
                    format!("{} = {}", config.variable_name(column), e.render(config))
                });
                declarations.chain(assignments).collect()
            }
            Solution::Inconsistent => {
                vec!["The system is inconsistent: no solution exists".to_string()]
            }
        }
    }
}

/// Builds the solution described by `classification` from the reduced matrix.
pub fn build_solution<S: Scalar>(
    rref: &Augmented<S>,
    classification: &Classification,
    config: &SolverConfig,
) -> Solution<S> {
    let tolerance = config.tolerance;
    let variables = rref.variable_count();

    let mut pivot_rows: Vec<Option<usize>> = vec![None; variables];
    for row in 0..rref.row_count() {
        if let Some(column) = rref.leading_column(row, tolerance) {
            pivot_rows[column].get_or_insert(row);
        }
    }

    match classification.status {
        Status::Inconsistent => Solution::Inconsistent,
        Status::Unique => Solution::Unique(
            pivot_rows
                .iter()
                .map(|pivot_row| pivot_row.map_or_else(S::zero, |row| rref.rhs(row).clone()))
                .collect(),
        ),
        Status::Infinite => {
            let parameters: Vec<Parameter> = pivot_rows
                .iter()
                .enumerate()
                .filter(|(_, pivot_row)| pivot_row.is_none())
                .enumerate()
                .map(|(index, (column, _))| Parameter {
                    column,
                    name: config.parameter_name(index),
                })
                .collect();

            let expressions = pivot_rows
                .iter()
                .enumerate()
                .map(|(column, pivot_row)| match pivot_row {
                    None => {
                        let own = parameters
                            .iter()
                            .find(|parameter| parameter.column == column)
                            .map_or("", |parameter| parameter.name.as_str());
                        Expression::identity(own)
                    }
                    Some(row) => Expression {
                        constant: rref.rhs(*row).clone(),
                        terms: parameters
                            .iter()
                            .filter_map(|parameter| {
                                let entry = rref.get(*row, parameter.column);
                                (!entry.is_negligible(tolerance)).then(|| Term {
                                    parameter: parameter.name.clone(),
                                    coefficient: -entry.clone(),
                                })
                            })
                            .collect(),
                    },
                })
                .collect();

            Solution::Parametric(ParametricSolution {
                parameters,
                expressions,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Rational;
    use crate::sle::classifier::classify;

    use num_traits::Zero;

    fn augmented(rows: &[&[i64]]) -> Augmented<Rational> {
        let coefficients: Vec<Vec<Rational>> = rows
            .iter()
            .map(|row| {
                row[..row.len() - 1]
                    .iter()
                    .map(|&v| Rational::from_integer(v))
                    .collect()
            })
            .collect();
        let rhs: Vec<Rational> = rows
            .iter()
            .map(|row| Rational::from_integer(row[row.len() - 1]))
            .collect();
        Augmented::from_parts(&coefficients, &rhs)
    }

    fn solve(rows: &[&[i64]]) -> (Solution<Rational>, Vec<String>) {
        let config = SolverConfig::default();
        let rref = augmented(rows);
        let classification = classify(&rref, config.tolerance);
        let solution = build_solution(&rref, &classification, &config);
        let lines = solution.format_lines(&config);
        (solution, lines)
    }

    #[test]
    fn test_unique_values() {
        let (solution, lines) = solve(&[&[1, 0, 3], &[0, 1, -2]]);
        assert_eq!(
            solution,
            Solution::Unique(vec![Rational::from_integer(3), Rational::from_integer(-2)])
        );
        assert_eq!(lines, vec!["x1 = 3", "x2 = -2"]);
    }

    #[test]
    fn test_parametric_single_free_variable() {
        let (solution, lines) = solve(&[&[1, 1, 2], &[0, 0, 0]]);
        let Solution::Parametric(parametric) = solution else {
            panic!("expected a parametric solution");
        };
        assert_eq!(
            parametric.parameters,
            vec![Parameter {
                column: 1,
                name: "t1".to_string()
            }]
        );
        assert_eq!(lines, vec!["t1 is a free parameter (x2)", "x1 = 2 - t1", "x2 = t1"]);
    }

    #[test]
    fn test_parametric_rendering_of_coefficients() {
        // x2 has no coefficient in any pivot row, x3 appears in the first one.
        let (solution, lines) = solve(&[&[1, 0, -3, 0, 0], &[0, 0, 0, 1, 5]]);
        assert_eq!(
            lines,
            vec![
                "t1 is a free parameter (x2)",
                "t2 is a free parameter (x3)",
                "x1 = 3*t2",
                "x2 = t1",
                "x3 = t2",
                "x4 = 5",
            ]
        );

        let Solution::Parametric(parametric) = solution else {
            panic!("expected a parametric solution");
        };
        let values = parametric
            .instantiate(&[Rational::from_integer(7), Rational::from_integer(2)])
            .unwrap();
        assert_eq!(
            values,
            vec![
                Rational::from_integer(6),
                Rational::from_integer(7),
                Rational::from_integer(2),
                Rational::from_integer(5)
            ]
        );
        assert!(parametric.instantiate(&[]).is_err());
    }

    #[test]
    fn test_fraction_coefficient_rendering() {
        let config = SolverConfig::default();
        let expression = Expression {
            constant: Rational::zero(),
            terms: vec![
                Term {
                    parameter: "t1".to_string(),
                    coefficient: Rational::new(-1, 2).unwrap(),
                },
                Term {
                    parameter: "t2".to_string(),
                    coefficient: Rational::from_integer(1),
                },
            ],
        };
        assert_eq!(expression.render(&config), "-(1/2)*t1 + t2");
    }

    #[test]
    fn test_float_coefficients_round_before_rendering() {
        let config = SolverConfig::default();
        let expression = Expression {
            constant: 3.0_f64,
            terms: vec![
                Term {
                    parameter: "t1".to_string(),
                    coefficient: -2.000_000_000_000_5,
                },
                Term {
                    parameter: "t2".to_string(),
                    coefficient: 0.999_999_999_9,
                },
                Term {
                    parameter: "t3".to_string(),
                    coefficient: 0.25,
                },
            ],
        };
        assert_eq!(expression.render(&config), "3 - 2*t1 + t2 + (0.2500)*t3");
    }

    #[test]
    fn test_inconsistent_lines() {
        let (solution, lines) = solve(&[&[1, 1, 0], &[0, 0, 1]]);
        assert_eq!(solution, Solution::Inconsistent);
        assert_eq!(lines, vec!["The system is inconsistent: no solution exists"]);
    }
}
