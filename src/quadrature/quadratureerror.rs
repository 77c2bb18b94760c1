use thiserror::Error;

use crate::expression::expression::ParseExpressionError;
use crate::quadrature::method::Method;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{method} requires an even number of subdivisions, got {n}")]
    OddSubdivisions { method: Method, n: usize }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuadratureError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("function is undefined at x = {x} (evaluated to {value})")]
    Evaluation { x: f64, value: f64 },

    #[error("number of subdivisions must be at least 1, got {0}")]
    InvalidSubdivisions(usize),

    #[error("interval bounds must be finite, got [{a}, {b}]")]
    NonFiniteBound { a: f64, b: f64 },

    #[error("invalid expression: {0}")]
    Expression(#[from] ParseExpressionError)
}

impl QuadratureError {
    /// Checks that `value = f(x)` is usable as a sample.
    pub fn check_sample(x: f64, value: f64) -> Result<f64, QuadratureError> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(QuadratureError::Evaluation { x, value })
        }
    }

    pub fn check_bounds(a: f64, b: f64) -> Result<(), QuadratureError> {
        if a.is_finite() && b.is_finite() {
            Ok(())
        } else {
            Err(QuadratureError::NonFiniteBound { a, b })
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, QuadratureError::Validation(_))
    }
}
