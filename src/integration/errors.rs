use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuadratureError {
    #[error("unknown quadrature rule `{got}`: expected one of left, right, midpoint")]
    UnknownRule { got: String },

    #[error("invalid subinterval count: must be >= 1. got {got}")]
    InvalidSubintervals { got: usize },

    #[error("invalid bounds: a and b must be finite. got [{a}, {b}]")]
    InvalidBounds { a: f64, b: f64 },

    #[error("function non-finite at x={x}, f(x)={fx}")]
    NonFiniteEvaluation { x: f64, fx: f64 },
}
