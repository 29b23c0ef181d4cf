use crate::symbolic::errors::ExprError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DerivativeError {
    #[error(transparent)]
    Expr(#[from] ExprError),

    #[error("derivative order {order} exceeds the configured maximum {max}")]
    OrderTooLarge { order: usize, max: usize },

    #[error("function returned non-finite value f({x}) = {fx}")]
    NonFiniteEvaluation { x: f64, fx: f64 },

    #[error("derivative of order {order} is not finite at {center}")]
    NonFiniteDerivative { order: usize, center: f64 },

    #[error("invalid step {got}: must be finite and > 0")]
    InvalidStep { got: f64 },

    #[error("invalid max order {got}: must be >= 1")]
    InvalidMaxOrder { got: usize },
}
