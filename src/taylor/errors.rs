use crate::differentiation::errors::DerivativeError;
use crate::symbolic::errors::ExprError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaylorError {
    #[error(transparent)]
    Derivative(#[from] DerivativeError),

    #[error(transparent)]
    Expr(#[from] ExprError),

    #[error("derivative of order {order} has no numeric value at the center or the evaluation point")]
    NonNumericBound { order: usize },

    #[error("invalid center {center}: must be finite")]
    InvalidCenter { center: f64 },

    #[error("invalid evaluation point {x}: must be finite")]
    InvalidEvalPoint { x: f64 },
}
