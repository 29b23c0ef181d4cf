//! Root-finding error types.
//!
//! ┌ [`RootFindingError`] : common runtime errors
//! │   ├ non-finite function evaluation
//! │   └ invalid global parameters (e.g. max_iter)
//! │
//! └ [`ToleranceError`]   : tolerance-related errors
//!     └ invalid relative-error tolerance
//!
//! Method-specific errors (`NoSignChange`, `ZeroDerivative`) live next to
//! their algorithm and wrap these two via `#[from]`.


use thiserror::Error;


/// Root-finding runtime errors.
///
/// ┌ Non-finite function evaluation
/// └ Invalid global configuration (e.g. max_iter < 1)
#[derive(Debug, Error)]
pub enum RootFindingError {
    #[error("function non-finite at x={x}, f(x)={fx}")]
    NonFiniteEvaluation { x: f64, fx: f64 },

    #[error("invalid max_iter: must be >= 1. got max_iter={got}")]
    InvalidMaxIter   { got: usize },
}


/// Tolerance configuration errors.
///
/// The relative error starts at the sentinel `1.0`, so a tolerance of
/// `1.0` or more would end every run before its first iteration.
#[derive(Debug, Error)]
pub enum ToleranceError {
    #[error("invalid tolerance: must be finite and in (0, 1). got {got}")]
    InvalidTolerance { got: f64 },
}
