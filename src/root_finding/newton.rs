//! Newton-Raphson method

use super::algorithms::Algorithm;
use super::config::{CommonCfg, impl_common_cfg};
use super::errors::{RootFindingError, ToleranceError};
use super::report::{RootFindingReport, TerminationReason};
use crate::trace::{NoTrace, TraceRecord, TraceSink};
use thiserror::Error;
use tracing::{debug, trace, warn};

const ALGORITHM: Algorithm = Algorithm::Newton;


#[derive(Debug, Error)]
pub enum NewtonError {
    #[error(transparent)]
    RootFinding(#[from] RootFindingError),

    #[error(transparent)]
    Tolerance(#[from] ToleranceError),

    #[error("invalid initial guess: x0={x0} must be finite")]
    InvalidGuess { x0: f64 },

    #[error("derivative vanished at x={x}; the method cannot continue")]
    ZeroDerivative { x: f64 },

    #[error("derivative non-finite at x={x}, f'(x)={dfx}")]
    DerivativeNotFinite { x: f64, dfx: f64 },

    #[error("newton step overflowed at x={x}: x_next={x_next}")]
    StepNotFinite { x: f64, x_next: f64 },
}


/// Newton configuration.
///
/// # Fields
/// - `common` : [`CommonCfg`] with the relative-error tolerance and optional `max_iter`.
///
/// # Construction
/// - Use [`NewtonCfg::new`] then optional setters.
///
/// # Defaults
/// - If `max_iter` is `None`, [`newton`] resolves it using
///   [`Algorithm::default_max_iter`] for [`Algorithm::Newton`].
#[derive(Debug, Copy, Clone)]
pub struct NewtonCfg {
    common: CommonCfg,
}
impl NewtonCfg {
    #[must_use]
    pub fn new() -> Self { Self { common: CommonCfg::new() } }
}
impl Default for NewtonCfg {
    fn default() -> Self { Self::new() }
}
impl_common_cfg!(NewtonCfg);


/// Helpers
/// - `eval_fx_checked`  : evaluates `f(x)` with finite-check
/// - `eval_dfx_checked` : evaluates `df(x)` with finite-check
#[inline]
fn eval_fx_checked<F>(
    f: &mut F,
    x: f64,
    evals: &mut usize
) -> Result<f64, NewtonError> where F: FnMut(f64) -> f64 {
    let fx = { *evals += 1; f(x) };
    if !fx.is_finite() {
        return Err(RootFindingError::NonFiniteEvaluation { x, fx }.into());
    }

    Ok(fx)
}
#[inline]
fn eval_dfx_checked<G>(
    df: &mut G,
    x: f64,
    evals: &mut usize
) -> Result<f64, NewtonError> where G: FnMut(f64) -> f64 {
    let dfx = { *evals += 1; df(x) };
    if !dfx.is_finite() {
        return Err(NewtonError::DerivativeNotFinite { x, dfx });
    }

    Ok(dfx)
}

/// Relative change between consecutive iterates; absolute change when the
/// new iterate is exactly zero.
#[inline]
fn relative_change(x_next: f64, x: f64) -> f64 {
    if x_next != 0.0 {
        ((x_next - x) / x_next).abs()
    } else {
        (x_next - x).abs()
    }
}


/// Finds a root of `func` using the
/// [Newton–Raphson method](https://en.wikipedia.org/wiki/Newton_method).
///
/// See [`newton_traced`] for the full contract.
pub fn newton<F, G>(
    func: F,
    dfunc: G,
    x0: f64,
    cfg: NewtonCfg,
) -> Result<RootFindingReport, NewtonError>
where
    F: FnMut(f64) -> f64,
    G: FnMut(f64) -> f64 {
    newton_traced(func, dfunc, x0, cfg, &mut NoTrace)
}

/// Newton-Raphson with every iteration reported to `sink`.
///
/// # Arguments
/// - `func`  : function whose root is sought
/// - `dfunc` : its derivative
/// - `x0`    : finite initial guess
/// - `cfg`   : [`NewtonCfg`] (tolerance, optional `max_iter`)
/// - `sink`  : receives one [`TraceRecord::Newton`] per completed update
///
/// # Behavior
/// Each iteration:
/// - evaluates `f(x)`; `f(x) == 0` returns `x` with error `0.0`
/// - evaluates `f'(x)`; `f'(x) == 0` is an error
/// - steps `x_next = x - f(x) / f'(x)`
/// - sets the relative error to `|(x_next - x) / x_next|`, or `|x_next - x|`
///   when `x_next == 0`
///
/// The loop runs while the relative error (starting at `1.0`) exceeds the
/// tolerance and fewer than `max_iter` iterations have completed.
///
/// # Errors
/// - [`NewtonError::InvalidGuess`]        : `x0` non-finite
/// - [`NewtonError::ZeroDerivative`]      : `f'(x) == 0`, no update is made
/// - [`NewtonError::DerivativeNotFinite`] : `f'(x)` NaN/inf
/// - [`NewtonError::StepNotFinite`]       : `x - f(x) / f'(x)` overflowed
/// - [`NewtonError::RootFinding`]         : `f(x)` NaN/inf
///
/// # Notes
/// - Convergence is quadratic near a simple root with a good `x0`; it is
///   local only. Poor guesses can diverge or cycle until `max_iter`.
pub fn newton_traced<F, G>(
    mut func: F,
    mut dfunc: G,
    x0: f64,
    cfg: NewtonCfg,
    sink: &mut dyn TraceSink,
) -> Result<RootFindingReport, NewtonError>
where
    F: FnMut(f64) -> f64,
    G: FnMut(f64) -> f64 {

    if !x0.is_finite() {
        return Err(NewtonError::InvalidGuess { x0 });
    }

    let tolerance = cfg.tolerance();
    let num_iter  = cfg.max_iter().unwrap_or(ALGORITHM.default_max_iter());
    debug!(x0, tolerance, max_iter = num_iter, "newton start");

    let mut evals: usize = 0;
    let mut relative_error = 1.0;
    let mut x    = x0;
    let mut iter = 0;

    while relative_error > tolerance && iter < num_iter {
        let fx = eval_fx_checked(&mut func, x, &mut evals)?;
        if fx == 0.0 {
            debug!(root = x, iterations = iter, "newton hit exact root");
            return Ok(RootFindingReport {
                root               : x,
                relative_error     : 0.0,
                converged          : true,
                iterations         : iter,
                evaluations        : evals,
                termination_reason : TerminationReason::ExactRoot,
                algorithm_name     : ALGORITHM.algorithm_name(),
            });
        }

        let dfx = eval_dfx_checked(&mut dfunc, x, &mut evals)?;
        if dfx == 0.0 {
            return Err(NewtonError::ZeroDerivative { x });
        }

        let x_next = x - fx / dfx;
        if !x_next.is_finite() {
            return Err(NewtonError::StepNotFinite { x, x_next });
        }
        relative_error = relative_change(x_next, x);

        trace!(iter, x, fx, dfx, x_next, relative_error, "newton step");
        sink.record(TraceRecord::Newton {
            iteration: iter,
            x, fx, dfx, x_next, relative_error,
        });

        x = x_next;
        iter += 1;
    }

    let converged = relative_error <= tolerance;
    let termination_reason = if converged {
        TerminationReason::ToleranceReached
    } else {
        warn!(iterations = iter, relative_error, tolerance, "newton hit iteration limit");
        TerminationReason::IterationLimit
    };
    debug!(root = x, relative_error, iterations = iter, "newton done");

    Ok(RootFindingReport {
        root           : x,
        relative_error,
        converged,
        iterations     : iter,
        evaluations    : evals,
        termination_reason,
        algorithm_name : ALGORITHM.algorithm_name(),
    })
}
