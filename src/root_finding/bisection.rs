use super::algorithms::Algorithm;
use super::config::{CommonCfg, impl_common_cfg};
use super::errors::{RootFindingError, ToleranceError};
use super::report::{RootFindingReport, TerminationReason};
use crate::trace::{BisectionAction, NoTrace, TraceRecord, TraceSink};
use thiserror::Error;
use tracing::{debug, trace, warn};

const ALGORITHM: Algorithm = Algorithm::Bisection;

#[derive(Debug, Error)]
pub enum BisectionError {
    #[error(transparent)]
    Common(#[from] RootFindingError),

    #[error(transparent)]
    Tolerance(#[from] ToleranceError),

    #[error("no sign change on [{a}, {b}]: f(a)={fa}, f(b)={fb}, f(a) * f(b) > 0")]
    NoSignChange  { a: f64, b: f64, fa: f64, fb: f64 },

    #[error("invalid bounds: a and b must be finite. got [{a}, {b}]")]
    InvalidBounds { a: f64, b: f64 },
}

/// Bisection Configuration
///
/// # Defaults
///
/// ┌ tolerance - [`DEFAULT_TOLERANCE`](super::config::DEFAULT_TOLERANCE) relative error
/// └ max_iter  - [`Algorithm::default_max_iter`] when unset
///
/// # Validation
/// Setters reject bad values up front:
/// ├ `tolerance` finite and in (0, 1)
/// └ `max_iter` >= 1
#[derive(Debug, Copy, Clone)]
pub struct BisectionCfg {
    common: CommonCfg,
}
impl BisectionCfg {
    #[must_use]
    pub fn new() -> Self { Self { common: CommonCfg::new() } }
}
impl Default for BisectionCfg {
    fn default() -> Self { Self::new() }
}
impl_common_cfg!(BisectionCfg);

/// Calculates midpoint of [a, b]
#[inline]
fn calculate_bisection(a: f64, b: f64) -> f64 {
    (a + b) / 2.0
}

/// Finds a root of a function using the
/// [bisection method](https://en.wikipedia.org/wiki/Bisection_method).
///
/// See [`bisection_traced`] for the full contract; this form discards the
/// per-iteration records.
pub fn bisection<F>(
    func: F,
    a: f64,
    b: f64,
    cfg: BisectionCfg,
) -> Result<RootFindingReport, BisectionError>
where F: FnMut(f64) -> f64 {
    bisection_traced(func, a, b, cfg, &mut NoTrace)
}

/// Bisection with every iteration reported to `sink`.
///
/// # Arguments
///
/// ┌ `func` - The function whose root is to be found.
/// ├ `a`    - One end of the bracket. Must be finite.
/// ├ `b`    - Other end of the bracket. Must be finite. `a > b` is accepted.
/// ├ `cfg`  - [`BisectionCfg`] relative-error tolerance and iteration cap.
/// └ `sink` - receives one [`TraceRecord::Bisection`] per iteration.
///
/// # Behavior
///
/// Each iteration computes `m = (a + b) / 2`, updates the relative error
/// `|(m - m_prev) / m|` once a previous midpoint exists (the first iteration
/// keeps the `1.0` sentinel), evaluates `f(a)`, `f(m)`, `f(b)` and then, in
/// this order:
/// ├ `f(a) * f(m) < 0` : `b = m`
/// ├ `f(m) * f(b) < 0` : `a = m`
/// └ otherwise         : `m` is an exact root, returned with error `0.0`
///
/// The loop runs while `relative_error > tolerance` and fewer than
/// `max_iter` iterations have completed. The last midpoint and the last
/// relative error are returned either way; `converged` tells them apart.
///
/// # Errors
///
/// ┌ [`BisectionError::InvalidBounds`] - `a` or `b` is NaN/inf.
/// ├ [`BisectionError::NoSignChange`]  - `func(a) * func(b) > 0`, raised before iterating.
/// └ [`BisectionError::Common`]        - `func(x)` produced NaN or inf.
pub fn bisection_traced<F>(
    mut func: F,
    mut a: f64,
    mut b: f64,
    cfg: BisectionCfg,
    sink: &mut dyn TraceSink,
) -> Result<RootFindingReport, BisectionError>
where F: FnMut(f64) -> f64 {

    if !(a.is_finite() && b.is_finite()) {
        return Err(BisectionError::InvalidBounds { a, b });
    }

    let tolerance = cfg.tolerance();
    let num_iter  = cfg.max_iter().unwrap_or(ALGORITHM.default_max_iter());

    // number of function evaluations
    let mut evals = 0;

    // closure function, checks finiteness
    let mut eval = |x: f64| -> Result<f64, BisectionError> {
        let fx = { evals += 1; func(x) };
        if !fx.is_finite() {
            Err(RootFindingError::NonFiniteEvaluation { x, fx }.into())
        } else {
            Ok(fx)
        }
    };

    let fa = eval(a)?;
    let fb = eval(b)?;
    if fa * fb > 0.0 {
        return Err(BisectionError::NoSignChange { a, b, fa, fb });
    }
    debug!(a, b, tolerance, max_iter = num_iter, "bisection start");

    let mut relative_error = 1.0;
    let mut prev_midpoint: Option<f64> = None;
    let mut midpoint = a;       // gets overwritten
    let mut iter     = 0;

    while relative_error > tolerance && iter < num_iter {
        midpoint = calculate_bisection(a, b);

        if let Some(prev) = prev_midpoint {
            relative_error = ((midpoint - prev) / midpoint).abs();
        }

        let fa = eval(a)?;
        let fm = eval(midpoint)?;
        let fb = eval(b)?;

        let action = if fa * fm < 0.0 {
            BisectionAction::KeepLeft
        } else if fm * fb < 0.0 {
            BisectionAction::KeepRight
        } else {
            BisectionAction::ExactRoot
        };

        trace!(iter, a, b, midpoint, fa, fm, fb, relative_error, ?action, "bisection step");
        sink.record(TraceRecord::Bisection {
            iteration      : iter,
            a, b, midpoint, fa, fm, fb,
            relative_error : prev_midpoint.map(|_| relative_error),
            action,
        });

        match action {
            BisectionAction::KeepLeft  => b = midpoint,
            BisectionAction::KeepRight => a = midpoint,
            BisectionAction::ExactRoot => {
                debug!(root = midpoint, iterations = iter + 1, "bisection hit exact root");
                return Ok(RootFindingReport {
                    root               : midpoint,
                    relative_error     : 0.0,
                    converged          : true,
                    iterations         : iter + 1,
                    evaluations        : evals,
                    termination_reason : TerminationReason::ExactRoot,
                    algorithm_name     : ALGORITHM.algorithm_name(),
                });
            }
        }

        prev_midpoint = Some(midpoint);
        iter += 1;
    }

    let converged = relative_error <= tolerance;
    let termination_reason = if converged {
        TerminationReason::ToleranceReached
    } else {
        warn!(iterations = iter, relative_error, tolerance, "bisection hit iteration limit");
        TerminationReason::IterationLimit
    };
    debug!(root = midpoint, relative_error, iterations = iter, "bisection done");

    Ok(RootFindingReport {
        root           : midpoint,
        relative_error,
        converged,
        iterations     : iter,
        evaluations    : evals,
        termination_reason,
        algorithm_name : ALGORITHM.algorithm_name(),
    })
}
