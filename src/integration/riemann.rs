//! Riemann-sum quadrature
//!
//! Approximates `∫_a^b f(x) dx` by `h * Σ f(x_i)` with `h = (b - a) / n`
//! and the sample points chosen by [`Rule`]. `n` is fixed by the caller;
//! there is no tolerance loop.
//!
//! Left and right sums are first-order in `h`; the midpoint sum is
//! second-order.

use tracing::{debug, trace};

use crate::integration::errors::QuadratureError;
use crate::integration::report::IntegrationReport;
use crate::integration::rules::Rule;
use crate::trace::{NoTrace, TraceRecord, TraceSink};


/// Approximates the integral of `func` on `[a, b]` with `n` rectangles.
///
/// # Errors
/// - [`QuadratureError::InvalidBounds`]       : `a` or `b` NaN/inf
/// - [`QuadratureError::InvalidSubintervals`] : `n == 0`
/// - [`QuadratureError::NonFiniteEvaluation`] : `func` returned NaN/inf at a sample
pub fn integrate<F>(func: F, a: f64, b: f64, n: usize, rule: Rule) -> Result<f64, QuadratureError>
where F: FnMut(f64) -> f64 {
    integrate_traced(func, a, b, n, rule, &mut NoTrace).map(|report| report.value)
}

/// Same as [`integrate`], but the rule is given by name
/// (`"left"`, `"right"`, `"midpoint"`).
///
/// An unknown name fails with [`QuadratureError::UnknownRule`] before `func`
/// is sampled.
pub fn integrate_named<F>(func: F, a: f64, b: f64, n: usize, rule: &str) -> Result<f64, QuadratureError>
where F: FnMut(f64) -> f64 {
    let rule: Rule = rule.parse()?;
    integrate(func, a, b, n, rule)
}

/// Same as [`integrate`], returning the full [`IntegrationReport`].
pub fn integrate_report<F>(
    func: F,
    a: f64,
    b: f64,
    n: usize,
    rule: Rule,
) -> Result<IntegrationReport, QuadratureError>
where F: FnMut(f64) -> f64 {
    integrate_traced(func, a, b, n, rule, &mut NoTrace)
}

/// Riemann sum with every sample reported to `sink` as a
/// [`TraceRecord::Quadrature`] (`partial_sum` is already scaled by `h`).
pub fn integrate_traced<F>(
    mut func: F,
    a: f64,
    b: f64,
    n: usize,
    rule: Rule,
    sink: &mut dyn TraceSink,
) -> Result<IntegrationReport, QuadratureError>
where F: FnMut(f64) -> f64 {
    if !(a.is_finite() && b.is_finite()) {
        return Err(QuadratureError::InvalidBounds { a, b });
    }
    if n == 0 {
        return Err(QuadratureError::InvalidSubintervals { got: n });
    }

    let h = (b - a) / n as f64;
    debug!(a, b, n, h, rule = rule.rule_name(), "riemann sum start");

    let mut sum = 0.0;
    for i in 0..n {
        let x  = rule.sample(a, h, i);
        let fx = func(x);
        if !fx.is_finite() {
            return Err(QuadratureError::NonFiniteEvaluation { x, fx });
        }
        sum += fx;

        trace!(i, x, fx, "riemann sample");
        sink.record(TraceRecord::Quadrature { index: i, x, fx, partial_sum: h * sum });
    }

    let value = h * sum;
    debug!(value, "riemann sum done");

    Ok(IntegrationReport { value, rule, n, h, evaluations: n })
}
