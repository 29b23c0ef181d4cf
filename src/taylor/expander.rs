//! Taylor expansion
//!
//! ```text
//! P(x) = Σ_{k=0}^{n} f^(k)(c) / k! * (x - c)^k
//! R    = |f^(n+1)(c)| / (n+1)! * |x - c|^(n+1)
//! ```
//!
//! The derivatives come from one [`DerivativeEngine`] per call, so a symbolic
//! function yields a closed-form polynomial and a numeric one yields a
//! [`TaylorPolynomial`] evaluator. The remainder evaluates the `(n+1)`-th
//! derivative at the center in place of the unknown mean-value point; it is
//! an estimate, not a guaranteed bound.

use tracing::{debug, trace};

use crate::differentiation::engine::{DerivativeEngine, DerivativeValue};
use crate::differentiation::errors::DerivativeError;
use crate::differentiation::function::{Function, Mode};
use crate::symbolic::expr::Expr;
use crate::taylor::config::TaylorCfg;
use crate::taylor::errors::TaylorError;
use crate::taylor::polynomial::{term, TaylorPolynomial};
use crate::taylor::report::{RemainderEstimate, TaylorOutput, TaylorReport, TaylorTerm};
use crate::trace::{NoTrace, TraceRecord, TraceSink};


/// Degree-`degree` Taylor polynomial of `func` about `center`.
///
/// See [`expand_traced`] for the full contract.
pub fn expand(
    func: &Function<'_>,
    center: f64,
    degree: usize,
    eval_point: Option<f64>,
    cfg: &TaylorCfg,
) -> Result<TaylorReport, TaylorError> {
    expand_traced(func, center, degree, eval_point, cfg, &mut NoTrace)
}

/// Taylor expansion with every derivative, term and the remainder reported
/// to `sink`.
///
/// # Arguments
///
/// ┌ `func`       - symbolic or numeric [`Function`]
/// ├ `center`     - expansion point `c`. Must be finite.
/// ├ `degree`     - highest power `n`
/// ├ `eval_point` - `x`; when given the polynomial is evaluated there and a
/// │                remainder estimate is computed
/// ├ `cfg`        - [`TaylorCfg`], finite-difference settings for numeric input
/// └ `sink`       - receives `Derivative`, `TaylorTerm` and `Remainder` records
///
/// # Returns
///
/// | input    | `eval_point` | `output`                                    | `remainder` |
/// |----------|--------------|---------------------------------------------|-------------|
/// | symbolic | `None`       | [`TaylorOutput::Expression`] in `var`       | `None`      |
/// | numeric  | `None`       | [`TaylorOutput::Evaluator`]                 | `None`      |
/// | either   | `Some(x)`    | [`TaylorOutput::Value`] (`Expression` if a coefficient is residual) | `Some` |
///
/// # Errors
/// - [`TaylorError::InvalidCenter`] / [`TaylorError::InvalidEvalPoint`] : NaN/inf input
/// - [`TaylorError::Derivative`]      : a derivative could not be computed
/// - [`TaylorError::NonNumericBound`] : `f^(n+1)` has no finite value at `c`
///   nor at `x`
pub fn expand_traced(
    func: &Function<'_>,
    center: f64,
    degree: usize,
    eval_point: Option<f64>,
    cfg: &TaylorCfg,
    sink: &mut dyn TraceSink,
) -> Result<TaylorReport, TaylorError> {
    if !center.is_finite() {
        return Err(TaylorError::InvalidCenter { center });
    }
    if let Some(x) = eval_point {
        if !x.is_finite() {
            return Err(TaylorError::InvalidEvalPoint { x });
        }
    }

    let mode = func.mode();
    debug!(center, degree, ?eval_point, mode = mode.name(), "taylor expansion start");

    let mut engine  = DerivativeEngine::new(func, cfg.differences());
    let dx          = eval_point.map(|x| x - center);
    let mut partial = dx.map(|_| 0.0);
    let mut factorial = 1.0;
    let mut terms = Vec::with_capacity(degree + 1);

    for k in 0..=degree {
        if k > 0 {
            factorial *= k as f64;
        }
        let derivative  = engine.derivative(center, k, sink)?;
        let coefficient = derivative.scale_down(factorial);

        let contribution = match (dx, coefficient.as_number()) {
            (Some(dx), Some(c)) => Some(term(c, dx, k)),
            _ => None,
        };
        partial = match (partial, contribution) {
            (Some(p), Some(c)) => Some(p + c),
            _ => None,
        };

        trace!(order = k, derivative = %derivative, coefficient = %coefficient, ?contribution, "taylor term");
        sink.record(TraceRecord::TaylorTerm {
            order: k,
            derivative: derivative.to_trace(),
            coefficient: coefficient.to_trace(),
            contribution,
            partial_sum: partial,
        });
        terms.push(TaylorTerm { order: k, derivative, coefficient, contribution });
    }

    let output = match func {
        Function::Symbolic(s) => {
            let poly = symbolic_polynomial(&terms, s.var(), center);
            match (eval_point, partial) {
                (Some(_), Some(v)) => TaylorOutput::Value(v),
                (Some(x), None) => {
                    TaylorOutput::Expression(poly.substitute(s.var(), &Expr::Const(x)).simplify())
                }
                (None, _) => TaylorOutput::Expression(poly),
            }
        }
        Function::Numeric(_) => match partial {
            Some(v) => TaylorOutput::Value(v),
            None => {
                let coefficients = terms.iter().filter_map(|t| t.coefficient.as_number()).collect();
                TaylorOutput::Evaluator(TaylorPolynomial::new(center, coefficients))
            }
        },
    };

    let remainder = match (eval_point, dx) {
        (Some(x), Some(dx)) => {
            let order = degree + 1;
            let bound = bounding_derivative(&mut engine, center, x, order, sink)?;
            let value = bound / (factorial * order as f64) * dx.abs().powi(order as i32);

            trace!(order, bound, value, "lagrange remainder");
            sink.record(TraceRecord::Remainder { order, bound, value });
            Some(RemainderEstimate { order, bound, value })
        }
        _ => None,
    };

    debug!(
        value = ?partial,
        remainder = ?remainder.map(|r| r.value),
        evaluations = engine.evaluations(),
        "taylor expansion done"
    );

    Ok(TaylorReport { output, remainder, terms, mode })
}

/// `Σ c_k (var - center)^k`, simplified.
fn symbolic_polynomial(terms: &[TaylorTerm], var: &str, center: f64) -> Expr {
    let base = Expr::var(var) - Expr::Const(center);
    terms
        .iter()
        .fold(Expr::zero(), |acc, t| {
            let c = match &t.coefficient {
                DerivativeValue::Number(v) => Expr::Const(*v),
                DerivativeValue::Expression(e) => e.clone(),
            };
            acc + c * base.clone().powi(t.order as i32)
        })
        .simplify()
}

/// `|f^(order)(center)|`.
///
/// On the symbolic path a residual or non-finite value at the center falls
/// back to the evaluation point.
fn bounding_derivative(
    engine: &mut DerivativeEngine<'_, '_>,
    center: f64,
    x: f64,
    order: usize,
    sink: &mut dyn TraceSink,
) -> Result<f64, TaylorError> {
    match (engine.mode(), engine.derivative(center, order, sink)) {
        (_, Ok(DerivativeValue::Number(v))) => return Ok(v.abs()),
        (Mode::Symbolic, Ok(DerivativeValue::Expression(_)))
        | (Mode::Symbolic, Err(DerivativeError::NonFiniteDerivative { .. })) => {}
        (Mode::Numeric, Ok(DerivativeValue::Expression(_))) => {
            return Err(TaylorError::NonNumericBound { order });
        }
        (_, Err(e)) => return Err(e.into()),
    }

    debug!(order, center, x, "remainder bound taken at the evaluation point");
    match engine.derivative(x, order, sink) {
        Ok(DerivativeValue::Number(v)) => Ok(v.abs()),
        Ok(DerivativeValue::Expression(_))
        | Err(DerivativeError::NonFiniteDerivative { .. }) => {
            Err(TaylorError::NonNumericBound { order })
        }
        Err(e) => Err(e.into()),
    }
}
