//! k-th derivative at a point, exact or numeric depending on the
//! [`Function`] variant.
//!
//! ┌ symbolic : one `diff` per order not yet seen, then substitute `var = center`
//! └ numeric  : recursive central differences, see
//!              [`finite_difference`](super::finite_difference)

use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::differentiation::config::FiniteDifferenceCfg;
use crate::differentiation::errors::DerivativeError;
use crate::differentiation::finite_difference::FiniteDifference;
use crate::differentiation::function::{Function, Mode, SymbolicFunction};
use crate::symbolic::errors::ExprError;
use crate::symbolic::expr::Expr;
use crate::trace::{NoTrace, TraceRecord, TraceSink, TraceValue};


/// A derivative value: a number, or the residual expression left when the
/// function has parameters besides its variable.
#[derive(Debug, Clone, PartialEq)]
pub enum DerivativeValue {
    Number(f64),
    Expression(Expr),
}

impl DerivativeValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            DerivativeValue::Number(v) => Some(*v),
            DerivativeValue::Expression(_) => None,
        }
    }

    pub fn to_trace(&self) -> TraceValue {
        match self {
            DerivativeValue::Number(v) => TraceValue::Number(*v),
            DerivativeValue::Expression(e) => TraceValue::Expression(e.to_string()),
        }
    }

    /// Divides by a nonzero constant; expressions are simplified afterwards.
    pub(crate) fn scale_down(&self, divisor: f64) -> DerivativeValue {
        match self {
            DerivativeValue::Number(v) => DerivativeValue::Number(v / divisor),
            DerivativeValue::Expression(e) => DerivativeValue::Expression(
                Expr::Div(Arc::new(e.clone()), Arc::new(Expr::Const(divisor))).simplify(),
            ),
        }
    }
}

impl fmt::Display for DerivativeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DerivativeValue::Number(v) => write!(f, "{v}"),
            DerivativeValue::Expression(e) => write!(f, "{e}"),
        }
    }
}


/// Derivatives of one symbolic function, `chain[k]` being the `k`-th.
/// Order `k + 1` is a single [`Expr::diff`] of order `k`.
struct SymbolicChain<'f> {
    func:  &'f SymbolicFunction,
    chain: Vec<Expr>,
}

impl<'f> SymbolicChain<'f> {
    fn new(func: &'f SymbolicFunction) -> Self {
        Self { func, chain: vec![func.expr().clone()] }
    }

    fn nth(&mut self, order: usize) -> &Expr {
        let func: &SymbolicFunction = self.func;
        while self.chain.len() <= order {
            let next = self.chain[self.chain.len() - 1].diff(func.var());
            self.chain.push(next);
        }
        &self.chain[order]
    }

    fn passes(&self) -> usize {
        self.chain.len() - 1
    }
}

enum Backend<'f, 'a> {
    Symbolic(SymbolicChain<'f>),
    Numeric(FiniteDifference<&'f (dyn Fn(f64) -> f64 + 'a)>),
}

/// Derivative source bound to one [`Function`].
///
/// On the numeric path the engine keeps a single [`FiniteDifference`]
/// estimator, so its evaluation count and memo span every call made
/// through the engine. On the symbolic path it keeps every derivative
/// computed so far.
pub struct DerivativeEngine<'f, 'a> {
    backend:   Backend<'f, 'a>,
    max_order: usize,
}

impl<'f, 'a> DerivativeEngine<'f, 'a> {
    pub fn new(func: &'f Function<'a>, cfg: &FiniteDifferenceCfg) -> Self {
        let backend = match func {
            Function::Symbolic(s) => Backend::Symbolic(SymbolicChain::new(s)),
            Function::Numeric(f)  => Backend::Numeric(FiniteDifference::new(&**f, cfg)),
        };
        Self { backend, max_order: cfg.max_order() }
    }

    pub fn mode(&self) -> Mode {
        match self.backend {
            Backend::Symbolic(_) => Mode::Symbolic,
            Backend::Numeric(_)  => Mode::Numeric,
        }
    }

    /// Calls of the underlying closure so far; always `0` on the symbolic path.
    pub fn evaluations(&self) -> usize {
        match &self.backend {
            Backend::Symbolic(_) => 0,
            Backend::Numeric(fd) => fd.evaluations(),
        }
    }

    /// Differentiation passes so far; always `0` on the numeric path.
    pub fn differentiations(&self) -> usize {
        match &self.backend {
            Backend::Symbolic(chain) => chain.passes(),
            Backend::Numeric(_)      => 0,
        }
    }

    /// `order`-th derivative at `center`, reported to `sink` as a
    /// [`TraceRecord::Derivative`].
    ///
    /// # Errors
    /// - [`DerivativeError::OrderTooLarge`]       : numeric path, `order > max_order`
    /// - [`DerivativeError::NonFiniteEvaluation`] : numeric path, `f` returned NaN/inf
    /// - [`DerivativeError::NonFiniteDerivative`] : the derivative itself is NaN/inf
    pub fn derivative(
        &mut self,
        center: f64,
        order: usize,
        sink: &mut dyn TraceSink,
    ) -> Result<DerivativeValue, DerivativeError> {
        let value = match &mut self.backend {
            Backend::Symbolic(chain) => {
                let func: &SymbolicFunction = chain.func;
                let d = chain.nth(order);
                symbolic_derivative(d, func.var(), center, order)?
            }
            Backend::Numeric(fd) => {
                if order > self.max_order {
                    return Err(DerivativeError::OrderTooLarge { order, max: self.max_order });
                }
                let v = fd.estimate(center, order)?;
                if !v.is_finite() {
                    return Err(DerivativeError::NonFiniteDerivative { order, center });
                }
                DerivativeValue::Number(v)
            }
        };

        let mode = self.mode().name();
        trace!(order, center, value = %value, mode, "derivative");
        sink.record(TraceRecord::Derivative { order, center, value: value.to_trace(), mode });
        Ok(value)
    }
}

fn symbolic_derivative(
    d: &Expr,
    var: &str,
    center: f64,
    order: usize,
) -> Result<DerivativeValue, DerivativeError> {
    match d.eval_at(var, center) {
        Ok(v) if v.is_finite() => Ok(DerivativeValue::Number(v)),
        Ok(_) => Err(DerivativeError::NonFiniteDerivative { order, center }),
        Err(ExprError::UnboundSymbol { .. }) => {
            // parameters can cancel, e.g. `a * 0`
            let residual = d.substitute(var, &Expr::Const(center)).simplify();
            match residual.as_const() {
                Some(v) if v.is_finite() => Ok(DerivativeValue::Number(v)),
                Some(_) => Err(DerivativeError::NonFiniteDerivative { order, center }),
                None => Ok(DerivativeValue::Expression(residual)),
            }
        }
        Err(e) => Err(e.into()),
    }
}


/// The `order`-th derivative of `func` at `center`.
///
/// See [`DerivativeEngine::derivative`] for errors.
pub fn derivative(
    func: &Function<'_>,
    center: f64,
    order: usize,
    cfg: &FiniteDifferenceCfg,
) -> Result<DerivativeValue, DerivativeError> {
    derivative_traced(func, center, order, cfg, &mut NoTrace)
}

pub fn derivative_traced(
    func: &Function<'_>,
    center: f64,
    order: usize,
    cfg: &FiniteDifferenceCfg,
    sink: &mut dyn TraceSink,
) -> Result<DerivativeValue, DerivativeError> {
    debug!(center, order, mode = func.mode().name(), "derivative start");
    let mut engine = DerivativeEngine::new(func, cfg);
    let value = engine.derivative(center, order, sink)?;
    debug!(value = %value, evaluations = engine.evaluations(), "derivative done");
    Ok(value)
}
