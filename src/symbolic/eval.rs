//! Numeric evaluation of expressions.
//!
//! Evaluation follows IEEE semantics: `ln(-1)` is NaN and `1 / 0` is inf.
//! Callers that need finite values check the result themselves.

use std::collections::HashMap;

use crate::symbolic::errors::ExprError;
use crate::symbolic::expr::Expr;

impl Expr {
    /// Evaluates with every symbol bound through `vars`.
    ///
    /// # Errors
    /// [`ExprError::UnboundSymbol`] for a symbol missing from `vars`.
    pub fn evaluate(&self, vars: &HashMap<String, f64>) -> Result<f64, ExprError> {
        self.eval_with(&|name| vars.get(name).copied())
    }

    /// Evaluates with `var` bound to `value`.
    ///
    /// # Errors
    /// [`ExprError::UnboundSymbol`] if any other symbol occurs.
    pub fn eval_at(&self, var: &str, value: f64) -> Result<f64, ExprError> {
        self.eval_with(&|name| (name == var).then_some(value))
    }

    /// Plain closure over `var`; a failed evaluation yields NaN.
    pub fn to_fn(&self, var: &str) -> impl Fn(f64) -> f64 + '_ {
        let var = var.to_string();
        move |x| self.eval_at(&var, x).unwrap_or(f64::NAN)
    }

    fn eval_with(&self, lookup: &dyn Fn(&str) -> Option<f64>) -> Result<f64, ExprError> {
        Ok(match self {
            Expr::Const(c) => *c,
            Expr::Symbol(s) => {
                lookup(s).ok_or_else(|| ExprError::UnboundSymbol { name: s.clone() })?
            }
            Expr::Add(a, b) => a.eval_with(lookup)? + b.eval_with(lookup)?,
            Expr::Sub(a, b) => a.eval_with(lookup)? - b.eval_with(lookup)?,
            Expr::Mul(a, b) => a.eval_with(lookup)? * b.eval_with(lookup)?,
            Expr::Div(a, b) => a.eval_with(lookup)? / b.eval_with(lookup)?,
            Expr::Pow(a, b) => {
                let base = a.eval_with(lookup)?;
                let exp  = b.eval_with(lookup)?;
                if exp.fract() == 0.0 && exp.abs() <= i32::MAX as f64 {
                    base.powi(exp as i32)
                } else {
                    base.powf(exp)
                }
            }
            Expr::Neg(a) => -a.eval_with(lookup)?,
            Expr::Func(func, a) => func.apply(a.eval_with(lookup)?),
        })
    }
}
