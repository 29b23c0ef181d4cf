//! Exact differentiation with respect to one symbol.
//!
//! The result of every pass is simplified, so repeated differentiation does
//! not grow the tree with `0 * ...` and `1 * ...` terms, and the product
//! rule's duplicate terms are merged before the next pass.

use std::sync::Arc;

use crate::symbolic::expr::{Expr, Func};

impl Expr {
    /// `d/dvar` of the expression, simplified.
    pub fn diff(&self, var: &str) -> Expr {
        self.diff_raw(var).simplify()
    }

    /// `order`-th derivative; `order == 0` returns a clone.
    pub fn nth_diff(&self, var: &str, order: usize) -> Expr {
        let mut out = self.clone();
        for _ in 0..order {
            out = out.diff(var);
        }
        out
    }

    fn diff_raw(&self, var: &str) -> Expr {
        if !self.contains_var(var) {
            return Expr::zero();
        }

        match self {
            Expr::Const(_) => Expr::zero(),
            Expr::Symbol(s) => {
                if s == var { Expr::one() } else { Expr::zero() }
            }

            Expr::Add(u, v) => u.diff_raw(var) + v.diff_raw(var),
            Expr::Sub(u, v) => u.diff_raw(var) - v.diff_raw(var),

            // (uv)' = u'v + uv'
            Expr::Mul(u, v) => {
                u.diff_raw(var) * (**v).clone() + (**u).clone() * v.diff_raw(var)
            }

            // (u/v)' = (u'v - uv') / v^2
            Expr::Div(u, v) => {
                let num = u.diff_raw(var) * (**v).clone() - (**u).clone() * v.diff_raw(var);
                num / (**v).clone().powi(2)
            }

            Expr::Pow(base, exp) => diff_pow(base, exp, var),

            Expr::Neg(u) => -u.diff_raw(var),

            Expr::Func(func, u) => {
                let inner = (**u).clone();
                let outer = match func {
                    Func::Sin  => inner.cos(),
                    Func::Cos  => -inner.sin(),
                    Func::Tan  => Expr::one() / inner.cos().powi(2),
                    Func::Exp  => inner.exp(),
                    Func::Ln   => Expr::one() / inner,
                    Func::Sqrt => Expr::one() / (Expr::constant(2.0) * inner.sqrt()),
                    Func::Abs  => inner.apply(Func::Sign),
                    Func::Sign => return Expr::zero(),
                };
                outer * u.diff_raw(var)
            }
        }
    }
}

fn diff_pow(base: &Arc<Expr>, exp: &Arc<Expr>, var: &str) -> Expr {
    let base_varies = base.contains_var(var);
    let exp_varies  = exp.contains_var(var);

    match (base_varies, exp_varies) {
        (false, false) => Expr::zero(),

        // (u^n)' = n u^(n-1) u'
        (true, false) => {
            let lowered = match exp.as_const() {
                Some(n) => Expr::Const(n - 1.0),
                None => (**exp).clone() - Expr::one(),
            };
            (**exp).clone() * (**base).clone().pow(lowered) * base.diff_raw(var)
        }

        // (a^u)' = a^u ln(a) u'
        (false, true) => {
            Expr::Pow(base.clone(), exp.clone()) * (**base).clone().ln() * exp.diff_raw(var)
        }

        // (u^v)' = u^v (v' ln u + v u' / u)
        (true, true) => {
            let u = (**base).clone();
            let v = (**exp).clone();
            let inner = exp.diff_raw(var) * u.clone().ln() + v * base.diff_raw(var) / u;
            Expr::Pow(base.clone(), exp.clone()) * inner
        }
    }
}
