//! Bottom-up simplification: constant folding, identity elimination and
//! collection of like terms and like bases.
//!
//! The rewrites are algebraic identities over the reals. `0 * u = 0`,
//! `u^0 = 1` and `u * u^-1 = 1` drop `u` entirely, so the simplified form can
//! be finite where the original evaluates to NaN or infinity (for example
//! `0 * (1 / x)` at `x = 0`).

use std::sync::Arc;

use crate::symbolic::expr::Expr;

impl Expr {
    pub fn simplify(&self) -> Expr {
        match self {
            Expr::Const(_) | Expr::Symbol(_) => self.clone(),

            Expr::Add(a, b) => {
                let a = a.simplify();
                let b = b.simplify();

                if a.is_zero() {
                    return b;
                }
                if b.is_zero() {
                    return a;
                }
                if let (Some(ca), Some(cb)) = (a.as_const(), b.as_const()) {
                    return Expr::Const(ca + cb);
                }
                if let Some(collected) = collect_terms(&a, &b, 1.0) {
                    return collected;
                }
                // x + (-y) = x - y
                if let Expr::Neg(inner) = &b {
                    return Expr::Sub(Arc::new(a), inner.clone());
                }
                Expr::Add(Arc::new(a), Arc::new(b))
            }

            Expr::Sub(a, b) => {
                let a = a.simplify();
                let b = b.simplify();

                if b.is_zero() {
                    return a;
                }
                if a.is_zero() {
                    return (-b).simplify();
                }
                if let (Some(ca), Some(cb)) = (a.as_const(), b.as_const()) {
                    return Expr::Const(ca - cb);
                }
                if let Some(collected) = collect_terms(&a, &b, -1.0) {
                    return collected;
                }
                // x - (-y) = x + y
                if let Expr::Neg(inner) = &b {
                    return Expr::Add(Arc::new(a), inner.clone());
                }
                Expr::Sub(Arc::new(a), Arc::new(b))
            }

            Expr::Mul(a, b) => {
                let a = a.simplify();
                let b = b.simplify();

                if a.is_zero() || b.is_zero() {
                    return Expr::zero();
                }
                if a.is_one() {
                    return b;
                }
                if b.is_one() {
                    return a;
                }
                if let (Some(ca), Some(cb)) = (a.as_const(), b.as_const()) {
                    return Expr::Const(ca * cb);
                }
                if let Some(collected) = collect_factors(&a, &b) {
                    return collected;
                }
                // keep constants on the left: x * c = c * x
                if b.as_const().is_some() {
                    return Expr::Mul(Arc::new(b), Arc::new(a)).simplify();
                }
                // c1 * (c2 * x) = (c1 c2) * x
                if let (Some(ca), Expr::Mul(inner_a, inner_b)) = (a.as_const(), &b) {
                    if let Some(cb) = inner_a.as_const() {
                        return Expr::Mul(Arc::new(Expr::Const(ca * cb)), inner_b.clone());
                    }
                }
                // -1 * x = -x
                if a.as_const() == Some(-1.0) {
                    return Expr::Neg(Arc::new(b));
                }
                Expr::Mul(Arc::new(a), Arc::new(b))
            }

            Expr::Div(a, b) => {
                let a = a.simplify();
                let b = b.simplify();

                if b.is_one() {
                    return a;
                }
                if let Some(cb) = b.as_const().filter(|cb| *cb != 0.0) {
                    if let Some(ca) = a.as_const() {
                        return Expr::Const(ca / cb);
                    }
                    // (c * x) / d = (c / d) * x
                    if let Expr::Mul(inner_a, inner_b) = &a {
                        if let Some(ca) = inner_a.as_const() {
                            return Expr::Mul(Arc::new(Expr::Const(ca / cb)), inner_b.clone());
                        }
                    }
                }
                Expr::Div(Arc::new(a), Arc::new(b))
            }

            Expr::Pow(a, b) => {
                let a = a.simplify();
                let b = b.simplify();

                if b.is_zero() {
                    return Expr::one();
                }
                if b.is_one() {
                    return a;
                }
                if a.is_one() {
                    return Expr::one();
                }
                if let (Some(ca), Some(cb)) = (a.as_const(), b.as_const()) {
                    return Expr::Const(ca.powf(cb));
                }
                Expr::Pow(Arc::new(a), Arc::new(b))
            }

            Expr::Neg(a) => {
                let a = a.simplify();
                // -(-x) = x
                if let Expr::Neg(inner) = &a {
                    return (**inner).clone();
                }
                if let Some(c) = a.as_const() {
                    return Expr::Const(-c);
                }
                // -(c * x) = (-c) * x
                if let Expr::Mul(inner_a, inner_b) = &a {
                    if let Some(c) = inner_a.as_const() {
                        return Expr::Mul(Arc::new(Expr::Const(-c)), inner_b.clone());
                    }
                }
                Expr::Neg(Arc::new(a))
            }

            Expr::Func(func, a) => {
                let a = a.simplify();
                if let Some(x) = a.as_const() {
                    return Expr::Const(func.apply(x));
                }
                Expr::Func(*func, Arc::new(a))
            }
        }
    }
}


/// `coefficient * f1 * f2 * ...`, factors sorted by their rendering so equal
/// products compare equal.
struct Term {
    coefficient: f64,
    factors:     Vec<Expr>,
}

impl Term {
    fn of(e: &Expr, sign: f64) -> Term {
        let mut coefficient = sign;
        let mut factors = Vec::new();
        split_product(e, &mut coefficient, &mut factors);
        factors.sort_by_cached_key(|f| f.to_string());
        Term { coefficient, factors }
    }

    fn into_expr(self) -> Expr {
        let mut factors = self.factors.into_iter();
        let Some(first) = factors.next() else {
            return Expr::Const(self.coefficient);
        };
        let product = factors.fold(first, |acc, f| Expr::Mul(Arc::new(acc), Arc::new(f)));

        if self.coefficient == 1.0 {
            product
        } else if self.coefficient == -1.0 {
            Expr::Neg(Arc::new(product))
        } else {
            Expr::Mul(Arc::new(Expr::Const(self.coefficient)), Arc::new(product))
        }
    }
}

fn split_product(e: &Expr, coefficient: &mut f64, factors: &mut Vec<Expr>) {
    match e {
        Expr::Const(c) => *coefficient *= c,
        Expr::Neg(a) => {
            *coefficient = -*coefficient;
            split_product(a, coefficient, factors);
        }
        Expr::Mul(a, b) => {
            split_product(a, coefficient, factors);
            split_product(b, coefficient, factors);
        }
        _ => factors.push(e.clone()),
    }
}

fn flatten_sum(e: &Expr, sign: f64, out: &mut Vec<Term>) {
    match e {
        Expr::Add(a, b) => {
            flatten_sum(a, sign, out);
            flatten_sum(b, sign, out);
        }
        Expr::Sub(a, b) => {
            flatten_sum(a, sign, out);
            flatten_sum(b, -sign, out);
        }
        Expr::Neg(a) => flatten_sum(a, -sign, out),
        _ => out.push(Term::of(e, sign)),
    }
}

/// `c1 * u + c2 * u = (c1 + c2) * u` over the flattened sum `a ± b`.
/// `None` when no two terms share their factors.
fn collect_terms(a: &Expr, b: &Expr, b_sign: f64) -> Option<Expr> {
    let mut terms = Vec::new();
    flatten_sum(a, 1.0, &mut terms);
    flatten_sum(b, b_sign, &mut terms);

    let mut merged: Vec<Term> = Vec::with_capacity(terms.len());
    let mut changed = false;
    for term in terms {
        match merged.iter_mut().find(|m| m.factors == term.factors) {
            Some(m) => {
                m.coefficient += term.coefficient;
                changed = true;
            }
            None => merged.push(term),
        }
    }
    if !changed {
        return None;
    }

    let mut out: Option<Expr> = None;
    for term in merged.into_iter().filter(|t| t.coefficient != 0.0) {
        out = Some(match out {
            None => term.into_expr(),
            Some(acc) if term.coefficient < 0.0 => {
                let positive = Term { coefficient: -term.coefficient, factors: term.factors };
                Expr::Sub(Arc::new(acc), Arc::new(positive.into_expr()))
            }
            Some(acc) => Expr::Add(Arc::new(acc), Arc::new(term.into_expr())),
        });
    }
    Some(out.unwrap_or_else(Expr::zero))
}

fn base_and_exponent(factor: Expr) -> (Expr, f64) {
    if let Expr::Pow(base, n) = &factor {
        if let Some(n) = n.as_const() {
            return ((**base).clone(), n);
        }
    }
    (factor, 1.0)
}

/// `u^m * u^n = u^(m + n)` over the flattened product `a * b`, with a bare
/// `u` counting as `u^1`. `None` when every base occurs once.
fn collect_factors(a: &Expr, b: &Expr) -> Option<Expr> {
    let mut coefficient = 1.0;
    let mut factors = Vec::new();
    split_product(a, &mut coefficient, &mut factors);
    split_product(b, &mut coefficient, &mut factors);

    let mut powers: Vec<(Expr, f64)> = Vec::with_capacity(factors.len());
    let mut changed = false;
    for factor in factors {
        let (base, n) = base_and_exponent(factor);
        match powers.iter_mut().find(|(b, _)| *b == base) {
            Some((_, m)) => {
                *m += n;
                changed = true;
            }
            None => powers.push((base, n)),
        }
    }
    if !changed {
        return None;
    }

    powers.sort_by_cached_key(|(base, _)| base.to_string());
    let factors = powers
        .into_iter()
        .filter(|(_, n)| *n != 0.0)
        .map(|(base, n)| if n == 1.0 { base } else { base.pow(Expr::Const(n)) })
        .collect();
    Some(Term { coefficient, factors }.into_expr())
}
