use crate::differentiation::engine::DerivativeValue;
use crate::differentiation::function::Mode;
use crate::symbolic::expr::Expr;
use crate::taylor::polynomial::TaylorPolynomial;


/// One term `f^(k)(c) / k! * (x - c)^k` of the expansion.
#[derive(Debug, Clone, PartialEq)]
pub struct TaylorTerm {
    pub order:       usize,
    pub derivative:  DerivativeValue,
    pub coefficient: DerivativeValue,
    /// `coefficient * (x - c)^k` at the evaluation point, if one was given
    /// and the coefficient is numeric
    pub contribution: Option<f64>,
}

/// Lagrange remainder estimate `bound / (n+1)! * |x - c|^(n+1)`.
///
/// `bound` is `|f^(n+1)|` at the center, not the supremum over the interval.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RemainderEstimate {
    /// `n + 1`
    pub order: usize,
    pub bound: f64,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TaylorOutput {
    /// `P(evalPoint)`
    Value(f64),
    /// closed-form polynomial, or `P(evalPoint)` with residual parameters
    Expression(Expr),
    /// numeric polynomial without an evaluation point
    Evaluator(TaylorPolynomial),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaylorReport {
    pub output:    TaylorOutput,
    pub remainder: Option<RemainderEstimate>,
    pub terms:     Vec<TaylorTerm>,
    pub mode:      Mode,
}

impl TaylorReport {
    /// The numeric value at the evaluation point, if there is one.
    pub fn value(&self) -> Option<f64> {
        match self.output {
            TaylorOutput::Value(v) => Some(v),
            _ => None,
        }
    }

    /// `(valueOrExpression, remainderOrNone)`
    pub fn pair(&self) -> (&TaylorOutput, Option<f64>) {
        (&self.output, self.remainder.map(|r| r.value))
    }
}
