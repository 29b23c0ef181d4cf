//! The function a derivative or Taylor expansion is taken of.
//!
//! [`Function`] is a closed variant: either an expression the crate can
//! differentiate exactly, or an opaque closure that can only be sampled.
//! Every consumer branches on the tag; nothing is inferred at runtime.

use std::fmt;

use serde::Serialize;

use crate::symbolic::errors::ExprError;
use crate::symbolic::expr::Expr;
use crate::symbolic::parser::parse;


/// How derivatives of a [`Function`] are obtained.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Symbolic,
    Numeric,
}

impl Mode {
    pub const fn name(self) -> &'static str {
        match self {
            Mode::Symbolic => "symbolic",
            Mode::Numeric  => "numeric",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}


/// An expression together with the variable it is a function of.
///
/// Other symbols in the expression are parameters; they survive
/// differentiation and substitution and make results residual
/// expressions instead of numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolicFunction {
    expr: Expr,
    var:  String,
}

impl SymbolicFunction {
    /// Infers the variable from the expression.
    ///
    /// A constant expression is treated as a function of `x`.
    ///
    /// # Errors
    /// [`ExprError::MultipleFreeVariables`] if more than one symbol occurs;
    /// use [`SymbolicFunction::with_var`] to pick one.
    pub fn new(expr: Expr) -> Result<Self, ExprError> {
        let var = expr.single_var()?.unwrap_or_else(|| "x".to_string());
        Ok(Self { expr, var })
    }

    pub fn with_var(expr: Expr, var: &str) -> Self {
        Self { expr, var: var.to_string() }
    }

    pub fn expr(&self) -> &Expr { &self.expr }
    pub fn var(&self)  -> &str  { &self.var }
}


pub enum Function<'a> {
    Symbolic(SymbolicFunction),
    Numeric(Box<dyn Fn(f64) -> f64 + 'a>),
}

impl<'a> Function<'a> {
    /// # Errors
    /// See [`SymbolicFunction::new`].
    pub fn symbolic(expr: Expr) -> Result<Self, ExprError> {
        SymbolicFunction::new(expr).map(Function::Symbolic)
    }

    pub fn numeric<F>(func: F) -> Self
    where F: Fn(f64) -> f64 + 'a {
        Function::Numeric(Box::new(func))
    }

    /// Parses `src` into a symbolic function of its single free variable.
    ///
    /// # Errors
    /// Any parse error, or [`ExprError::MultipleFreeVariables`].
    pub fn parse(src: &str) -> Result<Self, ExprError> {
        Self::symbolic(parse(src)?)
    }

    pub fn mode(&self) -> Mode {
        match self {
            Function::Symbolic(_) => Mode::Symbolic,
            Function::Numeric(_)  => Mode::Numeric,
        }
    }

    /// Evaluates `f(x)`.
    ///
    /// A symbolic function with unbound parameters evaluates to NaN.
    pub fn eval(&self, x: f64) -> f64 {
        match self {
            Function::Symbolic(s) => s.expr.eval_at(&s.var, x).unwrap_or(f64::NAN),
            Function::Numeric(f)  => f(x),
        }
    }
}

impl From<SymbolicFunction> for Function<'_> {
    fn from(value: SymbolicFunction) -> Self {
        Function::Symbolic(value)
    }
}

impl fmt::Debug for Function<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Function::Symbolic(s) => f
                .debug_struct("Symbolic")
                .field("expr", &s.expr.to_string())
                .field("var", &s.var)
                .finish(),
            Function::Numeric(_) => f.write_str("Numeric(<closure>)"),
        }
    }
}
