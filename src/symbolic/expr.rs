//! Expression tree over real constants, named symbols and elementary functions.

use std::collections::BTreeSet;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::sync::Arc;

use crate::symbolic::errors::ExprError;


/// Elementary single-argument functions.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Exp,
    Ln,
    Sqrt,
    Abs,
    /// derivative of `abs`; `0` at `0`
    Sign,
}

impl Func {
    pub const fn name(self) -> &'static str {
        match self {
            Func::Sin  => "sin",
            Func::Cos  => "cos",
            Func::Tan  => "tan",
            Func::Exp  => "exp",
            Func::Ln   => "ln",
            Func::Sqrt => "sqrt",
            Func::Abs  => "abs",
            Func::Sign => "sign",
        }
    }

    /// Looks a function up by name; `log` is accepted for `ln`.
    pub fn from_name(name: &str) -> Option<Func> {
        match name {
            "sin"         => Some(Func::Sin),
            "cos"         => Some(Func::Cos),
            "tan"         => Some(Func::Tan),
            "exp"         => Some(Func::Exp),
            "ln" | "log"  => Some(Func::Ln),
            "sqrt"        => Some(Func::Sqrt),
            "abs"         => Some(Func::Abs),
            "sign"        => Some(Func::Sign),
            _             => None,
        }
    }

    #[inline]
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Func::Sin  => x.sin(),
            Func::Cos  => x.cos(),
            Func::Tan  => x.tan(),
            Func::Exp  => x.exp(),
            Func::Ln   => x.ln(),
            Func::Sqrt => x.sqrt(),
            Func::Abs  => x.abs(),
            Func::Sign => if x == 0.0 { 0.0 } else { x.signum() },
        }
    }
}


/// Symbolic expression.
///
/// Children are shared through `Arc`, so cloning is cheap and expressions can
/// be sent across threads.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Const(f64),
    Symbol(String),
    Add(Arc<Expr>, Arc<Expr>),
    Sub(Arc<Expr>, Arc<Expr>),
    Mul(Arc<Expr>, Arc<Expr>),
    Div(Arc<Expr>, Arc<Expr>),
    Pow(Arc<Expr>, Arc<Expr>),
    Neg(Arc<Expr>),
    Func(Func, Arc<Expr>),
}

impl Expr {
    pub fn constant(value: f64) -> Self {
        Expr::Const(value)
    }

    pub fn var(name: &str) -> Self {
        Expr::Symbol(name.to_string())
    }

    pub fn zero() -> Self {
        Expr::Const(0.0)
    }

    pub fn one() -> Self {
        Expr::Const(1.0)
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Expr::Const(c) if *c == 0.0)
    }

    pub fn is_one(&self) -> bool {
        matches!(self, Expr::Const(c) if *c == 1.0)
    }

    pub fn as_const(&self) -> Option<f64> {
        match self {
            Expr::Const(c) => Some(*c),
            _ => None,
        }
    }

    pub fn pow(self, exponent: Expr) -> Expr {
        Expr::Pow(Arc::new(self), Arc::new(exponent))
    }

    pub fn powi(self, exponent: i32) -> Expr {
        self.pow(Expr::Const(exponent as f64))
    }

    pub fn apply(self, func: Func) -> Expr {
        Expr::Func(func, Arc::new(self))
    }

    pub fn sin(self)  -> Expr { self.apply(Func::Sin) }
    pub fn cos(self)  -> Expr { self.apply(Func::Cos) }
    pub fn tan(self)  -> Expr { self.apply(Func::Tan) }
    pub fn exp(self)  -> Expr { self.apply(Func::Exp) }
    pub fn ln(self)   -> Expr { self.apply(Func::Ln) }
    pub fn sqrt(self) -> Expr { self.apply(Func::Sqrt) }
    pub fn abs(self)  -> Expr { self.apply(Func::Abs) }

    pub fn contains_var(&self, var: &str) -> bool {
        match self {
            Expr::Const(_) => false,
            Expr::Symbol(s) => s == var,
            Expr::Add(a, b)
            | Expr::Sub(a, b)
            | Expr::Mul(a, b)
            | Expr::Div(a, b)
            | Expr::Pow(a, b) => a.contains_var(var) || b.contains_var(var),
            Expr::Neg(a) | Expr::Func(_, a) => a.contains_var(var),
        }
    }

    /// Free symbols in sorted order.
    pub fn free_vars(&self) -> BTreeSet<String> {
        let mut vars = BTreeSet::new();
        self.collect_vars(&mut vars);
        vars
    }

    fn collect_vars(&self, vars: &mut BTreeSet<String>) {
        match self {
            Expr::Const(_) => {}
            Expr::Symbol(s) => {
                vars.insert(s.clone());
            }
            Expr::Add(a, b)
            | Expr::Sub(a, b)
            | Expr::Mul(a, b)
            | Expr::Div(a, b)
            | Expr::Pow(a, b) => {
                a.collect_vars(vars);
                b.collect_vars(vars);
            }
            Expr::Neg(a) | Expr::Func(_, a) => a.collect_vars(vars),
        }
    }

    /// The single free variable, `None` for a constant expression.
    ///
    /// # Errors
    /// [`ExprError::MultipleFreeVariables`] if more than one symbol occurs.
    pub fn single_var(&self) -> Result<Option<String>, ExprError> {
        let vars = self.free_vars();
        if vars.len() > 1 {
            return Err(ExprError::MultipleFreeVariables { vars: vars.into_iter().collect() });
        }
        Ok(vars.into_iter().next())
    }

    /// Replaces every occurrence of `var` with `replacement`.
    pub fn substitute(&self, var: &str, replacement: &Expr) -> Expr {
        match self {
            Expr::Const(_) => self.clone(),
            Expr::Symbol(s) => {
                if s == var {
                    replacement.clone()
                } else {
                    self.clone()
                }
            }
            Expr::Add(a, b) => a.substitute(var, replacement) + b.substitute(var, replacement),
            Expr::Sub(a, b) => a.substitute(var, replacement) - b.substitute(var, replacement),
            Expr::Mul(a, b) => a.substitute(var, replacement) * b.substitute(var, replacement),
            Expr::Div(a, b) => a.substitute(var, replacement) / b.substitute(var, replacement),
            Expr::Pow(a, b) => a.substitute(var, replacement).pow(b.substitute(var, replacement)),
            Expr::Neg(a) => -a.substitute(var, replacement),
            Expr::Func(func, a) => a.substitute(var, replacement).apply(*func),
        }
    }
}


// Operator overloading for Expr
impl Add for Expr {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Expr::Add(Arc::new(self), Arc::new(rhs))
    }
}

impl Sub for Expr {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Expr::Sub(Arc::new(self), Arc::new(rhs))
    }
}

impl Mul for Expr {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Expr::Mul(Arc::new(self), Arc::new(rhs))
    }
}

impl Div for Expr {
    type Output = Self;
    fn div(self, rhs: Self) -> Self {
        Expr::Div(Arc::new(self), Arc::new(rhs))
    }
}

impl Neg for Expr {
    type Output = Self;
    fn neg(self) -> Self {
        Expr::Neg(Arc::new(self))
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Expr::Const(value)
    }
}


// binding strength used to decide where parentheses are needed
const PREC_ADD: u8 = 1;
const PREC_MUL: u8 = 2;
const PREC_NEG: u8 = 3;
const PREC_POW: u8 = 4;
const PREC_ATOM: u8 = 5;

impl Expr {
    fn precedence(&self) -> u8 {
        match self {
            Expr::Const(c) if *c < 0.0 => PREC_NEG,
            Expr::Const(_) | Expr::Symbol(_) | Expr::Func(..) => PREC_ATOM,
            Expr::Add(..) | Expr::Sub(..) => PREC_ADD,
            Expr::Mul(..) | Expr::Div(..) => PREC_MUL,
            Expr::Neg(_) => PREC_NEG,
            Expr::Pow(..) => PREC_POW,
        }
    }

    fn fmt_prec(&self, f: &mut fmt::Formatter<'_>, min: u8) -> fmt::Result {
        let wrap = self.precedence() < min;
        if wrap {
            write!(f, "(")?;
        }
        match self {
            Expr::Const(c) => write!(f, "{c}")?,
            Expr::Symbol(s) => write!(f, "{s}")?,
            Expr::Add(a, b) => {
                a.fmt_prec(f, PREC_ADD)?;
                write!(f, " + ")?;
                b.fmt_prec(f, PREC_ADD)?;
            }
            Expr::Sub(a, b) => {
                a.fmt_prec(f, PREC_ADD)?;
                write!(f, " - ")?;
                b.fmt_prec(f, PREC_ADD + 1)?;
            }
            Expr::Mul(a, b) => {
                a.fmt_prec(f, PREC_MUL)?;
                write!(f, " * ")?;
                b.fmt_prec(f, PREC_MUL + 1)?;
            }
            Expr::Div(a, b) => {
                a.fmt_prec(f, PREC_MUL)?;
                write!(f, " / ")?;
                b.fmt_prec(f, PREC_MUL + 1)?;
            }
            Expr::Pow(a, b) => {
                a.fmt_prec(f, PREC_ATOM)?;
                write!(f, "^")?;
                b.fmt_prec(f, PREC_POW)?;
            }
            Expr::Neg(a) => {
                write!(f, "-")?;
                a.fmt_prec(f, PREC_POW)?;
            }
            Expr::Func(func, a) => {
                write!(f, "{}(", func.name())?;
                a.fmt_prec(f, 0)?;
                write!(f, ")")?;
            }
        }
        if wrap {
            write!(f, ")")?;
        }
        Ok(())
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_prec(f, 0)
    }
}
