//! Reusable evaluator for a numerically expanded Taylor polynomial.

use serde::Serialize;


/// `P(x) = Σ c_k (x - center)^k`, summed from `k = 0` upward.
///
/// The summation order is the one [`expand`](super::expand) uses for the
/// value at an evaluation point, so `P.eval(x)` reproduces that value
/// bit for bit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaylorPolynomial {
    center:       f64,
    coefficients: Vec<f64>,
}

impl TaylorPolynomial {
    pub fn new(center: f64, coefficients: Vec<f64>) -> Self {
        Self { center, coefficients }
    }

    pub fn center(&self) -> f64 { self.center }

    pub fn coefficients(&self) -> &[f64] { &self.coefficients }

    /// Highest power; `0` for an empty polynomial as well.
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    pub fn eval(&self, x: f64) -> f64 {
        let dx = x - self.center;
        self.coefficients
            .iter()
            .enumerate()
            .fold(0.0, |acc, (k, c)| acc + term(*c, dx, k))
    }

    pub fn eval_many(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.eval(x)).collect()
    }
}

/// `c * dx^k`
#[inline]
pub(crate) fn term(c: f64, dx: f64, k: usize) -> f64 {
    c * dx.powi(k as i32)
}
