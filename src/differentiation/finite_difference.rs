//! Recursive central differences
//!
//! ```text
//! D_0(c) = f(c)
//! D_k(c) = (D_{k-1}(c + h) - D_{k-1}(c - h)) / 2h
//! ```
//!
//! Without memoization `D_k` calls `f` exactly `2^k` times (once for `k = 0`).
//! The step is fixed for every order, so estimates degrade quickly past the
//! third derivative for `h = 1e-5`; a larger step trades truncation error for
//! stability.

use std::collections::HashMap;

use tracing::trace;

use crate::differentiation::config::FiniteDifferenceCfg;
use crate::differentiation::errors::DerivativeError;


/// Numeric derivative estimator over an opaque `f64 -> f64` function.
///
/// The evaluation counter and the optional memo live as long as the
/// estimator, so one estimator can serve several orders at one center.
pub struct FiniteDifference<F> {
    func:        F,
    step:        f64,
    memo:        Option<HashMap<(u64, usize), f64>>,
    evaluations: usize,
}

impl<F> FiniteDifference<F>
where F: Fn(f64) -> f64 {
    pub fn new(func: F, cfg: &FiniteDifferenceCfg) -> Self {
        Self {
            func,
            step: cfg.step(),
            memo: cfg.memoize().then(HashMap::new),
            evaluations: 0,
        }
    }

    /// Number of calls of `f` made so far.
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Estimates the `order`-th derivative at `center`.
    ///
    /// # Errors
    /// [`DerivativeError::NonFiniteEvaluation`] if `f` returns NaN/inf at any
    /// sample point.
    pub fn estimate(&mut self, center: f64, order: usize) -> Result<f64, DerivativeError> {
        let key = (center.to_bits(), order);
        if let Some(hit) = self.memo.as_ref().and_then(|m| m.get(&key)) {
            return Ok(*hit);
        }

        let value = if order == 0 {
            let fx = (self.func)(center);
            self.evaluations += 1;
            if !fx.is_finite() {
                return Err(DerivativeError::NonFiniteEvaluation { x: center, fx });
            }
            fx
        } else {
            let h = self.step;
            let forward  = self.estimate(center + h, order - 1)?;
            let backward = self.estimate(center - h, order - 1)?;
            (forward - backward) / (2.0 * h)
        };

        trace!(center, order, value, "central difference");
        if let Some(memo) = self.memo.as_mut() {
            memo.insert(key, value);
        }
        Ok(value)
    }
}
