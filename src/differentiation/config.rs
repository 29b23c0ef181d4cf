//! Finite-difference configuration.
//!
//! [`FiniteDifferenceCfg`]
//! ├ `step`      : central-difference step `h`
//! ├ `max_order` : highest order the numeric estimator accepts
//! └ `memoize`   : cache estimates keyed by `(center, order)`
//!
//! The recursive estimator evaluates `f` at `2^order` points, so `max_order`
//! is the knob that bounds its cost. `step` is not adapted to the order;
//! high orders amplify round-off.

use crate::differentiation::errors::DerivativeError;

pub const DEFAULT_STEP: f64 = 1e-5;
pub const DEFAULT_MAX_ORDER: usize = 16;


#[derive(Debug, Copy, Clone)]
pub struct FiniteDifferenceCfg {
    step:      f64,
    max_order: usize,
    memoize:   bool,
}

impl FiniteDifferenceCfg {
    #[must_use]
    pub fn new() -> Self {
        Self {
            step      : DEFAULT_STEP,
            max_order : DEFAULT_MAX_ORDER,
            memoize   : false,
        }
    }

    pub fn set_step(mut self, v: f64) -> Result<Self, DerivativeError> {
        if !v.is_finite() || v <= 0.0 {
            return Err(DerivativeError::InvalidStep { got: v });
        }
        self.step = v;
        Ok(self)
    }

    pub fn set_max_order(mut self, v: usize) -> Result<Self, DerivativeError> {
        if v == 0 {
            return Err(DerivativeError::InvalidMaxOrder { got: v });
        }
        self.max_order = v;
        Ok(self)
    }

    /// Memoization only skips repeated evaluations; estimates are unchanged.
    #[must_use]
    pub fn with_memo(mut self, on: bool) -> Self {
        self.memoize = on;
        self
    }

    // getters
    pub fn step(&self)      -> f64   { self.step }
    pub fn max_order(&self) -> usize { self.max_order }
    pub fn memoize(&self)   -> bool  { self.memoize }
}

impl Default for FiniteDifferenceCfg {
    fn default() -> Self { Self::new() }
}
