//! Taylor expansion configuration.
//!
//! [`TaylorCfg`] only carries the [`FiniteDifferenceCfg`] used when the
//! function is numeric; symbolic expansions ignore it.

use crate::differentiation::config::FiniteDifferenceCfg;
use crate::taylor::errors::TaylorError;


#[derive(Debug, Copy, Clone, Default)]
pub struct TaylorCfg {
    differences: FiniteDifferenceCfg,
}

impl TaylorCfg {
    #[must_use]
    pub fn new() -> Self {
        Self { differences: FiniteDifferenceCfg::new() }
    }

    #[must_use]
    pub fn with_differences(mut self, cfg: FiniteDifferenceCfg) -> Self {
        self.differences = cfg;
        self
    }

    pub fn set_step(mut self, v: f64) -> Result<Self, TaylorError> {
        self.differences = self.differences.set_step(v)?;
        Ok(self)
    }

    pub fn set_max_order(mut self, v: usize) -> Result<Self, TaylorError> {
        self.differences = self.differences.set_max_order(v)?;
        Ok(self)
    }

    #[must_use]
    pub fn with_memo(mut self, on: bool) -> Self {
        self.differences = self.differences.with_memo(on);
        self
    }

    pub fn differences(&self) -> &FiniteDifferenceCfg { &self.differences }
}
