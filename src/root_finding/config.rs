//! Shared configuration for root-finding algorithms.
//!
//! Provides [`CommonCfg`] with the default relative-error tolerance and an
//! optional iteration cap, used by all root-finding configs.
//!
//! [`CommonCfg`] : universal fields
//! ├ `tolerance` : relative-error tolerance `|x_new - x_old| / |x_new|`
//! └ `max_iter`  : iteration cap (optional)
//!
//! [`CommonCfg::new`] initializes configuration with default values. When
//! `max_iter` stays unset each algorithm falls back to
//! [`Algorithm::default_max_iter`](super::algorithms::Algorithm::default_max_iter).


pub const DEFAULT_TOLERANCE: f64 = 0.01;


#[derive(Debug, Copy, Clone)]
pub struct CommonCfg {
    tolerance: f64,
    max_iter:  Option<usize>,
}

impl CommonCfg {
    pub fn new() -> Self {
        Self {
            tolerance : DEFAULT_TOLERANCE,
            max_iter  : None,
        }
    }

    // getters
    pub fn tolerance(&self) -> f64 { self.tolerance }
    pub fn max_iter(&self)  -> Option<usize> { self.max_iter }

    // setters (internal)
    pub(crate) fn with_tolerance(&mut self, v: f64)   { self.tolerance = v; }
    pub(crate) fn with_max_iter (&mut self, v: usize) { self.max_iter  = Some(v); }
}

impl Default for CommonCfg {
    fn default() -> Self { Self::new() }
}

macro_rules! impl_common_cfg {
    ($cfg:ty) => {
        impl $cfg {
            pub fn set_tolerance(
                mut self, v: f64
            ) -> Result<Self, $crate::root_finding::errors::ToleranceError> {
                if !v.is_finite() || v <= 0.0 || v >= 1.0 {
                    return Err(
                        $crate::root_finding::errors::ToleranceError::InvalidTolerance { got: v }
                    );
                }
                self.common.with_tolerance(v);
                Ok(self)
            }
            pub fn set_max_iter(
                mut self, v: usize
            ) -> Result<Self, $crate::root_finding::errors::RootFindingError> {
                if v == 0 {
                    return Err(
                        $crate::root_finding::errors::RootFindingError::InvalidMaxIter { got: v }
                    );
                }
                self.common.with_max_iter(v);
                Ok(self)
            }

            #[inline] #[must_use]
            pub fn tolerance(&self) -> f64 { self.common.tolerance() }
            #[inline] #[must_use]
            pub fn max_iter(&self) -> Option<usize> { self.common.max_iter() }
        }
    };
}
pub(crate) use impl_common_cfg;
