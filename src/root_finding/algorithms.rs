//! Root-finding algorithm definitions.
//!
//! Provides the [`Algorithm`] enum, which enumerates all supported methods,
//! along with their default iteration caps.


/// Root-finding algorithm variants.
/// - [`Algorithm::Bisection`] bracketing, needs a sign change on `[a, b]`
/// - [`Algorithm::Newton`]    open, needs `f` and `f'`
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Algorithm {
    Bisection,
    Newton,
}

impl Algorithm {
    /// Default iteration count if `max_iter` is unset in config.
    ///
    /// # Notes
    /// - Applied only when `max_iter` is unset.
    /// - Values follow the usual exercise budgets: bisection halves slowly,
    ///   Newton converges quadratically near a simple root.
    pub const fn default_max_iter(self) -> usize {
        match self {
            Algorithm::Bisection => 100,
            Algorithm::Newton    => 50,
        }
    }

    pub const fn algorithm_name(self) -> &'static str {
        match self {
            Algorithm::Bisection => "bisection",
            Algorithm::Newton    => "newton",
        }
    }
}
impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.algorithm_name())
    }
}
