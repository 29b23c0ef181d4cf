//! Defines the [`RootFindingReport`] struct returned by all
//! root-finding algorithms.

/// Reasons a root-finding algorithm may terminate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// relative error dropped to or below the tolerance
    ToleranceReached,
    /// `max_iter` iterations ran without meeting the tolerance
    IterationLimit,
    /// an iterate hit `f(x) == 0` exactly; `relative_error` is `0.0`
    ExactRoot,
}


/// Final report returned by all root-finding algorithms.
///
/// [`RootFindingReport`]
/// - `root`               : best root estimate (last midpoint / iterate)
/// - `relative_error`     : last computed `|x_new - x_old| / |x_new|`;
///                          `1.0` if never computed, `0.0` on an exact root
/// - `converged`          : `relative_error <= tolerance`
/// - `iterations`         : completed iterations
/// - `evaluations`        : total evaluations of `f` (and `f'`)
/// - `termination_reason` : why the solver stopped ([`TerminationReason`])
/// - `algorithm_name`     : algorithm name (e.g. `"bisection"`)
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RootFindingReport {
    pub root               : f64,
    pub relative_error     : f64,
    pub converged          : bool,
    pub iterations         : usize,
    pub evaluations        : usize,
    pub termination_reason : TerminationReason,
    pub algorithm_name     : &'static str,
}

impl RootFindingReport {
    /// The `(root, final relative error)` pair.
    pub fn pair(&self) -> (f64, f64) {
        (self.root, self.relative_error)
    }
}
