//! Defines the struct returned by [`integrate_report`](super::riemann::integrate_report).

use crate::integration::rules::Rule;

/// Summary of a Riemann-sum run.
///
/// [`IntegrationReport`]
/// - `value`       : `h * Σ f(x_i)`
/// - `rule`        : sampling rule used
/// - `n`           : number of subintervals
/// - `h`           : subinterval width `(b - a) / n`
/// - `evaluations` : calls of `f` (always `n`)
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct IntegrationReport {
    pub value: f64,
    pub rule: Rule,
    pub n: usize,
    pub h: f64,
    pub evaluations: usize,
}
