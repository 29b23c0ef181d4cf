//! Classical single-variable numerical analysis.
//!
//! ┌ [`root_finding`]    : bisection and Newton-Raphson
//! ├ [`integration`]     : left, right and midpoint Riemann sums
//! ├ [`symbolic`]        : expression trees with exact differentiation
//! ├ [`differentiation`] : k-th derivatives, exact or by finite differences
//! ├ [`taylor`]          : Taylor polynomials with a Lagrange remainder estimate
//! └ [`trace`]           : per-iteration records for presentation layers

pub mod root_finding;
pub mod integration;
pub mod symbolic;
pub mod differentiation;
pub mod taylor;
pub mod trace;
