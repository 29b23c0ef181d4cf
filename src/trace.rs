//! Per-iteration observation hook.
//!
//! Every public operation has a `_traced` form that takes a `&mut dyn TraceSink`
//! and hands it one [`TraceRecord`] per iteration, sample or term. The plain
//! form delegates with [`NoTrace`]. Sinks only observe; they never change the
//! returned result.
//!
//! ┌ [`NoTrace`]           : discards everything
//! └ `Vec<TraceRecord>`    : collects records in emission order

use serde::Serialize;


/// Receiver for intermediate algorithm state.
pub trait TraceSink {
    fn record(&mut self, record: TraceRecord);
}

/// Sink that drops every record.
#[derive(Debug, Default, Copy, Clone)]
pub struct NoTrace;

impl TraceSink for NoTrace {
    #[inline]
    fn record(&mut self, _record: TraceRecord) {}
}

impl TraceSink for Vec<TraceRecord> {
    fn record(&mut self, record: TraceRecord) {
        self.push(record);
    }
}


/// Which half of the bracket bisection kept.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum BisectionAction {
    /// `f(a) * f(m) < 0`, so `b = m`
    KeepLeft,
    /// `f(m) * f(b) < 0`, so `a = m`
    KeepRight,
    /// neither product negative; `m` returned as an exact root
    ExactRoot,
}

/// A numeric value or the rendered text of a symbolic one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TraceValue {
    Number(f64),
    Expression(String),
}

/// One observation emitted by an algorithm.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TraceRecord {
    Bisection {
        iteration: usize,
        a: f64,
        b: f64,
        midpoint: f64,
        fa: f64,
        fm: f64,
        fb: f64,
        /// `None` on the first iteration (no previous midpoint)
        relative_error: Option<f64>,
        action: BisectionAction,
    },
    Newton {
        iteration: usize,
        x: f64,
        fx: f64,
        dfx: f64,
        x_next: f64,
        relative_error: f64,
    },
    Quadrature {
        index: usize,
        x: f64,
        fx: f64,
        partial_sum: f64,
    },
    Derivative {
        order: usize,
        center: f64,
        value: TraceValue,
        mode: &'static str,
    },
    TaylorTerm {
        order: usize,
        derivative: TraceValue,
        coefficient: TraceValue,
        /// contribution at the evaluation point, when one was given
        contribution: Option<f64>,
        /// running polynomial value at the evaluation point
        partial_sum: Option<f64>,
    },
    Remainder {
        order: usize,
        bound: f64,
        value: f64,
    },
}
