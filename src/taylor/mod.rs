pub mod errors;
pub mod config;
pub use config::TaylorCfg;

pub mod polynomial;
pub use polynomial::TaylorPolynomial;

pub mod report;
pub use report::{RemainderEstimate, TaylorOutput, TaylorReport, TaylorTerm};

pub mod expander;
pub use expander::{expand, expand_traced};
