pub mod errors;
pub mod report;
pub mod rules;
pub use rules::Rule;

pub mod riemann;
pub use riemann::{integrate, integrate_named, integrate_report, integrate_traced};
