pub mod errors;
pub mod config;
pub use config::FiniteDifferenceCfg;

pub mod function;
pub use function::{Function, Mode, SymbolicFunction};

pub mod finite_difference;
pub use finite_difference::FiniteDifference;

pub mod engine;
pub use engine::{derivative, derivative_traced, DerivativeEngine, DerivativeValue};
