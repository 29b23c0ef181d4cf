pub mod errors;
pub mod expr;
pub use errors::ExprError;
pub use expr::{Expr, Func};

pub mod simplify;
pub mod diff;
pub mod eval;

pub mod parser;
pub use parser::parse;
