use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExprError {
    #[error("empty expression")]
    EmptyInput,

    #[error("unexpected end of input")]
    UnexpectedEnd,

    #[error("unexpected token `{found}` at byte {pos}")]
    UnexpectedToken { found: String, pos: usize },

    #[error("unbalanced parentheses")]
    UnbalancedParens,

    #[error("invalid number literal `{text}`")]
    InvalidNumber { text: String },

    #[error("expression nested deeper than {max} levels")]
    TooDeep { max: usize },

    #[error("unknown function `{name}`")]
    UnknownFunction { name: String },

    #[error("symbol `{name}` has no value")]
    UnboundSymbol { name: String },

    #[error("expected at most one free variable, found {vars:?}")]
    MultipleFreeVariables { vars: Vec<String> },
}
