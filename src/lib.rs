pub mod embeddings;
pub mod evaluator;
pub mod parser;
pub mod vector;

pub use embeddings::Embeddings;
pub use evaluator::{EvalResult, Evaluator};
pub use parser::{Ast, Op, Token, parse, tokenize};

/// Everything that can go wrong while evaluating one expression.
/// Each failure aborts the whole `evaluate` call; nothing is retried.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvalError {
    #[error("unexpected character: '{0}'")]
    UnexpectedCharacter(char),

    #[error("unexpected token: {0}")]
    UnexpectedToken(String),

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("unknown word: '{0}'")]
    UnknownWord(String),

    #[error("undefined variable: '{0}'")]
    UndefinedVariable(String),
}

pub type Result<T> = std::result::Result<T, EvalError>;
