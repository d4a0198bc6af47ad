use kleene_fsm::ValidationError;
use kleene_regex::CompileError;

pub type Result<T> = core::result::Result<T, Error>;

/// Everything that can go wrong between reading user input and producing an answer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid automaton: {0}")]
    Validation(#[from] ValidationError),
    #[error("invalid regular expression: {0}")]
    Compile(#[from] CompileError),
    #[error("{what} exceeds the configured limit of {limit} (got {actual})")]
    LimitExceeded {
        what: &'static str,
        limit: usize,
        actual: usize,
    },
    #[error("invalid value for `{var}`: {reason}")]
    Config { var: &'static str, reason: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("usage: {0}")]
    Usage(String),
}
