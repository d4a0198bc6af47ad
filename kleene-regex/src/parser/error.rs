use kleene_fsm::ValidationError;

/// Whether the compilation of the regex succeeded.
pub type CompileResult<T> = core::result::Result<T, CompileError>;

/// Information about why a regex could not be compiled. Positions count characters, not bytes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    #[error("[ERROR] empty regular expression")]
    EmptyExpression,
    #[error("[ERROR] ({pos}): unbalanced parentheses")]
    UnbalancedParentheses { pos: usize },
    #[error("[ERROR] ({pos}): operator is missing an operand")]
    MalformedExpression { pos: usize },
    /// The constructed automaton was rejected. Not produced for any input of the supported
    /// grammar.
    #[error("[ERROR] invalid automaton: {0}")]
    Automaton(#[from] ValidationError),
}
