use crate::{StateId, Symbol};

/// Whether the construction of an automaton succeeded.
pub type ValidationResult<T> = core::result::Result<T, ValidationError>;

/// Reasons an automaton description is rejected before an automaton is built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("the set of states cannot be empty")]
    EmptyStates,
    #[error("the alphabet cannot be empty")]
    EmptyAlphabet,
    #[error("alphabet symbol `{0}` must be a single character")]
    InvalidSymbol(String),
    #[error("start state `{0}` is not a declared state")]
    UnknownStartState(StateId),
    #[error("accept state `{0}` is not a declared state")]
    UnknownAcceptState(StateId),
    #[error("transition references undeclared state `{state}`")]
    UnknownState { state: StateId },
    #[error("transition references symbol `{symbol}` which is not in the alphabet")]
    UnknownSymbol { symbol: Symbol },
    #[error("malformed transition (expected `state symbol state` or `state,symbol -> state`): {0}")]
    MalformedTransition(String),
    #[error("state `{state}` has more than one transition on `{symbol}`")]
    NondeterministicTransition { state: StateId, symbol: Symbol },
    #[error("missing `{0}` section")]
    MissingField(&'static str),
}
