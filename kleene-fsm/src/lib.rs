//! Finite automata over single-character symbols.
//!
//! Provides the [`Nfa`] and [`Dfa`] value types, their simulation, and the DFA algorithms:
//! completion with a sink state, minimization by partition refinement and equivalence checking
//! over the product automaton.

pub use self::{
    dfa::{equivalent, Dfa, DfaBuilder, DfaDescription, DfaSimulator, DEAD_STATE},
    error::{ValidationError, ValidationResult},
    nfa::{Input, Nfa, NfaBuilder, NfaSimulator},
    traits::{Simulatable, Simulate},
};

/// Opaque identifier of a state. Unique within one automaton.
pub type StateId = String;

/// Atomic input token.
pub type Symbol = char;

mod dfa;
mod dot;
mod error;
mod nfa;
mod traits;
