//! Finite automata toolkit: compile regular expressions to NFAs, simulate NFAs and DFAs,
//! complete and minimize DFAs and decide whether two DFAs accept the same language.
//!
//! ```
//! use kleene::{Dfa, Simulatable};
//!
//! let nfa = kleene::compile("(a|b)*c").unwrap();
//! assert!(nfa.accepts("abbac".chars()));
//!
//! let dfa: Dfa = "states: p q\nalphabet: a\nstart: p\naccept: q\ntransitions:\np a q"
//!     .parse()
//!     .unwrap();
//! assert!(kleene::equivalent_total(&dfa, &dfa.minimize()));
//! ```

pub use kleene_fsm::{
    equivalent, Dfa, DfaBuilder, DfaDescription, DfaSimulator, Input, Nfa, NfaBuilder,
    NfaSimulator, Simulatable, Simulate, StateId, Symbol, ValidationError, ValidationResult,
    DEAD_STATE,
};
pub use kleene_regex::{compile, CompileError, CompileResult, Compiler};

pub use self::{
    config::Config,
    error::{Error, Result},
};

mod config;
mod error;

/// Decides language equivalence of two DFAs regardless of their alphabets and of missing
/// transitions: both automata are extended to the union of the alphabets and completed with a
/// `DEAD` sink before the product is explored.
pub fn equivalent_total(lhs: &Dfa, rhs: &Dfa) -> bool {
    equivalent_total_with(lhs, rhs, DEAD_STATE)
}

pub(crate) fn equivalent_total_with(lhs: &Dfa, rhs: &Dfa, sink: &str) -> bool {
    let alphabet: Vec<_> = lhs.alphabet().union(rhs.alphabet()).copied().collect();

    let lhs = lhs.with_alphabet(alphabet.iter().copied()).complete_with(sink);
    let rhs = rhs.with_alphabet(alphabet).complete_with(sink);

    equivalent(&lhs, &rhs)
}
