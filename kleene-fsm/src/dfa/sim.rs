use super::model::Dfa;
use crate::{
    traits::{Simulatable, Simulate},
    StateId, Symbol,
};

/// Simulates a [`Dfa`]. A missing transition moves the simulator into a dead configuration in
/// which it rejects all further input.
#[derive(Debug, Clone)]
pub struct DfaSimulator<'a> {
    dfa: &'a Dfa,
    current: Option<&'a StateId>,
}

impl<'a> DfaSimulator<'a> {
    /// Returns the state the DFA is currently in, if any.
    pub fn current_state(&self) -> Option<&'a StateId> {
        self.current
    }
}

impl Simulate for DfaSimulator<'_> {
    fn is_accepting(&self) -> bool {
        self.current.is_some_and(|s| self.dfa.accept.contains(s))
    }

    fn feed(&mut self, input: Symbol) -> bool {
        self.current = self
            .current
            .and_then(|state| self.dfa.transition(state, input));

        self.is_accepting()
    }
}

impl Simulatable for Dfa {
    type Simulator<'a> = DfaSimulator<'a>;

    fn to_simulator(&self) -> Self::Simulator<'_> {
        DfaSimulator {
            dfa: self,
            current: Some(&self.start),
        }
    }
}
