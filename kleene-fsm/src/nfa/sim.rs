use super::model::Nfa;
use crate::{
    traits::{Simulatable, Simulate},
    StateId, Symbol,
};
use std::collections::BTreeSet;

/// Simulates an [`Nfa`] by tracking the set of states it can currently be in.
#[derive(Debug, Clone)]
pub struct NfaSimulator<'a> {
    /// Nfa we are simulating.
    nfa: &'a Nfa,
    /// Epsilon closed set of states the NFA is currently in.
    current: BTreeSet<&'a StateId>,
}

impl<'a> NfaSimulator<'a> {
    fn new(nfa: &'a Nfa) -> Self {
        Self {
            nfa,
            current: nfa.eps_closure([&nfa.start]),
        }
    }

    /// Returns the states the NFA is currently in.
    pub fn current_states(&self) -> &BTreeSet<&'a StateId> {
        &self.current
    }
}

impl Simulate for NfaSimulator<'_> {
    fn is_accepting(&self) -> bool {
        self.current.iter().any(|s| self.nfa.accept.contains(*s))
    }

    fn feed(&mut self, input: Symbol) -> bool {
        // Once the set is empty it stays empty, the remaining input is still consumed.
        let next = self.nfa.step(self.current.iter().copied(), input);
        self.current = self.nfa.eps_closure(next);

        self.is_accepting()
    }
}

impl Simulatable for Nfa {
    type Simulator<'a> = NfaSimulator<'a>;

    fn to_simulator(&self) -> Self::Simulator<'_> {
        NfaSimulator::new(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Input, Nfa, Simulatable, Simulate};

    /// `(ab)*` built by hand.
    fn ab_star() -> Nfa {
        Nfa::builder()
            .with_states(["s", "a", "b", "e"])
            .with_alphabet(['a', 'b'])
            .with_start("s")
            .with_accept(["e"])
            .with_transition("s", Input::Eps, "a")
            .with_transition("s", Input::Eps, "e")
            .with_transition("a", Input::Symbol('a'), "b")
            .with_transition("b", Input::Symbol('b'), "a")
            .with_transition("b", Input::Symbol('b'), "e")
            .build()
            .unwrap()
    }

    #[test]
    fn accepts() {
        let nfa = ab_star();

        assert!(nfa.accepts("".chars()));
        assert!(nfa.accepts("ab".chars()));
        assert!(nfa.accepts("abab".chars()));
        assert!(!nfa.accepts("a".chars()));
        assert!(!nfa.accepts("aba".chars()));
    }

    #[test]
    fn foreign_symbols_reject() {
        let nfa = ab_star();
        assert!(!nfa.accepts("abx".chars()));
        assert!(!nfa.accepts("xab".chars()));
    }

    #[test]
    fn dead_configuration_keeps_consuming() {
        let nfa = ab_star();
        let mut sim = nfa.to_simulator();

        assert!(!sim.feed('b'));
        assert!(sim.current_states().is_empty());
        assert!(!sim.feed('a'));
        assert!(!sim.feed('b'));
        assert!(sim.current_states().is_empty());
    }
}
