use crate::{StateId, Symbol, ValidationError, ValidationResult};
use std::collections::{BTreeMap, BTreeSet};

/// Nondeterministic finite automaton with epsilon transitions.
///
/// Only constructible through the [`NfaBuilder`], which checks that the start state, the accept
/// states and every transition refer to declared states and symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nfa {
    pub(super) states: BTreeSet<StateId>,
    /// Never contains epsilon, it is not a symbol but the absence of one.
    pub(super) alphabet: BTreeSet<Symbol>,
    pub(super) transitions: Transitions,
    pub(super) start: StateId,
    pub(super) accept: BTreeSet<StateId>,
}

/// Transition relation, grouped by source state.
pub(crate) type Transitions = BTreeMap<StateId, BTreeMap<Input, BTreeSet<StateId>>>;

/// Label of an NFA transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Input {
    /// Regular input to the NFA.
    Symbol(Symbol),
    /// Epsilon input, meaning no input needed (the transition can be made at any time).
    Eps,
}

impl Nfa {
    /// Creates a builder which is used to construct an NFA.
    pub fn builder() -> NfaBuilder {
        NfaBuilder::new()
    }

    pub fn states(&self) -> &BTreeSet<StateId> {
        &self.states
    }

    pub fn alphabet(&self) -> &BTreeSet<Symbol> {
        &self.alphabet
    }

    pub fn start(&self) -> &StateId {
        &self.start
    }

    pub fn accept(&self) -> &BTreeSet<StateId> {
        &self.accept
    }

    /// Returns the set of states reachable from `state` on `input`, if any.
    pub fn targets(&self, state: &str, input: Input) -> Option<&BTreeSet<StateId>> {
        self.transitions.get(state)?.get(&input)
    }

    /// Returns an iterator over all transitions as `(source, input, destination)` triples, ordered
    /// by source and input.
    pub fn transitions(&self) -> impl Iterator<Item = (&StateId, Input, &StateId)> + '_ {
        self.transitions.iter().flat_map(|(source, by_input)| {
            by_input.iter().flat_map(move |(input, destinations)| {
                destinations
                    .iter()
                    .map(move |destination| (source, *input, destination))
            })
        })
    }

    /// Returns all states reachable from `states` using only epsilon transitions, including
    /// `states` themselves.
    pub fn eps_closure<'a, I>(&'a self, states: I) -> BTreeSet<&'a StateId>
    where
        I: IntoIterator<Item = &'a StateId>,
    {
        let mut closure = BTreeSet::new();
        let mut not_visited = Vec::new();

        for state in states {
            if closure.insert(state) {
                not_visited.push(state);
            }
        }

        while let Some(state) = not_visited.pop() {
            for next in self.targets(state, Input::Eps).into_iter().flatten() {
                if closure.insert(next) {
                    not_visited.push(next);
                }
            }
        }

        closure
    }

    /// Returns the states reachable from any state in `current` by consuming `symbol`, without
    /// following epsilon transitions afterwards.
    pub fn step<'a, I>(&'a self, current: I, symbol: Symbol) -> BTreeSet<&'a StateId>
    where
        I: IntoIterator<Item = &'a StateId>,
    {
        current
            .into_iter()
            .filter_map(|state| self.targets(state, Input::Symbol(symbol)))
            .flatten()
            .collect()
    }
}

/// Builder struct for the [`Nfa`].
#[derive(Debug, Clone, Default)]
pub struct NfaBuilder {
    states: BTreeSet<StateId>,
    alphabet: BTreeSet<Symbol>,
    transitions: Transitions,
    start: Option<StateId>,
    accept: BTreeSet<StateId>,
}

impl NfaBuilder {
    /// Creates a new empty [`NfaBuilder`].
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<StateId>,
    {
        self.states.extend(states.into_iter().map(Into::into));
        self
    }

    pub fn with_alphabet<I>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = Symbol>,
    {
        self.alphabet.extend(symbols);
        self
    }

    pub fn with_start(mut self, state: impl Into<StateId>) -> Self {
        self.start = Some(state.into());
        self
    }

    pub fn with_accept<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<StateId>,
    {
        self.accept.extend(states.into_iter().map(Into::into));
        self
    }

    /// Creates a transition between two states. Transitions are only checked when building.
    pub fn with_transition(
        mut self,
        source: impl Into<StateId>,
        input: Input,
        destination: impl Into<StateId>,
    ) -> Self {
        self.add_transition(source.into(), input, destination.into());
        self
    }

    pub fn add_transition(&mut self, source: StateId, input: Input, destination: StateId) {
        self.transitions
            .entry(source)
            .or_default()
            .entry(input)
            .or_default()
            .insert(destination);
    }

    /// Builds the [`Nfa`], checks whether all transitions are valid and whether the start and
    /// accept states exist.
    pub fn build(self) -> ValidationResult<Nfa> {
        if self.states.is_empty() {
            return Err(ValidationError::EmptyStates);
        }

        let start = match self.start {
            Some(start) if self.states.contains(&start) => start,
            Some(start) => return Err(ValidationError::UnknownStartState(start)),
            None => return Err(ValidationError::MissingField("start")),
        };

        if let Some(state) = self.accept.difference(&self.states).next() {
            return Err(ValidationError::UnknownAcceptState(state.clone()));
        }

        for (source, by_input) in self.transitions.iter() {
            if !self.states.contains(source) {
                return Err(ValidationError::UnknownState {
                    state: source.clone(),
                });
            }

            for (input, destinations) in by_input {
                if let Input::Symbol(symbol) = input {
                    if !self.alphabet.contains(symbol) {
                        return Err(ValidationError::UnknownSymbol { symbol: *symbol });
                    }
                }

                if let Some(state) = destinations.difference(&self.states).next() {
                    return Err(ValidationError::UnknownState {
                        state: state.clone(),
                    });
                }
            }
        }

        Ok(Nfa {
            states: self.states,
            alphabet: self.alphabet,
            transitions: self.transitions,
            start,
            accept: self.accept,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Input, Nfa};
    use crate::ValidationError;
    use std::collections::BTreeSet;

    /// `a(b|ε)` with an epsilon chain `q1 -> q2 -> q3`.
    fn nfa() -> Nfa {
        Nfa::builder()
            .with_states(["q0", "q1", "q2", "q3"])
            .with_alphabet(['a', 'b'])
            .with_start("q0")
            .with_accept(["q3"])
            .with_transition("q0", Input::Symbol('a'), "q1")
            .with_transition("q1", Input::Eps, "q2")
            .with_transition("q2", Input::Eps, "q3")
            .with_transition("q1", Input::Symbol('b'), "q3")
            .build()
            .unwrap()
    }

    #[test]
    fn eps_closure_follows_chains() {
        let nfa = nfa();
        let q1 = "q1".to_string();
        let closure = nfa.eps_closure([&q1]);

        let expected: BTreeSet<_> = ["q1", "q2", "q3"].iter().map(|s| s.to_string()).collect();
        assert_eq!(closure.into_iter().cloned().collect::<BTreeSet<_>>(), expected);
    }

    #[test]
    fn eps_closure_of_empty_set_is_empty() {
        let nfa = nfa();
        assert!(nfa.eps_closure(Vec::<&String>::new()).is_empty());
    }

    #[test]
    fn step_ignores_epsilon() {
        let nfa = nfa();
        let q0 = "q0".to_string();
        assert_eq!(nfa.step([&q0], 'a').len(), 1);
        assert!(nfa.step([&q0], 'b').is_empty());
    }

    #[test]
    fn transitions_are_listed_in_order() {
        let nfa = nfa();
        let listed: Vec<_> = nfa
            .transitions()
            .map(|(s, i, d)| (s.as_str(), i, d.as_str()))
            .collect();

        assert_eq!(
            listed,
            [
                ("q0", Input::Symbol('a'), "q1"),
                ("q1", Input::Symbol('b'), "q3"),
                ("q1", Input::Eps, "q2"),
                ("q2", Input::Eps, "q3"),
            ]
        );
    }

    #[test]
    fn build_rejects_undeclared_states() {
        let err = Nfa::builder()
            .with_states(["q0"])
            .with_alphabet(['a'])
            .with_start("q0")
            .with_transition("q0", Input::Symbol('a'), "q9")
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnknownState {
                state: "q9".into()
            }
        );

        let err = Nfa::builder()
            .with_states(["q0"])
            .with_start("q1")
            .build()
            .unwrap_err();
        assert_eq!(err, ValidationError::UnknownStartState("q1".into()));

        let err = Nfa::builder()
            .with_states(["q0"])
            .with_start("q0")
            .with_accept(["q2"])
            .build()
            .unwrap_err();
        assert_eq!(err, ValidationError::UnknownAcceptState("q2".into()));
    }

    #[test]
    fn build_rejects_symbols_outside_alphabet() {
        let err = Nfa::builder()
            .with_states(["q0"])
            .with_alphabet(['a'])
            .with_start("q0")
            .with_transition("q0", Input::Symbol('z'), "q0")
            .build()
            .unwrap_err();
        assert_eq!(err, ValidationError::UnknownSymbol { symbol: 'z' });
    }
}
