use crate::{StateId, Symbol, ValidationError, ValidationResult};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// Deterministic finite automaton with a possibly partial transition function.
///
/// Only constructible through the [`DfaBuilder`] or derived from another [`Dfa`]. Derived
/// automata are always new values, a [`Dfa`] is never modified after it is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dfa {
    pub(super) states: BTreeSet<StateId>,
    pub(super) alphabet: BTreeSet<Symbol>,
    pub(super) transitions: Transitions,
    pub(super) start: StateId,
    pub(super) accept: BTreeSet<StateId>,
}

/// Transition function, grouped by source state. A missing entry means "no transition".
pub(super) type Transitions = BTreeMap<StateId, BTreeMap<Symbol, StateId>>;

impl Dfa {
    /// Creates a new `DfaBuilder`.
    pub fn builder() -> DfaBuilder {
        DfaBuilder::new()
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

    pub fn is_accepting(&self, state: &str) -> bool {
        self.accept.contains(state)
    }

    /// Get the transition from a state on a symbol.
    pub fn transition(&self, state: &str, symbol: Symbol) -> Option<&StateId> {
        self.transitions.get(state)?.get(&symbol)
    }

    /// Returns an iterator over all transitions as `(source, symbol, destination)` triples, ordered
    /// by source and symbol.
    pub fn transitions(&self) -> impl Iterator<Item = (&StateId, Symbol, &StateId)> + '_ {
        self.transitions.iter().flat_map(|(source, by_symbol)| {
            by_symbol
                .iter()
                .map(move |(symbol, destination)| (source, *symbol, destination))
        })
    }

    /// Number of defined `(state, symbol)` pairs.
    pub fn transition_count(&self) -> usize {
        self.transitions.values().map(BTreeMap::len).sum()
    }

    /// Whether every state has a transition on every symbol of the alphabet.
    pub fn is_total(&self) -> bool {
        self.transition_count() == self.states.len() * self.alphabet.len()
    }

    /// Find all states reachable from the start state.
    pub fn reachable_states(&self) -> BTreeSet<&StateId> {
        let mut reachable = BTreeSet::from([&self.start]);
        let mut queue = VecDeque::from([&self.start]);

        while let Some(state) = queue.pop_front() {
            for next in self.transitions.get(state).into_iter().flat_map(|t| t.values()) {
                if reachable.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        reachable
    }

    /// Returns a copy of the automaton with `symbols` added to its alphabet. No transitions are
    /// added, so new symbols make the automaton partial.
    pub fn with_alphabet<I>(&self, symbols: I) -> Dfa
    where
        I: IntoIterator<Item = Symbol>,
    {
        let mut dfa = self.clone();
        dfa.alphabet.extend(symbols);
        dfa
    }
}

/// Builder struct for the [`Dfa`].
#[derive(Debug, Clone, Default)]
pub struct DfaBuilder {
    states: BTreeSet<StateId>,
    alphabet: BTreeSet<Symbol>,
    transitions: Vec<(StateId, Symbol, StateId)>,
    start: Option<StateId>,
    accept: BTreeSet<StateId>,
}

impl DfaBuilder {
    /// Creates a new empty [`DfaBuilder`].
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

    pub fn with_transition(
        mut self,
        source: impl Into<StateId>,
        symbol: Symbol,
        destination: impl Into<StateId>,
    ) -> Self {
        self.add_transition(source.into(), symbol, destination.into());
        self
    }

    /// Adds a transition. Transitions are only checked when building.
    pub fn add_transition(&mut self, source: StateId, symbol: Symbol, destination: StateId) {
        self.transitions.push((source, symbol, destination));
    }

    /// Builds the [`Dfa`] after checking that the sets are non-empty, the start and accept states
    /// are declared and that every transition is deterministic and only uses declared states and
    /// symbols.
    pub fn build(self) -> ValidationResult<Dfa> {
        if self.states.is_empty() {
            return Err(ValidationError::EmptyStates);
        }
        if self.alphabet.is_empty() {
            return Err(ValidationError::EmptyAlphabet);
        }

        let start = match self.start {
            Some(start) if self.states.contains(&start) => start,
            Some(start) => return Err(ValidationError::UnknownStartState(start)),
            None => return Err(ValidationError::MissingField("start")),
        };

        if let Some(state) = self.accept.difference(&self.states).next() {
            return Err(ValidationError::UnknownAcceptState(state.clone()));
        }

        let mut transitions = Transitions::new();
        for (source, symbol, destination) in self.transitions {
            if let Some(state) = [&source, &destination]
                .into_iter()
                .find(|s| !self.states.contains(*s))
            {
                return Err(ValidationError::UnknownState {
                    state: state.clone(),
                });
            }
            if !self.alphabet.contains(&symbol) {
                return Err(ValidationError::UnknownSymbol { symbol });
            }

            let by_symbol = transitions.entry(source.clone()).or_default();
            match by_symbol.get(&symbol) {
                Some(existing) if *existing != destination => {
                    return Err(ValidationError::NondeterministicTransition {
                        state: source,
                        symbol,
                    });
                }
                _ => {
                    by_symbol.insert(symbol, destination);
                }
            }
        }

        Ok(Dfa {
            states: self.states,
            alphabet: self.alphabet,
            transitions,
            start,
            accept: self.accept,
        })
    }
}
