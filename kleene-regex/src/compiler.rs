//! Thompson construction over the postfix form of a regex.

use crate::parser::{
    error::{CompileError, CompileResult},
    Parser, Postfix, PostfixKind,
};
use kleene_fsm::{Input, Nfa, StateId, Symbol};
use log::debug;
use std::collections::{BTreeMap, BTreeSet};

type Transitions = BTreeMap<StateId, BTreeMap<Input, BTreeSet<StateId>>>;

/// Compiles `regex` into an [`Nfa`] using a fresh [`Compiler`].
///
/// States are named `S0`, `S1`, ... in order of creation, so compiling the same regex twice
/// gives identical automata.
pub fn compile(regex: &str) -> CompileResult<Nfa> {
    Compiler::new().compile(regex)
}

/// Regex to NFA compiler. Owns the counter used to name fresh states, which makes every
/// compilation independent of all others.
#[derive(Debug, Default)]
pub struct Compiler {
    next_state: usize,
}

/// Partially built automaton with a single entry state.
///
/// Fragments are combined by value; every combinator consumes its operands and returns a new
/// fragment.
#[derive(Debug, Clone)]
struct Fragment {
    start: StateId,
    accept: BTreeSet<StateId>,
    states: BTreeSet<StateId>,
    alphabet: BTreeSet<Symbol>,
    transitions: Transitions,
}

impl Compiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiles `regex`. The compiler is consumed, its state counter is never reused.
    pub fn compile(mut self, regex: &str) -> CompileResult<Nfa> {
        let postfix = Parser::new(regex).parse()?;

        let mut stack = Vec::new();
        for Postfix { kind, pos } in postfix {
            let mut pop = || stack.pop().ok_or(CompileError::MalformedExpression { pos });

            let fragment = match kind {
                PostfixKind::Literal(c) => self.literal(c),
                PostfixKind::Star => {
                    let inner = pop()?;
                    self.star(inner)
                }
                PostfixKind::Plus => {
                    let inner = pop()?;
                    self.plus(inner)
                }
                PostfixKind::Concat => {
                    let rhs = pop()?;
                    let lhs = pop()?;
                    lhs.concat(rhs)
                }
                PostfixKind::Alt => {
                    let rhs = pop()?;
                    let lhs = pop()?;
                    self.alt(lhs, rhs)
                }
            };

            stack.push(fragment);
        }

        let fragment = match (stack.pop(), stack.is_empty()) {
            (Some(fragment), true) => fragment,
            _ => {
                return Err(CompileError::MalformedExpression {
                    pos: regex.chars().count(),
                })
            }
        };

        let nfa = fragment.into_nfa()?;
        debug!(
            "compiled `{}` into an nfa with {} states",
            regex,
            nfa.states().len()
        );

        Ok(nfa)
    }

    fn fresh(&mut self) -> StateId {
        let id = format!("S{}", self.next_state);
        self.next_state += 1;
        id
    }

    /// `start --c--> end`
    fn literal(&mut self, c: Symbol) -> Fragment {
        let start = self.fresh();
        let end = self.fresh();

        let mut transitions = Transitions::new();
        add(&mut transitions, &start, Input::Symbol(c), [end.clone()]);

        Fragment {
            states: BTreeSet::from([start.clone(), end.clone()]),
            alphabet: BTreeSet::from([c]),
            accept: BTreeSet::from([end]),
            start,
            transitions,
        }
    }

    /// Zero or more repetitions: a new start and end state, both the new start and every old
    /// accept state can skip to the end or enter the inner fragment again.
    fn star(&mut self, inner: Fragment) -> Fragment {
        let start = self.fresh();
        let end = self.fresh();
        let targets = [inner.start.clone(), end.clone()];

        let Fragment {
            accept,
            mut states,
            alphabet,
            mut transitions,
            ..
        } = inner;

        add(&mut transitions, &start, Input::Eps, targets.clone());
        for state in accept.iter() {
            add(&mut transitions, state, Input::Eps, targets.clone());
        }
        states.extend([start.clone(), end.clone()]);

        Fragment {
            start,
            accept: BTreeSet::from([end]),
            states,
            alphabet,
            transitions,
        }
    }

    /// One or more repetitions: the fragment followed by its own [`star`](Self::star).
    fn plus(&mut self, inner: Fragment) -> Fragment {
        let repeated = self.star(inner.clone());
        inner.concat(repeated)
    }

    /// Either fragment: a new start state branches into both, both accept sets join in a new end
    /// state.
    fn alt(&mut self, lhs: Fragment, rhs: Fragment) -> Fragment {
        let start = self.fresh();
        let end = self.fresh();

        let mut transitions = merge(lhs.transitions, rhs.transitions);
        add(
            &mut transitions,
            &start,
            Input::Eps,
            [lhs.start.clone(), rhs.start.clone()],
        );
        for state in lhs.accept.iter().chain(rhs.accept.iter()) {
            add(&mut transitions, state, Input::Eps, [end.clone()]);
        }

        let mut states: BTreeSet<_> = lhs.states.union(&rhs.states).cloned().collect();
        states.extend([start.clone(), end.clone()]);

        Fragment {
            start,
            accept: BTreeSet::from([end]),
            states,
            alphabet: lhs.alphabet.union(&rhs.alphabet).copied().collect(),
            transitions,
        }
    }
}

impl Fragment {
    /// `self` followed by `next`: every accept state of `self` moves on to the start of `next`.
    fn concat(self, next: Fragment) -> Fragment {
        let mut transitions = merge(self.transitions, next.transitions);
        for state in self.accept.iter() {
            add(&mut transitions, state, Input::Eps, [next.start.clone()]);
        }

        Fragment {
            start: self.start,
            accept: next.accept,
            states: self.states.union(&next.states).cloned().collect(),
            alphabet: self.alphabet.union(&next.alphabet).copied().collect(),
            transitions,
        }
    }

    fn into_nfa(self) -> CompileResult<Nfa> {
        let mut builder = Nfa::builder()
            .with_states(self.states)
            .with_alphabet(self.alphabet)
            .with_start(self.start)
            .with_accept(self.accept);

        for (source, by_input) in self.transitions {
            for (input, destinations) in by_input {
                for destination in destinations {
                    builder.add_transition(source.clone(), input, destination);
                }
            }
        }

        Ok(builder.build()?)
    }
}

fn add<I>(transitions: &mut Transitions, source: &StateId, input: Input, destinations: I)
where
    I: IntoIterator<Item = StateId>,
{
    transitions
        .entry(source.clone())
        .or_default()
        .entry(input)
        .or_default()
        .extend(destinations);
}

/// Union of two transition relations. Both may mention the same states, as they do for `+`.
fn merge(mut lhs: Transitions, rhs: Transitions) -> Transitions {
    for (source, by_input) in rhs {
        for (input, destinations) in by_input {
            add(&mut lhs, &source, input, destinations);
        }
    }
    lhs
}

#[cfg(test)]
mod tests {
    use super::{compile, Compiler};
    use crate::CompileError;
    use kleene_fsm::{Input, Simulatable};

    fn assert_language(regex: &str, accepted: &[&str], rejected: &[&str]) {
        let nfa = compile(regex).unwrap();
        for word in accepted {
            assert!(nfa.accepts(word.chars()), "`{regex}` should accept `{word}`");
        }
        for word in rejected {
            assert!(!nfa.accepts(word.chars()), "`{regex}` should reject `{word}`");
        }
    }

    #[test]
    fn alternation() {
        assert_language("a|b", &["a", "b"], &["ab", "", "c"]);
    }

    #[test]
    fn star() {
        assert_language("(ab)*", &["", "ab", "abab"], &["a", "aba", "b"]);
        assert_language("a**", &["", "a", "aaa"], &["b"]);
    }

    #[test]
    fn plus() {
        assert_language("ab+", &["ab", "abb", "abbb"], &["a", "b", ""]);
        assert_language("(a|b)+c", &["ac", "bc", "abbac"], &["c", "ab", ""]);
    }

    #[test]
    fn concatenation() {
        assert_language("abc", &["abc"], &["ab", "abcc", "acb"]);
        assert_language("a.b.c", &["abc"], &["ab", "a.b.c"]);
        assert_language("(a|b)*abb", &["abb", "aabb", "babb"], &["ab", "abba"]);
    }

    #[test]
    fn literal_symbols() {
        assert_language("?[ ]", &["?[ ]"], &["?["]);
    }

    #[test]
    fn literal_shape() {
        let nfa = compile("a").unwrap();

        assert_eq!(nfa.start(), "S0");
        assert!(nfa.accept().contains("S1"));
        assert_eq!(nfa.states().len(), 2);
        assert_eq!(nfa.targets("S0", Input::Symbol('a')).map(|t| t.len()), Some(1));
    }

    #[test]
    fn alphabet_excludes_epsilon() {
        let nfa = compile("(a|b)*c+").unwrap();
        assert_eq!(nfa.alphabet().iter().collect::<String>(), "abc");
        assert!(nfa.transitions().any(|(_, input, _)| input == Input::Eps));
    }

    #[test]
    fn compilations_are_independent() {
        let first = compile("(a|b)*").unwrap();
        let second = Compiler::new().compile("(a|b)*").unwrap();
        assert_eq!(first, second);
        assert_eq!(first.start(), "S6");
    }

    #[test]
    fn errors() {
        assert_eq!(compile(""), Err(CompileError::EmptyExpression));
        assert_eq!(
            compile("(ab"),
            Err(CompileError::UnbalancedParentheses { pos: 0 })
        );
        assert_eq!(
            compile("ab)"),
            Err(CompileError::UnbalancedParentheses { pos: 2 })
        );
        assert_eq!(
            compile("*a"),
            Err(CompileError::MalformedExpression { pos: 0 })
        );
        assert_eq!(
            compile("a|"),
            Err(CompileError::MalformedExpression { pos: 1 })
        );
        assert_eq!(
            compile("a.+"),
            Err(CompileError::MalformedExpression { pos: 1 })
        );
        assert_eq!(
            compile("()"),
            Err(CompileError::MalformedExpression { pos: 2 })
        );
    }
}
