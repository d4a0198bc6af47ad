use super::model::{Dfa, Transitions};
use crate::{StateId, Symbol};
use log::{debug, trace, warn};
use std::collections::{BTreeSet, HashMap, HashSet};

type Block<'a> = BTreeSet<&'a StateId>;

/// Partition of the states of a [`Dfa`] into disjoint, non-empty blocks, with an index from each
/// state to the block it currently belongs to.
struct Partition<'a> {
    blocks: Vec<Block<'a>>,
    block_of: HashMap<&'a StateId, usize>,
}

impl<'a> Partition<'a> {
    fn new(initial: impl IntoIterator<Item = Block<'a>>) -> Self {
        let mut partition = Self {
            blocks: Vec::new(),
            block_of: HashMap::new(),
        };

        for block in initial.into_iter().filter(|b| !b.is_empty()) {
            partition.push(block);
        }

        partition
    }

    fn push(&mut self, block: Block<'a>) -> usize {
        let idx = self.blocks.len();
        self.block_of.extend(block.iter().map(|s| (*s, idx)));
        self.blocks.push(block);
        idx
    }

    /// Splits block `idx` into `inside` (which keeps the index) and `outside` (which gets a new
    /// index). Returns the new index.
    fn split(&mut self, idx: usize, inside: Block<'a>, outside: Block<'a>) -> usize {
        self.blocks[idx] = inside;
        self.push(outside)
    }
}

/// Reverse transition function: `(destination, symbol)` to the set of sources.
fn predecessors(dfa: &Dfa) -> HashMap<(&StateId, Symbol), Vec<&StateId>> {
    dfa.transitions().fold(
        HashMap::new(),
        |mut predecessors, (source, symbol, destination)| {
            predecessors
                .entry((destination, symbol))
                .or_insert_with(Vec::new)
                .push(source);
            predecessors
        },
    )
}

/// Name of the state representing `block` in the minimized automaton, e.g. `{A,C}`.
fn block_name(block: &Block) -> StateId {
    let members: Vec<&str> = block.iter().map(|s| s.as_str()).collect();
    format!("{{{}}}", members.join(","))
}

impl Dfa {
    /// Minimizes the DFA by partition refinement and returns a new automaton whose states are
    /// the equivalence classes of this one.
    ///
    /// Every class is named after its members, sorted and comma-joined inside braces (`{A,B}`),
    /// which makes the result reproducible. Unreachable states are kept.
    ///
    /// A state without a transition on a symbol is never a predecessor on that symbol. On a
    /// partial DFA this can keep a missing transition apart from a transition into a rejecting
    /// trap, or merge states whose languages differ when the rejecting block is never used as a
    /// splitter. Run [`complete`](Self::complete) first for a minimal, language-preserving result.
    pub fn minimize(&self) -> Dfa {
        if !self.is_total() {
            warn!("minimizing a partial dfa, missing transitions are not distinguishing");
        }

        let partition = self.refine();

        debug!(
            "minimized dfa from {} to {} states",
            self.states.len(),
            partition.blocks.len()
        );

        self.quotient(&partition)
    }

    /// Refines `{accept, states - accept}` until no symbol distinguishes two states of the same
    /// block.
    fn refine(&self) -> Partition<'_> {
        let (accepting, rejecting): (Block, Block) =
            self.states.iter().partition(|s| self.accept.contains(*s));
        let mut partition = Partition::new([accepting, rejecting]);

        // Block 0 is the accepting block, or the only block when nothing accepts.
        let mut worklist = vec![0];
        let mut pending = HashSet::from([0]);

        let predecessors = predecessors(self);

        while let Some(splitter) = worklist.pop() {
            pending.remove(&splitter);
            let splitter_states = partition.blocks[splitter].clone();

            for symbol in self.alphabet.iter() {
                let x: Block = splitter_states
                    .iter()
                    .filter_map(|t| predecessors.get(&(*t, *symbol)))
                    .flatten()
                    .copied()
                    .collect();

                let touched: BTreeSet<usize> = x.iter().map(|s| partition.block_of[s]).collect();

                for y in touched {
                    let (inside, outside): (Block, Block) =
                        partition.blocks[y].iter().copied().partition(|s| x.contains(s));
                    if outside.is_empty() {
                        continue;
                    }

                    trace!(
                        "splitting {} on `{}` into {} and {}",
                        block_name(&partition.blocks[y]),
                        symbol,
                        block_name(&inside),
                        block_name(&outside)
                    );

                    let smaller_is_inside = inside.len() <= outside.len();
                    let new = partition.split(y, inside, outside);

                    if pending.contains(&y) {
                        worklist.push(new);
                        pending.insert(new);
                    } else {
                        let smaller = if smaller_is_inside { y } else { new };
                        worklist.push(smaller);
                        pending.insert(smaller);
                    }
                }
            }
        }

        partition
    }

    /// Builds the automaton whose states are the blocks of `partition`.
    fn quotient(&self, partition: &Partition) -> Dfa {
        let names: Vec<StateId> = partition.blocks.iter().map(block_name).collect();
        let name_of = |state: &StateId| names[partition.block_of[state]].clone();

        let accept = partition
            .blocks
            .iter()
            .zip(names.iter())
            .filter(|(block, _)| block.iter().all(|s| self.accept.contains(*s)))
            .map(|(_, name)| name.clone())
            .collect();

        let mut transitions = Transitions::new();
        for (block, name) in partition.blocks.iter().zip(names.iter()) {
            // Blocks are never empty, and all members agree on the destination block.
            let Some(representative) = block.first() else {
                continue;
            };

            let by_symbol = transitions.entry(name.clone()).or_default();
            for symbol in self.alphabet.iter() {
                if let Some(destination) = self.transition(representative, *symbol) {
                    by_symbol.insert(*symbol, name_of(destination));
                }
            }
        }
        transitions.retain(|_, by_symbol| !by_symbol.is_empty());

        Dfa {
            states: names.iter().cloned().collect(),
            alphabet: self.alphabet.clone(),
            transitions,
            start: name_of(&self.start),
            accept,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Dfa, Simulatable};

    #[test]
    fn already_minimal() {
        let dfa = Dfa::builder()
            .with_states(["A", "B"])
            .with_alphabet(['0', '1'])
            .with_start("A")
            .with_accept(["B"])
            .with_transition("A", '0', "A")
            .with_transition("A", '1', "B")
            .with_transition("B", '0', "B")
            .with_transition("B", '1', "B")
            .build()
            .unwrap();

        let minimized = dfa.minimize();

        assert_eq!(minimized.states().len(), 2);
        assert_eq!(minimized.start(), "{A}");
        assert!(minimized.accept().contains("{B}"));
        assert!(dfa.accepts("011".chars()));
        assert!(minimized.accepts("011".chars()));
        assert!(!minimized.accepts("000".chars()));
    }

    #[test]
    fn merges_equivalent_states() {
        // Accepts words ending in `1`. `B` and `D` as well as `A` and `C` are equivalent.
        let dfa = Dfa::builder()
            .with_states(["A", "B", "C", "D"])
            .with_alphabet(['0', '1'])
            .with_start("A")
            .with_accept(["B", "D"])
            .with_transition("A", '0', "C")
            .with_transition("A", '1', "B")
            .with_transition("B", '0', "C")
            .with_transition("B", '1', "D")
            .with_transition("C", '0', "A")
            .with_transition("C", '1', "D")
            .with_transition("D", '0', "A")
            .with_transition("D", '1', "B")
            .build()
            .unwrap();

        let minimized = dfa.minimize();

        let states: Vec<_> = minimized.states().iter().map(String::as_str).collect();
        assert_eq!(states, ["{A,C}", "{B,D}"]);
        assert_eq!(minimized.start(), "{A,C}");
        assert_eq!(
            minimized.transition("{A,C}", '1').map(String::as_str),
            Some("{B,D}")
        );
        assert_eq!(
            minimized.transition("{B,D}", '0').map(String::as_str),
            Some("{A,C}")
        );

        for word in ["", "1", "10", "0101", "111", "1110"] {
            assert_eq!(dfa.accepts(word.chars()), minimized.accepts(word.chars()));
        }
    }

    #[test]
    fn unreachable_states_are_kept() {
        let dfa = Dfa::builder()
            .with_states(["A", "B", "U"])
            .with_alphabet(['a'])
            .with_start("A")
            .with_accept(["B", "U"])
            .with_transition("A", 'a', "B")
            .with_transition("B", 'a', "B")
            .with_transition("U", 'a', "U")
            .build()
            .unwrap();

        let minimized = dfa.minimize();
        let states: Vec<_> = minimized.states().iter().map(String::as_str).collect();
        assert_eq!(states, ["{A}", "{B,U}"]);
    }

    #[test]
    fn nothing_accepts() {
        let dfa = Dfa::builder()
            .with_states(["A", "B"])
            .with_alphabet(['a'])
            .with_start("A")
            .with_transition("A", 'a', "B")
            .with_transition("B", 'a', "A")
            .build()
            .unwrap();

        let minimized = dfa.minimize();
        assert_eq!(minimized.states().len(), 1);
        assert!(minimized.accept().is_empty());
        assert_eq!(
            minimized.transition("{A,B}", 'a').map(String::as_str),
            Some("{A,B}")
        );
    }

    #[test]
    fn idempotent_up_to_naming() {
        let dfa = Dfa::builder()
            .with_states(["p", "q", "r"])
            .with_alphabet(['x'])
            .with_start("p")
            .with_accept(["q", "r"])
            .with_transition("p", 'x', "q")
            .with_transition("q", 'x', "r")
            .with_transition("r", 'x', "q")
            .build()
            .unwrap();

        let once = dfa.minimize();
        let twice = once.minimize();

        assert_eq!(once.states().len(), 2);
        assert_eq!(twice.states().len(), once.states().len());
        assert_eq!(twice.start(), "{{p}}");
        assert!(twice.is_equivalent(&once));
    }

    #[test]
    fn missing_transition_is_not_a_trap() {
        // `A` and `C` both accept exactly `a`, but only `C` has a `b` transition (into the trap).
        let dfa = Dfa::builder()
            .with_states(["A", "B", "C", "T"])
            .with_alphabet(['a', 'b'])
            .with_start("A")
            .with_accept(["B"])
            .with_transition("A", 'a', "B")
            .with_transition("C", 'a', "B")
            .with_transition("C", 'b', "T")
            .with_transition("T", 'a', "T")
            .with_transition("T", 'b', "T")
            .build()
            .unwrap();

        let minimized = dfa.minimize();

        let states: Vec<_> = minimized.states().iter().map(String::as_str).collect();
        assert_eq!(states, ["{A}", "{B}", "{C}", "{T}"]);
        assert_eq!(minimized.transition("{A}", 'a').map(String::as_str), Some("{B}"));
        assert_eq!(minimized.transition("{A}", 'b'), None);
        assert_eq!(minimized.transition("{C}", 'b').map(String::as_str), Some("{T}"));
        assert_eq!(minimized.transition("{B}", 'a'), None);

        let completed = dfa.complete().minimize();
        let states: Vec<_> = completed.states().iter().map(String::as_str).collect();
        assert_eq!(states, ["{A,C}", "{B}", "{DEAD,T}"]);
    }

    #[test]
    fn partial_blocks_follow_the_representative() {
        // The rejecting block is never a splitter, so `C` is merged with `A` and `T` although
        // only `C` accepts `ba`.
        let dfa = Dfa::builder()
            .with_states(["A", "B", "C", "T"])
            .with_alphabet(['a', 'b'])
            .with_start("C")
            .with_accept(["B"])
            .with_transition("A", 'a', "B")
            .with_transition("C", 'a', "B")
            .with_transition("C", 'b', "T")
            .with_transition("T", 'a', "B")
            .build()
            .unwrap();

        let minimized = dfa.minimize();

        let states: Vec<_> = minimized.states().iter().map(String::as_str).collect();
        assert_eq!(states, ["{A,C,T}", "{B}"]);
        assert_eq!(minimized.start(), "{A,C,T}");
        assert_eq!(
            minimized.transition("{A,C,T}", 'a').map(String::as_str),
            Some("{B}")
        );
        assert_eq!(minimized.transition("{A,C,T}", 'b'), None);
        assert_eq!(minimized.transitions().count(), 1);

        assert!(dfa.accepts("ba".chars()));
        assert!(!minimized.accepts("ba".chars()));
        assert!(dfa.complete().minimize().accepts("ba".chars()));
    }
}
