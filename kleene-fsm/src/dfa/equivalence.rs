use super::model::Dfa;
use crate::Symbol;
use log::{debug, warn};
use std::collections::{BTreeSet, HashSet, VecDeque};

/// Decides whether two DFAs accept the same language by a breadth-first search over the pairs of
/// states reachable in their product automaton.
///
/// Fails on the first pair where exactly one side accepts. A pair where only one side has a
/// transition on a symbol is not expanded, so automata that differ only in missing transitions
/// can be reported equivalent. Complete both automata over a shared alphabet for a sound answer.
pub fn equivalent(lhs: &Dfa, rhs: &Dfa) -> bool {
    if !lhs.is_total() || !rhs.is_total() {
        warn!("checking equivalence of a partial dfa, missing transitions are not compared");
    }

    let alphabet: BTreeSet<Symbol> = lhs.alphabet.union(&rhs.alphabet).copied().collect();

    let start = (&lhs.start, &rhs.start);
    let mut visited = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);

    while let Some((s1, s2)) = queue.pop_front() {
        if lhs.is_accepting(s1) != rhs.is_accepting(s2) {
            debug!(
                "dfas are not equivalent: `{}` and `{}` disagree on acceptance",
                s1, s2
            );
            return false;
        }

        for symbol in alphabet.iter() {
            if let (Some(t1), Some(t2)) = (lhs.transition(s1, *symbol), rhs.transition(s2, *symbol))
            {
                if visited.insert((t1, t2)) {
                    queue.push_back((t1, t2));
                }
            }
        }
    }

    debug!("dfas are equivalent after visiting {} pairs", visited.len());
    true
}

impl Dfa {
    /// Whether this DFA accepts the same language as `other`, see [`equivalent`].
    pub fn is_equivalent(&self, other: &Dfa) -> bool {
        equivalent(self, other)
    }
}
