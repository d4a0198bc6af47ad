use super::model::Dfa;
use crate::StateId;
use log::debug;

/// Name of the sink state added by [`Dfa::complete`].
pub const DEAD_STATE: &str = "DEAD";

impl Dfa {
    /// Makes the transition function total by routing every missing transition to a
    /// non-accepting [`DEAD_STATE`] that loops on every symbol.
    ///
    /// A total automaton is returned unchanged, so completing twice is the same as completing
    /// once.
    pub fn complete(&self) -> Dfa {
        self.complete_with(DEAD_STATE)
    }

    /// Like [`complete`](Self::complete), but with a caller chosen name for the sink state. When
    /// `sink` is already a state of the automaton, `'` is appended until the name is fresh.
    pub fn complete_with(&self, sink: &str) -> Dfa {
        if self.is_total() {
            return self.clone();
        }

        let mut sink = StateId::from(sink);
        while self.states.contains(&sink) {
            sink.push('\'');
        }

        let mut dfa = self.clone();
        let mut added = 0;

        for state in self.states.iter().chain(std::iter::once(&sink)) {
            let by_symbol = dfa.transitions.entry(state.clone()).or_default();
            for symbol in self.alphabet.iter() {
                by_symbol.entry(*symbol).or_insert_with(|| {
                    added += 1;
                    sink.clone()
                });
            }
        }
        dfa.states.insert(sink.clone());

        debug!(
            "completed dfa with sink `{}`: {} transitions added",
            sink, added
        );

        dfa
    }
}

#[cfg(test)]
mod tests {
    use crate::{Dfa, Simulatable, DEAD_STATE};

    fn partial() -> Dfa {
        Dfa::builder()
            .with_states(["A", "B"])
            .with_alphabet(['0', '1'])
            .with_start("A")
            .with_accept(["B"])
            .with_transition("A", '0', "B")
            .with_transition("B", '0', "B")
            .with_transition("B", '1', "A")
            .build()
            .unwrap()
    }

    #[test]
    fn missing_transition_goes_to_sink() {
        let dfa = partial().complete();

        assert!(dfa.is_total());
        assert!(dfa.states().contains(DEAD_STATE));
        assert!(!dfa.is_accepting(DEAD_STATE));
        assert_eq!(dfa.transition("A", '1').map(String::as_str), Some(DEAD_STATE));
        for symbol in ['0', '1'] {
            assert_eq!(
                dfa.transition(DEAD_STATE, symbol).map(String::as_str),
                Some(DEAD_STATE)
            );
        }
    }

    #[test]
    fn completion_preserves_language() {
        let original = partial();
        let completed = original.complete();

        for word in ["", "0", "1", "01", "00", "010", "0101", "011"] {
            assert_eq!(
                original.accepts(word.chars()),
                completed.accepts(word.chars()),
                "{word}"
            );
        }
    }

    #[test]
    fn idempotent() {
        let once = partial().complete();
        assert_eq!(once.complete(), once);
    }

    #[test]
    fn total_dfa_is_unchanged() {
        let total = partial().complete();
        let again = total.complete_with("SINK");
        assert_eq!(again, total);
        assert!(!again.states().contains("SINK"));
    }

    #[test]
    fn sink_name_is_made_fresh() {
        let dfa = Dfa::builder()
            .with_states(["DEAD", "B"])
            .with_alphabet(['a'])
            .with_start("DEAD")
            .with_transition("DEAD", 'a', "B")
            .build()
            .unwrap()
            .complete();

        assert!(dfa.states().contains("DEAD'"));
        assert_eq!(dfa.transition("B", 'a').map(String::as_str), Some("DEAD'"));
        assert_eq!(dfa.transition("DEAD", 'a').map(String::as_str), Some("B"));
    }
}
