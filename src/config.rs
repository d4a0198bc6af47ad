use crate::{Error, Result};
use kleene_fsm::{Dfa, Nfa, DEAD_STATE};
use log::debug;

pub const MAX_REGEX_LEN_VAR: &str = "KLEENE_MAX_REGEX_LEN";
pub const MAX_STATES_VAR: &str = "KLEENE_MAX_STATES";
pub const SINK_STATE_VAR: &str = "KLEENE_SINK_STATE";

/// Bounds applied to user input before it reaches the automaton operations, and the name used
/// for the sink state when completing a DFA.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum regex length in characters.
    pub max_regex_len: usize,
    /// Maximum number of states of any automaton read or produced.
    pub max_states: usize,
    pub sink_state: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_regex_len: 1024,
            max_states: 4096,
            sink_state: DEAD_STATE.to_string(),
        }
    }
}

impl Config {
    pub fn with_max_regex_len(mut self, max_regex_len: usize) -> Self {
        self.max_regex_len = max_regex_len;
        self
    }

    pub fn with_max_states(mut self, max_states: usize) -> Self {
        self.max_states = max_states;
        self
    }

    pub fn with_sink_state(mut self, sink_state: impl Into<String>) -> Self {
        self.sink_state = sink_state.into();
        self
    }

    /// Reads the configuration from the `KLEENE_*` environment variables, using the default for
    /// every variable that is not set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|var| match std::env::var(var) {
            Ok(value) => Ok(Some(value)),
            Err(std::env::VarError::NotPresent) => Ok(None),
            Err(std::env::VarError::NotUnicode(_)) => Err(Error::Config {
                var,
                reason: "not valid unicode".to_string(),
            }),
        })
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&'static str) -> Result<Option<String>>,
    {
        let limit = |var: &'static str| -> Result<Option<usize>> {
            let Some(value) = lookup(var)? else {
                return Ok(None);
            };
            match value.trim().parse::<usize>() {
                Ok(0) => Err(Error::Config {
                    var,
                    reason: "must be greater than zero".to_string(),
                }),
                Ok(limit) => Ok(Some(limit)),
                Err(e) => Err(Error::Config {
                    var,
                    reason: format!("`{}` is not a number ({})", value, e),
                }),
            }
        };

        let mut config = Config::default();

        if let Some(max_regex_len) = limit(MAX_REGEX_LEN_VAR)? {
            config.max_regex_len = max_regex_len;
        }
        if let Some(max_states) = limit(MAX_STATES_VAR)? {
            config.max_states = max_states;
        }
        if let Some(sink_state) = lookup(SINK_STATE_VAR)? {
            let sink_state = sink_state.trim();
            if sink_state.is_empty() || sink_state.contains(|c: char| c.is_whitespace() || c == ',')
            {
                return Err(Error::Config {
                    var: SINK_STATE_VAR,
                    reason: format!("`{}` is not a valid state name", sink_state),
                });
            }
            config.sink_state = sink_state.to_string();
        }

        debug!("using {:?}", config);
        Ok(config)
    }

    /// Compiles `regex` after checking its length, then checks the size of the result.
    pub fn compile(&self, regex: &str) -> Result<Nfa> {
        check("regex length", self.max_regex_len, regex.chars().count())?;
        let nfa = kleene_regex::compile(regex)?;
        check("number of nfa states", self.max_states, nfa.states().len())?;
        Ok(nfa)
    }

    /// Checks that `dfa`, and its completion, stay within the state limit.
    pub fn check_dfa(&self, dfa: &Dfa) -> Result<()> {
        let states = dfa.states().len() + usize::from(!dfa.is_total());
        check("number of dfa states", self.max_states, states)
    }

    /// [`Dfa::complete_with`] using the configured sink name.
    pub fn complete(&self, dfa: &Dfa) -> Result<Dfa> {
        self.check_dfa(dfa)?;
        Ok(dfa.complete_with(&self.sink_state))
    }

    /// [`Dfa::minimize`] after checking the state limit. A partial `dfa` is minimized as is.
    pub fn minimize(&self, dfa: &Dfa) -> Result<Dfa> {
        self.check_dfa(dfa)?;
        Ok(dfa.minimize())
    }

    /// [`equivalent_total`](crate::equivalent_total) using the configured sink name. Both
    /// automata are checked over the union of their alphabets, as that is what gets completed.
    pub fn equivalent(&self, lhs: &Dfa, rhs: &Dfa) -> Result<bool> {
        let alphabet: Vec<_> = lhs.alphabet().union(rhs.alphabet()).copied().collect();
        self.check_dfa(&lhs.with_alphabet(alphabet.iter().copied()))?;
        self.check_dfa(&rhs.with_alphabet(alphabet))?;
        Ok(crate::equivalent_total_with(lhs, rhs, &self.sink_state))
    }
}

fn check(what: &'static str, limit: usize, actual: usize) -> Result<()> {
    if actual > limit {
        return Err(Error::LimitExceeded {
            what,
            limit,
            actual,
        });
    }
    Ok(())
}
