//! Textual description of a DFA and the text dump of a [`Dfa`].
//!
//! A description consists of five fields:
//!
//! - states: identifiers separated by whitespace or commas,
//! - alphabet: single characters separated by whitespace or commas,
//! - start: one declared state,
//! - accept: declared states separated by whitespace or commas,
//! - transitions: one per line, either `source symbol destination` or
//!   `source,symbol -> destination`.
//!
//! The sectioned form accepted by [`DfaDescription::from_sections`] looks like:
//!
//! ```text
//! # ends in 1
//! states: A, B
//! alphabet: 0, 1
//! start: A
//! accept: B
//! transitions:
//!     A 0 A
//!     A,1 -> B
//!     B 0 A
//!     B 1 B
//! ```

use super::model::Dfa;
use crate::{StateId, Symbol, ValidationError, ValidationResult};
use std::{fmt, str::FromStr};

/// Unparsed DFA fields, as entered by a user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DfaDescription {
    pub states: String,
    pub alphabet: String,
    pub start: String,
    pub accept: String,
    pub transitions: String,
}

/// Splits a list of identifiers separated by whitespace and/or commas.
fn tokens(input: &str) -> impl Iterator<Item = &str> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
}

fn symbol(token: &str) -> Option<Symbol> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Parses a single transition line in either of the two accepted forms.
fn transition(line: &str) -> ValidationResult<(StateId, Symbol, StateId)> {
    let malformed = || ValidationError::MalformedTransition(line.to_string());

    let fields: Vec<&str> = match line.split_once("->") {
        Some((lhs, rhs)) => {
            let lhs: Vec<&str> = lhs.split(',').map(str::trim).collect();
            let rhs = rhs.trim();
            if rhs.contains("->") || rhs.is_empty() {
                return Err(malformed());
            }
            match lhs[..] {
                [source, symbol] if !source.is_empty() => vec![source, symbol, rhs],
                _ => return Err(malformed()),
            }
        }
        None => line.split_whitespace().collect(),
    };

    match fields[..] {
        [source, sym, destination] => {
            let sym = symbol(sym).ok_or_else(malformed)?;
            Ok((source.to_string(), sym, destination.to_string()))
        }
        _ => Err(malformed()),
    }
}

impl DfaDescription {
    /// Validates the description and builds the [`Dfa`] it describes.
    pub fn parse(&self) -> ValidationResult<Dfa> {
        let alphabet = tokens(&self.alphabet)
            .map(|t| symbol(t).ok_or_else(|| ValidationError::InvalidSymbol(t.to_string())))
            .collect::<ValidationResult<Vec<_>>>()?;

        let mut builder = Dfa::builder()
            .with_states(tokens(&self.states))
            .with_alphabet(alphabet)
            .with_start(self.start.trim())
            .with_accept(tokens(&self.accept));

        for line in self.transitions.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let (source, symbol, destination) = transition(line)?;
            builder.add_transition(source, symbol, destination);
        }

        builder.build()
    }

    /// Reads a description from `key: value` sections. `transitions:` takes every following line
    /// until the next section. Lines starting with `#` are ignored, `symbols` and `final` are
    /// accepted as aliases of `alphabet` and `accept`.
    pub fn from_sections(input: &str) -> ValidationResult<Self> {
        #[derive(Clone, Copy, PartialEq, Eq)]
        enum Section {
            States,
            Alphabet,
            Start,
            Accept,
            Transitions,
        }

        fn header(line: &str) -> Option<(Section, &str)> {
            let (key, rest) = line.split_once(':')?;
            let section = match key.trim().to_ascii_lowercase().as_str() {
                "states" => Section::States,
                "alphabet" | "symbols" => Section::Alphabet,
                "start" => Section::Start,
                "accept" | "final" => Section::Accept,
                "transitions" => Section::Transitions,
                _ => return None,
            };
            Some((section, rest))
        }

        let mut description = DfaDescription::default();
        let mut seen = Vec::new();
        let mut current = None;

        for line in input.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let (section, value) = match header(trimmed) {
                Some((section, value)) => {
                    seen.push(section);
                    current = Some(section);
                    (section, value)
                }
                None => match current {
                    Some(Section::Transitions) => (Section::Transitions, trimmed),
                    _ => return Err(ValidationError::MalformedTransition(trimmed.to_string())),
                },
            };

            let field = match section {
                Section::States => &mut description.states,
                Section::Alphabet => &mut description.alphabet,
                Section::Start => &mut description.start,
                Section::Accept => &mut description.accept,
                Section::Transitions => &mut description.transitions,
            };
            if !field.is_empty() {
                field.push('\n');
            }
            field.push_str(value.trim());
        }

        for (section, name) in [
            (Section::States, "states"),
            (Section::Alphabet, "alphabet"),
            (Section::Start, "start"),
        ] {
            if !seen.contains(&section) {
                return Err(ValidationError::MissingField(name));
            }
        }

        Ok(description)
    }
}

impl FromStr for DfaDescription {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_sections(s)
    }
}

impl FromStr for Dfa {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DfaDescription::from_sections(s)?.parse()
    }
}

impl fmt::Display for Dfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |items: Vec<String>| items.join(", ");

        writeln!(f, "States: {}", join(self.states.iter().cloned().collect()))?;
        writeln!(
            f,
            "Alphabet: {}",
            join(self.alphabet.iter().map(char::to_string).collect())
        )?;
        writeln!(f, "Start: {}", self.start)?;
        writeln!(f, "Accept: {}", join(self.accept.iter().cloned().collect()))?;
        write!(f, "Transitions:")?;
        for (source, symbol, destination) in self.transitions() {
            write!(f, "\n{}, {} -> {}", source, symbol, destination)?;
        }

        Ok(())
    }
}
