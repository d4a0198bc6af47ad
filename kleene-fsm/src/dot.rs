use crate::{Dfa, Input, Nfa, StateId};

/// Renders an automaton in the [graphviz](https://graphviz.org/docs/layouts/dot/) dot language.
fn to_dot<'a>(
    name: &str,
    start: &StateId,
    accept: impl Iterator<Item = &'a StateId>,
    states: impl Iterator<Item = &'a StateId>,
    transitions: impl Iterator<Item = (&'a StateId, String, &'a StateId)>,
) -> String {
    let quote = |s: &str| format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""));

    let final_dot = format!(
        "node [shape = doublecircle]; {};",
        accept.map(|s| quote(s)).collect::<Vec<_>>().join(" ")
    );
    let state_dot = format!(
        "node [shape = circle]; {};",
        states.map(|s| quote(s)).collect::<Vec<_>>().join(" ")
    );
    let transition_dot = transitions
        .map(|(source, label, destination)| {
            format!(
                "\t{} -> {} [label = {}];",
                quote(source),
                quote(destination),
                quote(&label)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "digraph {} {{\n\
            \trankdir = LR;\n\
        \n\
            \t// final states\n\
            \t{}\n\
            \t{}\n\
            \tnode [shape = point]; __start;\n\
        \n\
            \t__start -> {};\n\
            {}\n\
        }}",
        name,
        final_dot,
        state_dot,
        quote(start),
        transition_dot
    )
}

impl Nfa {
    /// Converts the NFA to the graphviz dot language. Epsilon transitions are labeled `ε`.
    pub fn to_dot(&self) -> String {
        to_dot(
            "nfa",
            self.start(),
            self.accept().iter(),
            self.states().difference(self.accept()),
            self.transitions().map(|(source, input, destination)| {
                let label = match input {
                    Input::Symbol(c) => c.to_string(),
                    Input::Eps => "ε".to_string(),
                };
                (source, label, destination)
            }),
        )
    }
}

impl Dfa {
    /// Converts the DFA to the graphviz dot language.
    pub fn to_dot(&self) -> String {
        to_dot(
            "dfa",
            self.start(),
            self.accept().iter(),
            self.states().difference(self.accept()),
            self.transitions()
                .map(|(source, symbol, destination)| (source, symbol.to_string(), destination)),
        )
    }
}
