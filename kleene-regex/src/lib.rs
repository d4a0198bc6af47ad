//! Regular expression to NFA compiler.
//!
//! The supported grammar is deliberately small: single-character literals, concatenation
//! (implicit or with an explicit `.`), alternation with `|`, the postfix quantifiers `*` and `+`,
//! and grouping with parentheses. Every character other than `(`, `)`, `|`, `.`, `*` and `+` is a
//! literal.
//!
//! ```
//! use kleene_fsm::Simulatable;
//!
//! let nfa = kleene_regex::compile("(ab)*").unwrap();
//! assert!(nfa.accepts("abab".chars()));
//! assert!(!nfa.accepts("aba".chars()));
//! ```

pub use self::{
    compiler::{compile, Compiler},
    parser::error::{CompileError, CompileResult},
};

mod compiler;
mod parser;
mod tokenizer;
