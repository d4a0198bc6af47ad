use std::{iter::Enumerate, str::Chars};

/// Regex tokenizer.
pub(crate) struct Tokenizer<'a> {
    /// Iterator over the characters in the input (as defined in the rust `char` type), along
    /// with their position in the input.
    iter: Enumerate<Chars<'a>>,
}

/// Regex token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token {
    pub(crate) kind: TokenKind,
    /// Character position of the token in the input.
    pub(crate) pos: usize,
}

/// Regex token kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Operator(OperatorKind),
    Quantifier(QuantifierKind),
    Match(char),
}

/// Regex operator kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OperatorKind {
    LeftParen,
    RightParen,
    Vertical,
    /// Explicit concatenation.
    Dot,
}

/// Regex quantifier kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum QuantifierKind {
    Asterisk,
    Plus,
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let (pos, ch) = self.iter.next()?;

        let kind = match ch {
            '(' => TokenKind::Operator(OperatorKind::LeftParen),
            ')' => TokenKind::Operator(OperatorKind::RightParen),
            '|' => TokenKind::Operator(OperatorKind::Vertical),
            '.' => TokenKind::Operator(OperatorKind::Dot),
            '*' => TokenKind::Quantifier(QuantifierKind::Asterisk),
            '+' => TokenKind::Quantifier(QuantifierKind::Plus),

            a => TokenKind::Match(a),
        };

        Some(Token { kind, pos })
    }
}

impl<'a> Tokenizer<'a> {
    /// Creates a new tokenizer.
    pub(crate) fn new(input: &'a str) -> Self {
        Self {
            iter: input.chars().enumerate(),
        }
    }
}
