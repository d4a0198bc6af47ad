//! Operator-precedence (shunting-yard) conversion of a regex into postfix order.
//!
//! Precedence, from loosest to tightest: `|`, concatenation, then the postfix quantifiers `*` and
//! `+`. A concatenation is inserted between two tokens when the previous token ends an operand
//! (a literal, a quantifier or `)`) and the current token starts one (a literal or `(`).

use self::error::{CompileError, CompileResult};
use crate::tokenizer::{OperatorKind, QuantifierKind, Token, TokenKind, Tokenizer};
use log::trace;
use std::fmt;

pub(crate) mod error;

/// Instruction of the postfix program evaluated by the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PostfixKind {
    Literal(char),
    Concat,
    Alt,
    Star,
    Plus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Postfix {
    pub(crate) kind: PostfixKind,
    /// Position of the token this instruction originates from. A synthetic concatenation takes
    /// the position of the operand it precedes.
    pub(crate) pos: usize,
}

/// Entry of the operator stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    LeftParen,
    Binary(PostfixKind),
}

impl PostfixKind {
    /// Binding strength of the binary operators.
    fn precedence(self) -> u8 {
        match self {
            PostfixKind::Alt => 1,
            PostfixKind::Concat => 2,
            PostfixKind::Literal(_) | PostfixKind::Star | PostfixKind::Plus => 3,
        }
    }
}

/// Shunting-yard regex parser.
pub(crate) struct Parser<'a> {
    /// Stream of tokens being parsed.
    tokens: Tokenizer<'a>,
    output: Vec<Postfix>,
    operators: Vec<(Pending, usize)>,
}

impl<'a> Parser<'a> {
    /// Creates a new regex parser from the `input`.
    pub(crate) fn new(input: &'a str) -> Self {
        Self {
            tokens: Tokenizer::new(input),
            output: Vec::new(),
            operators: Vec::new(),
        }
    }

    /// Parses the `input` into postfix order.
    pub(crate) fn parse(mut self) -> CompileResult<Vec<Postfix>> {
        let mut prev: Option<TokenKind> = None;

        while let Some(Token { kind, pos }) = self.tokens.next() {
            match kind {
                TokenKind::Match(_) | TokenKind::Operator(OperatorKind::LeftParen) => {
                    if matches!(
                        prev,
                        Some(
                            TokenKind::Match(_)
                                | TokenKind::Quantifier(_)
                                | TokenKind::Operator(OperatorKind::RightParen)
                        )
                    ) {
                        self.binary(PostfixKind::Concat, pos);
                    }

                    match kind {
                        TokenKind::Match(c) => self.emit(PostfixKind::Literal(c), pos),
                        _ => self.operators.push((Pending::LeftParen, pos)),
                    }
                }
                TokenKind::Operator(OperatorKind::RightParen) => self.close_group(pos)?,
                TokenKind::Operator(OperatorKind::Vertical) => self.binary(PostfixKind::Alt, pos),
                TokenKind::Operator(OperatorKind::Dot) => self.binary(PostfixKind::Concat, pos),
                TokenKind::Quantifier(QuantifierKind::Asterisk) => {
                    self.emit(PostfixKind::Star, pos)
                }
                TokenKind::Quantifier(QuantifierKind::Plus) => self.emit(PostfixKind::Plus, pos),
            }

            prev = Some(kind);
        }

        if prev.is_none() {
            return Err(CompileError::EmptyExpression);
        }

        while let Some((pending, pos)) = self.operators.pop() {
            match pending {
                Pending::LeftParen => return Err(CompileError::UnbalancedParentheses { pos }),
                Pending::Binary(kind) => self.emit(kind, pos),
            }
        }

        trace!("postfix: {}", PostfixDisplay(&self.output));

        Ok(self.output)
    }

    fn emit(&mut self, kind: PostfixKind, pos: usize) {
        self.output.push(Postfix { kind, pos });
    }

    /// Pops every operator binding at least as tight as `kind` (left associativity), then pushes
    /// `kind`.
    fn binary(&mut self, kind: PostfixKind, pos: usize) {
        while let Some(&(Pending::Binary(top), top_pos)) = self.operators.last() {
            if top.precedence() < kind.precedence() {
                break;
            }
            self.operators.pop();
            self.emit(top, top_pos);
        }

        self.operators.push((Pending::Binary(kind), pos));
    }

    /// Pops operators until the matching `(`, which is discarded.
    fn close_group(&mut self, pos: usize) -> CompileResult<()> {
        loop {
            match self.operators.pop() {
                Some((Pending::LeftParen, _)) => return Ok(()),
                Some((Pending::Binary(kind), op_pos)) => self.emit(kind, op_pos),
                None => return Err(CompileError::UnbalancedParentheses { pos }),
            }
        }
    }
}

/// Renders postfix instructions with `.` for concatenation, e.g. `ab.c|`.
pub(crate) struct PostfixDisplay<'a>(pub(crate) &'a [Postfix]);

impl fmt::Display for PostfixDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for Postfix { kind, .. } in self.0 {
            match kind {
                PostfixKind::Literal(c) => write!(f, "{}", c)?,
                PostfixKind::Concat => write!(f, ".")?,
                PostfixKind::Alt => write!(f, "|")?,
                PostfixKind::Star => write!(f, "*")?,
                PostfixKind::Plus => write!(f, "+")?,
            }
        }

        Ok(())
    }
}
