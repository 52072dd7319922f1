use std::collections::VecDeque;

use crate::{OpT, Span, Token};

/// Unary minuses, groups and calls that may be nested inside each other.
pub const MAX_NESTING: usize = 256;
/// Tallest tree the parser builds.
pub const MAX_HEIGHT: usize = 1024;

pub const TOO_DEEP: &str = "expression nested too deeply";

pub struct Parser {
    tokens: VecDeque<Token>,
    /// Position directly after the last token
    pub end: usize,
    depth: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        let end = tokens.last().map_or(0, |t| t.span().end);
        Self {
            tokens: VecDeque::from(tokens),
            end,
            depth: 0,
        }
    }

    pub fn next(&mut self) -> Option<Token> {
        self.tokens.pop_front()
    }

    pub fn peek(&self) -> Option<&Token> {
        self.tokens.front()
    }

    /// Consumes the next token if it's one of the given operators.
    pub fn next_op(&mut self, ops: &[OpT]) -> Option<(OpT, Span)> {
        let op = self.peek()?.as_op().filter(|o| ops.contains(&o.typ))?;
        self.next();
        Some((op.typ, op.span))
    }

    /// Enters a nesting level opened by the token at `span`.
    pub fn enter(&mut self, span: Span) -> crate::Result<()> {
        self.depth += 1;
        if self.depth > MAX_NESTING {
            return Err(crate::Error::syntax(TOO_DEEP, span));
        }
        Ok(())
    }

    pub fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub const fn end_span(&self) -> Span {
        Span::pos(self.end)
    }
}
