use std::iter::Peekable;
use std::str::Chars;

use tracing::{debug, trace};

use crate::Span;

pub use token::*;

mod token;

struct Lexer<'a> {
    tokens: Vec<Token>,
    literal: String,
    chars: Peekable<Chars<'a>>,
    cursor: usize,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            tokens: Vec::new(),
            literal: String::new(),
            chars: input.chars().peekable(),
            cursor: 0,
        }
    }

    fn next(&mut self) -> Option<char> {
        self.cursor += 1;
        self.chars.next()
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn next_if(&mut self, f: impl Fn(char) -> bool) -> Option<char> {
        match self.peek() {
            Some(c) if f(c) => self.next(),
            _ => None,
        }
    }

    const fn pos(&self) -> usize {
        self.cursor.saturating_sub(1)
    }

    fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }
}

/// Splits the input into tokens.
///
/// Fails on the first character that can't start a token and on identifiers
/// that aren't builtin functions.
pub fn tokenize(input: &str) -> crate::Result<Vec<Token>> {
    let mut lexer = Lexer::new(input);

    while let Some(c) = lexer.next() {
        let span = Span::pos(lexer.pos());
        match c {
            c if c.is_whitespace() => (),
            '+' => lexer.push(Token::op(OpT::Add, span)),
            '-' => lexer.push(Token::op(OpT::Sub, span)),
            '*' => lexer.push(Token::op(OpT::Mul, span)),
            '/' => lexer.push(Token::op(OpT::Div, span)),
            '(' => lexer.push(Token::par(ParT::Open, span)),
            ')' => lexer.push(Token::par(ParT::Close, span)),
            ',' => lexer.push(Token::comma(span)),
            '0'..='9' | '.' => num_literal(&mut lexer, c)?,
            'a'..='z' | 'A'..='Z' | '_' => ident(&mut lexer, c)?,
            c => return Err(crate::Error::UnexpectedCharacter { char: c, span }),
        }
    }

    debug!(count = lexer.tokens.len(), "tokenized input");
    trace!(tokens = ?lexer.tokens);
    Ok(lexer.tokens)
}

fn num_literal(lexer: &mut Lexer<'_>, first: char) -> crate::Result<()> {
    let start = lexer.pos();
    lexer.literal.clear();
    lexer.literal.push(first);
    while let Some(c) = lexer.next_if(|c| c.is_ascii_digit() || c == '.') {
        lexer.literal.push(c);
    }
    let span = Span::of(start, lexer.pos() + 1);

    let dots = lexer.literal.chars().filter(|&c| c == '.').count();
    if dots > 1 || dots == lexer.literal.len() {
        return Err(crate::Error::syntax("invalid number literal", span));
    }

    let val = match lexer.literal.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        Ok(_) => return Err(crate::Error::syntax("number literal out of range", span)),
        Err(_) => return Err(crate::Error::syntax("invalid number literal", span)),
    };
    lexer.push(Token::num(val, span));
    Ok(())
}

fn ident(lexer: &mut Lexer<'_>, first: char) -> crate::Result<()> {
    let start = lexer.pos();
    lexer.literal.clear();
    lexer.literal.push(first);
    while let Some(c) = lexer.next_if(|c| c.is_ascii_alphanumeric() || c == '_') {
        lexer.literal.push(c);
    }
    let span = Span::of(start, lexer.pos() + 1);

    match lexer.literal.parse::<Fun>() {
        Ok(fun) => {
            lexer.push(Token::fun(fun, span));
            Ok(())
        }
        Err(_) => Err(crate::Error::UnknownSymbol {
            name: lexer.literal.clone(),
            span,
        }),
    }
}
