use tracing::debug;

use crate::{FunSpan, OpT, Par, ParT, Span, Token};

pub use ast::*;
use parser::*;

mod ast;
mod parser;

/// Builds an [`Ast`] from a token stream.
///
/// ```text
/// expr    := term { ("+" | "-") term }
/// term    := factor { ("*" | "/") factor }
/// factor  := "-" factor | primary
/// primary := num | "(" expr ")" | fun "(" [ expr { "," expr } ] ")"
/// ```
pub fn parse(tokens: Vec<Token>) -> crate::Result<Ast> {
    if tokens.is_empty() {
        return Err(crate::Error::syntax("empty expression", Span::pos(0)));
    }

    let mut parser = Parser::new(tokens);
    let ast = parse_expr(&mut parser)?;
    if let Some(t) = parser.next() {
        return Err(unexpected(&t));
    }

    debug!(%ast, "parsed expression");
    Ok(ast)
}

fn parse_expr(parser: &mut Parser) -> crate::Result<Ast> {
    let mut lhs = parse_term(parser)?;
    while let Some((op, _)) = parser.next_op(&[OpT::Add, OpT::Sub]) {
        let rhs = parse_term(parser)?;
        lhs = bounded(Ast::binary(op, lhs, rhs))?;
    }
    Ok(lhs)
}

fn parse_term(parser: &mut Parser) -> crate::Result<Ast> {
    let mut lhs = parse_factor(parser)?;
    while let Some((op, _)) = parser.next_op(&[OpT::Mul, OpT::Div]) {
        let rhs = parse_factor(parser)?;
        lhs = bounded(Ast::binary(op, lhs, rhs))?;
    }
    Ok(lhs)
}

fn parse_factor(parser: &mut Parser) -> crate::Result<Ast> {
    match parser.next_op(&[OpT::Sub]) {
        Some((_, op_span)) => {
            parser.enter(op_span)?;
            let operand = parse_factor(parser)?;
            parser.leave();
            let span = Span::across(op_span, operand.span);
            bounded(Ast::neg(operand, span))
        }
        None => parse_primary(parser),
    }
}

fn parse_primary(parser: &mut Parser) -> crate::Result<Ast> {
    let token = match parser.next() {
        Some(t) => t,
        None => return Err(crate::Error::syntax("missing operand", parser.end_span())),
    };

    match token {
        Token::Num(n) => Ok(Ast::num(n.val, n.span)),
        Token::Par(p) if p.is_open() => {
            parser.enter(p.span)?;
            let inner = parse_expr(parser)?;
            let close = expect_close(parser, p)?;
            parser.leave();
            Ok(Ast::new(inner.typ, Span::across(p.span, close)))
        }
        Token::Fun(f) => parse_fun_call(parser, f),
        t => Err(crate::Error::syntax("missing operand", t.span())),
    }
}

fn parse_fun_call(parser: &mut Parser, f: FunSpan) -> crate::Result<Ast> {
    let open = match parser.next() {
        Some(Token::Par(p)) if p.is_open() => p,
        Some(t) => {
            let reason = "expected '(' after function name";
            return Err(crate::Error::syntax(reason, t.span()));
        }
        None => {
            let reason = "expected '(' after function name";
            return Err(crate::Error::syntax(reason, f.span.after()));
        }
    };

    parser.enter(open.span)?;
    let mut args = Vec::new();
    let close = match parser.peek().and_then(Token::as_par) {
        Some(p) if !p.is_open() => {
            parser.next();
            p.span
        }
        _ => loop {
            args.push(parse_expr(parser)?);
            match parser.next() {
                Some(Token::Comma(_)) => (),
                Some(Token::Par(p)) if !p.is_open() => break p.span,
                Some(t) => return Err(unexpected(&t)),
                None => {
                    let reason = "missing closing parenthesis";
                    return Err(crate::Error::syntax(reason, open.span));
                }
            }
        },
    };

    parser.leave();

    let span = Span::across(f.span, close);
    let expected = f.fun.arity();
    if args.len() != expected {
        return Err(crate::Error::ArityMismatch {
            fun: f.fun,
            expected,
            found: args.len(),
            span,
        });
    }

    bounded(Ast::call(f.fun, args, span))
}

fn bounded(ast: Ast) -> crate::Result<Ast> {
    if ast.height() > MAX_HEIGHT {
        return Err(crate::Error::syntax(TOO_DEEP, ast.span));
    }
    Ok(ast)
}

fn expect_close(parser: &mut Parser, open: Par) -> crate::Result<Span> {
    match parser.next() {
        Some(Token::Par(Par {
            typ: ParT::Close,
            span,
        })) => Ok(span),
        Some(t) => Err(unexpected(&t)),
        None => Err(crate::Error::syntax(
            "missing closing parenthesis",
            open.span,
        )),
    }
}

/// Error for a token found where an operator or the end of a group was expected.
fn unexpected(token: &Token) -> crate::Error {
    let reason = match token {
        Token::Par(p) if !p.is_open() => "unexpected closing parenthesis",
        Token::Comma(_) => "unexpected comma",
        Token::Op(_) => "unexpected operator",
        Token::Num(_) | Token::Fun(_) | Token::Par(_) => "missing operator",
    };
    crate::Error::syntax(reason, token.span())
}
