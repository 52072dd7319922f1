//! A small arithmetic expression evaluator.
//!
//! Input is split into tokens, parsed into an [`Ast`] by recursive descent and
//! evaluated in double precision. Only numbers, `+ - * /`, parentheses and the
//! builtin functions of [`Fun`] are accepted, everything else is rejected with
//! a classified [`Error`].
//!
//! ```
//! assert_eq!(tally::evaluate("2+3*4"), Ok(14.0));
//! assert_eq!(tally::evaluate("sqrt(16)"), Ok(4.0));
//! assert!(tally::evaluate("1/0").is_err());
//! ```

use tracing::debug;

pub use error::*;
pub use eval::*;
pub use fmt::*;
pub use lex::*;
pub use parse::*;
pub use session::*;
pub use span::*;

mod error;
mod eval;
mod fmt;
mod lex;
mod parse;
mod session;
mod span;

/// Tokenizes and parses the input without evaluating it.
pub fn check(input: &str) -> crate::Result<Ast> {
    let tokens = tokenize(input)?;
    parse(tokens)
}

/// Evaluates an expression, the result is always a finite number.
pub fn evaluate(input: &str) -> crate::Result<f64> {
    let result = check(input).and_then(|ast| ast.eval());
    match &result {
        Ok(val) => debug!(input, val, "evaluated"),
        Err(e) => debug!(input, kind = %e.kind(), pos = e.position(), "evaluation failed"),
    }
    result
}
