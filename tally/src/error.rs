use serde::Serialize;
use strum_macros::{AsRefStr, Display};

use crate::{Fun, Span};

pub type Result<T> = std::result::Result<T, Error>;

/// Something that can be shown to a user next to the input it refers to.
pub trait UserFacing {
    fn description(&self) -> String;
    fn spans(&self) -> Vec<Span>;
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("unexpected character '{char}'")]
    UnexpectedCharacter { char: char, span: Span },
    #[error("unknown symbol '{name}'")]
    UnknownSymbol { name: String, span: Span },
    #[error("{reason}")]
    SyntaxError { reason: &'static str, span: Span },
    #[error("{fun} takes {expected} argument{s}, but {found} {were} given", s = plural(.expected), were = were_was(.found))]
    ArityMismatch {
        fun: Fun,
        expected: usize,
        found: usize,
        span: Span,
    },
    #[error("division by zero")]
    DivisionByZero { spans: [Span; 2] },
    #[error("{fun} is undefined for {arg}")]
    DomainError { fun: Fun, arg: f64, span: Span },
    #[error("result is out of range")]
    Overflow { span: Span },
    #[error("invalid computation")]
    InvalidComputation { span: Span },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, AsRefStr, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    UnexpectedCharacter,
    UnknownSymbol,
    SyntaxError,
    ArityMismatch,
    DivisionByZero,
    DomainError,
    Overflow,
    InvalidComputation,
}

impl Error {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnexpectedCharacter { .. } => ErrorKind::UnexpectedCharacter,
            Self::UnknownSymbol { .. } => ErrorKind::UnknownSymbol,
            Self::SyntaxError { .. } => ErrorKind::SyntaxError,
            Self::ArityMismatch { .. } => ErrorKind::ArityMismatch,
            Self::DivisionByZero { .. } => ErrorKind::DivisionByZero,
            Self::DomainError { .. } => ErrorKind::DomainError,
            Self::Overflow { .. } => ErrorKind::Overflow,
            Self::InvalidComputation { .. } => ErrorKind::InvalidComputation,
        }
    }

    /// The 0-based character offset the error points at.
    pub fn position(&self) -> usize {
        self.spans().first().map_or(0, |s| s.start)
    }

    pub(crate) const fn syntax(reason: &'static str, span: Span) -> Self {
        Self::SyntaxError { reason, span }
    }
}

impl UserFacing for Error {
    fn description(&self) -> String {
        match self {
            Self::UnexpectedCharacter { char, .. } => {
                format!("Found an unexpected character '{char}'")
            }
            Self::UnknownSymbol { name, .. } => format!("Unknown symbol '{name}'"),
            Self::ArityMismatch {
                fun,
                expected,
                found,
                ..
            } => format!(
                "{fun} requires {expected} argument{}, but {found} {} found",
                plural(expected),
                were_was(found),
            ),
            Self::SyntaxError { reason, .. } => format!("Syntax error: {reason}"),
            Self::DivisionByZero { .. } => "Attempted to divide by 0".into(),
            Self::DomainError { fun, arg, .. } => {
                let domain = match fun {
                    Fun::Log | Fun::Ln => "positive numbers",
                    Fun::Sqrt => "non-negative numbers",
                    Fun::Factorial => "non-negative integers",
                    _ => "finite numbers",
                };
                format!("{fun} is only defined for {domain}, found {arg}")
            }
            Self::Overflow { .. } => "The result is too large to be represented".into(),
            Self::InvalidComputation { .. } => "The result is not a number".into(),
        }
    }

    fn spans(&self) -> Vec<Span> {
        match self {
            Self::UnexpectedCharacter { span, .. }
            | Self::UnknownSymbol { span, .. }
            | Self::SyntaxError { span, .. }
            | Self::ArityMismatch { span, .. }
            | Self::DomainError { span, .. }
            | Self::Overflow { span }
            | Self::InvalidComputation { span } => vec![*span],
            Self::DivisionByZero { spans } => spans.to_vec(),
        }
    }
}

fn plural(n: &usize) -> &'static str {
    if *n == 1 {
        ""
    } else {
        "s"
    }
}

fn were_was(n: &usize) -> &'static str {
    if *n == 1 {
        "was"
    } else {
        "were"
    }
}
