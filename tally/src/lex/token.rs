use strum_macros::{Display, EnumIter, EnumString};

use crate::Span;

#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    Num(NumSpan),
    Fun(FunSpan),
    Op(Op),
    Par(Par),
    Comma(Span),
}

impl Token {
    pub const fn num(val: f64, span: Span) -> Self {
        Self::Num(NumSpan::new(val, span))
    }

    pub const fn fun(fun: Fun, span: Span) -> Self {
        Self::Fun(FunSpan::new(fun, span))
    }

    pub const fn op(typ: OpT, span: Span) -> Self {
        Self::Op(Op::new(typ, span))
    }

    pub const fn par(typ: ParT, span: Span) -> Self {
        Self::Par(Par::new(typ, span))
    }

    pub const fn comma(span: Span) -> Self {
        Self::Comma(span)
    }

    pub fn as_op(&self) -> Option<Op> {
        match self {
            Self::Op(o) => Some(*o),
            _ => None,
        }
    }

    pub fn as_par(&self) -> Option<Par> {
        match self {
            Self::Par(p) => Some(*p),
            _ => None,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Self::Num(n) => n.span,
            Self::Fun(f) => f.span,
            Self::Op(o) => o.span,
            Self::Par(p) => p.span,
            Self::Comma(s) => *s,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NumSpan {
    pub val: f64,
    pub span: Span,
}

impl NumSpan {
    pub const fn new(val: f64, span: Span) -> Self {
        Self { val, span }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FunSpan {
    pub fun: Fun,
    pub span: Span,
}

impl FunSpan {
    pub const fn new(fun: Fun, span: Span) -> Self {
        Self { fun, span }
    }
}

/// The builtin functions, the only identifiers the tokenizer accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Fun {
    Sin,
    Cos,
    Tan,
    Log,
    Ln,
    Sqrt,
    Pow,
    Factorial,
}

impl Fun {
    pub const fn arity(&self) -> usize {
        match self {
            Self::Pow => 2,
            Self::Sin
            | Self::Cos
            | Self::Tan
            | Self::Log
            | Self::Ln
            | Self::Sqrt
            | Self::Factorial => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Op {
    pub typ: OpT,
    pub span: Span,
}

impl Op {
    pub const fn new(typ: OpT, span: Span) -> Self {
        Self { typ, span }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum OpT {
    #[strum(serialize = "+")]
    Add,
    #[strum(serialize = "-")]
    Sub,
    #[strum(serialize = "*")]
    Mul,
    #[strum(serialize = "/")]
    Div,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Par {
    pub typ: ParT,
    pub span: Span,
}

impl Par {
    pub const fn new(typ: ParT, span: Span) -> Self {
        Self { typ, span }
    }

    pub const fn is_open(&self) -> bool {
        matches!(self.typ, ParT::Open)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParT {
    Open,
    Close,
}
