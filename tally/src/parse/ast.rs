use std::fmt::{self, Display};

use crate::{Fun, OpT, Span};

#[derive(Clone, Debug, PartialEq)]
pub struct Ast {
    pub typ: AstT,
    pub span: Span,
    height: usize,
}

impl Ast {
    pub fn new(typ: AstT, span: Span) -> Self {
        let height = match &typ {
            AstT::Num(_) => 1,
            AstT::Neg(a) => a.height + 1,
            AstT::Binary(_, a, b) => a.height.max(b.height) + 1,
            AstT::Call(_, args) => args.iter().map(|a| a.height).max().unwrap_or(0) + 1,
        };
        Self { typ, span, height }
    }

    pub fn num(val: f64, span: Span) -> Self {
        Self::new(AstT::Num(val), span)
    }

    pub fn neg(operand: Ast, span: Span) -> Self {
        Self::new(AstT::Neg(Box::new(operand)), span)
    }

    pub fn binary(op: OpT, lhs: Ast, rhs: Ast) -> Self {
        let span = Span::across(lhs.span, rhs.span);
        Self::new(AstT::Binary(op, Box::new(lhs), Box::new(rhs)), span)
    }

    pub fn call(fun: Fun, args: Vec<Ast>, span: Span) -> Self {
        Self::new(AstT::Call(fun, args), span)
    }

    /// Number of nodes on the longest path down to a leaf.
    pub const fn height(&self) -> usize {
        self.height
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum AstT {
    Num(f64),
    Neg(Box<Ast>),
    Binary(OpT, Box<Ast>, Box<Ast>),
    Call(Fun, Vec<Ast>),
}

/// Fully parenthesized form, mostly useful to show how an input was parsed.
impl Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.typ {
            AstT::Num(n) => write!(f, "{n}"),
            AstT::Neg(a) => write!(f, "(-{a})"),
            AstT::Binary(op, a, b) => write!(f, "({a} {op} {b})"),
            AstT::Call(fun, args) => {
                write!(f, "{fun}(")?;
                if let Some((first, others)) = args.split_first() {
                    write!(f, "{first}")?;
                    for a in others {
                        write!(f, ", {a}")?;
                    }
                }
                f.write_str(")")
            }
        }
    }
}
