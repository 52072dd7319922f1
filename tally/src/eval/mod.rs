use tracing::debug;

use crate::{Ast, AstT, OpT, Span, Token};

mod fun;

/// Parses and evaluates a token stream.
pub fn eval_tokens(tokens: Vec<Token>) -> crate::Result<f64> {
    let ast = crate::parse(tokens)?;
    ast.eval()
}

impl Ast {
    /// Evaluates the tree, operands from left to right.
    ///
    /// The value returned is always finite, infinite results are reported as
    /// [`crate::Error::Overflow`] and NaNs as [`crate::Error::InvalidComputation`].
    pub fn eval(&self) -> crate::Result<f64> {
        let val = match &self.typ {
            AstT::Num(n) => return Ok(*n),
            AstT::Neg(a) => -a.eval()?,
            AstT::Binary(op, a, b) => {
                let va = a.eval()?;
                let vb = b.eval()?;
                match op {
                    OpT::Add => va + vb,
                    OpT::Sub => va - vb,
                    OpT::Mul => va * vb,
                    OpT::Div => {
                        if vb == 0.0 {
                            let spans = [a.span, b.span];
                            debug!(?spans, "division by zero");
                            return Err(crate::Error::DivisionByZero { spans });
                        }
                        va / vb
                    }
                }
            }
            AstT::Call(f, args) => {
                let vals = args.iter().map(Ast::eval).collect::<crate::Result<Vec<_>>>()?;
                fun::call(*f, &vals, self.span)?
            }
        };

        finite(val, self.span)
    }
}

pub(crate) fn finite(val: f64, span: Span) -> crate::Result<f64> {
    if val.is_nan() {
        Err(crate::Error::InvalidComputation { span })
    } else if val.is_infinite() {
        Err(crate::Error::Overflow { span })
    } else {
        Ok(val)
    }
}
