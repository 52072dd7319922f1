use crate::{Fun, Span};

/// Applies a builtin function to already evaluated arguments.
///
/// The parser guarantees the argument count matches [`Fun::arity`].
pub(super) fn call(fun: Fun, args: &[f64], span: Span) -> crate::Result<f64> {
    let domain_err = |arg: f64| crate::Error::DomainError { fun, arg, span };

    let val = match (fun, args) {
        (Fun::Sin, &[x]) => x.sin(),
        (Fun::Cos, &[x]) => x.cos(),
        (Fun::Tan, &[x]) => x.tan(),
        (Fun::Log | Fun::Ln, &[x]) if x <= 0.0 => {
            return Err(crate::Error::DomainError {
                fun: Fun::Log,
                arg: x,
                span,
            })
        }
        (Fun::Log, &[x]) => x.log10(),
        (Fun::Ln, &[x]) => x.ln(),
        (Fun::Sqrt, &[x]) if x < 0.0 => return Err(domain_err(x)),
        (Fun::Sqrt, &[x]) => x.sqrt(),
        (Fun::Pow, &[x, y]) => match x.powf(y) {
            v if v.is_finite() => v,
            _ => return Err(crate::Error::Overflow { span }),
        },
        (Fun::Factorial, &[x]) if x < 0.0 || x.fract() != 0.0 => return Err(domain_err(x)),
        (Fun::Factorial, &[x]) => factorial(x, span)?,
        _ => {
            return Err(crate::Error::ArityMismatch {
                fun,
                expected: fun.arity(),
                found: args.len(),
                span,
            })
        }
    };

    super::finite(val, span)
}

/// Product of `2..=n` for a non-negative integer `n`, stops as soon as it overflows.
fn factorial(n: f64, span: Span) -> crate::Result<f64> {
    let mut product: f64 = 1.0;
    let mut i = 2.0;
    while i <= n {
        product *= i;
        if product.is_infinite() {
            return Err(crate::Error::Overflow { span });
        }
        i += 1.0;
    }
    Ok(product)
}
