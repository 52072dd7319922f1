//! Text rendering of evaluation results.

use crate::Error;

/// Formats a value so that evaluating the text again yields the same value.
///
/// Uses the shortest representation that round-trips and never switches to
/// exponent notation, which the tokenizer doesn't accept.
pub fn format_value(val: f64) -> String {
    if val == 0.0 {
        return "0".into();
    }
    format!("{val}")
}

/// Short message for an error, suitable for a calculator display.
pub fn format_error(error: &Error) -> String {
    error.to_string()
}
