use serde::Serialize;
use tally::{ErrorKind, Span, UserFacing};

/// One JSON document written per evaluated input.
#[derive(Serialize)]
#[serde(untagged)]
pub enum Output {
    Value { value: f64 },
    Checked { ok: bool },
    Errors { errors: Vec<Diagnostic> },
}

#[derive(Serialize)]
pub struct Diagnostic {
    kind: ErrorKind,
    desc: String,
    spans: Vec<Span>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<usize>,
}

impl Diagnostic {
    pub fn new(error: &tally::Error, line: Option<usize>) -> Self {
        Self {
            kind: error.kind(),
            desc: error.description(),
            spans: error.spans(),
            line,
        }
    }
}

impl Output {
    pub fn error(error: &tally::Error, line: Option<usize>) -> Self {
        Self::Errors {
            errors: vec![Diagnostic::new(error, line)],
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
