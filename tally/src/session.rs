//! Calculator display state driven by key presses.
//!
//! The evaluator itself is stateless, a [`Session`] only owns the expression
//! being typed, what is currently displayed and the history of successful
//! evaluations.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use tracing::{debug, info};

use crate::{evaluate, format_value};

pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Shown after a failed evaluation.
pub const ERROR_DISPLAY: &str = "Error";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Delete,
    Clear,
    Equals,
}

impl Key {
    /// Maps a keyboard key name to a calculator key, `None` for keys that are ignored.
    pub fn from_keyboard(key: &str) -> Option<Self> {
        const ALLOWED: &str = "0123456789+-*/().";

        match key {
            "Enter" => Some(Self::Equals),
            "Backspace" => Some(Self::Delete),
            "Escape" => Some(Self::Clear),
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if ALLOWED.contains(c) => Some(Self::Char(c)),
                    _ => None,
                }
            }
        }
    }
}

/// What the expression starts with after a successful evaluation.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ChainMode {
    /// Continue from the formatted result
    #[default]
    Continue,
    /// Start with an empty expression
    Fresh,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub expression: String,
    pub value: f64,
}

#[derive(Debug)]
pub struct Session {
    expression: String,
    display: String,
    history: VecDeque<HistoryEntry>,
    chain: ChainMode,
    history_limit: usize,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(ChainMode::default(), DEFAULT_HISTORY_LIMIT)
    }
}

impl Session {
    pub fn new(chain: ChainMode, history_limit: usize) -> Self {
        Self {
            expression: String::new(),
            display: String::new(),
            history: VecDeque::new(),
            chain,
            history_limit,
        }
    }

    /// Applies a key press, returns the outcome if an evaluation was performed.
    pub fn input(&mut self, key: Key) -> Option<crate::Result<f64>> {
        match key {
            Key::Char(c) => self.push(c),
            Key::Delete => self.delete(),
            Key::Clear => self.clear(),
            Key::Equals => return self.equals(),
        }
        None
    }

    pub fn push(&mut self, c: char) {
        self.expression.push(c);
        self.display.clone_from(&self.expression);
    }

    pub fn push_str(&mut self, s: &str) {
        self.expression.push_str(s);
        self.display.clone_from(&self.expression);
    }

    pub fn delete(&mut self) {
        self.expression.pop();
        self.display.clone_from(&self.expression);
    }

    pub fn clear(&mut self) {
        self.expression.clear();
        self.display.clear();
    }

    /// Evaluates the current expression, does nothing if it's blank.
    pub fn equals(&mut self) -> Option<crate::Result<f64>> {
        if self.expression.trim().is_empty() {
            return None;
        }

        let result = evaluate(&self.expression);
        match &result {
            Ok(val) => {
                let formatted = format_value(*val);
                info!(expression = %self.expression, result = %formatted, "evaluated");

                let expression = std::mem::take(&mut self.expression);
                self.record(expression, *val);
                if self.chain == ChainMode::Continue {
                    self.expression.clone_from(&formatted);
                }
                self.display = formatted;
            }
            Err(e) => {
                debug!(expression = %self.expression, error = %e, "evaluation failed");
                self.expression.clear();
                self.display = ERROR_DISPLAY.into();
            }
        }
        Some(result)
    }

    fn record(&mut self, expression: String, value: f64) {
        if self.history_limit == 0 {
            return;
        }
        self.history.push_front(HistoryEntry { expression, value });
        self.history.truncate(self.history_limit);
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub const fn chain(&self) -> ChainMode {
        self.chain
    }

    /// Successful evaluations, newest first.
    pub fn history(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.history.iter()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ErrorKind;

    fn press(session: &mut Session, keys: &str) {
        for c in keys.chars() {
            session.input(Key::Char(c));
        }
    }

    #[test]
    fn keyboard_keys() {
        assert_eq!(Key::from_keyboard("7"), Some(Key::Char('7')));
        assert_eq!(Key::from_keyboard("("), Some(Key::Char('(')));
        assert_eq!(Key::from_keyboard("."), Some(Key::Char('.')));
        assert_eq!(Key::from_keyboard("Enter"), Some(Key::Equals));
        assert_eq!(Key::from_keyboard("Backspace"), Some(Key::Delete));
        assert_eq!(Key::from_keyboard("Escape"), Some(Key::Clear));
        assert_eq!(Key::from_keyboard("a"), None);
        assert_eq!(Key::from_keyboard("^"), None);
        assert_eq!(Key::from_keyboard("Shift"), None);
        assert_eq!(Key::from_keyboard(""), None);
    }

    #[test]
    fn typing() {
        let mut s = Session::default();
        press(&mut s, "12+3");
        assert_eq!(s.display(), "12+3");
        s.input(Key::Delete);
        assert_eq!(s.expression(), "12+");
        assert_eq!(s.display(), "12+");
        s.input(Key::Clear);
        assert_eq!(s.expression(), "");
        assert_eq!(s.display(), "");
    }

    #[test]
    fn equals_records_history() {
        let mut s = Session::default();
        press(&mut s, "2+3*4");
        assert_eq!(s.input(Key::Equals), Some(Ok(14.0)));
        assert_eq!(s.display(), "14");

        let history: Vec<_> = s.history().cloned().collect();
        assert_eq!(
            history,
            vec![HistoryEntry {
                expression: "2+3*4".into(),
                value: 14.0
            }]
        );
    }

    #[test]
    fn blank_equals_does_nothing() {
        let mut s = Session::default();
        assert_eq!(s.input(Key::Equals), None);
        press(&mut s, "   ");
        assert_eq!(s.equals(), None);
        assert_eq!(s.history().count(), 0);
    }

    #[test]
    fn chaining_continues_from_result() {
        let mut s = Session::new(ChainMode::Continue, 10);
        press(&mut s, "6*7");
        s.equals();
        assert_eq!(s.expression(), "42");
        press(&mut s, "/2");
        assert_eq!(s.equals(), Some(Ok(21.0)));

        let exprs: Vec<_> = s.history().map(|h| h.expression.as_str()).collect();
        assert_eq!(exprs, ["42/2", "6*7"]);
    }

    #[test]
    fn fresh_starts_blank() {
        let mut s = Session::new(ChainMode::Fresh, 10);
        press(&mut s, "6*7");
        s.equals();
        assert_eq!(s.expression(), "");
        assert_eq!(s.display(), "42");
    }

    #[test]
    fn error_resets_expression() {
        let mut s = Session::default();
        press(&mut s, "1/0");
        let result = s.input(Key::Equals).map(|r| r.map_err(|e| e.kind()));
        assert_eq!(result, Some(Err(ErrorKind::DivisionByZero)));
        assert_eq!(s.display(), ERROR_DISPLAY);
        assert_eq!(s.expression(), "");
        assert_eq!(s.history().count(), 0);

        press(&mut s, "1+1");
        assert_eq!(s.equals(), Some(Ok(2.0)));
    }

    #[test]
    fn history_is_bounded() {
        let mut s = Session::new(ChainMode::Fresh, 2);
        for e in ["1", "2", "3"] {
            s.push_str(e);
            s.equals();
        }
        let values: Vec<_> = s.history().map(|h| h.value).collect();
        assert_eq!(values, [3.0, 2.0]);

        s.clear_history();
        assert_eq!(s.history().count(), 0);
    }

    #[test]
    fn no_history() {
        let mut s = Session::new(ChainMode::Fresh, 0);
        s.push_str("1+1");
        assert_eq!(s.equals(), Some(Ok(2.0)));
        assert_eq!(s.history().count(), 0);
    }

    #[test]
    fn parse_chain_mode() {
        assert_eq!("continue".parse::<ChainMode>(), Ok(ChainMode::Continue));
        assert_eq!("fresh".parse::<ChainMode>(), Ok(ChainMode::Fresh));
        assert!("sometimes".parse::<ChainMode>().is_err());
        assert_eq!(ChainMode::Fresh.to_string(), "fresh");
    }
}
