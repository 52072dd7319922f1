use std::fmt::{self, Display, Write};

use tally::{Span, UserFacing};
use unicode_width::UnicodeWidthChar;

use crate::style::{Color, LBlue, LRed, ANSI_ESC};

impl DisplayUserFacing for tally::Error {}
pub trait DisplayUserFacing: UserFacing + Sized {
    fn display<'a>(&'a self, input: &'a str) -> FmtUserFacing<'a, Self> {
        FmtUserFacing {
            input,
            error: self,
            first_line: 1,
        }
    }
}

pub struct FmtUserFacing<'a, U: UserFacing> {
    input: &'a str,
    error: &'a U,
    first_line: usize,
}

impl<U: UserFacing> FmtUserFacing<'_, U> {
    /// Number the first line of the input `nr` instead of 1.
    pub fn starting_at(mut self, nr: usize) -> Self {
        self.first_line = nr;
        self
    }
}

impl<U: UserFacing> Display for FmtUserFacing<'_, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let spans = self.error.spans();

        let mut hl_lines = Vec::new();
        for (i, (lr, l)) in spanned_lines(self.input).into_iter().enumerate() {
            let intersecting: Vec<_> = spans
                .iter()
                .filter(|s| s.intersects(&lr))
                .map(|s| {
                    let start = s.start.saturating_sub(lr.start);
                    Span::of(start, s.end.saturating_sub(lr.start))
                })
                .collect();

            if !intersecting.is_empty() {
                hl_lines.push((self.first_line + i, l, intersecting));
            }
        }

        let nr_width = hl_lines
            .last()
            .map_or(1, |(nr, _, _)| nr.to_string().len());

        let mut last_nr: Option<usize> = None;
        for (nr, l, spans) in &hl_lines {
            if last_nr.is_some_and(|last| last + 1 < *nr) {
                writeln!(f, "{}...{}", LBlue::BOLD, ANSI_ESC)?;
            }
            mark_spans(f, *nr, nr_width, l, spans)?;
            last_nr = Some(*nr);
        }

        write!(
            f,
            "{spc:nr_width$} {blue}│{esc} {red}{desc}{esc}",
            spc = ' ',
            blue = LBlue::BOLD,
            red = LRed::BOLD,
            desc = self.error.description(),
            esc = ANSI_ESC,
        )
    }
}

/// Writes the line followed by a row of `^` under each span, measured in
/// terminal columns.
fn mark_spans(
    f: &mut fmt::Formatter<'_>,
    line_nr: usize,
    nr_width: usize,
    line: &str,
    spans: &[Span],
) -> fmt::Result {
    write!(
        f,
        "{blue}{nr:nr_width$} │{esc} {line}\n{spc:nr_width$} {blue}│{esc} ",
        nr = line_nr,
        spc = ' ',
        blue = LBlue::BOLD,
        esc = ANSI_ESC,
    )?;

    let widths: Vec<usize> = line.chars().map(|c| c.width().unwrap_or(0)).collect();
    let columns = |from: usize, to: usize| -> usize {
        widths.iter().take(to).skip(from).sum()
    };

    let mut cursor = 0;
    for s in spans {
        if s.end <= cursor {
            continue;
        }
        let start = s.start.max(cursor);
        let offset = columns(cursor, start);
        let width = columns(start, s.end).max(1);

        for _ in 0..offset {
            f.write_char(' ')?;
        }
        write!(f, "{}", LRed::BOLD)?;
        for _ in 0..width {
            f.write_char('^')?;
        }
        write!(f, "{ANSI_ESC}")?;
        cursor = s.end.max(start + 1);
    }

    f.write_char('\n')
}

/// Splits the input into lines, each span covering its line break so that
/// markers placed after the last character stay on that line.
fn spanned_lines(input: &str) -> Vec<(Span, &str)> {
    let mut lines = Vec::new();
    let mut start = 0;
    for line in input.split('\n') {
        let len = line.chars().count();
        let text = line.strip_suffix('\r').unwrap_or(line);
        lines.push((Span::of(start, start + len + 1), text));
        start += len + 1;
    }
    lines
}

#[cfg(test)]
mod test {
    use super::*;

    fn render(input: &str) -> String {
        let error = tally::evaluate(input).unwrap_err();
        crate::style::ColorChoice::Never.apply();
        error.display(input).to_string()
    }

    #[test]
    fn lines() {
        let lines = spanned_lines("1+2\r\n3");
        assert_eq!(lines, [(Span::of(0, 5), "1+2"), (Span::of(5, 7), "3")]);
    }

    #[test]
    fn marker_after_line_end() {
        assert_eq!(render("4 -"), "1 │ 4 -\n  │    ^\n  │ Syntax error: missing operand");
    }

    #[test]
    fn two_spans() {
        assert_eq!(
            render("10 / (1-1)"),
            "1 │ 10 / (1-1)\n  │ ^^   ^^^^^\n  │ Attempted to divide by 0"
        );
    }

    #[test]
    fn wide_chars() {
        assert_eq!(
            render("１"),
            "1 │ １\n  │ ^^\n  │ Found an unexpected character '１'"
        );
    }

    #[test]
    fn line_numbers() {
        let error = tally::evaluate("1 +").unwrap_err();
        crate::style::ColorChoice::Never.apply();
        let text = error.display("1 +").starting_at(12).to_string();
        assert_eq!(text, "12 │ 1 +\n   │    ^\n   │ Syntax error: missing operand");
    }
}
