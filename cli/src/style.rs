use std::fmt::{self, Display};
use std::io::IsTerminal;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::ValueEnum;
use serde::Deserialize;

static ENABLED: AtomicBool = AtomicBool::new(true);

pub const ANSI_ESC: Reset = Reset;

#[macro_export]
macro_rules! cprintln {
    ($col:ty, $pat:expr $(,$args:expr)*) => {{
        print!("{}", <$col>::NORMAL);
        print!($pat, $($args,)*);
        println!("{}", $crate::style::ANSI_ESC);
    }}
}

#[macro_export]
macro_rules! bprintln {
    ($col:ty, $pat:expr $(,$args:expr)*) => {{
        print!("{}", <$col>::BOLD);
        print!($pat, $($args,)*);
        println!("{}", $crate::style::ANSI_ESC);
    }}
}

#[macro_export]
macro_rules! bprint {
    ($col:ty, $pat:expr $(,$args:expr)*) => {{
        print!("{}", <$col>::BOLD);
        print!($pat, $($args,)*);
        print!("{}", $crate::style::ANSI_ESC);
    }}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Color output written to a terminal
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    /// Turns escape sequences on or off for the rest of the program.
    pub fn apply(self) {
        let enabled = match self {
            Self::Auto => std::io::stdout().is_terminal(),
            Self::Always => true,
            Self::Never => false,
        };
        ENABLED.store(enabled, Ordering::Relaxed);
    }
}

pub fn enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

pub trait Color: Sized {
    const COLOR_CODE: u8;

    const NORMAL: WriteAnsi = WriteAnsi {
        bold: false,
        color: Self::COLOR_CODE,
    };

    const BOLD: WriteAnsi = WriteAnsi {
        bold: true,
        color: Self::COLOR_CODE,
    };
}

pub struct WriteAnsi {
    bold: bool,
    color: u8,
}

impl Display for WriteAnsi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !enabled() {
            return Ok(());
        }
        f.write_str("\x1B[")?;
        if self.bold {
            f.write_str("1;")?;
        }
        write!(f, "{}m", self.color)
    }
}

pub struct Reset;

impl Display for Reset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if enabled() {
            f.write_str("\x1B[0m")?;
        }
        Ok(())
    }
}

pub struct LRed;
impl Color for LRed {
    const COLOR_CODE: u8 = 91;
}

pub struct LGreen;
impl Color for LGreen {
    const COLOR_CODE: u8 = 92;
}

pub struct LBlue;
impl Color for LBlue {
    const COLOR_CODE: u8 = 94;
}
