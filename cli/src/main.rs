use std::io::{self, BufRead as _, Write as _};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context as _;
use clap::{CommandFactory as _, Parser, Subcommand};
use tally::{format_value, ChainMode, Key, Session};
use tracing::{debug, info};

use config::{Config, OutputFormat, Settings};
use display::*;
use json::Output;
use style::*;

mod config;
mod display;
mod json;
mod style;

/// Evaluate arithmetic expressions
#[derive(Parser, Debug)]
#[command(name = "tally", version, args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// An expression that will be evaluated, words are joined with spaces
    #[arg(
        value_name = "EXPRESSION",
        allow_hyphen_values = true,
        trailing_var_arg = true
    )]
    expression: Vec<String>,

    /// The output format
    #[arg(short, long, value_enum, global = true)]
    format: Option<OutputFormat>,

    /// When to use colors
    #[arg(long, value_enum, global = true)]
    color: Option<ColorChoice>,

    /// What the next expression starts with after a result [possible values: continue, fresh]
    #[arg(long, global = true)]
    chain: Option<ChainMode>,

    /// Read settings from this file instead of the default location
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate every line of a file
    #[command(alias = "r")]
    Run { file: PathBuf },
    /// Check the syntax of every line of a file
    #[command(alias = "c")]
    Check { file: PathBuf },
    /// Start an interactive repl
    #[command(alias = "i")]
    Interactive,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    use tracing_subscriber::{fmt::Layer, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_env("TALLY_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(Layer::new().with_writer(io::stderr).with_filter(filter))
        .init();
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = Config::load(cli.config.as_deref())?;
    let settings = config.settings(cli.format, cli.color, cli.chain);
    settings.color.apply();
    debug!(?settings, "resolved settings");

    match cli.command {
        Some(Command::Run { file }) => eval_path(&settings, &file),
        Some(Command::Check { file }) => check_path(&settings, &file),
        Some(Command::Interactive) => repl(&settings),
        None if cli.expression.is_empty() => {
            bprintln!(LRed, "Missing arguments\n");
            Cli::command().print_help()?;
            Ok(ExitCode::FAILURE)
        }
        None => {
            let input = cli.expression.join(" ");
            Ok(exit_code(print_eval(&settings, &input, None)?))
        }
    }
}

fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn read_lines(path: &Path) -> anyhow::Result<Vec<(usize, String)>> {
    let input = std::fs::read_to_string(path)
        .with_context(|| format!("Error reading file: {}", path.display()))?;
    let lines = input
        .lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty())
        .map(|(i, l)| (i + 1, l.to_owned()))
        .collect();
    Ok(lines)
}

fn eval_path(settings: &Settings, path: &Path) -> anyhow::Result<ExitCode> {
    let mut success = true;
    for (nr, line) in read_lines(path)? {
        success &= print_eval(settings, &line, Some(nr))?;
    }
    Ok(exit_code(success))
}

fn check_path(settings: &Settings, path: &Path) -> anyhow::Result<ExitCode> {
    let mut success = true;
    for (nr, line) in read_lines(path)? {
        let result = tally::check(&line);
        match settings.format {
            OutputFormat::Pretty => {
                if let Err(e) = &result {
                    println!("{}\n", e.display(&line).starting_at(nr));
                }
            }
            OutputFormat::Json => {
                let output = match &result {
                    Ok(_) => Output::Checked { ok: true },
                    Err(e) => Output::error(e, Some(nr)),
                };
                println!("{}", output.to_json()?);
            }
        }
        success &= result.is_ok();
    }
    info!(path = %path.display(), success, "checked file");
    Ok(exit_code(success))
}

/// Evaluates one input and prints the outcome, returns whether it succeeded.
fn print_eval(settings: &Settings, input: &str, line: Option<usize>) -> anyhow::Result<bool> {
    let result = tally::evaluate(input);
    print_result(settings, input, line, &result)?;
    Ok(result.is_ok())
}

fn print_result(
    settings: &Settings,
    input: &str,
    line: Option<usize>,
    result: &tally::Result<f64>,
) -> anyhow::Result<()> {
    match settings.format {
        OutputFormat::Pretty => match result {
            Ok(val) => println!("{}", format_value(*val)),
            Err(e) => println!("{}\n", e.display(input).starting_at(line.unwrap_or(1))),
        },
        OutputFormat::Json => {
            let output = match result {
                Ok(val) => Output::Value { value: *val },
                Err(e) => Output::error(e, line),
            };
            println!("{}", output.to_json()?);
        }
    }
    Ok(())
}

fn starts_with_operator(line: &str) -> bool {
    line.starts_with(['+', '-', '*', '/'])
}

fn repl(settings: &Settings) -> anyhow::Result<ExitCode> {
    if settings.format == OutputFormat::Pretty {
        bprintln!(LBlue, "Started interactive repl");
    }

    let mut session = Session::new(settings.chain, settings.history_limit);
    let mut output = io::stdout();
    let mut lines = io::stdin().lock().lines();
    loop {
        if settings.format == OutputFormat::Pretty {
            bprint!(LBlue, " >> ");
            output.flush()?;
        }

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Error reading line")?;

        match line.trim() {
            "exit" => break,
            "clear" => {
                session.input(Key::Clear);
            }
            "history" => {
                for h in session.history() {
                    cprintln!(LGreen, "{} = {}", h.expression, format_value(h.value));
                }
            }
            "" => (),
            input => {
                let continues = session.chain() == ChainMode::Continue
                    && !session.expression().is_empty()
                    && starts_with_operator(input);
                if !continues {
                    session.input(Key::Clear);
                }
                for c in input.chars() {
                    session.input(Key::Char(c));
                }

                let expression = session.expression().to_owned();
                if let Some(result) = session.input(Key::Equals) {
                    print_result(settings, &expression, None, &result)?;
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
