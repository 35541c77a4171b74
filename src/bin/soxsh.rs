//! `soxsh` — run a Sox source file, or drop into a line-at-a-time REPL
//! when none is given.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use soxsh::error::{LexError, ParseError, ResolveError};
use soxsh::interpreter::Interpreter;
use soxsh::PipelineError;

/// `soxsh [file] [-v level]` — with a file, runs it and exits; without
/// one, starts the REPL.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Script to run. Omit to start an interactive session.
    #[arg(index = 1)]
    file: Option<PathBuf>,

    /// Log level for the operator-facing `log` output — independent of
    /// the language's own `"[<line>] <where>: <message>"` error reports,
    /// which always print regardless of this setting.
    #[arg(value_enum, short, long, default_value_t = LogLevel::default())]
    verbosity: LogLevel,
}

#[derive(ValueEnum, Clone, Default, Debug)]
enum LogLevel {
    #[default]
    #[value(alias("0"))]
    Error,
    #[value(alias("1"))]
    Warn,
    #[value(alias("2"))]
    Info,
    #[value(alias("3"))]
    Debug,
    #[value(alias("4"))]
    Trace,
}

impl From<&LogLevel> for log::Level {
    fn from(value: &LogLevel) -> Self {
        match value {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

fn main() -> ExitCode {
    let args = Cli::parse();
    simple_logger::init_with_level(log::Level::from(&args.verbosity)).unwrap();

    match args.file {
        Some(path) => run_file(path),
        None => {
            run_repl();
            ExitCode::SUCCESS
        }
    }
}

fn run_file(path: PathBuf) -> ExitCode {
    let source = match fs::read_to_string(&path) {
        Ok(source) => source,
        Err(e) => {
            log::error!("Couldn't read '{}': {e}", path.display());
            return ExitCode::from(74); // EX_IOERR
        }
    };

    let mut interp = Interpreter::new();
    match soxsh::run(&source, &mut interp) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::from(exit_code(&err))
        }
    }
}

/// Reads one line at a time from stdin and runs it against a single,
/// persistent interpreter — later lines see variables and functions
/// declared by earlier ones. Unlike file mode, a bad line is reported
/// and the session keeps going rather than exiting.
fn run_repl() {
    let mut interp = Interpreter::new();
    let stdin = io::stdin();
    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            return;
        }
        let mut line = String::new();
        match stdin.read_line(&mut line) {
            Ok(0) => return, // EOF
            Ok(_) => {}
            Err(e) => {
                log::error!("Failed to read from stdin: {e}");
                return;
            }
        }
        if line.trim().is_empty() {
            continue;
        }
        if let Err(err) = soxsh::run(&line, &mut interp) {
            report(&err);
        }
    }
}

/// Errors print to stdout, not stderr: the language's own error contract
/// (`"[<line>] <where>: <message>"`) is part of a program's observable
/// output, interleaved with whatever it already printed via `print`/
/// `println`, not a side channel for the operator.
fn report(err: &PipelineError) {
    match err {
        PipelineError::Lex(errors) => errors.iter().for_each(|e: &LexError| println!("{e}")),
        PipelineError::Parse(errors) => errors.iter().for_each(|e: &ParseError| println!("{e}")),
        PipelineError::Resolve(errors) => errors.iter().for_each(|e: &ResolveError| println!("{e}")),
        PipelineError::Runtime(e) => println!("{e}"),
    }
}

/// `65` (`EX_DATAERR`) for anything that kept the program from running
/// at all; `70` (`EX_SOFTWARE`) once it was running and something went
/// wrong mid-execution — the usual split between "your script doesn't
/// parse" and "your script crashed".
fn exit_code(err: &PipelineError) -> u8 {
    match err {
        PipelineError::Runtime(_) => 70,
        _ => 65,
    }
}
