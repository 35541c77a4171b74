//! Error types for each stage of the pipeline.
//!
//! Every error carries the 1-based source line it occurred on and a
//! human-readable message, and renders via `Display` as
//! `"[<line>] <where>: <message>"`, matching the external error contract.

use std::fmt::{self, Display};

fn report(f: &mut fmt::Formatter<'_>, line: usize, at: &str, message: &str) -> fmt::Result {
    write!(f, "[{line}] {at}: {message}")
}

/// An error raised while scanning source text into tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub line: usize,
    pub message: String,
}

impl LexError {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

impl Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        report(f, self.line, "", &self.message)
    }
}

impl std::error::Error for LexError {}

/// An error raised while building the AST from a token stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub line: usize,
    pub at: String,
    pub message: String,
}

impl ParseError {
    pub fn new(line: usize, at: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            line,
            at: at.into(),
            message: message.into(),
        }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        report(f, self.line, &self.at, &self.message)
    }
}

impl std::error::Error for ParseError {}

/// An error raised during the resolver's static lexical pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveError {
    pub line: usize,
    pub at: String,
    pub message: String,
}

impl ResolveError {
    pub fn new(line: usize, at: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            line,
            at: at.into(),
            message: message.into(),
        }
    }
}

impl Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        report(f, self.line, &self.at, &self.message)
    }
}

impl std::error::Error for ResolveError {}

/// An error raised while evaluating the AST.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeError {
    pub line: usize,
    pub message: String,
}

impl RuntimeError {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

impl Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        report(f, self.line, "", &self.message)
    }
}

impl std::error::Error for RuntimeError {}
