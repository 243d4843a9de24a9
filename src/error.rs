use thiserror::Error;

use crate::token::{Token, TokenKind};

/// Owns the sticky "did a phase fail" flags the runner consults between
/// pipeline stages. Replaces the bare `static mut` pair the teacher used —
/// an owned value plays nicer with more than one `Ember` instance alive at
/// once (as the test harness does).
#[derive(Debug, Default)]
pub struct ErrorReporter {
    had_error: bool,
    had_runtime_error: bool,
}

impl ErrorReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn had_error(&self) -> bool {
        self.had_error || self.had_runtime_error
    }

    pub fn had_runtime_error(&self) -> bool {
        self.had_runtime_error
    }

    /// Clears both flags. Used between REPL inputs so one bad line doesn't
    /// poison the rest of the session.
    pub fn reset(&mut self) {
        self.had_error = false;
        self.had_runtime_error = false;
    }

    pub fn report_scan(&mut self, error: &ScanError) {
        eprintln!("{error}");
        self.had_error = true;
    }

    pub fn report_parse(&mut self, error: &ParseError) {
        eprintln!("{error}");
        self.had_error = true;
    }

    pub fn report_resolve(&mut self, error: &ResolveError) {
        eprintln!("{error}");
        self.had_error = true;
    }

    pub fn report_runtime(&mut self, error: &RuntimeError) {
        eprintln!("{error}");
        self.had_runtime_error = true;
    }
}

/// Lexical errors. Scanning continues after either variant; the pipeline
/// aborts after the scan finishes if any were recorded.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Unexpected character [{character}] at line number [{line}]")]
    UnexpectedCharacter { character: char, line: usize },

    #[error("Unterminated string")]
    UnterminatedString,

    #[error("Integer literal [{lexeme}] out of range at line number [{line}]")]
    IntegerOverflow { lexeme: String, line: usize },
}

/// A parse error, thrown as a recoverable control-flow signal and caught at
/// the declaration boundary (see `Parser::declaration`).
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Line [{line}] Error at end: {message}")]
    AtEnd { line: usize, message: String },

    #[error("Line [{line}] Error at {lexeme}: {message}")]
    At { line: usize, lexeme: String, message: String },
}

impl ParseError {
    pub fn new(token: &Token, message: impl Into<String>) -> Self {
        let message = message.into();
        if token.kind == TokenKind::Eof {
            ParseError::AtEnd { line: token.line, message }
        } else {
            ParseError::At { line: token.line, lexeme: token.lexeme.clone(), message }
        }
    }
}

/// A resolution error: syntactically valid code that violates a static
/// scoping rule (self-referencing initializer, duplicate declaration,
/// return outside a function).
#[derive(Debug, Error)]
#[error("Line [{line}]: {message}")]
pub struct ResolveError {
    pub line: usize,
    pub message: String,
}

impl ResolveError {
    pub fn new(token: &Token, message: impl Into<String>) -> Self {
        ResolveError { line: token.line, message: message.into() }
    }
}

/// A runtime error, carrying the line of the offending token so the
/// reporter can place it precisely.
#[derive(Debug, Clone, Error)]
#[error("Line [{line}]: {message}")]
pub struct RuntimeError {
    pub line: usize,
    pub message: String,
}

impl RuntimeError {
    pub fn new(token: &Token, message: impl Into<String>) -> Self {
        RuntimeError { line: token.line, message: message.into() }
    }
}
