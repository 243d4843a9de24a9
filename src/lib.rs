//! Ember is a dynamically typed, tree-walk interpreted scripting language.
//! It is a hobby project built for the same reason as the book it draws its
//! architecture from, [Crafting Interpreters](https://craftinginterpreters.com/):
//! to learn how a language pipeline fits together, not to ship a production
//! runtime.
//!
//! ## Scanning
//! The first step converts a string of source characters into a stream of
//! [`Token`](token::Token)s. The [`scanner`] module does this as a small state
//! machine that consumes characters one at a time, reporting lexical
//! mistakes as a [`ScanError`](error::ScanError) without stopping — so a
//! source file with two bad characters gets both reported in one pass.
//!
//! ## Parsing
//! The second step turns the token stream into an AST: [`Expr`](expr::Expr)
//! nodes that produce a [`Value`](value::Value) and [`Stmt`](stmt::Stmt)
//! nodes that perform an action. The [`parser`] module is a recursive-descent
//! parser with panic-mode recovery — a [`ParseError`](error::ParseError)
//! resynchronizes at the next statement boundary instead of aborting the
//! whole parse.
//!
//! ## Resolving
//! The third step statically walks the AST once to determine, for every
//! variable reference, how many enclosing scopes separate it from its
//! declaration. The [`resolver`] module records this so the interpreter
//! never has to search the live environment chain by name. A
//! [`ResolveError`](error::ResolveError) means syntactically valid code that
//! breaks a static scoping rule — reading a local in its own initializer, or
//! returning from top-level code.
//!
//! ## Interpreting
//! The final step walks the resolved AST and evaluates it. The
//! [`interpreter`] module owns the global environment and the live scope
//! chain, and reports failures that can only be caught at runtime — dividing
//! by zero, adding a string to a number — as a [`RuntimeError`](error::RuntimeError).

use std::fs;
use std::path::Path;
use std::process;

use tracing::{info, instrument};

pub mod class;
pub mod environment;
pub mod error;
pub mod expr;
pub mod function;
pub mod interpreter;
pub mod parser;
pub mod resolver;
pub mod scanner;
pub mod stmt;
pub mod token;
pub mod value;

use error::ErrorReporter;
use interpreter::Interpreter;
use parser::Parser;
use resolver::Resolver;
use scanner::Scanner;

/// Orchestrates the scanner → parser → resolver → interpreter pipeline for
/// one source buffer, or a sequence of them across a REPL session. Owns the
/// single long-lived [`Interpreter`] so global state (variables, functions)
/// persists between REPL inputs.
pub struct Ember {
    interpreter: Interpreter,
    reporter: ErrorReporter,
}

impl Ember {
    pub fn new() -> Self {
        Ember {
            interpreter: Interpreter::new(),
            reporter: ErrorReporter::new(),
        }
    }

    /// Runs a whole file and exits the process with the conventional sysexits
    /// code for the first pipeline phase that failed: 65 for a scan/parse/
    /// resolve error, 70 for a runtime error.
    #[instrument(skip(self))]
    pub fn run_file(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        let source = fs::read_to_string(path)
            .unwrap_or_else(|err| panic!("could not read source file {}: {err}", path.display()));

        self.run(&source);

        if self.reporter.had_runtime_error() {
            process::exit(70);
        }
        if self.reporter.had_error() {
            process::exit(65);
        }
    }

    /// Runs one line (or block) of REPL input. Errors reset between calls so
    /// a bad line doesn't poison the rest of the session.
    pub fn run_line(&mut self, source: &str) {
        self.interpreter.set_repl_mode(true);
        self.run(source);
        self.reporter.reset();
    }

    fn run(&mut self, source: &str) {
        let (tokens, scan_errors) = Scanner::new(source).scan_tokens();
        for error in &scan_errors {
            self.reporter.report_scan(error);
        }
        if self.reporter.had_error() {
            return;
        }

        let (statements, parse_errors) = Parser::new(tokens).parse();
        for error in &parse_errors {
            self.reporter.report_parse(error);
        }
        if self.reporter.had_error() {
            return;
        }

        let resolve_errors = Resolver::new(&mut self.interpreter).resolve(&statements);
        for error in &resolve_errors {
            self.reporter.report_resolve(error);
        }
        if self.reporter.had_error() {
            return;
        }

        info!(statements = statements.len(), "running resolved program");
        self.interpreter.interpret(&statements, &mut self.reporter);
    }
}

impl Default for Ember {
    fn default() -> Self {
        Self::new()
    }
}
