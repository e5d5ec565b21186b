//! # quackscript
//!
//! QuackScript is a small, duck-themed, expression-oriented scripting
//! language. Statements end with `🦆`, parameter lists wear `(: :)`
//! brackets, functions are first-class, declarations can be typed and
//! optional, and modules import other modules by path.
//!
//! The crate lexes, parses and evaluates source text. All observable
//! effects flow through an injectable [`Host`](interpreter::host::Host),
//! so embedders and tests can capture everything a script does.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

use logos::Logos;

use crate::{
    ast::Module,
    error::ParseError,
    interpreter::{
        evaluator::core::Evaluator,
        host::Host,
        lexer::{LexerExtras, Token},
        parser::statement::parse_statement,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Module`, `Statement` and `Expr` types that
/// represent the syntactic structure of source code as a tree, along with
/// the declarable type names and function parameters. The AST is built by
/// the parser and traversed by the evaluator; it is never mutated during
/// execution.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised while lexing, parsing
/// or evaluating code. Every error carries the source line it refers to and
/// renders a user-facing message through `Display`.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, the value model,
/// memory, the host interface and the standard library to provide a
/// complete runtime for QuackScript source.
pub mod interpreter;

/// Tokenizes source text into `(Token, line)` pairs.
///
/// # Errors
/// Returns `ParseError::UnexpectedCharacter` for input that starts no
/// token.
///
/// # Example
/// ```
/// use quackscript::{interpreter::lexer::Token, tokenize};
///
/// let tokens = tokenize("x🦆").unwrap();
///
/// assert_eq!(tokens,
///            vec![(Token::Identifier("x".to_string()), 1), (Token::Duck, 1)]);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer_with_extras(source, LexerExtras { line: 1 });

    while let Some(token) = lexer.next() {
        if let Ok(tok) = token {
            tokens.push((tok, lexer.extras.line));
        } else {
            let slice = lexer.slice();
            return Err(ParseError::UnexpectedCharacter { found: slice.to_string(),
                                                         line:  lexer.extras.line, });
        }
    }

    Ok(tokens)
}

/// Parses a token stream into a module.
///
/// # Errors
/// Returns a `ParseError` describing the first construct that fails to
/// parse.
pub fn parse(tokens: &[(Token, usize)]) -> Result<Module, ParseError> {
    let mut iter = tokens.iter().peekable();
    let mut statements = Vec::new();

    while iter.peek().is_some() {
        statements.push(parse_statement(&mut iter)?);
    }

    Ok(Module { statements })
}

/// Tokenizes, parses and executes a script against the given host.
///
/// Parse errors are returned to the caller; runtime errors are reported on
/// the host's standard error and leave this function successful, mirroring
/// how a shell session behaves.
///
/// # Errors
/// Returns an error if the source fails to lex or parse.
///
/// # Examples
/// ```
/// use quackscript::{interpreter::host::Host, run_script};
///
/// let (host, output) = Host::collecting();
/// run_script("QUACK x <- 2 + 3🦆 x🦆", host).unwrap();
///
/// assert_eq!(output.borrow().stdout, vec!["5".to_string()]);
/// ```
///
/// A runtime error is routed to the captured standard error instead:
/// ```
/// use quackscript::{interpreter::host::Host, run_script};
///
/// let (host, output) = Host::collecting();
/// run_script("y🦆", host).unwrap(); // 'y' is not declared
///
/// assert!(output.borrow().stdout.is_empty());
/// assert!(!output.borrow().stderr.is_empty());
/// ```
pub fn run_script(source: &str, host: Host) -> Result<(), ParseError> {
    let tokens = tokenize(source)?;
    let module = parse(&tokens)?;

    let mut evaluator = Evaluator::new(host);
    evaluator.execute(&module, Some(source));

    Ok(())
}
