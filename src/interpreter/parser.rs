/// Core expression parsing.
///
/// Contains the precedence-climbing expression parser, postfix accessor
/// handling, call-argument parsing and function literals.
pub mod core;

/// Statement parsing.
///
/// Parses declarations, assignments, returns, conditionals, imports and
/// expression statements, each closed by the `🦆` terminator.
pub mod statement;

/// Shared parsing utilities.
///
/// Comma-separated lists, identifiers, type annotations and terminator
/// handling used across the statement and expression parsers.
pub mod utils;
