/// Static primitive attributes.
///
/// The registry of built-in methods invocable through accessor syntax on
/// primitive values, such as `'duck'.length(::)`.
pub mod attributes;

/// Binary operator evaluation logic.
///
/// Dispatches every binary operation by the kinds of its operands and
/// implements the number, text and boolean operator tables.
pub mod binary;

/// Function invocation.
///
/// Handles calls of user-defined and internal functions: frame and scope
/// management, arity and argument-type checking, and the non-local return
/// escape.
pub mod call;

/// Core evaluation logic.
///
/// Contains the evaluator itself, the statement and expression walkers, the
/// call-context stack and the control-flow signal that carries returns.
pub mod core;

/// Module imports.
///
/// Re-enters the lexer and parser for imported source text and executes the
/// imported module in the current global environment, guarding against
/// cycles.
pub mod import;

/// The standard library.
///
/// Host routines surfaced as internal function values: printing, type
/// conversions and vector constructors.
pub mod stdlib;
