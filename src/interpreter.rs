/// The evaluator module executes AST nodes and produces observable effects.
///
/// The evaluator walks the AST, executes statements, evaluates expressions,
/// dispatches function calls and accessor attributes, and routes output and
/// runtime errors through the host. It is the core execution engine of the
/// interpreter.
pub mod evaluator;
/// The host module carries the interpreter's connection to the outside world.
///
/// Standard output, standard error and file loading are injected callables,
/// so embedders and tests can capture or replace every observable effect.
pub mod host;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads raw source text and produces a stream of tokens paired
/// with their line numbers: literals, identifiers, keywords, the duck
/// statement terminator and the bracket pairs of the call syntax.
pub mod lexer;
/// The memory module implements the scoped symbol table.
///
/// Memory is a stack of scopes mapping identifiers to typed cells. It
/// enforces unique declarations per scope, constant immutability and the
/// dynamic type rules for reassignment.
pub mod memory;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser consumes the token stream produced by the lexer and constructs
/// a `Module` of statements, validating the grammar and reporting errors
/// with line information.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// Declares the `Value` enum with all supported kinds, the mapping from a
/// value's kind to its declared type name, and the conversion of values to
/// user-visible text.
pub mod value;
