/// Parsing errors.
///
/// Defines all error types that can occur while lexing or parsing source
/// code: unexpected characters and tokens, missing statement terminators,
/// and unknown type names in annotations.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised while a module executes:
/// undefined or redeclared identifiers, constant reassignment, dynamic type
/// mismatches, call errors, and import failures.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
