/// Binary dispatch by operand kinds.
///
/// Contains the operand evaluation order, callable-operand rejection, the
/// cross-kind equality rule and the routing into the per-kind operator
/// tables.
pub mod core;

/// Boolean operators.
///
/// Logical and equality operators over boolean operand pairs.
pub mod logic;

/// Number operators.
///
/// Arithmetic, comparison and equality operators over number operand
/// pairs.
pub mod number;

/// Text operators.
///
/// Concatenation and equality operators over text operand pairs.
pub mod text;
