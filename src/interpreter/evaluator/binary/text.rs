use crate::{
    ast::BinaryOperator,
    interpreter::{
        evaluator::{binary::core::unsupported, core::EvalResult},
        value::core::Value,
    },
};

/// Evaluates a binary operation over two text values.
///
/// `+` concatenates; `==` and `!=` compare exactly. No other operator is
/// defined on text.
///
/// # Parameters
/// - `op`: The operator.
/// - `left`: Left operand.
/// - `right`: Right operand.
/// - `line`: Line number for error reporting.
///
/// # Returns
/// A text value for concatenation and a boolean for equality.
///
/// # Example
/// ```
/// use quackscript::{
///     ast::BinaryOperator,
///     interpreter::{evaluator::binary::text::eval_text_op, value::core::Value},
/// };
///
/// let result = eval_text_op(BinaryOperator::Add, "hi ", "ada", 1).unwrap();
/// assert_eq!(result, Value::Text("hi ada".to_string()));
/// ```
pub fn eval_text_op(op: BinaryOperator, left: &str, right: &str, line: usize) -> EvalResult<Value> {
    match op {
        BinaryOperator::Add => Ok(Value::Text(format!("{left}{right}"))),
        BinaryOperator::Equal => Ok(Value::Boolean(left == right)),
        BinaryOperator::NotEqual => Ok(Value::Boolean(left != right)),
        _ => Err(unsupported(op, "text", "text", line)),
    }
}
