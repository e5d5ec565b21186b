use crate::{
    ast::BinaryOperator,
    interpreter::{
        evaluator::{binary::core::unsupported, core::EvalResult},
        value::core::Value,
    },
};

/// Evaluates a binary operation over two booleans.
///
/// Supported operators are `&&`, `||`, `==` and `!=`. Both operands are
/// already evaluated by the time this runs; the language does not
/// short-circuit.
///
/// # Parameters
/// - `op`: The operator.
/// - `left`: Left operand.
/// - `right`: Right operand.
/// - `line`: Line number for error reporting.
///
/// # Returns
/// An `EvalResult<Value>` containing a boolean.
///
/// # Example
/// ```
/// use quackscript::{
///     ast::BinaryOperator,
///     interpreter::{evaluator::binary::logic::eval_logic_op, value::core::Value},
/// };
///
/// let result = eval_logic_op(BinaryOperator::And, true, false, 1);
/// assert_eq!(result.unwrap(), Value::Boolean(false));
/// ```
pub fn eval_logic_op(op: BinaryOperator,
                     left: bool,
                     right: bool,
                     line: usize)
                     -> EvalResult<Value> {
    use BinaryOperator::{And, Equal, NotEqual, Or};

    match op {
        And => Ok(Value::Boolean(left && right)),
        Or => Ok(Value::Boolean(left || right)),
        Equal => Ok(Value::Boolean(left == right)),
        NotEqual => Ok(Value::Boolean(left != right)),
        _ => Err(unsupported(op, "boolean", "boolean", line)),
    }
}
