use crate::{
    ast::BinaryOperator,
    interpreter::{
        evaluator::{binary::core::unsupported, core::EvalResult},
        value::core::Value,
    },
};

/// Evaluates a binary operation over two numbers.
///
/// Arithmetic follows IEEE 754 double semantics throughout: division by
/// zero yields an infinity rather than trapping, `%` is the hardware real
/// remainder, and `NaN` compares unordered, so every ordering and `==`
/// comparison against it is `false` and `!=` is `true`.
///
/// # Parameters
/// - `op`: The operator.
/// - `left`: Left operand.
/// - `right`: Right operand.
/// - `line`: Line number for error reporting.
///
/// # Returns
/// A number for arithmetic operators and a boolean for comparisons.
///
/// # Example
/// ```
/// use quackscript::{
///     ast::BinaryOperator,
///     interpreter::{evaluator::binary::number::eval_number_op, value::core::Value},
/// };
///
/// let result = eval_number_op(BinaryOperator::Div, 1.0, 0.0, 1).unwrap();
/// assert_eq!(result, Value::Number(f64::INFINITY));
/// ```
pub fn eval_number_op(op: BinaryOperator, left: f64, right: f64, line: usize) -> EvalResult<Value> {
    use BinaryOperator::{
        Add, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod, Mul, NotEqual, Sub,
    };

    match op {
        Add => Ok(Value::Number(left + right)),
        Sub => Ok(Value::Number(left - right)),
        Mul => Ok(Value::Number(left * right)),
        Div => Ok(Value::Number(left / right)),
        Mod => Ok(Value::Number(left % right)),

        Less => Ok(Value::Boolean(left < right)),
        Greater => Ok(Value::Boolean(left > right)),
        LessEqual => Ok(Value::Boolean(left <= right)),
        GreaterEqual => Ok(Value::Boolean(left >= right)),
        Equal => Ok(Value::Boolean(left == right)),
        NotEqual => Ok(Value::Boolean(left != right)),

        _ => Err(unsupported(op, "number", "number", line)),
    }
}
