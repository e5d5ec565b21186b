use crate::{
    ast::{BinaryOperator, Expr},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            binary::{logic, number, text},
            core::{EvalResult, Evaluator, ExecResult},
        },
        value::core::Value,
    },
};

impl Evaluator {
    /// Evaluates a binary expression.
    ///
    /// The right operand is evaluated first, then the left. Functions are
    /// not valid operands on either side; everything else dispatches by
    /// kind through [`eval_binary`].
    ///
    /// # Errors
    /// - `RuntimeError::InvalidBinaryOperand` for a callable operand.
    /// - Anything [`eval_binary`] raises.
    pub(crate) fn eval_binary_expr(&mut self,
                                   left: &Expr,
                                   op: BinaryOperator,
                                   right: &Expr,
                                   line: usize)
                                   -> ExecResult<Value> {
        let right = self.eval_expr(right)?;
        let left = self.eval_expr(left)?;

        if left.is_callable() {
            return Err(RuntimeError::InvalidBinaryOperand { found: left.type_name().to_string(),
                                                            line }.into());
        }
        if right.is_callable() {
            return Err(RuntimeError::InvalidBinaryOperand { found: right.type_name()
                                                                        .to_string(),
                                                            line }.into());
        }

        Ok(eval_binary(op, &left, &right, line)?)
    }
}

/// Evaluates a binary operation between two values.
///
/// Dispatch is by the matched kinds of the operands: number pairs, text
/// pairs and boolean pairs each have their own operator table. Two
/// operands of *different* kinds compare unequal, so `==` yields `false`
/// and `!=` yields `true`; no other operator accepts them. Matched kinds
/// outside the tables (vectors, `nothing`) admit no operator at all.
///
/// # Parameters
/// - `op`: The operator.
/// - `left`: Left operand.
/// - `right`: Right operand.
/// - `line`: Line number for error reporting.
///
/// # Returns
/// An `EvalResult<Value>` containing the evaluated result.
///
/// # Example
/// ```
/// use quackscript::{
///     ast::BinaryOperator,
///     interpreter::{evaluator::binary::core::eval_binary, value::core::Value},
/// };
///
/// let left = Value::Text("a".to_string());
/// let right = Value::Number(3.0);
///
/// let result = eval_binary(BinaryOperator::NotEqual, &left, &right, 1);
/// assert_eq!(result.unwrap(), Value::Boolean(true));
/// ```
pub fn eval_binary(op: BinaryOperator,
                   left: &Value,
                   right: &Value,
                   line: usize)
                   -> EvalResult<Value> {
    match (left, right) {
        (Value::Number(l), Value::Number(r)) => number::eval_number_op(op, *l, *r, line),
        (Value::Text(l), Value::Text(r)) => text::eval_text_op(op, l, r, line),
        (Value::Boolean(l), Value::Boolean(r)) => logic::eval_logic_op(op, *l, *r, line),

        _ if left.type_name() != right.type_name() => match op {
            BinaryOperator::Equal => Ok(Value::Boolean(false)),
            BinaryOperator::NotEqual => Ok(Value::Boolean(true)),
            _ => Err(unsupported(op, left.type_name(), right.type_name(), line)),
        },

        _ => Err(unsupported(op, left.type_name(), right.type_name(), line)),
    }
}

/// Builds the error for an operator applied to kinds outside its table.
pub(crate) fn unsupported(op: BinaryOperator,
                          left: &str,
                          right: &str,
                          line: usize)
                          -> RuntimeError {
    RuntimeError::InvalidBinaryExpression { operator: op.to_string(),
                                            left: left.to_string(),
                                            right: right.to_string(),
                                            line }
}
