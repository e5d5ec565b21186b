use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// Type alias for attribute handlers.
///
/// A handler receives the receiver value, the evaluated call arguments and
/// the line number. It returns the attribute call's value.
pub type AttributeFn = fn(&Value, &[Value], usize) -> EvalResult<Value>;

/// Defines the static primitive attributes by generating a lookup table.
///
/// Each entry provides:
/// - the receiver's type name,
/// - the attribute name,
/// - a function pointer implementing the attribute.
///
/// The macro produces `AttributeDef` (internal metadata) and
/// `ATTRIBUTE_TABLE` (the static table searched at dispatch time).
macro_rules! static_attributes {
    (
        $(
            ($type_name:literal, $attribute:literal) => $func:expr
        ),* $(,)?
    ) => {
        struct AttributeDef {
            type_name: &'static str,
            attribute: &'static str,
            func:      AttributeFn,
        }
        static ATTRIBUTE_TABLE: &[AttributeDef] = &[
            $(
                AttributeDef { type_name: $type_name, attribute: $attribute, func: $func },
            )*
        ];
    };
}

static_attributes! {
    ("number", "floor")   => number_floor,
    ("number", "ceil")    => number_ceil,
    ("number", "round")   => number_round,
    ("number", "abs")     => number_abs,
    ("text", "length")    => text_length,
    ("text", "upper")     => text_upper,
    ("text", "lower")     => text_lower,
    ("text", "trim")      => text_trim,
    ("boolean", "negate") => boolean_negate,
}

/// Resolves an attribute by receiver type name and attribute name.
///
/// # Parameters
/// - `type_name`: The receiver's type name.
/// - `attribute`: The attribute requested after the dot.
///
/// # Returns
/// The handler, or `None` when the pair is not registered.
#[must_use]
pub fn lookup(type_name: &str, attribute: &str) -> Option<AttributeFn> {
    ATTRIBUTE_TABLE.iter()
                   .find(|def| def.type_name == type_name && def.attribute == attribute)
                   .map(|def| def.func)
}

/// Checks that an attribute call received the expected number of arguments.
///
/// ## Example
/// ```
/// use quackscript::interpreter::{evaluator::attributes::check_arity, value::core::Value};
///
/// let args = vec![Value::Number(2.0)];
///
/// assert!(check_arity(&args, 1, 15).is_ok());
/// assert!(check_arity(&args, 0, 15).is_err());
/// ```
pub const fn check_arity(args: &[Value], expected: usize, line: usize) -> EvalResult<()> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(RuntimeError::ArityMismatch { expected,
                                          found: args.len(),
                                          line })
    }
}

/// `number.floor(::)` rounds toward negative infinity.
fn number_floor(receiver: &Value, args: &[Value], line: usize) -> EvalResult<Value> {
    check_arity(args, 0, line)?;
    Ok(Value::Number(receiver.as_number(line)?.floor()))
}

/// `number.ceil(::)` rounds toward positive infinity.
fn number_ceil(receiver: &Value, args: &[Value], line: usize) -> EvalResult<Value> {
    check_arity(args, 0, line)?;
    Ok(Value::Number(receiver.as_number(line)?.ceil()))
}

/// `number.round(::)` rounds half away from zero.
fn number_round(receiver: &Value, args: &[Value], line: usize) -> EvalResult<Value> {
    check_arity(args, 0, line)?;
    Ok(Value::Number(receiver.as_number(line)?.round()))
}

/// `number.abs(::)` returns the absolute value.
fn number_abs(receiver: &Value, args: &[Value], line: usize) -> EvalResult<Value> {
    check_arity(args, 0, line)?;
    Ok(Value::Number(receiver.as_number(line)?.abs()))
}

/// `text.length(::)` returns the number of characters.
#[allow(clippy::cast_precision_loss)]
fn text_length(receiver: &Value, args: &[Value], line: usize) -> EvalResult<Value> {
    check_arity(args, 0, line)?;
    Ok(Value::Number(receiver.as_text(line)?.chars().count() as f64))
}

/// `text.upper(::)` returns an uppercased copy.
fn text_upper(receiver: &Value, args: &[Value], line: usize) -> EvalResult<Value> {
    check_arity(args, 0, line)?;
    Ok(Value::Text(receiver.as_text(line)?.to_uppercase()))
}

/// `text.lower(::)` returns a lowercased copy.
fn text_lower(receiver: &Value, args: &[Value], line: usize) -> EvalResult<Value> {
    check_arity(args, 0, line)?;
    Ok(Value::Text(receiver.as_text(line)?.to_lowercase()))
}

/// `text.trim(::)` returns a copy without surrounding whitespace.
fn text_trim(receiver: &Value, args: &[Value], line: usize) -> EvalResult<Value> {
    check_arity(args, 0, line)?;
    Ok(Value::Text(receiver.as_text(line)?.trim().to_string()))
}

/// `boolean.negate(::)` returns the logical complement.
fn boolean_negate(receiver: &Value, args: &[Value], line: usize) -> EvalResult<Value> {
    check_arity(args, 0, line)?;
    Ok(Value::Boolean(!receiver.as_boolean(line)?))
}
