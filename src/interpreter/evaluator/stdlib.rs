use std::rc::Rc;

use crate::{
    ast::{DataType, Param},
    interpreter::{
        evaluator::core::EvalResult,
        host::Host,
        memory::{Cell, DeclarationKind, Memory},
        value::core::{InternalFunction, Value},
    },
};

/// Defines the standard library by generating the installer and a name
/// list.
///
/// Each entry provides:
/// - the name the routine is callable under,
/// - its parameter list (name plus optional declared type),
/// - the host routine implementing it.
///
/// The macro produces `install` (declares every routine as a constant
/// `internalFunc` cell in the global scope) and `INTERNAL_FUNCTIONS` (the
/// public list of names).
macro_rules! internal_functions {
    (
        $(
            $name:literal => {
                params: [ $( ($param:literal, $declared:expr) ),* $(,)? ],
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        /// Installs the standard library into the global scope.
        ///
        /// Invoked once per top-level execution, right after memory is
        /// reset. Each routine becomes a constant cell holding an
        /// `internalFunc` value, so scripts resolve and call them exactly
        /// like user functions.
        pub fn install(memory: &mut Memory) {
            $(
                let params = vec![
                    $(
                        Param { identifier:    $param.to_string(),
                                declared_type: $declared, },
                    )*
                ];
                let function = InternalFunction { identifier: $name,
                                                  params,
                                                  handler: $func };
                memory.declare(Cell { identifier:    $name.to_string(),
                                      declaration:   DeclarationKind::Constant,
                                      type_name:     "internalFunc".to_string(),
                                      internal_type: None,
                                      value:         Value::Internal(Rc::new(function)), },
                               0)
                      .expect("internal function names are unique");
            )*
        }
        /// The names of all internal functions, in installation order.
        pub const INTERNAL_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

internal_functions! {
    "print"     => { params: [("value", None)], func: print },
    "to_text"   => { params: [("value", None)], func: to_text },
    "to_number" => { params: [("value", Some(DataType::Text))], func: to_number },
    "vec2"      => { params: [("x", Some(DataType::Number)), ("y", Some(DataType::Number))],
                     func: vec2 },
    "vec3"      => { params: [("x", Some(DataType::Number)), ("y", Some(DataType::Number)),
                              ("z", Some(DataType::Number))],
                     func: vec3 },
}

/// `print(:value:)` writes the value's text conversion to standard
/// output and returns `nothing`.
///
/// Accepts any kind; printing is defined for every value.
fn print(memory: &Memory, host: &mut Host, line: usize) -> EvalResult<Value> {
    let value = &memory.get("value", line)?.value;
    host.write_stdout(&value.to_string());
    Ok(Value::Nothing)
}

/// `to_text(:value:)` returns the value's text conversion as a text value.
fn to_text(memory: &Memory, _host: &mut Host, line: usize) -> EvalResult<Value> {
    let value = &memory.get("value", line)?.value;
    Ok(Value::Text(value.to_string()))
}

/// `to_number(:value: text:)` parses a number out of text.
///
/// Returns `nothing` when the text does not parse, so callers bind the
/// result to an optional binding.
fn to_number(memory: &Memory, _host: &mut Host, line: usize) -> EvalResult<Value> {
    let text = memory.get("value", line)?.value.as_text(line)?.trim().to_string();

    match text.parse::<f64>() {
        Ok(number) => Ok(Value::Number(number)),
        Err(_) => Ok(Value::Nothing),
    }
}

/// `vec2(:x, y: number:)` constructs a `vector2`.
fn vec2(memory: &Memory, _host: &mut Host, line: usize) -> EvalResult<Value> {
    let x = memory.get("x", line)?.value.as_number(line)?;
    let y = memory.get("y", line)?.value.as_number(line)?;
    Ok(Value::Vector2 { x, y })
}

/// `vec3(:x, y, z: number:)` constructs a `vector3`.
fn vec3(memory: &Memory, _host: &mut Host, line: usize) -> EvalResult<Value> {
    let x = memory.get("x", line)?.value.as_number(line)?;
    let y = memory.get("y", line)?.value.as_number(line)?;
    let z = memory.get("z", line)?.value.as_number(line)?;
    Ok(Value::Vector3 { x, y, z })
}
