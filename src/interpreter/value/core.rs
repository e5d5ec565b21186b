use std::rc::Rc;

use crate::{
    ast::{DataType, Literal, Param, Statement},
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, host::Host, memory::Memory},
};

/// Represents a runtime value in the interpreter.
///
/// This enum models all the kinds that can appear in expressions,
/// declarations, function returns and conditions. Values are immutable;
/// every operation produces a fresh value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A numeric value (double precision floating-point).
    Number(f64),
    /// A text value (immutable Unicode text).
    Text(String),
    /// A boolean value (`true` or `false`).
    /// Produced by comparison and logical operators and consumed by `if`
    /// conditions, which accept no other kind.
    Boolean(bool),
    /// The absent value. Only bindings declared optional may hold it.
    Nothing,
    /// A pair of numbers. Declared in the type system; arithmetic over
    /// vectors is not defined yet.
    Vector2 {
        /// The first component.
        x: f64,
        /// The second component.
        y: f64,
    },
    /// A triple of numbers. Declared in the type system; arithmetic over
    /// vectors is not defined yet.
    Vector3 {
        /// The first component.
        x: f64,
        /// The second component.
        y: f64,
        /// The third component.
        z: f64,
    },
    /// A first-class user-defined function.
    Function(Rc<FunctionValue>),
    /// A reference to a host-provided routine.
    Internal(Rc<InternalFunction>),
}

/// The payload of a user-defined function value: its parameters and body.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionValue {
    /// The declared parameters, in order.
    pub params: Vec<Param>,
    /// The body statements, executed on call.
    pub body:   Vec<Statement>,
}

/// Signature of a host routine backing an internal function.
///
/// The routine reads its named arguments from the call scope of `memory`
/// and may produce output through `host`.
pub type InternalFn = fn(&Memory, &mut Host, usize) -> EvalResult<Value>;

/// A host-provided routine surfaced as a first-class value.
///
/// Internal functions are installed into the global scope before a module
/// runs and dispatched by identifier at call time.
#[derive(Debug, Clone, PartialEq)]
pub struct InternalFunction {
    /// The name the routine is installed under.
    pub identifier: &'static str,
    /// The declared parameters, checked like a user function's.
    pub params:     Vec<Param>,
    /// The routine itself.
    pub handler:    InternalFn,
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<&Literal> for Value {
    fn from(literal: &Literal) -> Self {
        match literal {
            Literal::Number(n) => Self::Number(*n),
            Literal::Text(t) => Self::Text(t.clone()),
            Literal::Boolean(b) => Self::Boolean(*b),
            Literal::Nothing => Self::Nothing,
        }
    }
}

impl Value {
    /// Maps the value's kind to its canonical declared type name, as used in
    /// annotations and error messages.
    ///
    /// ## Example
    /// ```
    /// use quackscript::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Number(1.0).type_name(), "number");
    /// assert_eq!(Value::Nothing.type_name(), "nothing");
    /// ```
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Text(_) => "text",
            Self::Boolean(_) => "boolean",
            Self::Nothing => "nothing",
            Self::Vector2 { .. } => "vector2",
            Self::Vector3 { .. } => "vector3",
            Self::Function(_) => "func",
            Self::Internal(_) => "internalFunc",
        }
    }

    /// Returns `true` if the value is a user-defined or internal function.
    #[must_use]
    pub const fn is_callable(&self) -> bool {
        matches!(self, Self::Function(_) | Self::Internal(_))
    }

    /// Tests whether the value's kind satisfies a declared type.
    ///
    /// An optional type accepts `nothing` or its wrapped type; every other
    /// type accepts exactly the kind carrying its name.
    ///
    /// ## Example
    /// ```
    /// use quackscript::{ast::DataType, interpreter::value::core::Value};
    ///
    /// let optional = DataType::Optional(Box::new(DataType::Number));
    ///
    /// assert!(Value::Number(1.0).satisfies(&optional));
    /// assert!(Value::Nothing.satisfies(&optional));
    /// assert!(!Value::Nothing.satisfies(&DataType::Number));
    /// ```
    #[must_use]
    pub fn satisfies(&self, declared: &DataType) -> bool {
        match declared {
            DataType::Optional(inner) => {
                matches!(self, Self::Nothing) || self.type_name() == inner.name()
            },
            _ => self.type_name() == declared.name(),
        }
    }

    /// Converts the value to an `f64`, or returns an error if not a number.
    ///
    /// # Parameters
    /// - `line`: Source code line number for error reporting.
    ///
    /// # Returns
    /// - `Ok(f64)`: If the value is a number.
    /// - `Err(RuntimeError::TypeMismatch)`: Otherwise.
    ///
    /// # Example
    /// ```
    /// use quackscript::interpreter::value::core::Value;
    ///
    /// let x = Value::Number(10.0);
    ///
    /// assert_eq!(x.as_number(42).unwrap(), 10.0);
    /// ```
    pub fn as_number(&self, line: usize) -> EvalResult<f64> {
        match self {
            Self::Number(n) => Ok(*n),
            _ => Err(RuntimeError::TypeMismatch { expected: "number".to_string(),
                                                  found:    self.type_name().to_string(),
                                                  line }),
        }
    }

    /// Converts the value to a `&str`, or returns an error if not text.
    ///
    /// # Parameters
    /// - `line`: Source code line number for error reporting.
    ///
    /// # Returns
    /// - `Ok(&str)`: If the value is text.
    /// - `Err(RuntimeError::TypeMismatch)`: Otherwise.
    pub fn as_text(&self, line: usize) -> EvalResult<&str> {
        match self {
            Self::Text(t) => Ok(t),
            _ => Err(RuntimeError::TypeMismatch { expected: "text".to_string(),
                                                  found:    self.type_name().to_string(),
                                                  line }),
        }
    }

    /// Converts the value to a `bool`, or returns an error if not a boolean.
    ///
    /// # Parameters
    /// - `line`: Source code line number for error reporting.
    ///
    /// # Returns
    /// - `Ok(bool)`: If the value is a boolean.
    /// - `Err(RuntimeError::TypeMismatch)`: Otherwise.
    ///
    /// # Example
    /// ```
    /// use quackscript::interpreter::value::core::Value;
    ///
    /// assert!(Value::Boolean(true).as_boolean(1).unwrap());
    /// assert!(Value::Number(1.0).as_boolean(1).is_err());
    /// ```
    pub fn as_boolean(&self, line: usize) -> EvalResult<bool> {
        match self {
            Self::Boolean(b) => Ok(*b),
            _ => Err(RuntimeError::TypeMismatch { expected: "boolean".to_string(),
                                                  found:    self.type_name().to_string(),
                                                  line }),
        }
    }
}

/// The user-visible text conversion.
///
/// Numbers render in the shortest form that parses back to the same value,
/// so `5.0` prints as `5` and `2.5` as `2.5`. Functions have no literal
/// syntax and render as placeholders.
impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(t) => write!(f, "{t}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Nothing => write!(f, "nothing"),
            Self::Vector2 { x, y } => write!(f, "({x}, {y})"),
            Self::Vector3 { x, y, z } => write!(f, "({x}, {y}, {z})"),
            Self::Function(_) => write!(f, "<func>"),
            Self::Internal(i) => write!(f, "<internal func {}>", i.identifier),
        }
    }
}
