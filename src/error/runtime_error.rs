use crate::error::ParseError;

#[derive(Debug)]
/// Represents all errors that can occur during evaluation and runtime.
pub enum RuntimeError {
    /// Tried to use an identifier that is not declared in any visible scope.
    UndefinedIdentifier {
        /// The name of the identifier.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to declare an identifier that already exists in the same scope.
    Redeclaration {
        /// The name of the identifier.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to assign to a binding declared as a constant.
    AssignToConstant {
        /// The name of the constant.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A value's kind did not match the declared type of its destination.
    TypeMismatch {
        /// The declared type name.
        expected: String,
        /// The kind of the value that was produced.
        found:    String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Tried to store `nothing` in a binding that is not optional.
    NullToNonOptional {
        /// The name of the binding.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// An argument's kind did not match the parameter's declared type.
    ArgumentTypeMismatch {
        /// The name of the parameter.
        parameter: String,
        /// The parameter's declared type name.
        expected:  String,
        /// The kind of the argument that was supplied.
        found:     String,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// The wrong number of arguments was supplied to a function.
    ArityMismatch {
        /// The number of declared parameters.
        expected: usize,
        /// The number of arguments supplied.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Tried to call a binding that does not hold a function.
    NotCallable {
        /// The name of the binding.
        name:  String,
        /// The kind of the value that was found instead.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Tried to call a binding whose value is `nothing`.
    CallOnNothing {
        /// The name of the binding.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// An `if` condition evaluated to something other than a boolean.
    NonBooleanCondition {
        /// The kind of the condition value.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A function was used as an operand of a binary operator.
    InvalidBinaryOperand {
        /// The kind of the offending operand.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A binary operator was applied to an unsupported kind combination.
    InvalidBinaryExpression {
        /// The operator, as written in source.
        operator: String,
        /// The kind of the left operand.
        left:     String,
        /// The kind of the right operand.
        right:    String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// An accessor named an attribute the receiver's type does not have.
    UnknownAttribute {
        /// The receiver's type name.
        type_name: String,
        /// The attribute that was requested.
        attribute: String,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// An `import` appeared after a non-import statement.
    ImportNotAtTop {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The host could not supply the source for an import.
    ImportUnsupported {
        /// The path that was requested.
        path:    String,
        /// The host's explanation.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A module transitively imported itself.
    ImportCycle {
        /// The path that closed the cycle.
        path: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A `return` statement appeared outside any function body.
    ReturnOutsideFunction {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An imported module failed to lex or parse. Passed through unchanged.
    Syntax {
        /// The underlying parse error.
        error: ParseError,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UndefinedIdentifier { name, line } => {
                write!(f, "Error on line {line}: Unknown identifier '{name}'.")
            },
            Self::Redeclaration { name, line } => write!(f,
                                                         "Error on line {line}: '{name}' is already declared in this scope."),

            Self::AssignToConstant { name, line } => {
                write!(f, "Error on line {line}: Cannot assign to constant '{name}'.")
            },
            Self::TypeMismatch { expected, found, line } => write!(f,
                                                                   "Error on line {line}: Type mismatch: expected {expected}, found {found}."),

            Self::NullToNonOptional { name, line } => write!(f,
                                                             "Error on line {line}: Cannot store nothing in '{name}', which is not optional."),

            Self::ArgumentTypeMismatch { parameter,
                                         expected,
                                         found,
                                         line, } => write!(f,
                                                           "Error on line {line}: Argument '{parameter}' expects {expected}, found {found}."),

            Self::ArityMismatch { expected, found, line } => write!(f,
                                                                    "Error on line {line}: Expected {expected} arguments, found {found}."),

            Self::NotCallable { name, found, line } => write!(f,
                                                              "Error on line {line}: '{name}' is not callable (found {found})."),

            Self::CallOnNothing { name, line } => {
                write!(f, "Error on line {line}: '{name}' is nothing and cannot be called.")
            },
            Self::NonBooleanCondition { found, line } => write!(f,
                                                                "Error on line {line}: Condition must be a boolean, found {found}."),

            Self::InvalidBinaryOperand { found, line } => write!(f,
                                                                 "Error on line {line}: A {found} cannot be used as an operand."),

            Self::InvalidBinaryExpression { operator,
                                            left,
                                            right,
                                            line, } => write!(f,
                                                              "Error on line {line}: Cannot use {operator} on {left} and {right}."),

            Self::UnknownAttribute { type_name,
                                     attribute,
                                     line, } => write!(f,
                                                       "Error on line {line}: {type_name} has no attribute '{attribute}'."),

            Self::ImportNotAtTop { line } => write!(f,
                                                    "Error on line {line}: Imports must appear before any other statement."),

            Self::ImportUnsupported { path, details, line } => {
                write!(f, "Error on line {line}: Cannot import '{path}': {details}.")
            },
            Self::ImportCycle { path, line } => {
                write!(f, "Error on line {line}: Import cycle detected through '{path}'.")
            },
            Self::ReturnOutsideFunction { line } => {
                write!(f, "Error on line {line}: 'return' outside of a function.")
            },
            Self::Syntax { error } => write!(f, "{error}"),
        }
    }
}

impl std::error::Error for RuntimeError {}

impl From<ParseError> for RuntimeError {
    fn from(error: ParseError) -> Self {
        Self::Syntax { error }
    }
}

impl RuntimeError {
    /// Returns the source line the error refers to, when one is known.
    ///
    /// Used by the top-level reporter to quote the offending line of source.
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        match self {
            Self::UndefinedIdentifier { line, .. }
            | Self::Redeclaration { line, .. }
            | Self::AssignToConstant { line, .. }
            | Self::TypeMismatch { line, .. }
            | Self::NullToNonOptional { line, .. }
            | Self::ArgumentTypeMismatch { line, .. }
            | Self::ArityMismatch { line, .. }
            | Self::NotCallable { line, .. }
            | Self::CallOnNothing { line, .. }
            | Self::NonBooleanCondition { line, .. }
            | Self::InvalidBinaryOperand { line, .. }
            | Self::InvalidBinaryExpression { line, .. }
            | Self::UnknownAttribute { line, .. }
            | Self::ImportNotAtTop { line }
            | Self::ImportUnsupported { line, .. }
            | Self::ImportCycle { line, .. }
            | Self::ReturnOutsideFunction { line } => Some(*line),
            Self::Syntax { .. } => None,
        }
    }
}
