/// Represents a literal value in the language.
///
/// `Literal` covers all raw, constant values that can appear directly in
/// source code: numbers, text, booleans and the absent value `nothing`.
/// It is used in the AST to represent literal expressions; the evaluator
/// converts it into a runtime `Value` without further checks.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// A 64-bit floating-point literal.
    Number(f64),
    /// A text literal delimited by single quotes.
    Text(String),
    /// A boolean literal value: `true` or `false`.
    Boolean(bool),
    /// The absent value: `nothing`.
    Nothing,
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// A declarable type name, as written in type annotations.
///
/// `Optional` wraps another type and permits `nothing` where the wrapped
/// type would forbid it.
#[derive(Debug, Clone, PartialEq)]
pub enum DataType {
    /// `number`: double precision floating point.
    Number,
    /// `text`: immutable Unicode text.
    Text,
    /// `boolean`: `true` or `false`.
    Boolean,
    /// `nothing`: the absent value's own type.
    Nothing,
    /// `vector2`: a pair of numbers.
    Vector2,
    /// `vector3`: a triple of numbers.
    Vector3,
    /// `func`: a user-defined function.
    Func,
    /// `T?`: an optional wrapper around another declared type.
    Optional(Box<Self>),
}

impl DataType {
    /// Returns the canonical name of the type, as used in annotations and
    /// error messages.
    ///
    /// ## Example
    /// ```
    /// use quackscript::ast::DataType;
    ///
    /// assert_eq!(DataType::Number.name(), "number");
    /// assert_eq!(DataType::Optional(Box::new(DataType::Text)).name(), "optional");
    /// ```
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Text => "text",
            Self::Boolean => "boolean",
            Self::Nothing => "nothing",
            Self::Vector2 => "vector2",
            Self::Vector3 => "vector3",
            Self::Func => "func",
            Self::Optional(_) => "optional",
        }
    }

    /// Resolves a type name written in source to a `DataType`.
    ///
    /// Returns `None` for names that are not declarable types.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "number" => Some(Self::Number),
            "text" => Some(Self::Text),
            "boolean" => Some(Self::Boolean),
            "nothing" => Some(Self::Nothing),
            "vector2" => Some(Self::Vector2),
            "vector3" => Some(Self::Vector3),
            "func" => Some(Self::Func),
            _ => None,
        }
    }
}

/// A single function parameter: an identifier with an optional declared type.
///
/// Untyped parameters accept arguments of any kind; typed parameters are
/// checked at call time.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    /// The parameter name.
    pub identifier:    String,
    /// The declared type, when the parameter carries an annotation.
    pub declared_type: Option<DataType>,
}

/// Distinguishes the two declaration keywords.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Declarator {
    /// `QUACK`: the binding cannot be reassigned.
    Constant,
    /// `quack`: the binding may be reassigned.
    Variable,
}

/// The top-level unit of program execution produced by the parser.
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    /// Statements in source order.
    pub statements: Vec<Statement>,
}

/// Represents a top-level or block-level statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A declaration introducing a new binding: `quack x: number <- 1🦆`.
    Declaration {
        /// Whether the binding is a constant or a variable.
        declarator:    Declarator,
        /// The name being declared.
        name:          String,
        /// The declared type, when annotated.
        declared_type: Option<DataType>,
        /// The initializer expression.
        value:         Expr,
        /// Line number in the source code.
        line:          usize,
    },
    /// A reassignment of an existing binding: `x <- 2🦆`.
    Assignment {
        /// The name being assigned.
        name:  String,
        /// The value being assigned.
        value: Expr,
        /// Line number in the source code.
        line:  usize,
    },
    /// A standalone expression evaluated for its result.
    Expression {
        /// The expression to evaluate.
        expr: Expr,
        /// Line number in the source code.
        line: usize,
    },
    /// A `return` statement, legal only inside a function body.
    Return {
        /// The returned expression; a bare `return` yields `nothing`.
        value: Option<Expr>,
        /// Line number in the source code.
        line:  usize,
    },
    /// An `if … then … else … end` statement.
    If {
        /// The condition; must evaluate to a boolean (or `nothing`).
        condition:  Expr,
        /// Statements executed when the condition holds.
        then_block: Vec<Statement>,
        /// Statements executed otherwise, when present.
        else_block: Option<Vec<Statement>>,
        /// Line number in the source code.
        line:       usize,
    },
    /// An `import 'path'🦆` statement, legal only at the top of a module.
    Import {
        /// The path handed to the host's file loader.
        path: String,
        /// Line number in the source code.
        line: usize,
    },
}

impl Statement {
    /// Gets the line number from `self`.
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Declaration { line, .. }
            | Self::Assignment { line, .. }
            | Self::Expression { line, .. }
            | Self::Return { line, .. }
            | Self::If { line, .. }
            | Self::Import { line, .. } => *line,
        }
    }
}

/// An abstract syntax tree node representing an expression.
///
/// Each variant models a distinct syntactic construct and carries the source
/// line it originated from for error reporting.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value.
    Literal {
        /// The constant value.
        value: Literal,
        /// Line number in the source code.
        line:  usize,
    },
    /// Reference to a binding by name.
    Identifier {
        /// Name of the binding.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// A function literal: `(:a, b: number:) :> {: … :}`.
    Function {
        /// The declared parameters.
        params: Vec<Param>,
        /// The body statements.
        body:   Vec<Statement>,
        /// Line number in the source code.
        line:   usize,
    },
    /// A call of a named binding: `f(:x, y:)`.
    FuncCall {
        /// Name of the callee binding.
        name:      String,
        /// Argument expressions.
        arguments: Vec<Self>,
        /// Line number in the source code.
        line:      usize,
    },
    /// A binary operation.
    Binary {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// An accessor expression: `receiver.attribute(:args:)`.
    ///
    /// `arguments` is `None` for a plain field access, which the evaluator
    /// rejects; only attribute calls are defined.
    Accessor {
        /// The receiver expression.
        receiver:  Box<Self>,
        /// The attribute name after the dot.
        attribute: String,
        /// Argument expressions, when the selector is a call.
        arguments: Option<Vec<Self>>,
        /// Line number in the source code.
        line:      usize,
    },
}

impl Expr {
    /// Gets the line number from `self`.
    ///
    /// ## Example
    /// ```
    /// use quackscript::ast::Expr;
    ///
    /// let expr = Expr::Identifier { name: "x".to_string(),
    ///                               line: 5, };
    ///
    /// assert_eq!(expr.line_number(), 5);
    /// ```
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Literal { line, .. }
            | Self::Identifier { line, .. }
            | Self::Function { line, .. }
            | Self::FuncCall { line, .. }
            | Self::Binary { line, .. }
            | Self::Accessor { line, .. } => *line,
        }
    }
}

/// Represents a binary operator.
///
/// Binary operators cover arithmetic, comparison, equality, logic and text
/// concatenation. The language has no unary operators.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition or text concatenation (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Remainder (`%`)
    Mod,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Logical and (`&&`)
    And,
    /// Logical or (`||`)
    Or,
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use BinaryOperator::{
            Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod, Mul, NotEqual, Or,
            Sub,
        };
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Mod => "%",
            Less => "<",
            Greater => ">",
            LessEqual => "<=",
            GreaterEqual => ">=",
            Equal => "==",
            NotEqual => "!=",
            And => "&&",
            Or => "||",
        };
        write!(f, "{operator}")
    }
}
