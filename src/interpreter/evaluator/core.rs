use std::rc::Rc;

use crate::{
    ast::{DataType, Declarator, Expr, Module, Statement},
    error::RuntimeError,
    interpreter::{
        evaluator::{attributes, stdlib},
        host::Host,
        memory::{Cell, DeclarationKind, Memory},
        value::core::{FunctionValue, Value},
    },
};

/// Result type used by leaf evaluation helpers.
///
/// Helpers that cannot observe a `return` escape (memory, binary operators,
/// attributes, the standard library) return a plain `RuntimeError`.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// The non-local exits of the statement walker.
///
/// `Return` is a control-flow signal, not an error: it unwinds the walker
/// until the nearest function-call frame catches it. Keeping it a separate
/// variant means catching runtime errors can never accidentally swallow a
/// return.
#[derive(Debug)]
pub enum Interrupt {
    /// A runtime error propagating to the top-level reporter.
    Error(RuntimeError),
    /// A `return` carrying its value out of the current function body.
    Return(Value),
}

impl From<RuntimeError> for Interrupt {
    fn from(error: RuntimeError) -> Self {
        Self::Error(error)
    }
}

/// Result type used by the statement and expression walkers.
pub type ExecResult<T> = Result<T, Interrupt>;

/// A context the walker can be nested inside.
///
/// Only function bodies exist today; the stack is kept so future block
/// contexts can be told apart when checking where `return` is legal.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FrameKind {
    /// A function body entered through a call.
    Function,
}

/// The tree-walking evaluator.
///
/// Owns the memory, the call-context stack and the host. One evaluator runs
/// one module at a time; `execute` resets all state, so an instance can be
/// reused across runs.
pub struct Evaluator {
    /// The scoped symbol table.
    pub memory:               Memory,
    pub(crate) frames:       Vec<FrameKind>,
    pub(crate) host:         Host,
    pub(crate) import_stack: Vec<String>,
}

impl Evaluator {
    /// Creates an evaluator around the given host.
    #[must_use]
    pub fn new(host: Host) -> Self {
        Self { memory: Memory::new(),
               frames: Vec::new(),
               host,
               import_stack: Vec::new() }
    }

    /// Runs a module from a clean slate.
    ///
    /// Memory is reset to a single global scope, the standard library is
    /// installed, and the module executes. A runtime error halts the module
    /// and is reported on the host's standard error; when `source` is
    /// supplied, the offending line of source is quoted after the message.
    ///
    /// # Parameters
    /// - `module`: The parsed module to run.
    /// - `source`: The module's source text, for error rendering.
    pub fn execute(&mut self, module: &Module, source: Option<&str>) {
        self.memory.clear();
        self.frames.clear();
        self.import_stack.clear();
        stdlib::install(&mut self.memory);

        match self.execute_module(module) {
            Ok(()) => {},
            Err(Interrupt::Error(error)) => self.report(&error, source),
            Err(Interrupt::Return(_)) => {
                unreachable!("return escapes are caught at function-call frames")
            },
        }
    }

    /// Executes a module in the current environment.
    ///
    /// The leading run of import statements is executed first, tracked with
    /// a cursor so the module itself is never mutated and can be re-run. An
    /// import encountered after any other statement raises `ImportNotAtTop`.
    ///
    /// Top-level expression statements that produce a value other than
    /// `nothing` have their text conversion emitted on standard output.
    ///
    /// # Errors
    /// Propagates any runtime error raised by a statement.
    pub fn execute_module(&mut self, module: &Module) -> ExecResult<()> {
        let mut cursor = 0;
        while let Some(Statement::Import { path, line }) = module.statements.get(cursor) {
            self.import(path, *line)?;
            cursor += 1;
        }

        for statement in &module.statements[cursor..] {
            if let Statement::Import { line, .. } = statement {
                return Err(RuntimeError::ImportNotAtTop { line: *line }.into());
            }
            if let Some(value) = self.execute_statement(statement)?
               && !matches!(value, Value::Nothing)
            {
                self.host.write_stdout(&value.to_string());
            }
        }
        Ok(())
    }

    /// Executes the statements of a code block in order.
    ///
    /// A `return` statement inside the block escapes through the
    /// `Interrupt::Return` signal; everything else runs to completion.
    ///
    /// # Errors
    /// Propagates runtime errors and the return signal.
    pub fn execute_code_block(&mut self, block: &[Statement]) -> ExecResult<()> {
        for statement in block {
            self.execute_statement(statement)?;
        }
        Ok(())
    }

    /// Executes a single statement.
    ///
    /// # Returns
    /// `Some(Value)` for expression statements, `None` for everything else.
    ///
    /// # Errors
    /// - Propagates runtime errors from subexpressions.
    /// - `Interrupt::Return` for a `return` statement inside a function.
    /// - `RuntimeError::ReturnOutsideFunction` for a `return` with no
    ///   enclosing function frame.
    /// - `RuntimeError::ImportNotAtTop` for an import reaching the general
    ///   dispatcher.
    pub fn execute_statement(&mut self, statement: &Statement) -> ExecResult<Option<Value>> {
        match statement {
            Statement::Declaration { declarator,
                                     name,
                                     declared_type,
                                     value,
                                     line, } => {
                self.eval_declaration(*declarator, name, declared_type.as_ref(), value, *line)?;
                Ok(None)
            },

            Statement::Assignment { name, value, line } => {
                let value = self.eval_expr(value)?;
                self.memory.update(name, value, *line)?;
                Ok(None)
            },

            Statement::Expression { expr, .. } => Ok(Some(self.eval_expr(expr)?)),

            Statement::Return { value, line } => {
                if self.frames.is_empty() {
                    return Err(RuntimeError::ReturnOutsideFunction { line: *line }.into());
                }
                let value = match value {
                    Some(expr) => self.eval_expr(expr)?,
                    None => Value::Nothing,
                };
                Err(Interrupt::Return(value))
            },

            Statement::If { condition,
                            then_block,
                            else_block,
                            line, } => {
                let condition = self.eval_expr(condition)?;
                let branch = match condition {
                    Value::Boolean(true) => Some(then_block),
                    Value::Boolean(false) | Value::Nothing => else_block.as_ref(),
                    other => {
                        return Err(RuntimeError::NonBooleanCondition { found: other.type_name()
                                                                              .to_string(),
                                                                       line:  *line, }.into());
                    },
                };
                if let Some(block) = branch {
                    self.execute_code_block(block)?;
                }
                Ok(None)
            },

            Statement::Import { line, .. } => {
                Err(RuntimeError::ImportNotAtTop { line: *line }.into())
            },
        }
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. The
    /// evaluator dispatches based on expression variant: literals,
    /// identifiers, function literals, calls, binary operations and
    /// accessor expressions.
    ///
    /// # Errors
    /// Propagates runtime errors from the dispatched handler.
    pub fn eval_expr(&mut self, expr: &Expr) -> ExecResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(Value::from(value)),

            Expr::Identifier { name, line } => Ok(self.memory.get(name, *line)?.value.clone()),

            Expr::Function { params, body, .. } => {
                Ok(Value::Function(Rc::new(FunctionValue { params: params.clone(),
                                                           body:   body.clone(), })))
            },

            Expr::FuncCall { name, arguments, line } => self.eval_call(name, arguments, *line),

            Expr::Binary { left, op, right, line } => {
                self.eval_binary_expr(left, *op, right, *line)
            },

            Expr::Accessor { receiver,
                             attribute,
                             arguments,
                             line, } => {
                self.eval_accessor(receiver, attribute, arguments.as_deref(), *line)
            },
        }
    }

    /// Evaluates a declaration statement.
    ///
    /// The declared type is resolved from the annotation, or inferred from
    /// the initializer when no annotation is present. Optional annotations
    /// store the cell under the type `"optional"` with the wrapped type
    /// name kept alongside.
    ///
    /// # Errors
    /// - `RuntimeError::NullToNonOptional` when the initializer is
    ///   `nothing` and the binding is not optional.
    /// - `RuntimeError::TypeMismatch` when the initializer's kind does not
    ///   match the declared type.
    /// - `RuntimeError::Redeclaration` when the name already exists in the
    ///   current scope.
    fn eval_declaration(&mut self,
                        declarator: Declarator,
                        name: &str,
                        declared_type: Option<&DataType>,
                        value: &Expr,
                        line: usize)
                        -> ExecResult<()> {
        let value = self.eval_expr(value)?;

        let (type_name, internal_type) = match declared_type {
            Some(DataType::Optional(inner)) => {
                ("optional".to_string(), Some(inner.name().to_string()))
            },
            Some(declared) => (declared.name().to_string(), None),
            None => (value.type_name().to_string(), None),
        };

        if matches!(value, Value::Nothing) {
            if internal_type.is_none() {
                return Err(RuntimeError::NullToNonOptional { name: name.to_string(),
                                                             line }.into());
            }
        } else {
            let expected = internal_type.as_deref().unwrap_or(&type_name);
            if value.type_name() != expected {
                return Err(RuntimeError::TypeMismatch { expected: expected.to_string(),
                                                        found:    value.type_name().to_string(),
                                                        line }.into());
            }
        }

        let declaration = match declarator {
            Declarator::Constant => DeclarationKind::Constant,
            Declarator::Variable => DeclarationKind::Variable,
        };
        self.memory.declare(Cell { identifier: name.to_string(),
                                   declaration,
                                   type_name,
                                   internal_type,
                                   value },
                            line)?;
        Ok(())
    }

    /// Evaluates an accessor expression.
    ///
    /// The receiver is evaluated first. When the selector is a call, its
    /// arguments are evaluated in order and the attribute is dispatched
    /// through the static primitive attribute registry. Plain field
    /// selectors are not defined and raise `UnknownAttribute`.
    ///
    /// # Errors
    /// `RuntimeError::UnknownAttribute` for field selectors and attributes
    /// the receiver's type does not register.
    fn eval_accessor(&mut self,
                     receiver: &Expr,
                     attribute: &str,
                     arguments: Option<&[Expr]>,
                     line: usize)
                     -> ExecResult<Value> {
        let receiver = self.eval_expr(receiver)?;

        let Some(arguments) = arguments else {
            return Err(RuntimeError::UnknownAttribute { type_name: receiver.type_name()
                                                                           .to_string(),
                                                        attribute: attribute.to_string(),
                                                        line }.into());
        };

        let mut values = Vec::with_capacity(arguments.len());
        for argument in arguments {
            values.push(self.eval_expr(argument)?);
        }

        let Some(handler) = attributes::lookup(receiver.type_name(), attribute) else {
            return Err(RuntimeError::UnknownAttribute { type_name: receiver.type_name()
                                                                           .to_string(),
                                                        attribute: attribute.to_string(),
                                                        line }.into());
        };
        Ok(handler(&receiver, &values, line)?)
    }

    /// Renders a runtime error on the host's standard error.
    ///
    /// When the source text is available and the error carries a line, the
    /// offending line is quoted after the message.
    fn report(&mut self, error: &RuntimeError, source: Option<&str>) {
        self.host.write_stderr(&error.to_string());

        if let Some(source) = source
           && let Some(line) = error.line()
           && line > 0
           && let Some(text) = source.lines().nth(line - 1)
        {
            self.host.write_stderr(&format!("  {line} | {}", text.trim_end()));
        }
    }
}
