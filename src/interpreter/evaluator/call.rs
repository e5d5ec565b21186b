use crate::{
    ast::{DataType, Expr, Param},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Evaluator, ExecResult, FrameKind, Interrupt},
        memory::{Cell, DeclarationKind},
        value::core::{FunctionValue, InternalFunction, Value},
    },
};

/// Releases a call frame when dropped.
///
/// Every function call acquires exactly one memory scope and one
/// call-context frame; both must be released on every exit path, including
/// a `return` escape and a propagated runtime error. The guard pops them in
/// its destructor.
pub(crate) struct FrameGuard {
    evaluator: *mut Evaluator,
}

impl Drop for FrameGuard {
    fn drop(&mut self) {
        unsafe {
            (*self.evaluator).memory.pop_scope();
            (*self.evaluator).frames.pop();
        }
    }
}

impl Evaluator {
    /// Pushes a function frame and scope, returning a guard that will pop
    /// both automatically.
    fn enter_function_frame(&mut self) -> FrameGuard {
        self.frames.push(FrameKind::Function);
        self.memory.push_scope();
        FrameGuard { evaluator: self, }
    }

    /// Evaluates a call of a named binding.
    ///
    /// The callee is resolved through memory. User-defined functions run
    /// their body as a code block; internal functions dispatch to their
    /// host routine.
    ///
    /// # Parameters
    /// - `name`: Name of the callee binding.
    /// - `arguments`: Unevaluated argument expressions.
    /// - `line`: Line number for error reporting.
    ///
    /// # Errors
    /// - `RuntimeError::UndefinedIdentifier` when the name is not declared.
    /// - `RuntimeError::CallOnNothing` when the binding holds `nothing`.
    /// - `RuntimeError::NotCallable` when it holds any other non-function.
    pub(crate) fn eval_call(&mut self,
                            name: &str,
                            arguments: &[Expr],
                            line: usize)
                            -> ExecResult<Value> {
        let callee = self.memory.get(name, line)?.value.clone();

        match callee {
            Value::Function(function) => self.call_function(&function, arguments, line),
            Value::Internal(internal) => self.call_internal(&internal, arguments, line),
            Value::Nothing => Err(RuntimeError::CallOnNothing { name: name.to_string(),
                                                                line }.into()),
            other => Err(RuntimeError::NotCallable { name:  name.to_string(),
                                                     found: other.type_name().to_string(),
                                                     line }.into()),
        }
    }

    /// Calls a user-defined function.
    ///
    /// A function frame and scope are entered, arguments are bound, and the
    /// body runs as a code block. A `return` escape carries the call's
    /// value; a body that falls off the end yields `nothing`.
    fn call_function(&mut self,
                     function: &FunctionValue,
                     arguments: &[Expr],
                     line: usize)
                     -> ExecResult<Value> {
        let _frame = self.enter_function_frame();
        self.bind_arguments(&function.params, arguments, line)?;

        match self.execute_code_block(&function.body) {
            Ok(()) => Ok(Value::Nothing),
            Err(Interrupt::Return(value)) => Ok(value),
            Err(error) => Err(error),
        }
    }

    /// Calls an internal function.
    ///
    /// Arguments are bound into the call scope exactly as for a user
    /// function; the host routine then reads them by name and its result
    /// becomes the call's value.
    fn call_internal(&mut self,
                     internal: &InternalFunction,
                     arguments: &[Expr],
                     line: usize)
                     -> ExecResult<Value> {
        let _frame = self.enter_function_frame();
        self.bind_arguments(&internal.params, arguments, line)?;

        Ok((internal.handler)(&self.memory, &mut self.host, line)?)
    }

    /// Binds call arguments as cells of the current (call) scope.
    ///
    /// Arguments are evaluated and bound pairwise, in order, so an earlier
    /// parameter is already visible while a later argument evaluates.
    /// Typed parameters check the argument's kind; untyped parameters
    /// accept anything and take the argument's own type.
    ///
    /// # Errors
    /// - `RuntimeError::ArityMismatch` when the counts differ.
    /// - `RuntimeError::ArgumentTypeMismatch` when an argument's kind does
    ///   not satisfy the parameter's declared type.
    fn bind_arguments(&mut self,
                      params: &[Param],
                      arguments: &[Expr],
                      line: usize)
                      -> ExecResult<()> {
        if params.len() != arguments.len() {
            return Err(RuntimeError::ArityMismatch { expected: params.len(),
                                                     found:    arguments.len(),
                                                     line }.into());
        }

        for (param, argument) in params.iter().zip(arguments) {
            let value = self.eval_expr(argument)?;

            if let Some(declared) = &param.declared_type
               && !value.satisfies(declared)
            {
                return Err(RuntimeError::ArgumentTypeMismatch { parameter: param.identifier
                                                                                .clone(),
                                                                expected:  declared.name()
                                                                                   .to_string(),
                                                                found:     value.type_name()
                                                                                .to_string(),
                                                                line }.into());
            }

            let (type_name, internal_type) = match &param.declared_type {
                Some(DataType::Optional(inner)) => {
                    ("optional".to_string(), Some(inner.name().to_string()))
                },
                Some(declared) => (declared.name().to_string(), None),
                None => (value.type_name().to_string(), None),
            };
            self.memory.declare(Cell { identifier: param.identifier.clone(),
                                       declaration: DeclarationKind::Argument,
                                       type_name,
                                       internal_type,
                                       value },
                                line)?;
        }
        Ok(())
    }
}
