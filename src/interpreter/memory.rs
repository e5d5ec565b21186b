use std::collections::HashMap;

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// How a cell was introduced into its scope.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DeclarationKind {
    /// Declared with `QUACK`; the cell can never be reassigned.
    Constant,
    /// Declared with `quack`; the cell may be reassigned.
    Variable,
    /// Bound by a function call; one per parameter.
    Argument,
}

/// A named, typed storage slot in a scope.
///
/// `type_name` holds the declared (or inferred) type name. For optional
/// bindings it is the string `"optional"` and `internal_type` carries the
/// wrapped type's name; for everything else `internal_type` is `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// The name the cell is stored under.
    pub identifier:    String,
    /// How the cell was introduced.
    pub declaration:   DeclarationKind,
    /// The declared or inferred type name.
    pub type_name:     String,
    /// The wrapped type's name, when the cell is optional.
    pub internal_type: Option<String>,
    /// The stored value.
    pub value:         Value,
}

/// The scoped symbol table.
///
/// Scopes form a stack: the last entry is the innermost scope. Lookup walks
/// the stack innermost-first, so inner declarations shadow outer ones. A
/// scope is pushed for every function call and popped when the call ends,
/// on every exit path.
pub struct Memory {
    scopes: Vec<HashMap<String, Cell>>,
}

#[allow(clippy::new_without_default)]
impl Memory {
    /// Creates a memory with a single empty global scope.
    #[must_use]
    pub fn new() -> Self {
        Self { scopes: vec![HashMap::new()], }
    }

    /// Resets the memory to a single empty global scope.
    ///
    /// Invoked at the start of every top-level execution.
    pub fn clear(&mut self) {
        self.scopes.clear();
        self.scopes.push(HashMap::new());
    }

    /// Pushes a new innermost scope.
    ///
    /// # Example
    /// ```
    /// use quackscript::interpreter::memory::Memory;
    ///
    /// let mut memory = Memory::new();
    /// memory.push_scope();
    ///
    /// assert_eq!(memory.depth(), 2);
    /// ```
    pub fn push_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    /// Removes the innermost scope. The global scope is never removed.
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Returns the current number of scopes (the global scope counts as one).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Inserts a cell into the innermost scope.
    ///
    /// # Parameters
    /// - `cell`: The cell to insert.
    /// - `line`: Source code line number for error reporting.
    ///
    /// # Errors
    /// `RuntimeError::Redeclaration` if the identifier already exists in the
    /// innermost scope. Shadowing an outer scope is allowed.
    ///
    /// # Example
    /// ```
    /// use quackscript::interpreter::{
    ///     memory::{Cell, DeclarationKind, Memory},
    ///     value::core::Value,
    /// };
    ///
    /// let mut memory = Memory::new();
    /// let cell = Cell { identifier:    "x".to_string(),
    ///                   declaration:   DeclarationKind::Variable,
    ///                   type_name:     "number".to_string(),
    ///                   internal_type: None,
    ///                   value:         Value::Number(1.0), };
    ///
    /// assert!(memory.declare(cell.clone(), 1).is_ok());
    /// assert!(memory.declare(cell, 2).is_err());
    /// ```
    pub fn declare(&mut self, cell: Cell, line: usize) -> EvalResult<()> {
        let scope = self.scopes.last_mut().expect("at least the global scope");

        if scope.contains_key(&cell.identifier) {
            return Err(RuntimeError::Redeclaration { name: cell.identifier,
                                                     line });
        }
        scope.insert(cell.identifier.clone(), cell);
        Ok(())
    }

    /// Retrieves the cell for an identifier, searching innermost-outward.
    ///
    /// # Parameters
    /// - `name`: The identifier to resolve.
    /// - `line`: Source code line number for error reporting.
    ///
    /// # Errors
    /// `RuntimeError::UndefinedIdentifier` if no scope declares the name.
    pub fn get(&self, name: &str, line: usize) -> EvalResult<&Cell> {
        for scope in self.scopes.iter().rev() {
            if let Some(cell) = scope.get(name) {
                return Ok(cell);
            }
        }
        Err(RuntimeError::UndefinedIdentifier { name: name.to_string(),
                                                line })
    }

    /// Replaces the value of an existing cell, wherever it is declared.
    ///
    /// The cell's declared type does not change. The new value must satisfy
    /// it: a mismatched kind raises `TypeMismatch`, and `nothing` may only
    /// be stored into an optional cell.
    ///
    /// # Parameters
    /// - `name`: The identifier to update.
    /// - `value`: The replacement value.
    /// - `line`: Source code line number for error reporting.
    ///
    /// # Errors
    /// - `RuntimeError::UndefinedIdentifier` if no scope declares the name.
    /// - `RuntimeError::AssignToConstant` if the cell is a constant.
    /// - `RuntimeError::NullToNonOptional` for `nothing` into a non-optional.
    /// - `RuntimeError::TypeMismatch` for any other kind mismatch.
    pub fn update(&mut self, name: &str, value: Value, line: usize) -> EvalResult<()> {
        for scope in self.scopes.iter_mut().rev() {
            let Some(cell) = scope.get_mut(name) else {
                continue;
            };

            if cell.declaration == DeclarationKind::Constant {
                return Err(RuntimeError::AssignToConstant { name: name.to_string(),
                                                            line });
            }

            let expected = cell.internal_type.as_deref().unwrap_or(&cell.type_name);
            if matches!(value, Value::Nothing) {
                if cell.internal_type.is_none() {
                    return Err(RuntimeError::NullToNonOptional { name: name.to_string(),
                                                                 line });
                }
            } else if value.type_name() != expected {
                return Err(RuntimeError::TypeMismatch { expected: expected.to_string(),
                                                        found:    value.type_name().to_string(),
                                                        line });
            }

            cell.value = value;
            return Ok(());
        }
        Err(RuntimeError::UndefinedIdentifier { name: name.to_string(),
                                                line })
    }
}
