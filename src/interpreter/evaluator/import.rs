use crate::{
    error::RuntimeError,
    interpreter::evaluator::core::{Evaluator, ExecResult},
    parse, tokenize,
};

impl Evaluator {
    /// Executes an import statement.
    ///
    /// The host loads the source behind `path`; it is then lexed, parsed
    /// and executed as a module *in the current global environment*, so the
    /// importer and the imported module share one flat namespace and a
    /// redeclared name raises as usual.
    ///
    /// A set of in-progress paths guards against a module transitively
    /// importing itself; re-entering a path raises `ImportCycle` instead of
    /// recursing forever.
    ///
    /// # Parameters
    /// - `path`: The import path, handed to the host's file loader as-is.
    /// - `line`: Line number for error reporting.
    ///
    /// # Errors
    /// - `RuntimeError::ImportCycle` when `path` is already being imported.
    /// - `RuntimeError::ImportUnsupported` when the host cannot load it.
    /// - `RuntimeError::Syntax` when the loaded source fails to lex or
    ///   parse; the parse error passes through unchanged.
    /// - Any runtime error the imported module raises.
    pub(crate) fn import(&mut self, path: &str, line: usize) -> ExecResult<()> {
        if self.import_stack.iter().any(|p| p == path) {
            return Err(RuntimeError::ImportCycle { path: path.to_string(),
                                                   line }.into());
        }

        let source = match self.host.load_file(path) {
            Ok(source) => source,
            Err(details) => {
                return Err(RuntimeError::ImportUnsupported { path: path.to_string(),
                                                             details,
                                                             line }.into());
            },
        };

        let tokens = tokenize(&source).map_err(RuntimeError::from)?;
        let module = parse(&tokens).map_err(RuntimeError::from)?;

        self.import_stack.push(path.to_string());
        let result = self.execute_module(&module);
        self.import_stack.pop();
        result
    }
}
