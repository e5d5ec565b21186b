use std::{cell::RefCell, fs, rc::Rc};

/// Sink for a single line of user-visible output.
pub type OutputFn = Box<dyn FnMut(&str)>;

/// Loader for imported source text. Returns the file contents, or a
/// human-readable reason why the path could not be loaded.
pub type LoadFileFn = Box<dyn FnMut(&str) -> Result<String, String>>;

/// Captured output of a collecting host.
///
/// Each entry is one emitted line, in order.
#[derive(Debug, Default)]
pub struct HostOutput {
    /// Lines written to standard output.
    pub stdout: Vec<String>,
    /// Lines written to standard error.
    pub stderr: Vec<String>,
}

/// The interpreter's connection to the outside world.
///
/// All observable effects flow through three injectable callables: standard
/// output, standard error, and the file loader used by imports. Tests and
/// embedders replace them to capture or redirect everything the evaluator
/// does.
pub struct Host {
    stdout:    OutputFn,
    stderr:    OutputFn,
    load_file: LoadFileFn,
}

impl Host {
    /// Builds a host from explicit callables.
    #[must_use]
    pub fn new(stdout: OutputFn, stderr: OutputFn, load_file: LoadFileFn) -> Self {
        Self { stdout,
               stderr,
               load_file }
    }

    /// Builds a host that collects all output into a shared buffer and
    /// rejects imports.
    ///
    /// This is the default host for embedding and tests: run a script, then
    /// inspect the returned buffer.
    ///
    /// # Example
    /// ```
    /// use quackscript::interpreter::host::Host;
    ///
    /// let (mut host, output) = Host::collecting();
    /// host.write_stdout("quack");
    ///
    /// assert_eq!(output.borrow().stdout, vec!["quack".to_string()]);
    /// ```
    #[must_use]
    pub fn collecting() -> (Self, Rc<RefCell<HostOutput>>) {
        let output = Rc::new(RefCell::new(HostOutput::default()));
        let stdout = Rc::clone(&output);
        let stderr = Rc::clone(&output);

        let host = Self { stdout:    Box::new(move |line| {
                              stdout.borrow_mut().stdout.push(line.to_string());
                          }),
                          stderr:    Box::new(move |line| {
                              stderr.borrow_mut().stderr.push(line.to_string());
                          }),
                          load_file: Box::new(|_| {
                              Err("imports are not supported by this host".to_string())
                          }), };

        (host, output)
    }

    /// Builds a host wired to the process: stdout, stderr and the file
    /// system. Used by the command line shell.
    #[must_use]
    pub fn process() -> Self {
        Self { stdout:    Box::new(|line| println!("{line}")),
               stderr:    Box::new(|line| eprintln!("{line}")),
               load_file: Box::new(|path| {
                   fs::read_to_string(path).map_err(|error| error.to_string())
               }), }
    }

    /// Emits one line of user-visible output.
    pub fn write_stdout(&mut self, line: &str) {
        (self.stdout)(line);
    }

    /// Emits one line of error output.
    pub fn write_stderr(&mut self, line: &str) {
        (self.stderr)(line);
    }

    /// Loads the source text behind an import path.
    ///
    /// # Errors
    /// Returns the host's explanation when the path cannot be loaded.
    pub fn load_file(&mut self, path: &str) -> Result<String, String> {
        (self.load_file)(path)
    }
}
