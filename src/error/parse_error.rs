#[derive(Debug)]
/// Represents all errors that can occur during lexing or parsing.
pub enum ParseError {
    /// The lexer found a character that starts no token.
    UnexpectedCharacter {
        /// The offending slice of source text.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Found an unexpected token while parsing.
    UnexpectedToken {
        /// A description of the token encountered.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Reached the end of input unexpectedly.
    UnexpectedEndOfInput {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A statement was not closed with the `🦆` terminator.
    MissingTerminator {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A type annotation named a type that does not exist.
    UnknownType {
        /// The unknown type name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedCharacter { found, line } => {
                write!(f, "Error on line {line}: Unexpected character: {found}.")
            },

            Self::UnexpectedToken { token, line } => {
                write!(f, "Error on line {line}: Unexpected token: {token}.")
            },

            Self::UnexpectedEndOfInput { line } => {
                write!(f, "Error on line {line}: Unexpected end of input.")
            },

            Self::MissingTerminator { line } => {
                write!(f, "Error on line {line}: Expected 🦆 at the end of the statement.")
            },

            Self::UnknownType { name, line } => {
                write!(f, "Error on line {line}: Unknown type '{name}'.")
            },
        }
    }
}

impl std::error::Error for ParseError {}
