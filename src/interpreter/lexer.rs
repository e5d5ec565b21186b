use logos::Logos;

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// Numeric literal tokens, such as `3.14`, `.5` or `2e-10`.
    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?", parse_number)]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", parse_number)]
    #[regex(r"[0-9]+([eE][+-]?[0-9]+)?", parse_number)]
    Number(f64),
    /// Text literal tokens in single quotes, such as `'duck'`.
    #[regex(r"'([^'\\\n]|\\[\\'nt])*'", parse_text)]
    Text(String),
    /// Boolean literal tokens, `true` or `false`.
    #[token("true", parse_boolean)]
    #[token("false", parse_boolean)]
    Boolean(bool),
    /// `nothing`
    #[token("nothing")]
    Nothing,
    /// `QUACK` declares a constant.
    #[token("QUACK")]
    ConstQuack,
    /// `quack` declares a variable.
    #[token("quack")]
    VarQuack,
    /// `return`
    #[token("return")]
    Return,
    /// `if`
    #[token("if")]
    If,
    /// `then`
    #[token("then")]
    Then,
    /// `else`
    #[token("else")]
    Else,
    /// `end`
    #[token("end")]
    End,
    /// `import`
    #[token("import")]
    Import,
    /// Identifier tokens; binding or attribute names such as `x` or `greet`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `🦆`, the statement terminator.
    #[token("🦆")]
    Duck,
    /// `<-`
    #[token("<-")]
    LeftArrow,
    /// `(:` opens a parameter or argument list.
    #[token("(:")]
    OpenParams,
    /// `:)` closes a parameter or argument list.
    #[token(":)")]
    CloseParams,
    /// `{:` opens a function body.
    #[token("{:")]
    OpenBlock,
    /// `:}` closes a function body.
    #[token(":}")]
    CloseBlock,
    /// `:>` separates a parameter list from a function body.
    #[token(":>")]
    FuncArrow,
    /// `:`
    #[token(":")]
    Colon,
    /// `?`
    #[token("?")]
    Question,
    /// `,`
    #[token(",")]
    Comma,
    /// `.`
    #[token(".")]
    Dot,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `&&`
    #[token("&&")]
    AndAnd,
    /// `||`
    #[token("||")]
    OrOr,
    /// `-- Comments.`
    #[regex(r"--[^\n\r]*", logos::skip, allow_greedy = true)]
    Comment,
    /// Line breaks; counted for diagnostics, then skipped.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        logos::Skip
    })]
    NewLine,
    /// Spaces, tabs and feeds.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line: 1 }
    }
}

/// Parses a numeric literal from the current token slice.
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// - `Some(f64)`: The parsed value if successful.
/// - `None`: If the token slice is not a valid number.
fn parse_number(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Parses a text literal from the current token slice, resolving the `\\`,
/// `\'`, `\n` and `\t` escape sequences and stripping the quotes.
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// The unescaped text between the quotes.
fn parse_text(lex: &logos::Lexer<Token>) -> String {
    let inner = &lex.slice()[1..lex.slice().len() - 1];
    let mut text = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => text.push('\n'),
                Some('t') => text.push('\t'),
                Some(escaped) => text.push(escaped),
                None => {},
            }
        } else {
            text.push(c);
        }
    }

    text
}

/// Parses a boolean literal from the current token slice (`true` or `false`).
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// - `Some(true)` if the slice is `"true"`.
/// - `Some(false)` if the slice is `"false"`.
/// - `None` otherwise.
fn parse_boolean(lex: &logos::Lexer<Token>) -> Option<bool> {
    match lex.slice() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}
