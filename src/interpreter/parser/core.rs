use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr, Literal},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            statement::parse_statements_until,
            utils::{parse_comma_separated, parse_identifier, parse_param},
        },
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a full expression.
///
/// This is the entry point for expression parsing.
/// It begins at the lowest-precedence level, logical OR, and recursively
/// descends through the precedence hierarchy.
///
/// Grammar: `expression := logical_or`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_logical_or(tokens)
}

/// Parses logical OR expressions.
///
/// Handles left-associative chains of `||`. Precedence is lower than AND.
///
/// Grammar: `logical_or := logical_and ("||" logical_and)*`
///
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// A binary expression tree using `BinaryOperator::Or`.
pub fn parse_logical_or<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_logical_and(tokens)?;

    loop {
        if let Some((Token::OrOr, line)) = tokens.peek() {
            let line = *line;
            tokens.next();

            let right = parse_logical_and(tokens)?;

            left = Expr::Binary { left: Box::new(left),
                                  op: BinaryOperator::Or,
                                  right: Box::new(right),
                                  line };
            continue;
        }

        break;
    }

    Ok(left)
}

/// Parses logical AND expressions.
///
/// Handles left-associative chains of `&&`. Precedence is higher than OR
/// and lower than equality.
///
/// Grammar: `logical_and := equality ("&&" equality)*`
///
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// A binary expression tree using `BinaryOperator::And`.
pub fn parse_logical_and<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_equality(tokens)?;

    loop {
        if let Some((Token::AndAnd, line)) = tokens.peek() {
            let line = *line;
            tokens.next();

            let right = parse_equality(tokens)?;

            left = Expr::Binary { left: Box::new(left),
                                  op: BinaryOperator::And,
                                  right: Box::new(right),
                                  line };
            continue;
        }

        break;
    }

    Ok(left)
}

/// Parses equality expressions.
///
/// Handles left-associative chains of `==` and `!=`.
///
/// Grammar: `equality := relational (("==" | "!=") relational)*`
///
/// # Parameters
/// - `tokens`: Token stream with line information.
///
/// # Returns
/// A binary expression tree combining relational-level nodes.
pub fn parse_equality<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_relational(tokens)?;

    loop {
        if let Some((token, line)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && matches!(op, BinaryOperator::Equal | BinaryOperator::NotEqual)
        {
            let line = *line;
            tokens.next();

            let right = parse_relational(tokens)?;

            left = Expr::Binary { left: Box::new(left),
                                  op,
                                  right: Box::new(right),
                                  line };
            continue;
        }

        break;
    }

    Ok(left)
}

/// Parses relational expressions.
///
/// Handles left-associative chains of `<`, `>`, `<=` and `>=`.
///
/// Grammar: `relational := additive (("<" | ">" | "<=" | ">=") additive)*`
///
/// # Parameters
/// - `tokens`: Token stream with line information.
///
/// # Returns
/// A binary expression tree combining additive-level nodes.
pub fn parse_relational<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_additive(tokens)?;

    loop {
        if let Some((token, line)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && matches!(op,
                       BinaryOperator::Less
                       | BinaryOperator::Greater
                       | BinaryOperator::LessEqual
                       | BinaryOperator::GreaterEqual)
        {
            let line = *line;
            tokens.next();

            let right = parse_additive(tokens)?;

            left = Expr::Binary { left: Box::new(left),
                                  op,
                                  right: Box::new(right),
                                  line };
            continue;
        }

        break;
    }

    Ok(left)
}

/// Parses addition and subtraction expressions.
///
/// Handles left-associative binary operators: `+` and `-`.
///
/// Grammar: `additive := multiplicative (("+" | "-") multiplicative)*`
///
/// # Parameters
/// - `tokens`: Token stream with line information.
///
/// # Returns
/// An `Expr::Binary` tree representing the parsed expression.
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_multiplicative(tokens)?;
    loop {
        if let Some((token, line)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && matches!(op, BinaryOperator::Add | BinaryOperator::Sub)
        {
            let line = *line;
            tokens.next();
            let right = parse_multiplicative(tokens)?;
            left = Expr::Binary { left: Box::new(left),
                                  op,
                                  right: Box::new(right),
                                  line };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses multiplication-level expressions.
///
/// Handles left-associative operators: `*`, `/` and `%`.
///
/// Grammar: `multiplicative := postfix (("*" | "/" | "%") postfix)*`
///
/// # Parameters
/// - `tokens`: Token stream with line information.
///
/// # Returns
/// A binary expression tree combining postfix-level nodes.
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_postfix(tokens)?;
    loop {
        if let Some((token, line)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && matches!(op,
                       BinaryOperator::Mul | BinaryOperator::Div | BinaryOperator::Mod)
        {
            let line = *line;
            tokens.next();
            let right = parse_postfix(tokens)?;
            left = Expr::Binary { left: Box::new(left),
                                  op,
                                  right: Box::new(right),
                                  line };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses postfix accessor chains.
///
/// After a primary expression, any number of `.attribute(:args:)` selectors
/// may follow. A selector without an argument list is kept as a plain field
/// access, which the evaluator rejects; only attribute calls are defined.
///
/// Grammar: `postfix := primary ("." identifier call_args?)*`
///
/// # Parameters
/// - `tokens`: Token stream with line information.
///
/// # Returns
/// The primary expression, possibly wrapped in `Expr::Accessor` nodes.
pub fn parse_postfix<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut expr = parse_primary(tokens)?;

    loop {
        if let Some((Token::Dot, line)) = tokens.peek() {
            let line = *line;
            tokens.next();

            let attribute = parse_identifier(tokens)?;
            let arguments = if let Some((Token::OpenParams, _)) = tokens.peek() {
                tokens.next();
                Some(parse_comma_separated(tokens, parse_expression, &Token::CloseParams)?)
            } else {
                None
            };

            expr = Expr::Accessor { receiver: Box::new(expr),
                                    attribute,
                                    arguments,
                                    line };
            continue;
        }
        break;
    }

    Ok(expr)
}

/// Parses a primary expression.
///
/// A primary is one of:
/// - a literal (`2`, `'duck'`, `true`, `nothing`),
/// - an identifier, optionally called: `f(:x:)`,
/// - a function literal: `(:a, b:) :> {: … :}`,
/// - a parenthesized expression: `(a + b)`.
///
/// # Parameters
/// - `tokens`: Token stream with line information.
///
/// # Returns
/// The parsed expression node.
///
/// # Errors
/// Returns a `ParseError` for any token that cannot begin an expression and
/// for unexpected end of input.
pub fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((Token::Number(v), line)) => Ok(Expr::Literal { value: Literal::Number(*v),
                                                             line:  *line, }),
        Some((Token::Text(t), line)) => Ok(Expr::Literal { value: Literal::Text(t.clone()),
                                                           line:  *line, }),
        Some((Token::Boolean(b), line)) => Ok(Expr::Literal { value: Literal::Boolean(*b),
                                                              line:  *line, }),
        Some((Token::Nothing, line)) => Ok(Expr::Literal { value: Literal::Nothing,
                                                           line:  *line, }),

        Some((Token::Identifier(name), line)) => {
            if let Some((Token::OpenParams, _)) = tokens.peek() {
                tokens.next();
                let arguments =
                    parse_comma_separated(tokens, parse_expression, &Token::CloseParams)?;
                return Ok(Expr::FuncCall { name: name.clone(),
                                           arguments,
                                           line: *line });
            }
            Ok(Expr::Identifier { name: name.clone(),
                                  line: *line, })
        },

        Some((Token::OpenParams, line)) => parse_function_literal(tokens, *line),

        Some((Token::LParen, line)) => {
            let expr = parse_expression(tokens)?;
            match tokens.next() {
                Some((Token::RParen, _)) => Ok(expr),
                Some((tok, line)) => {
                    Err(ParseError::UnexpectedToken { token: format!("Expected ')', found {tok:?}"),
                                                      line:  *line, })
                },
                None => Err(ParseError::UnexpectedEndOfInput { line: *line }),
            }
        },

        Some((tok, line)) => {
            Err(ParseError::UnexpectedToken { token: format!("Expected expression, found {tok:?}"),
                                              line:  *line, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Parses a function literal, positioned just after the opening `(:`.
///
/// Grammar: `function := "(:" (param ("," param)*)? ":)" ":>" "{:"
/// statement* ":}"`
///
/// # Parameters
/// - `tokens`: Token stream positioned at the first parameter or `:)`.
/// - `line`: Line of the opening bracket.
///
/// # Returns
/// An `Expr::Function` carrying the parameters and body.
///
/// # Errors
/// Returns a `ParseError` if the arrow or body brackets are missing or a
/// body statement fails to parse.
fn parse_function_literal<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let params = parse_comma_separated(tokens, parse_param, &Token::CloseParams)?;

    match tokens.next() {
        Some((Token::FuncArrow, _)) => {},
        Some((tok, line)) => {
            return Err(ParseError::UnexpectedToken { token: format!("Expected ':>' after parameters, found {tok:?}"),
                                                     line:  *line, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { line }),
    }

    match tokens.next() {
        Some((Token::OpenBlock, _)) => {},
        Some((tok, line)) => {
            return Err(ParseError::UnexpectedToken { token: format!("Expected '{{:' to open the body, found {tok:?}"),
                                                     line:  *line, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { line }),
    }

    let body = parse_statements_until(tokens, &[Token::CloseBlock])?;
    tokens.next(); // consume ':}'

    Ok(Expr::Function { params,
                        body,
                        line })
}

/// Maps a token to its corresponding binary operator.
///
/// Returns `Some(BinaryOperator)` when the token represents a binary
/// operator, and `None` for all other tokens.
///
/// # Parameters
/// - `token`: Token to convert.
///
/// # Returns
/// `Some(BinaryOperator)` if the token corresponds to a binary operator,
/// otherwise `None`.
///
/// # Example
/// ```
/// use quackscript::{
///     ast::BinaryOperator,
///     interpreter::{lexer::Token, parser::core::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(&Token::Plus),
///            Some(BinaryOperator::Add));
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::Percent => Some(BinaryOperator::Mod),
        Token::Less => Some(BinaryOperator::Less),
        Token::Greater => Some(BinaryOperator::Greater),
        Token::LessEqual => Some(BinaryOperator::LessEqual),
        Token::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        Token::EqualEqual => Some(BinaryOperator::Equal),
        Token::BangEqual => Some(BinaryOperator::NotEqual),
        Token::AndAnd => Some(BinaryOperator::And),
        Token::OrOr => Some(BinaryOperator::Or),
        _ => None,
    }
}
