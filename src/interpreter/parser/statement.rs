use std::iter::Peekable;

use crate::{
    ast::{Declarator, Statement},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, parse_expression},
            utils::{expect_duck, parse_data_type, parse_identifier},
        },
    },
};

/// Parses a single statement.
///
/// A statement may be one of:
/// - an import,
/// - a declaration (`QUACK` or `quack`),
/// - a `return`,
/// - an `if … then … end` conditional,
/// - an assignment,
/// - an expression used as a statement.
///
/// Parsing is attempted in that order; the first matching construct is
/// returned. If none match, the input is parsed as an expression statement.
/// Every statement except `if` is closed by the `🦆` terminator.
///
/// # Parameters
/// - `tokens`: Token iterator containing `(Token, line)` pairs.
///
/// # Returns
/// A parsed [`Statement`] node.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some(statement) = parse_import(tokens)? {
        return Ok(statement);
    }
    if let Some(statement) = parse_declaration(tokens)? {
        return Ok(statement);
    }
    if let Some(statement) = parse_return(tokens)? {
        return Ok(statement);
    }
    if let Some(statement) = parse_if(tokens)? {
        return Ok(statement);
    }
    if let Some(statement) = parse_assignment(tokens)? {
        return Ok(statement);
    }

    let line = tokens.peek().map_or(0, |(_, l)| *l);
    let expr = parse_expression(tokens)?;
    expect_duck(tokens, line)?;

    Ok(Statement::Expression { expr, line })
}

/// Parses a sequence of statements until one of the given closing tokens.
///
/// The closing token is **not** consumed; the caller decides what to do
/// with it. Used for `if` branches (closed by `else` or `end`) and function
/// bodies (closed by `:}`).
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the first statement.
/// - `closers`: Tokens that terminate the sequence.
///
/// # Returns
/// The statements parsed before the closer.
///
/// # Errors
/// `ParseError::UnexpectedEndOfInput` if the stream ends before a closer.
pub fn parse_statements_until<'a, I>(tokens: &mut Peekable<I>,
                                     closers: &[Token])
                                     -> ParseResult<Vec<Statement>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut statements = Vec::new();

    loop {
        match tokens.peek() {
            Some((tok, _)) if closers.contains(tok) => break,
            Some(_) => statements.push(parse_statement(tokens)?),
            None => return Err(ParseError::UnexpectedEndOfInput { line: 0 }),
        }
    }

    Ok(statements)
}

/// Parses an import statement: `import 'path'🦆`.
///
/// If the next token is not `import`, this function returns `Ok(None)` and
/// does not consume any input. Placement rules (imports must lead the
/// module) are enforced by the evaluator, not the parser.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at a possible `import`.
///
/// # Returns
/// - `Ok(Some(Statement::Import))` if an import is parsed,
/// - `Ok(None)` if no import is present.
///
/// # Errors
/// Returns a `ParseError` if the path literal or terminator is missing.
fn parse_import<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<Statement>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((Token::Import, line)) = tokens.peek() else {
        return Ok(None);
    };
    let line = *line;
    tokens.next();

    let path = match tokens.next() {
        Some((Token::Text(path), _)) => path.clone(),
        Some((tok, line)) => {
            return Err(ParseError::UnexpectedToken { token: format!("Expected import path, found {tok:?}"),
                                                     line:  *line, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { line }),
    };
    expect_duck(tokens, line)?;

    Ok(Some(Statement::Import { path, line }))
}

/// Parses a declaration statement.
///
/// A declaration has the form:
///
///     QUACK <identifier> (":" <type> "?"?)? "<-" <expression>🦆
///     quack <identifier> (":" <type> "?"?)? "<-" <expression>🦆
///
/// `QUACK` declares a constant, `quack` a variable. When the type
/// annotation is omitted, the type is inferred from the initializer at
/// runtime.
///
/// If the next token is neither keyword, this function returns `Ok(None)`
/// and does not consume any input.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at a possible declaration keyword.
///
/// # Returns
/// - `Ok(Some(Statement::Declaration))` if a declaration is parsed,
/// - `Ok(None)` if no declaration is present.
///
/// # Errors
/// Returns a `ParseError` if:
/// - the identifier is missing,
/// - the annotation names an unknown type,
/// - `<-` is missing,
/// - the initializer is malformed,
/// - the terminator is missing.
fn parse_declaration<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<Statement>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let declarator = match tokens.peek() {
        Some((Token::ConstQuack, _)) => Declarator::Constant,
        Some((Token::VarQuack, _)) => Declarator::Variable,
        _ => return Ok(None),
    };
    let line = tokens.next().map_or(0, |(_, l)| *l);

    let name = parse_identifier(tokens)?;

    let declared_type = if let Some((Token::Colon, _)) = tokens.peek() {
        tokens.next();
        Some(parse_data_type(tokens)?)
    } else {
        None
    };

    match tokens.next() {
        Some((Token::LeftArrow, _)) => {},
        Some((tok, l)) => {
            return Err(ParseError::UnexpectedToken { token: format!("Expected '<-', found {tok:?}"),
                                                     line:  *l, });
        },
        None => {
            return Err(ParseError::UnexpectedEndOfInput { line });
        },
    }

    let value = parse_expression(tokens)?;
    expect_duck(tokens, line)?;

    Ok(Some(Statement::Declaration { declarator,
                                     name,
                                     declared_type,
                                     value,
                                     line }))
}

/// Parses a return statement: `return🦆` or `return <expression>🦆`.
///
/// If the next token is not `return`, this function returns `Ok(None)` and
/// does not consume any input. A bare `return` yields `nothing`.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at a possible `return`.
///
/// # Returns
/// - `Ok(Some(Statement::Return))` if a return is parsed,
/// - `Ok(None)` if no return is present.
fn parse_return<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<Statement>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((Token::Return, line)) = tokens.peek() else {
        return Ok(None);
    };
    let line = *line;
    tokens.next();

    let value = if let Some((Token::Duck, _)) = tokens.peek() {
        None
    } else {
        Some(parse_expression(tokens)?)
    };
    expect_duck(tokens, line)?;

    Ok(Some(Statement::Return { value, line }))
}

/// Parses an `if` statement with an optional `else` branch.
///
/// Syntax:
///
///     if <condition> then <statements> end
///     if <condition> then <statements> else <statements> end
///
/// The branch statements are regular statements with their own terminators;
/// `end` closes the conditional without one.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at a possible `if`.
///
/// # Returns
/// - `Ok(Some(Statement::If))` if a conditional is parsed,
/// - `Ok(None)` if no conditional is present.
///
/// # Errors
/// Returns a `ParseError` if `then` or `end` is missing or a branch
/// statement fails to parse.
fn parse_if<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<Statement>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((Token::If, line)) = tokens.peek() else {
        return Ok(None);
    };
    let line = *line;
    tokens.next();

    let condition = parse_expression(tokens)?;

    match tokens.next() {
        Some((Token::Then, _)) => {},
        Some((tok, l)) => {
            return Err(ParseError::UnexpectedToken { token: format!("Expected 'then' after the condition, found {tok:?}"),
                                                     line:  *l, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { line }),
    }

    let then_block = parse_statements_until(tokens, &[Token::Else, Token::End])?;

    let else_block = if let Some((Token::Else, _)) = tokens.peek() {
        tokens.next();
        Some(parse_statements_until(tokens, &[Token::End])?)
    } else {
        None
    };
    tokens.next(); // consume 'end'

    Ok(Some(Statement::If { condition,
                            then_block,
                            else_block,
                            line }))
}

/// Parses an assignment statement: `<identifier> <- <expression>🦆`.
///
/// The function performs a limited lookahead: if the next token is an
/// identifier and the following token is `<-`, an assignment is parsed.
/// Otherwise the function returns `Ok(None)` and does not consume tokens,
/// leaving constructs like `x🦆` or `f(:1:)🦆` to the expression parser.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at a potential identifier.
///
/// # Returns
/// - `Ok(Some(Statement::Assignment))` if an assignment is parsed,
/// - `Ok(None)` if no assignment is present.
fn parse_assignment<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<Statement>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::Identifier(_), _)) = tokens.peek() {
        let mut lookahead = tokens.clone();
        lookahead.next();

        if let Some((Token::LeftArrow, line)) = lookahead.peek() {
            let line = *line;
            let name = if let Some((Token::Identifier(n), _)) = tokens.next() {
                n.clone()
            } else {
                unreachable!()
            };
            tokens.next(); // consume '<-'

            let value = parse_expression(tokens)?;
            expect_duck(tokens, line)?;

            return Ok(Some(Statement::Assignment { name, value, line }));
        }
    }
    Ok(None)
}
