use std::iter::Peekable;

use crate::{
    ast::{DataType, Param},
    error::ParseError,
    interpreter::{lexer::Token, parser::core::ParseResult},
};

/// Parses a comma-separated list of items until a closing token.
///
/// This utility is shared by call argument lists and parameter lists. It
/// repeatedly calls `parse_item` to parse one element, expecting either:
///
/// - a comma, to continue the list, or
/// - the specified closing token, to end it.
///
/// An immediately encountered closing token produces an empty list. The
/// closing token is consumed.
///
/// Grammar (simplified): `list := (item ("," item)*)?`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the first item or closing token.
/// - `parse_item`: Function used to parse each list element.
/// - `closing`: The token that terminates the list.
///
/// # Returns
/// A vector of parsed items.
///
/// # Errors
/// Returns a `ParseError` if:
/// - an item fails to parse,
/// - an unexpected token is encountered,
/// - the stream ends before the closing token.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: &Token)
    -> Result<Vec<T>, ParseError>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut items = Vec::new();
    if let Some((tok, _)) = tokens.peek()
       && tok == closing
    {
        tokens.next();

        return Ok(items);
    }
    loop {
        items.push(parse_item(tokens)?);
        match tokens.peek() {
            Some((Token::Comma, _)) => {
                tokens.next();
            },
            Some((tok, _)) if tok == closing => {
                tokens.next();
                break;
            },
            Some((tok, line)) => {
                return Err(ParseError::UnexpectedToken { token: format!("Expected ',' or {closing:?}, found {tok:?}"),
                                                         line:  *line, });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line: 0 }),
        }
    }
    Ok(items)
}

/// Parses a plain identifier and returns its name.
///
/// The next token must be `Token::Identifier`.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at an identifier.
///
/// # Returns
/// A `String` containing the identifier.
///
/// # Errors
/// Returns a `ParseError` if:
/// - the next token is not an identifier,
/// - the input ends unexpectedly.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>)
                                                              -> ParseResult<String>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((Token::Identifier(s), _)) => Ok(s.clone()),
        Some((tok, line)) => {
            Err(ParseError::UnexpectedToken { token: format!("Expected identifier, found {tok:?}"),
                                              line:  *line, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Parses a type annotation: a type name optionally followed by `?`.
///
/// Grammar: `type := name "?"?`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the type name.
///
/// # Returns
/// The resolved `DataType`; a trailing `?` wraps it in `Optional`.
///
/// # Errors
/// Returns a `ParseError` if the name is not a declarable type or the input
/// ends unexpectedly.
pub(in crate::interpreter::parser) fn parse_data_type<'a, I>(tokens: &mut Peekable<I>)
                                                             -> ParseResult<DataType>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((Token::Identifier(name), line)) => {
            let base = DataType::from_name(name).ok_or_else(|| {
                                                    ParseError::UnknownType { name: name.clone(),
                                                                              line: *line, }
                                                })?;

            if let Some((Token::Question, _)) = tokens.peek() {
                tokens.next();
                return Ok(DataType::Optional(Box::new(base)));
            }
            Ok(base)
        },
        Some((tok, line)) => {
            Err(ParseError::UnexpectedToken { token: format!("Expected type name, found {tok:?}"),
                                              line:  *line, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Parses a single function parameter: an identifier with an optional
/// `: type` annotation.
///
/// Grammar: `param := identifier (":" type)?`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the parameter name.
///
/// # Returns
/// A `Param` with the optional declared type.
pub(in crate::interpreter::parser) fn parse_param<'a, I>(tokens: &mut Peekable<I>)
                                                         -> ParseResult<Param>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let identifier = parse_identifier(tokens)?;

    let declared_type = if let Some((Token::Colon, _)) = tokens.peek() {
        tokens.next();
        Some(parse_data_type(tokens)?)
    } else {
        None
    };

    Ok(Param { identifier,
               declared_type })
}

/// Consumes the `🦆` terminator that closes a statement.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the expected terminator.
/// - `line`: Line of the statement, for error reporting.
///
/// # Errors
/// `ParseError::MissingTerminator` if the next token is not `🦆` or the
/// input ends.
pub(in crate::interpreter::parser) fn expect_duck<'a, I>(tokens: &mut Peekable<I>,
                                                         line: usize)
                                                         -> ParseResult<()>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((Token::Duck, _)) => Ok(()),
        Some((_, line)) => Err(ParseError::MissingTerminator { line: *line }),
        None => Err(ParseError::MissingTerminator { line }),
    }
}
