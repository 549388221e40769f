//! Token-level parsers shared by selectors and declarations.

use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_till, take_while1},
    character::complete::{char, multispace0},
    combinator::{map, recognize},
    sequence::{delimited, pair, tuple},
};

use crate::types::Var;

/// Parses a CSS identifier (alphanumeric characters, dashes, and underscores).
///
/// Identifiers are used for property names, type selectors, state names, etc.
pub fn parse_ident(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '-' || c == '_')(input)
}

/// A custom property name: `--` followed by an identifier.
pub fn parse_custom_ident(input: &str) -> IResult<&str, &str> {
    recognize(pair(tag("--"), parse_ident))(input)
}

/// Parses `var(--name)`.
pub fn parse_var(input: &str) -> IResult<&str, Var> {
    map(
        delimited(
            tuple((tag_no_case("var"), char('('), multispace0)),
            parse_custom_ident,
            tuple((multispace0, char(')'))),
        ),
        Var::new,
    )(input)
}

/// Parses a single or double quoted string, returning the text between the quotes.
pub fn parse_quoted(input: &str) -> IResult<&str, &str> {
    alt((
        delimited(char('"'), take_till(|c| c == '"'), char('"')),
        delimited(char('\''), take_till(|c| c == '\''), char('\'')),
    ))(input)
}

/// Runs `parser` over the trimmed input and requires it to consume everything.
pub fn parse_complete<'a, O>(
    mut parser: impl FnMut(&'a str) -> IResult<&'a str, O>,
    input: &'a str,
) -> Option<O> {
    match parser(input.trim()) {
        Ok((rest, out)) if rest.trim().is_empty() => Some(out),
        _ => None,
    }
}
