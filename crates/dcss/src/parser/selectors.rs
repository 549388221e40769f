use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_while1},
    character::complete::{char, multispace0},
    combinator::{map, opt, value},
    multi::many0,
    sequence::{delimited, preceded, tuple},
};

use crate::parser::stylesheet::{
    AttributeOp, Combinator, ComplexSelector, CompoundSelector, Selector, SelectorList,
    SelectorPart,
};
use crate::parser::values::{parse_ident, parse_quoted};

/// Parses a comma-separated list of selectors (e.g., "class, package > *").
pub fn parse_selector_list(input: &str) -> IResult<&str, SelectorList> {
    let (input, _) = multispace0(input)?;
    let (input, first) = parse_complex_selector(input)?;
    let (input, rest) = many0(preceded(
        tuple((multispace0, char(','), multispace0)),
        parse_complex_selector,
    ))(input)?;

    let mut selectors = vec![first];
    selectors.extend(rest);
    Ok((input, SelectorList::new(selectors)))
}

/// Parses a complex selector with combinators (e.g., "diagram > class:hover").
pub fn parse_complex_selector(input: &str) -> IResult<&str, ComplexSelector> {
    let (mut input, mut current_compound) = parse_compound_selector(input)?;
    let mut parts = Vec::new();

    loop {
        let (rem, ws) = multispace0(input)?;

        if let Ok((after_op, _)) = char::<&str, nom::error::Error<&str>>('>')(rem) {
            let (after_ws, _) = multispace0(after_op)?;
            let (next_input, next_compound) = parse_compound_selector(after_ws)?;
            parts.push(SelectorPart::new(current_compound, Combinator::Child));
            current_compound = next_compound;
            input = next_input;
            continue;
        }

        // Whitespace alone is the descendant combinator.
        if !ws.is_empty() {
            if let Ok((next_input, next_compound)) = parse_compound_selector(rem) {
                parts.push(SelectorPart::new(current_compound, Combinator::Descendant));
                current_compound = next_compound;
                input = next_input;
                continue;
            }
        }

        break;
    }

    parts.push(SelectorPart::new(current_compound, Combinator::None));
    Ok((input, ComplexSelector::new(parts)))
}

/// Parses a compound selector (e.g., "class:hover[subject]").
///
/// A type or universal selector may only come first.
pub fn parse_compound_selector(input: &str) -> IResult<&str, CompoundSelector> {
    let (input, head) = opt(alt((
        value(Selector::Universal, char('*')),
        map(parse_ident, |s: &str| Selector::Type(s.to_string())),
    )))(input)?;
    let (input, tail) = many0(parse_simple_selector)(input)?;

    if head.is_none() && tail.is_empty() {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Many1,
        )));
    }

    let mut selectors: Vec<Selector> = head.into_iter().collect();
    selectors.extend(tail);
    Ok((input, CompoundSelector::new(selectors)))
}

/// Parses a simple selector that may follow a type: `#id`, `.class`, `:pseudo` or `[attr]`.
pub fn parse_simple_selector(input: &str) -> IResult<&str, Selector> {
    alt((
        map(preceded(char('#'), parse_ident), |s| Selector::Id(s.to_string())),
        map(preceded(char('.'), parse_ident), |s| {
            Selector::Class(s.to_string())
        }),
        preceded(char(':'), parse_pseudo_class),
        parse_attribute_selector,
    ))(input)
}

fn parse_pseudo_class(input: &str) -> IResult<&str, Selector> {
    alt((
        map(functional("not"), Selector::Not),
        map(functional("is"), Selector::Is),
        map(functional("has"), Selector::Has),
        map(parse_ident, |name: &str| {
            if name.eq_ignore_ascii_case("root") {
                Selector::Root
            } else if name.eq_ignore_ascii_case("empty") {
                Selector::Empty
            } else {
                Selector::State(name.to_string())
            }
        }),
    ))(input)
}

/// `name(selector-list)`
fn functional<'a>(name: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, SelectorList> {
    move |input: &'a str| {
        delimited(
            tuple((tag_no_case(name), char('('))),
            parse_selector_list,
            tuple((multispace0, char(')'))),
        )(input)
    }
}

fn parse_attribute_selector(input: &str) -> IResult<&str, Selector> {
    let (input, _) = tuple((char('['), multispace0))(input)?;
    let (input, name) = take_while1(|c: char| c.is_alphanumeric() || "-_.".contains(c))(input)?;
    let (input, _) = multispace0(input)?;
    let (input, matcher) = opt(tuple((
        parse_attribute_op,
        multispace0,
        alt((
            parse_quoted,
            take_while1(|c: char| !c.is_whitespace() && !"]\"'".contains(c)),
        )),
        multispace0,
    )))(input)?;
    let (input, _) = char(']')(input)?;

    let (op, value) = match matcher {
        Some((op, _, value, _)) => (op, value.to_string()),
        None => (AttributeOp::Exists, String::new()),
    };
    Ok((
        input,
        Selector::Attribute {
            name: name.to_string(),
            op,
            value,
        },
    ))
}

fn parse_attribute_op(input: &str) -> IResult<&str, AttributeOp> {
    alt((
        value(AttributeOp::Equals, tag("=")),
        value(AttributeOp::Includes, tag("~=")),
        value(AttributeOp::DashMatch, tag("|=")),
        value(AttributeOp::Prefix, tag("^=")),
        value(AttributeOp::Suffix, tag("$=")),
        value(AttributeOp::Substring, tag("*=")),
    ))(input)
}
