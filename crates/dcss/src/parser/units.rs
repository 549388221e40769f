use nom::{
    IResult,
    branch::alt,
    bytes::complete::tag_no_case,
    character::complete::{char, digit1, multispace0, multispace1},
    combinator::{map, map_res, opt, recognize},
    multi::separated_list1,
    sequence::{pair, terminated, tuple},
};

/// Parse a floating point or integer number (`12`, `-1.5`, `.5`).
pub fn parse_number(input: &str) -> IResult<&str, f64> {
    map_res(
        recognize(tuple((
            opt(char('-')),
            alt((
                recognize(pair(digit1, opt(pair(char('.'), digit1)))),
                recognize(pair(char('.'), digit1)),
            )),
        ))),
        |s: &str| s.parse::<f64>(),
    )(input)
}

/// Parse a number with an optional `px` suffix.
pub fn parse_length(input: &str) -> IResult<&str, f64> {
    terminated(parse_number, opt(tag_no_case("px")))(input)
}

/// Parse lengths separated by whitespace and/or commas (`4 2`, `5, 3`).
pub fn parse_length_list(input: &str) -> IResult<&str, Vec<f64>> {
    separated_list1(
        alt((
            map(tuple((multispace0, char(','), multispace0)), |_| ()),
            map(multispace1, |_| ()),
        )),
        parse_length,
    )(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers() {
        assert_eq!(parse_number("12"), Ok(("", 12.0)));
        assert_eq!(parse_number("-1.5;"), Ok((";", -1.5)));
        assert_eq!(parse_number(".25"), Ok(("", 0.25)));
        assert!(parse_number("abc").is_err());
    }

    #[test]
    fn lengths_accept_px() {
        assert_eq!(parse_length("10px"), Ok(("", 10.0)));
        assert_eq!(parse_length("10PX"), Ok(("", 10.0)));
    }

    #[test]
    fn length_lists() {
        assert_eq!(parse_length_list("4 2"), Ok(("", vec![4.0, 2.0])));
        assert_eq!(parse_length_list("5, 3,1"), Ok(("", vec![5.0, 3.0, 1.0])));
    }
}
