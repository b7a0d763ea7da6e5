use ink_tokens::token::{Literal, TokenKind};
use nom::branch::alt;
use nom::bytes::complete::{is_not, tag, take_till};
use nom::character::complete::{alpha1, alphanumeric1, anychar, char, digit1, multispace1, one_of};
use nom::combinator::{cut, map, map_res, opt, recognize};
use nom::error::{context, VerboseError};
use nom::multi::many0_count;
use nom::sequence::{pair, preceded, terminated};
use nom::IResult;

type Result<'a, O, E = &'a str> = IResult<&'a str, O, VerboseError<E>>;

/// A token kind with its literal value, if it has one
pub type ScannedToken = (TokenKind, Option<Literal>);

/// Parses a single token, which must start at the beginning of `src`.
///
/// An unterminated string is reported as a [`nom::Err::Failure`], every other mismatch
/// as a recoverable [`nom::Err::Error`].
pub fn parse_token(src: &str) -> Result<ScannedToken> {
    context(
        "token",
        alt((parse_word, parse_number, parse_string, parse_operator)),
    )(src)
}

/// Recognizes whitespace and line comments
pub fn parse_insignificant(src: &str) -> Result<&str> {
    context(
        "insignificant",
        recognize(many0_count(alt((
            context("whitespace", multispace1),
            context(
                "line comment",
                recognize(pair(tag("//"), take_till(|c| c == '\n'))),
            ),
        )))),
    )(src)
}

fn recognize_identifier(src: &str) -> Result<&str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0_count(alt((alphanumeric1, tag("_")))),
    ))(src)
}

fn parse_word(src: &str) -> Result<ScannedToken> {
    context(
        "word",
        map(recognize_identifier, |word| (TokenKind::word(word), None)),
    )(src)
}

fn parse_number(src: &str) -> Result<ScannedToken> {
    context(
        "number",
        map_res(
            recognize(pair(digit1, opt(pair(char('.'), digit1)))),
            |digits: &str| {
                digits
                    .parse::<f64>()
                    .map(|number| (TokenKind::Number, Some(Literal::Number(number))))
            },
        ),
    )(src)
}

fn parse_string(src: &str) -> Result<ScannedToken> {
    context(
        "string",
        map(alt((quoted('"'), quoted('\''))), |contents: &str| {
            (TokenKind::String, Some(Literal::String(contents.to_string())))
        }),
    )(src)
}

/// Recognizes the contents of a string delimited by `quote`. A backslash keeps the
/// character after it, so `\"` does not end a `"` string.
fn quoted<'a>(quote: char) -> impl FnMut(&'a str) -> Result<'a, &'a str> {
    let stop = if quote == '"' { "\"\\" } else { "'\\" };
    preceded(
        char(quote),
        cut(terminated(
            recognize(many0_count(alt((
                recognize(pair(char('\\'), anychar)),
                is_not(stop),
            )))),
            char(quote),
        )),
    )
}

fn parse_operator(src: &str) -> Result<ScannedToken> {
    context(
        "operator",
        map_res(
            alt((
                tag("->"),
                tag("!="),
                tag("=="),
                tag("<="),
                tag(">="),
                recognize(one_of("(){}[]:,.-+;/*@!=<>")),
            )),
            |operator: &str| operator.parse::<TokenKind>().map(|kind| (kind, None)),
        ),
    )(src)
}
