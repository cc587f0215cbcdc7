//! Recursive-descent expression grammar over the algebra the fragment
//! builders emit: `+ - * /`, power (`**` or `^`, right-associative), unary
//! minus, parentheses, single-argument function calls, numeric literals,
//! and identifiers (the declared variable and `pi`).

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, alphanumeric1, char, multispace0},
    combinator::{all_consuming, map, opt, recognize},
    multi::many0,
    number::complete::double,
    sequence::{delimited, pair, preceded},
    IResult,
};

use super::ast::RawExpr;
use crate::error::ExprError;

/// Parses a complete expression string into a raw tree.
pub(crate) fn parse(expression: &str) -> Result<RawExpr, ExprError> {
    match all_consuming(delimited(multispace0, sum, multispace0))(expression) {
        Ok((_, tree)) => Ok(tree),
        Err(nom::Err::Error(e) | nom::Err::Failure(e)) => Err(ExprError::Parse {
            expression: expression.to_owned(),
            offset: expression.len() - e.input.len(),
            message: e.code.description().to_owned(),
        }),
        Err(nom::Err::Incomplete(_)) => Err(ExprError::Parse {
            expression: expression.to_owned(),
            offset: expression.len(),
            message: "incomplete input".to_owned(),
        }),
    }
}

fn ws<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

fn sum(input: &str) -> IResult<&str, RawExpr> {
    let (input, first) = product(input)?;
    let (input, rest) = many0(pair(ws(alt((char('+'), char('-')))), product))(input)?;
    Ok((input, rest.into_iter().fold(first, |lhs, (op, rhs)| {
        if op == '+' {
            RawExpr::Add(Box::new(lhs), Box::new(rhs))
        } else {
            RawExpr::Sub(Box::new(lhs), Box::new(rhs))
        }
    })))
}

fn product(input: &str) -> IResult<&str, RawExpr> {
    let (input, first) = power(input)?;
    let (input, rest) = many0(pair(ws(alt((char('*'), char('/')))), power))(input)?;
    Ok((input, rest.into_iter().fold(first, |lhs, (op, rhs)| {
        if op == '*' {
            RawExpr::Mul(Box::new(lhs), Box::new(rhs))
        } else {
            RawExpr::Div(Box::new(lhs), Box::new(rhs))
        }
    })))
}

// Right-associative so that a**b**c nests as a**(b**c).
fn power(input: &str) -> IResult<&str, RawExpr> {
    let (input, base) = unary(input)?;
    let (input, exponent) = opt(preceded(ws(alt((tag("**"), tag("^")))), power))(input)?;
    Ok((input, match exponent {
        Some(exp) => RawExpr::Pow(Box::new(base), Box::new(exp)),
        None => base,
    }))
}

fn unary(input: &str) -> IResult<&str, RawExpr> {
    alt((
        map(preceded(ws(char('-')), unary), |inner| {
            RawExpr::Neg(Box::new(inner))
        }),
        primary,
    ))(input)
}

fn primary(input: &str) -> IResult<&str, RawExpr> {
    ws(alt((parenthesized, call_or_ident, number)))(input)
}

fn parenthesized(input: &str) -> IResult<&str, RawExpr> {
    delimited(ws(char('(')), sum, ws(char(')')))(input)
}

fn number(input: &str) -> IResult<&str, RawExpr> {
    map(double, RawExpr::Number)(input)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ))(input)
}

fn call_or_ident(input: &str) -> IResult<&str, RawExpr> {
    let (input, name) = identifier(input)?;
    let (input, argument) = opt(delimited(ws(char('(')), sum, ws(char(')'))))(input)?;
    Ok((input, match argument {
        Some(arg) => RawExpr::Call(name.to_owned(), Box::new(arg)),
        None => RawExpr::Ident(name.to_owned()),
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_number() {
        assert_eq!(parse("2.5").unwrap(), RawExpr::Number(2.5));
    }

    #[test]
    fn parses_identifier() {
        assert_eq!(parse("t").unwrap(), RawExpr::Ident("t".to_owned()));
    }

    #[test]
    fn precedence_mul_over_add() {
        let tree = parse("1+2*3").unwrap();
        assert_eq!(
            tree,
            RawExpr::Add(
                Box::new(RawExpr::Number(1.0)),
                Box::new(RawExpr::Mul(
                    Box::new(RawExpr::Number(2.0)),
                    Box::new(RawExpr::Number(3.0)),
                )),
            )
        );
    }

    #[test]
    fn power_both_spellings() {
        assert_eq!(parse("2**3").unwrap(), parse("2^3").unwrap());
    }

    #[test]
    fn plus_then_unary_minus() {
        // Fourier series fragments join negative coefficients as `+-0.1*...`.
        // The unary-minus rule claims the sign before the number literal can.
        let tree = parse("1+-2").unwrap();
        assert_eq!(
            tree,
            RawExpr::Add(
                Box::new(RawExpr::Number(1.0)),
                Box::new(RawExpr::Neg(Box::new(RawExpr::Number(2.0)))),
            )
        );
    }

    #[test]
    fn call_with_nested_expression() {
        let tree = parse("sin((2*pi/0.5)*(t+0))").unwrap();
        match tree {
            RawExpr::Call(name, _) => assert_eq!(name, "sin"),
            other => panic!("expected call, got {other:?}"),
        }
    }

    #[test]
    fn whitespace_is_ignored() {
        assert_eq!(parse(" 1 + 2 ").unwrap(), parse("1+2").unwrap());
    }

    #[test]
    fn rejects_trailing_garbage() {
        let err = parse("1+2)").unwrap_err();
        match err {
            crate::error::ExprError::Parse { offset, .. } => assert_eq!(offset, 3),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unbalanced_parens() {
        assert!(parse("sin(t").is_err());
        assert!(parse("(1+2").is_err());
    }

    #[test]
    fn rejects_empty_input() {
        assert!(parse("").is_err());
    }
}
