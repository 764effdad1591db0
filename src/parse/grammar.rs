use winnow::ascii::digit1;
use winnow::combinator::{alt, cut_err, delimited, opt, preceded, repeat, terminated};
use winnow::error::{ContextError, ErrMode, ModalResult, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{take_till, take_while};

use crate::{Condition, Element, Expression, Operand, Position, RelationalOp, Rule, Sequence};

const KEYWORDS: [&str; 7] = ["if", "then", "else", "and", "or", "true", "false"];

fn expected(what: &'static str) -> StrContext {
    StrContext::Expected(StrContextValue::Description(what))
}

// -- Lexical check ----------------------------------------------------------

/// Reject characters no token can start with, and strings left open at the
/// end of a line. Returns the byte offset of the offending token.
pub(super) fn check_tokens(input: &str) -> Result<(), (usize, String)> {
    let mut chars = input.char_indices();
    while let Some((offset, c)) = chars.next() {
        match c {
            '"' => loop {
                match chars.next() {
                    Some((_, '"')) => break,
                    Some((_, '\n' | '\r')) | None => {
                        return Err((offset, "Unterminated string".to_owned()));
                    }
                    Some(_) => {}
                }
            },
            c if c.is_whitespace() || c.is_ascii_alphanumeric() || "_(),@-<>=!.".contains(c) => {}
            other => return Err((offset, format!("Unrecognized character '{other}'"))),
        }
    }
    Ok(())
}

// -- Whitespace & words -----------------------------------------------------

fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., |c: char| c.is_whitespace())
        .void()
        .parse_next(input)
}

fn word<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (
        take_while(1, |c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(0.., |c: char| c.is_ascii_alphanumeric() || c == '_'),
    )
        .take()
        .parse_next(input)
}

fn keyword<'i>(kw: &'static str) -> impl Parser<&'i str, &'i str, ErrMode<ContextError>> {
    word.verify(move |w: &str| w == kw)
}

fn identifier<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    word.verify(|w: &str| !KEYWORDS.contains(&w))
        .parse_next(input)
}

// -- Literals ---------------------------------------------------------------

fn integer(input: &mut &str) -> ModalResult<i64> {
    (opt('-'), digit1)
        .take()
        .try_map(|s: &str| s.parse::<i64>())
        .parse_next(input)
}

fn number_literal(input: &mut &str) -> ModalResult<f64> {
    (opt('-'), digit1, opt(('.', digit1)))
        .take()
        .try_map(|s: &str| s.parse::<f64>())
        .parse_next(input)
}

fn string_literal(input: &mut &str) -> ModalResult<String> {
    preceded(
        '"',
        cut_err(terminated(take_till(0.., ['"', '\n', '\r']), '"'))
            .context(StrContext::Label("Unterminated string")),
    )
    .map(str::to_owned)
    .parse_next(input)
}

fn position_suffix(input: &mut &str) -> ModalResult<Position> {
    preceded(
        (ws, '@', ws),
        cut_err(integer.context(expected("position index"))),
    )
    .map(Position::Absolute)
    .parse_next(input)
}

// -- Expressions ------------------------------------------------------------

fn rel_op(input: &mut &str) -> ModalResult<RelationalOp> {
    alt((
        "!=".value(RelationalOp::Neq),
        "<=".value(RelationalOp::Lte),
        ">=".value(RelationalOp::Gte),
        "=".value(RelationalOp::Eq),
        "<".value(RelationalOp::Lt),
        ">".value(RelationalOp::Gt),
    ))
    .context(expected("relational operator"))
    .parse_next(input)
}

fn property_ref<'i>(input: &mut &'i str) -> ModalResult<(&'i str, Option<Position>)> {
    (identifier, opt(position_suffix)).parse_next(input)
}

fn operand(input: &mut &str) -> ModalResult<Operand> {
    alt((
        string_literal.map(Operand::Str),
        number_literal.map(Operand::Numeric),
        keyword("true").value(Operand::Boolean(true)),
        keyword("false").value(Operand::Boolean(false)),
        property_ref.map(|(identifier, position)| Operand::PropertyRef {
            identifier: identifier.to_owned(),
            position,
        }),
    ))
    .context(expected("value"))
    .parse_next(input)
}

fn expression(input: &mut &str) -> ModalResult<Expression> {
    let (identifier, position) = property_ref.parse_next(input)?;
    ws.parse_next(input)?;
    let operator = cut_err(rel_op).parse_next(input)?;
    ws.parse_next(input)?;
    let value = cut_err(operand).parse_next(input)?;
    Ok(Expression {
        identifier: identifier.to_owned(),
        position,
        operator,
        value,
    })
}

// -- Conditions (precedence: or < and < primary) ----------------------------

fn close_paren(input: &mut &str) -> ModalResult<char> {
    ')'.context(StrContext::Expected(StrContextValue::CharLiteral(')')))
        .parse_next(input)
}

fn primary_condition(input: &mut &str) -> ModalResult<Condition> {
    ws.parse_next(input)?;
    alt((
        delimited('(', cut_err(condition), (ws, cut_err(close_paren))),
        expression.map(Condition::Leaf),
    ))
    .context(expected("condition"))
    .parse_next(input)
}

fn and_condition(input: &mut &str) -> ModalResult<Condition> {
    let first = primary_condition(input)?;
    let rest: Vec<Condition> =
        repeat(0.., preceded((ws, keyword("and")), cut_err(primary_condition)))
            .parse_next(input)?;
    Ok(rest.into_iter().fold(first, |acc, next| acc.and(next)))
}

fn or_condition(input: &mut &str) -> ModalResult<Condition> {
    let first = and_condition(input)?;
    let rest: Vec<Condition> =
        repeat(0.., preceded((ws, keyword("or")), cut_err(and_condition))).parse_next(input)?;
    Ok(rest.into_iter().fold(first, |acc, next| acc.or(next)))
}

fn condition(input: &mut &str) -> ModalResult<Condition> {
    or_condition(input)
}

// -- Sequences --------------------------------------------------------------

fn element(input: &mut &str) -> ModalResult<Element> {
    let identifier = identifier.parse_next(input)?;
    let constraint = opt(preceded(
        (ws, '('),
        cut_err(terminated(condition, (ws, close_paren))),
    ))
    .parse_next(input)?;
    let position = match constraint {
        Some(_) => None,
        None => opt(position_suffix).parse_next(input)?,
    };
    Ok(Element {
        identifier: identifier.to_owned(),
        constraint,
        position,
    })
}

fn next_element(input: &mut &str) -> ModalResult<Element> {
    cut_err(element.context(expected("element"))).parse_next(input)
}

fn arrow_sequence(input: &mut &str) -> ModalResult<Sequence> {
    let first = element(input)?;
    (ws, "->", ws).parse_next(input)?;
    let second = next_element(input)?;
    Ok(Sequence::new(vec![first, second]))
}

fn comma_sequence(input: &mut &str) -> ModalResult<Sequence> {
    let first = element(input)?;
    let rest: Vec<Element> = repeat(1.., preceded((ws, ',', ws), next_element)).parse_next(input)?;
    Ok(std::iter::once(first).chain(rest).collect())
}

fn space_sequence(input: &mut &str) -> ModalResult<Sequence> {
    let first = element(input)?;
    let rest: Vec<Element> = repeat(0.., preceded(ws, element)).parse_next(input)?;
    Ok(std::iter::once(first).chain(rest).collect())
}

fn sequence(input: &mut &str) -> ModalResult<Sequence> {
    ws.parse_next(input)?;
    alt((arrow_sequence, comma_sequence, space_sequence))
        .context(expected("sequence"))
        .parse_next(input)
}

// -- Rules ------------------------------------------------------------------

fn conditional_rule(input: &mut &str) -> ModalResult<Rule> {
    keyword("if").parse_next(input)?;
    let condition = cut_err(condition).parse_next(input)?;
    ws.parse_next(input)?;
    cut_err(keyword("then").context(StrContext::Expected(StrContextValue::StringLiteral("then"))))
        .parse_next(input)?;
    let then_sequence = cut_err(sequence).parse_next(input)?;
    let else_sequence =
        opt(preceded((ws, keyword("else")), cut_err(sequence))).parse_next(input)?;
    Ok(Rule::Conditional {
        condition,
        then_sequence,
        else_sequence,
    })
}

pub(super) fn rule(input: &mut &str) -> ModalResult<Rule> {
    ws.parse_next(input)?;
    let rule = alt((conditional_rule, sequence.map(Rule::Simple))).parse_next(input)?;
    ws.parse_next(input)?;
    Ok(rule)
}
