mod error;
mod grammar;

pub use error::ParseError;

use crate::Rule;

/// Parse DSL text into a validated [`Rule`].
///
/// Accepts `sequence` or `if condition then sequence [else sequence]`, where
/// a sequence is written `a, b, c`, `a -> b` or `a b c`.
///
/// # Errors
///
/// Returns [`ParseError`] for empty input, a lexical or syntax error, or a
/// rule rejected by [`validate`](crate::validate()).
///
/// # Example
///
/// ```
/// use seqrule::{parse_rule, Rule};
///
/// let rule = parse_rule("if rank@0 > rank@1 then ace").unwrap();
/// assert!(matches!(rule, Rule::Conditional { .. }));
///
/// let err = parse_rule("ace@-1").unwrap_err();
/// assert_eq!((err.line(), err.column()), (1, 0));
/// ```
pub fn parse_rule(input: &str) -> Result<Rule, ParseError> {
    use winnow::Parser;

    if input.trim().is_empty() {
        return Err(ParseError::new("Empty rule", 1, 0));
    }
    grammar::check_tokens(input)
        .map_err(|(offset, message)| ParseError::at(input, offset, message))?;
    let rule = grammar::rule
        .parse(input)
        .map_err(|e| ParseError::from_syntax(input, &e))?;
    crate::validate::validate(&rule)?;
    Ok(rule)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(text: &str) -> String {
        parse_rule(text).unwrap_err().message().to_owned()
    }

    #[test]
    fn empty_input_rejected() {
        assert_eq!(message(""), "Empty rule");
        assert_eq!(message("   \n\t"), "Empty rule");
    }

    #[test]
    fn lexical_errors() {
        assert_eq!(message("if suit = #heart then ace"), "Unrecognized character '#'");
        assert_eq!(message("if rank = $ then ace"), "Unrecognized character '$'");

        let err = parse_rule("if rank = \"seven\nthen ace").unwrap_err();
        assert_eq!(err.message(), "Unterminated string");
        assert_eq!((err.line(), err.column()), (1, 10));
    }

    #[test]
    fn syntax_errors_name_the_token() {
        assert_eq!(
            message("if rank = 7 ace"),
            "mismatched input 'ace' expecting 'then'"
        );
        assert_eq!(
            message("if rank = then ace"),
            "mismatched input 'then' expecting value"
        );
        assert_eq!(
            message("heart(rank = 7 -> spade"),
            "mismatched input '->' expecting ')'"
        );
        assert_eq!(
            message("heart -> -> spade"),
            "mismatched input '->' expecting element"
        );
        assert_eq!(
            message("if rank = 7 then"),
            "mismatched input '<EOF>' expecting sequence"
        );
    }

    #[test]
    fn rejected_inputs() {
        let bad = [
            "invalid -> -> rule",
            "if rank = 7",
            "if then heart",
            "if rank === 7 then heart",
            "ace@invalid",
            "ace@abc",
            "if (rank = 7 and suit = \"heart\" then ace",
            "heart, -> spade",
            "if heart spade diamond",
            "if rank = \"7\" = then ace",
            "heart -> spade -> club",
        ];
        for text in bad {
            assert!(parse_rule(text).is_err(), "accepted {text:?}");
        }
    }

    #[test]
    fn negative_positions_are_semantic_errors() {
        for text in [
            "ace@-1",
            "ace@-1 -> king",
            "if rank@-1 = 7 then ace",
            "if rank = rank@-1 then ace",
        ] {
            let err = parse_rule(text).unwrap_err();
            assert_eq!((err.line(), err.column()), (1, 0), "{text}");
            assert!(
                err.message()
                    .starts_with("Absolute position must be non-negative"),
                "{text}: {err}"
            );
        }
    }

    #[test]
    fn error_location_on_second_line() {
        let err = parse_rule("heart ->\n  -> spade").unwrap_err();
        assert_eq!((err.line(), err.column()), (2, 2));
    }
}
