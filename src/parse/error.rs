use std::fmt;

use winnow::error::{ContextError, StrContext, StrContextValue};

use crate::SemanticError;

/// Errors produced when parsing DSL input.
///
/// Carries the 1-based line and 0-based column (in characters) of the
/// offending token. Semantic failures found after parsing are reported at
/// line 1, column 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    line: usize,
    column: usize,
    message: String,
}

impl ParseError {
    pub(crate) fn new(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            line,
            column,
            message: message.into(),
        }
    }

    /// Error located at byte `offset` of `input`.
    pub(super) fn at(input: &str, offset: usize, message: impl Into<String>) -> Self {
        let before = &input[..offset];
        let line = before.matches('\n').count() + 1;
        let column = before
            .rfind('\n')
            .map_or(before, |i| &before[i + 1..])
            .chars()
            .count();
        Self::new(message, line, column)
    }

    /// Normalise a grammar failure into a located, readable message.
    pub(super) fn from_syntax(
        input: &str,
        err: &winnow::error::ParseError<&str, ContextError>,
    ) -> Self {
        let rest = &input[err.offset()..];
        let offset = input.len() - rest.trim_start().len();
        let token = token_at(&input[offset..]);

        let mut label = None;
        let mut expected = None;
        for context in err.inner().context() {
            match context {
                StrContext::Label(text) => {
                    label.get_or_insert(*text);
                }
                StrContext::Expected(value) => {
                    expected.get_or_insert(value);
                }
                _ => {}
            }
        }

        let message = match (label, expected) {
            (Some(text), _) => text.to_owned(),
            (None, Some(value)) => {
                format!("mismatched input '{token}' expecting {}", describe(value))
            }
            (None, None) => format!("Unexpected token '{token}'"),
        };
        Self::at(input, offset, message)
    }

    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    #[must_use]
    pub fn column(&self) -> usize {
        self.column
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

fn describe(value: &StrContextValue) -> String {
    match value {
        StrContextValue::CharLiteral(c) => format!("'{c}'"),
        StrContextValue::StringLiteral(s) => format!("'{s}'"),
        StrContextValue::Description(d) => (*d).to_owned(),
        _ => value.to_string(),
    }
}

/// Text of the token starting at the beginning of `rest`.
fn token_at(rest: &str) -> &str {
    let Some(first) = rest.chars().next() else {
        return "<EOF>";
    };
    let end = if first.is_ascii_alphanumeric() || first == '_' {
        rest.find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '.'))
            .unwrap_or(rest.len())
    } else if first == '"' {
        rest[1..].find('"').map_or(rest.len(), |i| i + 2)
    } else if ["!=", "<=", ">=", "->"].iter().any(|op| rest.starts_with(op)) {
        2
    } else {
        first.len_utf8()
    };
    &rest[..end]
}

impl From<SemanticError> for ParseError {
    fn from(err: SemanticError) -> Self {
        Self::new(err.to_string(), 1, 0)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}:{} {}", self.line, self.column, self.message)
    }
}

impl std::error::Error for ParseError {}
