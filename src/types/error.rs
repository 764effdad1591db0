use thiserror::Error;

/// A rule that parsed but cannot be evaluated meaningfully.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticError {
    #[error("Absolute position must be non-negative (got {index})")]
    NegativePosition { index: i64 },

    #[error("relative positions are not supported (offset {offset})")]
    RelativePosition { offset: i64 },
}

/// Errors raised while compiling a [`RuleBuilder`](super::RuleBuilder).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("unknown condition operator '{0}'")]
    UnknownOperator(String),

    #[error("operator '{op}' on property '{property}' requires a list of values")]
    ExpectedList { property: String, op: String },

    #[error("operator '{op}' on property '{property}' requires a single value")]
    ExpectedSingle { property: String, op: String },

    #[error("operator '{op}' on property '{property}' takes no value")]
    ExpectedNull { property: String, op: String },
}

/// Failure reported by a custom predicate. Never escapes evaluation: the
/// condition is counted as failed for that item.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct PredicateError {
    message: String,
}

impl PredicateError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}
