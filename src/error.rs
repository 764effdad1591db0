use thiserror::Error;

use crate::parse::ParseError;
use crate::{CompileError, SemanticError};

/// Unified error type covering parsing, validation, compilation, and I/O.
///
/// Returned by convenience loaders like
/// [`ValidatedRule::from_file()`](crate::ValidatedRule::from_file), which
/// produce `Parse` and `Io`. The crate's own functions never return
/// `Semantic` or `Compile` through this type; those variants exist so callers
/// can mix [`ValidatedRule::new`](crate::ValidatedRule::new),
/// [`RuleBuilder::build`](crate::RuleBuilder::build) and the loaders behind
/// one `?`.
#[derive(Debug, Error)]
pub enum SeqRuleError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Semantic(#[from] SemanticError),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
