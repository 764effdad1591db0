use std::fmt;
use std::path::Path;

use super::error::SemanticError;
use super::options::EvalOptions;
use super::properties::Properties;
use super::rule::Rule;
use crate::evaluate::Evaluator;
use crate::parse::ParseError;

/// A [`Rule`] that passed [`validate`](crate::validate()).
///
/// The only way to evaluate a parsed rule through this type is after
/// validation, so a rule with a negative or relative position can never be
/// matched against a sequence.
///
/// # Example
///
/// ```
/// use seqrule::{Properties, ValidatedRule};
///
/// let rule = ValidatedRule::parse("heart -> spade").unwrap();
/// let cards = vec![
///     Properties::new().set("suit", "heart"),
///     Properties::new().set("suit", "spade"),
/// ];
/// assert!(rule.matches(&cards));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRule {
    rule: Rule,
    evaluator: Evaluator,
}

impl ValidatedRule {
    /// Validate an already-built rule.
    ///
    /// # Errors
    ///
    /// Returns the [`SemanticError`] reported by the validator.
    pub fn new(rule: Rule) -> Result<Self, SemanticError> {
        crate::validate::validate(&rule)?;
        Ok(Self {
            rule,
            evaluator: Evaluator::default(),
        })
    }

    /// Parse and validate DSL text.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] on syntax or semantic failure.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let rule = crate::parse::parse_rule(text)?;
        Ok(Self {
            rule,
            evaluator: Evaluator::default(),
        })
    }

    /// Read a file holding one rule and parse it.
    ///
    /// # Errors
    ///
    /// Returns [`SeqRuleError`](crate::SeqRuleError) on I/O, parse, or
    /// semantic failure.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, crate::SeqRuleError> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::parse(&text)?)
    }

    /// Evaluate with the given options instead of the defaults.
    #[must_use]
    pub fn with_options(mut self, options: EvalOptions) -> Self {
        self.evaluator = Evaluator::new(options);
        self
    }

    #[must_use]
    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    #[must_use]
    pub fn options(&self) -> EvalOptions {
        self.evaluator.options()
    }

    #[must_use]
    pub fn into_rule(self) -> Rule {
        self.rule
    }

    /// Whether `items` matches the rule.
    #[must_use]
    pub fn matches(&self, items: &[Properties]) -> bool {
        self.evaluator.sequence(&self.rule, items)
    }

    /// Match each sequence independently, preserving input order.
    #[must_use]
    pub fn batch_matches<S: AsRef<[Properties]>>(&self, sequences: &[S]) -> Vec<bool> {
        sequences
            .iter()
            .map(|items| self.matches(items.as_ref()))
            .collect()
    }
}

impl TryFrom<Rule> for ValidatedRule {
    type Error = SemanticError;

    fn try_from(rule: Rule) -> Result<Self, Self::Error> {
        Self::new(rule)
    }
}

impl fmt::Display for ValidatedRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rule)
    }
}
