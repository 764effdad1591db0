use std::fmt;
use std::sync::Arc;

use super::condition::{ConditionOp, ConditionValue, ItemCondition, ItemContext};
use super::error::{CompileError, PredicateError};
use super::evaluation_report::EvaluationReport;
use super::item::Item;

/// Compiled evaluation closure shared by every clone of a [`SequenceRule`].
pub(crate) type RuleFn = Arc<dyn Fn(&[Item]) -> EvaluationReport + Send + Sync>;

/// Builder for constructing a [`SequenceRule`].
///
/// Collects per-item conditions and an optional ordered list of required item
/// names, then compiles them into a reusable, thread-safe rule.
///
/// # Example
///
/// ```
/// use seqrule::{ConditionOp, Item, RuleBuilder};
///
/// let rule = RuleBuilder::new()
///     .add_condition("rank", ConditionOp::Gt, 0_i64)
///     .add_condition("suit", ConditionOp::In, vec!["hearts", "spades"])
///     .set_sequence(["ace", "king"])
///     .build()
///     .unwrap();
///
/// let hand = vec![
///     Item::new("ace").with("rank", 1_i64).with("suit", "hearts"),
///     Item::new("king").with("rank", 13_i64).with("suit", "spades"),
/// ];
/// assert!(rule.evaluate(&hand));
/// ```
#[derive(Debug, Default)]
pub struct RuleBuilder {
    conditions: Vec<ItemCondition>,
    sequence: Vec<String>,
    verbose: bool,
}

impl RuleBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `property op value` to hold for every item.
    ///
    /// `in` / `not in` take a collection, `exists` / `not exists` take
    /// [`ConditionValue::none()`]. Mismatches are reported by
    /// [`build()`](Self::build).
    #[must_use]
    pub fn add_condition(
        mut self,
        property: &str,
        op: ConditionOp,
        value: impl Into<ConditionValue>,
    ) -> Self {
        self.conditions.push(ItemCondition::Compare {
            property: property.to_owned(),
            op,
            value: value.into(),
        });
        self
    }

    /// Require a custom predicate to hold for every item. The predicate sees
    /// the item and its neighbours; an `Err` counts as a failed condition.
    #[must_use]
    pub fn add_predicate<F>(mut self, label: &str, predicate: F) -> Self
    where
        F: Fn(&Item, &ItemContext<'_>) -> Result<bool, PredicateError> + Send + Sync + 'static,
    {
        self.conditions.push(ItemCondition::Predicate {
            label: label.to_owned(),
            predicate: Arc::new(predicate),
        });
        self
    }

    /// Require the evaluated items to carry exactly these names, in order.
    /// Without a call to this, only an empty item list has matching names.
    #[must_use]
    pub fn set_sequence<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sequence = names.into_iter().map(Into::into).collect();
        self
    }

    /// Log every passing condition at debug level during evaluation.
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Compile the collected conditions into a [`SequenceRule`].
    ///
    /// # Errors
    ///
    /// Returns [`CompileError`] if an operator is paired with the wrong kind
    /// of value.
    pub fn build(self) -> Result<SequenceRule, CompileError> {
        crate::compile::compile(self.conditions, self.sequence, self.verbose)
    }
}

/// A compiled builder rule. Immutable, cheap to clone, and safe to share
/// across threads.
#[derive(Clone)]
pub struct SequenceRule {
    pub(crate) conditions: Arc<[ItemCondition]>,
    pub(crate) sequence: Arc<[String]>,
    pub(crate) rule_fn: RuleFn,
}

impl SequenceRule {
    /// Whether `items` satisfies the name sequence and every condition.
    #[must_use]
    pub fn evaluate(&self, items: &[Item]) -> bool {
        (self.rule_fn)(items).matched()
    }

    /// Evaluate and collect a reason for every failed check.
    pub fn evaluate_detailed(&self, items: &[Item]) -> EvaluationReport {
        (self.rule_fn)(items)
    }

    /// Evaluate each sequence independently, preserving input order.
    #[must_use]
    pub fn batch_evaluate<S: AsRef<[Item]>>(&self, sequences: &[S]) -> Vec<bool> {
        sequences
            .iter()
            .map(|items| self.evaluate(items.as_ref()))
            .collect()
    }

    #[must_use]
    pub fn conditions(&self) -> &[ItemCondition] {
        &self.conditions
    }

    /// Required item names in order.
    #[must_use]
    pub fn sequence(&self) -> &[String] {
        &self.sequence
    }
}

impl fmt::Debug for SequenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SequenceRule")
            .field("conditions", &self.conditions)
            .field("sequence", &self.sequence)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for SequenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SequenceRule({} conditions, sequence [{}])",
            self.conditions.len(),
            self.sequence.join(", "),
        )
    }
}
