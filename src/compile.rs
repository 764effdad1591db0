use std::sync::Arc;

use tracing::{debug, info, trace, warn};

use crate::types::RuleFn;
use crate::{
    CompileError, ConditionOp, ConditionValue, EvaluationReport, Item, ItemCondition, ItemContext,
    PredicateError, SequenceRule, Value,
};

pub(crate) fn compile(
    conditions: Vec<ItemCondition>,
    sequence: Vec<String>,
    verbose: bool,
) -> Result<SequenceRule, CompileError> {
    check_operands(&conditions)?;

    let conditions: Arc<[ItemCondition]> = conditions.into();
    let sequence: Arc<[String]> = sequence.into();

    info!(
        conditions = conditions.len(),
        sequence = ?sequence,
        "compiled sequence rule"
    );

    let rule_fn = make_rule_fn(Arc::clone(&conditions), Arc::clone(&sequence), verbose);
    Ok(SequenceRule {
        conditions,
        sequence,
        rule_fn,
    })
}

fn check_operands(conditions: &[ItemCondition]) -> Result<(), CompileError> {
    for condition in conditions {
        let ItemCondition::Compare {
            property,
            op,
            value,
        } = condition
        else {
            continue;
        };
        let fields = || (property.clone(), op.to_string());

        if op.is_membership() {
            if let ConditionValue::One(_) = value {
                let (property, op) = fields();
                return Err(CompileError::ExpectedList { property, op });
            }
        } else if op.is_presence() {
            if *value != ConditionValue::none() {
                let (property, op) = fields();
                return Err(CompileError::ExpectedNull { property, op });
            }
        } else if let ConditionValue::Many(_) = value {
            let (property, op) = fields();
            return Err(CompileError::ExpectedSingle { property, op });
        }
    }
    Ok(())
}

fn make_rule_fn(
    conditions: Arc<[ItemCondition]>,
    sequence: Arc<[String]>,
    verbose: bool,
) -> RuleFn {
    Arc::new(move |items: &[Item]| {
        if items.is_empty() && sequence.is_empty() {
            warn!("empty item sequence with no name constraints");
            return EvaluationReport::failed("empty item sequence with no name constraints");
        }

        if !names_match(items, &sequence) {
            let got: Vec<&str> = items.iter().map(Item::name).collect();
            warn!(expected = ?sequence, got = ?got, "sequence order mismatch");
            return EvaluationReport::failed(format!(
                "sequence order mismatch: expected {sequence:?}, got {got:?}"
            ));
        }

        let mut failures = Vec::new();
        for (index, item) in items.iter().enumerate() {
            let ctx = ItemContext::new(items, index);
            for condition in conditions.iter() {
                match check_condition(condition, item, &ctx) {
                    Ok(true) => {
                        if verbose {
                            debug!(item = item.name(), condition = %condition, "condition passed");
                        }
                    }
                    Ok(false) => {
                        debug!(item = item.name(), condition = %condition, "condition failed");
                        failures.push(format!("{}: {condition}", item.name()));
                    }
                    Err(err) => {
                        warn!(
                            item = item.name(),
                            predicate = condition.property(),
                            error = %err,
                            "custom predicate raised an error"
                        );
                        failures.push(format!(
                            "{}: {} raised: {err}",
                            item.name(),
                            condition.property()
                        ));
                    }
                }
            }
        }

        EvaluationReport::from_failures(failures)
    })
}

fn names_match(items: &[Item], sequence: &[String]) -> bool {
    items.len() == sequence.len()
        && items
            .iter()
            .zip(sequence)
            .all(|(item, name)| item.name() == name)
}

fn check_condition(
    condition: &ItemCondition,
    item: &Item,
    ctx: &ItemContext<'_>,
) -> Result<bool, PredicateError> {
    match condition {
        ItemCondition::Compare {
            property,
            op,
            value,
        } => Ok(apply(item.get(property), *op, value)),
        ItemCondition::Predicate { predicate, .. } => predicate(item, ctx),
    }
}

/// Apply one builder operator. A missing property and a null value are the
/// same thing: equal to "no value", absent for `exists`, and failing every
/// other operator, `!=` included.
fn apply(actual: Option<&Value>, op: ConditionOp, expected: &ConditionValue) -> bool {
    let expected_none = *expected == ConditionValue::none();

    let Some(actual) = actual.filter(|v| !v.is_null()) else {
        return match op {
            ConditionOp::Eq => expected_none,
            ConditionOp::NotExists => true,
            _ => {
                trace!(%op, "operator applied to a missing value");
                false
            }
        };
    };

    if expected_none {
        return matches!(op, ConditionOp::Neq | ConditionOp::Exists);
    }

    match (op, expected) {
        (ConditionOp::Exists, _) => true,
        (ConditionOp::NotExists, _) => false,
        (ConditionOp::In, ConditionValue::Many(values)) => {
            values.iter().any(|v| actual.loosely_equals(v))
        }
        (ConditionOp::NotIn, ConditionValue::Many(values)) => {
            !values.iter().any(|v| actual.loosely_equals(v))
        }
        (ConditionOp::Eq, ConditionValue::One(v)) => actual.loosely_equals(v),
        (ConditionOp::Neq, ConditionValue::One(v)) => !actual.loosely_equals(v),
        (op, ConditionValue::One(v)) => op
            .relational()
            .and_then(|rel| actual.compare(rel, v))
            .unwrap_or(false),
        _ => false,
    }
}
