use tracing::{debug, trace};

use crate::{
    BoolOrdering, Condition, EvalOptions, Expression, LogicalOp, Operand, Position, Properties,
    RelationalOp, Rule, Sequence, Value,
};

/// Interpreter for parsed rules.
///
/// Holds no state between calls: every method is a pure function of its
/// arguments and the configured [`EvalOptions`]. Failures to resolve a
/// property, a position or a type coercion never raise; the comparison that
/// needed them is simply false.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Evaluator {
    options: EvalOptions,
}

impl Evaluator {
    #[must_use]
    pub fn new(options: EvalOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn options(&self) -> EvalOptions {
        self.options
    }

    /// Evaluate one comparison against `item`.
    ///
    /// A positioned expression reads its subject from `sequence` instead of
    /// `item`, so it needs a sequence to be true.
    #[must_use]
    pub fn expression(
        &self,
        expr: &Expression,
        item: &Properties,
        sequence: Option<&[Properties]>,
        current_index: usize,
    ) -> bool {
        let subject = match expr.position {
            None => item,
            Some(position) => match at_position(position, sequence) {
                Some(subject) => subject,
                None => return false,
            },
        };
        let Some(subject_value) = lookup(subject, &expr.identifier) else {
            return false;
        };

        match &expr.value {
            Operand::Numeric(target) => compare_numeric(expr.operator, subject_value, *target),
            Operand::Boolean(target) => self.compare_bool(expr.operator, subject_value, *target),
            Operand::Str(target) => expr
                .operator
                .holds(&*subject_value.to_text(), target.as_str()),
            Operand::PropertyRef {
                identifier,
                position,
            } => {
                let referenced = match position {
                    Some(position) => at_position(*position, sequence),
                    None => match sequence {
                        Some(sequence) => {
                            let found = sequence.get(current_index);
                            if found.is_none() {
                                trace!(
                                    index = current_index,
                                    len = sequence.len(),
                                    "current index out of range"
                                );
                            }
                            found
                        }
                        None => Some(item),
                    },
                };
                let Some(target_value) = referenced.and_then(|r| lookup(r, identifier)) else {
                    return false;
                };
                compare_coerced(expr.operator, subject_value, target_value)
            }
        }
    }

    /// Evaluate a condition tree. A missing condition is vacuously true.
    #[must_use]
    pub fn condition(
        &self,
        condition: Option<&Condition>,
        item: &Properties,
        sequence: Option<&[Properties]>,
        current_index: usize,
    ) -> bool {
        condition.map_or(true, |c| self.condition_tree(c, item, sequence, current_index))
    }

    fn condition_tree(
        &self,
        condition: &Condition,
        item: &Properties,
        sequence: Option<&[Properties]>,
        current_index: usize,
    ) -> bool {
        match condition {
            Condition::Leaf(expr) => self.expression(expr, item, sequence, current_index),
            Condition::Group(inner) => self.condition_tree(inner, item, sequence, current_index),
            Condition::Binary { left, op, right } => {
                let left = self.condition_tree(left, item, sequence, current_index);
                let right = self.condition_tree(right, item, sequence, current_index);
                match op {
                    LogicalOp::And => left && right,
                    LogicalOp::Or => left || right,
                }
            }
        }
    }

    /// Match a whole item sequence against `rule`.
    #[must_use]
    pub fn sequence(&self, rule: &Rule, items: &[Properties]) -> bool {
        match rule {
            Rule::Simple(sequence) => self.check_sequence(sequence, items),
            Rule::Conditional {
                condition,
                then_sequence,
                else_sequence,
            } => {
                let Some(first) = items.first() else {
                    debug!("conditional rule against an empty sequence");
                    return false;
                };
                if self.condition_tree(condition, first, Some(items), 0) {
                    debug!("condition held, matching then-branch");
                    self.check_sequence(then_sequence, items)
                } else if let Some(else_sequence) = else_sequence {
                    debug!("condition failed, matching else-branch");
                    self.check_sequence(else_sequence, items)
                } else {
                    debug!("condition failed and no else-branch");
                    false
                }
            }
        }
    }

    fn check_sequence(&self, pattern: &Sequence, items: &[Properties]) -> bool {
        for (i, element) in pattern.elements.iter().enumerate() {
            let constraint = element.constraint.as_ref();

            let matched = match element.position {
                Some(position) => {
                    let Some(index) = absolute_index(position, items.len()) else {
                        return false;
                    };
                    let item = &items[index];
                    item.contains_str(&element.identifier)
                        && self.condition(constraint, item, Some(items), index)
                }
                // Each element scans from its own pattern index, not from
                // the previous match.
                None => items.iter().enumerate().skip(i).any(|(j, item)| {
                    item.contains_str(&element.identifier)
                        && self.condition(constraint, item, Some(items), j)
                }),
            };

            if !matched {
                debug!(element = %element, pattern_index = i, "element not matched");
                return false;
            }
        }
        true
    }

    fn compare_bool(&self, op: RelationalOp, subject: &Value, target: bool) -> bool {
        let Value::Bool(actual) = subject else {
            trace!(value = %subject, "boolean literal against a non-boolean value");
            return false;
        };
        if op.is_equality() || self.options.bool_ordering == BoolOrdering::FalseBeforeTrue {
            op.holds(actual, &target)
        } else {
            trace!(%op, "ordering between booleans rejected");
            false
        }
    }
}

/// Evaluate one comparison with default [`EvalOptions`].
#[must_use]
pub fn evaluate_expression(
    expr: &Expression,
    item: &Properties,
    sequence: Option<&[Properties]>,
    current_index: usize,
) -> bool {
    Evaluator::default().expression(expr, item, sequence, current_index)
}

/// Evaluate a condition tree with default [`EvalOptions`].
#[must_use]
pub fn evaluate_condition(
    condition: Option<&Condition>,
    item: &Properties,
    sequence: Option<&[Properties]>,
    current_index: usize,
) -> bool {
    Evaluator::default().condition(condition, item, sequence, current_index)
}

/// Match a sequence against `rule` with default [`EvalOptions`].
///
/// `rule` is expected to have passed [`validate`](crate::validate()); prefer
/// [`ValidatedRule`](crate::ValidatedRule), which enforces that.
#[must_use]
pub fn evaluate_sequence(rule: &Rule, items: &[Properties]) -> bool {
    Evaluator::default().sequence(rule, items)
}

fn absolute_index(position: Position, len: usize) -> Option<usize> {
    let Position::Absolute(index) = position else {
        trace!(%position, "relative positions are never resolved");
        return None;
    };
    let found = usize::try_from(index).ok().filter(|&i| i < len);
    if found.is_none() {
        trace!(index, len, "position out of range");
    }
    found
}

fn at_position(position: Position, sequence: Option<&[Properties]>) -> Option<&Properties> {
    let Some(sequence) = sequence else {
        trace!(%position, "position given without a sequence");
        return None;
    };
    absolute_index(position, sequence.len()).map(|i| &sequence[i])
}

/// A property holding `Null` counts as missing.
fn lookup<'a>(item: &'a Properties, identifier: &str) -> Option<&'a Value> {
    let found = item.get(identifier).filter(|v| !v.is_null());
    if found.is_none() {
        trace!(identifier, "property missing");
    }
    found
}

fn compare_numeric(op: RelationalOp, subject: &Value, target: f64) -> bool {
    match subject.as_number() {
        Some(actual) => op.holds(&actual, &target),
        None => {
            trace!(value = %subject, "value is not numeric");
            false
        }
    }
}

/// Comparison between two property values: numeric when both sides coerce,
/// by text form otherwise.
fn compare_coerced(op: RelationalOp, subject: &Value, target: &Value) -> bool {
    match (coerce_number(subject), coerce_number(target)) {
        (Some(lhs), Some(rhs)) => op.holds(&lhs, &rhs),
        _ => op.holds(&*subject.to_text(), &*target.to_text()),
    }
}

fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Bool(v) => Some(f64::from(u8::from(*v))),
        other => other.as_number(),
    }
}
