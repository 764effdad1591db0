use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use super::error::{CompileError, PredicateError};
use super::expr::RelationalOp;
use super::{Item, Value};

/// Operators accepted by [`RuleBuilder::add_condition`](super::RuleBuilder::add_condition).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionOp {
    Eq,
    Neq,
    Lt,
    Gt,
    Lte,
    Gte,
    In,
    NotIn,
    Exists,
    NotExists,
}

impl ConditionOp {
    pub const ALL: [ConditionOp; 10] = [
        ConditionOp::Eq,
        ConditionOp::Neq,
        ConditionOp::Lt,
        ConditionOp::Gt,
        ConditionOp::Lte,
        ConditionOp::Gte,
        ConditionOp::In,
        ConditionOp::NotIn,
        ConditionOp::Exists,
        ConditionOp::NotExists,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ConditionOp::Eq => "=",
            ConditionOp::Neq => "!=",
            ConditionOp::Lt => "<",
            ConditionOp::Gt => ">",
            ConditionOp::Lte => "<=",
            ConditionOp::Gte => ">=",
            ConditionOp::In => "in",
            ConditionOp::NotIn => "not in",
            ConditionOp::Exists => "exists",
            ConditionOp::NotExists => "not exists",
        }
    }

    /// The DSL operator with the same meaning, for the six relational operators.
    #[must_use]
    pub fn relational(self) -> Option<RelationalOp> {
        match self {
            ConditionOp::Eq => Some(RelationalOp::Eq),
            ConditionOp::Neq => Some(RelationalOp::Neq),
            ConditionOp::Lt => Some(RelationalOp::Lt),
            ConditionOp::Gt => Some(RelationalOp::Gt),
            ConditionOp::Lte => Some(RelationalOp::Lte),
            ConditionOp::Gte => Some(RelationalOp::Gte),
            _ => None,
        }
    }

    /// `true` for `in` and `not in`, which take a collection.
    #[must_use]
    pub fn is_membership(self) -> bool {
        matches!(self, ConditionOp::In | ConditionOp::NotIn)
    }

    /// `true` for `exists` and `not exists`, which take no value.
    #[must_use]
    pub fn is_presence(self) -> bool {
        matches!(self, ConditionOp::Exists | ConditionOp::NotExists)
    }
}

impl FromStr for ConditionOp {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConditionOp::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| CompileError::UnknownOperator(s.to_owned()))
    }
}

impl fmt::Display for ConditionOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expected value of a builder condition: one value, or a collection for
/// `in` / `not in`.
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionValue {
    One(Value),
    Many(Vec<Value>),
}

impl ConditionValue {
    /// The "no value" operand used with `exists` / `not exists`.
    #[must_use]
    pub fn none() -> Self {
        ConditionValue::One(Value::Null)
    }
}

macro_rules! impl_single_value {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ConditionValue {
                fn from(v: $t) -> Self {
                    ConditionValue::One(v.into())
                }
            }
        )*
    };
}

impl_single_value!(Value, i64, i32, f64, bool, &str, String);

impl<T: Into<Value>> From<Vec<T>> for ConditionValue {
    fn from(values: Vec<T>) -> Self {
        values.into_iter().collect()
    }
}

impl<T: Into<Value>> FromIterator<T> for ConditionValue {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        ConditionValue::Many(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for ConditionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConditionValue::One(v) => write!(f, "{v}"),
            ConditionValue::Many(values) => {
                write!(f, "[")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, "]")
            }
        }
    }
}

/// Neighbourhood of the item a custom predicate is called on.
#[derive(Debug, Clone, Copy)]
pub struct ItemContext<'a> {
    sequence: &'a [Item],
    index: usize,
}

impl<'a> ItemContext<'a> {
    pub(crate) fn new(sequence: &'a [Item], index: usize) -> Self {
        Self { sequence, index }
    }

    #[must_use]
    pub fn prev(&self) -> Option<&'a Item> {
        self.index
            .checked_sub(1)
            .and_then(|i| self.sequence.get(i))
    }

    #[must_use]
    pub fn next(&self) -> Option<&'a Item> {
        self.sequence.get(self.index + 1)
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn sequence(&self) -> &'a [Item] {
        self.sequence
    }
}

/// Caller-supplied check run against every item of a sequence.
pub type Predicate =
    Arc<dyn Fn(&Item, &ItemContext<'_>) -> Result<bool, PredicateError> + Send + Sync>;

/// One entry of a builder's flat condition list.
#[derive(Clone)]
pub enum ItemCondition {
    Compare {
        property: String,
        op: ConditionOp,
        value: ConditionValue,
    },
    Predicate {
        label: String,
        predicate: Predicate,
    },
}

impl ItemCondition {
    /// Property name, or the label of a custom predicate.
    #[must_use]
    pub fn property(&self) -> &str {
        match self {
            ItemCondition::Compare { property, .. } => property,
            ItemCondition::Predicate { label, .. } => label,
        }
    }
}

impl fmt::Debug for ItemCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemCondition::Compare {
                property,
                op,
                value,
            } => f
                .debug_struct("Compare")
                .field("property", property)
                .field("op", op)
                .field("value", value)
                .finish(),
            ItemCondition::Predicate { label, .. } => f
                .debug_struct("Predicate")
                .field("label", label)
                .finish_non_exhaustive(),
        }
    }
}

impl fmt::Display for ItemCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemCondition::Compare {
                property,
                op,
                value,
            } => match op {
                ConditionOp::Exists | ConditionOp::NotExists => write!(f, "{property} {op}"),
                _ => write!(f, "{property} {op} {value}"),
            },
            ItemCondition::Predicate { label, .. } => write!(f, "{label}(..)"),
        }
    }
}
