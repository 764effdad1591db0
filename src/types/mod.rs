mod condition;
mod error;
mod evaluation_report;
mod expr;
mod item;
mod options;
mod properties;
mod rule;
mod sequence_rule;
mod validated;
mod value;

pub use condition::{ConditionOp, ConditionValue, ItemCondition, ItemContext, Predicate};
pub use error::{CompileError, PredicateError, SemanticError};
pub use evaluation_report::EvaluationReport;
pub use expr::{
    property, Condition, Expression, LogicalOp, Operand, Position, PropertyExpr, RelationalOp,
};
pub use item::Item;
pub use options::{BoolOrdering, EvalOptions};
pub use properties::Properties;
pub use rule::{Element, Rule, Sequence};
pub(crate) use sequence_rule::RuleFn;
pub use sequence_rule::{RuleBuilder, SequenceRule};
pub use validated::ValidatedRule;
pub use value::Value;
