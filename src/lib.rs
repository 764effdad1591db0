mod compile;
mod error;
mod evaluate;
pub mod parse;
mod types;
mod validate;

pub use error::SeqRuleError;
pub use evaluate::{evaluate_condition, evaluate_expression, evaluate_sequence, Evaluator};
pub use parse::{parse_rule, ParseError};
pub use types::{
    property, BoolOrdering, CompileError, Condition, ConditionOp, ConditionValue, Element,
    EvalOptions, EvaluationReport, Expression, Item, ItemCondition, ItemContext, LogicalOp,
    Operand, Position, Predicate, PredicateError, Properties, PropertyExpr, RelationalOp, Rule,
    RuleBuilder, SemanticError, Sequence, SequenceRule, ValidatedRule, Value,
};
pub use validate::validate;
