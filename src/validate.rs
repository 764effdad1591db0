use crate::{Condition, Element, Expression, Operand, Position, Rule, SemanticError, Sequence};

/// Check a parsed rule before it is evaluated.
///
/// Every absolute position in the tree must be non-negative. Relative
/// positions are rejected outright since the evaluator never resolves them.
///
/// # Errors
///
/// Returns the first [`SemanticError`] found, in source order.
pub fn validate(rule: &Rule) -> Result<(), SemanticError> {
    match rule {
        Rule::Simple(sequence) => check_sequence(sequence),
        Rule::Conditional {
            condition,
            then_sequence,
            else_sequence,
        } => {
            check_condition(condition)?;
            check_sequence(then_sequence)?;
            else_sequence.as_ref().map_or(Ok(()), check_sequence)
        }
    }
}

fn check_sequence(sequence: &Sequence) -> Result<(), SemanticError> {
    sequence.elements.iter().try_for_each(check_element)
}

fn check_element(element: &Element) -> Result<(), SemanticError> {
    check_position(element.position)?;
    element.constraint.as_ref().map_or(Ok(()), check_condition)
}

fn check_condition(condition: &Condition) -> Result<(), SemanticError> {
    match condition {
        Condition::Leaf(expr) => check_expression(expr),
        Condition::Group(inner) => check_condition(inner),
        Condition::Binary { left, right, .. } => {
            check_condition(left)?;
            check_condition(right)
        }
    }
}

fn check_expression(expr: &Expression) -> Result<(), SemanticError> {
    check_position(expr.position)?;
    match &expr.value {
        Operand::PropertyRef { position, .. } => check_position(*position),
        Operand::Numeric(_) | Operand::Boolean(_) | Operand::Str(_) => Ok(()),
    }
}

fn check_position(position: Option<Position>) -> Result<(), SemanticError> {
    match position {
        Some(Position::Absolute(index)) if index < 0 => {
            Err(SemanticError::NegativePosition { index })
        }
        Some(Position::Relative(offset)) => Err(SemanticError::RelativePosition { offset }),
        Some(Position::Absolute(_)) | None => Ok(()),
    }
}
