use std::fmt;
use std::str::FromStr;

use super::expr::{Condition, Position};

/// One slot of a sequence pattern: a bare name, a name with an attached
/// condition, or a name pinned to an absolute position.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Element {
    pub identifier: String,
    pub constraint: Option<Condition>,
    pub position: Option<Position>,
}

impl Element {
    /// A bare element matching any item with `identifier` among its values.
    #[must_use]
    pub fn named(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            constraint: None,
            position: None,
        }
    }

    #[must_use]
    pub fn constrained(mut self, condition: impl Into<Condition>) -> Self {
        self.constraint = Some(condition.into());
        self
    }

    /// Pin the element to the item at `index`.
    #[must_use]
    pub fn at(mut self, index: i64) -> Self {
        self.position = Some(Position::Absolute(index));
        self
    }
}

/// Ordered list of elements. Order is the required match order.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sequence {
    pub elements: Vec<Element>,
}

impl Sequence {
    #[must_use]
    pub fn new(elements: Vec<Element>) -> Self {
        Self { elements }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl FromIterator<Element> for Sequence {
    fn from_iter<T: IntoIterator<Item = Element>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Root of one compiled DSL program.
///
/// Built once by the parser (or by hand), checked by
/// [`validate`](crate::validate()), then evaluated any number of times.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rule {
    Simple(Sequence),
    Conditional {
        condition: Condition,
        then_sequence: Sequence,
        else_sequence: Option<Sequence>,
    },
}

impl FromStr for Rule {
    type Err = crate::parse::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parse::parse_rule(s)
    }
}

/// Renders `name`, `name(constraint)` or `name@n`. An element built by hand
/// with both a constraint and a position renders as `name(constraint)@n`,
/// which the grammar does not accept.
impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier)?;
        if let Some(constraint) = &self.constraint {
            write!(f, "({constraint})")?;
        }
        if let Some(position) = &self.position {
            write!(f, "{position}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{element}")?;
        }
        Ok(())
    }
}

/// DSL text for the rule. Text from a parsed rule always parses back to an
/// equal rule; hand-built rules may not (see the `Element` and `Operand`
/// renderings).
impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Simple(sequence) => write!(f, "{sequence}"),
            Rule::Conditional {
                condition,
                then_sequence,
                else_sequence,
            } => {
                write!(f, "if {condition} then {then_sequence}")?;
                if let Some(else_sequence) = else_sequence {
                    write!(f, " else {else_sequence}")?;
                }
                Ok(())
            }
        }
    }
}
