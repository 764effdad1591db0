use std::fmt;

/// Where a property is read from within the evaluated sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Position {
    /// Zero-based index from the start of the sequence.
    Absolute(i64),
    /// Offset from the current item. Representable but rejected by
    /// [`validate`](crate::validate()); the evaluator never resolves it.
    Relative(i64),
}

/// Relational operators of the DSL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RelationalOp {
    Eq,
    Neq,
    Lt,
    Gt,
    Lte,
    Gte,
}

impl RelationalOp {
    /// Apply the operator to two operands of the same type.
    ///
    /// Follows `PartialOrd`, so an unordered pair (NaN) satisfies only `Neq`.
    #[must_use]
    pub fn holds<T: PartialOrd + ?Sized>(self, lhs: &T, rhs: &T) -> bool {
        match self {
            RelationalOp::Eq => lhs == rhs,
            RelationalOp::Neq => lhs != rhs,
            RelationalOp::Lt => lhs < rhs,
            RelationalOp::Gt => lhs > rhs,
            RelationalOp::Lte => lhs <= rhs,
            RelationalOp::Gte => lhs >= rhs,
        }
    }

    /// `true` for the equality operators `=` and `!=`.
    #[must_use]
    pub fn is_equality(self) -> bool {
        matches!(self, RelationalOp::Eq | RelationalOp::Neq)
    }
}

/// Logical connectives joining two conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LogicalOp {
    And,
    Or,
}

/// Right-hand side of an [`Expression`]: a literal or a reference to another
/// property, optionally on another item.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Operand {
    Numeric(f64),
    Boolean(bool),
    Str(String),
    PropertyRef {
        identifier: String,
        position: Option<Position>,
    },
}

/// One atomic comparison: property `identifier` (optionally read at
/// `position`) `operator` `value`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Expression {
    pub identifier: String,
    pub position: Option<Position>,
    pub operator: RelationalOp,
    pub value: Operand,
}

/// Boolean tree of expressions.
///
/// A binary node always carries both an operator and a right branch.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Condition {
    Leaf(Expression),
    /// A nested condition with no operator of its own.
    Group(Box<Condition>),
    Binary {
        left: Box<Condition>,
        op: LogicalOp,
        right: Box<Condition>,
    },
}

impl Expression {
    #[must_use]
    pub fn new(
        identifier: impl Into<String>,
        position: Option<Position>,
        operator: RelationalOp,
        value: impl Into<Operand>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            position,
            operator,
            value: value.into(),
        }
    }
}

impl Condition {
    #[must_use]
    pub fn and(self, other: impl Into<Condition>) -> Condition {
        Condition::Binary {
            left: Box::new(self),
            op: LogicalOp::And,
            right: Box::new(other.into()),
        }
    }

    #[must_use]
    pub fn or(self, other: impl Into<Condition>) -> Condition {
        Condition::Binary {
            left: Box::new(self),
            op: LogicalOp::Or,
            right: Box::new(other.into()),
        }
    }

    #[must_use]
    pub fn group(self) -> Condition {
        Condition::Group(Box::new(self))
    }
}

impl From<Expression> for Condition {
    fn from(expr: Expression) -> Self {
        Condition::Leaf(expr)
    }
}

impl From<f64> for Operand {
    fn from(v: f64) -> Self {
        Operand::Numeric(v)
    }
}

impl From<i64> for Operand {
    #[allow(clippy::cast_precision_loss)]
    fn from(v: i64) -> Self {
        Operand::Numeric(v as f64)
    }
}

impl From<i32> for Operand {
    fn from(v: i32) -> Self {
        Operand::Numeric(f64::from(v))
    }
}

impl From<bool> for Operand {
    fn from(v: bool) -> Self {
        Operand::Boolean(v)
    }
}

impl From<&str> for Operand {
    fn from(v: &str) -> Self {
        Operand::Str(v.to_owned())
    }
}

impl From<String> for Operand {
    fn from(v: String) -> Self {
        Operand::Str(v)
    }
}

impl From<PropertyExpr> for Operand {
    fn from(p: PropertyExpr) -> Self {
        Operand::PropertyRef {
            identifier: p.identifier,
            position: p.position,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Absolute(index) => write!(f, "@{index}"),
            Position::Relative(offset) => write!(f, "@{offset:+}"),
        }
    }
}

impl fmt::Display for RelationalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationalOp::Eq => write!(f, "="),
            RelationalOp::Neq => write!(f, "!="),
            RelationalOp::Lt => write!(f, "<"),
            RelationalOp::Gt => write!(f, ">"),
            RelationalOp::Lte => write!(f, "<="),
            RelationalOp::Gte => write!(f, ">="),
        }
    }
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalOp::And => write!(f, "and"),
            LogicalOp::Or => write!(f, "or"),
        }
    }
}

fn write_property(
    f: &mut fmt::Formatter<'_>,
    identifier: &str,
    position: Option<&Position>,
) -> fmt::Result {
    write!(f, "{identifier}")?;
    if let Some(position) = position {
        write!(f, "{position}")?;
    }
    Ok(())
}

/// Numbers use Rust's float formatting, so NaN and the infinities render as
/// `NaN` / `inf` / `-inf`. The DSL has no such literals and reads those
/// words back as property references.
impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Numeric(v) => write!(f, "{v}"),
            Operand::Boolean(v) => write!(f, "{v}"),
            Operand::Str(v) => write!(f, "\"{v}\""),
            Operand::PropertyRef {
                identifier,
                position,
            } => write_property(f, identifier, position.as_ref()),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_property(f, &self.identifier, self.position.as_ref())?;
        write!(f, " {} {}", self.operator, self.value)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Leaf(expr) => write!(f, "{expr}"),
            Condition::Group(inner) => write!(f, "({inner})"),
            Condition::Binary { left, op, right } => write!(f, "({left} {op} {right})"),
        }
    }
}

/// Intermediate builder for comparison expressions.
/// Created by [`property()`]; a comparison method produces the [`Expression`].
#[derive(Debug, Clone)]
pub struct PropertyExpr {
    identifier: String,
    position: Option<Position>,
}

impl PropertyExpr {
    /// Read the property from the item at `index` instead of the current one.
    #[must_use]
    pub fn at(mut self, index: i64) -> Self {
        self.position = Some(Position::Absolute(index));
        self
    }

    fn compare(self, operator: RelationalOp, value: impl Into<Operand>) -> Expression {
        Expression {
            identifier: self.identifier,
            position: self.position,
            operator,
            value: value.into(),
        }
    }

    #[must_use]
    pub fn eq(self, value: impl Into<Operand>) -> Expression {
        self.compare(RelationalOp::Eq, value)
    }

    #[must_use]
    pub fn neq(self, value: impl Into<Operand>) -> Expression {
        self.compare(RelationalOp::Neq, value)
    }

    #[must_use]
    pub fn lt(self, value: impl Into<Operand>) -> Expression {
        self.compare(RelationalOp::Lt, value)
    }

    #[must_use]
    pub fn gt(self, value: impl Into<Operand>) -> Expression {
        self.compare(RelationalOp::Gt, value)
    }

    #[must_use]
    pub fn lte(self, value: impl Into<Operand>) -> Expression {
        self.compare(RelationalOp::Lte, value)
    }

    #[must_use]
    pub fn gte(self, value: impl Into<Operand>) -> Expression {
        self.compare(RelationalOp::Gte, value)
    }
}

#[must_use]
pub fn property(identifier: &str) -> PropertyExpr {
    PropertyExpr {
        identifier: identifier.to_owned(),
        position: None,
    }
}
