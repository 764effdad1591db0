/// How `<`, `>`, `<=` and `>=` treat two boolean operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoolOrdering {
    /// Ordering comparisons between booleans are always false.
    #[default]
    Reject,
    /// `false` orders before `true`.
    FalseBeforeTrue,
}

/// Runtime knobs for an [`Evaluator`](crate::Evaluator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvalOptions {
    pub bool_ordering: BoolOrdering,
}

impl EvalOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn bool_ordering(mut self, bool_ordering: BoolOrdering) -> Self {
        self.bool_ordering = bool_ordering;
        self
    }
}
