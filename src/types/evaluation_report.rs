use std::fmt;

/// Detailed result returned by
/// [`SequenceRule::evaluate_detailed()`](super::SequenceRule::evaluate_detailed).
///
/// Carries the verdict together with a human-readable reason for every
/// check that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct EvaluationReport {
    matched: bool,
    failures: Vec<String>,
}

impl EvaluationReport {
    pub(crate) fn failed(reason: impl Into<String>) -> Self {
        Self {
            matched: false,
            failures: vec![reason.into()],
        }
    }

    pub(crate) fn from_failures(failures: Vec<String>) -> Self {
        Self {
            matched: failures.is_empty(),
            failures,
        }
    }

    /// Whether the sequence satisfied the rule.
    #[must_use]
    pub fn matched(&self) -> bool {
        self.matched
    }

    /// Reasons for a failed match, in evaluation order. Empty on success.
    #[must_use]
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.matched {
            write!(f, "matched")
        } else {
            write!(f, "failed: [{}]", self.failures.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passed_report() {
        let report = EvaluationReport::from_failures(Vec::new());
        assert!(report.matched());
        assert!(report.failures().is_empty());
        assert_eq!(report.to_string(), "matched");
    }

    #[test]
    fn failed_report_lists_reasons() {
        let report =
            EvaluationReport::from_failures(vec!["ace: rank > 5".into(), "king: suit exists".into()]);
        assert!(!report.matched());
        assert_eq!(report.failures().len(), 2);
        assert_eq!(
            report.to_string(),
            "failed: [ace: rank > 5; king: suit exists]"
        );
    }

    #[test]
    fn single_failure() {
        let report = EvaluationReport::failed("sequence order mismatch");
        assert!(!report.matched());
        assert_eq!(report.failures(), &["sequence order mismatch"]);
    }
}
