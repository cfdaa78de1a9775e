//! Aggregate outcome of a course activation run.
//!
//! Per-project results are collected as tagged values rather than suppressed
//! exceptions, so the whole run is directly inspectable.

/// Result of activating one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationResult {
    Activated,
    Failed(String),
}

impl ActivationResult {
    pub fn is_ok(&self) -> bool {
        matches!(self, ActivationResult::Activated)
    }
}

/// Result of the period-optimization pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptimizeResult {
    Triggered,
    Failed(String),
}

/// Everything that happened during one `activate_course` call.
///
/// Nothing here is a hard failure for the overall operation except `aborted`,
/// which is only set when the upfront health gate found the Director
/// unreachable.
#[derive(Debug, Clone, Default)]
pub struct CourseOutcome {
    pub class_id: String,
    /// Set when the health gate aborted the run before any other call.
    pub aborted: Option<String>,
    /// Projects whose stale task was deleted.
    pub cleaned: Vec<String>,
    /// Projects whose delete failed or found nothing to delete. Expected and
    /// harmless.
    pub cleanup_misses: Vec<String>,
    /// Projects activated successfully.
    pub activated: Vec<String>,
    /// Projects whose activation failed, with the reported reason.
    pub failed: Vec<(String, String)>,
    /// Result of the optimization pass. `None` only when the run aborted.
    pub optimize: Option<OptimizeResult>,
}

impl CourseOutcome {
    pub fn new(class_id: &str) -> Self {
        Self {
            class_id: class_id.to_string(),
            ..Self::default()
        }
    }

    pub fn record_activation(&mut self, project_id: &str, result: ActivationResult) {
        match result {
            ActivationResult::Activated => self.activated.push(project_id.to_string()),
            ActivationResult::Failed(reason) => {
                self.failed.push((project_id.to_string(), reason))
            }
        }
    }

    pub fn all_activated(&self) -> bool {
        self.aborted.is_none() && self.failed.is_empty()
    }

    /// One-line summary for logs and the CLI.
    pub fn summary(&self) -> String {
        if let Some(reason) = &self.aborted {
            return format!("course {}: aborted ({reason})", self.class_id);
        }
        let optimize = match &self.optimize {
            Some(OptimizeResult::Triggered) => "optimization triggered",
            Some(OptimizeResult::Failed(_)) => "optimization failed",
            None => "optimization skipped",
        };
        format!(
            "course {}: {} cleaned ({} misses), {} activated, {} failed, {optimize}",
            self.class_id,
            self.cleaned.len(),
            self.cleanup_misses.len(),
            self.activated.len(),
            self.failed.len(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_activation() {
        let mut outcome = CourseOutcome::new("C1");
        outcome.record_activation("P1", ActivationResult::Activated);
        outcome.record_activation("P2", ActivationResult::Failed("boom".into()));

        assert_eq!(outcome.activated, vec!["P1"]);
        assert_eq!(outcome.failed, vec![("P2".to_string(), "boom".to_string())]);
        assert!(!outcome.all_activated());
    }

    #[test]
    fn test_summary_lines() {
        let mut outcome = CourseOutcome::new("C1");
        outcome.cleaned.push("P1".into());
        outcome.activated.push("P1".into());
        outcome.optimize = Some(OptimizeResult::Triggered);
        assert_eq!(
            outcome.summary(),
            "course C1: 1 cleaned (0 misses), 1 activated, 0 failed, optimization triggered"
        );

        let aborted = CourseOutcome {
            class_id: "C2".into(),
            aborted: Some("director unreachable".into()),
            ..CourseOutcome::default()
        };
        assert_eq!(aborted.summary(), "course C2: aborted (director unreachable)");
    }
}
