//! Domain types — courses, projects, and scheduling windows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A course whose projects receive periodic calculation tasks.
///
/// Read-only input to the activation workflow. The `class_id` doubles as the
/// key of the course-level scheduling configuration document in the Assets
/// Manager.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    #[serde(alias = "classId")]
    pub class_id: String,
    /// Projects in activation order. Order is not semantically significant
    /// but is preserved so logs stay reproducible.
    #[serde(default)]
    pub projects: Vec<Project>,
}

/// The unit that owns one scheduled calculation task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    #[serde(alias = "projectId")]
    pub project_id: String,
}

/// The start/end/interval triple governing a task's recurrence.
///
/// Never partially populated: either fully resolved from a remote document
/// or fully replaced by defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleWindow {
    pub init: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Recurrence interval in milliseconds.
    pub interval_ms: i64,
}

impl ScheduleWindow {
    /// Invariant: `init < end` and a positive interval.
    pub fn is_valid(&self) -> bool {
        self.init < self.end && self.interval_ms > 0
    }
}
