//! Stale task teardown, best-effort.

use coursecalc_core::types::Course;
use coursecalc_services::DirectorClient;

/// Per-project outcome of the cleanup pass.
#[derive(Debug, Clone, Default)]
pub struct CleanupReport {
    pub cleaned: Vec<String>,
    pub misses: Vec<String>,
}

/// Delete any previously active calculation task for every project in the
/// course, in input order.
///
/// A failed delete usually just means the task was never active; it is
/// logged and ignored. Each delete is awaited so the whole pass has taken
/// effect before activation starts.
pub async fn delete_stale_calculations(
    director: &DirectorClient,
    course: &Course,
) -> CleanupReport {
    let mut report = CleanupReport::default();
    for project in &course.projects {
        let project_id = &project.project_id;
        match director.delete_calculation(project_id).await {
            Ok(()) => report.cleaned.push(project_id.clone()),
            Err(e) => {
                tracing::warn!(
                    "Calculation was not active in the first place. Project {project_id}: {e}"
                );
                report.misses.push(project_id.clone());
            }
        }
    }
    report
}
