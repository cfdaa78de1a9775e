//! Per-project task activation.

use chrono::{DateTime, Utc};
use coursecalc_core::config::CalcDefaults;
use coursecalc_core::notify::{Notice, Notifier};
use coursecalc_services::{AssetsClient, DirectorClient, TaskDescriptor, WindowDocument};

use crate::outcome::ActivationResult;
use crate::schedule::resolve_window;

/// Activate the calculation task for one project: resolve its window, build
/// the descriptor, and submit it.
///
/// Failures are returned, not propagated — the driver keeps going with the
/// remaining projects either way.
pub async fn activate_project(
    director: &DirectorClient,
    assets: &AssetsClient,
    notifier: &dyn Notifier,
    defaults: &CalcDefaults,
    project_id: &str,
    prefetched: Option<&WindowDocument>,
    now: DateTime<Utc>,
) -> ActivationResult {
    let window = resolve_window(assets, notifier, defaults, project_id, prefetched, now).await;
    let task = TaskDescriptor::for_project(project_id, director.script_url(project_id), &window);

    match director.create_task(&task).await {
        Ok(()) => {
            tracing::info!("Calculation activated for project {project_id}");
            notifier
                .notify(Notice::success("Calculation activated successfully"))
                .await;
            ActivationResult::Activated
        }
        Err(e) => {
            tracing::error!("Error activating calculation for project {project_id}: {e}");
            notifier.notify(Notice::error(&e.to_string())).await;
            ActivationResult::Failed(e.to_string())
        }
    }
}
