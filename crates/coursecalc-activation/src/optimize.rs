//! Scheduling-period optimization pass.
//!
//! Course-independent: the Director re-times every task matching the
//! configured identifier tags, so tasks of other courses sharing a tag move
//! too. That is the intended batching behavior, not a leak.

use coursecalc_core::config::OptimizationConfig;
use coursecalc_core::notify::{Notice, Notifier};
use coursecalc_services::{DirectorClient, OptimizationRequest, OptimizePayload};

use crate::outcome::OptimizeResult;

/// Optimization script shipped with the client. A config `script_path`
/// overrides it.
pub const DEFAULT_SCRIPT: &str = include_str!("../scripts/optimize_period.js");

fn build_request(config: &OptimizationConfig) -> OptimizationRequest {
    OptimizationRequest {
        filename_must_include_all: config.filename_must_include_all.clone(),
        starting_time: config.starting_time.clone(),
        ending_time: config.ending_time.clone(),
        batch_size: config.batch_size,
    }
}

fn load_script(config: &OptimizationConfig) -> String {
    match &config.script_path {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(script) => script,
            Err(e) => {
                tracing::warn!("Cannot read optimization script {path}, using embedded copy: {e}");
                DEFAULT_SCRIPT.to_string()
            }
        },
        None => DEFAULT_SCRIPT.to_string(),
    }
}

/// Ask the Director to re-balance submission timing across the filtered task
/// set. Runs once per course activation, after all project activations.
pub async fn optimize_calculation_period(
    director: &DirectorClient,
    notifier: &dyn Notifier,
    config: &OptimizationConfig,
) -> OptimizeResult {
    let payload = OptimizePayload {
        script_text: load_script(config),
        script_config: build_request(config),
    };

    match director.test_task(&payload).await {
        Ok(()) => {
            notifier
                .notify(Notice::success("Optimization triggered successfully"))
                .await;
            OptimizeResult::Triggered
        }
        Err(e) => {
            tracing::error!("Error optimizing calculation period: {e}");
            notifier.notify(Notice::error(&e.to_string())).await;
            OptimizeResult::Failed(e.to_string())
        }
    }
}
