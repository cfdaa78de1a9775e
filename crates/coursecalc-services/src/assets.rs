//! Assets Manager client — scheduling-window documents by identifier.

use chrono::{DateTime, Utc};
use coursecalc_core::error::{CourseCalcError, Result};
use coursecalc_core::types::ScheduleWindow;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Client for the Assets Manager's public document store.
pub struct AssetsClient {
    base_url: String,
    client: reqwest::Client,
}

impl AssetsClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CourseCalcError::Assets(format!("HTTP client build failed: {e}")))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn document_url(&self, id: &str) -> String {
        format!("{}/api/v1/public/director/{id}.json", self.base_url)
    }

    /// Fetch the scheduling-window document keyed by a course or project id.
    /// The same endpoint serves both; only the key differs.
    pub async fn fetch_window_document(&self, id: &str) -> Result<WindowDocument> {
        let resp = self
            .client
            .get(self.document_url(id))
            .send()
            .await
            .map_err(|e| CourseCalcError::Assets(format!("fetch config {id} failed: {e}")))?;
        if !resp.status().is_success() {
            return Err(CourseCalcError::Assets(format!(
                "config {id} not available: {}",
                resp.status()
            )));
        }
        resp.json::<WindowDocument>()
            .await
            .map_err(|e| CourseCalcError::Assets(format!("config {id} is not valid JSON: {e}")))
    }
}

/// Raw scheduling-window document. Any field may be absent; an incomplete
/// document never yields a window.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WindowDocument {
    #[serde(default)]
    pub init: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
    /// Recurrence interval in milliseconds.
    #[serde(default)]
    pub interval: Option<i64>,
}

impl WindowDocument {
    /// A complete document converts to a usable window verbatim.
    pub fn to_window(&self) -> Option<ScheduleWindow> {
        match (self.init, self.end, self.interval) {
            (Some(init), Some(end), Some(interval_ms)) => Some(ScheduleWindow {
                init,
                end,
                interval_ms,
            }),
            _ => None,
        }
    }
}
