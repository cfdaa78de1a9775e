//! Director scheduler client — task submission, teardown, and tuning.

use chrono::{DateTime, Utc};
use coursecalc_core::error::{CourseCalcError, Result};
use coursecalc_core::types::ScheduleWindow;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Client for the Director's task API.
pub struct DirectorClient {
    base_url: String,
    authorization: String,
    client: reqwest::Client,
}

impl DirectorClient {
    pub fn new(base_url: &str, authorization: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CourseCalcError::Director(format!("HTTP client build failed: {e}")))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            authorization: authorization.to_string(),
            client,
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/api/v1/{path}", self.base_url)
    }

    /// Public URI of the calculation script the Director serves per project.
    pub fn script_url(&self, project_id: &str) -> String {
        self.api_url(&format!("public/director/{project_id}.js"))
    }

    /// Reachability probe against the service root.
    ///
    /// Only a transport failure with no response at all (connect error,
    /// timeout) counts as down; an HTTP error status still proves the
    /// service is up.
    pub async fn is_alive(&self) -> bool {
        match self
            .client
            .get(format!("{}/", self.base_url))
            .send()
            .await
        {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!("Director probe got no response: {e}");
                false
            }
        }
    }

    /// Delete the calculation task keyed by a project id.
    pub async fn delete_calculation(&self, project_id: &str) -> Result<()> {
        let resp = self
            .client
            .delete(self.api_url(&format!("calculations/{project_id}")))
            .send()
            .await
            .map_err(|e| {
                CourseCalcError::Director(format!("delete calculation {project_id} failed: {e}"))
            })?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(CourseCalcError::Director(format!(
                "delete calculation {project_id} rejected: {}",
                resp.status()
            )))
        }
    }

    /// Submit a new task. Success is strictly HTTP 200; any other status is
    /// reported with the server's error message when one is provided.
    pub async fn create_task(&self, task: &TaskDescriptor) -> Result<()> {
        let resp = self
            .client
            .post(self.api_url("tasks"))
            .json(task)
            .send()
            .await
            .map_err(|e| CourseCalcError::Director(format!("create task {} failed: {e}", task.id)))?;
        if resp.status() == reqwest::StatusCode::OK {
            return Ok(());
        }
        Err(CourseCalcError::Director(Self::error_message(resp).await))
    }

    /// Submit a script + config bundle to the dry-run endpoint. Requires the
    /// authorization token.
    pub async fn test_task(&self, payload: &OptimizePayload) -> Result<()> {
        let resp = self
            .client
            .post(self.api_url("tasks/test"))
            .header("Content-Type", "application/json")
            .header("Authorization", &self.authorization)
            .json(payload)
            .send()
            .await
            .map_err(|e| CourseCalcError::Director(format!("task dry-run failed: {e}")))?;
        if resp.status() == reqwest::StatusCode::OK {
            return Ok(());
        }
        Err(CourseCalcError::Director(Self::error_message(resp).await))
    }

    /// Extract the `message` of a Director JSON error body, falling back to
    /// the status code.
    async fn error_message(resp: reqwest::Response) -> String {
        let status = resp.status();
        resp.json::<DirectorErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| format!("status {status}"))
    }
}

/// Wire-level task submitted to the Director. One per project; the project
/// id keys both the task and its agreement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDescriptor {
    pub id: String,
    /// URI of the script the Director executes on each run.
    pub script: String,
    pub running: bool,
    pub config: TaskConfig,
    pub init: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Recurrence interval in milliseconds.
    pub interval: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskConfig {
    #[serde(rename = "agreementId")]
    pub agreement_id: String,
}

impl TaskDescriptor {
    /// Build the descriptor for one project from a resolved window. Tasks are
    /// always submitted running.
    pub fn for_project(project_id: &str, script: String, window: &ScheduleWindow) -> Self {
        Self {
            id: project_id.to_string(),
            script,
            running: true,
            config: TaskConfig {
                agreement_id: project_id.to_string(),
            },
            init: window.init,
            end: window.end,
            interval: window.interval_ms,
        }
    }
}

/// JSON error body the Director returns on non-200 statuses.
#[derive(Debug, Deserialize)]
pub struct DirectorErrorBody {
    pub message: Option<String>,
}

/// Payload for the `tasks/test` dry-run endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct OptimizePayload {
    #[serde(rename = "scriptText")]
    pub script_text: String,
    #[serde(rename = "scriptConfig")]
    pub script_config: OptimizationRequest,
}

/// Re-timing request the Director's optimization script consumes.
///
/// Filters tasks whose identifiers contain every listed substring and
/// re-spreads their submissions over the given time-of-day window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationRequest {
    #[serde(rename = "filenameMustIncludeAll")]
    pub filename_must_include_all: Vec<String>,
    #[serde(rename = "startingTime")]
    pub starting_time: String,
    #[serde(rename = "endingTime")]
    pub ending_time: String,
    #[serde(rename = "batchSize")]
    pub batch_size: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn window() -> ScheduleWindow {
        ScheduleWindow {
            init: "2024-01-01T00:00:00Z".parse().unwrap(),
            end: "2024-02-01T00:00:00Z".parse().unwrap(),
            interval_ms: 1_800_000,
        }
    }

    fn client(base_url: &str) -> DirectorClient {
        DirectorClient::new(base_url, "token", Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_task_descriptor_wire_shape() {
        let task = TaskDescriptor::for_project("P1", "http://d/api/v1/public/director/P1.js".into(), &window());
        let json = serde_json::to_value(&task).unwrap();

        assert_eq!(json["id"], "P1");
        assert_eq!(json["running"], true);
        assert_eq!(json["config"]["agreementId"], "P1");
        assert_eq!(json["init"], "2024-01-01T00:00:00Z");
        assert_eq!(json["end"], "2024-02-01T00:00:00Z");
        assert_eq!(json["interval"], 1_800_000);
    }

    #[test]
    fn test_optimize_payload_wire_shape() {
        let payload = OptimizePayload {
            script_text: "script body".into(),
            script_config: OptimizationRequest {
                filename_must_include_all: vec!["tpa-".into()],
                starting_time: "10:00".into(),
                ending_time: "10:59".into(),
                batch_size: 1,
            },
        };
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["scriptText"], "script body");
        assert_eq!(json["scriptConfig"]["filenameMustIncludeAll"][0], "tpa-");
        assert_eq!(json["scriptConfig"]["startingTime"], "10:00");
        assert_eq!(json["scriptConfig"]["batchSize"], 1);
    }

    #[tokio::test]
    async fn test_is_alive_accepts_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        assert!(client(&server.uri()).is_alive().await);
    }

    #[tokio::test]
    async fn test_is_alive_rejects_no_response() {
        // Grab a free port and release it so nothing is listening there.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let director = client(&format!("http://127.0.0.1:{port}"));
        assert!(!director.is_alive().await);
    }

    #[tokio::test]
    async fn test_create_task_surfaces_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/tasks"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(serde_json::json!({"message": "task already exists"})),
            )
            .mount(&server)
            .await;

        let task = TaskDescriptor::for_project("P1", "http://d/p1.js".into(), &window());
        let err = client(&server.uri()).create_task(&task).await.unwrap_err();
        assert!(err.to_string().contains("task already exists"));
    }

    #[tokio::test]
    async fn test_test_task_sends_authorization() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/tasks/test"))
            .and(header("Authorization", "token"))
            .and(body_partial_json(serde_json::json!({
                "scriptConfig": {"batchSize": 1}
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let payload = OptimizePayload {
            script_text: "s".into(),
            script_config: OptimizationRequest {
                filename_must_include_all: vec!["tpa-".into()],
                starting_time: "10:00".into(),
                ending_time: "10:59".into(),
                batch_size: 1,
            },
        };
        client(&server.uri()).test_task(&payload).await.unwrap();
    }
}
