//! Schedule-window resolution with default fallback.
//!
//! Resolution order: a complete prefetched course document wins; otherwise
//! the project's own document is fetched; a failed or incomplete fetch falls
//! back to defaults anchored at `now`. Resolution never fails — a usable
//! window always comes back.

use chrono::{DateTime, Duration, Utc};
use coursecalc_core::config::CalcDefaults;
use coursecalc_core::notify::{Notice, Notifier};
use coursecalc_core::types::ScheduleWindow;
use coursecalc_services::{AssetsClient, WindowDocument};

/// Default window anchored at `now`.
pub fn default_window(now: DateTime<Utc>, defaults: &CalcDefaults) -> ScheduleWindow {
    ScheduleWindow {
        init: now,
        end: now + Duration::milliseconds(defaults.horizon_ms),
        interval_ms: defaults.interval_ms,
    }
}

/// Resolve the scheduling window for one project.
///
/// `now` is captured once per course activation so that projects falling back
/// to defaults in the same run get identical windows.
pub async fn resolve_window(
    assets: &AssetsClient,
    notifier: &dyn Notifier,
    defaults: &CalcDefaults,
    project_id: &str,
    prefetched: Option<&WindowDocument>,
    now: DateTime<Utc>,
) -> ScheduleWindow {
    if let Some(window) = prefetched.and_then(WindowDocument::to_window) {
        return window;
    }

    let fetched = match assets.fetch_window_document(project_id).await {
        Ok(doc) => doc.to_window(),
        Err(e) => {
            tracing::warn!("No calculation config for project {project_id}: {e}");
            notifier
                .notify(Notice::warn(
                    "Cannot find calculation configuration for this course. Please add it in assets.",
                ))
                .await;
            None
        }
    };

    fetched.unwrap_or_else(|| default_window(now, defaults))
}

#[cfg(test)]
mod tests {
    use super::*;
    use coursecalc_core::notify::NoticeLog;
    use std::time::Duration as StdDuration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn doc(init: &str, end: &str, interval: i64) -> WindowDocument {
        WindowDocument {
            init: Some(init.parse().unwrap()),
            end: Some(end.parse().unwrap()),
            interval: Some(interval),
        }
    }

    #[test]
    fn test_default_window_invariants() {
        let defaults = CalcDefaults::default();
        let now = Utc::now();
        let window = default_window(now, &defaults);

        assert_eq!(window.init, now);
        assert_eq!(window.interval_ms, 3_600_000);
        assert_eq!(
            (window.end - window.init).num_milliseconds(),
            defaults.horizon_ms
        );
        assert!(window.is_valid());
    }

    #[tokio::test]
    async fn test_complete_prefetched_document_wins() {
        // Nothing is mounted on the mock server — a fetch would error.
        let server = MockServer::start().await;
        let assets = AssetsClient::new(&server.uri(), StdDuration::from_secs(5)).unwrap();
        let notifier = NoticeLog::new();

        let prefetched = doc("2024-01-01T00:00:00Z", "2024-02-01T00:00:00Z", 1_800_000);
        let window = resolve_window(
            &assets,
            &notifier,
            &CalcDefaults::default(),
            "P1",
            Some(&prefetched),
            Utc::now(),
        )
        .await;

        assert_eq!(window, prefetched.to_window().unwrap());
        assert!(notifier.history().is_empty());
    }

    #[tokio::test]
    async fn test_incomplete_prefetched_falls_through_to_project_fetch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/public/director/P1.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "init": "2024-03-01T00:00:00Z",
                "end": "2024-04-01T00:00:00Z",
                "interval": 900000
            })))
            .expect(1)
            .mount(&server)
            .await;

        let assets = AssetsClient::new(&server.uri(), StdDuration::from_secs(5)).unwrap();
        let notifier = NoticeLog::new();

        let incomplete = WindowDocument {
            init: Some("2024-01-01T00:00:00Z".parse().unwrap()),
            end: None,
            interval: None,
        };
        let window = resolve_window(
            &assets,
            &notifier,
            &CalcDefaults::default(),
            "P1",
            Some(&incomplete),
            Utc::now(),
        )
        .await;

        assert_eq!(window.interval_ms, 900_000);
        assert!(notifier.history().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_defaults_and_warns_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let assets = AssetsClient::new(&server.uri(), StdDuration::from_secs(5)).unwrap();
        let notifier = NoticeLog::new();
        let defaults = CalcDefaults::default();
        let now = Utc::now();

        let window = resolve_window(&assets, &notifier, &defaults, "P1", None, now).await;

        assert_eq!(window, default_window(now, &defaults));
        let history = notifier.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].summary, "Warning");
    }

    #[tokio::test]
    async fn test_incomplete_fetched_document_defaults_silently() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"init": "2024-01-01T00:00:00Z"})),
            )
            .mount(&server)
            .await;

        let assets = AssetsClient::new(&server.uri(), StdDuration::from_secs(5)).unwrap();
        let notifier = NoticeLog::new();
        let defaults = CalcDefaults::default();
        let now = Utc::now();

        let window = resolve_window(&assets, &notifier, &defaults, "P1", None, now).await;

        assert_eq!(window, default_window(now, &defaults));
        // A document that parses but is incomplete is not a fetch failure
        assert!(notifier.history().is_empty());
    }
}
