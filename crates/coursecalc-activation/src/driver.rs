//! Course activation driver — the top-level entry point.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use coursecalc_core::config::{CalcDefaults, CourseCalcConfig, OptimizationConfig};
use coursecalc_core::error::Result;
use coursecalc_core::notify::{Notice, NoticeLog, Notifier};
use coursecalc_core::types::Course;
use coursecalc_services::{AssetsClient, DirectorClient};

use crate::activate::activate_project;
use crate::cleanup::delete_stale_calculations;
use crate::optimize::optimize_calculation_period;
use crate::outcome::CourseOutcome;

/// Runs the whole activation workflow for a course.
///
/// Holds the two service clients and the injected notifier; construct once
/// and reuse across courses.
pub struct CourseActivator {
    director: DirectorClient,
    assets: AssetsClient,
    notifier: Arc<dyn Notifier>,
    defaults: CalcDefaults,
    optimization: OptimizationConfig,
}

impl CourseActivator {
    /// Build from config with the default notice log.
    pub fn new(config: &CourseCalcConfig) -> Result<Self> {
        Self::with_notifier(config, Arc::new(NoticeLog::new()))
    }

    /// Build from config with an injected notification channel.
    pub fn with_notifier(config: &CourseCalcConfig, notifier: Arc<dyn Notifier>) -> Result<Self> {
        let timeout = Duration::from_secs(config.http_timeout_secs);
        Ok(Self {
            director: DirectorClient::new(&config.director_url, &config.authorization, timeout)?,
            assets: AssetsClient::new(&config.assets_url, timeout)?,
            notifier,
            defaults: config.defaults.clone(),
            optimization: config.optimization.clone(),
        })
    }

    /// Activate calculations for every project of the course.
    ///
    /// Sequence: health gate → stale cleanup → course-level config prefetch →
    /// per-project activation → period optimization. Always returns an
    /// outcome; only an unreachable Director aborts, and it does so before
    /// any mutation.
    pub async fn activate_course(&self, course: &Course) -> CourseOutcome {
        let mut outcome = CourseOutcome::new(&course.class_id);

        if !self.director.is_alive().await {
            tracing::error!(
                "Director not responding, aborting activation for course {}",
                course.class_id
            );
            self.notifier
                .notify(Notice::error(
                    "\"Director\" service, responsible for calculations, is not responding. \
                     Please try again later.",
                ))
                .await;
            outcome.aborted = Some("director unreachable".into());
            return outcome;
        }

        let cleanup = delete_stale_calculations(&self.director, course).await;
        outcome.cleaned = cleanup.cleaned;
        outcome.cleanup_misses = cleanup.misses;

        // One course-level fetch saves a per-project round trip; a miss here
        // just means each project resolves on its own.
        let prefetched = match self.assets.fetch_window_document(&course.class_id).await {
            Ok(doc) => Some(doc),
            Err(e) => {
                tracing::warn!(
                    "No course-level calculation config for {}: {e}",
                    course.class_id
                );
                None
            }
        };

        // Single anchor so defaulted windows match across projects.
        let now = Utc::now();
        for project in &course.projects {
            let result = activate_project(
                &self.director,
                &self.assets,
                self.notifier.as_ref(),
                &self.defaults,
                &project.project_id,
                prefetched.as_ref(),
                now,
            )
            .await;
            outcome.record_activation(&project.project_id, result);
        }

        outcome.optimize = Some(
            optimize_calculation_period(&self.director, self.notifier.as_ref(), &self.optimization)
                .await,
        );

        self.notifier
            .notify(Notice::success("Course activated successfully"))
            .await;
        tracing::info!("{}", outcome.summary());
        outcome
    }

    /// Run only the optimization pass.
    pub async fn optimize(&self) -> crate::outcome::OptimizeResult {
        optimize_calculation_period(&self.director, self.notifier.as_ref(), &self.optimization)
            .await
    }
}
