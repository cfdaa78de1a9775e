//! # CourseCalc — Course Calculation Activation Client
//!
//! Activates periodic calculation tasks for every project of a course on the
//! remote Director scheduler, then triggers a scheduling-period optimization
//! pass.
//!
//! Usage:
//!   coursecalc activate --course course.toml    # Activate a whole course
//!   coursecalc optimize                         # Optimization pass only
//!   coursecalc --config ./config.toml activate --course course.json

use anyhow::Result;
use clap::{Parser, Subcommand};
use coursecalc_activation::{CourseActivator, OptimizeResult};
use coursecalc_core::config::CourseCalcConfig;
use coursecalc_core::error::CourseCalcError;
use coursecalc_core::types::Course;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "coursecalc",
    version,
    about = "📅 CourseCalc — activate course calculations on the Director scheduler"
)]
struct Cli {
    /// Config file path (default: ~/.coursecalc/config.toml)
    #[arg(short, long)]
    config: Option<String>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Activate calculations for every project of a course
    Activate {
        /// Course document, TOML or JSON
        #[arg(short = 'C', long)]
        course: String,
    },
    /// Run only the scheduling-period optimization pass
    Optimize,
}

fn read_course(path: &str) -> coursecalc_core::error::Result<Course> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| CourseCalcError::Course(format!("Failed to read course file {path}: {e}")))?;
    let course: Course = if path.ends_with(".json") {
        serde_json::from_str(&content)
            .map_err(|e| CourseCalcError::Course(format!("Failed to parse course file {path}: {e}")))?
    } else {
        toml::from_str(&content)
            .map_err(|e| CourseCalcError::Course(format!("Failed to parse course file {path}: {e}")))?
    };
    if course.class_id.is_empty() {
        return Err(CourseCalcError::Course(format!(
            "Course file {path} has no class id"
        )));
    }
    Ok(course)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "coursecalc=debug,coursecalc_activation=debug,coursecalc_services=debug"
    } else {
        "coursecalc=info,coursecalc_activation=info,coursecalc_services=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_target(false)
        .init();

    let mut config = match &cli.config {
        Some(path) => CourseCalcConfig::load_from(std::path::Path::new(
            &shellexpand::tilde(path).to_string(),
        ))?,
        None => CourseCalcConfig::load()?,
    };

    // Env token takes precedence over the config file
    if let Ok(token) = std::env::var("COURSECALC_AUTHORIZATION") {
        config.authorization = token;
    }

    let activator = CourseActivator::new(&config)?;

    match &cli.command {
        Command::Activate { course } => {
            let course = read_course(course)?;
            println!(
                "📘 Activating course {} ({} projects)",
                course.class_id,
                course.projects.len()
            );
            println!("   🎛  Director: {}", config.director_url);
            println!("   🗂  Assets:   {}", config.assets_url);

            let outcome = activator.activate_course(&course).await;

            if let Some(reason) = &outcome.aborted {
                return Err(CourseCalcError::Unreachable(reason.clone()).into());
            }
            for project_id in &outcome.activated {
                println!("   ✅ {project_id}");
            }
            for (project_id, reason) in &outcome.failed {
                println!("   ❌ {project_id}: {reason}");
            }
            println!("{}", outcome.summary());
        }
        Command::Optimize => match activator.optimize().await {
            OptimizeResult::Triggered => println!("✅ Optimization triggered successfully"),
            OptimizeResult::Failed(reason) => {
                anyhow::bail!("Optimization failed: {reason}");
            }
        },
    }

    Ok(())
}
