//! Error types shared across the workspace.

use thiserror::Error;

/// Workspace-wide result alias.
pub type Result<T> = std::result::Result<T, CourseCalcError>;

/// Errors raised by CourseCalc components.
#[derive(Debug, Error)]
pub enum CourseCalcError {
    /// Configuration could not be read or parsed.
    #[error("Config error: {0}")]
    Config(String),

    /// A course input document was malformed.
    #[error("Course error: {0}")]
    Course(String),

    /// The Director scheduler returned a failure or the call itself failed.
    #[error("Director error: {0}")]
    Director(String),

    /// The Assets Manager returned a failure or the call itself failed.
    #[error("Assets error: {0}")]
    Assets(String),

    /// The Director gave no response at all. Aborts the whole workflow.
    #[error("Director service is not responding: {0}")]
    Unreachable(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
