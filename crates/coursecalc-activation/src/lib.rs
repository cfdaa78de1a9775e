//! # CourseCalc Activation
//!
//! The activation workflow: turn on periodic calculation tasks for every
//! project of a course against the remote Director scheduler.
//!
//! ## Control flow
//! ```text
//! CourseActivator::activate_course
//!   ├── health gate        — GET director root; no response at all → abort
//!   ├── stale cleanup      — DELETE calculations/{project}, best-effort
//!   ├── config prefetch    — one course-level window document (optional)
//!   ├── per-project activation
//!   │     ├── resolve window (prefetched → per-project fetch → defaults)
//!   │     └── POST tasks (failures isolated per project)
//!   └── period optimization — POST tasks/test, always runs once
//! ```
//!
//! Every stage is isolated: one project's failure never aborts the others,
//! and a failed cleanup never blocks activation.

pub mod activate;
pub mod cleanup;
pub mod driver;
pub mod optimize;
pub mod outcome;
pub mod schedule;

pub use driver::CourseActivator;
pub use outcome::{ActivationResult, CourseOutcome, OptimizeResult};
