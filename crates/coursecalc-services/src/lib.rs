//! # CourseCalc Services
//!
//! HTTP clients for the two remote collaborators:
//! - the **Director** scheduler, which runs and times submitted tasks;
//! - the **Assets Manager**, which serves scheduling-window documents.
//!
//! Wire-level request/response types live next to the client that speaks
//! them. State lives only in the remote services; the clients are stateless.

pub mod assets;
pub mod director;

pub use assets::{AssetsClient, WindowDocument};
pub use director::{DirectorClient, OptimizationRequest, OptimizePayload, TaskDescriptor};
