//! Domain types for a single download run.
//!
//! These are pure value types with no infrastructure dependencies.

mod backend;
mod request;

pub use backend::{BACKEND_ENV_VAR, BackendKind, BackendPlan};
pub use request::DownloadRequest;
