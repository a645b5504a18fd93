//! Run AL tests on a Business Central server over the client session
//! UI protocol.
//!
//! The server exposes no structured test API; this crate drives the
//! command-line test tool page the way an operator would (writing
//! filter fields, invoking actions, paging the virtualized test list)
//! and decodes the loosely-typed results into a structured model.

pub mod artifacts;
pub mod common;
pub mod model;
pub mod runner;
pub mod session;

// Re-export the surface most callers need
pub use common::{Error, Result, RunnerConfig};
pub use model::{CodeunitResult, MethodResult, PlaylistEntry, ServerTestMethod, TestStatus};
pub use runner::TestRunner;
pub use session::{ClientSession, Credential, PageHandle, ServiceEndpoint};
