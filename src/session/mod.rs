//! Client session boundary
//!
//! The runner drives the server through the generic client session UI
//! protocol: open a page, read and write named fields, invoke named
//! actions, scroll the virtualized list. This module defines that
//! capability set as a trait plus the fixed wire names the test tool
//! page exposes. The transport itself lives outside this crate.

pub mod endpoint;
pub mod names;
pub mod repeater;
pub mod transport;

pub use endpoint::{Credential, ServiceEndpoint};
pub use repeater::{RepeaterCursor, RepeaterWindow};
pub use transport::{ClientSession, PageHandle};
