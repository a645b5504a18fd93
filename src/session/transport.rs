//! Client session capability set
//!
//! One authenticated conversation with the server. The trait mirrors what
//! the UI protocol actually offers: pages hosting named fields, named
//! actions, and at most one virtualized list. Implementations wrap a real
//! wire transport; the in-repo tests script a fake one.

use async_trait::async_trait;

use crate::common::config::SessionSettings;
use crate::common::Result;

use super::endpoint::{Credential, ServiceEndpoint};

/// Opaque handle to an opened page within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageHandle(u64);

impl PageHandle {
    /// Wrap a session-assigned form id
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The session-assigned form id
    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// A single sequential conversation with the server.
///
/// Every operation is one round trip whose outcome depends on server-side
/// state left by the previous one, so all methods take `&mut self` and
/// callers must not interleave operations from two tasks.
#[async_trait]
pub trait ClientSession: Send {
    /// Open an authenticated session against the endpoint
    async fn open(
        endpoint: &ServiceEndpoint,
        credential: &Credential,
        settings: &SessionSettings,
    ) -> Result<Self>
    where
        Self: Sized;

    /// Open the logical page with the given id
    async fn open_page(&mut self, page_id: i32) -> Result<PageHandle>;

    /// Read the textual value of a named field
    async fn read_field(&mut self, page: PageHandle, field: &str) -> Result<String>;

    /// Write the textual value of a named field
    async fn write_field(&mut self, page: PageHandle, field: &str, value: &str) -> Result<()>;

    /// Invoke a named action and wait for it to complete
    async fn invoke_action(&mut self, page: PageHandle, action: &str) -> Result<()>;

    /// Move the cursor of the page's virtualized list to the first row
    async fn select_first_row(&mut self, page: PageHandle) -> Result<()>;

    /// Force the virtualized list to re-materialize its viewport
    async fn refresh_list(&mut self, page: PageHandle) -> Result<()>;

    /// Scroll the virtualized list by whole pages (may expose more than
    /// one page's worth of new rows at once)
    async fn scroll_list(&mut self, page: PageHandle, pages: i32) -> Result<()>;

    /// Offset of the first materialized row within the whole list
    async fn list_offset(&mut self, page: PageHandle) -> Result<i64>;

    /// Number of rows currently materialized in the viewport
    async fn list_viewport_len(&mut self, page: PageHandle) -> Result<usize>;

    /// Read a cell of a materialized row, addressed by viewport position
    async fn read_row_cell(&mut self, page: PageHandle, row: usize, cell: &str)
        -> Result<String>;

    /// Validation messages the server attached to the page, empty if none
    async fn validation_errors(&mut self, page: PageHandle) -> Result<Vec<String>>;

    /// Close the session. Implementations tolerate repeated calls.
    async fn close(&mut self) -> Result<()>;
}
