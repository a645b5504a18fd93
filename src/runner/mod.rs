//! Test runner for running AL tests on a Business Central server
//!
//! The server offers no test API; the runner opens the command-line test
//! tool page over a client session and performs the same field writes and
//! action invocations an operator would, one at a time.

mod discovery;
mod execution;

use uuid::Uuid;

use crate::common::config::RunnerConfig;
use crate::common::{Error, Result};
use crate::model::{CodeunitResult, PlaylistEntry, ServerTestMethod};
use crate::session::endpoint::{Credential, ServiceEndpoint};
use crate::session::names;
use crate::session::transport::{ClientSession, PageHandle};

/// Drives test discovery and execution over one client session.
///
/// The runner owns the session exclusively for its lifetime; every
/// operation is one sequential conversation with the server. Call
/// [`close`](TestRunner::close) when done; the session cannot be closed
/// from `Drop`.
pub struct TestRunner<S: ClientSession> {
    session: S,
    config: RunnerConfig,
    closed: bool,
}

impl<S: ClientSession> TestRunner<S> {
    /// Connect to a server given its base address and instance name
    pub async fn connect(
        server_uri: &str,
        server_instance: &str,
        credential: Credential,
    ) -> Result<Self> {
        let endpoint = ServiceEndpoint::from_parts(server_uri, server_instance)?;
        Self::connect_with(endpoint, credential, RunnerConfig::default()).await
    }

    /// Connect to a server given a pre-combined service endpoint
    pub async fn connect_endpoint(endpoint: ServiceEndpoint, credential: Credential) -> Result<Self> {
        Self::connect_with(endpoint, credential, RunnerConfig::default()).await
    }

    /// Connect with explicit configuration
    #[tracing::instrument(skip(endpoint, credential, config), fields(endpoint = %endpoint))]
    pub async fn connect_with(
        endpoint: ServiceEndpoint,
        credential: Credential,
        config: RunnerConfig,
    ) -> Result<Self> {
        tracing::info!(user = %credential.username, "Opening client session");
        let session = S::open(&endpoint, &credential, &config.session).await?;
        Ok(Self::from_session_with(session, config))
    }

    /// Wrap an already-opened session
    pub fn from_session(session: S) -> Self {
        Self::from_session_with(session, RunnerConfig::default())
    }

    /// Wrap an already-opened session with explicit configuration
    pub fn from_session_with(session: S, config: RunnerConfig) -> Self {
        Self {
            session,
            config,
            closed: false,
        }
    }

    /// Name of the suite the runner operates on
    pub fn suite_name(&self) -> &str {
        &self.config.suite_name
    }

    /// Switch to a different suite for subsequent calls
    pub fn set_suite_name(&mut self, suite_name: impl Into<String>) {
        self.config.suite_name = suite_name.into();
    }

    /// Id of the test tool page the runner drives
    pub fn test_page_id(&self) -> i32 {
        self.config.test_page_id
    }

    /// Use a different test tool page for subsequent calls
    pub fn set_test_page_id(&mut self, page_id: i32) {
        self.config.test_page_id = page_id;
    }

    /// List the tests available on the server.
    ///
    /// `codeunit_filter` is a server-side range expression over codeunit
    /// ids (for example `"50100..50199"`); `None` lists everything.
    /// Method rows whose codeunit header was never listed come back with
    /// an empty codeunit name.
    #[tracing::instrument(skip(self))]
    pub async fn discover_tests(
        &mut self,
        codeunit_filter: Option<&str>,
    ) -> Result<Vec<ServerTestMethod>> {
        self.ensure_open()?;
        let page = self.open_test_page().await?;

        self.write_suite_name(page).await?;
        self.session
            .write_field(
                page,
                names::field::TEST_CODEUNIT_RANGE_FILTER,
                codeunit_filter.unwrap_or(""),
            )
            .await?;
        self.session
            .invoke_action(page, names::action::CLEAR_TEST_RESULTS)
            .await?;

        discovery::collect_methods(&mut self.session, page).await
    }

    /// Run all tests belonging to the app with the given id
    #[tracing::instrument(skip(self))]
    pub async fn run_app_tests(&mut self, app_id: Uuid) -> Result<Vec<CodeunitResult>> {
        self.ensure_open()?;
        let page = self.open_test_page().await?;

        self.write_suite_name(page).await?;
        self.session
            .write_field(page, names::field::EXTENSION_ID, &app_id.to_string())
            .await?;
        self.session
            .invoke_action(page, names::action::CLEAR_TEST_RESULTS)
            .await?;

        execution::execute_tests(&mut self.session, page).await
    }

    /// Run a specific method (or all tests) in the given codeunit
    #[tracing::instrument(skip(self))]
    pub async fn run_codeunit_tests(
        &mut self,
        codeunit_id: i32,
        method_name: Option<&str>,
    ) -> Result<Vec<CodeunitResult>> {
        self.ensure_open()?;
        let page = self.open_test_page().await?;

        self.write_suite_name(page).await?;
        self.session
            .write_field(
                page,
                names::field::TEST_CODEUNIT_RANGE_FILTER,
                &codeunit_id.to_string(),
            )
            .await?;
        if let Some(method) = method_name {
            if !method.is_empty() {
                self.session
                    .write_field(page, names::field::TEST_PROCEDURE_RANGE_FILTER, method)
                    .await?;
            }
        }

        execution::execute_tests(&mut self.session, page).await
    }

    /// Run a playlist of codeunit/method entries in order.
    ///
    /// The page is opened once for the whole playlist. With
    /// `aggregate_by_codeunit`, results for the same codeunit id across
    /// entries merge into one record; otherwise every execution pass
    /// yields its own records, in playlist order. An entry without a
    /// method name clears the method filter so it runs the whole
    /// codeunit even after a method-specific entry.
    #[tracing::instrument(skip(self, playlist), fields(entries = playlist.len()))]
    pub async fn run_playlist(
        &mut self,
        playlist: &[PlaylistEntry],
        aggregate_by_codeunit: bool,
    ) -> Result<Vec<CodeunitResult>> {
        self.ensure_open()?;
        let page = self.open_test_page().await?;

        let mut results = Vec::new();
        for entry in playlist {
            tracing::debug!(
                codeunit = entry.codeunit_id,
                method = entry.method_name.as_deref().unwrap_or("<all>"),
                "Running playlist entry"
            );

            self.write_suite_name(page).await?;
            self.session
                .write_field(
                    page,
                    names::field::TEST_CODEUNIT_RANGE_FILTER,
                    &entry.codeunit_id.to_string(),
                )
                .await?;
            self.session
                .write_field(
                    page,
                    names::field::TEST_PROCEDURE_RANGE_FILTER,
                    entry.method_name.as_deref().unwrap_or(""),
                )
                .await?;

            let batch = execution::execute_tests(&mut self.session, page).await?;
            execution::merge_results(&mut results, batch, aggregate_by_codeunit);
        }

        Ok(results)
    }

    /// Close the underlying session.
    ///
    /// Safe to call more than once; only the first call reaches the
    /// transport.
    pub async fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.session.close().await
    }

    async fn open_test_page(&mut self) -> Result<PageHandle> {
        let page = self.session.open_page(self.config.test_page_id).await?;
        tracing::debug!(page_id = self.config.test_page_id, "Opened test tool page");
        Ok(page)
    }

    async fn write_suite_name(&mut self, page: PageHandle) -> Result<()> {
        self.session
            .write_field(page, names::field::CURRENT_SUITE_NAME, &self.config.suite_name)
            .await
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(Error::SessionClosed);
        }
        Ok(())
    }
}

impl<S: ClientSession> Drop for TestRunner<S> {
    fn drop(&mut self) {
        if !self.closed {
            tracing::warn!("TestRunner dropped without close(); the session was not shut down");
        }
    }
}
