//! Wire names of the test tool page
//!
//! The client session protocol has no schema; controls and actions are
//! addressed by the names the page definition happens to use. They are a
//! fixed contract with the server, collected here so a page revision
//! touches one place.

/// Field names on the test tool page
pub mod field {
    /// Active suite name
    pub const CURRENT_SUITE_NAME: &str = "CurrentSuiteName";

    /// Extension (app) id filter
    pub const EXTENSION_ID: &str = "ExtensionId";

    /// Codeunit range filter
    pub const TEST_CODEUNIT_RANGE_FILTER: &str = "TestCodeunitRangeFilter";

    /// Method range filter
    pub const TEST_PROCEDURE_RANGE_FILTER: &str = "TestProcedureRangeFilter";

    /// JSON-bearing result field polled by the execution loop
    pub const TEST_RESULT_JSON: &str = "TestResultJson";
}

/// Action names on the test tool page
pub mod action {
    /// Reset prior run state
    pub const CLEAR_TEST_RESULTS: &str = "ClearTestResults";

    /// Execute the next filtered/selected test
    pub const RUN_NEXT_TEST: &str = "RunNextTest";
}

/// Cell names on each row of the virtualized test list
pub mod row {
    /// Marker distinguishing codeunit headers (0) from method rows
    pub const LINE_TYPE: &str = "LineType";

    /// Codeunit name on header rows, method name on method rows
    pub const NAME: &str = "Name";

    /// Codeunit id the row belongs to
    pub const TEST_CODEUNIT: &str = "TestCodeunit";

    /// Whether the row is selected to run
    pub const RUN: &str = "Run";
}

/// Completion marker returned by the result field once no tests remain,
/// matched case-insensitively
pub const ALL_TESTS_EXECUTED: &str = "All tests executed.";

/// Affirmative token of the per-row run flag, matched case-insensitively
pub const RUN_FLAG_YES: &str = "yes";
