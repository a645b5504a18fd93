//! Test list entries and decoded test results
//!
//! The result payload arrives as loosely-typed JSON in a page field; the
//! types here give it a fixed shape. Wire names are the camelCase names
//! the command-line test tool emits.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One test method as listed on the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerTestMethod {
    /// Id of the codeunit hosting the method
    pub codeunit_id: i32,
    /// Name of that codeunit, empty if its header row was never seen
    pub codeunit_name: String,
    /// Method name
    pub method_name: String,
    /// Whether the row is selected to run
    pub run: bool,
}

/// One entry of a playlist run: a codeunit and optionally a single method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistEntry {
    pub codeunit_id: i32,
    pub method_name: Option<String>,
}

impl PlaylistEntry {
    /// Run every test in the codeunit
    pub fn codeunit(codeunit_id: i32) -> Self {
        Self {
            codeunit_id,
            method_name: None,
        }
    }

    /// Run a single method of the codeunit
    pub fn method(codeunit_id: i32, method_name: impl Into<String>) -> Self {
        Self {
            codeunit_id,
            method_name: Some(method_name.into()),
        }
    }
}

/// Decoded result of one executed codeunit
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeunitResult {
    /// Codeunit id
    #[serde(rename = "codeUnit", default)]
    pub codeunit_id: i32,

    /// Codeunit name
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_time: Option<DateTime<Utc>>,

    /// Per-method outcomes, in execution order
    #[serde(rename = "testResults", default)]
    pub methods: Vec<MethodResult>,
}

/// Decoded outcome of one test method
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodResult {
    /// Method name
    pub method: String,

    /// Pass/fail/skip outcome
    pub result: TestStatus,

    /// Failure message, empty on success
    #[serde(default)]
    pub message: String,

    /// Failure stack trace, empty on success
    #[serde(default)]
    pub stack_trace: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_time: Option<DateTime<Utc>>,
}

impl MethodResult {
    /// Wall-clock duration of the method, if both timestamps are present
    pub fn duration(&self) -> Option<chrono::Duration> {
        match (self.start_time, self.finish_time) {
            (Some(start), Some(finish)) => Some(finish - start),
            _ => None,
        }
    }
}

/// Outcome of a single test method.
///
/// The server encodes this either as the option value of the result field
/// (1 = failure, 2 = success, 3 = skipped) or as a text form; both are
/// accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TestStatus {
    #[serde(rename = "Pass")]
    Passed,
    #[serde(rename = "Fail")]
    Failed,
    #[serde(rename = "Skip")]
    Skipped,
}

impl TestStatus {
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Passed)
    }

    fn from_option_value(value: u64) -> Option<Self> {
        match value {
            1 => Some(Self::Failed),
            2 => Some(Self::Passed),
            3 => Some(Self::Skipped),
            _ => None,
        }
    }

    fn from_text(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "pass" | "passed" | "success" => Some(Self::Passed),
            "fail" | "failed" | "failure" => Some(Self::Failed),
            "skip" | "skipped" => Some(Self::Skipped),
            other => other
                .parse::<u64>()
                .ok()
                .and_then(Self::from_option_value),
        }
    }
}

impl std::fmt::Display for TestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Passed => write!(f, "Pass"),
            Self::Failed => write!(f, "Fail"),
            Self::Skipped => write!(f, "Skip"),
        }
    }
}

impl<'de> Deserialize<'de> for TestStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct StatusVisitor;

        impl serde::de::Visitor<'_> for StatusVisitor {
            type Value = TestStatus;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a test result option value or name")
            }

            fn visit_u64<E: serde::de::Error>(self, value: u64) -> Result<Self::Value, E> {
                TestStatus::from_option_value(value)
                    .ok_or_else(|| E::custom(format!("unknown test result value {}", value)))
            }

            fn visit_i64<E: serde::de::Error>(self, value: i64) -> Result<Self::Value, E> {
                u64::try_from(value)
                    .ok()
                    .and_then(TestStatus::from_option_value)
                    .ok_or_else(|| E::custom(format!("unknown test result value {}", value)))
            }

            fn visit_str<E: serde::de::Error>(self, value: &str) -> Result<Self::Value, E> {
                TestStatus::from_text(value)
                    .ok_or_else(|| E::custom(format!("unknown test result '{}'", value)))
            }
        }

        deserializer.deserialize_any(StatusVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_codeunit_result() {
        let payload = r#"{
            "name": "Sales Tests",
            "codeUnit": 50100,
            "startTime": "2024-05-01T10:00:00Z",
            "finishTime": "2024-05-01T10:00:05Z",
            "testResults": [
                {
                    "method": "PostInvoice",
                    "result": 2,
                    "startTime": "2024-05-01T10:00:00Z",
                    "finishTime": "2024-05-01T10:00:02Z"
                },
                {
                    "method": "PostCreditMemo",
                    "result": 1,
                    "message": "Amount must be positive",
                    "stackTrace": "Codeunit 50100 line 42"
                }
            ]
        }"#;

        let result: CodeunitResult = serde_json::from_str(payload).unwrap();
        assert_eq!(result.codeunit_id, 50100);
        assert_eq!(result.name, "Sales Tests");
        assert_eq!(result.methods.len(), 2);
        assert_eq!(result.methods[0].result, TestStatus::Passed);
        assert_eq!(
            result.methods[0].duration(),
            Some(chrono::Duration::seconds(2))
        );
        assert_eq!(result.methods[1].result, TestStatus::Failed);
        assert_eq!(result.methods[1].message, "Amount must be positive");
        assert_eq!(result.methods[1].duration(), None);
    }

    #[test]
    fn test_decode_status_text_forms() {
        for (text, expected) in [
            ("\"Success\"", TestStatus::Passed),
            ("\"failure\"", TestStatus::Failed),
            ("\"Skipped\"", TestStatus::Skipped),
            ("\"2\"", TestStatus::Passed),
            ("3", TestStatus::Skipped),
        ] {
            let status: TestStatus = serde_json::from_str(text).unwrap();
            assert_eq!(status, expected, "for payload {}", text);
        }
    }

    #[test]
    fn test_decode_unknown_status_fails() {
        assert!(serde_json::from_str::<TestStatus>("0").is_err());
        assert!(serde_json::from_str::<TestStatus>("\"maybe\"").is_err());
    }

    #[test]
    fn test_decode_garbage_payload_fails() {
        assert!(serde_json::from_str::<CodeunitResult>("not json").is_err());
    }
}
