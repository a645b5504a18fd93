//! Test execution loop
//!
//! The page runs one test per "run next" invocation and reports it
//! through the result field. The loop drains that conversation until the
//! completion sentinel appears. There is no other termination condition;
//! bounding a stuck server is the session layer's job.

use crate::common::Result;
use crate::model::CodeunitResult;
use crate::session::names;
use crate::session::transport::{ClientSession, PageHandle};

/// Run all currently filtered/selected tests and decode each emitted
/// result record, in invocation order.
pub(crate) async fn execute_tests<S: ClientSession>(
    session: &mut S,
    page: PageHandle,
) -> Result<Vec<CodeunitResult>> {
    session
        .invoke_action(page, names::action::CLEAR_TEST_RESULTS)
        .await?;

    let mut results = Vec::new();
    loop {
        session
            .invoke_action(page, names::action::RUN_NEXT_TEST)
            .await?;

        let payload = session.read_field(page, names::field::TEST_RESULT_JSON).await?;
        if payload.eq_ignore_ascii_case(names::ALL_TESTS_EXECUTED) {
            break;
        }

        let record: CodeunitResult = serde_json::from_str(&payload)?;
        tracing::debug!(
            codeunit = record.codeunit_id,
            name = %record.name,
            methods = record.methods.len(),
            "Decoded test result record"
        );
        results.push(record);
    }

    Ok(results)
}

/// Fold one execution pass into the accumulated playlist results.
///
/// With aggregation, records sharing a codeunit id merge into the first
/// record seen for that id; otherwise every record stays its own entry.
pub(crate) fn merge_results(
    results: &mut Vec<CodeunitResult>,
    batch: Vec<CodeunitResult>,
    aggregate_by_codeunit: bool,
) {
    for record in batch {
        if aggregate_by_codeunit {
            if let Some(existing) = results
                .iter_mut()
                .find(|r| r.codeunit_id == record.codeunit_id)
            {
                existing.methods.extend(record.methods);
                continue;
            }
        }
        results.push(record);
    }
}
