//! Test discovery over the virtualized list
//!
//! The test page lists codeunit header rows (line type 0) followed by
//! their method rows. Headers always precede their methods in server
//! order, so a single forward pass with an id -> name map is enough to
//! resolve codeunit names.

use std::collections::HashMap;

use crate::common::{Error, Result};
use crate::model::ServerTestMethod;
use crate::session::names;
use crate::session::repeater::RepeaterCursor;
use crate::session::transport::{ClientSession, PageHandle};

/// Walk the whole list and collect every method row.
///
/// The caller has already written the suite name and codeunit filter and
/// cleared prior results; this rewinds the list and pages forward until
/// the window stops yielding rows.
pub(crate) async fn collect_methods<S: ClientSession>(
    session: &mut S,
    page: PageHandle,
) -> Result<Vec<ServerTestMethod>> {
    {
        let mut cursor = RepeaterCursor::new(&mut *session, page);
        cursor.rewind().await?;
    }

    // The refresh is where an invalid filter surfaces
    let messages = session.validation_errors(page).await?;
    if !messages.is_empty() {
        return Err(Error::validation(&messages));
    }

    let mut cursor = RepeaterCursor::new(session, page);
    let mut methods = Vec::new();
    let mut codeunits: HashMap<i32, String> = HashMap::new();
    let mut index: i64 = 0;

    loop {
        let mut window = cursor.window().await?;
        if !window.contains(index) {
            cursor.advance().await?;
            window = cursor.window().await?;
        }

        let position = window.position_of(index);
        index += 1;
        if position >= window.len as i64 {
            break;
        }
        let Ok(row) = usize::try_from(position) else {
            break;
        };

        // Non-numeric and negative markers are filler rows, not data
        let line_type = cursor
            .cell(row, names::row::LINE_TYPE)
            .await?
            .trim()
            .parse::<i32>()
            .unwrap_or(-1);
        if line_type < 0 {
            continue;
        }

        let name = cursor.cell(row, names::row::NAME).await?;
        let codeunit_raw = cursor.cell(row, names::row::TEST_CODEUNIT).await?;
        let codeunit_id = codeunit_raw
            .trim()
            .parse::<i32>()
            .map_err(|_| Error::row_data(row, names::row::TEST_CODEUNIT, &codeunit_raw))?;
        let run = cursor
            .cell(row, names::row::RUN)
            .await?
            .eq_ignore_ascii_case(names::RUN_FLAG_YES);

        if line_type == 0 {
            codeunits.insert(codeunit_id, name);
            continue;
        }

        methods.push(ServerTestMethod {
            codeunit_id,
            codeunit_name: codeunits.get(&codeunit_id).cloned().unwrap_or_default(),
            method_name: name,
            run,
        });
    }

    tracing::debug!(
        methods = methods.len(),
        codeunits = codeunits.len(),
        "Discovery pass complete"
    );

    Ok(methods)
}
