//! CRN-based registration
//!
//! Enters an arbitrary list of course-reference numbers one row at a time.
//! Rows are addressed by 1-based position in the caller's order; the list is
//! not deduplicated. Each "add another row" click inserts the next input
//! only after the previous row commits, so entry is paced with a settle
//! delay per row. A failure on any row aborts the whole attempt; there are
//! no partial-CRN commits.

use tracing::info;

use crate::error::AutomationResult;
use crate::portal;
use crate::registration::{submit, term};
use crate::session::Session;

pub async fn register_with_crns(
    session: &Session,
    term_name: &str,
    crns: &[String],
) -> AutomationResult<()> {
    session.navigate(portal::TERM_SELECTION_URL).await?;
    info!(term = term_name, count = crns.len(), "beginning CRN registration");

    term::select_term(session, term_name).await?;

    let term_go = session
        .locate(portal::TERM_CONTINUE_BUTTON, portal::DEFAULT_WAIT)
        .await?;
    session.click(&term_go).await?;

    let crns_tab = session
        .locate(portal::ENTER_CRNS_TAB, portal::DEFAULT_WAIT)
        .await?;
    session.click(&crns_tab).await?;

    for (index, crn) in crns.iter().enumerate() {
        let position = index + 1;
        let input = session
            .locate(&portal::crn_input_selector(position), portal::CRN_ROW_WAIT)
            .await?;
        session.type_text(&input, crn).await?;

        let add_row = session
            .locate(portal::ADD_ANOTHER_CRN, portal::DEFAULT_WAIT)
            .await?;
        session.click(&add_row).await?;
        session.pause(portal::CRN_ROW_SETTLE).await;
    }

    let add_crns = session
        .locate(portal::ADD_CRNS_BUTTON, portal::DEFAULT_WAIT)
        .await?;
    session.click(&add_crns).await?;
    info!(term = term_name, crns = ?crns, "CRNs submitted");

    submit::submit_registration(session).await?;
    Ok(())
}
