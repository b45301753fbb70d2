//! Term selection via the portal's custom dropdown
//!
//! The term widget is a styled select2 control backed by a hidden `<select>`;
//! the visible options are divs rendered into an overlay after the toggle is
//! clicked. Selection therefore goes: open, settle, match the option by its
//! exact visible text, click, close. There is no fuzzy matching; a term
//! string that differs in whitespace or case fails the attempt.

use tracing::info;

use crate::error::AutomationResult;
use crate::portal;
use crate::session::Session;
use crate::utils::wait_for_element::TextMatch;

pub async fn select_term(session: &Session, term: &str) -> AutomationResult<()> {
    let toggle = session
        .locate(portal::TERM_DROPDOWN_TOGGLE, portal::DEFAULT_WAIT)
        .await?;
    session.click(&toggle).await?;

    // the options overlay animates open
    session.pause(portal::DROPDOWN_SETTLE).await;

    let option = session
        .locate_by_text(
            portal::TERM_OPTION_NODES,
            term,
            TextMatch::Exact,
            portal::DEFAULT_WAIT,
        )
        .await?;
    session.click(&option).await?;

    session.press_escape().await?;
    session.pause(portal::DROPDOWN_SETTLE).await;

    info!(term, "term selected");
    Ok(())
}
