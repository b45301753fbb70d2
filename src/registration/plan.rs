//! Plan-based registration
//!
//! Registers every course in the student's saved academic plan: select the
//! term, open the saved-plans tab, and bulk-add via the portal's "Add All"
//! action, then hand off to the shared submission step.

use tracing::{error, info};

use crate::error::AutomationResult;
use crate::portal;
use crate::registration::{submit, term};
use crate::session::Session;
use crate::utils::wait_for_element::TextMatch;

pub async fn register_with_plan(session: &Session, term_name: &str) -> AutomationResult<()> {
    session.navigate(portal::TERM_SELECTION_URL).await?;
    info!(term = term_name, "beginning plan registration");

    term::select_term(session, term_name).await?;

    let term_go = session
        .locate(portal::TERM_CONTINUE_BUTTON, portal::DEFAULT_WAIT)
        .await?;
    session.click(&term_go).await?;

    let plans_tab = session
        .locate(portal::LOAD_PLANS_TAB, portal::DEFAULT_WAIT)
        .await?;
    session.click(&plans_tab).await?;

    let add_all = match session
        .locate_by_text(
            portal::ADD_ALL_BUTTON_NODES,
            portal::ADD_ALL_LABEL,
            TextMatch::Normalized,
            portal::DEFAULT_WAIT,
        )
        .await
    {
        Ok(button) => button,
        Err(e) => {
            // The plans widget fails without any usable signal, so this one
            // lookup dumps the full markup for offline diagnosis. Keep the
            // dump scoped to exactly this failure.
            match session.page_source().await {
                Ok(html) => {
                    error!("could not locate the Add All control; page source follows:\n{html}");
                }
                Err(dump_err) => {
                    error!(
                        error = %dump_err,
                        "could not locate the Add All control, and the page source dump failed"
                    );
                }
            }
            return Err(e);
        }
    };

    add_all.scroll_into_view().await?;
    session.pause(portal::ADD_ALL_PRECLICK_SETTLE).await;
    // the button is inside a widget that re-renders under the cursor;
    // a simulated click lands on the wrong frame often enough to matter
    session.click_via_script(&add_all).await?;
    info!("added all planned courses");

    submit::submit_registration(session).await?;
    info!(term = term_name, "plan registration submitted");
    Ok(())
}
