//! Shared submission step
//!
//! Both registrars end here: toggle the conditional add/drop consent
//! checkbox and press save. The portal's own response banner is not parsed;
//! whether the registration actually succeeded is left to the portal's
//! record. That verification gap is a known property of this flow, not an
//! oversight to patch here.

use tracing::info;

use crate::error::AutomationResult;
use crate::portal;
use crate::session::Session;

pub(crate) async fn submit_registration(session: &Session) -> AutomationResult<()> {
    let consent = session
        .locate(portal::CONSENT_CHECKBOX, portal::DEFAULT_WAIT)
        .await?;
    session.click(&consent).await?;

    let save = session
        .locate(portal::SAVE_BUTTON, portal::DEFAULT_WAIT)
        .await?;
    session.click(&save).await?;

    // give the portal time to process server-side before teardown
    session.pause(portal::POST_SUBMIT_SETTLE).await;
    info!("registration submitted");
    Ok(())
}
