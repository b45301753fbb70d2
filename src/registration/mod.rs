//! Registration request model and dispatch
//!
//! A request names a term and optionally a list of CRNs. A non-empty CRN
//! list selects the CRN registrar; otherwise the saved academic plan is
//! registered. Either way the attempt runs against exactly one session,
//! which is terminated here on success and failure alike.

pub mod crn;
pub mod plan;
pub(crate) mod submit;
pub mod term;

use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::auth::{self, Credentials};
use crate::error::AutomationResult;
use crate::portal;
use crate::session::Session;
use crate::Config;

/// One registration attempt as supplied by the caller.
///
/// `crns` keeps the caller's order and duplicates; the list is taken at face
/// value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegistrationRequest {
    #[serde(default)]
    pub term: String,
    #[serde(default)]
    pub crns: Vec<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("Term is required")]
    MissingTerm,
}

impl RegistrationRequest {
    /// Validate the request. Runs before any browser session is created.
    pub fn validate(&self) -> Result<Strategy, RequestError> {
        if self.term.trim().is_empty() {
            return Err(RequestError::MissingTerm);
        }
        Ok(Strategy::for_request(self))
    }
}

/// Which registrar a request resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Plan,
    Crns,
}

impl Strategy {
    pub fn for_request(request: &RegistrationRequest) -> Self {
        if request.crns.is_empty() {
            Strategy::Plan
        } else {
            Strategy::Crns
        }
    }
}

/// Terminal status of one attempt, reported back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    PlanSubmitted { term: String },
    CrnsSubmitted { term: String, count: usize },
    /// The request was invalid; no session was created.
    Rejected { reason: String },
    /// The attempt failed; detail is logged, not reported.
    Failed,
}

/// Run one registration attempt end to end.
///
/// Failures are folded into [`RegistrationOutcome::Failed`] rather than
/// propagated; the host process keeps serving.
pub async fn run(
    config: &Config,
    credentials: &Credentials,
    request: &RegistrationRequest,
) -> RegistrationOutcome {
    let strategy = match request.validate() {
        Ok(strategy) => strategy,
        Err(e) => {
            warn!(error = %e, "rejecting registration request");
            return RegistrationOutcome::Rejected {
                reason: e.to_string(),
            };
        }
    };

    let session = match Session::launch(&config.browser).await {
        Ok(session) => session,
        Err(e) => {
            error!(error = %e, "browser launch failed");
            return RegistrationOutcome::Failed;
        }
    };

    let result = drive(&session, credentials, request, strategy).await;

    if result.is_ok() {
        // hold the session while the portal finishes processing
        session.pause(portal::POST_SUBMIT_GRACE).await;
    }
    session.terminate().await;

    match result {
        Ok(()) => match strategy {
            Strategy::Plan => {
                info!(term = %request.term, "plan registration complete");
                RegistrationOutcome::PlanSubmitted {
                    term: request.term.clone(),
                }
            }
            Strategy::Crns => {
                info!(term = %request.term, count = request.crns.len(), "CRN registration complete");
                RegistrationOutcome::CrnsSubmitted {
                    term: request.term.clone(),
                    count: request.crns.len(),
                }
            }
        },
        Err(e) => {
            error!(error = %e, "registration attempt failed");
            RegistrationOutcome::Failed
        }
    }
}

async fn drive(
    session: &Session,
    credentials: &Credentials,
    request: &RegistrationRequest,
    strategy: Strategy,
) -> AutomationResult<()> {
    auth::bootstrap(session, credentials).await?;

    match strategy {
        Strategy::Plan => plan::register_with_plan(session, &request.term).await,
        Strategy::Crns => crn::register_with_crns(session, &request.term, &request.crns).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(term: &str, crns: &[&str]) -> RegistrationRequest {
        RegistrationRequest {
            term: term.to_string(),
            crns: crns.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn empty_crn_list_selects_the_plan_registrar() {
        assert_eq!(
            Strategy::for_request(&request("Fall Semester 2025", &[])),
            Strategy::Plan
        );
    }

    #[test]
    fn non_empty_crn_list_selects_the_crn_registrar() {
        assert_eq!(
            Strategy::for_request(&request("Fall Semester 2025", &["12345"])),
            Strategy::Crns
        );
    }

    #[test]
    fn empty_term_is_rejected() {
        assert_eq!(
            request("", &["12345"]).validate(),
            Err(RequestError::MissingTerm)
        );
    }

    #[test]
    fn blank_term_is_rejected() {
        assert_eq!(request("   ", &[]).validate(), Err(RequestError::MissingTerm));
    }

    #[test]
    fn valid_request_resolves_its_strategy() {
        assert_eq!(
            request("Fall Semester 2025", &[]).validate(),
            Ok(Strategy::Plan)
        );
        assert_eq!(
            request("Fall Semester 2025", &["12345", "67890"]).validate(),
            Ok(Strategy::Crns)
        );
    }

    #[test]
    fn request_json_preserves_crn_order_and_duplicates() {
        let parsed: RegistrationRequest = serde_json::from_str(
            r#"{"term":"Fall Semester 2025","crns":["67890","12345","12345"]}"#,
        )
        .unwrap();
        assert_eq!(parsed.crns, vec!["67890", "12345", "12345"]);
    }

    #[test]
    fn missing_crns_field_means_plan_registration() {
        let parsed: RegistrationRequest =
            serde_json::from_str(r#"{"term":"Fall Semester 2025"}"#).unwrap();
        assert!(parsed.crns.is_empty());
        assert_eq!(parsed.validate(), Ok(Strategy::Plan));
    }
}
