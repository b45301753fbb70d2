//! HTTP request boundary
//!
//! A thin axum wrapper over the registration core: one endpoint accepting a
//! term and optional CRN list. Outcome detail (which selector failed, where
//! the flow died) stays in the logs; callers get a generic status message.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;
use tracing::{error, info};

use crate::auth::Credentials;
use crate::registration::{self, RegistrationOutcome, RegistrationRequest};
use crate::Config;

struct AppState {
    config: Config,
}

/// Serve `POST /api/register` until the process is stopped.
pub async fn serve(listen_addr: &str, config: Config) -> anyhow::Result<()> {
    let addr: SocketAddr = listen_addr
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid listen address {listen_addr:?}: {e}"))?;

    let state = Arc::new(AppState { config });

    let app = Router::new()
        .route("/api/register", post(register_handler))
        .with_state(state);

    info!(addr = %addr, "starting registration server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind {addr}: {e}"))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("HTTP server error: {e}"))
}

async fn register_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegistrationRequest>,
) -> impl IntoResponse {
    // Credentials are re-read per attempt and live only for its duration.
    let credentials = match Credentials::from_env() {
        Ok(credentials) => credentials,
        Err(e) => {
            error!(error = %e, "registration credentials unavailable");
            return respond(RegistrationOutcome::Failed);
        }
    };

    let outcome = registration::run(&state.config, &credentials, &request).await;
    respond(outcome)
}

/// Map an outcome to its HTTP status and caller-facing message.
fn respond(outcome: RegistrationOutcome) -> (StatusCode, Json<serde_json::Value>) {
    let (status, message) = match outcome {
        RegistrationOutcome::PlanSubmitted { .. } => {
            (StatusCode::OK, "Plan registered successfully".to_string())
        }
        RegistrationOutcome::CrnsSubmitted { .. } => {
            (StatusCode::OK, "CRNs registered successfully".to_string())
        }
        RegistrationOutcome::Rejected { reason } => (StatusCode::BAD_REQUEST, reason),
        RegistrationOutcome::Failed => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Registration failed".to_string(),
        ),
    };
    (status, Json(json!({ "message": message })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_outcome_maps_to_ok() {
        let (status, body) = respond(RegistrationOutcome::PlanSubmitted {
            term: "Fall Semester 2025".into(),
        });
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.0["message"], "Plan registered successfully");
    }

    #[test]
    fn crn_outcome_maps_to_ok() {
        let (status, body) = respond(RegistrationOutcome::CrnsSubmitted {
            term: "Fall Semester 2025".into(),
            count: 2,
        });
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.0["message"], "CRNs registered successfully");
    }

    #[test]
    fn rejected_request_maps_to_bad_request() {
        let (status, body) = respond(RegistrationOutcome::Rejected {
            reason: "Term is required".into(),
        });
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.0["message"], "Term is required");
    }

    #[test]
    fn failure_maps_to_a_generic_message() {
        let (status, body) = respond(RegistrationOutcome::Failed);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        // internal detail must not leak to the caller
        assert_eq!(body.0["message"], "Registration failed");
    }
}
