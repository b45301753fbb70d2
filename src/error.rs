//! Error types for the registration flows
//!
//! Every bounded wait surfaces one of the variants below; nothing is retried
//! internally. The registrars fold these into a reported outcome at the
//! dispatch layer rather than crashing the host process.

use std::time::Duration;
use thiserror::Error;

pub type AutomationResult<T> = Result<T, AutomationError>;

#[derive(Error, Debug)]
pub enum AutomationError {
    /// An expected UI element never appeared within its bounded wait.
    #[error("element not found within {timeout:?}: '{selector}'")]
    ElementNotFound { selector: String, timeout: Duration },

    /// The current URL never matched the expected pattern.
    #[error("url did not reach {expected:?} within {timeout:?} (last url: '{last_url}')")]
    NavigationTimeout {
        expected: String,
        timeout: Duration,
        last_url: String,
    },

    /// The registration entry sequence failed before the login form appeared.
    #[error("session bootstrap failed: {0}")]
    SessionBootstrapFailed(#[source] Box<AutomationError>),

    /// An identity-provider challenge failed. The optional "stay signed in"
    /// dismissal is handled locally and never reaches this variant.
    #[error("authentication failed: {0}")]
    AuthenticationFailed(#[source] Box<AutomationError>),

    #[error("failed to launch browser: {0}")]
    LaunchFailed(String),

    #[error("failed to generate one-time passcode: {0}")]
    Passcode(String),

    #[error("missing environment variable {0}")]
    MissingCredential(&'static str),

    #[error("script evaluation returned an unusable value: {0}")]
    Script(String),

    #[error(transparent)]
    Cdp(#[from] chromiumoxide::error::CdpError),
}

impl AutomationError {
    /// Wrap a bootstrap-phase failure, keeping the step that failed as source.
    pub(crate) fn bootstrap(err: AutomationError) -> Self {
        Self::SessionBootstrapFailed(Box::new(err))
    }

    /// Wrap an authentication-phase failure.
    pub(crate) fn authentication(err: AutomationError) -> Self {
        Self::AuthenticationFailed(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_not_found_names_the_selector() {
        let err = AutomationError::ElementNotFound {
            selector: "#term-go".into(),
            timeout: Duration::from_secs(10),
        };
        let msg = err.to_string();
        assert!(msg.contains("#term-go"));
        assert!(msg.contains("10s"));
    }

    #[test]
    fn wrapped_errors_keep_the_inner_step() {
        let inner = AutomationError::ElementNotFound {
            selector: "a#registerLink".into(),
            timeout: Duration::from_secs(10),
        };
        let err = AutomationError::bootstrap(inner);
        assert!(err.to_string().starts_with("session bootstrap failed"));
        assert!(err.to_string().contains("a#registerLink"));
    }
}
