//! The third-party surface this crate drives
//!
//! URLs, DOM selectors, and timing constants for one specific institutional
//! portal (Banner Student Registration SSB behind Okta). These are a
//! semi-stable external protocol: when the portal's markup changes, the
//! matching step fails with `ElementNotFound` or `NavigationTimeout` rather
//! than doing anything clever.

use std::time::Duration;

// -- Page URLs --------------------------------------------------------------

pub const REGISTRATION_HOME_URL: &str =
    "https://bxeregprod.oit.nd.edu/StudentRegistration/ssb/registration";

pub const TERM_SELECTION_URL: &str =
    "https://bxeregprod.oit.nd.edu/StudentRegistration/ssb/term/termSelection?mode=registration";

/// Substrings that identify the identity-provider hosts the entry link
/// redirects through (institutional login domain, Okta, generic SSO).
pub const IDP_URL_MARKERS: [&str; 3] = ["login.nd.edu", "okta", "sso"];

// -- Landing page -----------------------------------------------------------

pub const REGISTER_LINK: &str = "a#registerLink";

// -- Okta login form --------------------------------------------------------

pub const IDENTIFIER_INPUT: &str = r#"input[name="identifier"]"#;
pub const NEXT_BUTTON: &str = r#"input[type="submit"][value="Next"]"#;
pub const PASSCODE_INPUT: &str = r#"input[name="credentials.passcode"]"#;
pub const VERIFY_BUTTON: &str = r#"input[type="submit"][value="Verify"]"#;
/// The passcode field as re-rendered for the one-time-code challenge.
pub const OTP_INPUT: &str = r#"input[type="text"][name="credentials.passcode"]"#;
pub const STAY_SIGNED_IN_DECLINE: &str = r#"a[data-se="do-not-stay-signed-in-btn"]"#;

// -- Term selection ---------------------------------------------------------

/// Visible toggle of the select2-style term widget. The real `<select>` is
/// hidden; options render as plain divs in an overlay.
pub const TERM_DROPDOWN_TOGGLE: &str = "#s2id_txt_term .select2-choice";
/// Node type the rendered term options use; matched by visible text.
pub const TERM_OPTION_NODES: &str = "div";
pub const TERM_CONTINUE_BUTTON: &str = "#term-go";

// -- Registration tabs and controls -----------------------------------------

pub const LOAD_PLANS_TAB: &str = "#loadPlans-tab";
/// Matched by visible text among all buttons; the control carries no id.
pub const ADD_ALL_BUTTON_NODES: &str = "button";
pub const ADD_ALL_LABEL: &str = "Add All";

pub const ENTER_CRNS_TAB: &str = "#enterCRNs-tab";
pub const ADD_ANOTHER_CRN: &str = "#addAnotherCRN";
pub const ADD_CRNS_BUTTON: &str = "#addCRNbutton";

// -- Submission -------------------------------------------------------------

pub const CONSENT_CHECKBOX: &str = "input.button-bar-input#conditionalAddDrop";
pub const SAVE_BUTTON: &str = "button#saveButton";

// -- Bounded waits ----------------------------------------------------------

pub const DEFAULT_WAIT: Duration = Duration::from_secs(10);
/// Okta challenge fields take longer to render than anything else.
pub const CHALLENGE_WAIT: Duration = Duration::from_secs(15);
pub const CRN_ROW_WAIT: Duration = Duration::from_secs(5);

// -- Settle delays ----------------------------------------------------------
//
// The portal exposes no "finished rendering" signal for these transitions;
// each delay is an observed-safe upper bound, tunable here in one place.

/// Okta needs time to swap in the password challenge after the username step.
pub const USERNAME_SETTLE: Duration = Duration::from_secs(3);
pub const STAY_SIGNED_IN_PRECLICK_SETTLE: Duration = Duration::from_secs(1);
pub const STAY_SIGNED_IN_POSTCLICK_SETTLE: Duration = Duration::from_secs(3);
/// The term dropdown animates open and closed.
pub const DROPDOWN_SETTLE: Duration = Duration::from_secs(1);
pub const ADD_ALL_PRECLICK_SETTLE: Duration = Duration::from_millis(500);
/// Each new CRN row is inserted only after the previous one commits; entering
/// rows faster than this corrupts the positional addressing.
pub const CRN_ROW_SETTLE: Duration = Duration::from_millis(500);
/// Lets the portal process the submission server-side before teardown.
pub const POST_SUBMIT_SETTLE: Duration = Duration::from_secs(1);
/// Grace period the caller holds the session open after a submission.
pub const POST_SUBMIT_GRACE: Duration = Duration::from_secs(10);

/// CRN input fields are addressed by 1-based position in entry order.
pub fn crn_input_selector(position: usize) -> String {
    format!("#txt_crn{position}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crn_selectors_are_one_based() {
        assert_eq!(crn_input_selector(1), "#txt_crn1");
        assert_eq!(crn_input_selector(2), "#txt_crn2");
        assert_eq!(crn_input_selector(12), "#txt_crn12");
    }

    #[test]
    fn idp_markers_cover_the_redirect_hosts() {
        let matches = |url: &str| IDP_URL_MARKERS.iter().any(|m| url.contains(m));
        assert!(matches("https://login.nd.edu/app/signin"));
        assert!(matches("https://acme.okta.com/oauth2/authorize"));
        assert!(matches("https://sso.example.edu/idp"));
        assert!(!matches("https://bxeregprod.oit.nd.edu/StudentRegistration"));
    }
}
