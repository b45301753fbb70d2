//! Element polling for dynamically rendered pages
//!
//! The portal renders most controls via JavaScript well after the page load
//! event fires, so every lookup polls with exponential backoff until its
//! bounded wait expires. There is no implicit retry beyond that wait; callers
//! decide what a missing element means.

use std::time::Duration;

use chromiumoxide::Page;
use chromiumoxide::element::Element;

use crate::error::{AutomationError, AutomationResult};

/// How visible text is compared when locating an element by its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMatch {
    /// Byte-for-byte equality. A near-miss in whitespace or case does not
    /// match; the lookup fails with `ElementNotFound` instead.
    Exact,
    /// Whitespace-collapsed comparison, for controls whose markup pads the
    /// label with layout whitespace.
    Normalized,
}

impl TextMatch {
    pub fn matches(self, have: &str, want: &str) -> bool {
        match self {
            TextMatch::Exact => have == want,
            TextMatch::Normalized => have.split_whitespace().eq(want.split_whitespace()),
        }
    }
}

/// Wait for an element to appear in the DOM.
///
/// Polls starting at 100ms, doubling up to a 1s cap, until `timeout` elapses.
pub async fn wait_for_element(
    page: &Page,
    selector: &str,
    timeout: Duration,
) -> AutomationResult<Element> {
    let start = std::time::Instant::now();
    let mut poll_interval = Duration::from_millis(100);
    let max_interval = Duration::from_secs(1);

    loop {
        if let Ok(element) = page.find_element(selector).await {
            return Ok(element);
        }

        if start.elapsed() >= timeout {
            return Err(AutomationError::ElementNotFound {
                selector: selector.to_string(),
                timeout,
            });
        }

        tokio::time::sleep(poll_interval).await;
        poll_interval = (poll_interval * 2).min(max_interval);
    }
}

/// Wait for an element whose visible text matches `text`.
///
/// The portal's custom widgets (the term dropdown, the plan action bar) carry
/// no stable ids on their option nodes, so candidates are enumerated by tag
/// and matched on their rendered text. Same backoff as [`wait_for_element`].
pub async fn wait_for_element_with_text(
    page: &Page,
    selector: &str,
    text: &str,
    matcher: TextMatch,
    timeout: Duration,
) -> AutomationResult<Element> {
    let start = std::time::Instant::now();
    let mut poll_interval = Duration::from_millis(100);
    let max_interval = Duration::from_secs(1);

    loop {
        if let Ok(candidates) = page.find_elements(selector).await {
            for candidate in candidates {
                if let Ok(Some(have)) = candidate.inner_text().await
                    && matcher.matches(&have, text)
                {
                    return Ok(candidate);
                }
            }
        }

        if start.elapsed() >= timeout {
            return Err(AutomationError::ElementNotFound {
                selector: format!("{selector} with text {text:?}"),
                timeout,
            });
        }

        tokio::time::sleep(poll_interval).await;
        poll_interval = (poll_interval * 2).min(max_interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_requires_byte_equality() {
        assert!(TextMatch::Exact.matches("Fall Semester 2025", "Fall Semester 2025"));
    }

    #[test]
    fn exact_match_rejects_whitespace_near_miss() {
        assert!(!TextMatch::Exact.matches(" Fall Semester 2025", "Fall Semester 2025"));
        assert!(!TextMatch::Exact.matches("Fall Semester 2025 ", "Fall Semester 2025"));
        assert!(!TextMatch::Exact.matches("Fall  Semester 2025", "Fall Semester 2025"));
    }

    #[test]
    fn exact_match_rejects_case_near_miss() {
        assert!(!TextMatch::Exact.matches("fall semester 2025", "Fall Semester 2025"));
    }

    #[test]
    fn normalized_match_collapses_layout_whitespace() {
        assert!(TextMatch::Normalized.matches("\n  Add All\n", "Add All"));
        assert!(TextMatch::Normalized.matches("Add  All", "Add All"));
    }

    #[test]
    fn normalized_match_still_compares_content() {
        assert!(!TextMatch::Normalized.matches("Add None", "Add All"));
        assert!(!TextMatch::Normalized.matches("add all", "Add All"));
    }
}
