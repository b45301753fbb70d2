//! Shared configuration constants
//!
//! Default values used throughout the crate to avoid magic numbers.

/// Chrome user agent string presented to the portal
///
/// Chrome releases new stable versions ~every 4 weeks; refresh this
/// periodically so the portal sees a reasonably current browser.
pub const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.6834.160 Safari/537.36";
