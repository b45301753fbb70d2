//! Browser-driven course registration for the Banner student portal
//!
//! Drives the registration UI end to end via chromiumoxide: Okta login with a
//! TOTP second factor, term selection, and either plan-based or CRN-based
//! course entry, finishing with the shared submission step.

pub mod auth;
pub mod browser_setup;
mod error;
pub mod portal;
pub mod registration;
pub mod server;
mod session;
mod utils;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub browser: BrowserConfig,
}

/// Browser launch configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Run browser in headless mode
    #[serde(default = "default_headless")]
    pub headless: bool,

    /// Window dimensions
    #[serde(default)]
    pub window: WindowConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_window_width")]
    pub width: u32,

    #[serde(default = "default_window_height")]
    pub height: u32,
}

fn default_headless() -> bool {
    true
}

fn default_window_width() -> u32 {
    1920
}

fn default_window_height() -> u32 {
    1080
}

impl Default for Config {
    fn default() -> Self {
        Self {
            browser: BrowserConfig::default(),
        }
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: default_headless(),
            window: WindowConfig::default(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_window_width(),
            height: default_window_height(),
        }
    }
}

/// Load config from config.yaml in package root
pub fn load_yaml_config() -> anyhow::Result<Config> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config.yaml");

    if config_path.exists() {
        let contents = fs::read_to_string(&config_path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    } else {
        Ok(Config::default())
    }
}

pub use auth::Credentials;
pub use error::{AutomationError, AutomationResult};
pub use registration::{RegistrationOutcome, RegistrationRequest, Strategy};
pub use session::Session;
pub use utils::wait_for_element::TextMatch;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_match_portal_viewport() {
        let config = Config::default();
        assert!(config.browser.headless);
        assert_eq!(config.browser.window.width, 1920);
        assert_eq!(config.browser.window.height, 1080);
    }

    #[test]
    fn partial_yaml_fills_in_defaults() {
        let config: Config = serde_yaml::from_str("browser:\n  headless: false\n").unwrap();
        assert!(!config.browser.headless);
        assert_eq!(config.browser.window.width, 1920);
    }
}
