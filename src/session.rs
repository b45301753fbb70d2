//! One live browser session
//!
//! `Session` exclusively owns a browser instance, its CDP event handler task,
//! the active page, and the temp profile directory. All registration steps
//! borrow the same session and run strictly sequentially; the CDP connection
//! is not safe for concurrent commands. The caller that created the session
//! must call [`Session::terminate`] on both success and failure paths.

use std::path::PathBuf;
use std::time::Duration;

use chromiumoxide::browser::Browser;
use chromiumoxide::element::Element;
use chromiumoxide::page::Page;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::BrowserConfig;
use crate::browser_setup;
use crate::error::{AutomationError, AutomationResult};
use crate::utils::wait_for_element::{self, TextMatch};

pub struct Session {
    browser: Browser,
    handler: JoinHandle<()>,
    page: Page,
    user_data_dir: Option<PathBuf>,
}

impl Session {
    /// Launch a fresh browser and open a blank page to drive.
    pub async fn launch(config: &BrowserConfig) -> AutomationResult<Self> {
        let (browser, handler, user_data_dir) = browser_setup::launch_browser(config)
            .await
            .map_err(|e| AutomationError::LaunchFailed(e.to_string()))?;

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                handler.abort();
                return Err(AutomationError::LaunchFailed(e.to_string()));
            }
        };

        Ok(Self {
            browser,
            handler,
            page,
            user_data_dir: Some(user_data_dir),
        })
    }

    /// Navigate and wait for the page lifecycle to complete.
    pub async fn navigate(&self, url: &str) -> AutomationResult<()> {
        info!(url, "navigating");
        self.page.goto(url).await?;
        self.page.wait_for_navigation().await?;
        Ok(())
    }

    /// Wait for an element to appear, bounded by `timeout`.
    pub async fn locate(&self, selector: &str, timeout: Duration) -> AutomationResult<Element> {
        wait_for_element::wait_for_element(&self.page, selector, timeout).await
    }

    /// Wait for an element whose visible text matches `text`.
    pub async fn locate_by_text(
        &self,
        selector: &str,
        text: &str,
        matcher: TextMatch,
        timeout: Duration,
    ) -> AutomationResult<Element> {
        wait_for_element::wait_for_element_with_text(&self.page, selector, text, matcher, timeout)
            .await
    }

    /// Wait until the current URL contains any of the marker substrings.
    pub async fn wait_for_url(
        &self,
        markers: &[&str],
        timeout: Duration,
    ) -> AutomationResult<()> {
        let start = std::time::Instant::now();
        let mut last_url = String::new();

        loop {
            if let Ok(Some(url)) = self.page.url().await {
                if markers.iter().any(|marker| url.contains(marker)) {
                    return Ok(());
                }
                last_url = url;
            }

            if start.elapsed() >= timeout {
                return Err(AutomationError::NavigationTimeout {
                    expected: markers.join("|"),
                    timeout,
                    last_url,
                });
            }

            tokio::time::sleep(Duration::from_millis(100)).await;
        }
    }

    /// Scroll an element into view and click it at its clickable point.
    pub async fn click(&self, element: &Element) -> AutomationResult<()> {
        element.scroll_into_view().await?;
        let point = element.clickable_point().await?;
        self.page.click(point).await?;
        Ok(())
    }

    /// Click an element at the DOM level, bypassing interaction simulation.
    ///
    /// Fallback for controls that exist but are not reliably clickable (still
    /// animating into place, or covered by an overlay at click time). Not a
    /// default; each use is a deliberate choice.
    pub async fn click_via_script(&self, element: &Element) -> AutomationResult<()> {
        element.call_js_fn("function() { this.click(); }", false).await?;
        Ok(())
    }

    /// Focus an input, clear any existing value, and type `text` into it.
    pub async fn type_text(&self, element: &Element, text: &str) -> AutomationResult<()> {
        element.scroll_into_view().await?;
        let point = element.clickable_point().await?;
        self.page.click(point).await?;
        element
            .call_js_fn("function() { this.value = ''; }", false)
            .await?;
        element.type_str(text).await?;
        Ok(())
    }

    /// Send Escape to the document, closing any lingering overlay.
    pub async fn press_escape(&self) -> AutomationResult<()> {
        self.page.find_element("body").await?.press_key("Escape").await?;
        Ok(())
    }

    /// Evaluate a script expression in the page context.
    pub async fn run_script(&self, script: &str) -> AutomationResult<serde_json::Value> {
        let result = self.page.evaluate(script).await?;
        result
            .into_value()
            .map_err(|e| AutomationError::Script(e.to_string()))
    }

    /// Full markup of the current page, for the one diagnostic dump policy.
    pub async fn page_source(&self) -> AutomationResult<String> {
        let value = self.run_script("document.documentElement.outerHTML").await?;
        match value {
            serde_json::Value::String(html) => Ok(html),
            other => Err(AutomationError::Script(format!(
                "outerHTML evaluation returned a non-string: {other}"
            ))),
        }
    }

    /// Fixed settle delay. Stands in for render-completion signals the portal
    /// does not expose; see the constants in [`crate::portal`] for the bounds.
    pub async fn pause(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    /// Close the browser, wait for the process to exit, and remove the
    /// profile directory. Consumes the session.
    pub async fn terminate(mut self) {
        info!("terminating browser session");

        if let Err(e) = self.browser.close().await {
            warn!("Failed to close browser cleanly: {}", e);
        }

        // Chrome must fully exit before the profile dir is removed; Windows
        // refuses to delete files the process still holds open.
        if let Err(e) = self.browser.wait().await {
            warn!("Failed to wait for browser exit: {}", e);
        }

        if let Some(dir) = self.user_data_dir.take()
            && let Err(e) = std::fs::remove_dir_all(&dir)
        {
            warn!(
                "Failed to remove profile dir {}: {}. Manual cleanup may be required.",
                dir.display(),
                e
            );
        }

        self.handler.abort();
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.handler.abort();

        if self.user_data_dir.is_some() {
            warn!(
                "Session dropped without terminate(); profile dir will be orphaned: {}",
                self.user_data_dir.as_ref().unwrap().display()
            );
        }
    }
}
