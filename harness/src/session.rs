//! One page load, from navigation to the console-cleanliness check.

use tokio::time::Instant;

use crate::config::HarnessConfig;
use crate::console::{BenignFilter, ConsoleSink};
use crate::driver::{HandleOp, PageDriver, canvas_selector, clear_button_selector};
use crate::error::HarnessError;
use crate::snapshot::StateSnapshot;

/// A loaded page with a published handle.
///
/// Created by [`Session::begin`]; consumed by [`Session::finish`], which fails
/// if the page logged any console error outside the benign allow-list.
pub struct Session<D: PageDriver> {
    driver: D,
    config: HarnessConfig,
    console: ConsoleSink,
    filter: BenignFilter,
}

impl<D: PageDriver> Session<D> {
    /// Install the console sink, load `/`, and wait for `window.appInstance`.
    ///
    /// # Errors
    ///
    /// [`HarnessError::ReadinessTimeout`] if the handle does not appear within
    /// `config.ready_timeout`, or any driver error.
    pub async fn begin(mut driver: D, config: HarnessConfig) -> Result<Self, HarnessError> {
        driver.capture_console().await?;
        let url = config.page_url("/");
        tracing::info!(%url, "opening page");
        driver.navigate(&url).await?;

        let filter = BenignFilter::new(config.benign_patterns.clone());
        let mut session = Self { driver, config, console: ConsoleSink::new(), filter };
        if let Err(e) = session.wait_for_ready().await {
            match session.refresh_console().await {
                Ok(console) => {
                    for message in console.messages() {
                        tracing::warn!(kind = message.kind.as_str(), text = %message.text, "console before failure");
                    }
                }
                Err(console_err) => tracing::warn!(error = %console_err, "failed to read console"),
            }
            if let Err(close_err) = session.driver.close().await {
                tracing::warn!(error = %close_err, "failed to close page");
            }
            return Err(e);
        }
        Ok(session)
    }

    /// Poll the readiness signal until it is set or the timeout elapses.
    ///
    /// # Errors
    ///
    /// [`HarnessError::ReadinessTimeout`] on expiry.
    pub async fn wait_for_ready(&mut self) -> Result<(), HarnessError> {
        let started = Instant::now();
        loop {
            if self.driver.handle_ready().await? {
                tracing::info!(elapsed_ms = started.elapsed().as_millis(), "app handle ready");
                return Ok(());
            }
            if started.elapsed() >= self.config.ready_timeout {
                return Err(HarnessError::ReadinessTimeout(self.config.ready_timeout));
            }
            tokio::time::sleep(self.config.poll_interval).await;
        }
    }

    /// Pull pending console output from the driver into the session sink.
    ///
    /// # Errors
    ///
    /// Driver errors.
    pub async fn refresh_console(&mut self) -> Result<&ConsoleSink, HarnessError> {
        let pending = self.driver.drain_console().await?;
        self.console.extend(pending);
        Ok(&self.console)
    }

    /// Call a handle method.
    ///
    /// # Errors
    ///
    /// Driver errors, including `HandleUnavailable` and `MethodMissing`.
    pub async fn invoke(&mut self, op: HandleOp) -> Result<serde_json::Value, HarnessError> {
        tracing::debug!(%op, "invoking handle method");
        self.driver.invoke(op).await
    }

    /// Current drawing state via `getDrawingState()`.
    ///
    /// # Errors
    ///
    /// Driver errors, or `Snapshot` if the result is malformed.
    pub async fn drawing_state(&mut self) -> Result<StateSnapshot, HarnessError> {
        let value = self.invoke(HandleOp::GetDrawingState).await?;
        StateSnapshot::from_value(value)
    }

    /// Primary click on the canvas at an element-relative position.
    ///
    /// # Errors
    ///
    /// Driver errors.
    pub async fn click_canvas(&mut self, x: f64, y: f64) -> Result<(), HarnessError> {
        tracing::debug!(x, y, "clicking canvas");
        self.driver.click_at(&canvas_selector(), x, y).await
    }

    /// Press the "Clear Canvas" button.
    ///
    /// # Errors
    ///
    /// Driver errors.
    pub async fn press_clear(&mut self) -> Result<(), HarnessError> {
        self.driver.activate(&clear_button_selector()).await
    }

    /// # Errors
    ///
    /// Driver errors.
    pub async fn is_visible(&mut self, selector: &str) -> Result<bool, HarnessError> {
        self.driver.is_visible(selector).await
    }

    /// Close the page and check console cleanliness.
    ///
    /// # Errors
    ///
    /// [`HarnessError::UnexpectedConsoleErrors`] carrying every critical error.
    pub async fn finish(mut self) -> Result<(), HarnessError> {
        self.refresh_console().await?;
        self.driver.close().await?;

        let critical = self.filter.critical_errors(self.console.messages());
        if critical.is_empty() {
            return Ok(());
        }
        for message in &critical {
            tracing::error!(text = %message.text, "unexpected console error");
        }
        Err(HarnessError::UnexpectedConsoleErrors(critical))
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
