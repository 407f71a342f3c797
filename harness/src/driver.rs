//! The boundary between scenarios and a page implementation.

use std::fmt;

use canvas::consts::{CANVAS_ID, CLEAR_BUTTON_ID};

use crate::console::ConsoleMessage;
use crate::error::HarnessError;

/// CSS selector for the drawing canvas.
#[must_use]
pub fn canvas_selector() -> String {
    format!("canvas#{CANVAS_ID}")
}

/// CSS selector for the clear button.
#[must_use]
pub fn clear_button_selector() -> String {
    format!("button#{CLEAR_BUTTON_ID}")
}

/// The closed set of handle methods a scenario may call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HandleOp {
    InitializeRenderer,
    Start,
    Stop,
    Clear,
    GetDrawingState,
}

impl HandleOp {
    pub const ALL: [Self; 5] = [
        Self::InitializeRenderer,
        Self::Start,
        Self::Stop,
        Self::Clear,
        Self::GetDrawingState,
    ];

    /// Method name on the JS handle.
    #[must_use]
    pub fn js_name(self) -> &'static str {
        match self {
            Self::InitializeRenderer => "initializeRenderer",
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Clear => "clear",
            Self::GetDrawingState => "getDrawingState",
        }
    }
}

impl fmt::Display for HandleOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.js_name())
    }
}

/// A page the harness can drive.
///
/// Implementations only expose what a user or a test runner can do from the
/// outside: load a URL, read the console, click, and call the published handle.
#[async_trait::async_trait]
pub trait PageDriver: Send {
    /// Start recording console output. Must be called before [`navigate`](Self::navigate)
    /// for boot messages to be captured.
    async fn capture_console(&mut self) -> Result<(), HarnessError>;

    /// Console lines recorded since capture started and not yet drained.
    async fn drain_console(&mut self) -> Result<Vec<ConsoleMessage>, HarnessError>;

    /// Load `url` and let the page boot.
    async fn navigate(&mut self, url: &str) -> Result<(), HarnessError>;

    /// Whether `window.appInstance` is published.
    async fn handle_ready(&mut self) -> Result<bool, HarnessError>;

    /// Whether the element matching `selector` is rendered with a non-empty box.
    async fn is_visible(&mut self, selector: &str) -> Result<bool, HarnessError>;

    /// Primary click at `(x, y)` relative to the element's top-left corner.
    async fn click_at(&mut self, selector: &str, x: f64, y: f64) -> Result<(), HarnessError>;

    /// Activate a button (click at its center).
    async fn activate(&mut self, selector: &str) -> Result<(), HarnessError>;

    /// Call a method on the published handle and return its JSON result.
    ///
    /// # Errors
    ///
    /// [`HarnessError::HandleUnavailable`] with no handle,
    /// [`HarnessError::MethodMissing`] if the handle lacks the method.
    async fn invoke(&mut self, op: HandleOp) -> Result<serde_json::Value, HarnessError>;

    /// Release the page. The default does nothing.
    async fn close(&mut self) -> Result<(), HarnessError> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "driver_test.rs"]
mod tests;
