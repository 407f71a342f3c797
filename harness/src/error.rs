use std::time::Duration;

use crate::console::ConsoleMessage;

/// Error type for harness operations.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    /// `window.appInstance` did not appear before the deadline.
    #[error("app handle not ready after {0:?}")]
    ReadinessTimeout(Duration),
    /// A handle operation was attempted while no handle is published.
    #[error("window.appInstance is not available")]
    HandleUnavailable,
    /// The published handle does not expose the requested operation.
    #[error("app handle has no method `{0}`")]
    MethodMissing(&'static str),
    /// Console errors outside the benign allow-list were captured.
    #[error("unexpected console errors:\n{}", format_console(.0))]
    UnexpectedConsoleErrors(Vec<ConsoleMessage>),
    /// A scenario check failed.
    #[error("assertion failed: {0}")]
    Assertion(String),
    /// The page driver could not perform an action.
    #[error("page driver failed: {0}")]
    Driver(String),
    /// The drawing-state snapshot did not have the expected shape.
    #[error("malformed drawing state: {0}")]
    Snapshot(#[from] serde_json::Error),
    /// An HTTP request to the WebDriver endpoint failed.
    #[error("webdriver request failed: {0}")]
    Http(#[from] reqwest::Error),
}

fn format_console(messages: &[ConsoleMessage]) -> String {
    messages
        .iter()
        .map(|m| format!("  [{}] {}", m.kind.as_str(), m.text))
        .collect::<Vec<_>>()
        .join("\n")
}
