//! Console capture and benign-error filtering.

use serde::{Deserialize, Serialize};

/// Console method that produced a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleKind {
    Log,
    Debug,
    Info,
    Warning,
    Error,
}

impl ConsoleKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Log => "log",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// One captured console line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleMessage {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: ConsoleKind,
}

impl ConsoleMessage {
    #[must_use]
    pub fn new(kind: ConsoleKind, text: impl Into<String>) -> Self {
        Self { text: text.into(), kind }
    }

    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self::new(ConsoleKind::Error, text)
    }

    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self::new(ConsoleKind::Info, text)
    }
}

/// Messages captured during one scenario, in arrival order.
#[derive(Clone, Debug, Default)]
pub struct ConsoleSink {
    messages: Vec<ConsoleMessage>,
}

impl ConsoleSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: ConsoleMessage) {
        tracing::debug!(kind = message.kind.as_str(), text = %message.text, "browser console");
        self.messages.push(message);
    }

    pub fn extend(&mut self, messages: impl IntoIterator<Item = ConsoleMessage>) {
        for message in messages {
            self.push(message);
        }
    }

    #[must_use]
    pub fn messages(&self) -> &[ConsoleMessage] {
        &self.messages
    }

    /// Whether any captured line contains `needle`.
    #[must_use]
    pub fn contains_text(&self, needle: &str) -> bool {
        self.messages.iter().any(|m| m.text.contains(needle))
    }
}

/// Substring allow-list for console errors that are expected noise.
#[derive(Clone, Debug)]
pub struct BenignFilter {
    patterns: Vec<String>,
}

impl BenignFilter {
    #[must_use]
    pub fn new(patterns: Vec<String>) -> Self {
        Self { patterns }
    }

    #[must_use]
    pub fn is_benign(&self, message: &ConsoleMessage) -> bool {
        self.patterns.iter().any(|p| message.text.contains(p.as_str()))
    }

    /// Error-level messages that no pattern excuses, in arrival order.
    #[must_use]
    pub fn critical_errors(&self, messages: &[ConsoleMessage]) -> Vec<ConsoleMessage> {
        messages
            .iter()
            .filter(|m| m.kind == ConsoleKind::Error)
            .filter(|m| !self.is_benign(m))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
#[path = "console_test.rs"]
mod tests;
