//! Harness configuration, loaded from environment variables.

use std::time::Duration;

/// How long a session waits for `window.appInstance` by default.
pub const DEFAULT_READY_TIMEOUT: Duration = Duration::from_secs(10);
/// Interval between readiness probes.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);
/// Console errors that are expected noise on every page load.
pub const DEFAULT_BENIGN_PATTERNS: &[&str] = &["favicon.ico"];

/// Runtime configuration for harness sessions.
#[derive(Clone, Debug)]
pub struct HarnessConfig {
    /// HTTP base URL of the page under test (e.g. `"http://127.0.0.1:8080"`).
    pub base_url: String,
    /// WebDriver endpoint for live browser runs (e.g. a local `chromedriver`).
    pub webdriver_url: String,
    /// Run the live browser without a window.
    pub headless: bool,
    /// Upper bound on the readiness wait.
    pub ready_timeout: Duration,
    /// Interval between readiness probes.
    pub poll_interval: Duration,
    /// Substrings that mark a console error as benign.
    pub benign_patterns: Vec<String>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_owned(),
            webdriver_url: "http://127.0.0.1:9515".to_owned(),
            headless: true,
            ready_timeout: DEFAULT_READY_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            benign_patterns: DEFAULT_BENIGN_PATTERNS.iter().map(|p| (*p).to_owned()).collect(),
        }
    }
}

impl HarnessConfig {
    /// Load harness config from environment with sane defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Unset or unparsable values
    /// fall back to the defaults.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|s| !s.trim().is_empty());

        let base_url = non_empty("HARNESS_BASE_URL").unwrap_or(defaults.base_url);
        let webdriver_url = non_empty("HARNESS_WEBDRIVER_URL").unwrap_or(defaults.webdriver_url);
        let headless = non_empty("HARNESS_HEADLESS")
            .and_then(|s| parse_bool(&s))
            .unwrap_or(defaults.headless);
        let ready_timeout = non_empty("HARNESS_READY_TIMEOUT_MS")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .map_or(defaults.ready_timeout, Duration::from_millis);
        let benign_patterns = non_empty("HARNESS_BENIGN_PATTERNS")
            .map(|raw| split_patterns(&raw))
            .filter(|patterns| !patterns.is_empty())
            .unwrap_or(defaults.benign_patterns);

        Self {
            base_url,
            webdriver_url,
            headless,
            ready_timeout,
            poll_interval: defaults.poll_interval,
            benign_patterns,
        }
    }

    /// Absolute URL for a path on the page under test.
    #[must_use]
    pub fn page_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }
}

fn split_patterns(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
