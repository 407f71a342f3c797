//! Live-browser [`PageDriver`] over the W3C WebDriver HTTP protocol.
//!
//! Talks to a running `chromedriver` (or any endpoint that accepts Chrome
//! capabilities). Console output is read from the `goog:loggingPrefs` browser
//! log, which survives navigation so boot messages are captured.

use serde_json::{Value, json};

use canvas::consts::DEBUG_HANDLE_SLOT;

use crate::config::HarnessConfig;
use crate::console::{ConsoleKind, ConsoleMessage};
use crate::driver::{HandleOp, PageDriver};
use crate::error::HarnessError;

/// W3C element reference key.
const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735a3d2f9b";

/// Calls a handle method by name and reports why it could not.
const INVOKE_SCRIPT: &str = r"
const [slot, method] = arguments;
const handle = window[slot];
if (handle === undefined || handle === null) { return { status: 'unavailable' }; }
if (typeof handle[method] !== 'function') { return { status: 'missing' }; }
const value = handle[method]();
return { status: 'ok', value: value === undefined ? null : value };
";

const READY_SCRIPT: &str = r"
const [slot] = arguments;
return window[slot] !== undefined && window[slot] !== null;
";

/// A WebDriver browser session.
pub struct WebDriverPage {
    client: reqwest::Client,
    session_url: String,
    capturing: bool,
    closed: bool,
}

impl WebDriverPage {
    /// Open a new browser session at `config.webdriver_url`.
    ///
    /// # Errors
    ///
    /// `Http` if the endpoint is unreachable, `Driver` if it refuses the session.
    pub async fn connect(config: &HarnessConfig) -> Result<Self, HarnessError> {
        let client = reqwest::Client::new();
        let endpoint = config.webdriver_url.trim_end_matches('/').to_owned();
        let body = client
            .post(format!("{endpoint}/session"))
            .json(&capabilities(config.headless))
            .send()
            .await?
            .json::<Value>()
            .await?;
        let value = unwrap_value(body)?;
        let session_id = value
            .get("sessionId")
            .and_then(Value::as_str)
            .ok_or_else(|| HarnessError::Driver("new session response has no sessionId".to_owned()))?;
        tracing::info!(%endpoint, %session_id, "webdriver session opened");
        Ok(Self {
            client,
            session_url: format!("{endpoint}/session/{session_id}"),
            capturing: false,
            closed: false,
        })
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, HarnessError> {
        let response = self
            .client
            .post(format!("{}{path}", self.session_url))
            .json(&body)
            .send()
            .await?
            .json::<Value>()
            .await?;
        unwrap_value(response)
    }

    async fn get(&self, path: &str) -> Result<Value, HarnessError> {
        let response = self
            .client
            .get(format!("{}{path}", self.session_url))
            .send()
            .await?
            .json::<Value>()
            .await?;
        unwrap_value(response)
    }

    async fn execute(&self, script: &str, args: Value) -> Result<Value, HarnessError> {
        self.post("/execute/sync", json!({ "script": script, "args": args })).await
    }

    async fn find(&self, selector: &str) -> Result<String, HarnessError> {
        let value = self.post("/element", json!({ "using": "css selector", "value": selector })).await?;
        element_id(&value)
    }

    async fn read_browser_log(&self) -> Result<Vec<ConsoleMessage>, HarnessError> {
        let value = self.post("/se/log", json!({ "type": "browser" })).await?;
        Ok(parse_log_entries(&value))
    }
}

#[async_trait::async_trait]
impl PageDriver for WebDriverPage {
    async fn capture_console(&mut self) -> Result<(), HarnessError> {
        // Discard anything logged before capture started.
        let stale = self.read_browser_log().await?;
        tracing::debug!(discarded = stale.len(), "console capture started");
        self.capturing = true;
        Ok(())
    }

    async fn drain_console(&mut self) -> Result<Vec<ConsoleMessage>, HarnessError> {
        if !self.capturing {
            return Ok(Vec::new());
        }
        self.read_browser_log().await
    }

    async fn navigate(&mut self, url: &str) -> Result<(), HarnessError> {
        self.post("/url", json!({ "url": url })).await?;
        Ok(())
    }

    async fn handle_ready(&mut self) -> Result<bool, HarnessError> {
        let value = self.execute(READY_SCRIPT, json!([DEBUG_HANDLE_SLOT])).await?;
        Ok(value.as_bool().unwrap_or(false))
    }

    async fn is_visible(&mut self, selector: &str) -> Result<bool, HarnessError> {
        let element = self.find(selector).await?;
        let displayed = self.get(&format!("/element/{element}/displayed")).await?;
        Ok(displayed.as_bool().unwrap_or(false))
    }

    async fn click_at(&mut self, selector: &str, x: f64, y: f64) -> Result<(), HarnessError> {
        let element = self.find(selector).await?;
        let rect = self.get(&format!("/element/{element}/rect")).await?;
        let (dx, dy) = center_offset(&rect, x, y)?;
        self.post("/actions", click_actions(&element, dx, dy)).await?;
        self.client.delete(format!("{}/actions", self.session_url)).send().await?;
        Ok(())
    }

    async fn activate(&mut self, selector: &str) -> Result<(), HarnessError> {
        let element = self.find(selector).await?;
        self.post(&format!("/element/{element}/click"), json!({})).await?;
        Ok(())
    }

    async fn invoke(&mut self, op: HandleOp) -> Result<Value, HarnessError> {
        let reply = self.execute(INVOKE_SCRIPT, json!([DEBUG_HANDLE_SLOT, op.js_name()])).await?;
        interpret_invoke_reply(op, reply)
    }

    async fn close(&mut self) -> Result<(), HarnessError> {
        if self.closed {
            return Ok(());
        }
        self.client.delete(&self.session_url).send().await?.error_for_status()?;
        self.closed = true;
        tracing::info!("webdriver session closed");
        Ok(())
    }
}

/// Chrome capabilities with browser logging on.
fn capabilities(headless: bool) -> Value {
    let mut args = vec!["--window-size=1280,800"];
    if headless {
        args.push("--headless=new");
    }
    json!({
        "capabilities": {
            "alwaysMatch": {
                "browserName": "chrome",
                "goog:loggingPrefs": { "browser": "ALL" },
                "goog:chromeOptions": { "args": args }
            }
        }
    })
}

/// Extract `value` from a WebDriver response, turning protocol errors into `Driver`.
fn unwrap_value(body: Value) -> Result<Value, HarnessError> {
    let Value::Object(mut map) = body else {
        return Err(HarnessError::Driver("webdriver response is not an object".to_owned()));
    };
    let value = map.remove("value").unwrap_or(Value::Null);
    if let Some(error) = value.get("error").and_then(Value::as_str) {
        let message = value.get("message").and_then(Value::as_str).unwrap_or("");
        return Err(HarnessError::Driver(format!("{error}: {message}")));
    }
    Ok(value)
}

fn element_id(value: &Value) -> Result<String, HarnessError> {
    value
        .get(ELEMENT_KEY)
        .and_then(Value::as_str)
        .map(ToOwned::to_owned)
        .ok_or_else(|| HarnessError::Driver("element reference missing".to_owned()))
}

/// WebDriver pointer origins are element centers; convert a top-left-relative
/// position into a center-relative integer offset.
#[allow(clippy::cast_possible_truncation)]
fn center_offset(rect: &Value, x: f64, y: f64) -> Result<(i64, i64), HarnessError> {
    let dim = |key: &str| {
        rect.get(key)
            .and_then(Value::as_f64)
            .ok_or_else(|| HarnessError::Driver(format!("element rect has no `{key}`")))
    };
    let (width, height) = (dim("width")?, dim("height")?);
    Ok(((x - width / 2.0).round() as i64, (y - height / 2.0).round() as i64))
}

fn click_actions(element: &str, dx: i64, dy: i64) -> Value {
    json!({
        "actions": [{
            "type": "pointer",
            "id": "mouse",
            "parameters": { "pointerType": "mouse" },
            "actions": [
                { "type": "pointerMove", "duration": 0, "origin": { ELEMENT_KEY: element }, "x": dx, "y": dy },
                { "type": "pointerDown", "button": 0 },
                { "type": "pointerUp", "button": 0 }
            ]
        }]
    })
}

fn parse_log_entries(value: &Value) -> Vec<ConsoleMessage> {
    let Some(entries) = value.as_array() else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| {
            let text = entry.get("message").and_then(Value::as_str)?;
            let level = entry.get("level").and_then(Value::as_str).unwrap_or("INFO");
            Some(ConsoleMessage::new(level_kind(level), text))
        })
        .collect()
}

fn level_kind(level: &str) -> ConsoleKind {
    match level {
        "SEVERE" => ConsoleKind::Error,
        "WARNING" => ConsoleKind::Warning,
        "DEBUG" | "FINE" | "FINER" | "FINEST" => ConsoleKind::Debug,
        "INFO" => ConsoleKind::Info,
        _ => ConsoleKind::Log,
    }
}

fn interpret_invoke_reply(op: HandleOp, reply: Value) -> Result<Value, HarnessError> {
    match reply.get("status").and_then(Value::as_str) {
        Some("ok") => Ok(reply.get("value").cloned().unwrap_or(Value::Null)),
        Some("unavailable") => Err(HarnessError::HandleUnavailable),
        Some("missing") => Err(HarnessError::MethodMissing(op.js_name())),
        _ => Err(HarnessError::Driver(format!("unexpected reply from {op}: {reply}"))),
    }
}

#[cfg(test)]
#[path = "webdriver_test.rs"]
mod tests;
