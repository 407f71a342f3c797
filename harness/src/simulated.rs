//! In-process page model backed by the real engine core.
//!
//! `SimulatedPage` behaves like the served page with a `debug-handle` build:
//! it prints the boot message, mounts into `#main-app-container` (or fails
//! the way the bootstrapper does when the container is missing), binds the
//! renderer, starts the loop, and publishes the handle after a configurable
//! number of readiness polls. Clicks go through the same coordinate mapping
//! as browser `mousedown` events.

use std::collections::HashSet;

use canvas::consts::BOOT_MESSAGE;
use canvas::engine::EngineCore;
use canvas::error::EngineError;
use canvas::input::Button;
use canvas::mapper::{CanvasGeometry, Point};

use crate::console::{ConsoleMessage, ConsoleSink};
use crate::driver::{HandleOp, PageDriver, canvas_selector, clear_button_selector};
use crate::error::HarnessError;

/// Page layout and behavior knobs.
#[derive(Clone, Debug)]
pub struct SimulatedPageOptions {
    /// Canvas top-left in client space.
    pub canvas_left: f64,
    pub canvas_top: f64,
    /// Canvas CSS box size.
    pub css_width: f64,
    pub css_height: f64,
    pub device_pixel_ratio: f64,
    /// Number of readiness polls that report "not ready" before the handle appears.
    pub ready_after_polls: u32,
    /// Whether the page has `#main-app-container`.
    pub container_present: bool,
    /// Whether the build publishes `window.appInstance` at all.
    pub publish_handle: bool,
    /// Handle methods the published object lacks.
    pub missing_ops: HashSet<HandleOp>,
    /// Extra console output emitted after boot (e.g. favicon 404s).
    pub extra_console: Vec<ConsoleMessage>,
}

impl Default for SimulatedPageOptions {
    fn default() -> Self {
        Self {
            canvas_left: 8.0,
            canvas_top: 48.0,
            css_width: 800.0,
            css_height: 600.0,
            device_pixel_ratio: 1.0,
            ready_after_polls: 0,
            container_present: true,
            publish_handle: true,
            missing_ops: HashSet::new(),
            extra_console: Vec::new(),
        }
    }
}

/// A [`PageDriver`] that runs the engine core in-process.
pub struct SimulatedPage {
    options: SimulatedPageOptions,
    engine: Option<EngineCore>,
    capturing: bool,
    pending_console: Vec<ConsoleMessage>,
    history: ConsoleSink,
    polls: u32,
    handle_published: bool,
}

impl SimulatedPage {
    #[must_use]
    pub fn new(options: SimulatedPageOptions) -> Self {
        Self {
            options,
            engine: None,
            capturing: false,
            pending_console: Vec::new(),
            history: ConsoleSink::new(),
            polls: 0,
            handle_published: false,
        }
    }

    /// The engine, once mounted.
    #[must_use]
    pub fn engine(&self) -> Option<&EngineCore> {
        self.engine.as_ref()
    }

    /// Every console line the page produced while capture was on.
    #[must_use]
    pub fn console_history(&self) -> &ConsoleSink {
        &self.history
    }

    fn log(&mut self, message: ConsoleMessage) {
        if self.capturing {
            self.history.push(message.clone());
            self.pending_console.push(message);
        }
    }

    fn boot(&mut self) -> Result<EngineCore, EngineError> {
        if !self.options.container_present {
            return Err(EngineError::ContainerMissing);
        }
        let mut engine = EngineCore::new();
        engine.set_geometry(CanvasGeometry::synced(
            self.options.canvas_left,
            self.options.canvas_top,
            self.options.css_width,
            self.options.css_height,
            self.options.device_pixel_ratio,
        ));
        engine.bind_renderer()?;
        engine.start()?;
        Ok(engine)
    }

    fn engine_mut(&mut self) -> Result<&mut EngineCore, HarnessError> {
        self.engine.as_mut().ok_or_else(|| HarnessError::Driver("page has no app mounted".to_owned()))
    }

    fn expect_selector(selector: &str, expected: &str) -> Result<(), HarnessError> {
        if selector == expected {
            Ok(())
        } else {
            Err(HarnessError::Driver(format!("no element matches `{selector}`")))
        }
    }
}

fn engine_failure(e: EngineError) -> HarnessError {
    HarnessError::Driver(format!("handle threw: {e}"))
}

#[async_trait::async_trait]
impl PageDriver for SimulatedPage {
    async fn capture_console(&mut self) -> Result<(), HarnessError> {
        self.capturing = true;
        Ok(())
    }

    async fn drain_console(&mut self) -> Result<Vec<ConsoleMessage>, HarnessError> {
        Ok(std::mem::take(&mut self.pending_console))
    }

    async fn navigate(&mut self, url: &str) -> Result<(), HarnessError> {
        tracing::debug!(%url, "simulated navigation");
        self.engine = None;
        self.polls = 0;
        self.handle_published = false;

        self.log(ConsoleMessage::info(BOOT_MESSAGE));
        match self.boot() {
            Ok(engine) => self.engine = Some(engine),
            Err(e) => self.log(ConsoleMessage::error(format!("Error initializing WASM App: {e}"))),
        }
        for message in self.options.extra_console.clone() {
            self.log(message);
        }
        Ok(())
    }

    async fn handle_ready(&mut self) -> Result<bool, HarnessError> {
        self.polls = self.polls.saturating_add(1);
        if self.engine.is_some() && self.options.publish_handle && self.polls > self.options.ready_after_polls {
            self.handle_published = true;
        }
        Ok(self.handle_published)
    }

    async fn is_visible(&mut self, selector: &str) -> Result<bool, HarnessError> {
        let mounted = self.engine.is_some();
        if selector == canvas_selector() {
            return Ok(mounted && self.options.css_width > 0.0 && self.options.css_height > 0.0);
        }
        if selector == clear_button_selector() {
            return Ok(mounted);
        }
        Ok(false)
    }

    async fn click_at(&mut self, selector: &str, x: f64, y: f64) -> Result<(), HarnessError> {
        Self::expect_selector(selector, &canvas_selector())?;
        let client = Point::new(self.options.canvas_left + x, self.options.canvas_top + y);
        let actions = self.engine_mut()?.on_pointer_down(client, Button::Primary);
        tracing::debug!(?actions, "simulated mousedown");
        Ok(())
    }

    async fn activate(&mut self, selector: &str) -> Result<(), HarnessError> {
        Self::expect_selector(selector, &clear_button_selector())?;
        self.engine_mut()?.clear();
        Ok(())
    }

    async fn invoke(&mut self, op: HandleOp) -> Result<serde_json::Value, HarnessError> {
        if !self.handle_published {
            return Err(HarnessError::HandleUnavailable);
        }
        if self.options.missing_ops.contains(&op) {
            return Err(HarnessError::MethodMissing(op.js_name()));
        }
        let engine = self.engine_mut()?;
        match op {
            HandleOp::InitializeRenderer => {
                engine.bind_renderer().map_err(engine_failure)?;
                Ok(serde_json::Value::Null)
            }
            HandleOp::Start => {
                engine.start().map_err(engine_failure)?;
                Ok(serde_json::Value::Null)
            }
            HandleOp::Stop => Ok(serde_json::Value::Bool(engine.stop())),
            HandleOp::Clear => {
                engine.clear();
                Ok(serde_json::Value::Null)
            }
            HandleOp::GetDrawingState => Ok(serde_json::to_value(engine.snapshot())?),
        }
    }
}

#[cfg(test)]
#[path = "simulated_test.rs"]
mod tests;
