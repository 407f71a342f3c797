use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use crate::doc::{DrawingState, Shape};
use crate::error::EngineError;
use crate::input::Button;
use crate::mapper::{CanvasGeometry, Insets, Point, backing_store_size, parse_css_px};
use crate::render::{self, DrawCmd};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Default HTML canvas size before layout is known.
const DEFAULT_CANVAS_WIDTH: f64 = 300.0;
const DEFAULT_CANVAS_HEIGHT: f64 = 150.0;

/// Lifecycle phase of a mounted engine.
///
/// `Mounted → Ready → Running ⇄ Stopped`. There is no way back to unmounted;
/// the engine lives as long as the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// DOM exists, no 2D context bound yet.
    Mounted,
    /// Context bound, render loop not started.
    Ready,
    /// Render loop is rescheduling itself every frame.
    Running,
    /// Render loop was stopped; may be started again.
    Stopped,
}

impl Phase {
    /// Lowercase name exposed to JS.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mounted => "mounted",
            Self::Ready => "ready",
            Self::Running => "running",
            Self::Stopped => "stopped",
        }
    }
}

/// State changes reported back to the caller of an input handler.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    None,
    ShapeAdded { index: usize, shape: Shape },
    Cleared { removed: usize },
}

/// Core engine state — all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub doc: DrawingState,
    pub geometry: CanvasGeometry,
    phase: Phase,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self {
            doc: DrawingState::new(),
            geometry: CanvasGeometry::synced(0.0, 0.0, DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT, 1.0),
            phase: Phase::Mounted,
        }
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Lifecycle ---

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Record that a rendering context is bound.
    ///
    /// # Errors
    ///
    /// `RendererAlreadyBound` unless the engine is freshly mounted.
    pub fn bind_renderer(&mut self) -> Result<(), EngineError> {
        if self.phase != Phase::Mounted {
            return Err(EngineError::RendererAlreadyBound);
        }
        self.phase = Phase::Ready;
        Ok(())
    }

    /// Enter the running phase.
    ///
    /// # Errors
    ///
    /// `RendererNotBound` before `bind_renderer`, `AlreadyRunning` while running.
    pub fn start(&mut self) -> Result<(), EngineError> {
        match self.phase {
            Phase::Mounted => Err(EngineError::RendererNotBound),
            Phase::Running => Err(EngineError::AlreadyRunning),
            Phase::Ready | Phase::Stopped => {
                self.phase = Phase::Running;
                Ok(())
            }
        }
    }

    /// Leave the running phase. Returns whether the loop was running.
    pub fn stop(&mut self) -> bool {
        if self.phase == Phase::Running {
            self.phase = Phase::Stopped;
            true
        } else {
            false
        }
    }

    // --- Input ---

    /// Replace the layout snapshot used for coordinate mapping and framing.
    pub fn set_geometry(&mut self, geometry: CanvasGeometry) {
        self.geometry = geometry;
    }

    /// Handle a pointer press at a client-space position.
    ///
    /// A primary press inside the canvas appends one shape, synchronously, in
    /// every phase. Anything else is ignored.
    pub fn on_pointer_down(&mut self, client: Point, button: Button) -> Vec<Action> {
        if !button.is_primary() {
            return vec![Action::None];
        }
        match self.geometry.client_to_engine(client) {
            Some(at) => vec![self.add_shape_at(at)],
            None => vec![Action::None],
        }
    }

    /// Append a shape at an engine-space position.
    pub fn add_shape_at(&mut self, at: Point) -> Action {
        let index = self.doc.len();
        let shape = self.doc.add_shape(at).clone();
        Action::ShapeAdded { index, shape }
    }

    /// Remove every shape.
    pub fn clear(&mut self) -> Action {
        Action::Cleared { removed: self.doc.clear_shapes() }
    }

    // --- Queries ---

    /// Detached copy of the drawing state.
    #[must_use]
    pub fn snapshot(&self) -> DrawingState {
        self.doc.snapshot()
    }

    /// Commands for the next frame at the current geometry.
    #[must_use]
    pub fn frame(&self) -> Vec<DrawCmd> {
        render::plan_frame(
            &self.doc,
            self.geometry.logical_width(),
            self.geometry.logical_height(),
            self.geometry.dpr,
        )
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    ctx: Option<CanvasRenderingContext2d>,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        log::info!("drawing engine created");
        Self { canvas, ctx: None, core: EngineCore::new() }
    }

    // --- Lifecycle ---

    /// Bind the canvas's 2D context and size its backing store.
    ///
    /// # Errors
    ///
    /// `RendererAlreadyBound` on a second call, `ContextUnavailable` if the
    /// canvas has no 2D context.
    pub fn initialize_renderer(&mut self) -> Result<(), EngineError> {
        if self.core.phase() != Phase::Mounted {
            return Err(EngineError::RendererAlreadyBound);
        }
        let ctx = self
            .canvas
            .get_context("2d")?
            .ok_or(EngineError::ContextUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| EngineError::ContextUnavailable)?;
        self.ctx = Some(ctx);
        self.sync_viewport();
        self.core.bind_renderer()
    }

    // --- Viewport ---

    /// Read the canvas content box without changing it.
    #[must_use]
    pub fn read_geometry(&self) -> CanvasGeometry {
        let rect = self.canvas.get_bounding_client_rect();
        let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
        let border_box = CanvasGeometry {
            left: rect.left(),
            top: rect.top(),
            css_width: rect.width(),
            css_height: rect.height(),
            buffer_width: f64::from(self.canvas.width()),
            buffer_height: f64::from(self.canvas.height()),
            dpr: if dpr > 0.0 { dpr } else { 1.0 },
        };
        border_box.inset(self.content_insets())
    }

    /// Computed border and padding widths of the canvas.
    fn content_insets(&self) -> Insets {
        let style = match web_sys::window().map(|w| w.get_computed_style(&self.canvas)) {
            Some(Ok(Some(style))) => style,
            _ => return Insets::default(),
        };
        let px = |property: &str| match style.get_property_value(property) {
            Ok(value) => parse_css_px(&value),
            Err(_) => 0.0,
        };
        Insets {
            left: px("border-left-width") + px("padding-left"),
            top: px("border-top-width") + px("padding-top"),
            right: px("border-right-width") + px("padding-right"),
            bottom: px("border-bottom-width") + px("padding-bottom"),
        }
    }

    /// Resize the backing store to the CSS box times the pixel ratio.
    ///
    /// Called every frame so layout changes are picked up.
    pub fn sync_viewport(&mut self) {
        let geometry = self.read_geometry();
        let (width, height) = backing_store_size(geometry.css_width, geometry.css_height, geometry.dpr);
        if self.canvas.width() != width || self.canvas.height() != height {
            self.canvas.set_width(width);
            self.canvas.set_height(height);
        }
        self.core.set_geometry(CanvasGeometry {
            buffer_width: f64::from(width),
            buffer_height: f64::from(height),
            ..geometry
        });
    }

    // --- Input events ---

    /// Handle a `mousedown` on the canvas.
    pub fn on_mouse_down(&mut self, event: &MouseEvent) -> Vec<Action> {
        self.core.set_geometry(self.read_geometry());
        let actions = self.core.on_pointer_down(precise_client_point(event), Button::from_dom(event.button()));
        for action in &actions {
            if let Action::ShapeAdded { index, shape } = action {
                log::debug!("shape {index} added at ({}, {})", shape.x, shape.y);
            }
        }
        actions
    }

    /// Append a shape at an engine-space position.
    pub fn add_shape_at(&mut self, at: Point) -> Action {
        self.core.add_shape_at(at)
    }

    /// Remove every shape.
    pub fn clear(&mut self) -> Action {
        let action = self.core.clear();
        if let Action::Cleared { removed } = action {
            log::info!("cleared {removed} shapes");
        }
        action
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// `RendererNotBound` before `initialize_renderer`, `Js` if a canvas call throws.
    pub fn render(&self) -> Result<(), EngineError> {
        let ctx = self.ctx.as_ref().ok_or(EngineError::RendererNotBound)?;
        render::draw(ctx, &self.core.frame())?;
        Ok(())
    }

    // --- Queries ---

    /// Snapshot as a plain JS object `{ shapes: [...] }`.
    ///
    /// # Errors
    ///
    /// `Js` if serialization or `JSON.parse` fails.
    pub fn snapshot_js(&self) -> Result<JsValue, EngineError> {
        let json = self.core.snapshot().to_json().map_err(|e| EngineError::Js(e.to_string()))?;
        Ok(js_sys::JSON::parse(&json)?)
    }
}

/// Client position at full precision.
///
/// `MouseEvent.clientX` is a double in current browsers but `web_sys` exposes
/// it as `i32`; read the raw property and fall back to the integer value.
fn precise_client_point(event: &MouseEvent) -> Point {
    let read = |key: &str, fallback: i32| match js_sys::Reflect::get(event, &JsValue::from_str(key)) {
        Ok(value) => value.as_f64().unwrap_or(f64::from(fallback)),
        Err(_) => f64::from(fallback),
    };
    Point::new(read("clientX", event.client_x()), read("clientY", event.client_y()))
}
