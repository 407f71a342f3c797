//! Engine error type and its conversion at the JS boundary.

use wasm_bindgen::{JsCast, JsValue};

use crate::consts::CONTAINER_ID;

/// Failures surfaced by the engine and its lifecycle operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// `window` or `document` is not available (not running in a page).
    #[error("no global window or document")]
    NoWindow,
    /// The host page has no mount point.
    #[error("container element '{CONTAINER_ID}' not found")]
    ContainerMissing,
    /// The canvas refused to hand out a 2D context.
    #[error("failed to get 2D rendering context")]
    ContextUnavailable,
    /// `initializeRenderer` was called more than once.
    #[error("renderer already initialized")]
    RendererAlreadyBound,
    /// `start` was called before `initializeRenderer`.
    #[error("renderer not initialized; call initializeRenderer first")]
    RendererNotBound,
    /// `start` was called while the render loop is running.
    #[error("render loop already running")]
    AlreadyRunning,
    /// The engine is already borrowed by a callback further up the stack.
    #[error("engine is busy")]
    Busy,
    /// A DOM or canvas call threw.
    #[error("browser call failed: {0}")]
    Js(String),
}

impl EngineError {
    /// Wrap a thrown JS value, keeping whatever text it carries.
    #[must_use]
    pub fn from_js(value: &JsValue) -> Self {
        if let Some(text) = value.as_string() {
            return Self::Js(text);
        }
        if let Some(err) = value.dyn_ref::<js_sys::Error>() {
            return Self::Js(String::from(err.message()));
        }
        Self::Js(format!("{value:?}"))
    }
}

impl From<JsValue> for EngineError {
    fn from(value: JsValue) -> Self {
        Self::from_js(&value)
    }
}

impl From<EngineError> for JsValue {
    fn from(err: EngineError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
