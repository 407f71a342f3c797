//! One-call page bootstrap: mount, bind the renderer, start the loop.

use wasm_bindgen::prelude::*;

use crate::error::EngineError;
use crate::handle::AppHandle;

/// Mount the app into `#main-app-container` and start it.
///
/// Returns the handle on success. On any failure the error is logged to the
/// console, the app's elements are removed, and `null` is returned.
#[wasm_bindgen(js_name = initializeApp)]
pub fn initialize_app() -> JsValue {
    match boot() {
        Ok(handle) => {
            let handle = JsValue::from(handle);
            publish_debug_handle(&handle);
            handle
        }
        Err(e) => {
            log::error!("Error initializing WASM App: {e}");
            JsValue::NULL
        }
    }
}

fn boot() -> Result<AppHandle, EngineError> {
    start_mounted(AppHandle::mount()?)
}

/// Bind the renderer and start the loop on a freshly mounted handle.
///
/// # Errors
///
/// Renderer and lifecycle errors. On failure the handle is unmounted so the
/// page is left without a canvas.
pub fn start_mounted(handle: AppHandle) -> Result<AppHandle, EngineError> {
    match handle.initialize_renderer_core().and_then(|()| handle.start_loop()) {
        Ok(()) => Ok(handle),
        Err(e) => {
            handle.unmount();
            Err(e)
        }
    }
}

/// Expose the handle as `window.appInstance` for test drivers.
#[cfg(feature = "debug-handle")]
fn publish_debug_handle(handle: &JsValue) {
    use crate::consts::DEBUG_HANDLE_SLOT;

    let Some(window) = web_sys::window() else {
        log::warn!("no window; debug handle not published");
        return;
    };
    match js_sys::Reflect::set(&window, &JsValue::from_str(DEBUG_HANDLE_SLOT), handle) {
        Ok(true) => log::debug!("debug handle published as window.{DEBUG_HANDLE_SLOT}"),
        Ok(false) | Err(_) => log::warn!("could not publish window.{DEBUG_HANDLE_SLOT}"),
    }
}

#[cfg(not(feature = "debug-handle"))]
fn publish_debug_handle(_handle: &JsValue) {}
