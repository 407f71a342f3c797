//! Click-to-draw canvas engine.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It builds the
//! app DOM inside `#main-app-container`, maps primary clicks on the canvas to
//! new circles, redraws the drawing every animation frame, and exposes a
//! read-only snapshot of the drawing for test drivers. The host JavaScript
//! layer only loads the module and calls [`bootstrap::initialize_app`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Lifecycle phases, top-level engine, and testable [`engine::EngineCore`] |
//! | [`handle`] | `AppHandle`, the only type handed to JavaScript |
//! | [`bootstrap`] | `initializeApp`: mount, bind, start in one call |
//! | [`render_loop`] | Self-rescheduling `requestAnimationFrame` loop |
//! | [`mapper`] | Client-space to engine-space coordinate mapping |
//! | [`doc`] | Drawing state and shape types |
//! | [`render`] | Frame planning and 2D-context drawing |
//! | [`input`] | Mouse button decoding |
//! | [`dom`] | DOM construction for the mounted app |
//! | [`error`] | `EngineError` and its JS conversion |
//! | [`consts`] | Element ids, palette, and radii |

pub mod bootstrap;
pub mod consts;
pub mod doc;
pub mod dom;
pub mod engine;
pub mod error;
pub mod handle;
pub mod input;
pub mod mapper;
pub mod render;
pub mod render_loop;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn on_module_load() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("logger already initialized: {e}").into());
    }
    log::info!("{}", consts::BOOT_MESSAGE);
}
