//! The JS-facing handle and the `mount` entry point.
//!
//! `AppHandle` is the only engine type JavaScript ever holds. It exposes a
//! fixed set of typed operations (`initializeRenderer`, `start`, `stop`,
//! `clear`, `addShapeAt`, `getDrawingState`, `phase`). It owns the engine, the
//! event-listener closures, and the render loop; the closures stay registered
//! for as long as the handle is alive.

use std::cell::{RefCell, RefMut};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, EventTarget, MouseEvent};

use crate::dom::{self, AppDom};
use crate::engine::Engine;
use crate::error::EngineError;
use crate::mapper::Point;
use crate::render_loop::RenderLoop;

type MouseListener = Closure<dyn FnMut(MouseEvent)>;
type ClickListener = Closure<dyn FnMut()>;

/// A mounted drawing app.
#[wasm_bindgen]
pub struct AppHandle {
    engine: Rc<RefCell<Engine>>,
    render_loop: RefCell<Option<RenderLoop>>,
    roots: Vec<Element>,
    _on_mouse_down: MouseListener,
    _on_clear: ClickListener,
}

/// Locate the host container, build the app DOM inside it, and return a handle.
///
/// # Errors
///
/// Throws if `#main-app-container` is missing or a DOM call fails.
#[wasm_bindgen(js_name = mount)]
pub fn mount_app() -> Result<AppHandle, JsValue> {
    Ok(AppHandle::mount()?)
}

impl AppHandle {
    /// Rust-side mount used by [`mount_app`] and the bootstrapper.
    ///
    /// # Errors
    ///
    /// `NoWindow`, `ContainerMissing`, or `Js` on DOM failures.
    pub fn mount() -> Result<Self, EngineError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or(EngineError::NoWindow)?;
        let AppDom { canvas, clear_button, roots } = dom::create_app_dom(&document)?;

        let engine = Rc::new(RefCell::new(Engine::new(canvas.clone())));

        let engine_for_mouse = Rc::clone(&engine);
        let on_mouse_down = Closure::wrap(Box::new(move |event: MouseEvent| {
            match engine_for_mouse.try_borrow_mut() {
                Ok(mut engine) => {
                    engine.on_mouse_down(&event);
                }
                Err(_) => log::warn!("mousedown dropped: engine busy"),
            }
        }) as Box<dyn FnMut(MouseEvent)>);
        listen(&canvas, "mousedown", on_mouse_down.as_ref())?;

        let engine_for_clear = Rc::clone(&engine);
        let on_clear = Closure::wrap(Box::new(move || match engine_for_clear.try_borrow_mut() {
            Ok(mut engine) => {
                engine.clear();
            }
            Err(_) => log::warn!("clear dropped: engine busy"),
        }) as Box<dyn FnMut()>);
        listen(&clear_button, "click", on_clear.as_ref())?;

        log::info!("app mounted");
        Ok(Self {
            engine,
            render_loop: RefCell::new(None),
            roots,
            _on_mouse_down: on_mouse_down,
            _on_clear: on_clear,
        })
    }

    fn engine_mut(&self) -> Result<RefMut<'_, Engine>, EngineError> {
        self.engine.try_borrow_mut().map_err(|_| EngineError::Busy)
    }

    /// Bind the 2D context.
    ///
    /// # Errors
    ///
    /// `RendererAlreadyBound` on a second call, `ContextUnavailable` if the
    /// canvas has no 2D context.
    pub fn initialize_renderer_core(&self) -> Result<(), EngineError> {
        self.engine_mut()?.initialize_renderer()?;
        log::info!("renderer initialized");
        Ok(())
    }

    /// Enter the running phase and schedule the first frame.
    ///
    /// # Errors
    ///
    /// Lifecycle errors from the engine, or `Js` if no frame can be requested.
    pub fn start_loop(&self) -> Result<(), EngineError> {
        self.engine_mut()?.core.start()?;
        match RenderLoop::start(Rc::clone(&self.engine)) {
            Ok(render_loop) => {
                if let Some(previous) = self.render_loop.replace(Some(render_loop)) {
                    previous.cancel();
                }
                log::info!("render loop started");
                Ok(())
            }
            Err(e) => {
                self.engine_mut()?.core.stop();
                Err(e)
            }
        }
    }

    /// Leave the running phase and cancel the queued frame.
    ///
    /// # Errors
    ///
    /// `Busy` if called from inside an engine callback.
    pub fn stop_loop(&self) -> Result<bool, EngineError> {
        let was_running = self.engine_mut()?.core.stop();
        if let Some(render_loop) = self.render_loop.borrow_mut().take() {
            render_loop.cancel();
        }
        if was_running {
            log::info!("render loop stopped");
        }
        Ok(was_running)
    }

    /// Stop the loop and take the app's elements off the page.
    ///
    /// The listener closures are freed with the handle, so nothing they were
    /// registered on may stay in the document.
    pub fn unmount(self) {
        if let Err(e) = self.stop_loop() {
            log::warn!("stopping loop on unmount failed: {e}");
        }
        for root in &self.roots {
            root.remove();
        }
        log::info!("app unmounted");
    }
}

#[wasm_bindgen]
impl AppHandle {
    /// Bind the canvas 2D context. Must be called once, after mount.
    #[wasm_bindgen(js_name = initializeRenderer)]
    pub fn initialize_renderer(&self) -> Result<(), JsValue> {
        Ok(self.initialize_renderer_core()?)
    }

    /// Start the render loop.
    #[wasm_bindgen(js_name = start)]
    pub fn start(&self) -> Result<(), JsValue> {
        Ok(self.start_loop()?)
    }

    /// Stop the render loop. Returns whether it was running.
    #[wasm_bindgen(js_name = stop)]
    pub fn stop(&self) -> Result<bool, JsValue> {
        Ok(self.stop_loop()?)
    }

    /// Remove every shape.
    #[wasm_bindgen(js_name = clear)]
    pub fn clear(&self) -> Result<(), JsValue> {
        self.engine_mut()?.clear();
        Ok(())
    }

    /// Append a shape at an engine-space coordinate.
    #[wasm_bindgen(js_name = addShapeAt)]
    pub fn add_shape_at(&self, x: f64, y: f64) -> Result<(), JsValue> {
        self.engine_mut()?.add_shape_at(Point::new(x, y));
        Ok(())
    }

    /// Snapshot of the drawing as `{ shapes: [{ x, y, radius, color }] }`.
    #[wasm_bindgen(js_name = getDrawingState)]
    pub fn get_drawing_state(&self) -> Result<JsValue, JsValue> {
        let engine = self.engine.try_borrow().map_err(|_| EngineError::Busy)?;
        Ok(engine.snapshot_js()?)
    }

    /// Current lifecycle phase: `mounted`, `ready`, `running`, or `stopped`.
    #[wasm_bindgen(getter)]
    pub fn phase(&self) -> Result<String, JsValue> {
        let engine = self.engine.try_borrow().map_err(|_| EngineError::Busy)?;
        Ok(engine.core.phase().as_str().to_owned())
    }
}

fn listen(target: &EventTarget, event: &str, callback: &JsValue) -> Result<(), EngineError> {
    target.add_event_listener_with_callback(event, callback.unchecked_ref())?;
    Ok(())
}
