//! Self-rescheduling `requestAnimationFrame` loop.
//!
//! The loop closure holds an `Rc` of its own slot so it can re-register itself
//! every frame. Each tick checks the engine phase first: once the engine is no
//! longer [`Phase::Running`](crate::engine::Phase::Running) the tick drops its
//! own closure and does not reschedule. [`RenderLoop::cancel`] additionally
//! cancels the frame that is already queued.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use crate::engine::Engine;
use crate::error::EngineError;

type FrameClosure = Closure<dyn FnMut(f64)>;
type FrameSlot = Rc<RefCell<Option<FrameClosure>>>;

/// Handle to a started loop. Dropping it does not stop the loop; call
/// [`RenderLoop::cancel`] after moving the engine out of the running phase.
pub struct RenderLoop {
    slot: FrameSlot,
    pending: Rc<Cell<Option<i32>>>,
}

impl RenderLoop {
    /// Schedule the first frame and return the loop handle.
    ///
    /// # Errors
    ///
    /// `NoWindow` outside a page, `Js` if the first frame cannot be requested.
    pub fn start(engine: Rc<RefCell<Engine>>) -> Result<Self, EngineError> {
        let slot: FrameSlot = Rc::new(RefCell::new(None));
        let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));

        let slot_for_cb = Rc::clone(&slot);
        let pending_for_cb = Rc::clone(&pending);
        let cb = Closure::wrap(Box::new(move |_ts: f64| {
            pending_for_cb.set(None);
            if !tick(&engine) {
                slot_for_cb.borrow_mut().take();
                return;
            }
            let next = match slot_for_cb.borrow().as_ref() {
                Some(cb) => request_animation_frame(cb),
                None => return,
            };
            match next {
                Ok(id) => pending_for_cb.set(Some(id)),
                Err(e) => log::error!("render loop could not reschedule: {e}"),
            }
        }) as Box<dyn FnMut(f64)>);

        let first = request_animation_frame(&cb)?;
        pending.set(Some(first));
        *slot.borrow_mut() = Some(cb);
        Ok(Self { slot, pending })
    }

    /// Cancel the queued frame, if any, and release the loop closure.
    pub fn cancel(&self) {
        if let Some(id) = self.pending.take() {
            if let Some(window) = web_sys::window() {
                if let Err(e) = window.cancel_animation_frame(id) {
                    log::warn!("cancelAnimationFrame failed: {:?}", e);
                }
            }
        }
        self.slot.borrow_mut().take();
    }
}

/// Run one frame. Returns whether the loop should continue.
fn tick(engine: &Rc<RefCell<Engine>>) -> bool {
    let Ok(mut engine) = engine.try_borrow_mut() else {
        log::warn!("engine busy during frame; skipping");
        return true;
    };
    if !engine.core.is_running() {
        return false;
    }
    engine.sync_viewport();
    if let Err(e) = engine.render() {
        log::error!("frame render failed: {e}");
    }
    true
}

fn request_animation_frame(cb: &FrameClosure) -> Result<i32, EngineError> {
    let window = web_sys::window().ok_or(EngineError::NoWindow)?;
    Ok(window.request_animation_frame(cb.as_ref().unchecked_ref())?)
}
