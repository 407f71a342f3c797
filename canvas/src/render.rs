//! Rendering: turns the drawing state into a frame and paints it to a 2D context.
//!
//! Rendering is split in two. [`plan_frame`] is a pure function from state to
//! an ordered list of [`DrawCmd`]s; [`draw`] replays that list against a
//! [`web_sys::CanvasRenderingContext2d`]. Every frame starts from a full clear,
//! so painting the same state twice yields the same pixels.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The caller ([`crate::engine::Engine::render`]) handles the result.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::doc::DrawingState;

/// One step of a frame.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Scale logical pixels to device pixels. Always the first command.
    SetTransform { dpr: f64 },
    /// Wipe the whole logical surface.
    Clear { width: f64, height: f64 },
    /// Fill one circle.
    FillCircle { x: f64, y: f64, radius: f64, color: String },
}

/// Build the command list for one frame.
///
/// `logical_width`/`logical_height` are the canvas size in logical pixels.
#[must_use]
pub fn plan_frame(state: &DrawingState, logical_width: f64, logical_height: f64, dpr: f64) -> Vec<DrawCmd> {
    let mut cmds = Vec::with_capacity(state.len() + 2);
    cmds.push(DrawCmd::SetTransform { dpr });
    cmds.push(DrawCmd::Clear { width: logical_width, height: logical_height });
    cmds.extend(state.shapes.iter().map(|shape| DrawCmd::FillCircle {
        x: shape.x,
        y: shape.y,
        radius: shape.radius,
        color: shape.color.clone(),
    }));
    cmds
}

/// Replay a frame plan against the context.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(ctx: &CanvasRenderingContext2d, cmds: &[DrawCmd]) -> Result<(), JsValue> {
    for cmd in cmds {
        match cmd {
            DrawCmd::SetTransform { dpr } => ctx.set_transform(*dpr, 0.0, 0.0, *dpr, 0.0, 0.0)?,
            DrawCmd::Clear { width, height } => ctx.clear_rect(0.0, 0.0, *width, *height),
            DrawCmd::FillCircle { x, y, radius, color } => {
                ctx.begin_path();
                ctx.arc(*x, *y, *radius, 0.0, TAU)?;
                ctx.set_fill_style_str(color);
                ctx.fill();
            }
        }
    }
    Ok(())
}
