//! Shared constants for the canvas crate.

// ── DOM contract ────────────────────────────────────────────────

/// Id of the host element the app mounts into.
pub const CONTAINER_ID: &str = "main-app-container";

/// Id of the toolbar row created above the canvas.
pub const TOOLBAR_ID: &str = "toolbar";

/// Id of the clear control.
pub const CLEAR_BUTTON_ID: &str = "clear-btn";

/// Label shown on the clear control.
pub const CLEAR_BUTTON_LABEL: &str = "Clear Canvas";

/// Id of the wrapper element around the canvas.
pub const CANVAS_CONTAINER_ID: &str = "canvas-container";

/// Id of the drawing canvas.
pub const CANVAS_ID: &str = "drawing-canvas";

/// Global slot the debug build publishes the handle under.
pub const DEBUG_HANDLE_SLOT: &str = "appInstance";

// ── Console protocol ────────────────────────────────────────────

/// Logged once when the wasm module finishes loading. E2E drivers grep for it.
pub const BOOT_MESSAGE: &str = "WASM module loaded.";

// ── Shape styling ───────────────────────────────────────────────

/// Fill colors cycled by shape insertion index.
pub const SHAPE_PALETTE: [&str; 8] = [
    "#D94B4B", "#3B82F6", "#22C55E", "#F59E0B", "#A855F7", "#14B8A6", "#EC4899", "#FFEB3B",
];

/// Radii (logical pixels) cycled by shape insertion index.
pub const SHAPE_RADII: [f64; 5] = [10.0, 20.0, 30.0, 40.0, 50.0];
