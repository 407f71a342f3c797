//! DOM construction for the mounted app.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlButtonElement, HtmlCanvasElement};

use crate::consts::{CANVAS_CONTAINER_ID, CANVAS_ID, CLEAR_BUTTON_ID, CLEAR_BUTTON_LABEL, CONTAINER_ID, TOOLBAR_ID};
use crate::error::EngineError;

/// Elements created inside the host container.
pub struct AppDom {
    pub canvas: HtmlCanvasElement,
    pub clear_button: HtmlButtonElement,
    /// Top-level children appended to the host container, in order.
    pub roots: Vec<Element>,
}

/// Build `#toolbar > #clear-btn` and `#canvas-container > canvas#drawing-canvas`
/// inside the host container.
///
/// # Errors
///
/// `ContainerMissing` if the page has no `#main-app-container`, `Js` if any
/// DOM call throws.
pub fn create_app_dom(document: &Document) -> Result<AppDom, EngineError> {
    let container = document.get_element_by_id(CONTAINER_ID).ok_or(EngineError::ContainerMissing)?;

    let toolbar = document.create_element("div")?;
    toolbar.set_id(TOOLBAR_ID);

    let clear_button = document
        .create_element("button")?
        .dyn_into::<HtmlButtonElement>()
        .map_err(|e| EngineError::from_js(&e))?;
    clear_button.set_id(CLEAR_BUTTON_ID);
    clear_button.set_text_content(Some(CLEAR_BUTTON_LABEL));
    toolbar.append_child(&clear_button)?;

    let canvas_container = document.create_element("div")?;
    canvas_container.set_id(CANVAS_CONTAINER_ID);

    let canvas = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|e| EngineError::from_js(&e))?;
    canvas.set_id(CANVAS_ID);
    canvas_container.append_child(&canvas)?;

    container.append_child(&toolbar)?;
    container.append_child(&canvas_container)?;

    Ok(AppDom { canvas, clear_button, roots: vec![toolbar, canvas_container] })
}
