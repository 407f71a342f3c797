//! End-to-end harness for the drawing app.
//!
//! Scenarios drive a page through the [`driver::PageDriver`] boundary: load
//! `/`, wait for the published `window.appInstance`, click the canvas, press
//! the clear button, read `getDrawingState()`, and finally fail the run if the
//! page logged a console error outside the benign allow-list.
//!
//! Two drivers ship with the crate:
//!
//! - [`simulated::SimulatedPage`] runs the engine core in-process, so the
//!   whole suite runs under plain `cargo test`.
//! - [`webdriver::WebDriverPage`] drives a real browser through a WebDriver
//!   endpoint against a `debug-handle` build served by `sketchpad dev`.

pub mod config;
pub mod console;
pub mod driver;
pub mod error;
pub mod scenarios;
pub mod session;
pub mod simulated;
pub mod snapshot;
pub mod webdriver;

pub use config::HarnessConfig;
pub use driver::{HandleOp, PageDriver};
pub use error::HarnessError;
pub use scenarios::{Scenario, run_all, run_scenario};
pub use session::Session;
