//! Build and test invocations for the workspace.

use std::path::{Path, PathBuf};

use crate::process::Invocation;

/// Name wasm-pack gives the generated JS and wasm files.
pub const PKG_OUT_NAME: &str = "app";

/// Workspace locations the tasks operate on.
#[derive(Debug, Clone)]
pub struct Paths {
    pub workspace_root: PathBuf,
    pub canvas_dir: PathBuf,
    pub static_dir: PathBuf,
    pub pkg_dir: PathBuf,
}

impl Paths {
    /// Resolve paths under `workspace_root`. `static_dir` overrides `<root>/static`.
    #[must_use]
    pub fn resolve(workspace_root: &Path, static_dir: Option<PathBuf>) -> Self {
        let static_dir = static_dir.unwrap_or_else(|| workspace_root.join("static"));
        Self {
            workspace_root: workspace_root.to_path_buf(),
            canvas_dir: workspace_root.join("canvas"),
            pkg_dir: static_dir.join("pkg"),
            static_dir,
        }
    }

    /// Generated files `serve` expects to find.
    #[must_use]
    pub fn pkg_outputs(&self) -> [PathBuf; 2] {
        [
            self.pkg_dir.join(format!("{PKG_OUT_NAME}.js")),
            self.pkg_dir.join(format!("{PKG_OUT_NAME}_bg.wasm")),
        ]
    }

    /// Generated files that are not present yet.
    #[must_use]
    pub fn missing_pkg_outputs(&self) -> Vec<PathBuf> {
        self.pkg_outputs().into_iter().filter(|p| !p.is_file()).collect()
    }
}

/// Browsers `wasm-pack test` can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Browser {
    Chrome,
    Firefox,
    Safari,
}

impl Browser {
    #[must_use]
    pub fn flag(self) -> &'static str {
        match self {
            Self::Chrome => "--chrome",
            Self::Firefox => "--firefox",
            Self::Safari => "--safari",
        }
    }

    /// Browsers tried when none is named. Safari only exists on macOS.
    #[must_use]
    pub fn platform_defaults() -> Vec<Self> {
        if cfg!(target_os = "macos") {
            vec![Self::Chrome, Self::Firefox, Self::Safari]
        } else {
            vec![Self::Chrome, Self::Firefox]
        }
    }
}

/// `wasm-pack build` for the canvas crate into `static/pkg`.
///
/// Debug builds publish `window.appInstance` for e2e drivers.
#[must_use]
pub fn wasm_build(paths: &Paths, debug: bool) -> Invocation {
    let inv = Invocation::new("wasm-pack")
        .args(["build", "--target", "web", "--out-dir"])
        .arg(paths.pkg_dir.to_string_lossy())
        .args(["--out-name", PKG_OUT_NAME])
        .current_dir(&paths.canvas_dir);
    if debug {
        inv.args(["--dev", "--features", "debug-handle"])
    } else {
        inv.arg("--release")
    }
}

/// Native unit tests for every workspace crate.
#[must_use]
pub fn native_tests(paths: &Paths) -> Invocation {
    Invocation::new("cargo")
        .args(["test", "--workspace"])
        .current_dir(&paths.workspace_root)
}

/// In-browser tests for the canvas crate.
#[must_use]
pub fn wasm_tests(paths: &Paths, browser: Browser, headless: bool) -> Invocation {
    let inv = Invocation::new("wasm-pack")
        .args(["test", browser.flag()])
        .current_dir(&paths.canvas_dir)
        .env("RUST_LOG", "warn");
    if headless { inv.arg("--headless") } else { inv }
}

/// Live-browser harness scenarios against a running server.
#[must_use]
pub fn e2e_tests(paths: &Paths, base_url: &str, webdriver_url: &str, headless: bool) -> Invocation {
    Invocation::new("cargo")
        .args(["test", "-p", "harness", "--", "--ignored", "--nocapture"])
        .current_dir(&paths.workspace_root)
        .env("HARNESS_BASE_URL", base_url)
        .env("HARNESS_WEBDRIVER_URL", webdriver_url)
        .env("HARNESS_HEADLESS", if headless { "true" } else { "false" })
}

/// Which suites `sketchpad test` runs. Naming neither runs both.
#[must_use]
pub fn test_selection(native: bool, wasm: bool) -> (bool, bool) {
    (native || !wasm, wasm || !native)
}

#[cfg(test)]
#[path = "tasks_test.rs"]
mod tests;
