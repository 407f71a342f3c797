//! Reference scenarios, each run against a fresh page load.

use std::fmt;

use canvas::consts::BOOT_MESSAGE;

use crate::config::HarnessConfig;
use crate::driver::{PageDriver, canvas_selector};
use crate::error::HarnessError;
use crate::session::Session;
use crate::snapshot::StateSnapshot;

/// Maximum distance, per axis, between a click and the recorded shape.
pub const COORDINATE_TOLERANCE: f64 = 1.0;

/// Element-relative canvas clicks driven by the click scenario.
pub const REFERENCE_CLICKS: [(f64, f64); 2] = [(100.0, 150.0), (250.0, 200.0)];

/// The scenarios every build must pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scenario {
    AppInitializes,
    ClickAddsShapeAndClearRemoves,
}

impl Scenario {
    pub const ALL: [Self; 2] = [Self::AppInitializes, Self::ClickAddsShapeAndClearRemoves];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::AppInitializes => "application initializes and canvas is visible",
            Self::ClickAddsShapeAndClearRemoves => "clicking canvas adds a shape, and clearing removes it",
        }
    }

    /// Run the scenario body against a ready session.
    ///
    /// # Errors
    ///
    /// [`HarnessError::Assertion`] on a failed check, or any driver error.
    pub async fn run_in<D: PageDriver>(self, session: &mut Session<D>) -> Result<(), HarnessError> {
        match self {
            Self::AppInitializes => app_initializes(session).await,
            Self::ClickAddsShapeAndClearRemoves => click_adds_shape_and_clear_removes(session).await,
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Load the page, run one scenario, then apply the console check.
///
/// The console check runs even when the scenario body fails; the body's error
/// wins in that case.
///
/// # Errors
///
/// Readiness, scenario, or console-cleanliness failures.
pub async fn run_scenario<D: PageDriver>(
    scenario: Scenario,
    driver: D,
    config: HarnessConfig,
) -> Result<(), HarnessError> {
    tracing::info!(%scenario, "scenario starting");
    let mut session = Session::begin(driver, config).await?;
    let body = scenario.run_in(&mut session).await;
    let finish = session.finish().await;
    match (body, finish) {
        (Err(e), finish) => {
            if let Err(console_err) = finish {
                tracing::warn!(%scenario, error = %console_err, "console check also failed");
            }
            tracing::error!(%scenario, error = %e, "scenario failed");
            Err(e)
        }
        (Ok(()), Err(e)) => {
            tracing::error!(%scenario, error = %e, "scenario failed console check");
            Err(e)
        }
        (Ok(()), Ok(())) => {
            tracing::info!(%scenario, "scenario passed");
            Ok(())
        }
    }
}

/// Run every reference scenario, each on a fresh driver from `make_driver`.
///
/// Returns one result per scenario, in [`Scenario::ALL`] order.
pub async fn run_all<D, F>(mut make_driver: F, config: &HarnessConfig) -> Vec<(Scenario, Result<(), HarnessError>)>
where
    D: PageDriver,
    F: FnMut() -> Result<D, HarnessError>,
{
    let mut results = Vec::with_capacity(Scenario::ALL.len());
    for scenario in Scenario::ALL {
        let outcome = match make_driver() {
            Ok(driver) => run_scenario(scenario, driver, config.clone()).await,
            Err(e) => Err(e),
        };
        results.push((scenario, outcome));
    }
    results
}

/// Canvas is visible and the boot message reached the console.
///
/// # Errors
///
/// [`HarnessError::Assertion`] naming the failed check.
pub async fn app_initializes<D: PageDriver>(session: &mut Session<D>) -> Result<(), HarnessError> {
    let selector = canvas_selector();
    ensure(session.is_visible(&selector).await?, || format!("`{selector}` is not visible"))?;
    let console = session.refresh_console().await?;
    ensure(console.contains_text(BOOT_MESSAGE), || {
        format!("console never logged {BOOT_MESSAGE:?}")
    })
}

/// Empty → two clicks add two shapes near the click points → clear empties.
///
/// # Errors
///
/// [`HarnessError::Assertion`] naming the failed check.
pub async fn click_adds_shape_and_clear_removes<D: PageDriver>(
    session: &mut Session<D>,
) -> Result<(), HarnessError> {
    expect_count(session, 0).await?;

    for (index, &(x, y)) in REFERENCE_CLICKS.iter().enumerate() {
        session.click_canvas(x, y).await?;
        let state = expect_count(session, index + 1).await?;
        let shape = state.shapes[index];
        ensure(shape.is_near(x, y, COORDINATE_TOLERANCE), || {
            format!(
                "shape {index} at ({}, {}) is not within {COORDINATE_TOLERANCE}px of click ({x}, {y})",
                shape.x, shape.y
            )
        })?;
    }

    session.press_clear().await?;
    expect_count(session, 0).await?;
    Ok(())
}

async fn expect_count<D: PageDriver>(session: &mut Session<D>, expected: usize) -> Result<StateSnapshot, HarnessError> {
    let state = session.drawing_state().await?;
    ensure(state.len() == expected, || {
        format!("expected {expected} shapes, found {}", state.len())
    })?;
    Ok(state)
}

fn ensure(condition: bool, message: impl FnOnce() -> String) -> Result<(), HarnessError> {
    if condition { Ok(()) } else { Err(HarnessError::Assertion(message())) }
}

#[cfg(test)]
#[path = "scenarios_test.rs"]
mod tests;
