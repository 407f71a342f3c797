use super::*;
use crate::console::ConsoleMessage;
use crate::driver::HandleOp;
use crate::simulated::{SimulatedPage, SimulatedPageOptions};

async fn run(scenario: Scenario, options: SimulatedPageOptions) -> Result<(), HarnessError> {
    run_scenario(scenario, SimulatedPage::new(options), HarnessConfig::default()).await
}

#[tokio::test]
async fn app_initializes_passes() {
    run(Scenario::AppInitializes, SimulatedPageOptions::default()).await.unwrap();
}

#[tokio::test]
async fn click_scenario_passes() {
    run(Scenario::ClickAddsShapeAndClearRemoves, SimulatedPageOptions::default()).await.unwrap();
}

#[tokio::test]
async fn click_scenario_passes_on_hidpi_and_offset_canvas() {
    let options = SimulatedPageOptions {
        canvas_left: 13.5,
        canvas_top: 97.25,
        device_pixel_ratio: 1.5,
        ..SimulatedPageOptions::default()
    };
    run(Scenario::ClickAddsShapeAndClearRemoves, options).await.unwrap();
}

#[tokio::test]
async fn click_scenario_passes_with_favicon_noise() {
    let options = SimulatedPageOptions {
        extra_console: vec![ConsoleMessage::error("Failed to load resource: favicon.ico 404")],
        ..SimulatedPageOptions::default()
    };
    run(Scenario::ClickAddsShapeAndClearRemoves, options).await.unwrap();
}

#[tokio::test]
async fn canvas_too_small_fails_click_scenario() {
    let options = SimulatedPageOptions { css_width: 200.0, ..SimulatedPageOptions::default() };
    let err = run(Scenario::ClickAddsShapeAndClearRemoves, options).await.unwrap_err();
    match err {
        HarnessError::Assertion(text) => assert_eq!(text, "expected 2 shapes, found 1"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn hidden_canvas_fails_app_initializes() {
    let options = SimulatedPageOptions { css_height: 0.0, ..SimulatedPageOptions::default() };
    let err = run(Scenario::AppInitializes, options).await.unwrap_err();
    assert!(matches!(err, HarnessError::Assertion(text) if text.contains("canvas#drawing-canvas")));
}

#[tokio::test]
async fn console_error_fails_an_otherwise_passing_scenario() {
    let options = SimulatedPageOptions {
        extra_console: vec![ConsoleMessage::error("panicked at src/engine.rs")],
        ..SimulatedPageOptions::default()
    };
    let err = run(Scenario::AppInitializes, options).await.unwrap_err();
    assert!(matches!(err, HarnessError::UnexpectedConsoleErrors(ref e) if e.len() == 1));
    assert!(err.to_string().contains("panicked at src/engine.rs"));
}

#[tokio::test]
async fn body_error_wins_over_console_error() {
    let options = SimulatedPageOptions {
        missing_ops: [HandleOp::GetDrawingState].into_iter().collect(),
        extra_console: vec![ConsoleMessage::error("boom")],
        ..SimulatedPageOptions::default()
    };
    let err = run(Scenario::ClickAddsShapeAndClearRemoves, options).await.unwrap_err();
    assert!(matches!(err, HarnessError::MethodMissing("getDrawingState")));
}

#[tokio::test]
async fn run_all_uses_a_fresh_page_per_scenario() {
    let mut created = 0;
    let results = run_all(
        || {
            created += 1;
            Ok(SimulatedPage::new(SimulatedPageOptions::default()))
        },
        &HarnessConfig::default(),
    )
    .await;
    assert_eq!(created, 2);
    let names: Vec<_> = results.iter().map(|(s, _)| *s).collect();
    assert_eq!(names, Scenario::ALL.to_vec());
    assert!(results.iter().all(|(_, r)| r.is_ok()));
}

#[tokio::test]
async fn run_all_reports_driver_creation_failure() {
    let results = run_all(
        || Err::<SimulatedPage, _>(HarnessError::Driver("no browser".to_owned())),
        &HarnessConfig::default(),
    )
    .await;
    assert!(results.iter().all(|(_, r)| matches!(r, Err(HarnessError::Driver(_)))));
}

#[test]
fn scenario_names_match_reference_suite() {
    assert_eq!(Scenario::AppInitializes.to_string(), "application initializes and canvas is visible");
    assert_eq!(
        Scenario::ClickAddsShapeAndClearRemoves.name(),
        "clicking canvas adds a shape, and clearing removes it"
    );
}
