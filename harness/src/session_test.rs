use std::time::Duration;

use super::*;
use crate::console::ConsoleMessage;
use crate::simulated::{SimulatedPage, SimulatedPageOptions};

fn page(options: SimulatedPageOptions) -> SimulatedPage {
    SimulatedPage::new(options)
}

#[tokio::test(start_paused = true)]
async fn begin_waits_for_handle() {
    let started = Instant::now();
    let options = SimulatedPageOptions { ready_after_polls: 5, ..SimulatedPageOptions::default() };
    let session = Session::begin(page(options), HarnessConfig::default()).await.unwrap();
    assert!(started.elapsed() >= Duration::from_millis(250));
    assert!(started.elapsed() < Duration::from_secs(1));
    session.finish().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn begin_times_out_without_handle() {
    let started = Instant::now();
    let options = SimulatedPageOptions { publish_handle: false, ..SimulatedPageOptions::default() };
    let err = Session::begin(page(options), HarnessConfig::default()).await.err().unwrap();
    assert!(matches!(err, HarnessError::ReadinessTimeout(t) if t == Duration::from_secs(10)));
    assert!(started.elapsed() >= Duration::from_secs(10));
    assert!(started.elapsed() < Duration::from_secs(11));
}

#[tokio::test(start_paused = true)]
async fn timeout_follows_config() {
    let config = HarnessConfig { ready_timeout: Duration::from_millis(200), ..HarnessConfig::default() };
    let options = SimulatedPageOptions { container_present: false, ..SimulatedPageOptions::default() };
    let err = Session::begin(page(options), config).await.err().unwrap();
    assert!(matches!(err, HarnessError::ReadinessTimeout(t) if t == Duration::from_millis(200)));
}

#[tokio::test]
async fn boot_message_is_captured() {
    let mut session = Session::begin(page(SimulatedPageOptions::default()), HarnessConfig::default()).await.unwrap();
    assert!(session.refresh_console().await.unwrap().contains_text("WASM module loaded."));
    session.finish().await.unwrap();
}

#[tokio::test]
async fn finish_ignores_benign_errors() {
    let options = SimulatedPageOptions {
        extra_console: vec![ConsoleMessage::error("GET http://127.0.0.1:8080/favicon.ico 404 (Not Found)")],
        ..SimulatedPageOptions::default()
    };
    let session = Session::begin(page(options), HarnessConfig::default()).await.unwrap();
    session.finish().await.unwrap();
}

#[tokio::test]
async fn finish_reports_critical_errors_with_text() {
    let options = SimulatedPageOptions {
        extra_console: vec![
            ConsoleMessage::error("GET /favicon.ico 404"),
            ConsoleMessage::error("Uncaught RuntimeError: unreachable"),
        ],
        ..SimulatedPageOptions::default()
    };
    let session = Session::begin(page(options), HarnessConfig::default()).await.unwrap();
    match session.finish().await {
        Err(HarnessError::UnexpectedConsoleErrors(errors)) => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].text, "Uncaught RuntimeError: unreachable");
        }
        other => panic!("expected console failure, got {other:?}"),
    }
}

#[tokio::test]
async fn custom_benign_patterns_replace_defaults() {
    let config = HarnessConfig { benign_patterns: vec!["RuntimeError".to_owned()], ..HarnessConfig::default() };
    let options = SimulatedPageOptions {
        extra_console: vec![ConsoleMessage::error("Uncaught RuntimeError: unreachable")],
        ..SimulatedPageOptions::default()
    };
    let session = Session::begin(page(options), config).await.unwrap();
    session.finish().await.unwrap();
}

#[tokio::test]
async fn drawing_state_reads_snapshot() {
    let mut session = Session::begin(page(SimulatedPageOptions::default()), HarnessConfig::default()).await.unwrap();
    assert!(session.drawing_state().await.unwrap().is_empty());
    session.click_canvas(5.0, 6.0).await.unwrap();
    let state = session.drawing_state().await.unwrap();
    assert_eq!(state.len(), 1);
    assert!(state.shapes[0].is_near(5.0, 6.0, 1.0));
    session.press_clear().await.unwrap();
    assert!(session.drawing_state().await.unwrap().is_empty());
    session.finish().await.unwrap();
}

#[tokio::test]
async fn missing_method_surfaces_through_session() {
    let options = SimulatedPageOptions {
        missing_ops: [HandleOp::GetDrawingState].into_iter().collect(),
        ..SimulatedPageOptions::default()
    };
    let mut session = Session::begin(page(options), HarnessConfig::default()).await.unwrap();
    assert!(matches!(session.drawing_state().await, Err(HarnessError::MethodMissing("getDrawingState"))));
}
