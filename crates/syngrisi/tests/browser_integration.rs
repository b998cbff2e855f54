// End-to-end smoke test with a real Chromium
//
// Requires a Chrome/Chromium binary on PATH. The comparison service side
// still runs against the local mock, so only the driver integration needs
// real infrastructure. Run with: cargo test --test browser_integration -- --ignored

#![cfg(feature = "chromium")]

mod common;
mod mock_service;

use chromiumoxide::{Browser, BrowserConfig};
use futures::StreamExt;
use mock_service::MockService;
use std::time::Duration;
use syngrisi_rs::{
    CaptureOptions, Config, StabilizeOptions, Stabilization, Target, TestMeta, VisualSession,
};

const DEMO_HTML: &str = "data:text/html,<html><body>\
    <div id='graph' style='width:200px;height:100px;background:steelblue'></div>\
    <p>footer</p></body></html>";

#[tokio::test]
#[ignore = "requires a local Chrome/Chromium installation"]
async fn test_viewport_and_element_check_against_mock_service() {
    common::init_tracing();
    let mock = MockService::start().await;

    let (mut browser, mut handler) = Browser::launch(
        BrowserConfig::builder()
            .build()
            .expect("browser config"),
    )
    .await
    .expect("launch browser");
    let handler_task = tokio::spawn(async move { while handler.next().await.is_some() {} });

    let page = browser.new_page(DEMO_HTML).await.expect("open page");

    let config = Config::new(&mock.url(), "test-key").expect("config");
    let session = VisualSession::start(config, TestMeta::new("Smoke", "element and viewport"))
        .await
        .expect("session");

    let fast = StabilizeOptions::default()
        .with_attempts(3)
        .with_timeout(Duration::from_secs(5))
        .with_warmup(Duration::from_millis(100));

    // First-time checks: one real screenshot each, submitted to the mock
    let element = Target::element(&page, "#graph");
    let outcome = session
        .expect(&element)
        .with_stabilize(fast.clone())
        .to_match_baseline("Main graph")
        .await
        .expect("element check");
    assert!(!outcome.stable);

    let viewport = Target::page(&page);
    session
        .expect(&viewport)
        .with_stabilize(fast.clone())
        .with_options(CaptureOptions::builder().full_page(true).build())
        .to_match_baseline("Full page")
        .await
        .expect("full page check");

    // The poller itself also works directly against a live page
    let client = syngrisi_rs::api::ApiClient::new(
        &Config::new(&mock.url(), "test-key").expect("config"),
    )
    .expect("client");
    let result = syngrisi_rs::stabilized_capture(
        &client,
        "direct capture",
        &viewport,
        &CaptureOptions::default(),
        &fast,
    )
    .await
    .expect("stabilized capture");
    assert!(matches!(result, Stabilization::FirstRun(buffer) if !buffer.is_empty()));

    session.stop().await.expect("stop");
    browser.close().await.expect("close browser");
    handler_task.abort();
    mock.shutdown();
}
