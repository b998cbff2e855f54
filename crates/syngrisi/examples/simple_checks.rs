// Simple feature: viewport, element, and full-page checks against the
// demo application.
//
// Needs a running comparison service and a Chrome/Chromium binary:
//   SYNGRISI_URL=http://localhost:3000/ SYNGRISI_API_KEY=... \
//     cargo run --example simple_checks

use chromiumoxide::{Browser, BrowserConfig};
use futures::StreamExt;
use syngrisi_rs::{BrowserProfile, CaptureOptions, Config, Target, TestMeta, VisualSession};

const DEMO_APP: &str = "https://viktor-silakov.github.io/syngrisi-demo-app/";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let (mut browser, mut handler) =
        Browser::launch(BrowserConfig::builder().build().map_err(anyhow::Error::msg)?).await?;
    tokio::spawn(async move { while handler.next().await.is_some() {} });

    let page = browser.new_page("about:blank").await?;
    BrowserProfile::desktop_chrome().apply(&page).await?;
    page.goto(DEMO_APP).await?;

    let session = VisualSession::start(
        Config::from_env()?,
        TestMeta::new("Simple feature", "Simple viewport and element visual test"),
    )
    .await?;

    session
        .expect(&Target::element(&page, "#graph"))
        .to_match_baseline("Main graph")
        .await?;
    session
        .expect(&Target::page(&page))
        .to_match_baseline("Main viewport")
        .await?;
    session
        .expect(&Target::page(&page))
        .with_options(CaptureOptions::builder().full_page(true).build())
        .to_match_baseline("Full page")
        .await?;

    session.stop().await?;
    browser.close().await?;
    Ok(())
}
