// Advanced feature: checks against intentionally breakable versions of
// the demo application.
//
// Append ?version=1 to the URLs below to break the graph and see the
// checks fail with attached diff images.
//
// Needs a running comparison service and a Chrome/Chromium binary:
//   SYNGRISI_URL=http://localhost:3000/ SYNGRISI_API_KEY=... \
//     cargo run --example advanced_checks

use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use syngrisi_rs::{BrowserProfile, CaptureOptions, Config, Target, TestMeta, VisualSession};

const DEMO_APP: &str = "https://viktor-silakov.github.io/syngrisi-demo-app/?version=0";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let (mut browser, mut handler) =
        Browser::launch(BrowserConfig::builder().build().map_err(anyhow::Error::msg)?).await?;
    tokio::spawn(async move { while handler.next().await.is_some() {} });

    let config = Config::from_env()?;

    graph_check(&browser, &config).await?;
    about_page_check(&browser, &config).await?;

    browser.close().await?;
    Ok(())
}

/// Graph Visual Checking - Broken Data
async fn graph_check(browser: &Browser, config: &Config) -> anyhow::Result<()> {
    let page = new_demo_page(browser, DEMO_APP).await?;
    let session = VisualSession::start(
        config.clone(),
        TestMeta::new("Advanced feature", "Graph Visual Checking - Broken Data"),
    )
    .await?;

    session
        .expect(&Target::element(&page, "#graph"))
        .to_match_baseline("Sales Chart")
        .await?;

    session.stop().await?;
    Ok(())
}

/// Full Page Visual Checking - Text extra dot
async fn about_page_check(browser: &Browser, config: &Config) -> anyhow::Result<()> {
    let page = new_demo_page(browser, DEMO_APP).await?;
    // Navigate to the About page and wait for its heading to mount
    page.find_xpath("//a[normalize-space(text())='About']")
        .await?
        .click()
        .await?;
    page.find_xpath("//h1[contains(text(), 'Lorem ipsum')]").await?;

    let session = VisualSession::start(
        config.clone(),
        TestMeta::new("Advanced feature", "Full Page Visual Checking - Text extra dot"),
    )
    .await?;

    session
        .expect(&Target::page(&page))
        .with_options(CaptureOptions::builder().full_page(true).build())
        .to_match_baseline("About - full page")
        .await?;

    session.stop().await?;
    Ok(())
}

async fn new_demo_page(browser: &Browser, url: &str) -> anyhow::Result<Page> {
    let page = browser.new_page("about:blank").await?;
    BrowserProfile::desktop_chrome().apply(&page).await?;
    page.goto(url).await?;
    Ok(page)
}
