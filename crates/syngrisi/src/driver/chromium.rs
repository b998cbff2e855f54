// Chromium driver over the DevTools protocol
//
// Implements the `Capture` seam with chromiumoxide. A target is either a
// full page or a sub-element; both expose the same capture call, and an
// element is re-resolved on every attempt so a re-render never hands the
// poller a stale node.

use crate::capture::{Capture, CaptureOptions};
use crate::environment::{
    Environment, full_version_from_user_agent, major_version, os_name, viewport_string,
};
use crate::error::{Error, Result};
use async_trait::async_trait;
use chromiumoxide::Page;
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::cdp::js_protocol::runtime::EvaluateParams;
use chromiumoxide::page::ScreenshotParams;
use serde::Deserialize;
use std::time::{Duration, Instant};

const LOAD_POLL_INTERVAL: Duration = Duration::from_millis(100);

// Incremental scrolls so lazy-loaded content gets a chance to mount:
// down slowly, back up fast.
const SCROLL_TO_BOTTOM_JS: &str = r#"
(async () => {
    const delay = (ms) => new Promise((resolve) => setTimeout(resolve, ms));
    for (let y = 0; y <= document.body.scrollHeight; y += 100) {
        window.scrollTo(0, y);
        await delay(50);
    }
    return true;
})()
"#;

const SCROLL_TO_TOP_JS: &str = r#"
(async () => {
    const delay = (ms) => new Promise((resolve) => setTimeout(resolve, ms));
    for (let y = document.body.scrollHeight; y >= 0; y -= 100) {
        window.scrollTo(0, y);
        await delay(10);
    }
    return true;
})()
"#;

const ENVIRONMENT_PROBE_JS: &str = r#"
({
    userAgent: navigator.userAgent,
    platform: navigator.platform,
    width: window.innerWidth,
    height: window.innerHeight,
})
"#;

/// What a visual check captures: the whole page or one element.
#[derive(Clone)]
pub enum Target<'a> {
    /// The page viewport (or full scrollable page, per capture options)
    Page(&'a Page),
    /// A sub-element, located by CSS selector on every capture
    Element { page: &'a Page, selector: String },
}

impl<'a> Target<'a> {
    pub fn page(page: &'a Page) -> Self {
        Target::Page(page)
    }

    pub fn element(page: &'a Page, selector: impl Into<String>) -> Self {
        Target::Element {
            page,
            selector: selector.into(),
        }
    }

    fn owning_page(&self) -> &Page {
        match self {
            Target::Page(page) => page,
            Target::Element { page, .. } => page,
        }
    }

    async fn evaluate<T>(&self, expression: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let params = EvaluateParams::builder()
            .expression(expression)
            .await_promise(true)
            .return_by_value(true)
            .build()
            .map_err(Error::Driver)?;
        self.owning_page()
            .evaluate(params)
            .await
            .map_err(driver_err)?
            .into_value()
            .map_err(|e| Error::Driver(e.to_string()))
    }
}

fn driver_err(error: chromiumoxide::error::CdpError) -> Error {
    Error::Driver(error.to_string())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EnvironmentProbe {
    user_agent: String,
    platform: String,
    width: u32,
    height: u32,
}

#[async_trait]
impl Capture for Target<'_> {
    async fn capture(&self, options: &CaptureOptions) -> Result<Vec<u8>> {
        match self {
            Target::Page(page) => {
                let params = ScreenshotParams::builder()
                    .format(CaptureScreenshotFormat::Png)
                    .full_page(options.full_page)
                    .omit_background(options.omit_background)
                    .build();
                page.screenshot(params).await.map_err(driver_err)
            }
            Target::Element { page, selector } => {
                let element = page.find_element(selector.as_str()).await.map_err(driver_err)?;
                element
                    .screenshot(CaptureScreenshotFormat::Png)
                    .await
                    .map_err(driver_err)
            }
        }
    }

    async fn wait_for_load(&self, timeout: Duration) -> Result<()> {
        let start = Instant::now();
        loop {
            let state: String = self.evaluate("document.readyState").await?;
            if state == "complete" {
                return Ok(());
            }
            if start.elapsed() >= timeout {
                return Err(Error::Timeout(format!(
                    "page did not reach the 'load' state within {timeout:?}"
                )));
            }
            tokio::time::sleep(LOAD_POLL_INTERVAL).await;
        }
    }

    async fn scroll_through_page(&self) -> Result<()> {
        self.evaluate::<bool>(SCROLL_TO_BOTTOM_JS).await?;
        self.evaluate::<bool>(SCROLL_TO_TOP_JS).await?;
        Ok(())
    }

    async fn environment(&self) -> Result<Environment> {
        let probe: EnvironmentProbe = self.evaluate(ENVIRONMENT_PROBE_JS).await?;
        let full_version = full_version_from_user_agent(&probe.user_agent).unwrap_or_default();
        Ok(Environment {
            viewport: viewport_string(probe.width, probe.height),
            os: os_name(&probe.platform),
            browser_version: major_version(&full_version),
            browser_full_version: full_version,
        })
    }
}
