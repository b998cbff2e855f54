// Browser profiles for the demo specs
//
// Baselines are scoped by viewport and browser, so a profile pins the
// metrics and user agent a run captures under. The presets mirror the
// desktop projects visual runs are usually configured with.

use crate::error::Result;

/// A viewport size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

/// Browser emulation settings applied before a visual run.
#[derive(Debug, Clone)]
pub struct BrowserProfile {
    pub name: &'static str,
    pub viewport: ViewportSize,
    pub screen: ViewportSize,
    pub device_scale_factor: f64,
    pub user_agent: String,
}

impl BrowserProfile {
    pub fn desktop_chrome() -> Self {
        Self {
            name: "chromium",
            viewport: ViewportSize { width: 1280, height: 720 },
            screen: ViewportSize { width: 1920, height: 1080 },
            device_scale_factor: 1.0,
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/119.0.6045.9 Safari/537.36"
                .to_string(),
        }
    }

    pub fn desktop_firefox() -> Self {
        Self {
            name: "firefox",
            viewport: ViewportSize { width: 1280, height: 720 },
            screen: ViewportSize { width: 1920, height: 1080 },
            device_scale_factor: 1.0,
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) Gecko/20100101 \
                         Firefox/118.0.1"
                .to_string(),
        }
    }

    pub fn desktop_safari() -> Self {
        Self {
            name: "webkit",
            viewport: ViewportSize { width: 1280, height: 720 },
            screen: ViewportSize { width: 1792, height: 1120 },
            device_scale_factor: 2.0,
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 \
                         (KHTML, like Gecko) Version/17.4 Safari/605.1.15"
                .to_string(),
        }
    }

    /// Applies viewport metrics and user agent to a page over the DevTools
    /// protocol.
    #[cfg(feature = "chromium")]
    pub async fn apply(&self, page: &chromiumoxide::Page) -> Result<()> {
        use crate::error::Error;
        use chromiumoxide::cdp::browser_protocol::emulation::{
            SetDeviceMetricsOverrideParams, SetUserAgentOverrideParams,
        };

        let metrics = SetDeviceMetricsOverrideParams::builder()
            .width(self.viewport.width as i64)
            .height(self.viewport.height as i64)
            .device_scale_factor(self.device_scale_factor)
            .mobile(false)
            .build()
            .map_err(Error::Driver)?;
        page.execute(metrics)
            .await
            .map_err(|e| Error::Driver(e.to_string()))?;

        let user_agent = SetUserAgentOverrideParams::builder()
            .user_agent(self.user_agent.clone())
            .build()
            .map_err(Error::Driver)?;
        page.execute(user_agent)
            .await
            .map_err(|e| Error::Driver(e.to_string()))?;

        tracing::debug!(profile = self.name, "browser profile applied");
        Ok(())
    }
}
