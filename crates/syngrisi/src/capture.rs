// Capture seam between the stabilization loop and the browser driver
//
// The poller and the matcher only ever see this trait; concrete drivers
// (see `driver::chromium`) implement it for full pages and sub-elements.

use crate::environment::Environment;
use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// A renderable target that can be screenshotted.
///
/// Implemented by the driver's page/element targets, and by scripted fakes
/// in tests.
#[async_trait]
pub trait Capture: Send + Sync {
    /// Takes a screenshot of the target and returns the raw PNG buffer.
    async fn capture(&self, options: &CaptureOptions) -> Result<Vec<u8>>;

    /// Waits until the owning page has reached its `load` lifecycle state.
    async fn wait_for_load(&self, timeout: Duration) -> Result<()>;

    /// Scrolls the owning page to the bottom and back to the top, forcing
    /// lazy-loaded content to render.
    async fn scroll_through_page(&self) -> Result<()>;

    /// Viewport/OS/browser metadata of the owning page.
    async fn environment(&self) -> Result<Environment>;
}

/// Options for a single capture.
///
/// Use the builder to construct:
///
/// ```ignore
/// use syngrisi_rs::CaptureOptions;
///
/// let options = CaptureOptions::builder().full_page(true).build();
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptureOptions {
    /// Capture the full scrollable page instead of the viewport
    pub full_page: bool,
    /// Hide the default white background (transparent PNG)
    pub omit_background: bool,
}

impl CaptureOptions {
    /// Create a new builder for CaptureOptions
    pub fn builder() -> CaptureOptionsBuilder {
        CaptureOptionsBuilder::default()
    }
}

/// Builder for CaptureOptions
#[derive(Debug, Clone, Default)]
pub struct CaptureOptionsBuilder {
    full_page: bool,
    omit_background: bool,
}

impl CaptureOptionsBuilder {
    /// Capture the full scrollable page beyond the viewport
    pub fn full_page(mut self, full_page: bool) -> Self {
        self.full_page = full_page;
        self
    }

    /// Hide the default white background
    pub fn omit_background(mut self, omit_background: bool) -> Self {
        self.omit_background = omit_background;
        self
    }

    /// Build the CaptureOptions
    pub fn build(self) -> CaptureOptions {
        CaptureOptions {
            full_page: self.full_page,
            omit_background: self.omit_background,
        }
    }
}
