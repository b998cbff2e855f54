//! syngrisi-rs: visual regression checks for Rust browser tests
//!
//! This crate glues a browser automation driver to a Syngrisi-style visual
//! comparison service. The service owns baselines, snapshots, and the diff
//! algorithm; this crate owns the test-side workflow: a session fixture, a
//! stabilization poller that waits for rendering to settle before capturing,
//! and a `to_match_baseline` matcher that files the check and turns the
//! service's verdict into a pass or a failure with attached diff images.
//!
//! # Examples
//!
//! ## A simple viewport and element check
//!
//! ```ignore
//! use chromiumoxide::{Browser, BrowserConfig};
//! use futures::StreamExt;
//! use syngrisi_rs::{Config, Target, TestMeta, VisualSession};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (browser, mut handler) = Browser::launch(BrowserConfig::builder().build()?).await?;
//!     tokio::spawn(async move { while handler.next().await.is_some() {} });
//!
//!     let page = browser.new_page("https://viktor-silakov.github.io/syngrisi-demo-app/").await?;
//!
//!     let config = Config::from_env()?;
//!     let session = VisualSession::start(
//!         config,
//!         TestMeta::new("Simple feature", "Simple viewport and element visual test"),
//!     )
//!     .await?;
//!
//!     session
//!         .expect(&Target::element(&page, "#graph"))
//!         .to_match_baseline("Main graph")
//!         .await?;
//!     session
//!         .expect(&Target::page(&page))
//!         .to_match_baseline("Main viewport")
//!         .await?;
//!
//!     session.stop().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Full-page capture
//!
//! Full-page checks scroll the page end to end first so lazy-loaded content
//! is rendered before the stabilization loop starts:
//!
//! ```ignore
//! use syngrisi_rs::{CaptureOptions, Target};
//!
//! session
//!     .expect(&Target::page(&page))
//!     .with_options(CaptureOptions::builder().full_page(true).build())
//!     .to_match_baseline("Full page")
//!     .await?;
//! ```
//!
//! ## Bringing your own driver
//!
//! Everything upstream of the service is generic over the [`Capture`] trait;
//! disable the default `chromium` feature and implement it for your own
//! automation stack.

pub mod api;
mod artifacts;
mod assertions;
mod capture;
mod config;
pub mod driver;
mod environment;
mod error;
mod hash;
mod profile;
mod session;
mod stabilize;

// Re-export error types
pub use error::{Error, Result};

// Re-export the session fixture and the expect API
pub use assertions::{CheckOutcome, VisualExpectation};
pub use session::{TestMeta, VisualSession};

// Re-export the capture seam
pub use capture::{Capture, CaptureOptions, CaptureOptionsBuilder};

// Re-export stabilization types
pub use stabilize::{
    DEFAULT_ATTEMPTS, DEFAULT_TIMEOUT, DEFAULT_WARMUP, Stabilization, StabilizeOptions,
    stabilized_capture,
};

// Re-export configuration and environment metadata
pub use config::Config;
pub use environment::Environment;

// Re-export artifact storage
pub use artifacts::{ArtifactKind, ArtifactStore};

// Re-export browser profiles
pub use profile::{BrowserProfile, ViewportSize};

// Re-export image hashing
pub use hash::content_hash;

// Re-export the chromium target when the driver is enabled
#[cfg(feature = "chromium")]
pub use driver::chromium::Target;
