// Browser driver integrations
//
// Each driver maps the `Capture` seam onto a concrete automation stack.

#[cfg(feature = "chromium")]
pub mod chromium;

#[cfg(feature = "chromium")]
pub use chromium::Target;
