// Stabilization-Poller
//
// Produces a screenshot of a target only once its rendering has settled
// relative to the last accepted baseline, to avoid false-positive diffs
// from animation, lazy loading, or font settling.

use crate::api::ApiClient;
use crate::capture::{Capture, CaptureOptions};
use crate::error::{Error, Result};
use crate::hash::content_hash;
use std::time::{Duration, Instant};

/// Maximum capture/compare attempts before giving up.
pub const DEFAULT_ATTEMPTS: u32 = 50;

/// Wall-clock bound on the whole polling loop.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(20_000);

/// Warm-up delay before the single capture of a first-time check.
pub const DEFAULT_WARMUP: Duration = Duration::from_millis(7_000);

/// Bounds for the stabilization loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StabilizeOptions {
    /// Attempt budget (each attempt is one fresh capture)
    pub attempts: u32,
    /// Overall wall-clock timeout; whichever bound is hit first ends the loop
    pub timeout: Duration,
    /// Delay before capturing when no baseline exists yet
    pub warmup: Duration,
}

impl Default for StabilizeOptions {
    fn default() -> Self {
        Self {
            attempts: DEFAULT_ATTEMPTS,
            timeout: DEFAULT_TIMEOUT,
            warmup: DEFAULT_WARMUP,
        }
    }
}

impl StabilizeOptions {
    /// Sets the attempt budget.
    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts;
        self
    }

    /// Sets the wall-clock timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the first-time warm-up delay.
    pub fn with_warmup(mut self, warmup: Duration) -> Self {
        self.warmup = warmup;
        self
    }
}

/// How the capture was obtained.
///
/// `Exhausted` is not an error: the caller proceeds with the last capture
/// and accepts a possible false mismatch from the comparison service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stabilization {
    /// No baseline existed; a single capture was taken after the warm-up
    FirstRun(Vec<u8>),
    /// The capture's hash matched the accepted baseline's hash
    Stable(Vec<u8>),
    /// Neither bound yielded a match; this is the last capture taken
    Exhausted(Vec<u8>),
}

impl Stabilization {
    /// True only for a hash-confirmed capture.
    pub fn is_stable(&self) -> bool {
        matches!(self, Stabilization::Stable(_))
    }

    /// Consumes the result, returning the image buffer.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Stabilization::FirstRun(buf)
            | Stabilization::Stable(buf)
            | Stabilization::Exhausted(buf) => buf,
        }
    }
}

/// Captures the target once its rendering matches the accepted baseline.
///
/// With a full-page capture requested, first scrolls the page end to end
/// and waits for the `load` signal so lazy content is rendered before any
/// attempt.
///
/// Without a baseline for `check_name` this is a first-time check: after
/// the `load` signal and a fixed warm-up delay a single capture is
/// returned, with no hash comparison.
///
/// With a baseline, the loop captures, hashes, and re-fetches the
/// baseline's snapshot hash each attempt (the baseline may be re-accepted
/// while we poll). The loop is bounded by `options.attempts` and
/// `options.timeout`, whichever is reached first; there is no artificial
/// delay between attempts.
pub async fn stabilized_capture<T>(
    client: &ApiClient,
    check_name: &str,
    target: &T,
    capture_options: &CaptureOptions,
    options: &StabilizeOptions,
) -> Result<Stabilization>
where
    T: Capture + ?Sized,
{
    if capture_options.full_page {
        target.scroll_through_page().await?;
        target.wait_for_load(options.timeout).await?;
    }

    let Some(baseline) = client.latest_baseline(check_name).await? else {
        tracing::warn!(
            check = check_name,
            warmup_ms = options.warmup.as_millis() as u64,
            "baseline not found, assuming this is a first snapshot"
        );
        target.wait_for_load(options.timeout).await?;
        tokio::time::sleep(options.warmup).await;
        let buffer = target.capture(capture_options).await?;
        return Ok(Stabilization::FirstRun(buffer));
    };

    // One up-front fetch so a dangling snapshot reference fails fast
    // instead of burning the whole attempt budget.
    let snapshot_id = baseline.snapshot_id;
    client
        .snapshot(&snapshot_id)
        .await?
        .ok_or_else(|| Error::SnapshotNotFound(snapshot_id.clone()))?;

    let start = Instant::now();
    let mut attempt = 0u32;
    let mut last: Option<Vec<u8>> = None;

    while attempt < options.attempts && start.elapsed() < options.timeout {
        attempt += 1;
        let buffer = target.capture(capture_options).await?;
        let actual_hash = content_hash(&buffer);

        let accepted = client.snapshot(&snapshot_id).await?;
        match accepted {
            Some(snapshot) if snapshot.imghash == actual_hash => {
                tracing::debug!(check = check_name, attempt, "capture hash matches baseline");
                return Ok(Stabilization::Stable(buffer));
            }
            _ => {
                tracing::trace!(check = check_name, attempt, "hashes are not equal");
                last = Some(buffer);
            }
        }
    }

    tracing::warn!(
        check = check_name,
        attempts = attempt,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "stabilization budget exhausted, using the last capture as-is"
    );
    match last {
        Some(buffer) => Ok(Stabilization::Exhausted(buffer)),
        // Degenerate bounds (zero attempts or an already-expired timeout)
        // still owe the caller a buffer.
        None => Ok(Stabilization::Exhausted(target.capture(capture_options).await?)),
    }
}
