// Assertions - the to_match_baseline matcher
//
// Provides the expect() API for visual checks: stabilize, capture, submit
// to the comparison service, and turn the result into a pass/fail outcome
// with attached comparison images.

use crate::api::{CheckParams, CheckResult};
use crate::artifacts::ArtifactKind;
use crate::capture::{Capture, CaptureOptions};
use crate::error::{Error, Result};
use crate::hash::content_hash;
use crate::session::VisualSession;
use crate::stabilize::{StabilizeOptions, stabilized_capture};
use std::time::Duration;

/// Bound on waiting for the page `load` signal before capturing.
const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_millis(20_000);

/// Successful outcome of a visual check.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    /// Check name as filed on the service
    pub name: String,
    /// Raw status set returned by the service
    pub status: Vec<String>,
    /// Link for reviewing the check in the service UI
    pub link: String,
    /// Set for "new" checks that need manual review and acceptance
    pub warning: Option<String>,
    /// Whether the submitted capture was hash-confirmed stable
    pub stable: bool,
}

impl CheckOutcome {
    /// True when the check has a "new" status awaiting review.
    pub fn is_new(&self) -> bool {
        self.status.iter().any(|s| s == "new")
    }
}

/// A pending visual expectation bound to one session and one target.
///
/// Built via [`VisualSession::expect`]:
///
/// ```ignore
/// use syngrisi_rs::CaptureOptions;
///
/// session.expect(&target).to_match_baseline("Main graph").await?;
///
/// session
///     .expect(&target)
///     .with_options(CaptureOptions::builder().full_page(true).build())
///     .to_match_baseline("Full page")
///     .await?;
/// ```
pub struct VisualExpectation<'a, T: Capture + ?Sized> {
    session: &'a VisualSession,
    target: &'a T,
    capture_options: CaptureOptions,
    stabilize: StabilizeOptions,
    load_timeout: Duration,
}

impl<'a, T: Capture + ?Sized> VisualExpectation<'a, T> {
    pub(crate) fn new(session: &'a VisualSession, target: &'a T) -> Self {
        Self {
            session,
            target,
            capture_options: CaptureOptions::default(),
            stabilize: StabilizeOptions::default(),
            load_timeout: DEFAULT_LOAD_TIMEOUT,
        }
    }

    /// Sets capture options (full page, background) for this check.
    pub fn with_options(mut self, options: CaptureOptions) -> Self {
        self.capture_options = options;
        self
    }

    /// Overrides the stabilization bounds for this check.
    pub fn with_stabilize(mut self, options: StabilizeOptions) -> Self {
        self.stabilize = options;
        self
    }

    /// Overrides the page-load wait bound for this check.
    pub fn with_load_timeout(mut self, timeout: Duration) -> Self {
        self.load_timeout = timeout;
        self
    }

    /// Runs the visual check against the named baseline.
    ///
    /// A "new" status is a soft pass: the outcome carries a warning and the
    /// check waits for manual review on the service. A "failed" status
    /// becomes [`Error::CheckFailed`] with the reported fail reasons, the
    /// review link, and the structured diff payload. Service errors are
    /// logged and re-propagated, never swallowed.
    #[allow(clippy::wrong_self_convention)]
    pub async fn to_match_baseline(self, check_name: &str) -> Result<CheckOutcome> {
        match self.run_check(check_name).await {
            Ok(outcome) => Ok(outcome),
            Err(error) => {
                tracing::error!(check = check_name, %error, "visual check errored");
                Err(error)
            }
        }
    }

    async fn run_check(self, check_name: &str) -> Result<CheckOutcome> {
        let session = self.session;
        let client = session.client();

        self.target.wait_for_load(self.load_timeout).await?;

        let stabilization = stabilized_capture(
            client,
            check_name,
            self.target,
            &self.capture_options,
            &self.stabilize,
        )
        .await?;
        let stable = stabilization.is_stable();

        let environment = self.target.environment().await?;
        let image = stabilization.into_bytes();
        let params = CheckParams {
            name: check_name.to_string(),
            test_id: session.test_id().to_string(),
            app: session.config().project.clone(),
            branch: session.config().branch.clone(),
            environment,
            hashcode: content_hash(&image),
        };
        let result = client.create_check(&params, image).await?;
        let link = client.check_link(&result.id);

        if result.diff_snapshot.is_some() {
            self.attach_comparison_images(&result).await?;
            tracing::info!(check = check_name, link = %link, "diff images attached");
        }

        let warning = if result.is_new() {
            let message = format!(
                "check '{}' has a \"new\" status, please review it and accept if everything \
                 is ok, otherwise try increasing the timeout and run it again\n{link}",
                result.name
            );
            tracing::warn!(check = check_name, "{message}");
            Some(message)
        } else {
            None
        };

        if result.is_failed() {
            return Err(failure(check_name, &result, &link));
        }

        tracing::info!(check = check_name, link = %link, "visual check passed");
        Ok(CheckOutcome {
            name: result.name,
            status: result.status,
            link,
            warning,
            stable,
        })
    }

    /// Downloads expected/actual/diff images and writes them as artifacts.
    async fn attach_comparison_images(&self, result: &CheckResult) -> Result<()> {
        let client = self.session.client();
        let store = self.session.artifacts();
        let title = &self.session.meta().test;

        let refs = [
            (ArtifactKind::Actual, &result.current_snapshot),
            (ArtifactKind::Expected, &result.expected_snapshot),
            (ArtifactKind::Diff, &result.diff_snapshot),
        ];
        for (kind, snapshot) in refs {
            if let Some(snapshot) = snapshot {
                let bytes = client.snapshot_image(&snapshot.filename).await?;
                store.attach(title, kind, &bytes).await?;
            }
        }
        Ok(())
    }
}

/// Builds the failure error, embedding reasons, link, and diff payload.
fn failure(check_name: &str, result: &CheckResult, link: &str) -> Error {
    let mut message = format!(
        "Check: '{check_name}' - failed to compare snapshots, reasons: {:?}\n{link}",
        result.fail_reasons
    );
    if let Some(raw) = result.result.as_deref() {
        // The payload is a JSON string; only show it when it carries data.
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(raw) {
            let non_empty = value.as_object().map(|o| !o.is_empty()).unwrap_or(!value.is_null());
            if non_empty {
                if let Ok(pretty) = serde_json::to_string_pretty(&value) {
                    message.push('\n');
                    message.push_str(&pretty);
                }
            }
        }
    }
    Error::CheckFailed {
        name: check_name.to_string(),
        reasons: result.fail_reasons.clone(),
        message,
    }
}
