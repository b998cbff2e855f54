// Test-session lifecycle fixture
//
// One VisualSession per test: started before the first check, stopped when
// the test ends. The handle is passed explicitly into every call that
// needs it; nothing is stored in process-wide state, so concurrently
// running tests never share a session.

use crate::api::{ApiClient, SessionParams};
use crate::artifacts::ArtifactStore;
use crate::assertions::VisualExpectation;
use crate::capture::Capture;
use crate::config::Config;
use crate::error::Result;

/// Identification of the test a session belongs to.
#[derive(Debug, Clone)]
pub struct TestMeta {
    pub suite: String,
    pub test: String,
}

impl TestMeta {
    pub fn new(suite: impl Into<String>, test: impl Into<String>) -> Self {
        Self {
            suite: suite.into(),
            test: test.into(),
        }
    }
}

/// A running test session on the comparison service.
///
/// # Example
///
/// ```ignore
/// use syngrisi_rs::{Config, TestMeta, VisualSession};
///
/// let config = Config::from_env()?;
/// let session = VisualSession::start(config, TestMeta::new("Simple feature", "viewport test")).await?;
///
/// session.expect(&target).to_match_baseline("Main viewport").await?;
///
/// session.stop().await?;
/// ```
#[derive(Debug)]
pub struct VisualSession {
    client: ApiClient,
    config: Config,
    meta: TestMeta,
    test_id: String,
}

impl VisualSession {
    /// Creates the API client and starts a named session on the service,
    /// tagged with the run's app/branch/run identifiers and this test's
    /// suite and title.
    pub async fn start(config: Config, meta: TestMeta) -> Result<Self> {
        let client = ApiClient::new(&config)?;
        let params = SessionParams {
            app: config.project.clone(),
            branch: config.branch.clone(),
            test: meta.test.clone(),
            run: config.run_name.clone(),
            runident: config.run_ident.clone(),
            suite: meta.suite.clone(),
        };
        let session = client.start_session(&params).await?;
        tracing::info!(
            test_id = %session.test_id,
            suite = %meta.suite,
            test = %meta.test,
            "visual test session started"
        );
        Ok(Self {
            client,
            config,
            meta,
            test_id: session.test_id,
        })
    }

    /// Ends the session on the service.
    pub async fn stop(self) -> Result<()> {
        self.client.stop_session(&self.test_id).await
    }

    /// Creates a visual expectation for a capture target.
    pub fn expect<'a, T>(&'a self, target: &'a T) -> VisualExpectation<'a, T>
    where
        T: Capture + ?Sized,
    {
        VisualExpectation::new(self, target)
    }

    pub(crate) fn client(&self) -> &ApiClient {
        &self.client
    }

    pub(crate) fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) fn meta(&self) -> &TestMeta {
        &self.meta
    }

    pub(crate) fn test_id(&self) -> &str {
        &self.test_id
    }

    pub(crate) fn artifacts(&self) -> ArtifactStore {
        ArtifactStore::new(self.config.artifacts_dir.clone())
    }
}
