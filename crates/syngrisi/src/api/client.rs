// HTTP client for the comparison service
//
// Thin call/response glue over the service's `/v1/client` API. All
// baseline and snapshot state lives on the service; nothing is cached
// here beyond the reqwest connection pool.

use crate::api::types::{
    Baseline, CheckParams, CheckResult, ResultsPage, Session, SessionParams, Snapshot,
};
use crate::config::Config;
use crate::error::{Error, Result};
use url::Url;

/// Client for the comparison service's HTTP API.
///
/// Cheap to clone is not needed; one instance is created per test session
/// and passed by reference.
#[derive(Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl ApiClient {
    /// Builds a client from the run configuration.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            http: reqwest::Client::builder().build()?,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// Maps non-success responses to `Error::Api` with the response body as
    /// the message.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(Error::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// Starts a named test session on the service.
    pub async fn start_session(&self, params: &SessionParams) -> Result<Session> {
        let response = self
            .http
            .post(self.endpoint("v1/client/startSession")?)
            .header("apikey", &self.api_key)
            .json(params)
            .send()
            .await?;
        let session: Session = Self::ensure_success(response).await?.json().await?;
        tracing::debug!(test_id = %session.test_id, test = %params.test, "session started");
        Ok(session)
    }

    /// Ends the session identified by `test_id`.
    pub async fn stop_session(&self, test_id: &str) -> Result<()> {
        let response = self
            .http
            .post(self.endpoint(&format!("v1/client/stopSession/{test_id}"))?)
            .header("apikey", &self.api_key)
            .send()
            .await?;
        Self::ensure_success(response).await?;
        tracing::debug!(test_id, "session stopped");
        Ok(())
    }

    /// Queries baselines for a check name, most recent first.
    pub async fn baselines(&self, name: &str) -> Result<Vec<Baseline>> {
        let response = self
            .http
            .get(self.endpoint("v1/client/baselines")?)
            .header("apikey", &self.api_key)
            .query(&[("name", name)])
            .send()
            .await?;
        let page: ResultsPage<Baseline> = Self::ensure_success(response).await?.json().await?;
        Ok(page.results)
    }

    /// Most recent accepted baseline for a check name, if any.
    pub async fn latest_baseline(&self, name: &str) -> Result<Option<Baseline>> {
        Ok(self.baselines(name).await?.into_iter().next())
    }

    /// Fetches a snapshot record by its identifier.
    pub async fn snapshot(&self, id: &str) -> Result<Option<Snapshot>> {
        let response = self
            .http
            .get(self.endpoint("v1/client/snapshots")?)
            .header("apikey", &self.api_key)
            .query(&[("_id", id)])
            .send()
            .await?;
        let page: ResultsPage<Snapshot> = Self::ensure_success(response).await?.json().await?;
        Ok(page.results.into_iter().next())
    }

    /// Submits a check: the image buffer plus environment metadata, as a
    /// multipart form.
    pub async fn create_check(&self, params: &CheckParams, image: Vec<u8>) -> Result<CheckResult> {
        let file = reqwest::multipart::Part::bytes(image)
            .file_name(format!("{}.png", params.name))
            .mime_str("image/png")?;
        let form = reqwest::multipart::Form::new()
            .text("name", params.name.clone())
            .text("testid", params.test_id.clone())
            .text("app", params.app.clone())
            .text("branch", params.branch.clone())
            .text("viewport", params.environment.viewport.clone())
            .text("os", params.environment.os.clone())
            .text("browserVersion", params.environment.browser_version.clone())
            .text(
                "browserFullVersion",
                params.environment.browser_full_version.clone(),
            )
            .text("hashcode", params.hashcode.clone())
            .part("file", file);

        let response = self
            .http
            .post(self.endpoint("v1/client/createCheck")?)
            .header("apikey", &self.api_key)
            .multipart(form)
            .send()
            .await?;
        let result: CheckResult = Self::ensure_success(response).await?.json().await?;
        tracing::debug!(check = %result.name, status = ?result.status, "check submitted");
        Ok(result)
    }

    /// Downloads a stored snapshot image by filename.
    ///
    /// Uses a short-lived HTTP client that is dropped as soon as the body
    /// has been read, independent of the session's pooled connections.
    pub async fn snapshot_image(&self, filename: &str) -> Result<bytes::Bytes> {
        let url = self.endpoint(&format!("snapshoots/{filename}"))?;
        let http = reqwest::Client::new();
        let response = http.get(url).header("apikey", &self.api_key).send().await?;
        Ok(Self::ensure_success(response).await?.bytes().await?)
    }

    /// Link for reviewing a check in the service UI.
    pub fn check_link(&self, check_id: &str) -> String {
        format!("{}?checkId={check_id}&modalIsOpen=true", self.base_url)
    }
}
