// Process-wide configuration for the comparison service connection
//
// Loaded once at startup (usually from the environment) and passed by
// reference into every session; never mutated afterwards.

use crate::error::{Error, Result};
use std::path::PathBuf;
use url::Url;

/// Connection and identification settings for a visual test run.
///
/// Typically built once per process with [`Config::from_env`] and shared
/// across all test sessions of the run.
///
/// # Example
///
/// ```ignore
/// use syngrisi_rs::Config;
///
/// let config = Config::new("http://localhost:3000", "SECRET_API_KEY")?;
/// let from_env = Config::from_env()?; // reads SYNGRISI_* variables
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the comparison service, always with a trailing slash
    pub base_url: Url,
    /// API key sent with every request
    pub api_key: String,
    /// Application (project) name checks are filed under
    pub project: String,
    /// Branch name for baseline scoping
    pub branch: String,
    /// Human-readable run name
    pub run_name: String,
    /// Unique identifier of this run
    pub run_ident: String,
    /// Directory where diff/expected/actual images are written on failure
    pub artifacts_dir: PathBuf,
}

impl Config {
    /// Creates a config with the given service URL and API key and default
    /// project/branch/run identification.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            api_key: api_key.to_string(),
            project: "Demo App".to_string(),
            branch: "main".to_string(),
            run_name: "local run".to_string(),
            run_ident: uuid::Uuid::new_v4().to_string(),
            artifacts_dir: PathBuf::from("target/visual-artifacts"),
        })
    }

    /// Loads the configuration from `SYNGRISI_*` environment variables.
    ///
    /// - `SYNGRISI_URL` (default `http://localhost:3000/`)
    /// - `SYNGRISI_API_KEY` (required)
    /// - `SYNGRISI_PROJECT` (default `Demo App`)
    /// - `SYNGRISI_BRANCH` (default `main`)
    /// - `SYNGRISI_RUN_NAME` (default `local run`)
    /// - `SYNGRISI_RUN_IDENT` (default: random UUID v4)
    /// - `SYNGRISI_ARTIFACTS_DIR` (default `target/visual-artifacts`)
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("SYNGRISI_API_KEY")
            .map_err(|_| Error::Config("SYNGRISI_API_KEY is not set".to_string()))?;
        let base_url =
            std::env::var("SYNGRISI_URL").unwrap_or_else(|_| "http://localhost:3000/".to_string());

        let mut config = Self::new(&base_url, &api_key)?;
        if let Ok(project) = std::env::var("SYNGRISI_PROJECT") {
            config.project = project;
        }
        if let Ok(branch) = std::env::var("SYNGRISI_BRANCH") {
            config.branch = branch;
        }
        if let Ok(run_name) = std::env::var("SYNGRISI_RUN_NAME") {
            config.run_name = run_name;
        }
        if let Ok(run_ident) = std::env::var("SYNGRISI_RUN_IDENT") {
            config.run_ident = run_ident;
        }
        if let Ok(dir) = std::env::var("SYNGRISI_ARTIFACTS_DIR") {
            config.artifacts_dir = PathBuf::from(dir);
        }
        Ok(config)
    }
}

/// Parses the base URL and guarantees a trailing slash so that relative
/// joins (`v1/client/...`, `snapshoots/...`) resolve under it.
fn normalize_base_url(raw: &str) -> Result<Url> {
    let mut candidate = raw.to_string();
    if !candidate.ends_with('/') {
        candidate.push('/');
    }
    Ok(Url::parse(&candidate)?)
}
