// Artifact storage for comparison images
//
// When a check fails with a diff, the expected/actual/diff images are
// written here so CI can collect them next to the test output.

use crate::error::Result;
use std::path::{Path, PathBuf};

/// Which comparison image an artifact holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Expected,
    Actual,
    Diff,
}

impl ArtifactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Expected => "expected",
            ArtifactKind::Actual => "actual",
            ArtifactKind::Diff => "diff",
        }
    }
}

/// Writes comparison images under a single directory, one file per
/// attached image, named `{test title}-{kind}.png`.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory artifacts are written to.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes one image, creating the directory on first use.
    pub async fn attach(&self, title: &str, kind: ArtifactKind, bytes: &[u8]) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self
            .dir
            .join(format!("{}-{}.png", sanitize_title(title), kind.as_str()));
        tokio::fs::write(&path, bytes).await?;
        tracing::info!(path = %path.display(), "attached comparison artifact");
        Ok(path)
    }
}

/// Test titles contain spaces and punctuation; keep filenames portable.
fn sanitize_title(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
            out.push(c);
        } else {
            out.push('-');
        }
    }
    out
}
