// Wire types for the comparison service API
//
// Every entity here is owned and versioned by the remote service; this
// client only reads them. Field names mirror the service's JSON contract
// (camelCase, Mongo-style `_id`).

use serde::{Deserialize, Serialize};

/// The accepted reference image for a named check.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Baseline {
    #[serde(rename = "_id")]
    pub id: String,
    /// Check name this baseline was accepted for
    pub name: String,
    /// Snapshot record holding the accepted image and its hash
    pub snapshot_id: String,
}

/// A stored image record with a content hash.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(rename = "_id")]
    pub id: String,
    pub filename: String,
    /// Hex SHA-512 digest of the stored image
    pub imghash: String,
}

/// Reference to a stored snapshot inside a check result.
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotRef {
    pub filename: String,
}

/// Paginated list envelope used by the baseline and snapshot queries.
///
/// Results are ordered most-recent first.
#[derive(Debug, Deserialize)]
pub struct ResultsPage<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

/// Outcome of one submitted check.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    /// Closed status set; known members include "new", "passed", "failed"
    #[serde(default)]
    pub status: Vec<String>,
    #[serde(default)]
    pub fail_reasons: Vec<String>,
    #[serde(default)]
    pub expected_snapshot: Option<SnapshotRef>,
    #[serde(default)]
    pub current_snapshot: Option<SnapshotRef>,
    #[serde(default)]
    pub diff_snapshot: Option<SnapshotRef>,
    /// Free-form comparison payload, JSON encoded as a string
    #[serde(default)]
    pub result: Option<String>,
}

impl CheckResult {
    /// True when the check produced a first-time snapshot with no baseline
    /// to compare against.
    pub fn is_new(&self) -> bool {
        self.status.iter().any(|s| s == "new")
    }

    /// True when the comparison against the accepted baseline failed.
    pub fn is_failed(&self) -> bool {
        self.status.iter().any(|s| s == "failed")
    }
}

/// Identification of a test session on the service.
#[derive(Debug, Clone, Serialize)]
pub struct SessionParams {
    pub app: String,
    pub branch: String,
    pub test: String,
    pub run: String,
    pub runident: String,
    pub suite: String,
}

/// Remote session handle returned by `startSession`.
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    #[serde(rename = "_id")]
    pub test_id: String,
}

/// Everything submitted with one check besides the image itself.
#[derive(Debug, Clone)]
pub struct CheckParams {
    pub name: String,
    pub test_id: String,
    pub app: String,
    pub branch: String,
    pub environment: crate::environment::Environment,
    /// Content hash of the submitted image
    pub hashcode: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_result_status_helpers() {
        let parse = |status: &str| -> CheckResult {
            serde_json::from_value(serde_json::json!({
                "_id": "c1",
                "name": "Main graph",
                "status": [status],
            }))
            .unwrap()
        };

        assert!(parse("new").is_new());
        assert!(!parse("new").is_failed());
        assert!(parse("failed").is_failed());
        assert!(!parse("passed").is_failed());
        assert!(!parse("passed").is_new());
    }

    #[test]
    fn test_check_result_optional_fields_default() {
        let result: CheckResult = serde_json::from_value(serde_json::json!({
            "_id": "c2",
            "name": "Full page",
            "status": ["passed"],
        }))
        .unwrap();

        assert!(result.fail_reasons.is_empty());
        assert!(result.diff_snapshot.is_none());
        assert!(result.result.is_none());
    }

    #[test]
    fn test_check_result_full_payload() {
        let result: CheckResult = serde_json::from_value(serde_json::json!({
            "_id": "c3",
            "name": "Sales Chart",
            "status": ["failed"],
            "failReasons": ["different_images"],
            "expectedSnapshot": { "filename": "expected.png" },
            "currentSnapshot": { "filename": "actual.png" },
            "diffSnapshot": { "filename": "diff.png" },
            "result": "{\"rawMisMatchPercentage\":2.13}",
        }))
        .unwrap();

        assert_eq!(result.fail_reasons, vec!["different_images"]);
        assert_eq!(result.diff_snapshot.unwrap().filename, "diff.png");
        assert_eq!(result.expected_snapshot.unwrap().filename, "expected.png");
    }

    #[test]
    fn test_baseline_and_snapshot_deserialization() {
        let baseline: Baseline = serde_json::from_value(serde_json::json!({
            "_id": "b1",
            "name": "Main viewport",
            "snapshotId": "s1",
        }))
        .unwrap();
        assert_eq!(baseline.snapshot_id, "s1");

        let snapshot: Snapshot = serde_json::from_value(serde_json::json!({
            "_id": "s1",
            "filename": "s1.png",
            "imghash": "abc123",
        }))
        .unwrap();
        assert_eq!(snapshot.imghash, "abc123");
    }
}
