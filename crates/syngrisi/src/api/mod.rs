// API surface of the remote comparison service

mod client;
mod types;

pub use client::ApiClient;
pub use types::{
    Baseline, CheckParams, CheckResult, ResultsPage, Session, SessionParams, Snapshot, SnapshotRef,
};
