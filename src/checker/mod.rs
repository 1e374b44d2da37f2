// src/checker/mod.rs
// =============================================================================
// This module contains all URL checking logic.
//
// Submodules:
// - http: probes a URL directly with a HEAD request
// - remote: asks a remote "check-url" service to probe on our behalf
// - batch: drives a checker over a whole bookmark set, five at a time
//
// Both probers implement the UrlChecker trait, so the orchestrator doesn't
// care where the request actually comes from.
//
// Rust concepts:
// - Traits: a shared interface for different implementations
// - async-trait: async fn in a trait that can live in a Box<dyn ...>
// - thiserror: typed errors for the service-level failure case
// =============================================================================

mod batch;
mod http;
mod remote;

pub use batch::{BatchOrchestrator, RunEvent};
pub use http::HttpChecker;
pub use remote::RemoteChecker;

use crate::bookmark::{Bookmark, BookmarkStatus};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The error message for URLs that can't even be parsed
pub const INVALID_URL_FORMAT: &str = "Invalid URL format";

/// Verdict of a single probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Valid,
    Invalid,
}

// Result of probing one URL
//
// This is also the wire format of the check-url service:
//   { "url": "...", "status": "valid", "statusCode": 200, "responseTimeMs": 83 }
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckOutcome {
    pub url: String,
    pub status: Verdict,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    // Older deployments of the service call this field "responseTime"
    #[serde(default, alias = "responseTime")]
    pub response_time_ms: u64,
}

impl CheckOutcome {
    /// Outcome for a URL that failed to parse; no request was made
    pub fn malformed(url: &str) -> Self {
        CheckOutcome {
            url: url.to_string(),
            status: Verdict::Invalid,
            status_code: None,
            error_message: Some(INVALID_URL_FORMAT.to_string()),
            response_time_ms: 0,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.status == Verdict::Valid
    }

    /// Copies the verdict and metadata onto a bookmark
    pub fn apply_to(self, bookmark: &mut Bookmark) {
        bookmark.status = match self.status {
            Verdict::Valid => BookmarkStatus::Valid,
            Verdict::Invalid => BookmarkStatus::Invalid,
        };
        bookmark.status_code = self.status_code;
        bookmark.error_message = self.error_message;
        bookmark.response_time_ms = Some(self.response_time_ms);
    }
}

// A failure of the checking machinery itself, not of the URL being checked
//
// "https://dead.example.com returned 404" is an Ok(CheckOutcome) with
// Verdict::Invalid. "The check service is unreachable" is a CheckerError.
#[derive(Debug, Error)]
pub enum CheckerError {
    #[error("check service request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("check service returned HTTP {status}: {body}")]
    Service { status: u16, body: String },

    #[error("could not decode check service response: {0}")]
    Decode(String),
}

/// Something that can probe a single URL
#[async_trait]
pub trait UrlChecker: Send + Sync {
    /// Probes `url`. Per-URL problems are returned as an invalid outcome;
    /// `Err` means the checker could not do its job at all.
    async fn check(&self, url: &str) -> Result<CheckOutcome, CheckerError>;
}
