// src/checker/http.rs
// =============================================================================
// This module checks if a bookmark URL is alive by sending it a HEAD request.
//
// Key functionality:
// - Refuses to send anything for URLs that don't parse
// - One HEAD request per URL (no body download, no GET fallback, no retry)
// - Follows redirects, so the verdict is about the final page
// - Bounded by a per-request timeout (10 seconds by default)
//
// Rust concepts:
// - async/await: For non-blocking network I/O
// - Instant: a monotonic clock for measuring response time
// - match on Result: every failure becomes an Invalid outcome, never a panic
// =============================================================================

use super::{CheckOutcome, CheckerError, UrlChecker, Verdict};
use crate::config::Config;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Instant;
use tracing::debug;
use url::Url;

// Probes URLs directly from this process
//
// Holds one reqwest Client for the whole run. Client is an Arc internally,
// so all probes in a batch share its connection pool.
#[derive(Debug, Clone)]
pub struct HttpChecker {
    client: Client,
}

impl HttpChecker {
    /// Builds a checker with the timeout, redirect limit and user agent
    /// from `config`
    pub fn new(config: &Config) -> crate::error::Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self::from_client(client))
    }

    pub fn from_client(client: Client) -> Self {
        HttpChecker { client }
    }
}

#[async_trait]
impl UrlChecker for HttpChecker {
    // Checks a single URL
    //
    // Never returns Err: a direct probe has no "service" that can fail,
    // only the target URL.
    async fn check(&self, url: &str) -> Result<CheckOutcome, CheckerError> {
        // Step 1: anything that isn't a well-formed absolute URL is rejected
        // without touching the network
        let parsed = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(e) => {
                debug!(url, error = %e, "rejecting malformed url");
                return Ok(CheckOutcome::malformed(url));
            }
        };

        // Step 2: one HEAD request, timed from just before sending until
        // the response (or error) arrives
        let started = Instant::now();
        let result = self.client.head(parsed).send().await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        let outcome = match result {
            Ok(response) => analyze_response(url, response.status(), elapsed_ms),
            Err(e) => categorize_error(url, &e, elapsed_ms),
        };

        debug!(
            url,
            valid = outcome.is_valid(),
            status_code = ?outcome.status_code,
            elapsed_ms,
            "probe finished"
        );
        Ok(outcome)
    }
}

// Turns the final HTTP status into a verdict
//
// Redirects were already followed by the client, so only 2xx counts as
// valid. A 3xx here means the redirect chain ended on a redirect without a
// usable Location, which is not a working bookmark.
fn analyze_response(url: &str, status: StatusCode, elapsed_ms: u64) -> CheckOutcome {
    if status.is_success() {
        CheckOutcome {
            url: url.to_string(),
            status: Verdict::Valid,
            status_code: Some(status.as_u16()),
            error_message: None,
            response_time_ms: elapsed_ms,
        }
    } else {
        CheckOutcome {
            url: url.to_string(),
            status: Verdict::Invalid,
            status_code: Some(status.as_u16()),
            error_message: Some(http_error_message(status)),
            response_time_ms: elapsed_ms,
        }
    }
}

// "HTTP 404 Not Found", or just "HTTP 599" for codes without a known reason
fn http_error_message(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("HTTP {} {}", status.as_u16(), reason),
        None => format!("HTTP {}", status.as_u16()),
    }
}

// Describes a request that never produced a response
//
// reqwest errors can happen for many reasons: timeout, DNS failure,
// refused connection, TLS problems, redirect loops. The message is always
// the underlying error text; timeouts and redirect loops get a short label
// in front of it.
fn categorize_error(url: &str, error: &reqwest::Error, elapsed_ms: u64) -> CheckOutcome {
    let message = if error.is_timeout() {
        format!("Request timed out: {}", error)
    } else if error.is_redirect() {
        format!("Too many redirects: {}", error)
    } else {
        error.to_string()
    };

    CheckOutcome {
        url: url.to_string(),
        status: Verdict::Invalid,
        status_code: None,
        error_message: Some(message),
        response_time_ms: elapsed_ms,
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why HEAD and not GET?
//    - HEAD asks for headers only, so a dead-link check doesn't download
//      every page in someone's bookmark file
//    - Some servers answer HEAD with 405; that shows up as an invalid
//      bookmark with "HTTP 405 Method Not Allowed", which is honest
//
// 2. Why `as u64` on the elapsed milliseconds?
//    - Duration::as_millis() returns u128
//    - A probe is capped by the timeout, so it always fits in a u64
// -----------------------------------------------------------------------------
