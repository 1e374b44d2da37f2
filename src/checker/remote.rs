// src/checker/remote.rs
// =============================================================================
// Client for a remote "check-url" service.
//
// Useful when probes should leave from a different network than the one
// the CLI runs on. The service does the HEAD request and answers with the
// same JSON shape as CheckOutcome:
//
//   POST <service_url>   {"url": "https://example.com"}
//   200 OK               {"url": "...", "status": "valid", "statusCode": 200,
//                         "responseTimeMs": 120}
//
// Anything other than a 2xx with a decodable body is a CheckerError: the
// service failed, not the bookmark.
// =============================================================================

use super::{CheckOutcome, CheckerError, UrlChecker};
use crate::config::Config;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

// The service gets its own 10 second probe timeout; allow some slack on top
// for the round trip to the service itself.
const SERVICE_OVERHEAD: Duration = Duration::from_secs(5);

#[derive(Debug, Serialize)]
struct CheckRequest<'a> {
    url: &'a str,
}

#[derive(Debug, Clone)]
pub struct RemoteChecker {
    client: Client,
    service_url: String,
}

impl RemoteChecker {
    pub fn new(config: &Config, service_url: &str) -> crate::error::Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout() + SERVICE_OVERHEAD)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(RemoteChecker {
            client,
            service_url: service_url.to_string(),
        })
    }
}

#[async_trait]
impl UrlChecker for RemoteChecker {
    async fn check(&self, url: &str) -> Result<CheckOutcome, CheckerError> {
        let response = self
            .client
            .post(&self.service_url)
            .json(&CheckRequest { url })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CheckerError::Service {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let outcome: CheckOutcome =
            serde_json::from_slice(&bytes).map_err(|e| CheckerError::Decode(e.to_string()))?;

        debug!(url, valid = outcome.is_valid(), "remote probe finished");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::Verdict;
    use wiremock::{
        matchers::{body_json, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    async fn checker_for(server: &MockServer) -> RemoteChecker {
        RemoteChecker::new(&Config::default(), &format!("{}/check-url", server.uri())).unwrap()
    }

    #[tokio::test]
    async fn test_decodes_service_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/check-url"))
            .and(body_json(serde_json::json!({ "url": "https://gone.example.com" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "url": "https://gone.example.com",
                "status": "invalid",
                "statusCode": 410,
                "errorMessage": "HTTP 410 Gone",
                "responseTime": 95
            })))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = checker_for(&server)
            .await
            .check("https://gone.example.com")
            .await
            .unwrap();

        assert_eq!(outcome.status, Verdict::Invalid);
        assert_eq!(outcome.status_code, Some(410));
        assert_eq!(outcome.error_message.as_deref(), Some("HTTP 410 Gone"));
        assert_eq!(outcome.response_time_ms, 95);
    }

    #[tokio::test]
    async fn test_service_error_is_checker_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let result = checker_for(&server).await.check("https://example.com").await;

        match result {
            Err(CheckerError::Service { status, body }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("expected service error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_garbage_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let result = checker_for(&server).await.check("https://example.com").await;
        assert!(matches!(result, Err(CheckerError::Decode(_))));
    }
}
