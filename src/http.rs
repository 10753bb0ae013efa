//! Shared HTTP plumbing for the network collaborators
//!
//! The embedding and LLM adapters all speak simple JSON-over-POST
//! APIs, so the send/status-check/decode cycle lives here and the
//! adapters only describe their request and response shapes.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Build a pooled client with a per-service request timeout
pub(crate) fn api_client(timeout: Duration) -> Client {
    Client::builder()
        .pool_max_idle_per_host(4)
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .build()
        .expect("Failed to create HTTP client")
}

/// POST a JSON body and decode a JSON response
///
/// Non-success statuses become errors carrying whatever detail the
/// service put in its error body.
pub(crate) async fn post_json<Req, Resp>(
    client: &Client,
    url: &str,
    service: &str,
    body: &Req,
) -> anyhow::Result<Resp>
where
    Req: Serialize,
    Resp: DeserializeOwned,
{
    let response = client.post(url).json(body).send().await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        anyhow::bail!("{} API error {}: {}", service, status, error_detail(body));
    }

    Ok(response.json().await?)
}

/// Pull a human-readable message out of a JSON error body, falling
/// back to the raw text
fn error_detail(body: String) -> String {
    let Ok(json) = serde_json::from_str::<serde_json::Value>(&body) else {
        return body;
    };

    json.get("error")
        .and_then(|e| e.get("message"))
        .or_else(|| json.get("message"))
        .or_else(|| json.get("detail"))
        .and_then(|m| m.as_str())
        .map(|s| s.to_string())
        .unwrap_or(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_detail_extracts_nested_message() {
        let body = r#"{"error": {"message": "model not found"}}"#.to_string();
        assert_eq!(error_detail(body), "model not found");
    }

    #[test]
    fn test_error_detail_reads_flat_detail_field() {
        let body = r#"{"detail": "collection missing"}"#.to_string();
        assert_eq!(error_detail(body), "collection missing");
    }

    #[test]
    fn test_error_detail_falls_back_to_raw_body() {
        assert_eq!(error_detail("plain failure".to_string()), "plain failure");
        assert_eq!(error_detail(r#"{"other": 1}"#.to_string()), r#"{"other": 1}"#);
    }
}
