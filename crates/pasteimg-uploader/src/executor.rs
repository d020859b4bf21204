//! Upload executor
//!
//! Sends one prepared upload request and classifies the outcome into an
//! [`UploadResult`]. Backends wrap the hosted URL differently, so the body is
//! searched at `url`, `file.url` and `data.url`, in that order.

use pasteimg_core::{PasteError, UploadResult};
use reqwest::RequestBuilder;
use serde_json::Value;

pub const UNKNOWN_ERROR: &str = "Unknown error occurred";
pub const MISSING_URL_ERROR: &str = "Invalid response format: missing url field";

/// Perform exactly one round trip. Never returns an error: every failure is
/// folded into a failed `UploadResult`.
pub async fn execute(request: RequestBuilder) -> UploadResult {
    let response = match request.send().await {
        Ok(response) => response,
        Err(e) => return transport_failure(&e),
    };

    let status = response.status();
    if !status.is_success() {
        let message = format!(
            "Upload failed with status: {} {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("")
        )
        .trim_end()
        .to_string();
        PasteError::Protocol(message.clone()).log("Upload endpoint rejected request");
        return UploadResult::failed(message);
    }

    match response.json::<Value>().await {
        Ok(body) => normalize_response(&body),
        Err(e) => transport_failure(&e),
    }
}

/// Convert a parsed response body into an upload result.
pub fn normalize_response(body: &Value) -> UploadResult {
    match extract_url(body) {
        Some(url) => UploadResult::uploaded(url),
        None => {
            tracing::debug!(body = %body, "Upload response body");
            PasteError::Protocol(MISSING_URL_ERROR.to_string()).log("Upload response has no url");
            UploadResult::failed(MISSING_URL_ERROR)
        }
    }
}

/// First non-empty URL at `url`, `file.url` or `data.url`.
pub fn extract_url(body: &Value) -> Option<&str> {
    [
        body.get("url"),
        body.pointer("/file/url"),
        body.pointer("/data/url"),
    ]
    .into_iter()
    .flatten()
    .filter_map(Value::as_str)
    .find(|url| !url.is_empty())
}

fn transport_failure(err: &reqwest::Error) -> UploadResult {
    let message = Some(err.to_string())
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| UNKNOWN_ERROR.to_string());
    PasteError::Transport(message.clone()).log("Upload request failed");
    UploadResult::failed(message)
}
