//! HTTP response handling shared by the resource clients.
//!
//! Normalizes non-2xx responses into [`ApiError::Api`] with a message and
//! status code, mirroring the remote's `{"detail": ...}` error body
//! convention. Empty (204) responses are accepted without ever touching
//! the body.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Substituted when a non-2xx body cannot be parsed as JSON.
const PARSE_FAILURE_MESSAGE: &str = "Error parsing response body as JSON.";

/// Error body shape returned by the remote on failure. `detail` is
/// optional; absence is tolerated.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<String>,
}

/// Parses a 2xx response body as JSON, or fails with the normalized error.
///
/// # Errors
///
/// Returns [`ApiError::Api`] for non-2xx responses and [`ApiError::Http`]
/// if the body cannot be read or decoded.
pub async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let response = fail_on_status(response).await?;
    Ok(response.json().await?)
}

/// Accepts a 2xx response without reading its body (204 handling).
///
/// # Errors
///
/// Returns [`ApiError::Api`] for non-2xx responses.
pub async fn read_no_content(response: reqwest::Response) -> Result<(), ApiError> {
    fail_on_status(response).await.map(drop)
}

/// Passes 2xx responses through; converts anything else into
/// [`ApiError::Api`].
///
/// The message is the body's `detail` field when present, `"HTTP {status}"`
/// when absent, and a fixed substitute when the body is not valid JSON.
/// Best-effort body parsing never raises a secondary error.
async fn fail_on_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let code = status.as_u16();
    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.detail.unwrap_or_else(|| format!("HTTP {code}")),
        Err(_) => PARSE_FAILURE_MESSAGE.to_string(),
    };

    Err(ApiError::Api {
        status: code,
        message,
    })
}
