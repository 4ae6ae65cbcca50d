//! Response handling shared by the provider clients.

use reqwest::{Client, Response};
use storyteller_core::generation::GenerationError;

/// Builds the HTTP client shared by every provider.
///
/// TODO: set a request timeout here once a per-request budget is agreed; a
/// hung provider call currently hangs the whole HTTP request.
#[must_use]
pub fn default_client() -> Client {
    Client::new()
}

/// Converts a transport error into a `GenerationError`.
pub(crate) fn transport_error(err: &reqwest::Error) -> GenerationError {
    GenerationError::Http(err.to_string())
}

/// Passes a successful response through and turns any other status into
/// `GenerationError::Status` carrying the response body.
pub(crate) async fn ensure_success(response: Response) -> Result<Response, GenerationError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(GenerationError::Status {
        status: status.as_u16(),
        body,
    })
}
