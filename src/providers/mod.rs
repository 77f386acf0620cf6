pub mod circleci;
pub mod github;

use crate::error::{BridgeError, Result};

/// Maps a non-success response to an API error carrying the raw body.
///
/// The body read is best-effort; an unreadable body becomes an empty string.
pub(crate) async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(BridgeError::Api {
            status: status.as_u16(),
            body,
        });
    }

    Ok(response)
}
