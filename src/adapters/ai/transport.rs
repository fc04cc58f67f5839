//! HTTP plumbing shared by the remote oracle adapters.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use tokio::time::sleep;

use crate::ports::AIError;

/// Builds the HTTP client used by a provider.
pub(crate) fn build_client(timeout: Duration) -> Result<Client, AIError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| AIError::InvalidRequest(format!("failed to build HTTP client: {}", e)))
}

/// Maps a reqwest send failure to a provider error.
///
/// The URL is stripped; error text reaches logs and HTTP clients.
pub(crate) fn send_error(err: reqwest::Error, timeout: Duration) -> AIError {
    let err = err.without_url();
    if err.is_timeout() {
        AIError::Timeout {
            timeout_secs: timeout.as_secs(),
        }
    } else if err.is_connect() {
        AIError::network(format!("Connection failed: {}", err))
    } else {
        AIError::network(err.to_string())
    }
}

/// Passes successful responses through and maps failures by status.
pub(crate) async fn check_status(response: Response) -> Result<Response, AIError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(status_error(status, body))
}

/// Maps an unsuccessful status and its body to a provider error.
pub(crate) fn status_error(status: StatusCode, body: String) -> AIError {
    match status.as_u16() {
        401 | 403 => AIError::AuthenticationFailed,
        429 => AIError::rate_limited(parse_retry_after(&body)),
        400 => AIError::InvalidRequest(body),
        500..=599 => AIError::unavailable(format!("Server error {}: {}", status, body)),
        _ => AIError::network(format!("Unexpected status {}: {}", status, body)),
    }
}

/// Parses "try again in Ns" out of an error body, defaulting to 30 seconds.
pub(crate) fn parse_retry_after(body: &str) -> u32 {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.to_string());

    message
        .find("try again in ")
        .map(|idx| &message[idx + 13..])
        .and_then(|rest| {
            let end = rest
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(rest.len());
            rest[..end].parse::<u32>().ok()
        })
        .unwrap_or(30)
}

/// Runs `attempt` until it succeeds, fails with a non-retryable error, or
/// `max_retries` retries have been spent. See [`backoff`] for the delays.
pub(crate) async fn with_retries<T, F, Fut>(max_retries: u32, mut attempt: F) -> Result<T, AIError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AIError>>,
{
    let mut retry_count = 0;

    loop {
        let err = match attempt().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        if !err.is_retryable() || retry_count >= max_retries {
            return Err(err);
        }

        let delay = backoff(&err, retry_count);
        tracing::warn!(
            error = %err,
            retry = retry_count + 1,
            delay_secs = delay.as_secs(),
            "Retrying oracle request"
        );
        sleep(delay).await;
        retry_count += 1;
    }
}

/// The server's delay for rate limits, otherwise 1s, 2s, 4s, ...
pub(crate) fn backoff(err: &AIError, retry_count: u32) -> Duration {
    match err {
        AIError::RateLimited { retry_after_secs } => {
            Duration::from_secs(u64::from(*retry_after_secs))
        }
        _ => Duration::from_secs(1 << retry_count.min(6)),
    }
}
