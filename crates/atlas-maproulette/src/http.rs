//! Shared HTTP response helpers for the MapRoulette client.
//!
//! Centralizes status-code checks (429 rate limiting with `Retry-After`
//! parsing, non-success → [`MapRouletteError::Api`]) and retry timing so the
//! client methods stay focused on request construction and response mapping.

use std::time::Duration;

use atlas_config::RetryConfig;
use reqwest::StatusCode;

use crate::error::MapRouletteError;

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success. Handles:
/// - **429 Too Many Requests** → [`MapRouletteError::RateLimited`] with
///   `Retry-After` header parsing (falls back to 60 s if absent or
///   unparseable).
/// - **Non-success status** → [`MapRouletteError::Api`] with status code and
///   response body.
pub async fn check_response(
    resp: reqwest::Response,
) -> Result<reqwest::Response, MapRouletteError> {
    if resp.status() == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = parse_retry_after(&resp);
        return Err(MapRouletteError::RateLimited {
            retry_after_secs: retry_after,
        });
    }
    if !resp.status().is_success() {
        return Err(MapRouletteError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

/// Statuses worth another attempt: 429 and every 5xx.
pub fn is_retryable_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

/// Statuses that mean "no such entity" on lookup endpoints.
pub fn is_missing(status: StatusCode) -> bool {
    status == StatusCode::NOT_FOUND || status == StatusCode::NO_CONTENT
}

/// How long to wait before retry number `retry` after `error`.
///
/// Rate limiting waits as long as the server asked; everything else uses the
/// exponential backoff of `policy`. Both are capped at `policy.max_delay()`.
pub fn retry_delay(error: &MapRouletteError, policy: &RetryConfig, retry: u32) -> Duration {
    match error {
        MapRouletteError::RateLimited { retry_after_secs } => {
            Duration::from_secs(*retry_after_secs).min(policy.max_delay())
        }
        _ => policy.delay_for(retry),
    }
}

/// Parse the `Retry-After` header as seconds, falling back to 60 s.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60)
}
