use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use crate::error::CaptureError;
use crate::validation::Validation;

pub const PROBE_TIMEOUT: Duration = Duration::from_secs(15);

/// Parses `source` as an absolute http(s) URL.
pub fn parse_source(source: &str) -> Result<Url, CaptureError> {
    match Url::parse(source) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(url),
        _ => Err(CaptureError::InvalidUrl(source.to_string())),
    }
}

/// Checks that `source` is a well-formed stream URL and that a single HEAD
/// probe against it answers 200.
///
/// The probe connection is not reused by the capture, which issues its own
/// GET afterwards; the source may change state in between.
pub async fn validate_source(client: &Client, source: &str) -> Validation {
    let url = match parse_source(source) {
        Ok(url) => url,
        Err(err) => return Validation::Invalid(err.to_string()),
    };

    info!(url = %url, "probing source");
    match client.head(url).timeout(PROBE_TIMEOUT).send().await {
        Ok(response) if response.status() == StatusCode::OK => Validation::Valid,
        Ok(response) => {
            debug!(status = response.status().as_u16(), "probe rejected");
            Validation::Invalid(format!(
                "Connection failed, Status: {}",
                response.status().as_u16()
            ))
        }
        Err(err) => Validation::Invalid(format!("EXCEPTION: {}", err)),
    }
}
