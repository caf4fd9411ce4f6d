use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use std::time::Duration;
use tracing::{info, warn};

use crate::capture::{capture_stream, CaptureReport};
use crate::destination::validate_destination;
use crate::error::{CaptureError, SessionError};
use crate::output_path::build_output_path;
use crate::request::CaptureRequest;
use crate::source::{parse_source, validate_source};
use crate::validation::Validation;

pub struct Recorder {
    client: Client,
    progress: ProgressBar,
}

impl Recorder {
    pub fn new() -> Result<Self, CaptureError> {
        let client = Client::builder()
            .user_agent(concat!("rssr/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Recorder {
            client,
            progress: ProgressBar::hidden(),
        })
    }

    /// Terminal spinner showing bytes captured so far.
    pub fn with_spinner(mut self) -> Self {
        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template(
                "{spinner:.green} [{elapsed_precise}] {bytes} captured ({binary_bytes_per_sec})",
            )
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        pb.set_style(style);
        self.progress = pb;
        self
    }

    /// Runs one session: preflight both ends, name the output, capture.
    pub async fn record(&self, request: &CaptureRequest) -> Result<CaptureReport, SessionError> {
        info!(source = %request.source, "validating source");
        if let Validation::Invalid(reason) = validate_source(&self.client, &request.source).await {
            return Err(SessionError::InvalidSource(reason));
        }

        info!(dir = %request.destination.display(), "validating destination");
        if let Validation::Invalid(reason) = validate_destination(&request.destination) {
            return Err(SessionError::InvalidDestination(reason));
        }

        let source = parse_source(&request.source)?;
        let dir = std::path::absolute(&request.destination).map_err(CaptureError::from)?;
        let output = build_output_path(
            &dir,
            request.name.as_deref(),
            request.extension.as_deref(),
            Local::now().naive_local(),
        );
        info!(path = %output.display(), "capturing to file");
        self.progress.enable_steady_tick(Duration::from_millis(100));

        let result =
            capture_stream(&self.client, &source, &output, request.duration, &self.progress)
                .await;
        self.progress.finish_and_clear();

        result.map_err(|err| {
            if output.exists() {
                warn!(
                    path = %output.display(),
                    error = %err,
                    "capture failed, partial output kept"
                );
                SessionError::PartialCapture {
                    path: output,
                    source: err,
                }
            } else {
                SessionError::Capture(err)
            }
        })
    }
}
