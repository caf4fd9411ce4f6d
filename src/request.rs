use std::path::PathBuf;
use std::time::Duration;

/// Validated inputs for one capture.
#[derive(Debug, Clone)]
pub struct CaptureRequest {
    pub source: String,
    pub destination: PathBuf,
    /// `None` captures until the source closes the stream.
    pub duration: Option<Duration>,
    pub name: Option<String>,
    pub extension: Option<String>,
}

impl CaptureRequest {
    pub fn new(source: impl Into<String>, destination: impl Into<PathBuf>) -> Self {
        CaptureRequest {
            source: source.into(),
            destination: destination.into(),
            duration: None,
            name: None,
            extension: None,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }
}
