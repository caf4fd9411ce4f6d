use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Invalid URL format: {0}")]
    InvalidUrl(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Everything that can end a session early, tagged with the category the
/// binary turns into an exit status.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Missing source URL")]
    MissingSource,

    #[error("Source validation failed: {0}")]
    InvalidSource(String),

    #[error("Missing destination directory")]
    MissingDestination,

    #[error("Destination validation failed: {0}")]
    InvalidDestination(String),

    #[error("Capture failed: {0}")]
    Capture(#[from] CaptureError),

    /// The capture broke off after the output file was created; the file is kept.
    #[error("Capture failed: {source} (partial output kept at {})", .path.display())]
    PartialCapture { path: PathBuf, source: CaptureError },
}

impl SessionError {
    pub fn category(&self) -> u8 {
        match self {
            SessionError::MissingSource => 1,
            SessionError::InvalidSource(_) => 2,
            SessionError::MissingDestination => 3,
            SessionError::InvalidDestination(_) => 4,
            SessionError::Capture(_) | SessionError::PartialCapture { .. } => 5,
        }
    }

    /// Values >= 128 denote abnormal termination.
    pub fn exit_code(&self) -> i32 {
        128 + i32::from(self.category())
    }
}
