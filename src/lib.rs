pub mod capture;
pub mod cli;
pub mod destination;
pub mod error;
pub mod logging;
pub mod output_path;
pub mod recorder;
pub mod request;
pub mod source;
pub mod validation;

pub use capture::{CaptureReport, StopReason};
pub use cli::Args;
pub use error::{CaptureError, SessionError};
pub use recorder::Recorder;
pub use request::CaptureRequest;
pub use validation::Validation;
