use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::SessionError;
use crate::logging::LogConfig;
use crate::request::CaptureRequest;

#[derive(Parser, Debug)]
#[command(name = "rssr")]
#[command(version)]
#[command(about = "Capture an HTTP(S) stream such as an internet radio feed to a local file")]
pub struct Args {
    #[arg(help = "Source stream URL (http or https)")]
    pub source: Option<String>,
    #[arg(help = "Destination directory, created if missing")]
    pub destination: Option<PathBuf>,
    #[arg(short, long, value_name = "SECONDS", help = "Stop after this many seconds")]
    pub duration: Option<u64>,
    #[arg(short, long, help = "Base name for the output file [default: rssr-capture]")]
    pub name: Option<String>,
    #[arg(short, long, help = "Output file extension [default: mp3]")]
    pub extension: Option<String>,
    #[arg(short, long, help = "Print diagnostic output")]
    pub verbose: bool,
}

impl Args {
    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            verbose: self.verbose,
        }
    }

    pub fn into_request(self) -> Result<CaptureRequest, SessionError> {
        let source = self
            .source
            .filter(|s| !s.trim().is_empty())
            .ok_or(SessionError::MissingSource)?;
        let destination = self
            .destination
            .filter(|d| !d.as_os_str().to_string_lossy().trim().is_empty())
            .ok_or(SessionError::MissingDestination)?;

        Ok(CaptureRequest {
            source,
            destination,
            duration: self.duration.map(Duration::from_secs),
            name: self.name,
            extension: self.extension,
        })
    }
}
