use futures::{Stream, StreamExt};
use indicatif::ProgressBar;
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};
use url::Url;

use crate::error::CaptureError;

/// Upper bound on a single chunk.
pub const CHUNK_SIZE: usize = 65_536;

/// A progress event is logged every this many chunks while a duration limit is set.
pub const PROGRESS_EVERY: u64 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The source closed the stream. An abrupt disconnect looks the same.
    StreamEnded,
    DurationReached,
}

#[derive(Debug, Clone)]
pub struct CaptureReport {
    pub path: PathBuf,
    pub bytes: u64,
    pub chunks: u64,
    pub elapsed: Duration,
    pub stop: StopReason,
}

struct CaptureSession {
    bytes_written: u64,
    chunks: u64,
    started: Instant,
    limit: Option<Duration>,
}

impl CaptureSession {
    fn start(limit: Option<Duration>) -> Self {
        CaptureSession {
            bytes_written: 0,
            chunks: 0,
            started: Instant::now(),
            limit,
        }
    }

    fn record(&mut self, len: usize) {
        self.bytes_written += len as u64;
        self.chunks += 1;
    }

    fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Logs every [`PROGRESS_EVERY`]th chunk, and only while a limit is set.
    fn report_progress(&self) {
        if self.limit.is_some() && self.chunks % PROGRESS_EVERY == 0 {
            debug!(
                chunks = self.chunks,
                elapsed_secs = self.elapsed().as_secs(),
                "capture progress"
            );
        }
    }

    /// Without a limit there is nothing to check.
    fn limit_reached(&self) -> bool {
        self.limit.is_some_and(|limit| self.elapsed() >= limit)
    }
}

/// Streams `source` into `output` until the source ends or `limit` elapses.
///
/// The output is created (or truncated) before the GET is issued and only ever
/// grows afterwards. A failed capture leaves whatever was written in place.
/// There is no read timeout: a silent source blocks the loop, limit or not.
pub async fn capture_stream(
    client: &Client,
    source: &Url,
    output: &Path,
    limit: Option<Duration>,
    progress: &ProgressBar,
) -> Result<CaptureReport, CaptureError> {
    let mut file = File::create(output).await?;

    let response = client
        .get(source.clone())
        .send()
        .await?
        .error_for_status()?;
    let mut stream = Box::pin(response.bytes_stream());

    let mut session = CaptureSession::start(limit);
    info!(url = %source, path = %output.display(), ?limit, "capture started");

    let outcome = pump(&mut stream, &mut file, &mut session, progress).await;
    // Flushed on error paths too; a failed capture keeps every byte received.
    let flushed = file.flush().await;
    drop(file);
    drop(stream);
    let stop = outcome?;
    flushed?;

    let bytes = tokio::fs::metadata(output).await?.len();
    let elapsed = session.elapsed();
    info!(
        bytes,
        chunks = session.chunks,
        elapsed_secs = elapsed.as_secs_f64(),
        ?stop,
        "capture finished"
    );

    Ok(CaptureReport {
        path: output.to_path_buf(),
        bytes,
        chunks: session.chunks,
        elapsed,
        stop,
    })
}

async fn pump<S, B>(
    stream: &mut S,
    file: &mut File,
    session: &mut CaptureSession,
    progress: &ProgressBar,
) -> Result<StopReason, CaptureError>
where
    S: Stream<Item = Result<B, reqwest::Error>> + Unpin,
    B: AsRef<[u8]>,
{
    while let Some(received) = stream.next().await {
        let received = received?;

        for chunk in received.as_ref().chunks(CHUNK_SIZE) {
            file.write_all(chunk).await?;
            session.record(chunk.len());
            progress.set_position(session.bytes_written);

            session.report_progress();
            if session.limit_reached() {
                return Ok(StopReason::DurationReached);
            }
        }
    }
    Ok(StopReason::StreamEnded)
}
