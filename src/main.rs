use clap::Parser;
use indicatif::{HumanBytes, HumanDuration};
use rssr::{logging, Args, CaptureReport, Recorder, SessionError, StopReason};

async fn run(args: Args) -> Result<CaptureReport, SessionError> {
    let request = args.into_request()?;
    let recorder = Recorder::new()?.with_spinner();
    recorder.record(&request).await
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();

    if let Err(err) = logging::init(&args.log_config()) {
        eprintln!("warning: {:#}", err);
    }

    match run(args).await {
        Ok(report) => {
            let how = match report.stop {
                StopReason::StreamEnded => "stream ended",
                StopReason::DurationReached => "duration reached",
            };
            println!(
                "✓ Captured {} to {} in {} ({})",
                HumanBytes(report.bytes),
                report.path.display(),
                HumanDuration(report.elapsed),
                how
            );
        }
        Err(err) => {
            eprintln!("✗ {}", err);
            std::process::exit(err.exit_code());
        }
    }
}
