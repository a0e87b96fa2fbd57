use poster_dl::DownloaderBuilder;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let downloader = match DownloaderBuilder::new().build() {
        Ok(downloader) => downloader,
        Err(e) => {
            error!("{}", e.chain());
            return ExitCode::FAILURE;
        }
    };

    let report = match downloader.run().await {
        Ok(report) => report,
        Err(e) => {
            error!("{}", e.chain());
            return ExitCode::FAILURE;
        }
    };

    info!("{}", report);
    if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
