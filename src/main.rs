use std::process::ExitCode;

use cacau_prices::CacauScraper;
use chrono::Local;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let scraper = match CacauScraper::builder().build() {
        Ok(scraper) => scraper,
        Err(e) => {
            error!(error = %e, "failed to initialize");
            return ExitCode::FAILURE;
        }
    };
    info!("{}", scraper);

    match scraper.run(Local::now().fixed_offset()) {
        Ok(summary) => {
            info!(
                snapshot = %summary.snapshot_path.display(),
                history = %summary.history_path.display(),
                "run complete"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "run failed");
            ExitCode::FAILURE
        }
    }
}
