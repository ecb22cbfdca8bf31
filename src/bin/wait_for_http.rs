//! Blocks until HTTP services are ready.
//!
//! With a URL argument, waits for that one endpoint. Without one, waits for
//! the Selenium grid and then the application named by `APP_URL`. Exits with
//! status 1 when anything stays unreachable, so it can gate a test run:
//!
//! ```text
//! wait_for_http && cargo test -- --ignored
//! ```

use clap::Parser;
use std::process::ExitCode;
use std::time::Duration;
use tracing::error;
use web_scaffold::infrastructure::logger::Logger;
use web_scaffold::{HarnessConfig, ReadinessPoller};

#[derive(Debug, Parser)]
#[command(name = "wait_for_http", about = "Wait for HTTP endpoints to become ready")]
struct Args {
    /// URL to poll; defaults to the whole test stack
    url: Option<String>,

    /// Total time budget in seconds
    #[arg(long, env = "READINESS_TIMEOUT", default_value_t = 60)]
    timeout: u64,

    /// Seconds between attempts
    #[arg(long, env = "READINESS_INTERVAL", default_value_t = 2)]
    interval: u64,

    /// Require the response body to be JSON
    #[arg(long)]
    expect_json: bool,
}

fn main() -> ExitCode {
    Logger::init("info");
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    match args.url {
        Some(url) => {
            let poller = ReadinessPoller::new(
                Duration::from_secs(args.timeout),
                Duration::from_secs(args.interval),
            )?
            .expect_json(args.expect_json);
            poller.wait(&url)?;
        }
        None => {
            let mut config = HarnessConfig::from_env()?;
            config.timeout_secs = args.timeout;
            config.interval_secs = args.interval;
            config.wait_for_stack()?;
        }
    }
    Ok(())
}
