use clap::Parser;
use stampede::{CliArgs, LoadConfig, config::normalize_args, run_http, telemetry::init_telemetry};
use std::process::ExitCode;

// Using mimalloc for better performance under contention, especially in musl
// environments.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Exit status used when the configuration is rejected.
const EXIT_USAGE: u8 = 2;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = CliArgs::parse_from(normalize_args(std::env::args_os()));

    let config = match LoadConfig::try_from(args) {
        Ok(config) => config,
        Err(e) => {
            // Usage goes to stdout alongside the error.
            println!("error: {e}");
            println!();
            print!("{}", CliArgs::usage());
            return Ok(ExitCode::from(EXIT_USAGE));
        }
    };

    init_telemetry()?;

    if cfg!(debug_assertions) {
        tracing::debug!("Running with full config: {config:#?}");
    }

    let report = run_http(&config).await?;
    print!("{report}");

    Ok(ExitCode::SUCCESS)
}
