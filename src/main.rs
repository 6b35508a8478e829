use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use pilon_tracks::cli::{ConfigError, ParsedArgs};
use pilon_tracks::engine::ReferenceEngine;

fn main() -> ExitCode {
    let parsed = match ParsedArgs::from_tokens(std::env::args_os().skip(1)) {
        Ok(parsed) => parsed,
        Err(e) => return report(&e),
    };

    // Logging is set up before resolution so fix-list warnings are shown
    let filter = if parsed.debug() {
        EnvFilter::new("pilon_tracks=trace,debug")
    } else if parsed.verbose() {
        EnvFilter::new("pilon_tracks=debug,info")
    } else {
        EnvFilter::new("pilon_tracks=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let config = match parsed.resolve() {
        Ok(config) => config,
        Err(e) => return report(&e),
    };

    match pilon_tracks::run(&config, &ReferenceEngine::new()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn report(err: &ConfigError) -> ExitCode {
    match err {
        ConfigError::UsageRequested(text) | ConfigError::MissingInput(text) => {
            println!("{}", text.trim_end());
        }
        _ => eprintln!("Error: {err}"),
    }
    ExitCode::from(err.exit_code())
}
