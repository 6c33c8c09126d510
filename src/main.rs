use anyhow::Context;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use treesync::config::{Cli, Command};
use treesync::ui::EventLog;
use treesync::{worker, Config, SyncError, SyncResult};

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Command::Sync(args) => {
            let quiet = args.quiet;
            match Config::try_from(args) {
                Ok(config) => {
                    init_tracing(&config.log_level);
                    sync(config)
                }
                Err(e) => {
                    init_tracing(&Config::default().log_level);
                    Ok(refuse(quiet, e))
                }
            }
        }
        Command::Check(args) => {
            init_tracing(&Config::default().log_level);
            Ok(check(Config::from(args)))
        }
    }
}

fn init_tracing(level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn sync(config: Config) -> anyhow::Result<ExitCode> {
    let log = EventLog::new(config.quiet);
    log.info("--------------------------------------------------");
    log.info(&format!("treesync v{}", treesync::VERSION));
    log.info(&format!(
        "Starting sync: {} -> {}",
        config.source.display(),
        config.destination.display()
    ));

    // The walk runs on its own thread; this thread only renders events
    let handle = worker::spawn_sync(config).context("failed to start sync worker")?;
    for event in handle.events().iter() {
        log.record(&event);
    }
    let result = handle.wait();

    log.finish(&result);
    log.info("--------------------------------------------------");

    Ok(ExitCode::from(result.exit_code()))
}

/// Report a configuration that could not be built, like any refused run
fn refuse(quiet: bool, error: SyncError) -> ExitCode {
    tracing::warn!(error = %error, "sync refused");
    let result = SyncResult::refused(error);
    EventLog::new(quiet).finish(&result);
    ExitCode::from(result.exit_code())
}

fn check(config: Config) -> ExitCode {
    match config.validate() {
        Ok(paths) => {
            println!(
                "OK: {} -> {}",
                paths.source.as_path().display(),
                paths.destination.as_path().display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}
