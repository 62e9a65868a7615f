//! rescache CLI entry point.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use rescache::cli::{Cli, CommandDispatcher};
use rescache::config::Settings;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("rescache=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rescache=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("rescache starting with args: {:?}", cli);

    let mut settings = match Settings::load(cli.settings.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(1);
        }
    };
    if let Some(dir) = &cli.cache_dir {
        settings.cache_dir = Some(dir.clone());
    }

    let dispatcher = CommandDispatcher::new(settings);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = dispatcher.dispatch(&cli.command, &mut out);
    let _ = out.flush();

    // 0 on success, 2 when the server could not be reached, 1 otherwise.
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_connection_failure() => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}
