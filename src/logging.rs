use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable holding a tracing filter directive
pub const LOG_ENV: &str = "INSIGHTBOARD_LOG";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("insightboard=warn"))
}

/// CLI logging: compact lines on stderr
pub fn init_cli() {
    let _ = tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .try_init();
}

/// TUI logging. The terminal belongs to the UI, so events go to `file` when
/// one is configured and are dropped otherwise.
pub fn init_tui(file: Option<&Path>) {
    let Some(path) = file else {
        return;
    };
    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(f) => {
            let _ = tracing_subscriber::registry()
                .with(env_filter())
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(f)))
                .try_init();
        }
        Err(e) => eprintln!("warning: could not open log file {}: {}", path.display(), e),
    }
}
