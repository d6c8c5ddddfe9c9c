//! Logging initialization.
//!
//! Logs go to stderr so stdout stays clean for `match` and `config` output.
//! `RUST_LOG` takes precedence over everything else.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Pick the effective level: `--verbose` forces at least debug, otherwise the
/// configured level is used, falling back to info when it is not recognised.
fn effective_level(configured: &str, verbose: bool) -> &'static str {
    let configured = configured.to_ascii_lowercase();
    let level = LEVELS
        .iter()
        .copied()
        .find(|l| *l == configured)
        .unwrap_or("info");
    if verbose && level != "trace" {
        "debug"
    } else {
        level
    }
}

/// Install the global subscriber.
///
/// * `level` - default filter when `RUST_LOG` is unset
/// * `json_format` - structured JSON lines instead of the human format
pub fn init(level: &str, json_format: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json_format {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(true),
            )
            .init();
    }
}

/// Initialize logging from the `[logging]` config section, with CLI overrides.
pub fn init_from_config(
    config: &blockstat_core::Config,
    verbose_override: bool,
    json_logs_override: bool,
) {
    let level = effective_level(&config.logging.level, verbose_override);
    let json_format = json_logs_override || config.logging.format.eq_ignore_ascii_case("json");
    init(level, json_format);
}
