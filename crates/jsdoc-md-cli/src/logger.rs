//! Logging setup for the CLI.
//!
//! `--verbose` turns on debug logs for the jsdoc-md crates, `--quiet` keeps
//! errors only, otherwise `RUST_LOG` is honored with an info default.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "jsdoc_md_cli=debug,jsdoc_md_plugin=debug,jsdoc_md_template=debug,jsdoc_md_config=debug";
const QUIET_FILTER: &str = "error";
const DEFAULT_FILTER: &str = "jsdoc_md_cli=info,jsdoc_md_plugin=info,jsdoc_md_template=info,jsdoc_md_config=info";

/// The filter selected by the global flags.
pub fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Initialize the tracing subscriber. Call once, before any logging.
///
/// Logs go to stderr so `enrich` output on stdout stays valid JSON.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color && should_use_colors())
        .compact();

    tracing_subscriber::registry()
        .with(filter_for(verbose, quiet))
        .with(fmt_layer)
        .init();
}

/// `NO_COLOR` disables colors, `FORCE_COLOR` forces them, otherwise the
/// terminal decides.
pub fn should_use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    console::Term::stderr().features().colors_supported()
}
