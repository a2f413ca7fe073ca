//! Status messages on stderr.

use console::style;

pub fn success(message: &str) {
    eprintln!("{} {}", style("✓").for_stderr().green().bold(), message);
}

pub fn info(message: &str) {
    eprintln!("{} {}", style("ℹ").for_stderr().blue().bold(), message);
}

pub fn warning(message: &str) {
    eprintln!(
        "{} {}",
        style("⚠").for_stderr().yellow().bold(),
        style(message).for_stderr().yellow()
    );
}

/// Disable colors for the rest of the process when requested or unsupported.
pub fn init_colors(no_color: bool) {
    if no_color || !crate::logger::should_use_colors() {
        console::set_colors_enabled_stderr(false);
    }
}
