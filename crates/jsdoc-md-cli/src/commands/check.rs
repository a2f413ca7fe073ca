//! Check command implementation.

use jsdoc_md_config::ConfigDiscovery;

use crate::cli::{CheckArgs, ConfigArgs};
use crate::commands::load_conf;
use crate::error::Result;
use crate::ui;

/// Execute the check command: validate the configuration and print the
/// effective values as JSON.
pub fn execute(config: &ConfigArgs, _args: CheckArgs) -> Result<()> {
    match &config.config {
        Some(path) => ui::info(&format!("Using {}", path.display())),
        None => match ConfigDiscovery::new(std::env::current_dir()?).find() {
            Some(path) => ui::info(&format!("Using {}", path.display())),
            None => ui::warning("No configuration file found, using defaults"),
        },
    }

    let conf = load_conf(config, &config.overrides())?;
    println!("{}", serde_json::to_string_pretty(&conf)?);
    ui::success("Configuration is valid");
    Ok(())
}
