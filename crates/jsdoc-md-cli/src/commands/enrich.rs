//! Enrich command implementation.

use std::fs;

use crate::cli::{ConfigArgs, EnrichArgs};
use crate::commands::{enrich_doclets, load_conf, read_doclets};
use crate::error::{Result, ResultExt};
use crate::ui;

/// Execute the enrich command: print (or write) the enriched doclets as JSON.
pub fn execute(config: &ConfigArgs, args: EnrichArgs) -> Result<()> {
    let conf = load_conf(config, &config.overrides())?;
    let doclets = read_doclets(&args.doclets)?;
    let enriched = enrich_doclets(&conf, config.inspector, doclets)?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&enriched)?
    } else {
        serde_json::to_string(&enriched)?
    };

    match &args.output {
        Some(path) => {
            fs::write(path, json).with_path(path)?;
            ui::success(&format!(
                "Wrote {} doclets to {}",
                enriched.len(),
                path.display()
            ));
        }
        None => println!("{json}"),
    }
    Ok(())
}
