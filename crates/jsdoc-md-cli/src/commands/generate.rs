//! Generate command implementation.

use jsdoc_md_config::ConfigOverrides;
use jsdoc_md_template::{TemplateOptions, publish};

use crate::cli::{ConfigArgs, GenerateArgs};
use crate::commands::{enrich_doclets, load_conf, read_doclets};
use crate::error::Result;
use crate::ui;

/// Execute the generate command.
///
/// Documents that fail to render are logged and skipped; only configuration,
/// input and doclet errors fail the command.
pub fn execute(config: &ConfigArgs, args: GenerateArgs) -> Result<()> {
    let overrides = ConfigOverrides {
        destination: args.destination,
        template: args.template,
        ..config.overrides()
    };
    let conf = load_conf(config, &overrides)?;
    let doclets = read_doclets(&args.doclets)?;
    let enriched = enrich_doclets(&conf, config.inspector, doclets)?;

    let options = TemplateOptions::from_conf(&conf);
    let report = publish(&enriched, &options)?;

    ui::success(&format!(
        "Wrote {} files to {}",
        report.written.len(),
        options.destination.display()
    ));
    if report.failed > 0 {
        ui::warning(&format!("{} documents could not be generated", report.failed));
    }
    Ok(())
}
