//! Conversion of CLI errors to miette reports.

use jsdoc_md_config::ConfigError;
use jsdoc_md_plugin::DocletError;
use miette::Report;

use crate::error::CliError;

pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Doclet(DocletError::MissingLocation { longname }) => miette::miette!(
            help = "every doclet needs meta.path and meta.filename; produce the dump with `jsdoc -X`",
            "Doclet '{}' has no source location",
            longname
        ),
        CliError::Config(ConfigError::NotFound(path)) => miette::miette!(
            help = "create a jsdoc.json file or pass --config <FILE>",
            "Config file not found: {}",
            path.display()
        ),
        CliError::Config(ConfigError::UnknownAccess(level)) => miette::miette!(
            help = "use a comma-separated list of public, protected, private, package",
            "Unknown access level '{}' in includes",
            level
        ),
        CliError::Json(e) => miette::miette!(
            help = "the input must be a JSON array of doclets, as printed by `jsdoc -X`",
            "Invalid doclets JSON: {}",
            e
        ),
        _ => miette::miette!("{}", err),
    }
}
