//! Command-line interface definition.
//!
//! - `jsdoc-md enrich` - run the doclet plugin and print the enriched doclets
//! - `jsdoc-md generate` - enrich, then render the markdown documentation
//! - `jsdoc-md check` - print the effective configuration

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use jsdoc_md_config::ConfigOverrides;

/// jsdoc-md - markdown documentation from JSDoc doclets
#[derive(Parser, Debug)]
#[command(
    name = "jsdoc-md",
    version,
    about = "Markdown documentation from JSDoc doclets",
    long_about = "Reads the JSON doclet dump of a JSDoc run (`jsdoc -X`), derives the\n\
                  properties the markdown template needs (category, access, module\n\
                  membership, ...) and renders one markdown file per module."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(flatten)]
    pub config: ConfigArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Configuration flags shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// JSDoc configuration file (default: jsdoc.json, .jsdoc.json or conf.json)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Comma-separated access levels to document, e.g. "public,protected"
    #[arg(long, global = true, value_name = "LEVELS")]
    pub includes: Option<String>,

    /// Root used for module names and documentation file names
    #[arg(long, global = true, value_name = "DIR")]
    pub source_root: Option<PathBuf>,

    /// How exports and decorators are detected
    #[arg(long, global = true, value_enum, default_value = "node")]
    pub inspector: InspectorKind,
}

impl ConfigArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            includes: self.includes.clone(),
            source_root: self.source_root.clone(),
            ..ConfigOverrides::default()
        }
    }
}

/// Source of export and decorator information.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, ValueEnum)]
pub enum InspectorKind {
    /// Syntax node and code name carried by each doclet
    #[default]
    #[value(name = "node")]
    Node,

    /// Re-parse source files with oxc
    #[value(name = "oxc")]
    Oxc,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Enrich a doclet dump and print it as JSON
    Enrich(EnrichArgs),

    /// Enrich a doclet dump and render markdown documentation
    Generate(GenerateArgs),

    /// Load, validate and print the effective configuration
    Check(CheckArgs),
}

#[derive(Args, Debug)]
pub struct EnrichArgs {
    /// JSON array of doclets, or `-` for stdin
    #[arg(value_name = "DOCLETS")]
    pub doclets: String,

    /// Write the enriched doclets to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// JSON array of doclets, or `-` for stdin
    #[arg(value_name = "DOCLETS")]
    pub doclets: String,

    /// Output folder (overrides opts.destination)
    #[arg(short = 'd', long, value_name = "DIR")]
    pub destination: Option<PathBuf>,

    /// Template folder holding templates/ and resources/ (overrides opts.template)
    #[arg(short = 't', long, value_name = "DIR")]
    pub template: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct CheckArgs {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_generate_with_global_flags() {
        let cli = Cli::parse_from([
            "jsdoc-md",
            "generate",
            "doclets.json",
            "-d",
            "docs",
            "--includes",
            "public",
            "--inspector",
            "oxc",
            "-v",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.config.inspector, InspectorKind::Oxc);
        assert_eq!(cli.config.includes.as_deref(), Some("public"));
        match cli.command {
            Command::Generate(args) => {
                assert_eq!(args.doclets, "doclets.json");
                assert_eq!(args.destination, Some(PathBuf::from("docs")));
                assert!(args.template.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn stdin_marker_is_accepted() {
        let cli = Cli::parse_from(["jsdoc-md", "enrich", "-", "--pretty"]);
        assert!(matches!(cli.command, Command::Enrich(EnrichArgs { ref doclets, pretty: true, .. }) if doclets == "-"));
        assert_eq!(cli.config.inspector, InspectorKind::Node);
    }

    #[test]
    fn verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["jsdoc-md", "-v", "-q", "check"]).is_err());
    }

    #[test]
    fn overrides_carry_shared_flags() {
        let args = ConfigArgs {
            includes: Some("public".to_string()),
            source_root: Some(PathBuf::from("src")),
            ..ConfigArgs::default()
        };
        let overrides = args.overrides();
        assert_eq!(overrides.includes.as_deref(), Some("public"));
        assert_eq!(overrides.source_root, Some(PathBuf::from("src")));
        assert!(overrides.destination.is_none());
    }
}
