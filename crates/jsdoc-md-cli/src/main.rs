//! jsdoc-md entry point: argument parsing, logging and command dispatch.

use clap::Parser;
use jsdoc_md_cli::{cli, commands, error, logger, ui};
use miette::Result;

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let result = match args.command {
        cli::Command::Enrich(enrich_args) => commands::enrich_execute(&args.config, enrich_args),
        cli::Command::Generate(generate_args) => {
            commands::generate_execute(&args.config, generate_args)
        }
        cli::Command::Check(check_args) => commands::check_execute(&args.config, check_args),
    };

    result.map_err(error::cli_error_to_miette)
}
