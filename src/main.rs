//! mlwcli - Manage Miniflux, Linkding, and Wallabag from the terminal.

use clap::{CommandFactory, Parser};
use colored::Colorize;
use std::process::ExitCode;

fn main() -> ExitCode {
    // Parse command line arguments
    let args = mlwcli::Args::parse();

    // Disable colors if requested
    if args.no_color {
        colored::control::set_override(false);
    }

    mlwcli::logging::init(args.verbose, !args.no_color);

    // Bare invocation prints help
    if args.command.is_none() {
        let _ = mlwcli::Args::command().print_help();
        return ExitCode::SUCCESS;
    }

    match mlwcli::run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {}", "error".red(), e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}
