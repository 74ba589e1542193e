//! Command dispatch: routes `Command` variants to their handlers.

pub mod auth;
pub mod entry;
pub mod feed;
pub mod link;
pub mod page;

use crate::cli::Command;
use crate::config::Config;
use colored::Colorize;
use std::path::PathBuf;

/// Everything a handler needs besides its own arguments.
#[derive(Debug, Clone)]
pub struct Context {
    /// Credentials loaded at startup.
    pub config: Config,
    /// Where `config` was loaded from and where logins are saved.
    pub config_path: PathBuf,
}

/// Dispatch a parsed `Command` to its handler.
pub fn dispatch(command: &Command, ctx: &Context) -> crate::Result<()> {
    match command {
        Command::Auth(cmd) => auth::run(cmd, ctx),
        Command::Feed(cmd) => feed::run(cmd, ctx),
        Command::Entry(cmd) => entry::run(cmd, ctx),
        Command::Link(cmd) => link::run(cmd, ctx),
        Command::Page(cmd) => page::run(cmd, ctx),
    }
}

/// Print a success line prefixed with a check mark.
pub(crate) fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Message printed after an add command creates `thing` with `id`.
pub(crate) fn created_message(thing: &str, id: i64) -> String {
    format!("{} created successfully (ID: {})", thing, id)
}
