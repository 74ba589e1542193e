//! mlwcli - Manage Miniflux, Linkding, and Wallabag from the terminal.
//!
//! A small client for three read-it-later/RSS services:
//!
//! - Miniflux feeds and entries
//! - Linkding links
//! - Wallabag pages
//!
//! List commands share one output pipeline ([`format`]): results are printed
//! as indented JSON, optionally narrowed to a set of fields (`--json id,title`)
//! and/or filtered through a jq expression (`--jq '.[].url'`).

pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod query;

pub use cli::Args;
pub use error::{Error, Result};

use commands::Context;
use config::Config;

/// Run mlwcli with the given arguments.
pub fn run(args: &Args) -> Result<()> {
    let Some(command) = &args.command else {
        return Ok(());
    };

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => Config::default_path()?,
    };
    tracing::debug!(path = %config_path.display(), "loading config");
    let config = Config::load(&config_path)?;

    let ctx = Context {
        config,
        config_path,
    };
    commands::dispatch(command, &ctx)
}
