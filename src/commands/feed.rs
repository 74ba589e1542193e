//! `feed` commands (miniflux).

use crate::cli::FeedCommand;
use crate::client::miniflux::{self, DEFAULT_CATEGORY_ID};
use crate::commands::{Context, created_message, print_success};
use crate::config::Service;
use crate::error::Result;
use crate::format::print_output;

pub fn run(cmd: &FeedCommand, ctx: &Context) -> Result<()> {
    ctx.config.require(Service::Miniflux)?;
    let client = miniflux::Client::new(&ctx.config.miniflux);

    match cmd {
        FeedCommand::Add { url, category_id } => {
            let feed_id = client.create_feed(url, category_or_default(*category_id))?;
            print_success(&created_message("Feed", feed_id));
            Ok(())
        }
        FeedCommand::List { output } => {
            let feeds = client.feeds()?;
            print_output(&feeds, &output.json, &output.jq)
        }
    }
}

/// Category 0 means "not given".
fn category_or_default(category_id: i64) -> i64 {
    if category_id == 0 {
        DEFAULT_CATEGORY_ID
    } else {
        category_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputArgs;
    use crate::config::Config;
    use crate::error::Error;
    use std::path::PathBuf;

    #[test]
    fn test_category_default() {
        assert_eq!(category_or_default(0), 1);
        assert_eq!(category_or_default(4), 4);
    }

    #[test]
    fn test_requires_miniflux() {
        let ctx = Context {
            config: Config::default(),
            config_path: PathBuf::from("/nonexistent/config.toml"),
        };
        let cmd = FeedCommand::List {
            output: OutputArgs::default(),
        };
        assert!(matches!(run(&cmd, &ctx), Err(Error::NotConfigured(s)) if s == "miniflux"));
    }
}
