//! `page` commands (wallabag).

use crate::cli::{PageCommand, PageListArgs};
use crate::client::split_tags;
use crate::client::wallabag::{self, EntryFilter};
use crate::commands::{Context, created_message, print_success};
use crate::config::Service;
use crate::error::Result;
use crate::format::print_output;

pub fn run(cmd: &PageCommand, ctx: &Context) -> Result<()> {
    ctx.config.require(Service::Wallabag)?;
    let client = wallabag::Client::connect(&ctx.config.wallabag)?;

    match cmd {
        PageCommand::Add { url, tags, archive } => {
            let item = client.create_entry(url, &split_tags(tags), *archive)?;
            print_success(&created_message("Page", item.id));
            Ok(())
        }
        PageCommand::List(args) => {
            let list = client.list_entries(&filter_from(args))?;
            print_output(&list, &args.output.json, &args.output.jq)
        }
    }
}

/// Unset flags leave the filter open rather than excluding matches.
fn filter_from(args: &PageListArgs) -> EntryFilter {
    EntryFilter {
        archive: args.archive.then_some(true),
        starred: args.starred.then_some(true),
        page: args.page,
        per_page: args.per_page,
        tags: split_tags(&args.tags),
        domain: args.domain.clone(),
    }
}
