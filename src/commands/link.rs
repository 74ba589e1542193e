//! `link` commands (linkding).

use crate::cli::{LinkCommand, LinkListArgs};
use crate::client::linkding::{self, BookmarkFilter, BookmarkList, NewBookmark};
use crate::client::split_tags;
use crate::commands::{Context, created_message, print_success};
use crate::config::Service;
use crate::error::Result;
use crate::format::print_output;
use serde_json::json;

pub fn run(cmd: &LinkCommand, ctx: &Context) -> Result<()> {
    ctx.config.require(Service::Linkding)?;
    let client = linkding::Client::new(&ctx.config.linkding);

    match cmd {
        LinkCommand::Add { url, notes, tags } => {
            let bookmark = client.create_bookmark(&NewBookmark {
                url: url.clone(),
                notes: notes.clone(),
                tag_names: split_tags(tags),
            })?;
            print_success(&created_message("Link", bookmark.id));
            Ok(())
        }
        LinkCommand::List(args) => {
            let list = client.list_bookmarks(&filter_from(args))?;
            print_output(&wrap(list), &args.output.json, &args.output.jq)
        }
    }
}

fn filter_from(args: &LinkListArgs) -> BookmarkFilter {
    BookmarkFilter {
        query: args.search.clone(),
        limit: args.limit,
        offset: args.offset,
    }
}

fn wrap(list: BookmarkList) -> serde_json::Value {
    json!({
        "total": list.count,
        "items": list.results,
    })
}
