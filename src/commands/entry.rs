//! `entry` commands (miniflux).

use crate::cli::{EntryCommand, EntryListArgs};
use crate::client::miniflux::{self, EntryFilter, EntryResultSet};
use crate::commands::Context;
use crate::config::Service;
use crate::error::Result;
use crate::format::print_output;
use serde_json::json;

pub fn run(cmd: &EntryCommand, ctx: &Context) -> Result<()> {
    ctx.config.require(Service::Miniflux)?;
    let client = miniflux::Client::new(&ctx.config.miniflux);

    match cmd {
        EntryCommand::List(args) => {
            let result = client.entries(&filter_from(args))?;
            print_output(&wrap(result), &args.output.json, &args.output.jq)
        }
        EntryCommand::Save { entry_id } => {
            client.save_entry(*entry_id)?;
            println!("Entry {} saved successfully", entry_id);
            Ok(())
        }
    }
}

fn filter_from(args: &EntryListArgs) -> EntryFilter {
    EntryFilter {
        feed_id: args.feed_id.filter(|id| *id != 0),
        search: args.search.clone(),
        status: Some(args.status.clone()),
        starred: args.starred,
        limit: args.limit,
        offset: args.offset,
    }
}

/// The `{total, items}` wrapper list commands print.
fn wrap(result: EntryResultSet) -> serde_json::Value {
    json!({
        "total": result.total,
        "items": result.entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputArgs;

    fn list_args() -> EntryListArgs {
        EntryListArgs {
            limit: 10,
            offset: 0,
            search: Some("rust".into()),
            status: "unread".into(),
            starred: true,
            feed_id: Some(0),
            output: OutputArgs::default(),
        }
    }

    #[test]
    fn test_filter_from_args() {
        let filter = filter_from(&list_args());
        assert_eq!(filter.feed_id, None);
        assert_eq!(filter.search.as_deref(), Some("rust"));
        assert_eq!(filter.status.as_deref(), Some("unread"));
        assert!(filter.starred);
        assert_eq!(filter.limit, 10);
    }

    #[test]
    fn test_wrap_result_set() {
        let set: EntryResultSet = serde_json::from_str(
            r#"{"total": 1, "entries": [{"id": 1, "feed_id": 2, "title": "A", "url": "http://a"}]}"#,
        )
        .unwrap();
        let wrapped = wrap(set);
        assert_eq!(wrapped["total"], 1);
        assert_eq!(wrapped["items"][0]["title"], "A");
        assert!(wrapped.get("entries").is_none());
    }
}
