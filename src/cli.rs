//! CLI argument parsing for mlwcli.

use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// Manage Miniflux, Linkding, and Wallabag from the terminal.
#[derive(Parser, Debug)]
#[command(
    name = "mlwcli",
    version,
    about = "mlwcli - Manage Miniflux, Linkding, and Wallabag",
    after_help = r#"EXAMPLES:
    mlwcli auth login miniflux --endpoint https://miniflux.example.com --api-key KEY
    mlwcli auth logout linkding
    mlwcli feed add https://example.com/feed.xml
    mlwcli entry list --json id,title,url
    mlwcli entry list --jq '.[].title'
    mlwcli link add https://example.com --tags "cool useful"
    mlwcli link list --search rust
    mlwcli page add https://example.com/article --archive
    mlwcli page list --starred"#
)]
pub struct Args {
    /// Command to run; help is printed when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the config file.
    #[arg(long, global = true, env = "MLWCLI_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log more detail to stderr (-v debug, -vv trace).
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Top-level command groups.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Authentication commands.
    #[command(subcommand)]
    Auth(AuthCommand),

    /// Manage feeds (miniflux).
    #[command(subcommand)]
    Feed(FeedCommand),

    /// Manage feed entries (miniflux).
    #[command(subcommand)]
    Entry(EntryCommand),

    /// Manage links (linkding).
    #[command(subcommand)]
    Link(LinkCommand),

    /// Manage pages (wallabag).
    #[command(subcommand)]
    Page(PageCommand),
}

#[derive(Subcommand, Debug)]
pub enum AuthCommand {
    /// Verify and store credentials for a service.
    Login(LoginArgs),

    /// Remove credentials for a service.
    Logout {
        /// Service name (miniflux, linkding or wallabag).
        service: String,
    },
}

#[derive(ClapArgs, Debug)]
pub struct LoginArgs {
    /// Service name (miniflux, linkding or wallabag).
    pub service: String,

    /// Service endpoint URL.
    #[arg(long)]
    pub endpoint: String,

    /// API key (miniflux, linkding).
    #[arg(long)]
    pub api_key: Option<String>,

    /// OAuth client ID (wallabag).
    #[arg(long)]
    pub client_id: Option<String>,

    /// OAuth client secret (wallabag).
    #[arg(long)]
    pub client_secret: Option<String>,

    /// Account username (wallabag).
    #[arg(long)]
    pub username: Option<String>,

    /// Account password (wallabag).
    #[arg(long, env = "WALLABAG_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

/// `--json` and `--jq` flags shared by every list command.
#[derive(ClapArgs, Debug, Default, Clone)]
pub struct OutputArgs {
    /// Output JSON with only the specified fields (comma-separated).
    #[arg(long, value_name = "FIELDS", default_value = "")]
    pub json: String,

    /// Filter JSON output using a jq expression.
    #[arg(long, value_name = "EXPRESSION", default_value = "")]
    pub jq: String,
}

#[derive(Subcommand, Debug)]
pub enum FeedCommand {
    /// Subscribe to a feed.
    Add {
        /// URL of the feed to subscribe to.
        url: String,

        /// Miniflux category ID (defaults to 1).
        #[arg(long, default_value_t = 0)]
        category_id: i64,
    },

    /// List subscribed feeds.
    List {
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum EntryCommand {
    /// List feed entries.
    List(EntryListArgs),

    /// Save an entry to third-party integrations.
    Save {
        /// ID of the entry to save.
        entry_id: i64,
    },
}

#[derive(ClapArgs, Debug)]
pub struct EntryListArgs {
    /// Maximum number of results.
    #[arg(long, default_value_t = 10)]
    pub limit: u32,

    /// Number of results to skip.
    #[arg(long, default_value_t = 0)]
    pub offset: u32,

    /// Search query text.
    #[arg(long)]
    pub search: Option<String>,

    /// Filter by entry status (read, unread, removed).
    #[arg(long, default_value = "unread")]
    pub status: String,

    /// Only starred entries.
    #[arg(long)]
    pub starred: bool,

    /// Filter by feed ID.
    #[arg(long)]
    pub feed_id: Option<i64>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Subcommand, Debug)]
pub enum LinkCommand {
    /// Add a link.
    Add {
        /// URL of the link to add.
        url: String,

        /// Notes for the link.
        #[arg(long, default_value = "")]
        notes: String,

        /// Tags separated by spaces.
        #[arg(long, default_value = "")]
        tags: String,
    },

    /// List links.
    List(LinkListArgs),
}

#[derive(ClapArgs, Debug)]
pub struct LinkListArgs {
    /// Maximum number of results.
    #[arg(long, default_value_t = 10)]
    pub limit: u32,

    /// Number of results to skip.
    #[arg(long, default_value_t = 0)]
    pub offset: u32,

    /// Search query text.
    #[arg(long)]
    pub search: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Subcommand, Debug)]
pub enum PageCommand {
    /// Save a page.
    Add {
        /// URL of the page to add.
        url: String,

        /// Tags separated by spaces.
        #[arg(long, default_value = "")]
        tags: String,

        /// Mark the page as archived.
        #[arg(long)]
        archive: bool,
    },

    /// List saved pages.
    List(PageListArgs),
}

#[derive(ClapArgs, Debug)]
pub struct PageListArgs {
    /// Only archived pages.
    #[arg(long)]
    pub archive: bool,

    /// Only starred pages.
    #[arg(long)]
    pub starred: bool,

    /// Page number.
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Items per page.
    #[arg(long, default_value_t = 10)]
    pub per_page: u32,

    /// Tags separated by spaces.
    #[arg(long, default_value = "")]
    pub tags: String,

    /// Filter by domain name.
    #[arg(long)]
    pub domain: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("mlwcli").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_entry_list_defaults() {
        let args = parse(&["entry", "list"]);
        match args.command {
            Some(Command::Entry(EntryCommand::List(list))) => {
                assert_eq!(list.limit, 10);
                assert_eq!(list.offset, 0);
                assert_eq!(list.status, "unread");
                assert!(!list.starred);
                assert!(list.output.json.is_empty());
                assert!(list.output.jq.is_empty());
            }
            other => panic!("Expected entry list, got {:?}", other),
        }
    }

    #[test]
    fn test_output_flags() {
        let args = parse(&["link", "list", "--json", "id,url", "--jq", ".[].url"]);
        match args.command {
            Some(Command::Link(LinkCommand::List(list))) => {
                assert_eq!(list.output.json, "id,url");
                assert_eq!(list.output.jq, ".[].url");
            }
            other => panic!("Expected link list, got {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = parse(&["page", "list", "--no-color", "-vv", "--config", "/tmp/c.toml"]);
        assert!(args.no_color);
        assert_eq!(args.verbose, 2);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/c.toml")));
    }

    #[test]
    fn test_no_command() {
        assert!(parse(&[]).command.is_none());
    }

    #[test]
    fn test_login_requires_endpoint() {
        let result = Args::try_parse_from(["mlwcli", "auth", "login", "miniflux"]);
        assert!(result.is_err());
    }
}
