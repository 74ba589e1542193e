//! Wallabag API client.
//!
//! Wallabag uses the OAuth2 password grant: the client id/secret and the
//! user's credentials are exchanged for a bearer token before any API call.

use crate::client::{Body, Endpoint};
use crate::config::WallabagConfig;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// A saved page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub is_archived: i64,
    #[serde(default)]
    pub is_starred: i64,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

/// One page of items plus the number of matches.
#[derive(Debug, Clone, Serialize)]
pub struct ItemList {
    pub total: i64,
    pub items: Vec<Item>,
}

#[derive(Deserialize)]
struct EntriesResponse {
    total: i64,
    #[serde(rename = "_embedded")]
    embedded: Embedded,
}

#[derive(Deserialize)]
struct Embedded {
    #[serde(default)]
    items: Vec<Item>,
}

#[derive(Deserialize)]
struct Token {
    access_token: String,
}

/// Filters for [`Client::list_entries`].
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    /// `Some(true)` archived only, `Some(false)` unread only.
    pub archive: Option<bool>,
    pub starred: Option<bool>,
    pub page: u32,
    pub per_page: u32,
    pub tags: Vec<String>,
    pub domain: Option<String>,
}

/// Authenticated client for one Wallabag instance.
pub struct Client {
    endpoint: Endpoint,
}

impl Client {
    /// Exchange the stored credentials for an access token.
    pub fn connect(config: &WallabagConfig) -> Result<Self> {
        let endpoint = Endpoint::new(&config.endpoint);
        let form = [
            ("grant_type", "password"),
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.as_str()),
            ("username", config.username.as_str()),
            ("password", config.password.as_str()),
        ];
        let token: Token =
            endpoint.fetch(endpoint.request("POST", "/oauth/v2/token"), Body::Form(&form))?;
        tracing::debug!("obtained wallabag access token");

        Ok(Client {
            endpoint: endpoint.with_auth("Authorization", format!("Bearer {}", token.access_token)),
        })
    }

    /// List saved pages, newest first.
    pub fn list_entries(&self, filter: &EntryFilter) -> Result<ItemList> {
        let mut request = self
            .endpoint
            .request("GET", "/api/entries.json")
            .query("sort", "created")
            .query("order", "desc")
            .query("page", &filter.page.to_string())
            .query("perPage", &filter.per_page.to_string());

        if let Some(archive) = filter.archive {
            request = request.query("archive", flag(archive));
        }
        if let Some(starred) = filter.starred {
            request = request.query("starred", flag(starred));
        }
        if !filter.tags.is_empty() {
            request = request.query("tags", &filter.tags.join(","));
        }
        if let Some(domain) = filter.domain.as_deref().filter(|d| !d.is_empty()) {
            request = request.query("domain_name", domain);
        }

        let response: EntriesResponse = self.endpoint.fetch(request, Body::Empty)?;
        Ok(ItemList {
            total: response.total,
            items: response.embedded.items,
        })
    }

    /// Save a page.
    pub fn create_entry(&self, url: &str, tags: &[String], archive: bool) -> Result<Item> {
        let tags = tags.join(",");
        let form = [
            ("url", url),
            ("tags", tags.as_str()),
            ("archive", flag(archive)),
        ];
        self.endpoint.fetch(
            self.endpoint.request("POST", "/api/entries.json"),
            Body::Form(&form),
        )
    }
}

fn flag(value: bool) -> &'static str {
    if value { "1" } else { "0" }
}
