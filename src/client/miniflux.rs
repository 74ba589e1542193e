//! Miniflux API client.
//!
//! Authenticates with the `X-Auth-Token` header.

use crate::client::{Body, Endpoint, send};
use crate::config::ApiKeyConfig;
use crate::error::Result;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value as JsonValue, json};

/// Category new feeds land in when none is given.
pub const DEFAULT_CATEGORY_ID: i64 = 1;

/// A feed entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    pub id: i64,
    pub feed_id: i64,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub starred: bool,
    /// Every other field the server returned.
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

/// One page of entries plus the number of matches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryResultSet {
    pub total: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub entries: Vec<Entry>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A subscribed feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feed {
    pub id: i64,
    pub title: String,
    pub feed_url: String,
    #[serde(default)]
    pub site_url: String,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

/// Filters for [`Client::entries`].
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    pub feed_id: Option<i64>,
    pub search: Option<String>,
    pub status: Option<String>,
    pub starred: bool,
    pub limit: u32,
    pub offset: u32,
}

#[derive(Deserialize)]
struct FeedCreated {
    feed_id: i64,
}

/// Client for one Miniflux instance.
pub struct Client {
    endpoint: Endpoint,
}

impl Client {
    pub fn new(config: &ApiKeyConfig) -> Self {
        Client {
            endpoint: Endpoint::new(&config.endpoint)
                .with_auth("X-Auth-Token", config.api_key.trim().to_string()),
        }
    }

    /// Check the credentials by fetching the current user.
    pub fn validate(&self) -> Result<()> {
        let _: JsonValue = self
            .endpoint
            .fetch(self.endpoint.request("GET", "/v1/me"), Body::Empty)?;
        Ok(())
    }

    /// List entries, newest first.
    pub fn entries(&self, filter: &EntryFilter) -> Result<EntryResultSet> {
        let mut request = self
            .endpoint
            .request("GET", "/v1/entries")
            .query("limit", &filter.limit.to_string())
            .query("offset", &filter.offset.to_string())
            .query("order", "published_at")
            .query("direction", "desc");

        if let Some(feed_id) = filter.feed_id {
            request = request.query("feed_id", &feed_id.to_string());
        }
        if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
            request = request.query("search", search);
        }
        if let Some(status) = filter.status.as_deref().filter(|s| !s.is_empty()) {
            request = request.query("status", status);
        }
        if filter.starred {
            request = request.query("starred", "1");
        }

        self.endpoint.fetch(request, Body::Empty)
    }

    /// List subscribed feeds.
    pub fn feeds(&self) -> Result<Vec<Feed>> {
        self.endpoint
            .fetch(self.endpoint.request("GET", "/v1/feeds"), Body::Empty)
    }

    /// Subscribe to a feed, returning its new ID.
    pub fn create_feed(&self, feed_url: &str, category_id: i64) -> Result<i64> {
        let body = json!({
            "feed_url": feed_url,
            "category_id": category_id,
        });
        let created: FeedCreated = self
            .endpoint
            .fetch(self.endpoint.request("POST", "/v1/feeds"), Body::Json(body))?;
        Ok(created.feed_id)
    }

    /// Send an entry to the configured third-party integrations.
    pub fn save_entry(&self, entry_id: i64) -> Result<()> {
        let path = format!("/v1/entries/{}/save", entry_id);
        send(self.endpoint.request("POST", &path), Body::Empty)?;
        Ok(())
    }
}
