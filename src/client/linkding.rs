//! Linkding API client.

use crate::client::{Body, Endpoint};
use crate::config::ApiKeyConfig;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue, json};

/// A saved link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: i64,
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub tag_names: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

/// One page of bookmarks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookmarkList {
    pub count: i64,
    #[serde(default)]
    pub results: Vec<Bookmark>,
}

/// Parameters for [`Client::list_bookmarks`].
#[derive(Debug, Clone, Default)]
pub struct BookmarkFilter {
    pub query: Option<String>,
    pub limit: u32,
    pub offset: u32,
}

/// Fields for a new bookmark.
#[derive(Debug, Clone, Default)]
pub struct NewBookmark {
    pub url: String,
    pub notes: String,
    pub tag_names: Vec<String>,
}

/// Client for one Linkding instance.
pub struct Client {
    endpoint: Endpoint,
}

impl Client {
    pub fn new(config: &ApiKeyConfig) -> Self {
        Client {
            endpoint: Endpoint::new(&config.endpoint).with_auth(
                "Authorization",
                format!("Token {}", config.api_key.trim()),
            ),
        }
    }

    /// Check the credentials by fetching the user profile.
    pub fn validate(&self) -> Result<()> {
        let _: JsonValue = self.endpoint.fetch(
            self.endpoint.request("GET", "/api/user/profile/"),
            Body::Empty,
        )?;
        Ok(())
    }

    /// List bookmarks matching an optional search query.
    pub fn list_bookmarks(&self, filter: &BookmarkFilter) -> Result<BookmarkList> {
        let mut request = self
            .endpoint
            .request("GET", "/api/bookmarks/")
            .query("limit", &filter.limit.to_string())
            .query("offset", &filter.offset.to_string());

        if let Some(query) = filter.query.as_deref().filter(|q| !q.is_empty()) {
            request = request.query("q", query);
        }

        self.endpoint.fetch(request, Body::Empty)
    }

    /// Create a bookmark and return it as stored.
    pub fn create_bookmark(&self, bookmark: &NewBookmark) -> Result<Bookmark> {
        let body = json!({
            "url": bookmark.url,
            "notes": bookmark.notes,
            "tag_names": bookmark.tag_names,
        });
        self.endpoint.fetch(
            self.endpoint.request("POST", "/api/bookmarks/"),
            Body::Json(body),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_bookmark_list() {
        let body = r#"{
            "count": 12,
            "next": "https://links.example.com/api/bookmarks/?limit=1&offset=1",
            "previous": null,
            "results": [{
                "id": 3,
                "url": "https://example.com",
                "title": "Example",
                "description": "",
                "tag_names": ["cool", "useful"],
                "is_archived": false
            }]
        }"#;
        let list: BookmarkList = serde_json::from_str(body).unwrap();
        assert_eq!(list.count, 12);
        assert_eq!(list.results[0].tag_names, vec!["cool", "useful"]);
        assert_eq!(list.results[0].notes, "");
        assert_eq!(list.results[0].extra["is_archived"], false);
    }
}
