use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// History tag pushed once per successful search.
pub const SEARCH_STATE: &str = "search";

/// History tag owned by the lightbox viewer.
pub const LIGHTBOX_STATE: &str = "lightbox";

/// Generic user-visible message for any failed search.
pub const SEARCH_FAILED: &str = "Search failed";

/// Marker rendered when a search returns no items.
pub const NO_RESULTS: &str = "No results found";

// ---------------------------------------------------------------------------
// Media filter
// ---------------------------------------------------------------------------

/// Media type constraint read from the type selector at search time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
}

impl MediaType {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaType::Image => "image",
            MediaType::Video => "video",
        }
    }

    /// Parse a selector value. The empty string means "no filter".
    pub fn parse_filter(value: &str) -> Result<Option<MediaType>, String> {
        match value.trim() {
            "" => Ok(None),
            other => other.parse().map(Some),
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "image" => Ok(MediaType::Image),
            "video" => Ok(MediaType::Video),
            other => Err(format!("unknown media type '{other}' (expected image or video)")),
        }
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Kind of a gallery entry as reported by the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Image,
    Video,
    Directory,
    #[serde(other)]
    Other,
}

/// A single media entry in a search result page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
}

/// One page of search results, exactly as returned by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub query: String,
    #[serde(default)]
    pub items: Vec<MediaItem>,
    #[serde(default)]
    pub total_items: u64,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub page_size: u32,
}

fn first_page() -> u32 {
    1
}

impl SearchResult {
    /// Number of pages implied by `total_items` and `page_size`.
    pub fn page_count(&self) -> u32 {
        if self.page_size == 0 || self.total_items == 0 {
            return 1;
        }
        u32::try_from(self.total_items.div_ceil(u64::from(self.page_size))).unwrap_or(u32::MAX)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Parameters of a single backend search call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub page: u32,
    pub page_size: u32,
    pub media_type: Option<MediaType>,
}

impl SearchRequest {
    pub fn first_page(query: &str, page_size: u32, media_type: Option<MediaType>) -> Self {
        Self {
            query: query.to_string(),
            page: 1,
            page_size,
            media_type,
        }
    }

    /// Query-string pairs, `type` only present when a filter is active.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("q", self.query.clone()),
            ("page", self.page.to_string()),
            ("pageSize", self.page_size.to_string()),
        ];
        if let Some(t) = self.media_type {
            pairs.push(("type", t.as_str().to_string()));
        }
        pairs
    }
}
