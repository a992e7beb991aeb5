use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::category::FullCategory;

/// One entry of the provider's `item` array, kept untyped: any field may be
/// missing or carry an unexpected JSON type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawSearchItem(pub Value);

impl RawSearchItem {
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn nested(&self, outer: &str, inner: &str) -> Option<&Value> {
        self.0.get(outer).and_then(|value| value.get(inner))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedBook {
    pub title: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translator: Option<String>,
    pub publisher: String,
    pub pub_date: String,
    pub cover: String,
    pub description: String,
    pub isbn: String,
    pub retail_price: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<FullCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperReview {
    pub id: String,
    pub book_id: String,
    pub book_title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoTape {
    pub id: String,
    pub title: String,
    pub episode: u16,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub books: Vec<NormalizedBook>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
