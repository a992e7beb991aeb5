use anyhow::Context as _;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, USER_AGENT};
use serde_json::Value;

use crate::config::{MAX_RESULTS, ProviderConfig};
use crate::formats::RawSearchItem;

#[async_trait]
pub trait BookSearchProvider: Send + Sync {
    async fn search_items(&self, query: &str) -> anyhow::Result<Vec<RawSearchItem>>;
}

/// Title search against the Aladin TTB API. One request per search, no retry.
#[derive(Debug, Clone)]
pub struct AladinProvider {
    client: reqwest::Client,
    config: ProviderConfig,
}

impl AladinProvider {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl BookSearchProvider for AladinProvider {
    async fn search_items(&self, query: &str) -> anyhow::Result<Vec<RawSearchItem>> {
        let endpoint = self.config.base_url.as_str();
        let max_results = MAX_RESULTS.to_string();
        let response = self
            .client
            .get(endpoint)
            .header(USER_AGENT, concat!("chulbitso/", env!("CARGO_PKG_VERSION")))
            .header(ACCEPT, "application/json")
            .query(&[
                ("key", self.config.ttb_key.as_str()),
                ("Query", query),
                ("QueryType", "Title"),
                ("MaxResults", max_results.as_str()),
                ("Output", "JS"),
                ("Version", self.config.version.as_str()),
            ])
            .send()
            .await
            .with_context(|| format!("GET {endpoint}"))?;

        let status = response.status();
        let raw = response.text().await.context("read search response body")?;
        if !status.is_success() {
            anyhow::bail!("book search API error ({status}): {raw}");
        }

        parse_search_body(&raw)
    }
}

/// Pulls the `item` array out of a search response body. A body without
/// `item` is an empty result; a body that is not JSON is an error.
pub fn parse_search_body(raw: &str) -> anyhow::Result<Vec<RawSearchItem>> {
    let value: Value = serde_json::from_str(raw.trim().trim_end_matches(';'))
        .context("parse search response")?;

    let items = match value.get("item") {
        Some(Value::Array(items)) => items.iter().cloned().map(RawSearchItem).collect(),
        _ => Vec::new(),
    };
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_item_key_is_empty() -> anyhow::Result<()> {
        assert!(parse_search_body(r#"{"totalResults": 0}"#)?.is_empty());
        assert!(parse_search_body(r#"{"item": null}"#)?.is_empty());
        Ok(())
    }

    #[test]
    fn items_are_kept_in_order() -> anyhow::Result<()> {
        let items = parse_search_body(r#"{"item": [{"title": "a"}, {"title": "b"}]};"#)?;
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].field("title").and_then(Value::as_str), Some("b"));
        Ok(())
    }

    #[test]
    fn non_json_is_an_error() {
        let err = parse_search_body("<html>oops</html>").unwrap_err();
        assert!(format!("{err:#}").contains("parse search response"));
    }
}
