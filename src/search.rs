use anyhow::Context as _;
use serde_json::Value;

use crate::author::parse_author_translator;
use crate::category::{FullCategory, classify_poetry, map_external_category};
use crate::cli::{NormalizeArgs, SearchArgs};
use crate::config::ProviderConfig;
use crate::formats::{NormalizedBook, RawSearchItem, SearchResponse};
use crate::provider::{AladinProvider, BookSearchProvider, parse_search_body};

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("search query is empty")]
    EmptyQuery,
    #[error("book search failed: {0:#}")]
    Upstream(anyhow::Error),
}

/// Runs one title search against the provider and normalizes the results.
pub async fn search_books(
    provider: &dyn BookSearchProvider,
    query: &str,
) -> Result<Vec<NormalizedBook>, SearchError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(SearchError::EmptyQuery);
    }

    let items = provider
        .search_items(query)
        .await
        .map_err(SearchError::Upstream)?;
    let books = normalize_search_results(&items);
    tracing::info!(query, count = books.len(), "book search");
    Ok(books)
}

pub async fn run(args: SearchArgs) -> anyhow::Result<()> {
    let config = ProviderConfig::from_env().context("load provider config")?;
    tracing::debug!(?config, "provider config");
    let provider = AladinProvider::new(config);

    let books = search_books(&provider, &args.query).await?;
    print_books(books)
}

pub fn normalize_file(args: NormalizeArgs) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(&args.input)
        .with_context(|| format!("read provider response: {}", args.input))?;
    let items = parse_search_body(&raw)?;
    print_books(normalize_search_results(&items))
}

fn print_books(books: Vec<NormalizedBook>) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(&SearchResponse { books }).context("serialize books")?;
    println!("{out}");
    Ok(())
}

pub fn normalize_search_results(items: &[RawSearchItem]) -> Vec<NormalizedBook> {
    items.iter().map(normalize_item).collect()
}

/// Normalizes a single provider item. Never fails: malformed fields fall back
/// to empty strings, `0` price, or absent page count.
pub fn normalize_item(item: &RawSearchItem) -> NormalizedBook {
    let raw_author = text(item.field("author"));
    let parsed = parse_author_translator(Some(raw_author.as_str()));
    let author = if parsed.author.is_empty() {
        raw_author.clone()
    } else {
        parsed.author
    };

    let title = text(item.field("title"));
    let publisher = text(item.field("publisher"));
    let series = non_empty_text(item.nested("seriesInfo", "seriesName"))
        .or_else(|| non_empty_text(item.field("seriesName")));

    let category = poetry_override(&title, &publisher, series.as_deref())
        .or_else(|| map_external_category(Some(text(item.field("categoryName")).as_str())));

    let isbn = non_empty_text(item.field("isbn13")).unwrap_or_else(|| text(item.field("isbn")));

    let page_value = match item.nested("subInfo", "itemPage") {
        None | Some(Value::Null) => item.field("itemPage"),
        nested => nested,
    };

    NormalizedBook {
        title,
        author,
        translator: parsed.translator,
        publisher,
        pub_date: text(item.field("pubDate")),
        cover: text(item.field("cover")),
        description: text(item.field("description")),
        isbn,
        retail_price: retail_price(item.field("priceStandard")),
        page_count: page_count(page_value),
        category,
        series,
    }
}

// Imprint identity beats the provider taxonomy: title, then publisher, then series.
fn poetry_override(title: &str, publisher: &str, series: Option<&str>) -> Option<FullCategory> {
    let fires = classify_poetry(Some(title))
        || classify_poetry(Some(publisher))
        || classify_poetry(series);
    fires.then_some(FullCategory::Poetry)
}

fn text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        _ => String::new(),
    }
}

fn non_empty_text(value: Option<&Value>) -> Option<String> {
    Some(text(value)).filter(|text| !text.trim().is_empty())
}

fn page_count(value: Option<&Value>) -> Option<u32> {
    let pages = match value? {
        Value::Number(number) => number
            .as_u64()
            .map(|n| n as i64)
            .or_else(|| number.as_f64().filter(|n| n.is_finite()).map(|n| n as i64))?,
        Value::String(text) => leading_integer(text)?,
        _ => return None,
    };
    u32::try_from(pages).ok().filter(|pages| *pages > 0)
}

fn retail_price(value: Option<&Value>) -> u64 {
    let price = match value {
        Some(Value::Number(number)) => number
            .as_u64()
            .or_else(|| number.as_f64().filter(|n| n.is_finite() && *n >= 0.0).map(|n| n as u64)),
        Some(Value::String(text)) => leading_integer(text).and_then(|n| u64::try_from(n).ok()),
        _ => None,
    };
    price.unwrap_or(0)
}

/// Reads an optionally signed run of digits at the start of `text`, ignoring
/// leading whitespace and anything after the digits (`"320쪽"` is 320).
fn leading_integer(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let value = digits[..end].parse::<i64>().ok()?;
    Some(if negative { -value } else { value })
}
