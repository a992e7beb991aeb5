use anyhow::Context as _;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cli::ReviewCommand;

/// Three-part review stored on a book as a single text column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookReviewParts {
    #[serde(default)]
    pub purchase: String,
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub review: String,
}

impl BookReviewParts {
    pub fn is_empty(&self) -> bool {
        self.purchase.is_empty() && self.make.is_empty() && self.review.is_empty()
    }
}

/// What a stored review column turned out to contain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredReview {
    Empty,
    Structured(BookReviewParts),
    /// Plain text written before reviews were split into parts.
    Legacy(String),
}

impl StoredReview {
    pub fn parse(raw: Option<&str>) -> Self {
        let trimmed = raw.unwrap_or_default().trim();
        if trimmed.is_empty() {
            return StoredReview::Empty;
        }

        match serde_json::from_str::<Value>(trimmed) {
            Ok(Value::Object(fields)) => StoredReview::Structured(BookReviewParts {
                purchase: text_field(fields.get("purchase")),
                make: text_field(fields.get("make")),
                review: text_field(fields.get("review")),
            }),
            _ => StoredReview::Legacy(trimmed.to_owned()),
        }
    }

    pub fn into_parts(self) -> BookReviewParts {
        match self {
            StoredReview::Empty => BookReviewParts::default(),
            StoredReview::Structured(parts) => parts,
            StoredReview::Legacy(review) => BookReviewParts {
                review,
                ..BookReviewParts::default()
            },
        }
    }
}

fn text_field(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.trim().to_owned(),
        Some(other) => other.to_string().trim().to_owned(),
    }
}

pub fn decode_review(raw: Option<&str>) -> BookReviewParts {
    StoredReview::parse(raw).into_parts()
}

/// Serializes review parts for storage. All-empty parts encode to `""` rather
/// than an empty object; fields are written as given, without trimming.
pub fn encode_review(parts: &BookReviewParts) -> String {
    if parts.is_empty() {
        return String::new();
    }
    serde_json::json!({
        "purchase": parts.purchase,
        "make": parts.make,
        "review": parts.review,
    })
    .to_string()
}

pub fn has_any_review(raw: Option<&str>) -> bool {
    !decode_review(raw).is_empty()
}

pub fn run(command: ReviewCommand) -> anyhow::Result<()> {
    match command {
        ReviewCommand::Encode(args) => {
            let parts = BookReviewParts {
                purchase: args.purchase,
                make: args.make,
                review: args.review,
            };
            println!("{}", encode_review(&parts));
        }
        ReviewCommand::Decode(args) => {
            let parts = decode_review(Some(args.raw.as_str()));
            let out = serde_json::to_string(&parts).context("serialize review parts")?;
            println!("{out}");
        }
    }
    Ok(())
}
