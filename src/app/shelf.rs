use std::sync::Arc;

use anyhow::Context as _;
use chrono::Utc;
use serde::Serialize;

use crate::app::store::{CollectionStore, JsonFileStore};
use crate::cli::{PaperCommand, TapeCommand};
use crate::formats::{PaperReview, VideoTape};

pub const MAX_EPISODE: i64 = 9999;

// Storage problems never reach the caller: a failed load reads as an empty
// collection and a failed save leaves the returned value in memory only.
fn load_or_empty<T>(store: &dyn CollectionStore<T>, collection: &str) -> Vec<T> {
    match store.load() {
        Ok(records) => records,
        Err(err) => {
            tracing::warn!(collection, error = %format!("{err:#}"), "load failed; using empty collection");
            Vec::new()
        }
    }
}

fn save_or_warn<T>(store: &dyn CollectionStore<T>, collection: &str, records: &[T]) {
    if let Err(err) = store.save(records) {
        tracing::warn!(collection, error = %format!("{err:#}"), "save failed; change not persisted");
    }
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Handwritten "paper" reviews attached to books.
#[derive(Clone)]
pub struct PaperReviewShelf {
    store: Arc<dyn CollectionStore<PaperReview>>,
}

impl PaperReviewShelf {
    const COLLECTION: &'static str = "paper_reviews";

    pub fn new(store: Arc<dyn CollectionStore<PaperReview>>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Vec<PaperReview> {
        load_or_empty(self.store.as_ref(), Self::COLLECTION)
    }

    pub fn for_book(&self, book_id: &str) -> Vec<PaperReview> {
        self.list()
            .into_iter()
            .filter(|review| review.book_id == book_id)
            .collect()
    }

    pub fn add(&self, book_id: &str, book_title: &str, content: &str) -> PaperReview {
        let review = PaperReview {
            id: new_id(),
            book_id: book_id.to_owned(),
            book_title: book_title.to_owned(),
            content: content.to_owned(),
            created_at: Utc::now(),
        };

        let mut records = self.list();
        records.push(review.clone());
        save_or_warn(self.store.as_ref(), Self::COLLECTION, &records);
        review
    }

    /// Returns whether a review with `id` existed.
    pub fn remove(&self, id: &str) -> bool {
        let mut records = self.list();
        let before = records.len();
        records.retain(|review| review.id != id);
        if records.len() == before {
            return false;
        }
        save_or_warn(self.store.as_ref(), Self::COLLECTION, &records);
        true
    }
}

/// Collected episodes in the video room.
#[derive(Clone)]
pub struct TapeShelf {
    store: Arc<dyn CollectionStore<VideoTape>>,
}

impl TapeShelf {
    const COLLECTION: &'static str = "video_tapes";

    pub fn new(store: Arc<dyn CollectionStore<VideoTape>>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Vec<VideoTape> {
        load_or_empty(self.store.as_ref(), Self::COLLECTION)
    }

    pub fn add(&self, title: &str, episode: i64) -> VideoTape {
        let tape = VideoTape {
            id: new_id(),
            title: title.trim().to_owned(),
            episode: clamp_episode(episode),
            created_at: Utc::now(),
        };

        let mut records = self.list();
        records.push(tape.clone());
        save_or_warn(self.store.as_ref(), Self::COLLECTION, &records);
        tape
    }

    pub fn remove(&self, id: &str) -> bool {
        let mut records = self.list();
        let before = records.len();
        records.retain(|tape| tape.id != id);
        if records.len() == before {
            return false;
        }
        save_or_warn(self.store.as_ref(), Self::COLLECTION, &records);
        true
    }
}

pub fn clamp_episode(episode: i64) -> u16 {
    episode.clamp(0, MAX_EPISODE) as u16
}

pub fn run_paper(command: PaperCommand) -> anyhow::Result<()> {
    let shelf = |data_dir: &str| {
        PaperReviewShelf::new(file_store(data_dir, PaperReviewShelf::COLLECTION))
    };
    match command {
        PaperCommand::Add(args) => {
            let shelf = shelf(&args.data.data_dir);
            print_json(&shelf.add(&args.book_id, &args.book_title, &args.content))
        }
        PaperCommand::List(args) => {
            let shelf = shelf(&args.data.data_dir);
            match args.book_id.as_deref() {
                Some(book_id) => print_json(&shelf.for_book(book_id)),
                None => print_json(&shelf.list()),
            }
        }
        PaperCommand::Remove(args) => {
            report_removal(shelf(&args.data.data_dir).remove(&args.id), &args.id)
        }
    }
}

pub fn run_tape(command: TapeCommand) -> anyhow::Result<()> {
    let shelf = |data_dir: &str| TapeShelf::new(file_store(data_dir, TapeShelf::COLLECTION));
    match command {
        TapeCommand::Add(args) => {
            print_json(&shelf(&args.data.data_dir).add(&args.title, args.episode))
        }
        TapeCommand::List(args) => print_json(&shelf(&args.data_dir).list()),
        TapeCommand::Remove(args) => {
            report_removal(shelf(&args.data.data_dir).remove(&args.id), &args.id)
        }
    }
}

fn file_store<T>(data_dir: &str, collection: &str) -> Arc<dyn CollectionStore<T>>
where
    T: Serialize + serde::de::DeserializeOwned,
{
    Arc::new(JsonFileStore::in_dir(data_dir, collection))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("serialize output")?;
    println!("{out}");
    Ok(())
}

fn report_removal(removed: bool, id: &str) -> anyhow::Result<()> {
    if !removed {
        anyhow::bail!("no entry with id {id}");
    }
    println!("removed {id}");
    Ok(())
}
