use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context as _;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Whole-collection persistence for a list of records.
pub trait CollectionStore<T>: Send + Sync {
    fn load(&self) -> anyhow::Result<Vec<T>>;
    fn save(&self, records: &[T]) -> anyhow::Result<()>;
}

/// Keeps a collection as one pretty-printed JSON array on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data_dir>/<name>.json`
    pub fn in_dir(data_dir: impl AsRef<Path>, name: &str) -> Self {
        Self::new(data_dir.as_ref().join(format!("{name}.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<T> CollectionStore<T> for JsonFileStore
where
    T: Serialize + DeserializeOwned,
{
    fn load(&self) -> anyhow::Result<Vec<T>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(err).with_context(|| format!("read: {}", self.path.display()));
            }
        };
        serde_json::from_slice(&bytes).with_context(|| format!("parse json: {}", self.path.display()))
    }

    fn save(&self, records: &[T]) -> anyhow::Result<()> {
        write_json_atomic(&self.path, &records)
    }
}

fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| anyhow::anyhow!("path has no parent: {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create parent dir: {}", parent.display()))?;

    let tmp_path = path.with_extension(format!("tmp.{}", uuid::Uuid::new_v4().simple()));
    let data = serde_json::to_vec_pretty(value).context("serialize json")?;
    fs::write(&tmp_path, &data).with_context(|| format!("write tmp: {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path)
        .with_context(|| format!("rename tmp to final: {}", path.display()))?;
    Ok(())
}

#[derive(Debug)]
pub struct MemoryStore<T> {
    records: Mutex<Vec<T>>,
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T> MemoryStore<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }
}

impl<T> CollectionStore<T> for MemoryStore<T>
where
    T: Clone + Send,
{
    fn load(&self) -> anyhow::Result<Vec<T>> {
        let records = self
            .records
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store lock poisoned"))?;
        Ok(records.clone())
    }

    fn save(&self, records: &[T]) -> anyhow::Result<()> {
        let mut stored = self
            .records
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store lock poisoned"))?;
        *stored = records.to_vec();
        Ok(())
    }
}
