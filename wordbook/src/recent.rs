use std::sync::Arc;

use dictionary::Word;
use rand::{seq::SliceRandom, Rng};
use thiserror::Error;
use tokio::sync::Mutex;

use crate::storage::Storage;

pub const MAX_RECENT_WORDS: usize = 20;
pub const CACHED_WORDS_KEY: &str = "cached_words";

#[derive(Debug, Error)]
pub enum RecentWordsError {
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
    #[error("failed to serialize recent words: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    Inserted,
    AlreadyPresent,
}

/// Most-recently-searched words, newest first, persisted as one JSON blob.
pub struct RecentWords {
    storage: Arc<Storage>,
    key: String,
    capacity: usize,
    // serializes read-modify-write cycles of `record`
    write_lock: Mutex<()>,
}

impl RecentWords {
    pub fn new(storage: Arc<Storage>, key: impl Into<String>, capacity: usize) -> Self {
        Self {
            storage,
            key: key.into(),
            capacity,
            write_lock: Mutex::new(()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Read the persisted list. Nothing stored yet, or a blob that no longer
    /// parses, both read as an empty list.
    pub async fn load(&self) -> Result<Vec<Word>, RecentWordsError> {
        let Some(blob) = self.storage.get_item(&self.key).await? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str::<Vec<Word>>(&blob) {
            Ok(words) => Ok(words),
            Err(error) => {
                tracing::warn!(key = %self.key, %error, "discarding unreadable recent words");
                Ok(Vec::new())
            }
        }
    }

    /// Remember a successfully looked up word.
    ///
    /// A word that is already present (in any case) is left where it is and the
    /// stored list is not rewritten.
    pub async fn record(&self, word: &Word) -> Result<RecordOutcome, RecentWordsError> {
        let _guard = self.write_lock.lock().await;
        let mut words = self.load().await?;
        if !insert_recent(&mut words, word.clone(), self.capacity) {
            tracing::debug!(word = %word.word, "word already in recent list");
            return Ok(RecordOutcome::AlreadyPresent);
        }
        let blob = serde_json::to_string(&words)?;
        self.storage.set_item(&self.key, &blob).await?;
        tracing::info!(word = %word.word, count = words.len(), "recorded recent word");
        Ok(RecordOutcome::Inserted)
    }
}

/// Prepend `word` unless a case-insensitive match is already listed, then
/// clamp to `capacity`. Returns whether the list changed.
pub fn insert_recent(words: &mut Vec<Word>, word: Word, capacity: usize) -> bool {
    if words.iter().any(|existing| existing.matches(&word.word)) {
        return false;
    }
    words.insert(0, word);
    words.truncate(capacity);
    true
}

/// A uniformly random reordering of `words`; the input is left untouched.
pub fn shuffled<R: Rng + ?Sized>(words: &[Word], rng: &mut R) -> Vec<Word> {
    let mut words = words.to_vec();
    words.shuffle(rng);
    words
}
