use std::{future::Future, sync::Arc};

use dictionary::{Dictionary, DictionaryError, NotFoundError, Word};

use crate::{recent::RecentWords, search::LoadingFlag};

/// Anything that can turn a term into its first dictionary entry.
pub trait DefinitionSource: Send + Sync + 'static {
    fn define(&self, term: &str) -> impl Future<Output = Result<Word, DictionaryError>> + Send;
}

impl DefinitionSource for Dictionary {
    fn define(&self, term: &str) -> impl Future<Output = Result<Word, DictionaryError>> + Send {
        self.get_definition(term)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Found(Word),
    NotFound(NotFoundError),
    Failed(String),
}

pub struct LookupService<S> {
    source: S,
    recent: Arc<RecentWords>,
}

impl<S: DefinitionSource> LookupService<S> {
    pub fn new(source: S, recent: Arc<RecentWords>) -> Self {
        Self { source, recent }
    }

    /// Look `term` up once. A hit is recorded in the recent words before it is
    /// returned; misses and failures leave the recent words alone.
    ///
    /// `loading` reads as set for as long as this call runs, whichever way it
    /// ends.
    pub async fn lookup(&self, term: &str, loading: &LoadingFlag) -> LookupOutcome {
        let _loading = loading.begin();
        match self.source.define(term).await {
            Ok(word) => {
                if let Err(error) = self.recent.record(&word).await {
                    tracing::warn!(word = %word.word, %error, "failed to cache looked up word");
                }
                LookupOutcome::Found(word)
            }
            Err(DictionaryError::NotFound(not_found)) => {
                tracing::info!(term, "no definitions found");
                LookupOutcome::NotFound(not_found)
            }
            Err(error) => {
                tracing::error!(term, %error, "lookup failed");
                LookupOutcome::Failed(error.to_string())
            }
        }
    }
}
