use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use dictionary::{NotFoundError, Word};

use crate::lookup::LookupOutcome;

/// What the search screen currently shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Screen {
    #[default]
    Empty,
    Entry(Word),
    NotFound(NotFoundError),
    Failed(String),
}

impl From<LookupOutcome> for Screen {
    fn from(outcome: LookupOutcome) -> Self {
        match outcome {
            LookupOutcome::Found(word) => Screen::Entry(word),
            LookupOutcome::NotFound(not_found) => Screen::NotFound(not_found),
            LookupOutcome::Failed(reason) => Screen::Failed(reason),
        }
    }
}

/// A committed term tagged with the generation it was committed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub generation: u64,
    pub term: String,
}

/// Shared count of lookups in flight. Cloning shares the count.
#[derive(Debug, Clone, Default)]
pub struct LoadingFlag {
    in_flight: Arc<AtomicUsize>,
}

impl LoadingFlag {
    pub fn begin(&self) -> LoadingGuard {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        LoadingGuard {
            in_flight: self.in_flight.clone(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }
}

/// Marks one lookup as in flight until dropped.
#[derive(Debug)]
pub struct LoadingGuard {
    in_flight: Arc<AtomicUsize>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[derive(Debug, Default)]
pub struct SearchState {
    input: String,
    committed: String,
    generation: u64,
    loading: LoadingFlag,
    screen: Screen,
}

impl SearchState {
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn committed(&self) -> &str {
        &self.committed
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn loading(&self) -> LoadingFlag {
        self.loading.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    pub fn set_input(&mut self, value: &str) {
        self.input = value.to_owned();
    }

    /// Accept a debounced term. An empty term clears the display and yields
    /// no ticket; anything else starts a new generation.
    ///
    /// Superseded lookups keep running, their results are dropped by [`apply`].
    ///
    /// [`apply`]: SearchState::apply
    pub fn commit(&mut self, term: String) -> Option<Ticket> {
        let term = term.trim().to_owned();
        self.generation += 1;
        self.committed = term.clone();
        if term.is_empty() {
            self.screen = Screen::Empty;
            return None;
        }
        Some(Ticket {
            generation: self.generation,
            term,
        })
    }

    /// Show a lookup result if it belongs to the latest commit. Returns
    /// whether the display changed.
    pub fn apply(&mut self, ticket: &Ticket, outcome: LookupOutcome) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                term = %ticket.term,
                generation = ticket.generation,
                latest = self.generation,
                "ignoring stale lookup result"
            );
            return false;
        }
        self.screen = outcome.into();
        true
    }

    /// Show a cached word directly, without a lookup.
    pub fn show(&mut self, word: Word) {
        self.generation += 1;
        self.screen = Screen::Entry(word);
    }

    pub fn clear(&mut self) {
        self.generation += 1;
        self.input.clear();
        self.committed.clear();
        self.screen = Screen::Empty;
    }
}
