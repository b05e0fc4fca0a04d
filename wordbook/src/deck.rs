use dictionary::Word;
use rand::Rng;
use tokio::time::{sleep, Duration};

use crate::recent::shuffled;

pub const EMPTY_DECK_TITLE: &str = "You don't have any flashcards";
pub const EMPTY_DECK_HINT: &str = "Try to search for words";
pub const DEFAULT_RESHUFFLE_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flashcard {
    /// First definition of the first meaning.
    pub front: String,
    pub back: String,
}

/// Shuffled in-memory view over the recent words. Nothing here is persisted.
#[derive(Debug, Clone)]
pub struct FlashcardDeck {
    words: Vec<Word>,
}

impl FlashcardDeck {
    pub fn new<R: Rng + ?Sized>(words: Vec<Word>, rng: &mut R) -> Self {
        Self {
            words: shuffled(&words, rng),
        }
    }

    /// Words without a single definition have no front and are left out.
    pub fn cards(&self) -> Vec<Flashcard> {
        self.words
            .iter()
            .filter_map(|word| {
                Some(Flashcard {
                    front: word.first_definition()?.to_owned(),
                    back: word.word.clone(),
                })
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.cards().is_empty()
    }

    pub fn reshuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.words = shuffled(&self.words, rng);
    }

    /// Wait `delay`, then reshuffle the words already in memory.
    pub async fn reshuffle_after(&mut self, delay: Duration) {
        sleep(delay).await;
        self.reshuffle(&mut rand::thread_rng());
        tracing::debug!(cards = self.words.len(), "reshuffled deck");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recent::tests::word;
    use rand::{rngs::StdRng, SeedableRng};
    use tokio::time::Instant;

    fn backs(deck: &FlashcardDeck) -> Vec<String> {
        let mut backs: Vec<String> = deck.cards().into_iter().map(|card| card.back).collect();
        backs.sort_unstable();
        backs
    }

    #[test]
    fn cards_pair_first_definition_with_word() {
        let deck = FlashcardDeck::new(vec![word("cat")], &mut StdRng::seed_from_u64(1));
        assert_eq!(
            deck.cards(),
            [Flashcard {
                front: "the meaning of cat".into(),
                back: "cat".into(),
            }]
        );
    }

    #[test]
    fn words_without_definitions_are_skipped() {
        let mut bare = word("bare");
        bare.meanings.clear();
        let deck = FlashcardDeck::new(vec![bare], &mut StdRng::seed_from_u64(1));
        assert!(deck.cards().is_empty());
        assert!(deck.is_empty());
    }

    #[test]
    fn empty_recent_list_makes_an_empty_deck() {
        let deck = FlashcardDeck::new(Vec::new(), &mut StdRng::seed_from_u64(1));
        assert!(deck.is_empty());
    }

    #[test]
    fn reshuffle_keeps_the_same_cards() {
        let words: Vec<Word> = ["a", "b", "c", "d", "e"].into_iter().map(word).collect();
        let mut rng = StdRng::seed_from_u64(42);
        let mut deck = FlashcardDeck::new(words, &mut rng);
        let before = backs(&deck);
        deck.reshuffle(&mut rng);
        assert_eq!(backs(&deck), before);
        assert_eq!(before, ["a", "b", "c", "d", "e"]);
    }

    #[tokio::test(start_paused = true)]
    async fn reshuffle_after_waits_the_delay() {
        let words: Vec<Word> = ["a", "b", "c"].into_iter().map(word).collect();
        let mut deck = FlashcardDeck::new(words, &mut StdRng::seed_from_u64(3));
        let start = Instant::now();
        deck.reshuffle_after(DEFAULT_RESHUFFLE_DELAY).await;
        assert!(start.elapsed() >= DEFAULT_RESHUFFLE_DELAY);
        assert_eq!(backs(&deck), ["a", "b", "c"]);
    }
}
