use tokio::{sync::mpsc, time::Duration};

use crate::{
    deck::{FlashcardDeck, EMPTY_DECK_HINT, EMPTY_DECK_TITLE},
    utilities::prompt,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    /// Off by a typo or two.
    Close,
    Wrong,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ReviewAction<'a> {
    Flip,
    Skip,
    Shuffle,
    Done,
    Guess(&'a str),
}

impl<'a> ReviewAction<'a> {
    fn parse(line: &'a str) -> Self {
        let line = line.trim();
        match &line.to_lowercase()[..] {
            "" => ReviewAction::Flip,
            ":s" | ":skip" => ReviewAction::Skip,
            ":shuffle" | ":shake" => ReviewAction::Shuffle,
            ":d" | ":done" | ":q" | ":quit" => ReviewAction::Done,
            _ => ReviewAction::Guess(line),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReviewSummary {
    pub seen: usize,
    pub correct: usize,
}

pub fn judge_guess(guess: &str, answer: &str) -> Verdict {
    let guess = guess.trim().to_lowercase();
    let answer = answer.to_lowercase();
    if guess == answer {
        Verdict::Correct
    } else if strsim::jaro(&guess, &answer) > 0.9 {
        Verdict::Close
    } else {
        Verdict::Wrong
    }
}

/// Walk through the deck, one card per input line, until it runs out or the
/// user leaves.
pub async fn review(
    deck: &mut FlashcardDeck,
    lines: &mut mpsc::UnboundedReceiver<String>,
    reshuffle_delay: Duration,
) -> ReviewSummary {
    let mut summary = ReviewSummary::default();
    if deck.is_empty() {
        println!("{EMPTY_DECK_TITLE}");
        println!("{EMPTY_DECK_HINT}");
        return summary;
    }
    println!("Enter flips a card, or type the word. :shuffle, :skip, :done");
    let mut cards = deck.cards();
    let mut index = 0;
    while index < cards.len() {
        let card = cards[index].clone();
        println!("----------------------------------------");
        println!("[{}/{}] {}", index + 1, cards.len(), card.front);
        prompt("?? ");
        let Some(line) = lines.recv().await else {
            break;
        };
        match ReviewAction::parse(&line) {
            ReviewAction::Flip => {
                println!("    {}", card.back);
                summary.seen += 1;
                index += 1;
            }
            ReviewAction::Guess(guess) => {
                summary.seen += 1;
                match judge_guess(guess, &card.back) {
                    Verdict::Correct => {
                        summary.correct += 1;
                        println!("Correct. Well done!");
                    }
                    Verdict::Close => println!("Almost. The word is {}.", card.back),
                    Verdict::Wrong => println!("Not quite. The word is {}.", card.back),
                }
                index += 1;
            }
            ReviewAction::Skip => index += 1,
            ReviewAction::Shuffle => {
                println!("Shuffling...");
                deck.reshuffle_after(reshuffle_delay).await;
                cards = deck.cards();
                index = 0;
            }
            ReviewAction::Done => break,
        }
    }
    println!(
        "Reviewed {} card(s), {} guessed right.",
        summary.seen, summary.correct
    );
    tracing::info!(seen = summary.seen, correct = summary.correct, "review finished");
    summary
}
