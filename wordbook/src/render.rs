use dictionary::{NotFoundError, Word, WordDefinition, WordMeaning};

use crate::search::Screen;

pub const PROMPT: &str = ">> ";
pub const LOADING_PROMPT: &str = "(looking up...) >> ";

/// The prompt to show, marking that a lookup is still running.
pub fn prompt_text(loading: bool) -> &'static str {
    if loading {
        LOADING_PROMPT
    } else {
        PROMPT
    }
}

pub fn print_screen(screen: &Screen, recent: &[Word], capacity: usize) {
    print_lines(screen_lines(screen, recent, capacity));
}

pub fn print_recent(recent: &[Word], capacity: usize) {
    print_lines(recent_lines(recent, capacity));
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{line}");
    }
}

/// What the result area shows for `screen`. An empty screen falls back to
/// the recent-words list.
pub fn screen_lines(screen: &Screen, recent: &[Word], capacity: usize) -> Vec<String> {
    match screen {
        Screen::Empty => recent_lines(recent, capacity),
        Screen::Entry(word) => entry_lines(word),
        Screen::NotFound(not_found) => not_found_lines(not_found),
        Screen::Failed(reason) => vec![format!("Lookup failed: {reason}")],
    }
}

fn entry_lines(word: &Word) -> Vec<String> {
    let mut lines = vec![match &word.phonetic {
        Some(phonetic) => format!("{}  {phonetic}", word.word),
        None => word.word.clone(),
    }];
    if let Some(audio) = word.audio_url() {
        lines.push(format!("  audio   {audio}"));
    }
    if let Some(origin) = &word.origin {
        lines.push(format!("  origin  {origin}"));
    }
    for meaning in &word.meanings {
        lines.push(String::new());
        meaning_lines(meaning, &mut lines);
    }
    lines
}

fn meaning_lines(meaning: &WordMeaning, lines: &mut Vec<String>) {
    lines.push(meaning.part_of_speech.to_string());
    for (number, definition) in (1..).zip(&meaning.definitions) {
        definition_lines(number, definition, lines);
    }
    if let Some(related) = related_line(&meaning.synonyms, &meaning.antonyms) {
        lines.push(format!("  {related}"));
    }
}

fn definition_lines(number: usize, definition: &WordDefinition, lines: &mut Vec<String>) {
    lines.push(format!("  {number}. {}", definition.definition));
    let indent = " ".repeat(number.to_string().len() + 4);
    if let Some(example) = &definition.example {
        lines.push(format!("{indent}\"{example}\""));
    }
    if let Some(related) = related_line(&definition.synonyms, &definition.antonyms) {
        lines.push(format!("{indent}{related}"));
    }
}

/// `similar: a, b; opposite: c`, leaving out whichever half is empty.
fn related_line(synonyms: &[String], antonyms: &[String]) -> Option<String> {
    let parts: Vec<String> = [("similar", synonyms), ("opposite", antonyms)]
        .into_iter()
        .filter(|(_, words)| !words.is_empty())
        .map(|(label, words)| format!("{label}: {}", words.join(", ")))
        .collect();
    (!parts.is_empty()).then(|| parts.join("; "))
}

fn not_found_lines(not_found: &NotFoundError) -> Vec<String> {
    [&not_found.title, &not_found.message, &not_found.resolution]
        .into_iter()
        .filter(|line| !line.is_empty())
        .cloned()
        .collect()
}

fn recent_lines(recent: &[Word], capacity: usize) -> Vec<String> {
    if recent.is_empty() {
        return vec!["No recent words yet. Type a word to look it up.".to_owned()];
    }
    let mut lines = vec![format!("Recent words ({}/{capacity}):", recent.len())];
    lines.extend(
        recent
            .iter()
            .enumerate()
            .map(|(index, word)| format!("[{}]: {}", index + 1, word.word)),
    );
    lines
}

pub fn print_help() {
    println!("Type a word to look it up. Commands:");
    println!("    :recent      list recently looked up words");
    println!("    :open N      show recent word N");
    println!("    :clear       clear the current result");
    println!("    :cards       review recent words as flashcards");
    println!("    :help        show this help");
    println!("    :quit        leave");
}
