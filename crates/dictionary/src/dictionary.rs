use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One lexical entry as returned by the dictionary API.
///
/// Serializes back to the API's own shape so a cached entry reads the same
/// as a fresh one. Fields this model does not name (`license`, `sourceUrls`
/// and whatever the API adds later) ride along in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    pub word: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phonetic: Option<String>,
    #[serde(default)]
    pub phonetics: Vec<Phonetic>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(default)]
    pub meanings: Vec<WordMeaning>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Word {
    /// Case-insensitive comparison against the entry's headword.
    pub fn matches(&self, term: &str) -> bool {
        self.word.to_lowercase() == term.to_lowercase()
    }

    /// Text of the first definition of the first meaning, if there is one.
    pub fn first_definition(&self) -> Option<&str> {
        self.meanings
            .first()?
            .definitions
            .first()
            .map(|definition| &definition.definition[..])
    }

    /// The first phonetic that carries a playable audio reference.
    pub fn audio_url(&self) -> Option<String> {
        self.phonetics.iter().find_map(Phonetic::audio_url)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phonetic {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Phonetic {
    /// Absolute URL of the pronunciation clip.
    ///
    /// Older entries carry protocol-relative references (`//ssl.gstatic.com/...`),
    /// those get an `https:` prefix. Empty references count as missing.
    pub fn audio_url(&self) -> Option<String> {
        let audio = self.audio.as_deref()?.trim();
        if audio.is_empty() {
            None
        } else if audio.starts_with("//") {
            Some(format!("https:{audio}"))
        } else {
            Some(audio.to_owned())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordMeaning {
    pub part_of_speech: PartOfSpeech,
    #[serde(default)]
    pub definitions: Vec<WordDefinition>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub antonyms: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Part-of-speech tag. Only the exact lowercase spelling maps to a named
/// variant; any other tag, including a differently cased one, is kept
/// verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PartOfSpeech {
    Noun,
    Pronoun,
    Verb,
    Adjective,
    Adverb,
    Preposition,
    Conjunction,
    Interjection,
    Other(String),
}

impl PartOfSpeech {
    pub fn as_str(&self) -> &str {
        match self {
            PartOfSpeech::Noun => "noun",
            PartOfSpeech::Pronoun => "pronoun",
            PartOfSpeech::Verb => "verb",
            PartOfSpeech::Adjective => "adjective",
            PartOfSpeech::Adverb => "adverb",
            PartOfSpeech::Preposition => "preposition",
            PartOfSpeech::Conjunction => "conjunction",
            PartOfSpeech::Interjection => "interjection",
            PartOfSpeech::Other(tag) => tag,
        }
    }
}

impl From<String> for PartOfSpeech {
    fn from(tag: String) -> Self {
        match &tag[..] {
            "noun" => PartOfSpeech::Noun,
            "pronoun" => PartOfSpeech::Pronoun,
            "verb" => PartOfSpeech::Verb,
            "adjective" => PartOfSpeech::Adjective,
            "adverb" => PartOfSpeech::Adverb,
            "preposition" => PartOfSpeech::Preposition,
            "conjunction" => PartOfSpeech::Conjunction,
            "interjection" => PartOfSpeech::Interjection,
            _ => PartOfSpeech::Other(tag),
        }
    }
}

impl From<PartOfSpeech> for String {
    fn from(part_of_speech: PartOfSpeech) -> Self {
        match part_of_speech {
            PartOfSpeech::Other(tag) => tag,
            other => other.as_str().to_owned(),
        }
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordDefinition {
    pub definition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub antonyms: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
