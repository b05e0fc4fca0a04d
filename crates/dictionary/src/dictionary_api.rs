// https://dictionaryapi.dev/ - free, no key. Answers 404 with a JSON body for unknown words.

use reqwest::Url;
use serde::Deserialize;

use crate::{DictionaryError, NotFoundError, Word};

#[derive(Deserialize)]
#[serde(untagged)]
enum ApiResponse {
    Entries(Vec<Word>),
    NotFound(NotFoundError),
}

pub(crate) fn entry_url(base_url: &Url, word: &str) -> Result<Url, DictionaryError> {
    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|_| DictionaryError::InvalidBaseUrl(base_url.to_string()))?
        .pop_if_empty()
        .push(word);
    Ok(url)
}

/// Fetch the raw response body for `word`, whatever the status code.
pub(crate) async fn get_body(
    client: &reqwest::Client,
    base_url: &Url,
    word: &str,
) -> Result<String, DictionaryError> {
    let url = entry_url(base_url, word)?;
    tracing::debug!(%url, "requesting definition");
    let res: reqwest::Response = client
        .get(url)
        .send()
        .await
        .map_err(DictionaryError::Fetch)?;
    let status = res.status();
    let body = res.text().await.map_err(DictionaryError::Fetch)?;
    tracing::debug!(%status, bytes = body.len(), "definition response received");
    Ok(body)
}

/// Decode a response body regardless of its status code: an array of
/// entries is a hit, an object with a `message` is a miss.
pub fn parse_response(body: &str) -> Result<Vec<Word>, DictionaryError> {
    match serde_json::from_str::<ApiResponse>(body).map_err(DictionaryError::Deserialize)? {
        ApiResponse::Entries(entries) if entries.is_empty() => Err(DictionaryError::EmptyResponse),
        ApiResponse::Entries(entries) => Ok(entries),
        ApiResponse::NotFound(not_found) => Err(DictionaryError::NotFound(not_found)),
    }
}

/// Decode a response body and keep only its first entry.
pub fn first_entry(body: &str) -> Result<Word, DictionaryError> {
    parse_response(body)?
        .into_iter()
        .next()
        .ok_or(DictionaryError::EmptyResponse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn entries_keep_response_order() {
        let body = json!([
            { "word": "bank", "meanings": [{ "partOfSpeech": "noun", "definitions": [{ "definition": "An institution." }] }] },
            { "word": "bank", "meanings": [{ "partOfSpeech": "verb", "definitions": [{ "definition": "To deposit." }] }] }
        ])
        .to_string();
        let entries = parse_response(&body).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].first_definition(), Some("An institution."));
    }

    #[test]
    fn first_entry_ignores_later_entries() {
        let body = json!([
            { "word": "bank", "origin": "first", "meanings": [] },
            { "word": "bank", "origin": "second", "meanings": [] },
            { "word": "bank", "origin": "third", "meanings": [] }
        ])
        .to_string();
        let word = first_entry(&body).unwrap();
        assert_eq!(word.origin.as_deref(), Some("first"));

        assert!(matches!(first_entry("[]"), Err(DictionaryError::EmptyResponse)));
        assert!(matches!(
            first_entry(&json!({ "message": "nope" }).to_string()),
            Err(DictionaryError::NotFound(_))
        ));
    }

    #[test]
    fn message_object_is_not_found() {
        let body = json!({
            "title": "No Definitions Found",
            "message": "Sorry pal, we couldn't find definitions for the word you were looking for.",
            "resolution": "You can try the search again at later time or head to the web instead."
        })
        .to_string();
        match parse_response(&body) {
            Err(DictionaryError::NotFound(not_found)) => {
                assert_eq!(not_found.title, "No Definitions Found");
                assert!(not_found.message.starts_with("Sorry pal"));
                assert!(not_found.resolution.starts_with("You can try"));
            }
            other => panic!("expected not found, got {other:?}"),
        }
    }

    #[test]
    fn message_alone_is_enough_for_not_found() {
        let body = json!({ "message": "nope" }).to_string();
        match parse_response(&body) {
            Err(DictionaryError::NotFound(not_found)) => {
                assert_eq!(not_found.message, "nope");
                assert!(not_found.title.is_empty());
            }
            other => panic!("expected not found, got {other:?}"),
        }
    }

    #[test]
    fn empty_array_and_garbage_are_errors() {
        assert!(matches!(parse_response("[]"), Err(DictionaryError::EmptyResponse)));
        assert!(matches!(parse_response("<html>"), Err(DictionaryError::Deserialize(_))));
        assert!(matches!(parse_response("{}"), Err(DictionaryError::Deserialize(_))));
    }

    #[test]
    fn entry_url_encodes_the_word_as_one_segment() {
        let base = Url::parse("https://api.dictionaryapi.dev/api/v2/entries/en").unwrap();
        assert_eq!(
            entry_url(&base, "hello").unwrap().as_str(),
            "https://api.dictionaryapi.dev/api/v2/entries/en/hello"
        );
        assert_eq!(
            entry_url(&base, "ice cream/x").unwrap().as_str(),
            "https://api.dictionaryapi.dev/api/v2/entries/en/ice%20cream%2Fx"
        );

        let trailing = Url::parse("http://localhost:8080/entries/").unwrap();
        assert_eq!(
            entry_url(&trailing, "cat").unwrap().as_str(),
            "http://localhost:8080/entries/cat"
        );
    }
}
