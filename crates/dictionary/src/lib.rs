use reqwest::Url;
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod dictionary;
mod dictionary_api;

pub use dictionary::{PartOfSpeech, Phonetic, Word, WordDefinition, WordMeaning};
pub use dictionary_api::{first_entry, parse_response};

pub const DEFAULT_BASE_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("failed to reach the dictionary: {0}")]
    Fetch(#[source] reqwest::Error),
    #[error("unexpected dictionary response: {0}")]
    Deserialize(#[source] serde_json::Error),
    #[error("{}", .0.message)]
    NotFound(NotFoundError),
    #[error("the dictionary returned no entries")]
    EmptyResponse,
    #[error("invalid dictionary base url: {0}")]
    InvalidBaseUrl(String),
}

/// The API's negative answer, kept verbatim for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotFoundError {
    #[serde(default)]
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub resolution: String,
}

pub struct Dictionary {
    client: reqwest::Client,
    base_url: Url,
}

impl Dictionary {
    pub fn new(base_url: &str) -> Result<Self, DictionaryError> {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Result<Self, DictionaryError> {
        let base_url =
            Url::parse(base_url).map_err(|_| DictionaryError::InvalidBaseUrl(base_url.to_owned()))?;
        if base_url.cannot_be_a_base() {
            return Err(DictionaryError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Every entry the API returns for `word`, in response order.
    pub async fn get_entries(&self, word: &str) -> Result<Vec<Word>, DictionaryError> {
        let body = dictionary_api::get_body(&self.client, &self.base_url, word).await?;
        parse_response(&body)
    }

    /// The first entry for `word`; later entries are ignored.
    pub async fn get_definition(&self, word: &str) -> Result<Word, DictionaryError> {
        let body = dictionary_api::get_body(&self.client, &self.base_url, word).await?;
        first_entry(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unusable_base_urls() {
        assert!(matches!(
            Dictionary::new("not a url"),
            Err(DictionaryError::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            Dictionary::new("mailto:someone@example.com"),
            Err(DictionaryError::InvalidBaseUrl(_))
        ));
        let dictionary = Dictionary::new(DEFAULT_BASE_URL).unwrap();
        assert_eq!(dictionary.base_url().as_str(), DEFAULT_BASE_URL);
    }

    #[test]
    fn not_found_displays_the_api_message() {
        let error = DictionaryError::NotFound(NotFoundError {
            title: "No Definitions Found".into(),
            message: "Sorry pal".into(),
            resolution: String::new(),
        });
        assert_eq!(error.to_string(), "Sorry pal");
    }

    /// Answer one HTTP request with a canned response, handing back the
    /// request head that was received.
    async fn serve_once(
        status: &'static str,
        body: serde_json::Value,
    ) -> (String, tokio::task::JoinHandle<String>) {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|window| window == b"\r\n\r\n") {
                let read = socket.read(&mut buf).await.unwrap();
                if read == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..read]);
            }
            let body = body.to_string();
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            String::from_utf8_lossy(&request).into_owned()
        });
        (format!("http://{addr}/api/v2/entries/en"), handle)
    }

    fn local_dictionary(base_url: &str) -> Dictionary {
        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        Dictionary::with_client(client, base_url).unwrap()
    }

    #[tokio::test]
    async fn get_definition_requests_the_term_and_keeps_the_first_entry() {
        let (base_url, server) = serve_once(
            "200 OK",
            serde_json::json!([
                { "word": "bank", "origin": "first", "meanings": [] },
                { "word": "bank", "origin": "second", "meanings": [] }
            ]),
        )
        .await;
        let word = local_dictionary(&base_url).get_definition("bank").await.unwrap();
        assert_eq!(word.origin.as_deref(), Some("first"));

        let request = server.await.unwrap();
        assert!(
            request.starts_with("GET /api/v2/entries/en/bank HTTP/1.1"),
            "{request}"
        );
    }

    #[tokio::test]
    async fn not_found_body_is_decoded_from_a_404() {
        let (base_url, server) = serve_once(
            "404 Not Found",
            serde_json::json!({
                "title": "No Definitions Found",
                "message": "Sorry pal, we couldn't find definitions for the word you were looking for.",
                "resolution": "You can try the search again at later time or head to the web instead."
            }),
        )
        .await;
        match local_dictionary(&base_url).get_definition("qwzx").await {
            Err(DictionaryError::NotFound(not_found)) => {
                assert_eq!(not_found.title, "No Definitions Found");
            }
            other => panic!("expected not found, got {other:?}"),
        }
        server.await.unwrap();
    }

    #[tokio::test]
    async fn get_entries_returns_every_entry() {
        let (base_url, server) = serve_once(
            "200 OK",
            serde_json::json!([
                { "word": "bank", "meanings": [] },
                { "word": "bank", "meanings": [] }
            ]),
        )
        .await;
        let entries = local_dictionary(&base_url).get_entries("bank").await.unwrap();
        assert_eq!(entries.len(), 2);
        server.await.unwrap();
    }
}
