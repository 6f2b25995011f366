//! Word lookup through the tutor backend (`POST /api/dictionary`).
//!
//! The backend answers `{word, meanings: [...]}`. When it finds nothing it
//! still returns one placeholder meaning carrying only [`NO_RESULTS`]; that
//! placeholder is mapped to an empty list here.

use crate::http::{ApiClient, ApiError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;
use tutor_application::ports::dictionary::{Dictionary, DictionaryError};
use tutor_domain::core::text::non_blank;
use tutor_domain::{MAX_SENSES, WordSense};

/// Placeholder definition the backend sends for an unknown word.
pub const NO_RESULTS: &str = "검색 결과가 없습니다.";

#[derive(Serialize)]
struct LookupPayload<'a> {
    word: &'a str,
}

#[derive(Deserialize)]
struct LookupBody {
    #[serde(default)]
    meanings: Vec<WireSense>,
}

#[derive(Deserialize)]
struct WireSense {
    word: Option<String>,
    #[serde(default)]
    definition: String,
    pos: Option<String>,
    category: Option<String>,
}

impl WireSense {
    fn is_placeholder(&self) -> bool {
        self.word.is_none() && self.definition.trim() == NO_RESULTS
    }

    fn into_sense(self, looked_up: &str) -> WordSense {
        WordSense {
            word: self.word.unwrap_or_else(|| looked_up.to_string()),
            definition: self.definition.trim().to_string(),
            // "N/A" marks a missing part of speech
            pos: self.pos.filter(|p| !p.trim().is_empty() && p != "N/A"),
            category: self.category.filter(|c| !c.trim().is_empty()),
        }
    }
}

pub struct HttpDictionary {
    api: ApiClient,
}

impl HttpDictionary {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

impl From<ApiError> for DictionaryError {
    fn from(e: ApiError) -> Self {
        match e {
            ApiError::Decode(msg) => DictionaryError::Decode(msg),
            other => DictionaryError::Http(other.to_string()),
        }
    }
}

#[async_trait]
impl Dictionary for HttpDictionary {
    async fn lookup(&self, word: &str) -> Result<Vec<WordSense>, DictionaryError> {
        let word = non_blank(word).ok_or(DictionaryError::EmptyWord)?;
        let body: LookupBody = self
            .api
            .post_json("/api/dictionary", &LookupPayload { word })
            .await?;

        let senses: Vec<WordSense> = body
            .meanings
            .into_iter()
            .filter(|m| !m.is_placeholder() && !m.definition.trim().is_empty())
            .take(MAX_SENSES)
            .map(|m| m.into_sense(word))
            .collect();
        debug!("{} sense(s) for '{}'", senses.len(), word);
        Ok(senses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn dictionary_answering(
        word: &str,
        response: ResponseTemplate,
    ) -> (MockServer, HttpDictionary) {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/dictionary"))
            .and(body_json(json!({"word": word})))
            .respond_with(response)
            .expect(1)
            .mount(&server)
            .await;
        let dictionary = HttpDictionary::new(ApiClient::new(server.uri(), None).unwrap());
        (server, dictionary)
    }

    #[tokio::test]
    async fn test_lookup_maps_senses() {
        let (_server, dictionary) = dictionary_answering(
            "진달래",
            ResponseTemplate::new(200).set_body_json(json!({
                "word": "진달래",
                "meanings": [
                    {"word": "진달래", "definition": "진달랫과의 낙엽 활엽 관목.", "pos": "명사", "category": "식물"},
                    {"word": "진달래", "definition": "진달래꽃.", "pos": "N/A", "category": ""}
                ]
            })),
        )
        .await;

        let senses = dictionary.lookup(" 진달래 ").await.unwrap();
        assert_eq!(
            senses,
            vec![
                WordSense::new("진달래", "진달랫과의 낙엽 활엽 관목.")
                    .with_pos("명사")
                    .with_category("식물"),
                WordSense::new("진달래", "진달래꽃."),
            ]
        );
    }

    #[tokio::test]
    async fn test_placeholder_means_no_senses() {
        let (_server, dictionary) = dictionary_answering(
            "즈려밟다",
            ResponseTemplate::new(200).set_body_json(json!({
                "word": "즈려밟다",
                "meanings": [{"definition": NO_RESULTS}]
            })),
        )
        .await;

        assert!(dictionary.lookup("즈려밟다").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_lookup_keeps_at_most_four_senses() {
        let meanings: Vec<_> = (1..=6)
            .map(|n| json!({"word": "하늘", "definition": format!("뜻 {n}")}))
            .collect();
        let (_server, dictionary) = dictionary_answering(
            "하늘",
            ResponseTemplate::new(200).set_body_json(json!({"word": "하늘", "meanings": meanings})),
        )
        .await;

        let senses = dictionary.lookup("하늘").await.unwrap();
        assert_eq!(senses.len(), MAX_SENSES);
        assert_eq!(senses[3].definition, "뜻 4");
    }

    #[tokio::test]
    async fn test_blank_word_is_not_sent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/dictionary"))
            .respond_with(ResponseTemplate::new(400))
            .expect(0)
            .mount(&server)
            .await;
        let dictionary = HttpDictionary::new(ApiClient::new(server.uri(), None).unwrap());

        assert!(matches!(
            dictionary.lookup("   ").await,
            Err(DictionaryError::EmptyWord)
        ));
    }

    #[tokio::test]
    async fn test_server_error_is_http_error() {
        let (_server, dictionary) = dictionary_answering(
            "바람",
            ResponseTemplate::new(500).set_body_json(json!({"detail": "upstream down"})),
        )
        .await;
        assert!(matches!(
            dictionary.lookup("바람").await,
            Err(DictionaryError::Http(_))
        ));
    }
}
