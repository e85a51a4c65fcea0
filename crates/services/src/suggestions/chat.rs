use std::env;

use async_trait::async_trait;
use reqwest::Client;
use resolution_core::model::{AppSettings, Suggestion};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::SuggestionError;

use super::prompt::{MAX_TASKS, MIN_TASKS, SCHEMA_NAME, response_schema};
use super::provider::{SuggestionProvider, SuggestionRequest};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

const ENV_API_KEY: &str = "RESOLUTION_AI_API_KEY";
const ENV_BASE_URL: &str = "RESOLUTION_AI_BASE_URL";
const ENV_MODEL: &str = "RESOLUTION_AI_MODEL";

/// Connection details for an OpenAI-compatible chat completions endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SuggestionConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl SuggestionConfig {
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.into(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Overlay the process environment on persisted settings.
    #[must_use]
    pub fn from_env(settings: &AppSettings) -> Option<Self> {
        Self::resolve(settings, |name| env::var(name).ok())
    }

    /// Combine persisted settings with environment overrides.
    ///
    /// Environment values win. Returns `None` when neither source provides a
    /// non-empty API key.
    #[must_use]
    pub fn resolve(settings: &AppSettings, lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let pick = |name: &str, stored: Option<&str>| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .or_else(|| stored.map(str::to_owned))
        };

        let api_key = pick(ENV_API_KEY, settings.api_key())?;
        let base_url =
            pick(ENV_BASE_URL, settings.api_base_url()).unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let model = pick(ENV_MODEL, settings.api_model()).unwrap_or_else(|| DEFAULT_MODEL.into());
        Some(Self {
            base_url,
            api_key,
            model,
        })
    }
}

/// Network-backed provider using structured JSON output.
#[derive(Clone)]
pub struct ChatSuggestionProvider {
    client: Client,
    config: SuggestionConfig,
}

impl ChatSuggestionProvider {
    #[must_use]
    pub fn new(config: SuggestionConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &SuggestionConfig {
        &self.config
    }

    async fn complete(&self, prompt: String) -> Result<String, SuggestionError> {
        if self.config.api_key.trim().is_empty() {
            return Err(SuggestionError::Disabled);
        }

        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        let payload = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: 0.2,
            response_format: json!({
                "type": "json_schema",
                "json_schema": {
                    "name": SCHEMA_NAME,
                    "strict": true,
                    "schema": response_schema(),
                }
            }),
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SuggestionError::HttpStatus(response.status()));
        }

        let body: ChatResponse = response.json().await?;
        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(SuggestionError::EmptyResponse)
    }
}

#[async_trait]
impl SuggestionProvider for ChatSuggestionProvider {
    fn name(&self) -> &'static str {
        "chat"
    }

    async fn suggest(&self, request: &SuggestionRequest) -> Result<Suggestion, SuggestionError> {
        let content = self.complete(request.prompt()).await?;
        parse_suggestion(&content)
    }
}

/// Parse model output and enforce the parts of the schema the type system
/// does not: 2-3 tasks, each with a title.
pub(crate) fn parse_suggestion(content: &str) -> Result<Suggestion, SuggestionError> {
    let suggestion: Suggestion = serde_json::from_str(content)?;
    let count = suggestion.suggested_tasks.len();
    if !(MIN_TASKS..=MAX_TASKS).contains(&count) {
        return Err(SuggestionError::Schema(format!(
            "expected {MIN_TASKS}-{MAX_TASKS} tasks, got {count}"
        )));
    }
    if suggestion
        .suggested_tasks
        .iter()
        .any(|task| task.title.trim().is_empty())
    {
        return Err(SuggestionError::Schema("task title is blank".into()));
    }
    Ok(suggestion)
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    response_format: Value,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use resolution_core::model::WeekendId;

    const VALID: &str = r#"{"suggestedTasks":[{"title":"Embeddings 101","description":"Embed 50 notes"},{"title":"Similarity search","description":"Query with cosine distance"}],"reasoning":"Build on the API work."}"#;

    fn chat_body(content: &str) -> String {
        json!({ "choices": [ { "message": { "role": "assistant", "content": content } } ] })
            .to_string()
    }

    fn request() -> SuggestionRequest {
        SuggestionRequest::new(&[], WeekendId::new(4).unwrap())
    }

    #[test]
    fn parse_accepts_two_or_three_tasks() {
        let parsed = parse_suggestion(VALID).unwrap();
        assert_eq!(parsed.suggested_tasks.len(), 2);
        assert_eq!(parsed.reasoning, "Build on the API work.");
    }

    #[test]
    fn parse_rejects_wrong_task_count() {
        let one = r#"{"suggestedTasks":[{"title":"A","description":"B"}],"reasoning":"R"}"#;
        assert!(matches!(parse_suggestion(one), Err(SuggestionError::Schema(_))));
    }

    #[test]
    fn parse_rejects_more_than_three_tasks() {
        let four = r#"{"suggestedTasks":[{"title":"A","description":"a"},{"title":"B","description":"b"},{"title":"C","description":"c"},{"title":"D","description":"d"}],"reasoning":"R"}"#;
        assert!(matches!(parse_suggestion(four), Err(SuggestionError::Schema(_))));

        let three = r#"{"suggestedTasks":[{"title":"A","description":"a"},{"title":"B","description":"b"},{"title":"C","description":"c"}],"reasoning":"R"}"#;
        assert_eq!(parse_suggestion(three).unwrap().suggested_tasks.len(), 3);
    }

    #[test]
    fn parse_rejects_blank_title() {
        let raw = r#"{"suggestedTasks":[{"title":"Embeddings","description":"a"},{"title":"   ","description":"b"}],"reasoning":"R"}"#;
        assert!(matches!(parse_suggestion(raw), Err(SuggestionError::Schema(_))));
    }

    #[test]
    fn parse_rejects_missing_fields() {
        let raw = r#"{"suggestedTasks":[{"title":"A"},{"title":"B"}],"reasoning":"R"}"#;
        assert!(matches!(
            parse_suggestion(raw),
            Err(SuggestionError::InvalidJson(_))
        ));
    }

    #[test]
    fn resolve_prefers_environment_over_settings() {
        let settings = AppSettings::from_persisted(
            Some("stored-key".into()),
            Some("stored-model".into()),
            None,
        )
        .unwrap();
        let env: HashMap<&str, &str> = HashMap::from([(ENV_MODEL, "env-model"), (ENV_API_KEY, "  ")]);

        let config =
            SuggestionConfig::resolve(&settings, |name| env.get(name).map(|v| (*v).to_string()))
                .unwrap();
        assert_eq!(config.api_key, "stored-key");
        assert_eq!(config.model, "env-model");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn resolve_without_key_is_none() {
        assert_eq!(SuggestionConfig::resolve(&AppSettings::default(), |_| None), None);
    }

    #[tokio::test]
    async fn posts_structured_request_and_parses_reply() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .match_body(mockito::Matcher::PartialJson(json!({
                "model": "test-model",
                "response_format": { "type": "json_schema" }
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(chat_body(VALID))
            .create_async()
            .await;

        let provider = ChatSuggestionProvider::new(
            SuggestionConfig::new("test-key")
                .with_base_url(server.url())
                .with_model("test-model"),
        );
        let suggestion = provider.suggest(&request()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(suggestion.suggested_tasks[0].title, "Embeddings 101");
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(500)
            .create_async()
            .await;

        let provider =
            ChatSuggestionProvider::new(SuggestionConfig::new("k").with_base_url(server.url()));
        let err = provider.suggest(&request()).await.unwrap_err();
        assert!(matches!(err, SuggestionError::HttpStatus(status) if status.as_u16() == 500));
    }

    #[tokio::test]
    async fn non_json_content_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(chat_body("Sure! Here are some ideas..."))
            .create_async()
            .await;

        let provider =
            ChatSuggestionProvider::new(SuggestionConfig::new("k").with_base_url(server.url()));
        assert!(matches!(
            provider.suggest(&request()).await,
            Err(SuggestionError::InvalidJson(_))
        ));
    }

    #[tokio::test]
    async fn wrong_task_count_in_reply_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let one = r#"{"suggestedTasks":[{"title":"A","description":"a"}],"reasoning":"R"}"#;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(chat_body(one))
            .create_async()
            .await;

        let provider =
            ChatSuggestionProvider::new(SuggestionConfig::new("k").with_base_url(server.url()));
        assert!(matches!(
            provider.suggest(&request()).await,
            Err(SuggestionError::Schema(_))
        ));
    }

    #[tokio::test]
    async fn blank_key_never_calls_out() {
        let provider = ChatSuggestionProvider::new(
            SuggestionConfig::new(" ").with_base_url("http://127.0.0.1:9"),
        );
        assert!(matches!(
            provider.suggest(&request()).await,
            Err(SuggestionError::Disabled)
        ));
    }
}
