use std::sync::Arc;

use resolution_core::model::{Suggestion, Weekend, WeekendId};

use super::chat::{ChatSuggestionProvider, SuggestionConfig};
use super::gate::SuggestionGate;
use super::provider::{StaticSuggestionProvider, SuggestionProvider, SuggestionRequest};

/// Front door for weekend suggestions. Never fails: provider errors are
/// logged and answered with the static fallback.
#[derive(Clone)]
pub struct SuggestionGateway {
    provider: Arc<dyn SuggestionProvider>,
    fallback: StaticSuggestionProvider,
    gate: SuggestionGate,
}

impl SuggestionGateway {
    #[must_use]
    pub fn new(provider: Arc<dyn SuggestionProvider>) -> Self {
        Self {
            provider,
            fallback: StaticSuggestionProvider,
            gate: SuggestionGate::new(),
        }
    }

    /// Use the chat provider when a credential is configured, otherwise the
    /// static provider.
    #[must_use]
    pub fn from_config(config: Option<SuggestionConfig>) -> Self {
        match config {
            Some(config) if !config.api_key.trim().is_empty() => {
                tracing::info!(model = %config.model, "suggestions served by chat provider");
                Self::new(Arc::new(ChatSuggestionProvider::new(config)))
            }
            _ => {
                tracing::info!("no suggestion credential configured, using static suggestions");
                Self::static_only()
            }
        }
    }

    #[must_use]
    pub fn static_only() -> Self {
        Self::new(Arc::new(StaticSuggestionProvider))
    }

    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Loading flags shared by every clone of this gateway.
    #[must_use]
    pub fn gate(&self) -> &SuggestionGate {
        &self.gate
    }

    /// Suggest tasks for `target` given the weekends with completed work.
    pub async fn suggest(&self, history: &[&Weekend], target: WeekendId) -> Suggestion {
        let request = SuggestionRequest::new(history, target);
        match self.provider.suggest(&request).await {
            Ok(suggestion) => {
                tracing::info!(
                    provider = self.provider.name(),
                    weekend = %target,
                    tasks = suggestion.suggested_tasks.len(),
                    "suggestion received"
                );
                suggestion
            }
            Err(err) => {
                tracing::warn!(
                    provider = self.provider.name(),
                    weekend = %target,
                    error = %err,
                    "suggestion failed, serving fallback"
                );
                self.fallback
                    .suggest(&request)
                    .await
                    .unwrap_or_else(|_| Suggestion::fallback())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use resolution_core::model::{Assignment, AssignmentId, Roadmap, SuggestedTask};

    use crate::error::SuggestionError;

    struct FailingProvider;

    #[async_trait]
    impl SuggestionProvider for FailingProvider {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn suggest(&self, _request: &SuggestionRequest) -> Result<Suggestion, SuggestionError> {
            Err(SuggestionError::EmptyResponse)
        }
    }

    struct FixedProvider(Suggestion);

    #[async_trait]
    impl SuggestionProvider for FixedProvider {
        fn name(&self) -> &'static str {
            "fixed"
        }

        async fn suggest(&self, _request: &SuggestionRequest) -> Result<Suggestion, SuggestionError> {
            Ok(self.0.clone())
        }
    }

    fn roadmap_with_history() -> Roadmap {
        let mut roadmap = Roadmap::seed();
        let id = AssignmentId::new("done");
        roadmap.add_assignment(WeekendId::first(), Assignment::new(id.clone(), "Setup", ""));
        roadmap.toggle_assignment(WeekendId::first(), &id);
        roadmap
    }

    #[tokio::test]
    async fn failing_provider_always_yields_fallback() {
        let gateway = SuggestionGateway::new(Arc::new(FailingProvider));
        let with_history = roadmap_with_history();
        let target = WeekendId::new(2).unwrap();

        let empty = gateway.suggest(&[], target).await;
        let full = gateway.suggest(&with_history.history(), target).await;

        assert_eq!(empty, Suggestion::fallback());
        assert_eq!(full, Suggestion::fallback());
    }

    #[tokio::test]
    async fn unreachable_endpoint_yields_fallback() {
        let gateway = SuggestionGateway::from_config(Some(
            SuggestionConfig::new("key").with_base_url("http://127.0.0.1:9/v1"),
        ));
        assert_eq!(gateway.provider_name(), "chat");

        let suggestion = gateway.suggest(&[], WeekendId::first()).await;
        assert_eq!(suggestion, Suggestion::fallback());
    }

    #[tokio::test]
    async fn schema_violations_from_the_endpoint_yield_fallback() {
        let mut server = mockito::Server::new_async().await;
        let four_tasks = serde_json::json!({
            "suggestedTasks": [
                { "title": "A", "description": "a" },
                { "title": "B", "description": "b" },
                { "title": "C", "description": "c" },
                { "title": "D", "description": "d" }
            ],
            "reasoning": "too much"
        });
        let body = serde_json::json!({
            "choices": [ { "message": { "role": "assistant", "content": four_tasks.to_string() } } ]
        });
        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let gateway = SuggestionGateway::from_config(Some(
            SuggestionConfig::new("key").with_base_url(server.url()),
        ));
        let with_history = roadmap_with_history();
        let suggestion = gateway
            .suggest(&with_history.history(), WeekendId::new(2).unwrap())
            .await;

        mock.assert_async().await;
        assert_eq!(suggestion, Suggestion::fallback());
    }

    #[tokio::test]
    async fn successful_provider_is_passed_through() {
        let expected = Suggestion {
            suggested_tasks: vec![
                SuggestedTask::new("A", "a"),
                SuggestedTask::new("B", "b"),
                SuggestedTask::new("C", "c"),
            ],
            reasoning: "custom".into(),
        };
        let gateway = SuggestionGateway::new(Arc::new(FixedProvider(expected.clone())));
        assert_eq!(gateway.suggest(&[], WeekendId::first()).await, expected);
    }

    #[test]
    fn missing_or_blank_credential_selects_static_provider() {
        assert_eq!(SuggestionGateway::from_config(None).provider_name(), "static");
        assert_eq!(
            SuggestionGateway::from_config(Some(SuggestionConfig::new("  "))).provider_name(),
            "static"
        );
    }
}
