use async_trait::async_trait;
use resolution_core::model::{Suggestion, Weekend, WeekendId, progress_summary};

use crate::error::SuggestionError;

use super::prompt::build_prompt;

/// Input to a provider: what the user has done and which weekend to fill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionRequest {
    pub target: WeekendId,
    pub progress_summary: String,
}

impl SuggestionRequest {
    /// Build a request from the weekends that have completed work.
    #[must_use]
    pub fn new(history: &[&Weekend], target: WeekendId) -> Self {
        Self {
            target,
            progress_summary: progress_summary(history),
        }
    }

    #[must_use]
    pub fn prompt(&self) -> String {
        build_prompt(&self.progress_summary, self.target)
    }
}

/// Source of weekend suggestions.
#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    /// Short label used in logs.
    fn name(&self) -> &'static str;

    /// Produce suggested tasks for `request.target`.
    ///
    /// # Errors
    ///
    /// Returns `SuggestionError` when no usable suggestion can be produced.
    async fn suggest(&self, request: &SuggestionRequest) -> Result<Suggestion, SuggestionError>;
}

/// Always answers with the fixed fallback suggestion.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticSuggestionProvider;

#[async_trait]
impl SuggestionProvider for StaticSuggestionProvider {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn suggest(&self, _request: &SuggestionRequest) -> Result<Suggestion, SuggestionError> {
        Ok(Suggestion::fallback())
    }
}
