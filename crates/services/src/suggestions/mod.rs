//! Suggestion Gateway: turns completed history into candidate assignments.
//!
//! A `SuggestionProvider` does the actual work. The gateway prefers the
//! network-backed chat provider when a credential is configured and always
//! answers, falling back to the static provider on any failure.

mod chat;
mod gate;
mod gateway;
mod prompt;
mod provider;

pub use chat::{ChatSuggestionProvider, SuggestionConfig};
pub use gate::{SuggestionGate, SuggestionPermit};
pub use gateway::SuggestionGateway;
pub use prompt::{build_prompt, response_schema};
pub use provider::{StaticSuggestionProvider, SuggestionProvider, SuggestionRequest};
