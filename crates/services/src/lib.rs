#![forbid(unsafe_code)]

pub mod app_services;
pub mod app_settings_service;
pub mod error;
pub mod roadmap_service;
pub mod roadmap_session;
pub mod suggestions;

pub use resolution_core::Clock;

pub use app_services::AppServices;
pub use app_settings_service::AppSettingsService;
pub use error::{AppServicesError, AppSettingsServiceError, RoadmapServiceError, SuggestionError};
pub use roadmap_service::RoadmapService;
pub use roadmap_session::{RoadmapSession, SuggestOutcome};
pub use suggestions::{
    ChatSuggestionProvider, StaticSuggestionProvider, SuggestionConfig, SuggestionGate,
    SuggestionGateway, SuggestionPermit, SuggestionProvider, SuggestionRequest,
};
