use thiserror::Error;
use url::Url;

/// Persisted configuration for the suggestion provider.
///
/// Blank values are normalised to `None`; a missing key means suggestions are
/// served from the static fallback.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppSettings {
    api_key: Option<String>,
    api_model: Option<String>,
    api_base_url: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct AppSettingsDraft {
    pub api_key: Option<String>,
    pub api_model: Option<String>,
    pub api_base_url: Option<String>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AppSettingsError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl AppSettingsDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a draft from existing settings so unspecified fields are kept.
    #[must_use]
    pub fn from_settings(settings: &AppSettings) -> Self {
        Self {
            api_key: settings.api_key.clone(),
            api_model: settings.api_model.clone(),
            api_base_url: settings.api_base_url.clone(),
        }
    }

    /// Validate and normalize the draft into persisted settings.
    ///
    /// # Errors
    ///
    /// Returns `AppSettingsError` if the base URL is present but invalid.
    pub fn validate(self) -> Result<AppSettings, AppSettingsError> {
        let api_key = normalize_optional(self.api_key);
        let api_model = normalize_optional(self.api_model);
        let api_base_url = normalize_optional(self.api_base_url);

        if let Some(url) = api_base_url.as_ref() {
            if Url::parse(url).is_err() {
                return Err(AppSettingsError::InvalidBaseUrl(url.clone()));
            }
        }

        Ok(AppSettings {
            api_key,
            api_model,
            api_base_url,
        })
    }
}

impl AppSettings {
    /// Rebuild settings from stored columns.
    ///
    /// # Errors
    ///
    /// Returns `AppSettingsError` if the stored base URL no longer parses.
    pub fn from_persisted(
        api_key: Option<String>,
        api_model: Option<String>,
        api_base_url: Option<String>,
    ) -> Result<Self, AppSettingsError> {
        AppSettingsDraft {
            api_key,
            api_model,
            api_base_url,
        }
        .validate()
    }

    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    #[must_use]
    pub fn api_model(&self) -> Option<&str> {
        self.api_model.as_deref()
    }

    #[must_use]
    pub fn api_base_url(&self) -> Option<&str> {
        self.api_base_url.as_deref()
    }

    #[must_use]
    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// The key with everything but the last four characters hidden.
    #[must_use]
    pub fn masked_api_key(&self) -> Option<String> {
        self.api_key.as_deref().map(|key| {
            let visible: String = key
                .chars()
                .rev()
                .take(4)
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect();
            format!("****{visible}")
        })
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}
