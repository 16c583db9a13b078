use serde::{Deserialize, Serialize};
use web_sys::Storage;

use super::constants::SETTINGS_STORAGE_KEY;

/// API environment the page talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiEnvironment {
    /// Local API started next to the frontend
    Development,
    /// Staging API with test data
    Staging,
    /// Production API
    Production,
}

impl ApiEnvironment {
    /// Default GraphQL endpoint of the environment
    pub fn graphql_endpoint(&self) -> &'static str {
        match self {
            ApiEnvironment::Development => "http://localhost:3060/graphql",
            ApiEnvironment::Staging => "https://api-staging.opencollective.com/graphql",
            ApiEnvironment::Production => "https://api.opencollective.com/graphql",
        }
    }

    /// Public website base, shown in front of the collective slug input
    pub fn website_base(&self) -> &'static str {
        match self {
            ApiEnvironment::Development => "http://localhost:3000/",
            ApiEnvironment::Staging => "https://staging.opencollective.com/",
            ApiEnvironment::Production => "https://opencollective.com/",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppSettings {
    pub environment: ApiEnvironment,
    /// Overrides the environment endpoint when not blank
    #[serde(default)]
    pub custom_api_url: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            environment: ApiEnvironment::Production,
            custom_api_url: String::new(),
        }
    }
}

impl AppSettings {
    fn local_storage() -> Option<Storage> {
        web_sys::window()
            .and_then(|win| win.local_storage().ok().flatten())
    }

    /// Load settings from local storage. Missing settings are written back
    /// as defaults so they can be edited in place.
    pub fn load() -> Self {
        let stored = Self::local_storage()
            .and_then(|storage| storage.get_item(SETTINGS_STORAGE_KEY).ok().flatten());

        match stored {
            Some(value) => Self::from_json(&value),
            None => {
                let settings = Self::default();
                if let Err(e) = settings.save() {
                    log::debug!("Settings not persisted: {}", e);
                }
                settings
            }
        }
    }

    pub fn save(&self) -> Result<(), String> {
        let storage = Self::local_storage().ok_or_else(|| "Local storage not available".to_string())?;
        let serialized = self.to_json()?;

        storage
            .set_item(SETTINGS_STORAGE_KEY, &serialized)
            .map_err(|_| "Failed to write settings to local storage".to_string())
    }

    fn to_json(&self) -> Result<String, String> {
        serde_json::to_string(self)
            .map_err(|e| format!("Failed to serialize settings: {e}"))
    }

    fn from_json(value: &str) -> Self {
        serde_json::from_str(value).unwrap_or_else(|e| {
            log::warn!("Ignoring unreadable settings: {}", e);
            Self::default()
        })
    }

    pub fn graphql_endpoint(&self) -> String {
        let trimmed = self.custom_api_url.trim();
        if trimmed.is_empty() {
            self.environment.graphql_endpoint().to_string()
        } else {
            trimmed.to_string()
        }
    }

    pub fn website_base(&self) -> &'static str {
        self.environment.website_base()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_use_production() {
        let settings = AppSettings::default();
        assert_eq!(settings.environment, ApiEnvironment::Production);
        assert_eq!(settings.graphql_endpoint(), "https://api.opencollective.com/graphql");
        assert_eq!(settings.website_base(), "https://opencollective.com/");
    }

    #[test]
    fn test_custom_endpoint_overrides_environment() {
        let settings = AppSettings {
            environment: ApiEnvironment::Staging,
            custom_api_url: "  http://127.0.0.1:4000/graphql ".to_string(),
        };
        assert_eq!(settings.graphql_endpoint(), "http://127.0.0.1:4000/graphql");

        let blank = AppSettings {
            environment: ApiEnvironment::Staging,
            custom_api_url: "   ".to_string(),
        };
        assert_eq!(blank.graphql_endpoint(), ApiEnvironment::Staging.graphql_endpoint());
    }

    #[test]
    fn test_settings_json() {
        let settings = AppSettings::from_json(r#"{"environment":"Development"}"#);
        assert_eq!(settings.environment, ApiEnvironment::Development);
        assert!(settings.custom_api_url.is_empty());

        let broken = AppSettings::from_json("not json");
        assert_eq!(broken.environment, ApiEnvironment::Production);
    }

    #[test]
    fn test_saved_json_loads_back() {
        let settings = AppSettings {
            environment: ApiEnvironment::Staging,
            custom_api_url: "http://127.0.0.1:4000/graphql".to_string(),
        };
        let json = settings.to_json().unwrap();
        assert_eq!(
            json,
            r#"{"environment":"Staging","custom_api_url":"http://127.0.0.1:4000/graphql"}"#
        );

        let loaded = AppSettings::from_json(&json);
        assert_eq!(loaded.environment, ApiEnvironment::Staging);
        assert_eq!(loaded.graphql_endpoint(), "http://127.0.0.1:4000/graphql");
    }
}
