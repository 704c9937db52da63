//! Project settings and the settings-read capability.
//!
//! The manifest is derived from display settings owned by the host
//! application. Access goes through the [`SettingsReader`] trait so the
//! builder can be exercised with fixed fixtures instead of a live store.

use async_trait::async_trait;
use serde::Deserialize;

use crate::Result;

/// Settings fields requested from the host settings endpoint.
pub const SETTINGS_FIELDS: &[&str] = &[
    "project_name",
    "project_descriptor",
    "project_color",
    "project_logo",
    "public_background",
];

/// Display settings read from the host's settings store.
///
/// Every field is optional; the manifest builder supplies fallbacks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProjectSettings {
    /// Project display name.
    pub project_name: Option<String>,
    /// Short project description.
    pub project_descriptor: Option<String>,
    /// Theme color, expected as a hex string.
    pub project_color: Option<String>,
    /// Asset id of the configured project logo.
    pub project_logo: Option<String>,
    /// Background color, expected as a hex string.
    pub public_background: Option<String>,
}

/// Abstraction over the host's settings store for testability.
#[async_trait]
pub trait SettingsReader: Send + Sync {
    /// Reads the singleton project settings record.
    async fn read(&self) -> Result<ProjectSettings>;
}

/// Fixed in-memory settings, for tests and hostless deployments.
#[derive(Debug, Clone, Default)]
pub struct StaticSettings(pub ProjectSettings);

#[async_trait]
impl SettingsReader for StaticSettings {
    async fn read(&self) -> Result<ProjectSettings> {
        Ok(self.0.clone())
    }
}

/// The host wraps settings responses in a `data` envelope.
#[derive(Deserialize)]
struct SettingsEnvelope {
    data: ProjectSettings,
}

/// Settings reader backed by the host's `/settings` endpoint.
///
/// Requests only the fields the manifest needs and authenticates with a
/// static admin token when one is configured (the elevated access context
/// the settings endpoint requires).
pub struct HttpSettingsReader {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpSettingsReader {
    /// Creates a reader for the host at `base_url` (trailing slash ignored).
    #[must_use]
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }
}

#[async_trait]
impl SettingsReader for HttpSettingsReader {
    async fn read(&self) -> Result<ProjectSettings> {
        let url = format!(
            "{}/settings?fields={}",
            self.base_url,
            SETTINGS_FIELDS.join(",")
        );
        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?.error_for_status()?;
        let envelope: SettingsEnvelope = response.json().await?;
        Ok(envelope.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_settings_round_trip() {
        let reader = StaticSettings(ProjectSettings {
            project_name: Some("Intranet".to_string()),
            ..ProjectSettings::default()
        });
        let settings = reader.read().await.unwrap();
        assert_eq!(settings.project_name.as_deref(), Some("Intranet"));
        assert_eq!(settings.project_logo, None);
    }

    #[test]
    fn envelope_deserializes_sparse_payload() {
        let json = r##"{"data": {"project_name": "Intranet", "project_color": "#123abc"}}"##;
        let envelope: SettingsEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.data.project_name.as_deref(), Some("Intranet"));
        assert_eq!(envelope.data.project_color.as_deref(), Some("#123abc"));
        assert_eq!(envelope.data.public_background, None);
    }

    #[test]
    fn envelope_tolerates_explicit_nulls() {
        let json = r#"{"data": {"project_name": null, "project_logo": null}}"#;
        let envelope: SettingsEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.data, ProjectSettings::default());
    }

    #[test]
    fn reader_url_strips_trailing_slash() {
        let reader = HttpSettingsReader::new("http://localhost:8055/", None);
        assert_eq!(reader.base_url, "http://localhost:8055");
    }
}
