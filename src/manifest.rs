//! PWA manifest model and its pure builder.

use serde::Serialize;

use crate::color::{DEFAULT_BACKGROUND, DEFAULT_THEME, normalize_color};
use crate::settings::ProjectSettings;

/// Fallback name when the host has no project name configured.
const DEFAULT_NAME: &str = "Directus";

/// Fallback description when the host has no descriptor configured.
const DEFAULT_DESCRIPTION: &str = "Directus Admin App";

/// Icon served when no project logo is configured.
const FALLBACK_ICON: &str = "/admin/favicon.ico";

/// An installable-app icon entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IconEntry {
    /// Asset URL.
    pub src: String,
    /// Dimensions as a "WxH" string.
    pub sizes: String,
    /// MIME type.
    #[serde(rename = "type")]
    pub mime_type: String,
    /// Icon purpose tag.
    pub purpose: String,
}

/// A store-listing screenshot entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScreenshotEntry {
    /// Asset URL.
    pub src: String,
    /// Dimensions as a "WxH" string.
    pub sizes: String,
    /// MIME type.
    #[serde(rename = "type")]
    pub mime_type: String,
    /// "wide" or "narrow".
    pub form_factor: String,
}

/// A complete web-app manifest, derived from project settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Manifest {
    /// Application name.
    pub name: String,
    /// Short application name.
    pub short_name: String,
    /// Application description.
    pub description: String,
    /// URL opened when the installed app launches.
    pub start_url: String,
    /// Display mode.
    pub display: String,
    /// Splash-screen background color.
    pub background_color: String,
    /// Browser chrome theme color.
    pub theme_color: String,
    /// App icons at 192x192 and 512x512.
    pub icons: Vec<IconEntry>,
    /// Wide and narrow store screenshots.
    pub screenshots: Vec<ScreenshotEntry>,
    /// Preferred orientation.
    pub orientation: String,
    /// Store categories.
    pub categories: Vec<String>,
}

/// Derives an asset URL for the configured logo, sized server-side via
/// query parameters, or the fixed fallback icon when no logo is set.
fn asset_src(logo: Option<&str>, width: u32, height: u32, fit: &str) -> String {
    logo.map_or_else(
        || FALLBACK_ICON.to_string(),
        |id| format!("/assets/{id}?width={width}&height={height}&fit={fit}"),
    )
}

/// Builds a complete manifest from (possibly sparse) project settings.
///
/// Pure and deterministic: equal settings always yield an equal manifest,
/// and every required field is populated via fallbacks.
#[must_use]
pub fn build_manifest(settings: &ProjectSettings) -> Manifest {
    let name = settings
        .project_name
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_NAME)
        .to_string();
    let description = settings
        .project_descriptor
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_DESCRIPTION)
        .to_string();
    let logo = settings.project_logo.as_deref();

    Manifest {
        short_name: name.clone(),
        name,
        description,
        start_url: "/admin/".to_string(),
        display: "standalone".to_string(),
        background_color: normalize_color(
            settings.public_background.as_deref(),
            DEFAULT_BACKGROUND,
        ),
        theme_color: normalize_color(settings.project_color.as_deref(), DEFAULT_THEME),
        icons: vec![
            IconEntry {
                src: asset_src(logo, 192, 192, "contain"),
                sizes: "192x192".to_string(),
                mime_type: "image/png".to_string(),
                purpose: "any".to_string(),
            },
            IconEntry {
                src: asset_src(logo, 512, 512, "contain"),
                sizes: "512x512".to_string(),
                mime_type: "image/png".to_string(),
                purpose: "any".to_string(),
            },
        ],
        screenshots: vec![
            ScreenshotEntry {
                src: asset_src(logo, 1280, 720, "cover"),
                sizes: "1280x720".to_string(),
                mime_type: "image/png".to_string(),
                form_factor: "wide".to_string(),
            },
            ScreenshotEntry {
                src: asset_src(logo, 750, 1334, "cover"),
                sizes: "750x1334".to_string(),
                mime_type: "image/png".to_string(),
                form_factor: "narrow".to_string(),
            },
        ],
        orientation: "portrait-primary".to_string(),
        categories: vec!["productivity".to_string(), "business".to_string()],
    }
}
