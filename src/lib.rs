//! admin-pwa - PWA support for a Directus-style admin application.
//!
//! This library serves a dynamically generated web-app manifest and a
//! generated service-worker script, and provides the HTML snippets a host
//! application injects into its admin pages to register that worker. The
//! client-side caching rules are modeled as a versioned [`CachePolicy`]
//! object compiled to script text, so they are testable without a browser.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use admin_pwa::{CachePolicy, ProjectSettings, StaticSettings, api};
//!
//! # async fn example() -> admin_pwa::Result<()> {
//! let reader = StaticSettings(ProjectSettings {
//!     project_name: Some("Intranet".to_string()),
//!     ..ProjectSettings::default()
//! });
//!
//! // Mount GET /pwa/manifest.json and GET /pwa/sw.js
//! let app = api::router(Arc::new(reader), &CachePolicy::default());
//! api::run_server("127.0.0.1", api::DEFAULT_PORT, app).await?;
//! # Ok(())
//! # }
//! ```

#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod api;
pub mod color;
pub mod config;
pub mod embed;
pub mod error;
pub mod manifest;
pub mod policy;
pub mod settings;

// Re-export main types for convenience
pub use color::normalize_color;
pub use config::{ApiConfig, AppConfig, DirectusConfig, PwaConfig};
pub use error::{Error, Result};
pub use manifest::{IconEntry, Manifest, ScreenshotEntry, build_manifest};
pub use policy::{CachePolicy, FetchDecision, Strategy};
pub use settings::{HttpSettingsReader, ProjectSettings, SettingsReader, StaticSettings};
