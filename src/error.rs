//! Error types for the admin-pwa library.

use thiserror::Error;

/// Errors that can occur while serving PWA resources.
#[derive(Error, Debug)]
pub enum Error {
    /// Reading project settings from the host store failed.
    #[error("settings read failed: {0}")]
    Settings(String),

    /// HTTP request error while talking to the host.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O error during server operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed.
    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),

    /// Server bind address could not be parsed.
    #[error("invalid bind address: {0}")]
    Addr(#[from] std::net::AddrParseError),
}

/// A specialized `Result` type for admin-pwa operations.
pub type Result<T> = std::result::Result<T, Error>;
