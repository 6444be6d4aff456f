//! Error types for workbc.
//!
//! Library-level failures are typed here; command handlers wrap them in
//! `anyhow` and `main` turns them into a single failure line. Messages do
//! not repeat their source, the full chain is printed with `{:#}`.

use std::path::PathBuf;
use thiserror::Error;

/// Failures talking to the job board API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The configured base URL cannot be used to build request URLs.
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The HTTP client itself could not be set up (TLS backend, resolver).
    #[error("Failed to create HTTP client")]
    Client(#[source] reqwest::Error),

    /// Connection refused, DNS failure, timeout and friends.
    #[error("Request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("Request failed with status code {status} ({url})")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The body was not valid JSON.
    #[error("Failed to parse response from {url}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Failures reading or writing the configuration store.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Unknown configuration key '{0}' (expected: baseUrl)")]
    UnknownKey(String),

    #[error("Failed to write config to {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize configuration")]
    Serialize(#[from] toml::ser::Error),
}
