//! Harbor Lookup - duplicate tag resolution for container registries
//!
//! Given a repository and a source tag, this crate lists the repository's
//! tags from the registry and reports every tag that points at the same
//! manifest digest as the source tag.

pub mod cli;
pub mod registry;
pub mod resolver;

use thiserror::Error;

/// Main error type for lookup operations
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to decode tag listing: {0}")]
    Decode(String),

    #[error("Registry returned {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Invalid header value: {0}")]
    InvalidHeader(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, LookupError>;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "harbor-lookup";
