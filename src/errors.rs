//! Errors
//!
//! Every failure the pipeline can meet has its own type here. None of them
//! is fatal on its own: the [`crate::application::Application`] decides
//! whether an error means "skip this query", "treat the cache as missing"
//! or "continue without saving".

use std::path::PathBuf;

use thiserror::Error;

/// An error raised while fetching one query from the catalog.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be sent or the body could not be read.
    #[error("error while sending the HTTP request: {0}")]
    Transport(#[from] reqwest::Error),
    /// The catalog answered with a status outside [200, 300).
    #[error("received unexpected status code: {0}")]
    Status(u16),
}

/// An error raised when the extractor cannot be built or cannot read a document.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A CSS selector used by the extractor is invalid.
    #[error("invalid selector \"{0}\"")]
    Selector(String),
    /// A regex used by the extractor is invalid.
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// The failure of one query, fetch or parse.
#[derive(Debug, Error)]
pub enum VulnError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// An error raised by a cache manager.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("unable to read the file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Deserialize {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("unable to serialize the records for {path}: {source}")]
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("unable to create the directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("unable to write the file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// An invalid invocation.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("at least one keyword is required")]
    NoKeywords,
    #[error("invalid keyword \"{0}\": keywords can't start with '-'")]
    FlagLikeKeyword(String),
}

/// An error preventing the application from running at all.
#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("unable to start the async runtime: {0}")]
    Runtime(#[from] std::io::Error),
}
