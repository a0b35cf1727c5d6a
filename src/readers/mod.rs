//! This module declares all readers.
//! A reader is used to fetch data over the network. Its objective is to
//! hand the raw catalog documents to an extractor, so the rest of the
//! program doesn't have to care about the transport.

pub mod http;

use async_trait::async_trait;

use crate::errors::FetchError;

/// A common interface between all readers.
///
/// Readers are shared between the workers of a
/// [`crate::vulnerabilities::fetchers::KeywordFetcher`], hence the
/// `Send + Sync` bound.
#[async_trait]
pub trait Reader: Send + Sync {
    /// Fetches the raw document listing the vulnerabilities matching
    /// the given query.
    /// A single attempt is made, there is no retry.
    async fn read(&self, query: &str) -> Result<Vec<u8>, FetchError>;
}

#[cfg(test)]
pub mod stub;
