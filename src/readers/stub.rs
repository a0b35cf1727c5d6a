//! A reader serving canned pages, for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use super::Reader;
use crate::errors::FetchError;

/// Serves the page registered for a query, and a 404 for unknown queries.
pub struct StubReader {
    pages: HashMap<String, String>,
    /// Number of requests received
    pub calls: Arc<AtomicUsize>,
}

impl StubReader {
    pub fn new(pages: &[(&str, String)]) -> Self {
        StubReader {
            pages: pages
                .iter()
                .map(|(query, page)| (query.to_string(), page.clone()))
                .collect(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl Reader for StubReader {
    async fn read(&self, query: &str) -> Result<Vec<u8>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.pages.get(query) {
            Some(page) => Ok(page.as_bytes().to_vec()),
            None => Err(FetchError::Status(404)),
        }
    }
}

/// Builds a search page listing the given (name, description) rows.
pub fn page(rows: &[(&str, &str)]) -> String {
    let rows: String = rows
        .iter()
        .map(|(name, description)| {
            format!(
                "<tr><td><a href=\"/cve/{}\">{}</a></td><td>{}</td></tr>",
                name, name, description
            )
        })
        .collect();
    format!(
        "<html><body><div id=\"TableWithRules\"><table>\
<tr><th>Name</th><th>Description</th></tr>{}</table></div></body></html>",
        rows
    )
}
