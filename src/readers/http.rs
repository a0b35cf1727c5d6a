//! Fetch catalog documents over HTTP(S)
//!
//! The [`HttpReader`] sends one GET request per query to the keyword-search
//! endpoint of the catalog, and returns the body of the response.

use async_trait::async_trait;
use log::{debug, error, trace};
use reqwest::Client;

use super::Reader;
use crate::errors::FetchError;

/// The keyword-search endpoint used by default.
pub const DEFAULT_CATALOG_URL: &str = "https://cve.mitre.org/cgi-bin/cvekey.cgi";

/// A reader fetching the keyword-search page of the catalog.
pub struct HttpReader {
    /// The HTTP client, shared by all the requests.
    http_client: Client,
    /// The URL of the keyword-search endpoint.
    catalog_url: String,
}

impl HttpReader {
    /// Creates a new HttpReader sending requests to `catalog_url`
    pub fn new(catalog_url: &str) -> Self {
        HttpReader {
            http_client: Client::new(),
            catalog_url: catalog_url.to_string(),
        }
    }

    /// Builds the URL to request for a given query.
    ///
    /// # Example
    /// With the default catalog URL, the query "log4j 2" gives
    /// https://cve.mitre.org/cgi-bin/cvekey.cgi?keyword=log4j%202
    pub fn search_url(&self, query: &str) -> String {
        format!(
            "{}?keyword={}",
            self.catalog_url,
            urlencoding::encode(query)
        )
    }
}

#[async_trait]
impl Reader for HttpReader {
    /// Sends the HTTP request and reads the body.
    /// Only a status in [200, 300) is a success. In any other case the
    /// response is dropped, which releases its body.
    async fn read(&self, query: &str) -> Result<Vec<u8>, FetchError> {
        trace!("Running HttpReader::read()");
        let url = self.search_url(query);
        debug!("Sending HTTP request for URL {}", url);
        let response = self
            .http_client
            .get(&url)
            .header("Accept", "text/html")
            .send()
            .await
            .map_err(|e| {
                error!("An error occured in the HTTP request to {}: {:?}", url, e);
                FetchError::Transport(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("Invalid HTTP response code for {}: {}", url, status);
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        debug!("Received {} bytes from {}", body.len(), url);
        Ok(body.to_vec())
    }
}
