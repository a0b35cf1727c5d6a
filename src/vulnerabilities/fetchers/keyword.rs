//! This module implements a vulnerability fetcher which sends one query per
//! keyword to the catalog, all of them in parallel.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use log::{debug, error, info, trace};
use tokio::sync::mpsc;

use super::{merge_batches, FetchOutcome, QueryFailure, VulnFetcher};
use crate::errors::VulnError;
use crate::extractors::Extractor;
use crate::models::Record;
use crate::readers::Reader;

/// This struct represents the keyword fetcher.
///
/// Every query runs in its own task. A task only owns a sender of the
/// channel, the records are merged once all tasks are finished, so nothing
/// is shared while the requests run.
pub struct KeywordFetcher {
    /// Fetches the documents
    reader: Arc<dyn Reader>,
    /// Reads the records in the documents
    extractor: Arc<dyn Extractor>,
}

impl KeywordFetcher {
    pub fn new(reader: Arc<dyn Reader>, extractor: Arc<dyn Extractor>) -> Self {
        Self { reader, extractor }
    }
}

/// Fetches and extracts the records of one query.
async fn fetch_one(
    reader: &dyn Reader,
    extractor: &dyn Extractor,
    query: &str,
) -> Result<Vec<Record>, VulnError> {
    trace!("Running fetch_one() for {}", query);
    let document = reader.read(query).await?;
    Ok(extractor.extract(&document)?)
}

#[async_trait]
impl VulnFetcher for KeywordFetcher {
    async fn fetch(&self, queries: &[String]) -> FetchOutcome {
        trace!("Running KeywordFetcher::fetch()");
        // Every task sends at most once, so sending never waits
        let (sender, mut receiver) = mpsc::channel::<Vec<Record>>(queries.len().max(1));

        let mut handles = Vec::new();
        for query in queries {
            let sender = sender.clone();
            let reader = Arc::clone(&self.reader);
            let extractor = Arc::clone(&self.extractor);
            let query = query.clone();
            debug!("Spawning the task for query \"{}\"", query);
            handles.push(tokio::spawn(async move {
                match fetch_one(reader.as_ref(), extractor.as_ref(), &query).await {
                    Ok(records) => {
                        info!("{} records found for \"{}\"", records.len(), query);
                        if sender.send(records).await.is_err() {
                            error!("The receiver is closed, records of \"{}\" are lost", query);
                        }
                        Ok(())
                    }
                    Err(error) => {
                        error!("Query \"{}\" failed: {}", query, error);
                        Err(QueryFailure { query, error })
                    }
                }
            }));
        }
        // The receiver ends once the last task drops its sender
        drop(sender);

        trace!("Waiting for all the tasks to be finished");
        let mut failures = Vec::new();
        for result in join_all(handles).await {
            match result {
                Ok(Ok(())) => {}
                Ok(Err(failure)) => failures.push(failure),
                Err(e) => error!("A fetching task stopped unexpectedly: {}", e),
            }
        }

        let mut batches = Vec::new();
        while let Some(batch) = receiver.recv().await {
            batches.push(batch);
        }
        debug!("{} batches received, merging", batches.len());

        FetchOutcome {
            records: merge_batches(batches),
            failures,
        }
    }
}
