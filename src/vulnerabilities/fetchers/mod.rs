//! The module fetchers defines the vulnerabilities fetchers.
pub mod keyword;

pub use keyword::KeywordFetcher;

use std::collections::HashSet;

use async_trait::async_trait;
use log::trace;

use crate::errors::VulnError;
use crate::models::Record;

/// A common interface between all vulnerabilities fetchers.
#[async_trait]
pub trait VulnFetcher: Send + Sync {
    /// Fetches the records of every query.
    /// A failing query never prevents the others from being fetched.
    async fn fetch(&self, queries: &[String]) -> FetchOutcome;
}

/// What a fetcher gathered.
#[derive(Debug)]
pub struct FetchOutcome {
    /// The records of all queries, without duplicates.
    pub records: Vec<Record>,
    /// The queries which contributed nothing because of an error.
    pub failures: Vec<QueryFailure>,
}

/// A query which failed.
#[derive(Debug)]
pub struct QueryFailure {
    pub query: String,
    pub error: VulnError,
}

/// Merges batches of records in a single list.
///
/// Batches are taken in the given order, and each batch in its own order.
/// A record is kept only if no record with the same name was kept before.
pub fn merge_batches<I>(batches: I) -> Vec<Record>
where
    I: IntoIterator<Item = Vec<Record>>,
{
    trace!("Running merge_batches()");
    let mut seen: HashSet<String> = HashSet::new();
    let mut records = Vec::new();
    for batch in batches {
        for record in batch {
            if seen.insert(record.name.clone()) {
                records.push(record);
            } else {
                trace!("Discarding duplicate {}", record.name);
            }
        }
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_record_with_a_name_wins() {
        let a = vec![
            Record::new("CVE-2020-0001", "from a", "la"),
            Record::new("CVE-2020-0002", "only a", "la"),
        ];
        let b = vec![
            Record::new("CVE-2020-0003", "only b", "lb"),
            Record::new("CVE-2020-0001", "from b", "lb"),
        ];
        let merged = merge_batches(vec![a, b]);
        assert_eq!(3, merged.len());
        assert_eq!(Record::new("CVE-2020-0001", "from a", "la"), merged[0]);
        assert_eq!("CVE-2020-0002", merged[1].name);
        assert_eq!("CVE-2020-0003", merged[2].name);
    }

    #[test]
    fn removes_duplicates_inside_a_batch() {
        let a = vec![
            Record::new("CVE-2020-0001", "first", "l"),
            Record::new("CVE-2020-0001", "second", "l"),
        ];
        let merged = merge_batches(vec![a]);
        assert_eq!(vec![Record::new("CVE-2020-0001", "first", "l")], merged);
    }

    #[test]
    fn no_batch_gives_nothing() {
        assert!(merge_batches(Vec::new()).is_empty());
    }
}
