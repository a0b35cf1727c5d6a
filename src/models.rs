//! In this module are declared the entities manipulated by this program

use std::fmt;

use log::trace;
use serde::{Deserialize, Serialize};

/// Represents one vulnerability entry of the catalog.
///
/// Two records with the same `name` are the same vulnerability, whatever
/// their description or link. See [`crate::vulnerabilities::fetchers::merge_batches`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// The identifier of the vulnerability.
    /// Example: CVE-2021-44228
    pub name: String,
    /// The description, with its whitespace collapsed.
    pub description: String,
    /// The link to the vulnerability, as found in the catalog.
    /// It can be relative.
    pub link: String,
}

impl Record {
    /// Creates a new record
    pub fn new(name: &str, description: &str, link: &str) -> Self {
        Record {
            name: name.to_string(),
            description: description.to_string(),
            link: link.to_string(),
        }
    }

    /// Returns the block displayed for this record in a text report.
    /// The block ends with a blank line so blocks can be concatenated.
    pub fn to_formatted_string(&self) -> String {
        format!("{}\n\n", self)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ {} ]\n{}\n{}", self.name, self.description, self.link)
    }
}

/// Represents what the user asked to search for.
#[derive(Clone, Debug, PartialEq)]
pub struct Search {
    /// The keywords, in the order given on the command line.
    pub keywords: Vec<String>,
    /// Whether each keyword is sent as its own query.
    /// Otherwise all keywords are sent together in a single query.
    pub split: bool,
}

impl Search {
    /// Creates a new search
    pub fn new(keywords: &[String], split: bool) -> Self {
        Search {
            keywords: keywords.to_vec(),
            split,
        }
    }

    /// Returns the queries to send to the catalog, one per worker.
    pub fn queries(&self) -> Vec<String> {
        trace!("Running Search::queries()");
        if self.split {
            self.keywords.clone()
        } else {
            vec![self.keywords.join(" ")]
        }
    }

    /// Returns the key identifying this search in the cache.
    ///
    /// Keywords are joined with underscores, whatever the query mode, and
    /// path separators are replaced by underscores. Other characters
    /// reserved by some filesystems are kept as is.
    pub fn cache_key(&self) -> String {
        self.keywords.join("_").replace(['/', '\\'], "_")
    }
}
