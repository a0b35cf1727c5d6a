//! Writing the report
//!
//! Once the records are gathered, they are sorted, filtered, then handed to
//! a writer. The writer decides how they look: a text block per record on
//! standard output, or a JSON array.

pub mod json;
pub mod textstdout;

use clap::{builder::PossibleValue, ValueEnum};
use log::{debug, trace};

use crate::models::Record;

/// The prefix removed from a name before reading its number.
const NAME_PREFIX: &str = "CVE-";

/// A trait to have a common interface between writers.
pub trait Writer {
    /// Renders the records, already sorted and filtered, in one string.
    fn render(&self, records: &[Record]) -> String;
}

/// An enum to match the available writers
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Writers {
    /// TextStdoutWriter
    TextStdout,
    /// JsonWriter
    Json,
}

impl Writers {
    /// Creates the matching writer
    pub fn build(&self) -> Box<dyn Writer> {
        match self {
            Self::TextStdout => Box::new(textstdout::TextStdoutWriter::new()),
            Self::Json => Box::new(json::JsonWriter::new()),
        }
    }
}

impl ValueEnum for Writers {
    /// Lists the variants available for clap
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::TextStdout, Self::Json]
    }

    /// Map each value to a possible value in clap
    fn to_possible_value(&self) -> Option<PossibleValue> {
        match &self {
            Self::TextStdout => Some(PossibleValue::new("textstdout")),
            Self::Json => Some(PossibleValue::new("json")),
        }
    }
}

/// Returns the number used to sort a record.
///
/// The prefix and all hyphens are removed from the name, and the rest is
/// read as an integer. A name which isn't a number after that gives 0.
///
/// # Example
/// CVE-2021-44228 gives 202144228
pub fn sort_key(name: &str) -> i64 {
    name.replace(NAME_PREFIX, "")
        .replace('-', "")
        .parse::<i64>()
        .unwrap_or(0)
}

/// Sorts the records by [`sort_key`], in ascending order unless `reverse`.
/// Records with the same key keep their relative order.
pub fn sort_records(records: &mut [Record], reverse: bool) {
    trace!("Running sort_records()");
    if reverse {
        records.sort_by_cached_key(|r| std::cmp::Reverse(sort_key(&r.name)));
    } else {
        records.sort_by_cached_key(|r| sort_key(&r.name));
    }
}

/// A case-insensitive filter on the records.
#[derive(Clone, Debug)]
pub struct Filter {
    /// The filter, lowercase
    filter: String,
    /// What is searched in the descriptions
    word: String,
}

impl Filter {
    /// Creates a filter.
    /// A filter containing a dot is searched as is in the descriptions,
    /// otherwise it is searched as a whole word.
    pub fn new(filter: &str) -> Self {
        let filter = filter.to_lowercase();
        let word = if filter.contains('.') {
            filter.clone()
        } else {
            format!(" {} ", filter)
        };
        Filter { filter, word }
    }

    /// Checks whether a record passes the filter.
    /// An empty filter lets everything pass.
    pub fn matches(&self, record: &Record) -> bool {
        if self.filter.is_empty() {
            return true;
        }
        record.name.to_lowercase().contains(&self.filter)
            || format!(" {} ", record.description.to_lowercase()).contains(&self.word)
    }
}

/// Sorts and filters the records before they are written.
pub struct Report {
    filter: Filter,
    reverse: bool,
}

impl Report {
    pub fn new(filter: &str, reverse: bool) -> Self {
        Report {
            filter: Filter::new(filter),
            reverse,
        }
    }

    /// Returns the records to write, in the order to write them.
    pub fn prepare(&self, mut records: Vec<Record>) -> Vec<Record> {
        trace!("Running Report::prepare()");
        sort_records(&mut records, self.reverse);
        records.retain(|r| self.filter.matches(r));
        debug!("{} records left after filtering", records.len());
        records
    }

    /// Sorts, filters and renders the records with the given writer.
    pub fn render(&self, records: Vec<Record>, writer: &dyn Writer) -> String {
        writer.render(&self.prepare(records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(records: &[Record]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn computes_sort_keys() {
        assert_eq!(202144228, sort_key("CVE-2021-44228"));
        assert_eq!(20200001, sort_key("CVE-2020-0001"));
        assert_eq!(0, sort_key("not a cve"));
        assert_eq!(0, sort_key(""));
    }

    #[test]
    fn sorts_ascending_and_reversed() {
        let mut records = vec![
            Record::new("CVE-2021-45046", "desc B", "link B"),
            Record::new("CVE-2021-44228", "desc A", "link A"),
            Record::new("CVE-2019-9999", "older", "l"),
        ];
        sort_records(&mut records, false);
        assert_eq!(
            vec!["CVE-2019-9999", "CVE-2021-44228", "CVE-2021-45046"],
            names(&records)
        );
        sort_records(&mut records, true);
        assert_eq!(
            vec!["CVE-2021-45046", "CVE-2021-44228", "CVE-2019-9999"],
            names(&records)
        );
    }

    #[test]
    fn malformed_names_sort_first() {
        let mut records = vec![
            Record::new("CVE-2020-0001", "", ""),
            Record::new("garbage", "", ""),
        ];
        sort_records(&mut records, false);
        assert_eq!(vec!["garbage", "CVE-2020-0001"], names(&records));
    }

    #[test]
    fn adjacent_keys_are_ordered() {
        let mut records: Vec<Record> = ["CVE-2020-10", "CVE-2019-5", "x", "CVE-2020-2", "CVE-2018-1"]
            .iter()
            .map(|n| Record::new(n, "", ""))
            .collect();
        sort_records(&mut records, false);
        for pair in records.windows(2) {
            assert!(sort_key(&pair[0].name) <= sort_key(&pair[1].name));
        }
        sort_records(&mut records, true);
        for pair in records.windows(2) {
            assert!(sort_key(&pair[0].name) >= sort_key(&pair[1].name));
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = Filter::new("");
        assert!(filter.matches(&Record::new("", "", "")));
        assert!(filter.matches(&Record::new("CVE-2020-0001", "anything", "l")));
    }

    #[test]
    fn filter_matches_name_substring() {
        let filter = Filter::new("2021-44");
        assert!(filter.matches(&Record::new("CVE-2021-44228", "", "")));
        assert!(!filter.matches(&Record::new("CVE-2021-45046", "", "")));
    }

    #[test]
    fn filter_matches_whole_words_in_description() {
        let filter = Filter::new("RCE");
        assert!(filter.matches(&Record::new("CVE-1", "Allows rce via JNDI", "")));
        assert!(filter.matches(&Record::new("CVE-1", "rce", "")));
        assert!(!filter.matches(&Record::new("CVE-1", "Forces a reload", "")));
        assert!(!filter.matches(&Record::new("CVE-1", "Source code leak", "")));
    }

    #[test]
    fn filter_with_dot_matches_substring() {
        let filter = Filter::new("2.14");
        assert!(filter.matches(&Record::new("CVE-1", "Log4j before 2.14.1 is affected", "")));
        assert!(!filter.matches(&Record::new("CVE-1", "Log4j 2.15", "")));
    }

    #[test]
    fn report_sorts_then_filters() {
        let report = Report::new("log4j", true);
        let records = vec![
            Record::new("CVE-2021-44228", "Apache log4j RCE", "a"),
            Record::new("CVE-2021-0001", "unrelated", "b"),
            Record::new("CVE-2021-45046", "Apache log4j again", "c"),
        ];
        let prepared = report.prepare(records);
        assert_eq!(vec!["CVE-2021-45046", "CVE-2021-44228"], names(&prepared));
    }
}
