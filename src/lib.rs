//! Search a vulnerability catalog by keyword.
//!
//! The records of every query are fetched in parallel, merged without
//! duplicates, stored for the next run with the same keywords, then sorted,
//! filtered and written as a report.

pub mod application;
pub mod config;
pub mod errors;
pub mod extractors;
pub mod models;
pub mod readers;
pub mod vulnerabilities;
pub mod writers;
