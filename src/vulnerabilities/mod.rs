//! The vulnerabilities module contains what's needed to gather the
//! vulnerabilities matching a search.
//!
//! It is composed of two parts, fetchers and cache managers.
//! A fetcher gets the vulnerabilities from the catalog, one query per task.
//! A cache manager stores the vulnerabilities fetched by the fetcher, so the
//! next run with the same keywords can reuse them.

pub mod cache_managers;
pub mod fetchers;
