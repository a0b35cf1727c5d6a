//! This module contains the main structure and logic for the whole
//! application.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use log::{debug, error, info, trace, LevelFilter};

use crate::config::Config;
use crate::errors::ApplicationError;
use crate::extractors::mitre::MitreExtractor;
use crate::models::Record;
use crate::readers::http::HttpReader;
use crate::vulnerabilities::cache_managers::confirm::StdinConfirm;
use crate::vulnerabilities::cache_managers::files::FileCacheManager;
use crate::vulnerabilities::cache_managers::CacheManager;
use crate::vulnerabilities::fetchers::{FetchOutcome, KeywordFetcher, VulnFetcher};
use crate::writers::{Report, Writers};

/// Represents the application
pub struct Application {
    /// The configuration of the run.
    config: Config,
    /// Stores and reloads the previous results.
    cache: Box<dyn CacheManager>,
    /// Fetches the records from the catalog.
    fetcher: Box<dyn VulnFetcher>,
}

impl Application {
    /// Creates a new application talking to the catalog over HTTP,
    /// storing its results in files and asking questions on the terminal.
    pub fn new(config: Config) -> Result<Self, ApplicationError> {
        trace!("In Application::new()");
        let reader = Arc::new(HttpReader::new(&config.catalog_url));
        let extractor = Arc::new(MitreExtractor::new()?);
        let fetcher = Box::new(KeywordFetcher::new(reader, extractor));
        let cache = Box::new(FileCacheManager::new(
            &config.cache_dir,
            Box::new(StdinConfirm::new()),
        ));
        Ok(Self::with_parts(config, cache, fetcher))
    }

    /// Creates a new application from its parts.
    pub fn with_parts(
        config: Config,
        cache: Box<dyn CacheManager>,
        fetcher: Box<dyn VulnFetcher>,
    ) -> Self {
        Application {
            config,
            cache,
            fetcher,
        }
    }

    /// Sends all the queries and waits for all of them to be handled.
    fn fetch(&self, queries: &[String]) -> Result<FetchOutcome, ApplicationError> {
        trace!("Running Application::fetch()");
        let tk_runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        Ok(tk_runtime.block_on(self.fetcher.fetch(queries)))
    }

    /// Gathers the records, from the previous results if the user wants to
    /// reuse them, from the catalog otherwise.
    /// Fresh results are stored for the next run.
    pub fn collect(&self) -> Result<Vec<Record>, ApplicationError> {
        trace!("Running Application::collect()");
        let path = self.cache.resolve_path(&self.config.search);
        let previous = if self.config.force {
            debug!("Force is set, previous results are ignored");
            None
        } else {
            self.cache.load(&path)
        };

        if let Some(records) = previous.filter(|r| !r.is_empty()) {
            println!("Loading CVEs...");
            info!("{} records loaded from {}", records.len(), path.display());
            return Ok(records);
        }

        println!("Retrieving CVEs...");
        let outcome = self.fetch(&self.config.search.queries())?;
        for failure in &outcome.failures {
            eprintln!("{}: {}", failure.query, failure.error);
        }
        info!(
            "{} records retrieved, {} queries failed",
            outcome.records.len(),
            outcome.failures.len()
        );

        match self.cache.store(&path, &outcome.records) {
            Ok(()) => println!("Results saved at '{}'", path.display()),
            Err(e) => {
                error!("Unable to save the results: {}", e);
                eprintln!("Unable to save the results: {}", e);
            }
        }
        Ok(outcome.records)
    }

    /// Gathers the records and renders the report.
    pub fn report(&self) -> Result<String, ApplicationError> {
        let records = self.collect()?;
        let report = Report::new(&self.config.filter, self.config.reverse);
        let writer = self.config.writer.build();
        Ok(report.render(records, writer.as_ref()))
    }

    /// Runs the global application
    pub fn run(&self) -> Result<(), ApplicationError> {
        trace!("Running Application::run()");
        let report = self.report()?;
        print!("{}", report);
        Ok(())
    }
}

/// Represents the CLI arguments accepted by cvesearch
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// The keywords to search for
    #[arg(required = true, value_name = "KEYWORDS")]
    pub keywords: Vec<String>,
    /// Send one query per keyword instead of a single query
    #[arg(short, long)]
    pub split: bool,
    /// Only show the records matching this filter
    #[arg(short, long, value_name = "FILTER", default_value = "")]
    pub filter: String,
    /// Ignore the previous results and fetch again
    #[arg(long)]
    pub force: bool,
    /// Sort the records in descending order
    #[arg(short, long)]
    pub reverse: bool,
    /// The writer to use
    #[arg(short, long, value_name = "WRITER", default_value = "textstdout")]
    pub writer: Writers,
    /// The keyword-search endpoint of the catalog
    #[arg(long, value_name = "URL")]
    pub catalog_url: Option<String>,
    /// Where the previous results are stored
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,
    /// Increase the verbosity, can be repeated
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// The log level matching the verbosity
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}
