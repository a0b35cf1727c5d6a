//! The configuration of a run, built from the command line.

use std::path::PathBuf;

use log::{debug, trace};

use crate::application::Args;
use crate::errors::ConfigError;
use crate::models::Search;
use crate::readers::http::DEFAULT_CATALOG_URL;
use crate::vulnerabilities::cache_managers::files::default_cache_dir;
use crate::writers::Writers;

/// Everything the application needs to know to run.
#[derive(Clone, Debug)]
pub struct Config {
    /// What to search for
    pub search: Search,
    /// Only records matching this filter are written
    pub filter: String,
    /// Ignore any previous results without asking
    pub force: bool,
    /// Sort the records in descending order
    pub reverse: bool,
    /// How the records are written
    pub writer: Writers,
    /// The keyword-search endpoint of the catalog
    pub catalog_url: String,
    /// Where the previous results are stored
    pub cache_dir: PathBuf,
}

impl Config {
    /// Creates a configuration with the defaults.
    pub fn new(keywords: &[String]) -> Result<Self, ConfigError> {
        validate_keywords(keywords)?;
        Ok(Config {
            search: Search::new(keywords, false),
            filter: String::new(),
            force: false,
            reverse: false,
            writer: Writers::TextStdout,
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            cache_dir: default_cache_dir(),
        })
    }

    /// Creates the configuration from the command-line arguments.
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        trace!("Running Config::from_args()");
        let mut config = Config::new(&args.keywords)?;
        config.search.split = args.split;
        config.filter = args.filter.clone();
        config.force = args.force;
        config.reverse = args.reverse;
        config.writer = args.writer;
        if let Some(url) = &args.catalog_url {
            config.catalog_url = url.clone();
        }
        if let Some(dir) = &args.cache_dir {
            config.cache_dir = dir.clone();
        }
        debug!("Configuration: {:?}", config);
        Ok(config)
    }
}

/// Keywords must be present, and none of them may look like a flag.
pub fn validate_keywords(keywords: &[String]) -> Result<(), ConfigError> {
    if keywords.is_empty() {
        return Err(ConfigError::NoKeywords);
    }
    if let Some(keyword) = keywords.iter().find(|k| k.starts_with('-')) {
        return Err(ConfigError::FlagLikeKeyword(keyword.clone()));
    }
    Ok(())
}
