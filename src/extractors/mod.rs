//! This module declares all extractors.
//! An extractor turns a raw document returned by a
//! [`crate::readers::Reader`] into an ordered list of [`Record`]s.

pub mod mitre;

use crate::errors::ParseError;
use crate::models::Record;

/// A common interface between all extractors.
pub trait Extractor: Send + Sync {
    /// Extracts the records from a document, in document order.
    /// A document without any record is not an error.
    fn extract(&self, document: &[u8]) -> Result<Vec<Record>, ParseError>;
}
