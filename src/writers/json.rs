//! Write the records as JSON
//! It presents the records as a JSON array and prints it on STDOUT.

use log::error;

use super::Writer;
use crate::models::Record;

/// A writer to print the records as JSON.
pub struct JsonWriter {}

impl JsonWriter {
    /// Create a new JsonWriter
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for JsonWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer for JsonWriter {
    fn render(&self, records: &[Record]) -> String {
        match serde_json::to_string_pretty(records) {
            Ok(json) => format!("{}\n", json),
            Err(e) => {
                error!("Unable to serialize the records: {}", e);
                String::new()
            }
        }
    }
}
