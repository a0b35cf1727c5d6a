//! Write the records to standard output
//! It is the default writer, it presents each record as a text block.

use super::Writer;
use crate::models::Record;

/// A writer to print the records in the terminal.
pub struct TextStdoutWriter {}

impl TextStdoutWriter {
    /// Create a new TextStdoutWriter
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for TextStdoutWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer for TextStdoutWriter {
    /// Concatenates the block of each record.
    /// Blocks are separated by a blank line.
    fn render(&self, records: &[Record]) -> String {
        records.iter().map(Record::to_formatted_string).collect()
    }
}
