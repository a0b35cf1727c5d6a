//! The Mitre extractor.
//! This module contains the extractor reading the result table of the
//! keyword-search page.

use log::{debug, trace};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::Extractor;
use crate::errors::ParseError;
use crate::models::Record;

/// The rows of the result table.
const ROW_SELECTOR: &str = "#TableWithRules table tbody tr";

/// The extractor
pub struct MitreExtractor {
    /// Selects the rows of the result table
    row_selector: Selector,
    /// Selects the cells of a row
    cell_selector: Selector,
    /// Selects the anchor holding the name and the link
    anchor_selector: Selector,
    /// Matches runs of whitespace to collapse
    whitespace_regex: Regex,
}

impl MitreExtractor {
    /// Creates the extractor.
    /// By doing so, the selectors are compiled once and the extractor can be
    /// reused for every document.
    pub fn new() -> Result<Self, ParseError> {
        Ok(Self {
            row_selector: selector(ROW_SELECTOR)?,
            cell_selector: selector("td")?,
            anchor_selector: selector("a")?,
            whitespace_regex: Regex::new(r"\s+")?,
        })
    }

    /// Returns the text of an element, whitespace collapsed and trimmed.
    fn text_of(&self, element: ElementRef) -> String {
        let text: String = element.text().collect();
        self.whitespace_regex
            .replace_all(text.trim(), " ")
            .into_owned()
    }

    /// Reads one row of the table.
    /// A missing anchor or a missing second cell gives empty fields, the row
    /// is kept anyway.
    fn extract_row(&self, cells: &[ElementRef]) -> Record {
        let anchor = cells
            .first()
            .and_then(|cell| cell.select(&self.anchor_selector).next());
        let name = anchor.map(|a| self.text_of(a)).unwrap_or_default();
        let link = anchor
            .and_then(|a| a.value().attr("href"))
            .unwrap_or_default();
        let description = cells
            .get(1)
            .map(|cell| self.text_of(*cell))
            .unwrap_or_default();
        Record {
            name,
            description,
            link: link.to_string(),
        }
    }
}

impl Extractor for MitreExtractor {
    fn extract(&self, document: &[u8]) -> Result<Vec<Record>, ParseError> {
        trace!("Running MitreExtractor::extract()");
        // Invalid UTF-8 sequences become U+FFFD, the rest of the row is kept
        let html = Html::parse_document(&String::from_utf8_lossy(document));
        let mut records = Vec::new();
        for row in html.select(&self.row_selector) {
            let cells: Vec<ElementRef> = row.select(&self.cell_selector).collect();
            // Header rows only have <th> cells
            if cells.is_empty() {
                trace!("Skipping a row without any <td>");
                continue;
            }
            records.push(self.extract_row(&cells));
        }
        debug!("{} records extracted", records.len());
        Ok(records)
    }
}

fn selector(css: &str) -> Result<Selector, ParseError> {
    Selector::parse(css).map_err(|_| ParseError::Selector(css.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(rows: &str) -> String {
        format!(
            r#"<html><body><div id="TableWithRules"><table>
<tr><th>Name</th><th>Description</th></tr>
{}
</table></div></body></html>"#,
            rows
        )
    }

    #[test]
    fn extracts_rows_in_document_order() {
        let extractor = MitreExtractor::new().unwrap();
        let document = page(
            r#"<tr><td><a href="/cgi-bin/cvename.cgi?name=CVE-2021-45046">CVE-2021-45046</a></td><td>desc B</td></tr>
<tr><td><a href="/cgi-bin/cvename.cgi?name=CVE-2021-44228">CVE-2021-44228</a></td><td>desc A</td></tr>"#,
        );
        let records = extractor.extract(document.as_bytes()).unwrap();
        assert_eq!(2, records.len());
        assert_eq!(
            Record::new(
                "CVE-2021-45046",
                "desc B",
                "/cgi-bin/cvename.cgi?name=CVE-2021-45046"
            ),
            records[0]
        );
        assert_eq!("CVE-2021-44228", records[1].name);
    }

    #[test]
    fn collapses_whitespace_in_description() {
        let extractor = MitreExtractor::new().unwrap();
        let document = page(
            "<tr><td><a href=\"l\"> CVE-2020-0001 </a></td><td>\n  Some\n\tlong   text \n</td></tr>",
        );
        let records = extractor.extract(document.as_bytes()).unwrap();
        assert_eq!(Record::new("CVE-2020-0001", "Some long text", "l"), records[0]);
    }

    #[test]
    fn keeps_malformed_rows_with_empty_fields() {
        let extractor = MitreExtractor::new().unwrap();
        let document = page(
            r#"<tr><td>no anchor</td><td>desc</td></tr>
<tr><td><a href="x">CVE-2020-0002</a></td></tr>"#,
        );
        let records = extractor.extract(document.as_bytes()).unwrap();
        assert_eq!(2, records.len());
        assert_eq!(Record::new("", "desc", ""), records[0]);
        assert_eq!(Record::new("CVE-2020-0002", "", "x"), records[1]);
    }

    #[test]
    fn no_table_gives_no_record() {
        let extractor = MitreExtractor::new().unwrap();
        let records = extractor
            .extract(b"<html><body><p>No results</p></body></html>")
            .unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn keeps_rows_with_invalid_utf8() {
        let extractor = MitreExtractor::new().unwrap();
        let html = page(r#"<tr><td><a href="l">CVE-2020-0003</a></td><td>cafMARK bug</td></tr>"#);
        let (head, tail) = html.split_once("MARK").unwrap();
        // Latin-1 e acute
        let mut document = head.as_bytes().to_vec();
        document.push(0xE9);
        document.extend_from_slice(tail.as_bytes());
        let records = extractor.extract(&document).unwrap();
        assert_eq!(1, records.len());
        assert_eq!(
            Record::new("CVE-2020-0003", "caf\u{FFFD} bug", "l"),
            records[0]
        );
    }
}
