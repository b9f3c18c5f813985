//! Cuts table formatted pages into the logical lines fed to the classifier.
//!
//! Offsets are counted in characters, pdftotext aligns columns by character.

use tracing::{debug, trace};

use crate::classifier::LINEBREAK;
use crate::document::{Document, DocumentKind};

/// Column titles of the Swedish ENR tables.
static SWEDISH_TITLES: &[&str] = &[
    "Name",
    "Identification",
    "Lateral limits",
    "Vertical limits",
    "ATC unit",
    "Freq MHz",
    "Callsign",
    "AFIS unit",
    "Remark",
];
const MIN_TITLES: usize = 3;

const NO_CUT: usize = 999;
const AIRSPORT_VERTICAL_WIDTH: usize = 16;
const FORM_FEED: char = '\u{c}';

fn char_index(line: &str, pattern: &str) -> Option<usize> {
    line.find(pattern).map(|byte| line[..byte].chars().count())
}

fn char_slice(line: &str, from: usize, to: usize) -> String {
    line.chars()
        .skip(from)
        .take(to.saturating_sub(from))
        .collect()
}

fn header_cuts(line: &str) -> Option<Vec<usize>> {
    let mut cuts: Vec<_> = SWEDISH_TITLES
        .iter()
        .filter_map(|title| char_index(line, title))
        .collect();
    if cuts.len() < MIN_TITLES {
        // a lone title where the header wrapped onto two lines
        if line.trim() != "Vertical limits" {
            return None;
        }
        cuts = vec![char_index(line, "Vertical limits")?];
    }
    cuts.push(line.chars().count());
    cuts.sort_unstable();
    cuts.dedup();
    Some(cuts)
}

#[derive(Debug)]
struct ColumnSplitter<'a> {
    document: &'a Document,
    cuts: Vec<usize>,
    table: Vec<Vec<String>>,
    vcut: usize,
    lines: Vec<String>,
}

impl<'a> ColumnSplitter<'a> {
    fn new(document: &'a Document) -> Self {
        Self {
            document,
            cuts: vec![],
            table: vec![],
            vcut: NO_CUT,
            lines: vec![],
        }
    }

    fn emit(&mut self, text: &str) {
        let text = text.trim();
        if !text.is_empty() {
            self.lines.push(text.to_string());
        }
    }

    /// Emits the buffered rows column by column, then ends the feature.
    fn flush_table(&mut self) {
        if self.table.is_empty() {
            return;
        }
        let table = std::mem::take(&mut self.table);
        let columns = table.iter().map(Vec::len).max().unwrap_or(0);
        debug!("flushing table of {} rows, {columns} columns", table.len());
        for column in 0..columns {
            for row in &table {
                if let Some(cell) = row.get(column) {
                    self.emit(cell);
                }
            }
        }
        self.lines.push(LINEBREAK.to_string());
    }

    fn push_line(&mut self, line: &str) {
        if line.contains(FORM_FEED) {
            trace!("new page");
            self.flush_table();
            self.cuts.clear();
        }
        let line = line.replace(FORM_FEED, "");

        if self.document.is_swedish_enr_table() {
            if !self.cuts.is_empty() {
                if line.trim().is_empty() {
                    self.flush_table();
                } else {
                    let row = self
                        .cuts
                        .windows(2)
                        .map(|cut| char_slice(&line, cut[0], cut[1]).trim().to_string())
                        .collect();
                    self.table.push(row);
                }
                return;
            }
            if let Some(cuts) = header_cuts(&line) {
                debug!("table header at {cuts:?}: {line}");
                self.cuts = cuts;
                return;
            }
        }
        self.fixed_split(&line);
    }

    fn fixed_split(&mut self, line: &str) {
        let marker = match self.document.kind {
            DocumentKind::Airsport => "Vertical limits",
            DocumentKind::Restricted => "Vertikale grenser",
            DocumentKind::ControlArea => "Tjenesteenhet",
            DocumentKind::InformationArea => "Unit providing",
            _ => {
                self.emit(line);
                return;
            }
        };
        if let Some(vcut) = char_index(line, marker) {
            trace!("column cut at {vcut}");
            self.vcut = vcut;
            return;
        }

        let vcut = self.vcut;
        self.emit(&char_slice(line, 0, vcut));
        match self.document.kind {
            DocumentKind::Airsport => {
                self.emit(&char_slice(line, vcut, vcut + AIRSPORT_VERTICAL_WIDTH));
            }
            DocumentKind::Restricted => self.emit(&char_slice(line, vcut, usize::MAX)),
            _ => {}
        }
    }
}

/// Splits a document into logical lines, tables flattened column by column.
pub fn split_columns(document: &Document, text: &str) -> Vec<String> {
    let mut splitter = ColumnSplitter::new(document);
    for line in text.lines() {
        splitter.push_line(line);
    }
    splitter.flush_table();
    splitter.lines
}

#[cfg(test)]
mod test {
    use pretty_assertions_sorted::assert_eq_sorted;

    use super::{char_slice, split_columns};
    use crate::classifier::LINEBREAK;
    use crate::document::Document;

    #[test]
    fn test_char_slice() {
        assert_eq!(char_slice("SÄLEN TMA", 0, 5), "SÄLEN");
        assert_eq!(char_slice("SÄLEN TMA", 6, 999), "TMA");
    }

    #[test]
    fn test_plain_document() {
        let document = Document::from_filename("EN_ENR_1_4.txt").unwrap();
        assert_eq_sorted!(
            split_columns(&document, "Foo TMA\n\n  Class C  \n"),
            vec!["Foo TMA".to_string(), "Class C".to_string()]
        );
    }

    #[test]
    fn test_restricted_columns() {
        let document = Document::from_filename("EN_ENR_5_1.txt").unwrap();
        let text = [
            "EN R102 Oslo".to_string(),
            format!("{:<40}{}", "Navn og utstrekning", "Vertikale grenser"),
            format!("{:<40}{}", "EN R103 Sentrum", "FL 95"),
            format!("{:<40}{}", "595000N 0104500E -", "GND"),
        ]
        .join("\n");

        assert_eq!(
            split_columns(&document, &text),
            vec!["EN R102 Oslo", "EN R103 Sentrum", "FL 95", "595000N 0104500E -", "GND"]
        );
    }

    #[test]
    fn test_control_area_first_column() {
        let document = Document::from_filename("EN_ENR_2_1.txt").unwrap();
        let text = [
            format!("{:<30}{}", "Navn", "Tjenesteenhet"),
            format!("{:<30}{}", "Oslo TMA", "Oslo APP"),
        ]
        .join("\n");

        assert_eq!(split_columns(&document, &text), vec!["Oslo TMA"]);
    }

    #[test]
    fn test_airsport_columns() {
        let document = Document::from_filename("EN_ENR_5_5.txt").unwrap();
        let text = [
            format!("{:<30}{}", "Name", "Vertical limits"),
            format!("{:<30}{:<16}{}", "Vinstra", "FL 95", "Vinstra flyklubb"),
        ]
        .join("\n");

        assert_eq!(split_columns(&document, &text), vec!["Vinstra", "FL 95"]);
    }

    #[test]
    fn test_swedish_table() {
        let document = Document::from_filename("ES_ENR_2_1.txt").unwrap();
        let text = [
            "ENR 2.1 FIR, UIR, TMA AND CTA".to_string(),
            format!("{:<20}{:<30}{}", "Name", "Lateral limits", "Vertical limits"),
            format!("{:<20}{:<30}{}", "SÄLEN TMA", "612000N 0130000E -", "FL 95"),
            format!("{:<20}{:<30}{}", "", "613000N 0131000E", "1500 FT MSL"),
            String::new(),
            format!("{:<20}{:<30}{}", "SÄLEN CTR", "611000N 0130000E -", "1500 FT MSL"),
            "\u{c}Page 2".to_string(),
        ]
        .join("\n");

        assert_eq!(
            split_columns(&document, &text),
            vec![
                "ENR 2.1 FIR, UIR, TMA AND CTA",
                "SÄLEN TMA",
                "612000N 0130000E -",
                "613000N 0131000E",
                "FL 95",
                "1500 FT MSL",
                LINEBREAK,
                "SÄLEN CTR",
                "611000N 0130000E -",
                "1500 FT MSL",
                LINEBREAK,
                "Page 2",
            ]
        );
    }

    #[test]
    fn test_form_feed_line_ends_table() {
        let document = Document::from_filename("ES_ENR_2_1.txt").unwrap();
        let text = [
            format!("{:<20}{:<30}{}", "Name", "Lateral limits", "Vertical limits"),
            format!("{:<20}{:<30}{}", "SÄLEN TMA", "612000N 0130000E -", "FL 95"),
            "\u{c}".to_string(),
            format!("{:<20}{}", "ARVIDSJAUR TMA", "652000N 0180000E -"),
        ]
        .join("\n");

        assert_eq!(
            split_columns(&document, &text),
            vec![
                "SÄLEN TMA",
                "612000N 0130000E -",
                "FL 95",
                LINEBREAK,
                "ARVIDSJAUR TMA      652000N 0180000E -",
            ]
        );
    }
}
