//! Transition table output.

use std::io::Write;

use tracing::info;

use crate::graph::PROGRESS_INTERVAL;
use crate::path::{NodeSummary, TransitionRow};
use crate::types::BridgeResult;

/// Column headers of the transition table.
pub const HEADER: [&str; 12] = [
    "Start_Label",
    "Start_code",
    "Start_CUI",
    "Start_depth",
    "Pre_Trans_Label",
    "Pre_Trans_code",
    "Pre_Trans_CUI",
    "Pre_Trans_depth",
    "Post_Trans_Label",
    "Post_Trans_code",
    "Post_Trans_CUI",
    "Post_Trans_depth",
];

/// Writes transition rows as CSV, header first.
///
/// Missing attributes and depths are written as empty fields.
pub struct TransitionWriter<W: Write> {
    writer: csv::Writer<W>,
    rows: usize,
}

impl<W: Write> TransitionWriter<W> {
    /// Creates a writer and emits the header row.
    pub fn new(writer: W) -> BridgeResult<Self> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        writer.write_record(HEADER)?;
        Ok(Self { writer, rows: 0 })
    }

    /// Writes one row.
    pub fn write_row(&mut self, row: &TransitionRow) -> BridgeResult<()> {
        let mut record: Vec<String> = Vec::with_capacity(HEADER.len());
        for node in [&row.start, &row.pre_transition, &row.post_transition] {
            push_summary(&mut record, node);
        }
        self.writer.write_record(&record)?;
        self.rows += 1;
        if self.rows % PROGRESS_INTERVAL == 0 {
            info!("{} rows written", self.rows);
        }
        Ok(())
    }

    /// Writes every row of an iterator, returning how many were written.
    pub fn write_all<I: IntoIterator<Item = TransitionRow>>(&mut self, rows: I) -> BridgeResult<usize> {
        let before = self.rows;
        for row in rows {
            self.write_row(&row)?;
        }
        Ok(self.rows - before)
    }

    /// Rows written so far, header excluded.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flushes and returns the inner writer.
    pub fn finish(mut self) -> BridgeResult<W> {
        self.writer.flush()?;
        self.writer
            .into_inner()
            .map_err(|e| std::io::Error::new(e.error().kind(), e.error().to_string()).into())
    }
}

fn push_summary(record: &mut Vec<String>, node: &NodeSummary) {
    record.push(node.label.clone().unwrap_or_default());
    record.push(node.code.clone().unwrap_or_default());
    record.push(node.cui.clone().unwrap_or_default());
    record.push(node.depth.map(|d| d.to_string()).unwrap_or_default());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_summary(label: &str, code: &str, cui: &str, depth: Option<u32>) -> NodeSummary {
        NodeSummary {
            label: Some(label.to_string()),
            code: Some(code.to_string()),
            cui: Some(cui.to_string()),
            depth,
        }
    }

    #[test]
    fn test_header_and_row() {
        let mut writer = TransitionWriter::new(Vec::new()).unwrap();
        writer
            .write_row(&TransitionRow {
                start: make_summary("Cholera, unspecified", "001.9", "C0008354", Some(3)),
                pre_transition: make_summary("Cholera", "001", "C0008354", None),
                post_transition: make_summary("Cholera", "A00", "C0008354", Some(2)),
            })
            .unwrap();
        assert_eq!(writer.rows(), 1);

        let out = String::from_utf8(writer.finish().unwrap()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], HEADER.join(","));
        assert_eq!(
            lines[1],
            "\"Cholera, unspecified\",001.9,C0008354,3,Cholera,001,C0008354,,Cholera,A00,C0008354,2"
        );
    }

    #[test]
    fn test_write_all_counts() {
        let row = TransitionRow {
            start: NodeSummary::default(),
            pre_transition: NodeSummary::default(),
            post_transition: NodeSummary::default(),
        };
        let mut writer = TransitionWriter::new(Vec::new()).unwrap();
        assert_eq!(writer.write_all(vec![row.clone(), row]).unwrap(), 2);
        let out = String::from_utf8(writer.finish().unwrap()).unwrap();
        assert_eq!(out.lines().nth(1), Some(",,,,,,,,,,,"));
    }
}
