//! Whitespace-separated numeric tables as published in the data volumes.
//!
//! ```text
//! J       CT       CP       eta
//! 0.153   0.1042   0.0715   0.223
//! ```

use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::error::{IndexError, Result};

/// Numeric columns keyed by the header row, in header order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl Table {
    /// Parse table text. The first non-empty line is the header; rows with
    /// the wrong number of cells or a non-numeric cell are skipped.
    pub fn parse(text: &str, origin: &Path) -> Result<Self> {
        let mut lines = text.lines().map(str::trim).filter(|line| !line.is_empty());
        let header = lines.next().ok_or_else(|| IndexError::Table {
            path: origin.to_path_buf(),
            reason: "no header row".to_string(),
        })?;
        let columns: Vec<String> = header.split_whitespace().map(str::to_string).collect();

        let mut rows = Vec::new();
        for (number, line) in lines.enumerate() {
            let cells: Option<Vec<f64>> = line
                .split_whitespace()
                .map(|cell| cell.parse::<f64>().ok())
                .collect();
            match cells {
                Some(cells) if cells.len() == columns.len() => rows.push(cells),
                _ => debug!(file = %origin.display(), row = number + 1, line, "skipping malformed row"),
            }
        }

        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Values of the named column, top to bottom.
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().map(|row| row[index]).collect())
    }
}

/// Read and parse the table at `path`.
pub fn load_table(path: &Path) -> Result<Table> {
    let text = std::fs::read_to_string(path)?;
    Table::parse(&text, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const PERFORMANCE: &str = "
J       CT       CP       eta
0.153   0.1042   0.0715   0.223
0.201   0.1001   0.0708   0.284

0.249   0.0953   n/a      0.335
0.297   0.0899
";

    #[test]
    fn parse_reads_header_and_numeric_rows() {
        let table = Table::parse(PERFORMANCE, Path::new("perf.txt")).unwrap();
        assert_eq!(table.columns(), &["J", "CT", "CP", "eta"]);
        // the `n/a` row and the short row are skipped
        assert_eq!(table.len(), 2);
        assert_eq!(table.column("CT"), Some(vec![0.1042, 0.1001]));
        assert_eq!(table.column("CQ"), None);
        assert_eq!(table.column_index("eta"), Some(3));
    }

    #[test]
    fn header_only_table_is_empty_not_an_error() {
        let table = Table::parse("r/R  c/R  beta\n", Path::new("geom.txt")).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.column("beta"), Some(vec![]));
    }

    #[test]
    fn blank_file_is_an_error() {
        let err = Table::parse("\n  \n", Path::new("empty.txt")).unwrap_err();
        assert!(matches!(err, IndexError::Table { .. }));
    }

    #[test]
    fn load_table_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("apc_9x6_static_t1.txt");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "RPM  CT  CP").unwrap();
        writeln!(file, "2000 0.12 0.05").unwrap();
        writeln!(file, "3000 0.13 0.055").unwrap();

        let table = load_table(&path).unwrap();
        assert_eq!(table.column("RPM"), Some(vec![2000.0, 3000.0]));

        assert!(matches!(
            load_table(&dir.path().join("missing.txt")),
            Err(IndexError::Io(_))
        ));
    }
}
