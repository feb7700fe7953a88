// ABOUTME: Streaming row source over a delimited catalog file
// ABOUTME: Forward-only iterator, one decoded row at a time

use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;

use crate::model::CsvRow;

/// The default field delimiter of catalog files.
pub const DEFAULT_DELIMITER: u8 = b';';

/// Forward-only source of catalog rows.
///
/// Reads one line at a time, so arbitrarily large files never reside in
/// memory. There is no header row and no quoting: fields are split on the
/// delimiter exactly as they appear, matching the raw field-splitting the
/// catalog producers use.
pub struct RowSource {
    records: csv::StringRecordsIntoIter<File>,
}

impl RowSource {
    /// Open a catalog file for sequential reading.
    pub fn open(path: &Path, delimiter: u8) -> Result<Self> {
        let reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .delimiter(delimiter)
            .from_path(path)
            .with_context(|| format!("Failed to open source file \"{}\"", path.display()))?;

        tracing::debug!("Opened catalog file \"{}\"", path.display());

        Ok(Self {
            records: reader.into_records(),
        })
    }
}

impl Iterator for RowSource {
    type Item = Result<CsvRow>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.records.next()?;
        Some(
            record
                .map(|rec| {
                    let fields: Vec<&str> = rec.iter().collect();
                    CsvRow::from_fields(&fields)
                })
                .context("Failed to decode catalog row"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_catalog(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.csv");
        let mut file = File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        (dir, path)
    }

    #[test]
    fn test_reads_rows_in_file_order() {
        let (_dir, path) = write_catalog("a;first;1;\nb;second;2;1\n");
        let rows: Vec<CsvRow> = RowSource::open(&path, DEFAULT_DELIMITER)
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].sku(), "a");
        assert_eq!(rows[0].special_price_text(), Some(""));
        assert_eq!(rows[1].sku(), "b");
        assert_eq!(rows[1].special_price_text(), Some("1"));
    }

    #[test]
    fn test_missing_trailing_fields() {
        let (_dir, path) = write_catalog("only-sku\nsku2;desc\n");
        let rows: Vec<CsvRow> = RowSource::open(&path, DEFAULT_DELIMITER)
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(rows[0].sku(), "only-sku");
        assert_eq!(rows[0].normal_price_text(), "");
        assert_eq!(rows[0].special_price_text(), None);
        assert_eq!(rows[1].description(), "desc");
    }

    #[test]
    fn test_custom_delimiter() {
        let (_dir, path) = write_catalog("a,desc,2,1\n");
        let rows: Vec<CsvRow> = RowSource::open(&path, b',')
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(rows[0].sku(), "a");
        assert_eq!(rows[0].normal_price_text(), "2");
    }

    #[test]
    fn test_quoting_is_disabled() {
        // Quote characters are field content, not quoting syntax.
        let (_dir, path) = write_catalog("\"a\";desc;2;1\n");
        let rows: Vec<CsvRow> = RowSource::open(&path, DEFAULT_DELIMITER)
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(rows[0].sku(), "&quot;a&quot;");
    }

    #[test]
    fn test_empty_file_yields_no_rows() {
        let (_dir, path) = write_catalog("");
        let rows: Vec<CsvRow> = RowSource::open(&path, DEFAULT_DELIMITER)
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = RowSource::open(&dir.path().join("absent.csv"), DEFAULT_DELIMITER);
        assert!(result.is_err());
    }
}
