/// In-memory incident table
///
/// The loaded export keeps its header and rows exactly as read. Columns are
/// looked up by name; nothing about the schema is checked up front.

use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};
use log::{info, warn};

use crate::core::patterns::is_missing;
use crate::error::ReportError;
use crate::utils::file_utils::read_latin1;

pub const PERPETRATOR_COLUMN: &str = "Perpetrator";
pub const DATE_COLUMN: &str = "Date";
pub const COUNTRY_COLUMN: &str = "Country";

/// Rows of the source file with their header
#[derive(Debug, Clone)]
pub struct IncidentTable {
    source: PathBuf,
    headers: StringRecord,
    rows: Vec<StringRecord>,
}

impl IncidentTable {
    /// Load a latin-1 encoded CSV export
    ///
    /// # Arguments
    ///
    /// * `file_path` - Path to the CSV file
    ///
    /// # Returns
    ///
    /// The parsed table, or `ReportError::Load` carrying the reader's message
    pub fn load(file_path: &Path) -> Result<Self, ReportError> {
        let content = read_latin1(file_path).map_err(|e| ReportError::Load {
            path: file_path.to_path_buf(),
            message: format!("{:#}", e),
        })?;

        let table = Self::parse(file_path, &content)?;
        info!(
            "Loaded {} rows with {} columns from {}",
            table.len(),
            table.headers.len(),
            file_path.display()
        );

        Ok(table)
    }

    /// Parse already decoded CSV text
    pub fn parse(source: &Path, content: &str) -> Result<Self, ReportError> {
        let load_error = |message: String| ReportError::Load {
            path: source.to_path_buf(),
            message,
        };

        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| load_error(e.to_string()))?
            .clone();
        if headers.is_empty() {
            return Err(load_error("No columns to parse from file".to_string()));
        }

        let mut rows = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| load_error(e.to_string()))?;

            if record.len() > headers.len() {
                // Line numbers count the header as line 1
                warn!("Row {} has {} fields, expected {}", index + 2, record.len(), headers.len());
                return Err(load_error(format!(
                    "Error tokenizing data. Expected {} fields in line {}, saw {}",
                    headers.len(),
                    index + 2,
                    record.len()
                )));
            }
            rows.push(record);
        }

        Ok(Self {
            source: source.to_path_buf(),
            headers,
            rows,
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column names in file order
    pub fn column_names(&self) -> Vec<&str> {
        self.headers.iter().collect()
    }

    /// Position of a named column
    pub fn column_index(&self, name: &str) -> Result<usize, ReportError> {
        self.headers
            .iter()
            .position(|header| header == name)
            .ok_or_else(|| ReportError::MissingColumn(name.to_string()))
    }

    /// Cell value, `None` when missing or when the row is short
    pub fn value(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|record| record.get(column))
            .filter(|value| !is_missing(value))
    }

    /// Every non-missing value of one column, in row order
    pub fn column_values(&self, column: usize) -> impl Iterator<Item = &str> + '_ {
        (0..self.rows.len()).filter_map(move |row| self.value(row, column))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<IncidentTable, ReportError> {
        IncidentTable::parse(Path::new("test.csv"), content)
    }

    #[test]
    fn test_parse_preserves_columns_and_order() {
        let table = parse("Date,Country,Perpetrator\n01 JAN 1990,Iraq,Hamas\n02 FEB 1991,Peru,Unknown\n")
            .unwrap();

        assert_eq!(table.column_names(), vec!["Date", "Country", "Perpetrator"]);
        assert_eq!(table.len(), 2);

        let country = table.column_index(COUNTRY_COLUMN).unwrap();
        assert_eq!(table.value(0, country), Some("Iraq"));
        assert_eq!(table.value(1, country), Some("Peru"));
    }

    #[test]
    fn test_missing_values() {
        let table = parse("Perpetrator,Date,Country\n,1990,NA\nHamas,1991\n").unwrap();
        let perpetrator = table.column_index(PERPETRATOR_COLUMN).unwrap();
        let country = table.column_index(COUNTRY_COLUMN).unwrap();

        assert_eq!(table.value(0, perpetrator), None);
        assert_eq!(table.value(0, country), None);
        // Short rows are padded with missing cells
        assert_eq!(table.value(1, country), None);
        assert_eq!(table.column_values(perpetrator).collect::<Vec<_>>(), vec!["Hamas"]);
    }

    #[test]
    fn test_quoted_fields() {
        let table = parse("Perpetrator,Date,Country\n\"Hamas, armed wing\",1990,Israel\n").unwrap();
        assert_eq!(table.value(0, 0), Some("Hamas, armed wing"));
    }

    #[test]
    fn test_overlong_row_fails() {
        let err = parse("Perpetrator,Date,Country\nHamas,1990,Israel,extra\n").unwrap_err();
        match err {
            ReportError::Load { message, .. } => assert!(message.contains("Expected 3 fields in line 2")),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_empty_input_fails() {
        assert!(matches!(parse(""), Err(ReportError::Load { .. })));
    }

    #[test]
    fn test_missing_column() {
        let table = parse("Perpetrator,Country\nHamas,Israel\n").unwrap();
        assert!(matches!(
            table.column_index(DATE_COLUMN),
            Err(ReportError::MissingColumn(name)) if name == "Date"
        ));
    }
}
