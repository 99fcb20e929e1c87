//! Dataset module - CSV loading and in-memory table access
//!
//! The consolidated indicator CSV is read once at startup into a `Dataset`
//! and shared read-only for the process lifetime. All views and the risk
//! scorer pull from it; nothing writes to it after load.

use std::fmt;
use std::path::Path;

use thiserror::Error;

/// Name of the column identifying a community
pub const COMMUNITY_COLUMN: &str = "Community";

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset: {0}")]
    Read(#[from] csv::Error),

    #[error("dataset is missing required column '{0}'")]
    MissingColumn(String),
}

/// One parsed CSV cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f64),
    Text(String),
    Empty,
}

impl Cell {
    fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Cell::Empty;
        }
        match trimmed.parse::<f64>() {
            Ok(n) => Cell::Number(n),
            Err(_) => Cell::Text(trimmed.to_string()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Whole-valued floats display without a trailing ".0"
            Cell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            Cell::Number(n) => write!(f, "{n}"),
            Cell::Text(s) => write!(f, "{s}"),
            Cell::Empty => Ok(()),
        }
    }
}

/// Immutable in-memory table of community indicators
#[derive(Debug, Clone)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
    community_idx: usize,
}

/// A view slice prepared for HTML table rendering
#[derive(Debug, Clone)]
pub struct TableView {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Dataset {
    /// Load the dataset from a CSV file
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let mut reader = csv::Reader::from_path(path)?;
        let columns: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let mut cells: Vec<Cell> = record.iter().map(Cell::parse).collect();
            // Ragged rows pad out to the header width
            cells.resize(columns.len(), Cell::Empty);
            rows.push(cells);
        }

        Self::from_records(columns, rows)
    }

    /// Build a dataset from already-parsed records
    pub fn from_records(
        columns: Vec<String>,
        rows: Vec<Vec<Cell>>,
    ) -> Result<Self, DatasetError> {
        let community_idx = columns
            .iter()
            .position(|c| c == COMMUNITY_COLUMN)
            .ok_or_else(|| DatasetError::MissingColumn(COMMUNITY_COLUMN.to_string()))?;

        Ok(Self {
            columns,
            rows,
            community_idx,
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Sorted unique community identifiers (empty cells skipped)
    pub fn communities(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .rows
            .iter()
            .map(|row| row[self.community_idx].to_string())
            .filter(|name| !name.is_empty())
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// All rows whose community cell matches the identifier exactly
    pub fn rows_for(&self, community: &str) -> Vec<&[Cell]> {
        self.rows
            .iter()
            .filter(|row| row[self.community_idx].to_string() == community)
            .map(Vec::as_slice)
            .collect()
    }

    /// Sum a numeric column over the given rows; 0 if the column is absent
    /// or a cell is non-numeric.
    pub fn column_sum(&self, rows: &[&[Cell]], column: &str) -> f64 {
        match self.column_index(column) {
            Some(idx) => rows
                .iter()
                .map(|row| row[idx].as_number().unwrap_or(0.0))
                .sum(),
            None => 0.0,
        }
    }

    /// Indices of numeric columns: no text cells and at least one number.
    /// Empty cells do not disqualify a column.
    pub fn numeric_columns(&self) -> Vec<usize> {
        (0..self.columns.len())
            .filter(|&idx| {
                let mut saw_number = false;
                for row in &self.rows {
                    match &row[idx] {
                        Cell::Number(_) => saw_number = true,
                        Cell::Text(_) => return false,
                        Cell::Empty => {}
                    }
                }
                saw_number
            })
            .collect()
    }

    /// Select columns for display. Columns missing from the dataset are
    /// silently dropped; rows with an empty cell in any selected column
    /// are dropped.
    pub fn table(&self, columns: &[(&str, &str)]) -> TableView {
        let selected: Vec<(usize, String)> = columns
            .iter()
            .filter_map(|(source, display)| {
                self.column_index(source).map(|idx| (idx, display.to_string()))
            })
            .collect();

        let rows = self
            .rows
            .iter()
            .filter(|row| selected.iter().all(|(idx, _)| !row[*idx].is_empty()))
            .map(|row| {
                selected
                    .iter()
                    .map(|(idx, _)| row[*idx].to_string())
                    .collect()
            })
            .collect();

        TableView {
            headers: selected.into_iter().map(|(_, display)| display).collect(),
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample() -> Dataset {
        let columns = vec![
            "Community".to_string(),
            "Crime Count".to_string(),
            "Score".to_string(),
            "Notes".to_string(),
        ];
        let rows = vec![
            vec![
                Cell::Text("Alpha".into()),
                Cell::Number(120.0),
                Cell::Number(0.5),
                Cell::Text("ok".into()),
            ],
            vec![
                Cell::Text("Beta".into()),
                Cell::Number(30.0),
                Cell::Empty,
                Cell::Text("partial".into()),
            ],
            vec![
                Cell::Text("Alpha".into()),
                Cell::Number(80.0),
                Cell::Number(0.7),
                Cell::Empty,
            ],
        ];
        Dataset::from_records(columns, rows).unwrap()
    }

    #[test]
    fn load_parses_numbers_and_text() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Community,Crime Count,Label").unwrap();
        writeln!(file, "Alpha,42,hot").unwrap();
        writeln!(file, "Beta,,cold").unwrap();
        file.flush().unwrap();

        let ds = Dataset::load(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.columns(), &["Community", "Crime Count", "Label"]);

        let alpha = ds.rows_for("Alpha");
        assert_eq!(alpha.len(), 1);
        assert_eq!(alpha[0][1], Cell::Number(42.0));
        assert_eq!(ds.rows_for("Beta")[0][1], Cell::Empty);
    }

    #[test]
    fn load_requires_community_column() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Region,Crime Count").unwrap();
        writeln!(file, "Alpha,42").unwrap();
        file.flush().unwrap();

        assert!(matches!(
            Dataset::load(file.path()),
            Err(DatasetError::MissingColumn(_))
        ));
    }

    #[test]
    fn communities_are_sorted_and_unique() {
        assert_eq!(sample().communities(), vec!["Alpha", "Beta"]);
    }

    #[test]
    fn column_sum_defaults_to_zero() {
        let ds = sample();
        let rows = ds.rows_for("Alpha");
        assert_eq!(ds.column_sum(&rows, "Crime Count"), 200.0);
        assert_eq!(ds.column_sum(&rows, "No Such Column"), 0.0);
    }

    #[test]
    fn numeric_columns_exclude_text_and_empty_only() {
        let ds = sample();
        let numeric = ds.numeric_columns();
        // "Community" and "Notes" carry text; "Score" has an empty cell but
        // stays numeric.
        assert_eq!(numeric, vec![1, 2]);
    }

    #[test]
    fn table_drops_missing_columns_and_incomplete_rows() {
        let ds = sample();
        let view = ds.table(&[
            ("Community", "Community"),
            ("Score", "Composite Score"),
            ("Ghost", "Never Shown"),
        ]);
        assert_eq!(view.headers, vec!["Community", "Composite Score"]);
        // Beta's Score cell is empty, so only the two Alpha rows survive.
        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.rows[0], vec!["Alpha", "0.5"]);
    }

    #[test]
    fn whole_numbers_display_without_decimal() {
        assert_eq!(Cell::Number(42.0).to_string(), "42");
        assert_eq!(Cell::Number(0.75).to_string(), "0.75");
        assert_eq!(Cell::Empty.to_string(), "");
    }
}
