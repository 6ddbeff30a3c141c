use csv::{ReaderBuilder, Trim};
use std::io::Read;
use std::path::Path;

use crate::error::{PlotError, Result};

/// Addresses a column either by position or by its header name.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Index(usize),
    Name(String),
}

impl Column {
    pub fn name(name: &str) -> Column {
        Column::Name(name.to_string())
    }
}

impl From<usize> for Column {
    fn from(index: usize) -> Column {
        Column::Index(index)
    }
}

/// Numeric result table as written by the experiment runners.
///
/// Every row has the same width; the csv reader rejects ragged files.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTable {
    source: String,
    headers: Option<Vec<String>>,
    rows: Vec<Vec<f64>>,
}

impl ResultTable {
    pub fn new(source: &str, headers: Option<Vec<String>>, rows: Vec<Vec<f64>>) -> ResultTable {
        ResultTable {
            source: source.to_string(),
            headers,
            rows,
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P, has_headers: bool) -> Result<ResultTable> {
        let path = path.as_ref();
        let source = path.display().to_string();
        let file = std::fs::File::open(path)?;
        ResultTable::from_reader(file, &source, has_headers)
    }

    /// Parses comma separated numbers. `source` only names the table in errors.
    pub fn from_reader<R: Read>(reader: R, source: &str, has_headers: bool) -> Result<ResultTable> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(has_headers)
            .trim(Trim::All)
            .from_reader(reader);
        let csv_err = |source_err| PlotError::Csv {
            path: source.to_string(),
            source: source_err,
        };

        let headers = if has_headers {
            let record = rdr.headers().map_err(csv_err)?;
            Some(record.iter().map(str::to_string).collect())
        } else {
            None
        };

        let mut rows = Vec::new();
        let first_line = if has_headers { 2 } else { 1 };
        for (row, result) in rdr.records().enumerate() {
            let record = result.map_err(csv_err)?;
            let line = record
                .position()
                .map_or(row as u64 + first_line, |position| position.line());
            let mut values = Vec::with_capacity(record.len());
            for (column, field) in record.iter().enumerate() {
                let value = field.parse::<f64>().map_err(|_| PlotError::InvalidNumber {
                    path: source.to_string(),
                    line,
                    column,
                    value: field.to_string(),
                })?;
                values.push(value);
            }
            rows.push(values);
        }

        log::debug!("loaded {} rows x {} columns from {}", rows.len(), width_of(&rows), source);
        Ok(ResultTable::new(source, headers, rows))
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn headers(&self) -> Option<&[String]> {
        self.headers.as_deref()
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

    /// Number of columns. Falls back to the header when there are no rows.
    pub fn width(&self) -> usize {
        match (self.rows.first(), &self.headers) {
            (Some(row), _) => row.len(),
            (None, Some(headers)) => headers.len(),
            (None, None) => 0,
        }
    }

    pub fn require_columns(&self, needed: usize) -> Result<()> {
        let found = self.width();
        if found < needed {
            return Err(PlotError::NotEnoughColumns {
                path: self.source.clone(),
                found,
                needed,
            });
        }
        Ok(())
    }

    pub fn require_rows(&self, expected: usize) -> Result<()> {
        if self.len() != expected {
            return Err(PlotError::RowCountMismatch {
                path: self.source.clone(),
                found: self.len(),
                expected,
            });
        }
        Ok(())
    }

    pub fn resolve(&self, column: &Column) -> Result<usize> {
        match column {
            Column::Index(index) => {
                self.require_columns(index + 1)?;
                Ok(*index)
            }
            Column::Name(name) => self
                .headers
                .as_ref()
                .and_then(|headers| headers.iter().position(|h| h == name))
                .ok_or_else(|| PlotError::UnknownColumn {
                    path: self.source.clone(),
                    name: name.clone(),
                }),
        }
    }

    pub fn column(&self, column: &Column) -> Result<Vec<f64>> {
        let index = self.resolve(column)?;
        Ok(self.rows.iter().map(|row| row[index]).collect())
    }

    /// Header of a column, or `colN` for header-less tables.
    pub fn column_name(&self, index: usize) -> String {
        self.headers
            .as_ref()
            .and_then(|headers| headers.get(index).cloned())
            .unwrap_or_else(|| format!("col{}", index))
    }
}

fn width_of(rows: &[Vec<f64>]) -> usize {
    rows.first().map_or(0, Vec::len)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(data: &str, has_headers: bool) -> Result<ResultTable> {
        ResultTable::from_reader(data.as_bytes(), "test.csv", has_headers)
    }

    #[test]
    fn reads_headerless_numbers() {
        let table = load("32,0.5\n64, 1.25\n", false).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.width(), 2);
        assert_eq!(table.column(&Column::Index(1)).unwrap(), vec![0.5, 1.25]);
        assert!(table.headers().is_none());
    }

    #[test]
    fn reads_named_columns() {
        let data = "Tamaño,TiempoPromedio(s),AccesosIOPromedio\n1,2.5,100\n2,5.0,210\n";
        let table = load(data, true).unwrap();
        assert_eq!(table.column(&Column::name("AccesosIOPromedio")).unwrap(), vec![100.0, 210.0]);
        assert_eq!(table.column_name(0), "Tamaño");
    }

    #[test]
    fn single_column_is_not_enough() {
        let table = load("1\n2\n3\n", false).unwrap();
        match table.require_columns(2) {
            Err(PlotError::NotEnoughColumns { found, needed, .. }) => {
                assert_eq!((found, needed), (1, 2));
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(table.column(&Column::Index(1)).is_err());
    }

    #[test]
    fn row_count_must_match() {
        let table = load("1\n2\n", false).unwrap();
        assert!(table.require_rows(2).is_ok());
        assert!(matches!(
            table.require_rows(8),
            Err(PlotError::RowCountMismatch { found: 2, expected: 8, .. })
        ));
    }

    #[test]
    fn rejects_ragged_rows() {
        assert!(matches!(load("1,2\n3\n", false), Err(PlotError::Csv { .. })));
    }

    #[test]
    fn rejects_text_cells() {
        match load("1,2\n3,abc\n", false) {
            Err(PlotError::InvalidNumber { line, column, value, .. }) => {
                assert_eq!((line, column, value.as_str()), (2, 1, "abc"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn bad_cell_reports_file_line() {
        let data = "Tamaño,TiempoPromedio(s)\n1,0.5\n\n2,n/a\n";
        match load(data, true) {
            Err(err @ PlotError::InvalidNumber { .. }) => {
                assert!(matches!(err, PlotError::InvalidNumber { line: 4, column: 1, .. }));
                assert!(err.to_string().contains("line 4"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn unknown_name_is_reported() {
        let table = load("a,b\n1,2\n", true).unwrap();
        assert!(matches!(
            table.resolve(&Column::name("c")),
            Err(PlotError::UnknownColumn { .. })
        ));
    }
}
