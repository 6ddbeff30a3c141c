use csv::Writer;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{PlotError, Result};
use crate::render::ensure_parent;
use crate::table::{Column, ResultTable};

/// One size present in both tables.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub key: f64,
    pub a: Vec<f64>,
    pub b: Vec<f64>,
    /// `a / b` per metric; `None` where `b` is zero.
    pub ratios: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonTable {
    pub key_name: String,
    pub metric_names: Vec<String>,
    pub label_a: String,
    pub label_b: String,
    pub rows: Vec<ComparisonRow>,
}

/// Inner join of two result tables on `key`, with a ratio column per metric.
///
/// Every column of `a` except the key is a metric. When both tables have
/// headers, each metric is looked up in `b` by name, so column order may
/// differ; header-less tables pair columns by position and need the same width.
/// Keys missing from either side are dropped.
pub fn compare_and_merge(a: &ResultTable, b: &ResultTable, key: &Column) -> Result<ComparisonTable> {
    let key_a = a.resolve(key)?;
    let key_b = b.resolve(key)?;

    let columns_a: Vec<usize> = (0..a.width()).filter(|&i| i != key_a).collect();
    let columns_b: Vec<usize> = match (a.headers(), b.headers()) {
        (Some(_), Some(_)) => columns_a
            .iter()
            .map(|&i| b.resolve(&Column::Name(a.column_name(i))))
            .collect::<Result<_>>()?,
        _ => {
            if a.width() != b.width() {
                return Err(PlotError::ShapeMismatch {
                    left: a.width(),
                    right: b.width(),
                });
            }
            (0..b.width()).filter(|&i| i != key_b).collect()
        }
    };

    let mut index: HashMap<u64, Vec<&Vec<f64>>> = HashMap::new();
    for row in b.rows() {
        if let Some(bits) = key_bits(row[key_b]) {
            index.entry(bits).or_default().push(row);
        }
    }

    let mut rows = Vec::new();
    for row_a in a.rows() {
        let matches = match key_bits(row_a[key_a]).and_then(|bits| index.get(&bits)) {
            Some(matches) => matches,
            None => continue,
        };
        for row_b in matches {
            let metrics_a = pick(row_a, &columns_a);
            let metrics_b = pick(row_b, &columns_b);
            let ratios = metrics_a
                .iter()
                .zip(&metrics_b)
                .map(|(&x, &y)| ratio(x, y))
                .collect();
            rows.push(ComparisonRow {
                key: row_a[key_a],
                a: metrics_a,
                b: metrics_b,
                ratios,
            });
        }
    }

    log::debug!(
        "joined {} rows from {} ({} rows) and {} ({} rows)",
        rows.len(),
        a.source(),
        a.len(),
        b.source(),
        b.len()
    );

    Ok(ComparisonTable {
        key_name: a.column_name(key_a),
        metric_names: columns_a.iter().map(|&i| a.column_name(i)).collect(),
        label_a: "A".to_string(),
        label_b: "B".to_string(),
        rows,
    })
}

fn pick(row: &[f64], columns: &[usize]) -> Vec<f64> {
    columns.iter().map(|&i| row[i]).collect()
}

fn ratio(a: f64, b: f64) -> Option<f64> {
    if b == 0.0 {
        None
    } else {
        Some(a / b)
    }
}

// -0.0 and 0.0 share a key; NaN never matches.
fn key_bits(value: f64) -> Option<u64> {
    if value.is_nan() {
        None
    } else {
        Some((value + 0.0).to_bits())
    }
}

impl ComparisonTable {
    pub fn with_labels(mut self, label_a: &str, label_b: &str) -> ComparisonTable {
        self.label_a = label_a.to_string();
        self.label_b = label_b.to_string();
        self
    }

    pub fn ratios(&self, metric: usize) -> Vec<Option<f64>> {
        self.rows.iter().map(|row| row.ratios[metric]).collect()
    }

    pub fn header(&self) -> Vec<String> {
        let mut header = vec![self.key_name.clone()];
        for label in [&self.label_a, &self.label_b] {
            header.extend(self.metric_names.iter().map(|m| format!("{}_{}", m, label)));
        }
        header.extend(self.metric_names.iter().map(|m| format!("Ratio_{}", m)));
        header
    }

    /// Writes the table as CSV; `destination` names the target in errors.
    pub fn write_csv<W: Write>(&self, out: W, destination: &str) -> Result<()> {
        let mut wtr = Writer::from_writer(out);
        let csv_err = |source| PlotError::Csv {
            path: destination.to_string(),
            source,
        };

        wtr.write_record(self.header()).map_err(csv_err)?;
        for row in &self.rows {
            let mut record = vec![row.key.to_string()];
            record.extend(row.a.iter().chain(&row.b).map(f64::to_string));
            record.extend(row.ratios.iter().map(|r| match r {
                Some(value) => value.to_string(),
                None => "NaN".to_string(),
            }));
            wtr.write_record(&record).map_err(csv_err)?;
        }
        wtr.flush().map_err(|e| csv_err(e.into()))?;
        Ok(())
    }

    pub fn write_to_path(&self, path: &Path) -> Result<()> {
        ensure_parent(path)?;
        let file = std::fs::File::create(path)?;
        self.write_csv(file, &path.display().to_string())?;
        log::info!("comparison saved to {}", path.display());
        Ok(())
    }
}

/// Joins two result files and writes the comparison table.
#[derive(Debug, Clone, PartialEq)]
pub struct CompareJob {
    pub path_a: PathBuf,
    pub path_b: PathBuf,
    pub has_headers: bool,
    pub key: Column,
    pub label_a: String,
    pub label_b: String,
    pub output: String,
}

impl CompareJob {
    pub fn run(&self, output_dir: Option<&Path>) -> Result<PathBuf> {
        let a = ResultTable::from_path(&self.path_a, self.has_headers)?;
        let b = ResultTable::from_path(&self.path_b, self.has_headers)?;
        let table = compare_and_merge(&a, &b, &self.key)?.with_labels(&self.label_a, &self.label_b);

        let path = match output_dir {
            Some(dir) => dir.join(&self.output),
            None => PathBuf::from(&self.output),
        };
        table.write_to_path(&path)?;
        Ok(path)
    }
}
