use std::path::PathBuf;

/// Everything that can keep a chart or comparison table from being written.
#[derive(Debug, thiserror::Error)]
pub enum PlotError {
    #[error("input file {0} not found")]
    MissingInput(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not read {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    /// `line` is 1-based and counts the header, as an editor shows it.
    #[error("{path}: line {line}, column {column}: '{value}' is not a number")]
    InvalidNumber {
        path: String,
        line: u64,
        column: usize,
        value: String,
    },

    #[error("{path} has not enough columns ({found}, need {needed})")]
    NotEnoughColumns {
        path: String,
        found: usize,
        needed: usize,
    },

    #[error("{path} contains {found} rows, but {expected} were expected")]
    RowCountMismatch {
        path: String,
        found: usize,
        expected: usize,
    },

    #[error("{path} has no column named '{name}'")]
    UnknownColumn { path: String, name: String },

    #[error("{0} contains no data rows")]
    EmptyTable(String),

    #[error("tables have different widths ({left} vs {right})")]
    ShapeMismatch { left: usize, right: usize },

    #[error("rendering failed: {0}")]
    Render(String),

    #[error("invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

pub type Result<T> = std::result::Result<T, PlotError>;
