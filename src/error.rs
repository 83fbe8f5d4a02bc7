use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("{kind} data file {path:?} does not exist")]
    MissingFile { kind: &'static str, path: PathBuf },

    #[error("{kind} CSV error: {source}")]
    Csv {
        kind: &'static str,
        #[source]
        source: csv::Error,
    },

    #[error("{kind} file has {found} row(s); expected at least 2 leading header rows")]
    TooFewRows { kind: &'static str, found: usize },

    #[error("{kind} file did not contain any data rows")]
    EmptyData { kind: &'static str },

    #[error("{kind} data row {row}: missing column {column} ({field})")]
    MissingColumn {
        kind: &'static str,
        row: usize,
        column: usize,
        field: &'static str,
    },

    #[error("{kind} data row {row}: invalid date {value:?} for {field} (expected {format})")]
    InvalidDate {
        kind: &'static str,
        row: usize,
        field: &'static str,
        value: String,
        format: &'static str,
    },

    #[error("{kind} data row {row}: invalid integer {value:?} for {field}")]
    InvalidNumber {
        kind: &'static str,
        row: usize,
        field: &'static str,
        value: String,
    },

    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type ReportResult<T> = Result<T, ReportError>;
