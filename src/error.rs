//! Error types for the CSV parser.

use thiserror::Error;

/// Result type alias for parser operations
pub type Result<T> = std::result::Result<T, CsvError>;

/// Errors that can occur while mapping, parsing, or re-emitting CSV data.
///
/// Row numbers are 1-based and count logical rows, header included.
#[derive(Error, Debug)]
pub enum CsvError {
    /// The input file could not be opened, stat-ed, or mapped
    #[error("input unavailable: {0}")]
    IoUnavailable(#[from] std::io::Error),

    /// A quoted field ran past the end of the buffer
    #[error("truncated quoted field in row {row} starting at byte {offset}")]
    TruncatedField { row: usize, offset: usize },

    /// A row ended before every column was read
    #[error("row {row} has {found} fields, expected {expected}")]
    ShortRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A row continued past its last expected column
    #[error("row {row} has more than {expected} fields")]
    LongRow { row: usize, expected: usize },

    /// A header skip was requested on an empty buffer
    #[error("empty input: no header row to skip")]
    EmptyInput,

    /// The parser handle was already closed
    #[error("parser used after close")]
    UseAfterClose,

    /// A field's unescaped bytes are not valid UTF-8
    #[error("invalid UTF-8 in row {row}, column {column}")]
    InvalidUtf8 { row: usize, column: usize },

    /// Failed to write normalized CSV output
    #[error("CSV output error: {0}")]
    Output(#[from] csv::Error),

    /// Missing input file argument
    #[error("Missing input file argument. Usage: mapped-csv [--header] [--line-ending unix|dos|mac] [--pad] <input.csv>")]
    MissingArgument,

    /// Unrecognized or malformed command-line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
