//! Column-count pre-scan.
//!
//! Runs once when a parser is opened. The width of the first logical row
//! fixes the width of every row that follows.

use crate::error::Result;
use crate::line_ending::LineEnding;
use crate::scanner::{FieldEnd, FieldScanner};

/// Shape of the first logical row, as found by [`count_columns`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FirstRow {
    /// Number of fields in the row.
    pub columns: usize,

    /// Cursor where the row stopped: its terminator, or the end of the buffer.
    pub stop: usize,

    /// How the row stopped.
    pub end: FieldEnd,
}

impl FirstRow {
    /// Cursor of the first byte after the row and its terminator.
    pub fn next_row_start(&self) -> usize {
        match self.end {
            FieldEnd::Terminator(len) => self.stop + len,
            _ => self.stop,
        }
    }
}

/// Counts the fields of the first logical row of `bytes`.
///
/// Field content is scanned but discarded. An empty buffer has zero columns.
pub fn count_columns(bytes: &[u8], line_ending: LineEnding) -> Result<FirstRow> {
    if bytes.is_empty() {
        return Ok(FirstRow {
            columns: 0,
            stop: 0,
            end: FieldEnd::EndOfBuffer,
        });
    }

    let scanner = FieldScanner::new(bytes, line_ending);
    let mut cursor = 0;
    let mut columns = 0;
    loop {
        let (next, end) = scanner.skip(cursor, 1)?;
        columns += 1;
        cursor = next;
        if end.ends_row() {
            return Ok(FirstRow {
                columns,
                stop: cursor,
                end,
            });
        }
    }
}
