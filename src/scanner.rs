//! Single-field lexer.
//!
//! The scanner consumes exactly one field starting at a cursor and reports
//! where the next field (or the row terminator) begins. It never looks
//! backwards and never consumes the terminator itself: that belongs to the
//! row iterator.
//!
//! # Quoting
//!
//! - A field starting with `"` is quoted. Inside it, `""` is one literal
//!   `"`, and commas and terminator bytes are ordinary content.
//! - A single `"` closes the quoted region. Anything between the closing
//!   quote and the next comma or terminator is kept as content (lenient).
//! - In an unquoted field, `"` is an ordinary character.

use crate::error::{CsvError, Result};
use crate::line_ending::LineEnding;
use log::debug;

const DELIMITER: u8 = b',';
const QUOTE: u8 = b'"';

/// What stopped a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEnd {
    /// A comma; the next field of the same row follows.
    Delimiter,

    /// A row terminator of the given byte length starts at the returned cursor.
    Terminator(usize),

    /// The buffer ended.
    EndOfBuffer,
}

impl FieldEnd {
    /// Returns `true` if no further field of the current row follows.
    pub fn ends_row(self) -> bool {
        !matches!(self, FieldEnd::Delimiter)
    }
}

/// One scanned field with its unescaped bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedField {
    /// Unquoted, unescaped content. Always a fresh allocation.
    pub bytes: Vec<u8>,

    /// Cursor after the field: past the comma, or at the terminator's first byte.
    pub next: usize,

    /// What stopped the field.
    pub end: FieldEnd,
}

/// Forward-only field scanner over a borrowed buffer.
#[derive(Debug, Clone, Copy)]
pub struct FieldScanner<'a> {
    bytes: &'a [u8],
    line_ending: LineEnding,
}

impl<'a> FieldScanner<'a> {
    /// Creates a scanner over `bytes` using `line_ending` to detect row ends.
    pub fn new(bytes: &'a [u8], line_ending: LineEnding) -> Self {
        FieldScanner { bytes, line_ending }
    }

    /// Scans one field starting at `cursor`, returning its unescaped content.
    ///
    /// `row` is only used to label errors.
    pub fn scan(&self, cursor: usize, row: usize) -> Result<ScannedField> {
        let mut bytes = Vec::new();
        let (next, end) = self.scan_with(cursor, row, &mut |chunk: &[u8]| {
            bytes.extend_from_slice(chunk)
        })?;
        Ok(ScannedField { bytes, next, end })
    }

    /// Scans one field starting at `cursor` and discards its content.
    pub fn skip(&self, cursor: usize, row: usize) -> Result<(usize, FieldEnd)> {
        self.scan_with(cursor, row, &mut |_: &[u8]| {})
    }

    fn scan_with(
        &self,
        cursor: usize,
        row: usize,
        sink: &mut impl FnMut(&[u8]),
    ) -> Result<(usize, FieldEnd)> {
        if self.bytes.get(cursor) != Some(&QUOTE) {
            let (content_end, next, end) = self.scan_unquoted(cursor);
            sink(&self.bytes[cursor..content_end]);
            return Ok((next, end));
        }

        let mut pos = cursor + 1;
        let mut run_start = pos;
        loop {
            match self.bytes.get(pos) {
                None => return Err(CsvError::TruncatedField { row, offset: cursor }),
                Some(&QUOTE) => {
                    sink(&self.bytes[run_start..pos]);
                    if self.bytes.get(pos + 1) == Some(&QUOTE) {
                        sink(&[QUOTE]);
                        pos += 2;
                        run_start = pos;
                    } else {
                        pos += 1;
                        break;
                    }
                }
                Some(_) => pos += 1,
            }
        }

        let (content_end, next, end) = self.scan_unquoted(pos);
        if content_end > pos {
            debug!(
                "Row {}: {} byte(s) after closing quote at offset {} kept as content",
                row,
                content_end - pos,
                pos
            );
            sink(&self.bytes[pos..content_end]);
        }
        Ok((next, end))
    }

    /// Returns `(content_end, next, end)` for raw content starting at `start`.
    fn scan_unquoted(&self, start: usize) -> (usize, usize, FieldEnd) {
        let mut pos = start;
        while pos < self.bytes.len() {
            if self.bytes[pos] == DELIMITER {
                return (pos, pos + 1, FieldEnd::Delimiter);
            }
            if let Some(len) = self.line_ending.terminator_at(self.bytes, pos) {
                return (pos, pos, FieldEnd::Terminator(len));
            }
            pos += 1;
        }
        (pos, pos, FieldEnd::EndOfBuffer)
    }
}
