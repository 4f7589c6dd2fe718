//! Row iterator over an owned buffer.
//!
//! A [`CsvParser`] walks its buffer strictly forward. Opening it runs the
//! column-count pre-scan once (and skips the header row if asked); every
//! [`CsvParser::next_row`] call then reads exactly `num_columns` fields and
//! the row terminator that follows them.
//!
//! # States
//!
//! `Opened -> Iterating -> Exhausted`, with `Closed` reachable from any of
//! them. A fatal parse error moves the parser to `Exhausted`, so input past
//! the first error is never inspected.

use crate::columns::count_columns;
use crate::error::{CsvError, Result};
use crate::line_ending::LineEnding;
use crate::row::Row;
use crate::scanner::{FieldEnd, FieldScanner};
use crate::source::Buffer;
use log::{debug, warn};
use std::iter::FusedIterator;
use std::path::Path;

/// Lifecycle state of a [`CsvParser`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    /// Opened, no row requested yet.
    Opened,

    /// At least one row requested; more may remain.
    Iterating,

    /// End of stream reached, or a fatal error was returned.
    Exhausted,

    /// Buffer released. Any further read is [`CsvError::UseAfterClose`].
    Closed,
}

/// Options for opening a [`CsvParser`].
///
/// # Examples
///
/// ```
/// use mapped_csv::{LineEnding, ParserBuilder};
///
/// let mut parser = ParserBuilder::new()
///     .has_header(true)
///     .line_ending(LineEnding::Unix)
///     .open("id,val\n1,\"x,y\"\n")
///     .unwrap();
///
/// let row = parser.next_row().unwrap().unwrap();
/// assert_eq!(row.get(1), Some("x,y"));
/// assert!(parser.next_row().unwrap().is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ParserBuilder {
    has_header: bool,
    line_ending: Option<LineEnding>,
    pad_short_rows: bool,
}

impl ParserBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip the first logical row without returning it.
    pub fn has_header(mut self, yes: bool) -> Self {
        self.has_header = yes;
        self
    }

    /// Row terminator convention. [`LineEnding::Dos`] when not set.
    pub fn line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = Some(line_ending);
        self
    }

    /// Pad rows that end early with empty fields instead of failing with
    /// [`CsvError::ShortRow`]. Rows with too many fields still fail.
    pub fn pad_short_rows(mut self, yes: bool) -> Self {
        self.pad_short_rows = yes;
        self
    }

    /// Opens a parser that takes ownership of `buffer`.
    pub fn open<B: Into<Buffer>>(&self, buffer: B) -> Result<CsvParser> {
        let buffer = buffer.into();
        let line_ending = self.line_ending.unwrap_or_default();
        let length = buffer.len();

        if self.has_header && length == 0 {
            return Err(CsvError::EmptyInput);
        }

        let first = count_columns(&buffer, line_ending)?;
        debug!(
            "Opened {} byte buffer: {} column(s), {} line endings",
            length, first.columns, line_ending
        );

        let (cursor, consumed_rows) = if self.has_header {
            debug!("Skipped header row ({} bytes)", first.next_row_start());
            (first.next_row_start(), 1)
        } else {
            (0, 0)
        };

        Ok(CsvParser {
            buffer: Some(buffer),
            cursor,
            length,
            num_columns: first.columns,
            has_header: self.has_header,
            line_ending,
            pad_short_rows: self.pad_short_rows,
            state: ParserState::Opened,
            consumed_rows,
            rows_read: 0,
        })
    }

    /// Maps the file at `path` and opens a parser over it.
    pub fn open_path<P: AsRef<Path>>(&self, path: P) -> Result<CsvParser> {
        self.open(Buffer::map_file(path)?)
    }
}

/// An open parsing session over one buffer.
///
/// Not meant to be shared between threads; every read takes `&mut self`.
#[derive(Debug)]
pub struct CsvParser {
    buffer: Option<Buffer>,
    cursor: usize,
    length: usize,
    num_columns: usize,
    has_header: bool,
    line_ending: LineEnding,
    pad_short_rows: bool,
    state: ParserState,

    /// Logical rows consumed so far, header included. Labels errors.
    consumed_rows: usize,

    /// Rows returned to the caller.
    rows_read: usize,
}

impl CsvParser {
    /// Opens a parser with default options apart from `has_header` and
    /// `line_ending` ([`LineEnding::Dos`] if `None`).
    pub fn open<B: Into<Buffer>>(
        buffer: B,
        has_header: bool,
        line_ending: Option<LineEnding>,
    ) -> Result<Self> {
        let mut builder = ParserBuilder::new().has_header(has_header);
        if let Some(line_ending) = line_ending {
            builder = builder.line_ending(line_ending);
        }
        builder.open(buffer)
    }

    /// Reads the next row.
    ///
    /// Returns `Ok(None)` once the cursor reaches the end of the buffer; that
    /// is a normal end of stream, not an error. Errors are fatal: the parser
    /// is exhausted afterwards.
    pub fn next_row(&mut self) -> Result<Option<Row>> {
        let bytes = match (&self.buffer, self.state) {
            (Some(buffer), state) if state != ParserState::Closed => buffer.as_bytes(),
            _ => return Err(CsvError::UseAfterClose),
        };

        if self.state == ParserState::Exhausted {
            return Ok(None);
        }
        if self.cursor >= self.length {
            debug!("End of stream after {} row(s)", self.rows_read);
            self.state = ParserState::Exhausted;
            return Ok(None);
        }

        self.state = ParserState::Iterating;
        match self.read_row(bytes) {
            Ok((row, next)) => {
                self.cursor = next;
                self.consumed_rows += 1;
                self.rows_read += 1;
                Ok(Some(row))
            }
            Err(e) => {
                warn!("Stopping at byte {}: {}", self.cursor, e);
                self.state = ParserState::Exhausted;
                Err(e)
            }
        }
    }

    /// Reads one row starting at the cursor and returns it with the cursor
    /// of the following row.
    fn read_row(&self, bytes: &[u8]) -> Result<(Row, usize)> {
        let row = self.consumed_rows + 1;
        let scanner = FieldScanner::new(bytes, self.line_ending);
        let mut fields = Vec::with_capacity(self.num_columns);
        let mut cursor = self.cursor;
        let mut end = FieldEnd::Delimiter;

        while fields.len() < self.num_columns {
            if end.ends_row() {
                if !self.pad_short_rows {
                    return Err(CsvError::ShortRow {
                        row,
                        expected: self.num_columns,
                        found: fields.len(),
                    });
                }
                debug!(
                    "Row {}: padding {} missing field(s)",
                    row,
                    self.num_columns - fields.len()
                );
                fields.resize(self.num_columns, String::new());
                break;
            }

            let field = scanner.scan(cursor, row)?;
            let column = fields.len() + 1;
            let text =
                String::from_utf8(field.bytes).map_err(|_| CsvError::InvalidUtf8 { row, column })?;
            fields.push(text);
            cursor = field.next;
            end = field.end;
        }

        match end {
            FieldEnd::Delimiter => Err(CsvError::LongRow {
                row,
                expected: self.num_columns,
            }),
            FieldEnd::Terminator(len) => Ok((Row::new(fields), cursor + len)),
            FieldEnd::EndOfBuffer => Ok((Row::new(fields), cursor)),
        }
    }

    /// Releases the buffer.
    ///
    /// Closing twice is a no-op that logs a warning.
    pub fn close(&mut self) {
        if self.state == ParserState::Closed {
            warn!("Parser already closed");
            return;
        }
        self.buffer = None;
        self.state = ParserState::Closed;
        debug!("Closed parser after {} row(s)", self.rows_read);
    }

    /// Fixed number of fields in every row.
    pub fn num_columns(&self) -> usize {
        self.num_columns
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    pub fn has_header(&self) -> bool {
        self.has_header
    }

    /// Byte offset of the next unconsumed byte.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Number of rows returned so far (header excluded).
    pub fn rows_read(&self) -> usize {
        self.rows_read
    }

    pub fn state(&self) -> ParserState {
        self.state
    }
}

impl Iterator for CsvParser {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state == ParserState::Closed {
            return None;
        }
        self.next_row().transpose()
    }
}

impl FusedIterator for CsvParser {}

/// Opens a parser over `buffer`. See [`CsvParser::open`].
pub fn open<B: Into<Buffer>>(
    buffer: B,
    has_header: bool,
    line_ending: Option<LineEnding>,
) -> Result<CsvParser> {
    CsvParser::open(buffer, has_header, line_ending)
}

/// Reads the next row from `parser`. See [`CsvParser::next_row`].
pub fn next_row(parser: &mut CsvParser) -> Result<Option<Row>> {
    parser.next_row()
}

/// Closes `parser`. See [`CsvParser::close`].
pub fn close(parser: &mut CsvParser) {
    parser.close()
}
