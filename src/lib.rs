//! # Mapped CSV
//!
//! A forward-only, single-pass CSV parser over an owned byte buffer,
//! typically a memory-mapped file.
//!
//! ## Design Principles
//!
//! - **Pull-based**: one row per [`CsvParser::next_row`] call, nothing buffered
//! - **Fixed width**: the first row fixes the column count for the whole file
//! - **RFC4180 quoting**: `""` escapes, commas and newlines inside quotes
//! - **Explicit line endings**: Unix `\n`, Dos `\r\n` (default), Mac `\r`
//! - **No recovery**: the first malformed row ends the stream with an error
//!
//! ## Example
//!
//! ```
//! use mapped_csv::{CsvParser, LineEnding};
//!
//! let input = "id,val\n1,\"x,y\"\n2,\"z\"\"q\"\n";
//! let mut parser = CsvParser::open(input, true, Some(LineEnding::Unix)).unwrap();
//!
//! let first = parser.next_row().unwrap().unwrap();
//! assert_eq!(first.get(1), Some("x,y"));
//!
//! let second = parser.next_row().unwrap().unwrap();
//! assert_eq!(second.get(1), Some("z\"q"));
//!
//! assert!(parser.next_row().unwrap().is_none());
//! parser.close();
//! ```

pub mod columns;
pub mod error;
pub mod line_ending;
pub mod parser;
pub mod row;
pub mod scanner;
pub mod source;

pub use error::{CsvError, Result};
pub use line_ending::LineEnding;
pub use parser::{close, next_row, open, CsvParser, ParserBuilder, ParserState};
pub use row::Row;
pub use source::Buffer;
