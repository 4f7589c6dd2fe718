//! Row terminator conventions.
//!
//! A [`LineEnding`] is chosen once when a parser is opened and never changes
//! for the lifetime of that parser.

use crate::error::CsvError;
use std::fmt;
use std::str::FromStr;

/// The byte sequence that ends a logical row.
///
/// # Default
///
/// The default is [`LineEnding::Dos`]. Under `Dos` a lone `\n` or a lone
/// `\r` is ordinary field content; a file written with Unix endings must be
/// opened with [`LineEnding::Unix`] explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineEnding {
    /// `\n`
    Unix,

    /// `\r\n`
    #[default]
    Dos,

    /// `\r` (classic Mac OS). A `\n` is ordinary field content.
    Mac,
}

impl LineEnding {
    /// Returns the terminator length if a row terminator starts at `pos`.
    ///
    /// Looks at most one byte ahead of `pos`. Returns `None` when `pos` is at
    /// or past the end of `bytes`.
    pub fn terminator_at(self, bytes: &[u8], pos: usize) -> Option<usize> {
        match (self, bytes.get(pos).copied()) {
            (LineEnding::Unix, Some(b'\n')) => Some(1),
            (LineEnding::Mac, Some(b'\r')) => Some(1),
            (LineEnding::Dos, Some(b'\r')) if bytes.get(pos + 1) == Some(&b'\n') => Some(2),
            _ => None,
        }
    }
}

impl FromStr for LineEnding {
    type Err = CsvError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "unix" | "lf" => Ok(LineEnding::Unix),
            "dos" | "crlf" => Ok(LineEnding::Dos),
            "mac" | "cr" => Ok(LineEnding::Mac),
            other => Err(CsvError::InvalidArgument(format!(
                "unknown line ending '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for LineEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LineEnding::Unix => "unix",
            LineEnding::Dos => "dos",
            LineEnding::Mac => "mac",
        };
        f.write_str(name)
    }
}
