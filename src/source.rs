//! Input buffers.
//!
//! A parser owns exactly one [`Buffer`] for its whole lifetime. The buffer is
//! either an in-memory copy or a read-only memory map of a file.

use crate::error::Result;
use log::debug;
use memmap2::Mmap;
use std::fs::File;
use std::ops::Deref;
use std::path::Path;

/// An immutable, contiguous byte buffer.
#[derive(Debug)]
pub enum Buffer {
    /// Bytes held on the heap.
    Memory(Vec<u8>),

    /// A read-only map of a file.
    Mapped(Mmap),
}

impl Buffer {
    /// Opens `path` and maps it read-only.
    ///
    /// Zero-length files produce an empty in-memory buffer instead of a map.
    /// Any failure to open, stat, or map is returned as
    /// [`CsvError::IoUnavailable`](crate::CsvError::IoUnavailable).
    pub fn map_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let len = file.metadata()?.len();

        if len == 0 {
            debug!("{} is empty, skipping map", path.display());
            return Ok(Buffer::Memory(Vec::new()));
        }

        // SAFETY: the map is read-only and owned by the returned buffer. The
        // file is expected not to be truncated by another process while mapped.
        let mmap = unsafe { Mmap::map(&file) }?;
        debug!("Mapped {} ({} bytes)", path.display(), len);
        Ok(Buffer::Mapped(mmap))
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Buffer::Memory(bytes) => bytes.as_slice(),
            Buffer::Mapped(mmap) => &mmap[..],
        }
    }
}

impl Deref for Buffer {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.as_bytes()
    }
}

impl AsRef<[u8]> for Buffer {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<Vec<u8>> for Buffer {
    fn from(bytes: Vec<u8>) -> Self {
        Buffer::Memory(bytes)
    }
}

impl From<&[u8]> for Buffer {
    fn from(bytes: &[u8]) -> Self {
        Buffer::Memory(bytes.to_vec())
    }
}

impl From<String> for Buffer {
    fn from(text: String) -> Self {
        Buffer::Memory(text.into_bytes())
    }
}

impl From<&str> for Buffer {
    fn from(text: &str) -> Self {
        Buffer::Memory(text.as_bytes().to_vec())
    }
}
