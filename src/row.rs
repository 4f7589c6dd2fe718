//! Parsed row model.

use serde::Serialize;
use std::ops::Index;

/// One logical row of fields, in column order.
///
/// A row owns its fields outright; it holds no reference to the parser or
/// to the buffer it was read from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Row {
    fields: Vec<String>,
}

impl Row {
    /// Creates a row from already-unescaped fields.
    pub fn new(fields: Vec<String>) -> Self {
        Row { fields }
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the row has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the field at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.fields
    }

    pub fn into_vec(self) -> Vec<String> {
        self.fields
    }
}

impl Index<usize> for Row {
    type Output = str;

    fn index(&self, index: usize) -> &Self::Output {
        &self.fields[index]
    }
}

impl IntoIterator for Row {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl From<Vec<String>> for Row {
    fn from(fields: Vec<String>) -> Self {
        Row::new(fields)
    }
}
