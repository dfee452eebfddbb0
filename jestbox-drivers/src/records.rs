//! Line records from embedded text
//!
//! The joke file is compiled into flash with `include_str!`. Blank lines
//! are skipped, so a trailing newline does not count as a record.

use jestbox_hal::RecordStore;

/// Non-blank lines of a text blob
#[derive(Debug, Clone, Copy)]
pub struct LineRecords<'a> {
    text: &'a str,
    count: usize,
}

impl<'a> LineRecords<'a> {
    pub fn new(text: &'a str) -> Self {
        let count = Self::records(text).count();
        Self { text, count }
    }

    fn records(text: &'a str) -> impl Iterator<Item = &'a str> {
        text.lines().filter(|line| !line.trim().is_empty())
    }
}

impl RecordStore for LineRecords<'_> {
    fn len(&self) -> usize {
        self.count
    }

    fn record(&self, index: usize) -> Option<&str> {
        Self::records(self.text).nth(index)
    }
}
