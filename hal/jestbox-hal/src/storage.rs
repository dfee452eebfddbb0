//! Read-only record storage
//!
//! The local joke collection is a line-oriented file where every line is
//! one record. The store is never written by the device.

/// Line-oriented, read-only record store
pub trait RecordStore {
    /// Number of records in the store
    fn len(&self) -> usize;

    /// Check whether the store has no records
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the record at `index` (0-based)
    ///
    /// Returns `None` if `index` is out of range.
    fn record(&self, index: usize) -> Option<&str>;
}
