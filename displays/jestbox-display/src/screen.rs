//! Screen buffer types
//!
//! A character-grid surface kept entirely in memory. Coordinates are in
//! cells: one column per character, one row per line.

use alloc::string::String;
use alloc::vec::Vec;

use crate::backend::{DisplayError, RenderSurface, TextMetrics};
use crate::layout::wrap;

/// In-memory character surface
///
/// Holds the content rows, the status line and a history of everything
/// that was logged. Useful as a frame model and for inspecting output.
#[derive(Debug, Clone)]
pub struct TextScreen {
    /// Content rows
    rows: Vec<String>,
    /// Characters per row
    cols: usize,
    /// Status line
    status: String,
    /// Every status message in order
    log_history: Vec<String>,
    /// Number of flushes
    updates: u32,
    /// Whether content changed since the last flush
    dirty: bool,
}

impl TextScreen {
    /// Create an empty screen with the given content size
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            rows: (0..rows).map(|_| String::new()).collect(),
            cols,
            status: String::new(),
            log_history: Vec::new(),
            updates: 0,
            dirty: true,
        }
    }

    /// Get the content of a specific row
    pub fn line(&self, row: usize) -> Option<&str> {
        self.rows.get(row).map(|s| s.as_str())
    }

    /// Get all rows as an iterator
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|s| s.as_str())
    }

    /// All non-empty rows joined with `\n`
    pub fn text(&self) -> String {
        let mut out = String::new();
        for line in self.lines().filter(|l| !l.is_empty()) {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(line);
        }
        out
    }

    /// Current status line
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Every status message logged so far
    pub fn log_history(&self) -> &[String] {
        &self.log_history
    }

    /// Number of times the screen was flushed
    pub fn updates(&self) -> u32 {
        self.updates
    }

    /// Check if the content changed since the last flush
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn put(&mut self, row: usize, col: usize, text: &str) {
        let Some(line) = self.rows.get_mut(row) else {
            return;
        };

        // Pad so the text starts at `col`
        let len = line.chars().count();
        if len < col {
            line.extend(core::iter::repeat(' ').take(col - len));
        } else if len > col {
            let cut = line.char_indices().nth(col).map_or(line.len(), |(i, _)| i);
            line.truncate(cut);
        }
        line.push_str(text);
    }
}

impl RenderSurface for TextScreen {
    fn clear(&mut self) -> Result<(), DisplayError> {
        for row in &mut self.rows {
            row.clear();
        }
        self.dirty = true;
        Ok(())
    }

    fn draw_text(&mut self, x: u16, y: u16, text: &str) -> Result<(), DisplayError> {
        let col = x as usize;
        if col >= self.cols {
            return Err(DisplayError::InvalidCoordinates);
        }

        for (offset, line) in wrap(text, self.cols - col).into_iter().enumerate() {
            self.put(y as usize + offset, col, line);
        }
        self.dirty = true;
        Ok(())
    }

    fn log(&mut self, text: &str) -> Result<(), DisplayError> {
        self.status.clear();
        self.status.extend(text.chars().take(self.cols));
        self.log_history.push(String::from(text));
        Ok(())
    }

    fn update(&mut self) -> Result<(), DisplayError> {
        self.updates = self.updates.saturating_add(1);
        self.dirty = false;
        Ok(())
    }

    fn metrics(&self) -> TextMetrics {
        TextMetrics {
            char_width: 1,
            line_height: 1,
            width: self.cols as u16,
            height: self.rows.len() as u16,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TextScreen {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "TextScreen[");
        for (i, line) in self.rows.iter().enumerate() {
            if i > 0 {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "{}", line.as_str());
        }
        defmt::write!(f, "]");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_and_read_back() {
        let mut screen = TextScreen::new(10, 3);
        screen.draw_text(0, 0, "Hello").unwrap();
        assert_eq!(screen.line(0), Some("Hello"));
        assert_eq!(screen.line(1), Some(""));
    }

    #[test]
    fn test_draw_wraps_and_truncates() {
        let mut screen = TextScreen::new(5, 2);
        screen.draw_text(0, 0, "aaa bbb ccc").unwrap();
        assert_eq!(screen.line(0), Some("aaa"));
        assert_eq!(screen.line(1), Some("bbb"));
        // Third line did not fit
        assert_eq!(screen.text(), "aaa\nbbb");
    }

    #[test]
    fn test_draw_at_column() {
        let mut screen = TextScreen::new(10, 2);
        screen.draw_text(0, 0, "Temp").unwrap();
        screen.draw_text(6, 0, "12C").unwrap();
        assert_eq!(screen.line(0), Some("Temp  12C"));
    }

    #[test]
    fn test_draw_outside_is_rejected() {
        let mut screen = TextScreen::new(4, 1);
        assert_eq!(
            screen.draw_text(4, 0, "x"),
            Err(DisplayError::InvalidCoordinates)
        );
    }

    #[test]
    fn test_clear_keeps_status() {
        let mut screen = TextScreen::new(10, 2);
        screen.draw_text(0, 0, "content").unwrap();
        screen.log("status").unwrap();
        screen.clear().unwrap();
        assert_eq!(screen.text(), "");
        assert_eq!(screen.status(), "status");
    }

    #[test]
    fn test_log_history_and_updates() {
        let mut screen = TextScreen::new(6, 1);
        screen.log("first message").unwrap();
        screen.log("second").unwrap();
        assert_eq!(screen.status(), "second");
        assert_eq!(screen.log_history(), ["first message", "second"]);

        assert!(screen.is_dirty());
        screen.update().unwrap();
        assert!(!screen.is_dirty());
        assert_eq!(screen.updates(), 1);
    }

    #[test]
    fn test_metrics_are_cells() {
        let screen = TextScreen::new(21, 7);
        let metrics = screen.metrics();
        assert_eq!(metrics.columns_from(0), 21);
        assert_eq!(metrics.rows(), 7);
    }
}
