//! Render surface trait
//!
//! Defines the interface the content sources draw through.

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Invalid coordinates or dimensions
    InvalidCoordinates,
    /// Buffer overflow
    BufferOverflow,
}

/// Text geometry of a surface
///
/// All values are in the surface's own coordinate units: pixels for a
/// graphics display, cells for a character display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextMetrics {
    /// Advance of one character
    pub char_width: u16,
    /// Distance between two text lines
    pub line_height: u16,
    /// Width of the content area
    pub width: u16,
    /// Height of the content area (status line excluded)
    pub height: u16,
}

impl TextMetrics {
    /// Characters that fit on a line starting at `x`
    pub fn columns_from(&self, x: u16) -> usize {
        if self.char_width == 0 {
            return 0;
        }
        (self.width.saturating_sub(x) / self.char_width) as usize
    }

    /// Text lines that fit in the content area
    pub fn rows(&self) -> usize {
        if self.line_height == 0 {
            return 0;
        }
        (self.height / self.line_height) as usize
    }

    /// Y coordinate of the given text row
    pub fn row_y(&self, row: u16) -> u16 {
        row.saturating_mul(self.line_height)
    }
}

/// Render surface
///
/// Provides a hardware-agnostic interface for the content slot and the
/// status line. `draw_text` wraps at the right edge of the content area
/// and drops whatever does not fit below it.
pub trait RenderSurface {
    /// Clear the content area (the status line is kept)
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Draw text with its top-left corner at `(x, y)`
    ///
    /// `\n` starts a new line at the same `x`.
    fn draw_text(&mut self, x: u16, y: u16, text: &str) -> Result<(), DisplayError>;

    /// Replace the status line and show it immediately
    fn log(&mut self, text: &str) -> Result<(), DisplayError>;

    /// Flush buffered content to the display
    fn update(&mut self) -> Result<(), DisplayError>;

    /// Text geometry of the content area
    fn metrics(&self) -> TextMetrics;
}

impl<T: RenderSurface + ?Sized> RenderSurface for &mut T {
    fn clear(&mut self) -> Result<(), DisplayError> {
        T::clear(self)
    }

    fn draw_text(&mut self, x: u16, y: u16, text: &str) -> Result<(), DisplayError> {
        T::draw_text(self, x, y, text)
    }

    fn log(&mut self, text: &str) -> Result<(), DisplayError> {
        T::log(self, text)
    }

    fn update(&mut self) -> Result<(), DisplayError> {
        T::update(self)
    }

    fn metrics(&self) -> TextMetrics {
        T::metrics(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_and_rows() {
        let metrics = TextMetrics {
            char_width: 6,
            line_height: 10,
            width: 240,
            height: 118,
        };
        assert_eq!(metrics.columns_from(0), 40);
        assert_eq!(metrics.columns_from(12), 38);
        assert_eq!(metrics.columns_from(300), 0);
        assert_eq!(metrics.rows(), 11);
        assert_eq!(metrics.row_y(3), 30);
    }

    #[test]
    fn test_zero_sized_metrics() {
        let metrics = TextMetrics {
            char_width: 0,
            line_height: 0,
            width: 10,
            height: 10,
        };
        assert_eq!(metrics.columns_from(0), 0);
        assert_eq!(metrics.rows(), 0);
    }
}
