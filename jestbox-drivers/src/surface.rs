//! Text surface on an embedded-graphics display
//!
//! Layout, top to bottom:
//!
//! ```text
//! y = 0                 content area (wrapped text)
//! y = height - S - 1    1 px rule
//! y = height - S        status line, S = status_height
//! ```
//!
//! The ST7789 keeps its own frame memory, so drawing is immediate and
//! `update` has nothing to flush.

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use jestbox_display::{wrap, DisplayError, RenderSurface, TextMetrics};

/// Fonts and colors of a [`GraphicsSurface`]
#[derive(Clone, Copy)]
pub struct SurfaceStyle {
    pub font: &'static MonoFont<'static>,
    pub foreground: Rgb565,
    pub background: Rgb565,
    /// Height of the status line in pixels
    pub status_height: u16,
}

impl Default for SurfaceStyle {
    fn default() -> Self {
        Self {
            font: &FONT_6X10,
            foreground: Rgb565::WHITE,
            background: Rgb565::BLACK,
            status_height: 12,
        }
    }
}

/// Render surface on an RGB565 draw target
pub struct GraphicsSurface<D> {
    target: D,
    style: SurfaceStyle,
    width: u16,
    height: u16,
}

impl<D> GraphicsSurface<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    pub fn new(target: D, style: SurfaceStyle) -> Self {
        let size = target.bounding_box().size;
        Self {
            target,
            style,
            width: size.width.min(u16::MAX as u32) as u16,
            height: size.height.min(u16::MAX as u32) as u16,
        }
    }

    /// Blank the screen and draw the status rule
    pub fn init(&mut self) -> Result<(), DisplayError> {
        self.target
            .clear(self.style.background)
            .map_err(|_| DisplayError::Communication)?;

        let y = i32::from(self.content_height());
        Line::new(Point::new(0, y), Point::new(i32::from(self.width) - 1, y))
            .into_styled(PrimitiveStyle::with_stroke(self.style.foreground, 1))
            .draw(&mut self.target)
            .map_err(|_| DisplayError::Communication)
    }

    /// Release the draw target
    pub fn into_inner(self) -> D {
        self.target
    }

    fn content_height(&self) -> u16 {
        self.height
            .saturating_sub(self.style.status_height)
            .saturating_sub(1)
    }

    fn status_y(&self) -> u16 {
        self.height.saturating_sub(self.style.status_height)
    }

    fn text_style(&self) -> MonoTextStyle<'static, Rgb565> {
        MonoTextStyle::new(self.style.font, self.style.foreground)
    }

    fn fill(&mut self, y: u16, height: u16) -> Result<(), DisplayError> {
        let area = Rectangle::new(
            Point::new(0, i32::from(y)),
            Size::new(u32::from(self.width), u32::from(height)),
        );
        self.target
            .fill_solid(&area, self.style.background)
            .map_err(|_| DisplayError::Communication)
    }

    fn draw_line(&mut self, x: u16, y: u16, text: &str) -> Result<(), DisplayError> {
        let style = self.text_style();
        Text::with_baseline(
            text,
            Point::new(i32::from(x), i32::from(y)),
            style,
            Baseline::Top,
        )
        .draw(&mut self.target)
        .map(|_| ())
        .map_err(|_| DisplayError::Communication)
    }
}

impl<D> RenderSurface for GraphicsSurface<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.fill(0, self.content_height())
    }

    fn draw_text(&mut self, x: u16, y: u16, text: &str) -> Result<(), DisplayError> {
        let metrics = self.metrics();
        let columns = metrics.columns_from(x);
        if columns == 0 || y >= metrics.height {
            return Err(DisplayError::InvalidCoordinates);
        }

        let mut line_y = y;
        for line in wrap(text, columns) {
            // Drop lines that would run into the status rule
            if line_y.saturating_add(metrics.line_height) > metrics.height {
                break;
            }
            self.draw_line(x, line_y, line)?;
            line_y = line_y.saturating_add(metrics.line_height);
        }
        Ok(())
    }

    fn log(&mut self, text: &str) -> Result<(), DisplayError> {
        let status_y = self.status_y();
        self.fill(status_y, self.style.status_height)?;

        let columns = self.metrics().columns_from(0);
        let end = text.char_indices().nth(columns).map_or(text.len(), |(i, _)| i);
        self.draw_line(0, status_y, &text[..end])
    }

    fn update(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }

    fn metrics(&self) -> TextMetrics {
        let font = self.style.font;
        TextMetrics {
            char_width: (font.character_size.width + font.character_spacing) as u16,
            line_height: font.character_size.height as u16,
            width: self.width,
            height: self.content_height(),
        }
    }
}
