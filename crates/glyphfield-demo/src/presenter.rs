#![forbid(unsafe_code)]

//! Writes dirty [`GlyphBuffer`] rows to the terminal.
//!
//! Only rows touched since the last present are emitted, each as a cursor
//! move followed by its glyphs. Foreground color changes are emitted only
//! when the color actually differs from the previous glyph's.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::queue;
use glyphfield_render::buffer::GlyphBuffer;
use glyphfield_render::color::Rgb;

/// Row-diff presenter over any writer.
#[derive(Debug)]
pub struct Presenter<W: Write> {
    out: W,
    current_fg: Option<Rgb>,
    clear_pending: bool,
    line: String,
}

impl<W: Write> Presenter<W> {
    /// Create a presenter; the first present clears the screen.
    pub fn new(out: W) -> Self {
        Self {
            out,
            current_fg: None,
            clear_pending: true,
            line: String::new(),
        }
    }

    /// Clear the screen before the next present (terminal resized).
    pub fn invalidate(&mut self) {
        self.clear_pending = true;
        self.current_fg = None;
    }

    /// Emit dirty rows, clipped to a `width × height` terminal.
    ///
    /// Returns the number of rows written.
    pub fn present(&mut self, buffer: &mut GlyphBuffer, width: u16, height: u16) -> io::Result<usize> {
        let rows = buffer.take_dirty_rows();
        if rows.is_empty() && !self.clear_pending {
            return Ok(0);
        }
        if self.clear_pending {
            queue!(self.out, Clear(ClearType::All))?;
            self.clear_pending = false;
        }

        let mut written = 0;
        for y in rows.into_iter().filter(|&y| y < height) {
            queue!(self.out, MoveTo(0, y))?;
            for slot in buffer.row(y).iter().take(usize::from(width)) {
                if !slot.is_empty() && self.current_fg != Some(slot.color) {
                    self.flush_line()?;
                    queue!(self.out, SetForegroundColor(to_color(slot.color)))?;
                    self.current_fg = Some(slot.color);
                }
                self.line.push(slot.glyph);
            }
            self.flush_line()?;
            written += 1;
        }
        self.out.flush()?;
        Ok(written)
    }

    /// Consume the presenter, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn flush_line(&mut self) -> io::Result<()> {
        if !self.line.is_empty() {
            queue!(self.out, Print(&self.line))?;
            self.line.clear();
        }
        Ok(())
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphfield_core::geometry::PixelRect;
    use glyphfield_render::surface::Surface;

    const GREEN: Rgb = Rgb::new(0, 255, 0);

    fn render(presenter: &mut Presenter<Vec<u8>>, buffer: &mut GlyphBuffer) -> (usize, String) {
        let rows = presenter.present(buffer, 80, 24).unwrap();
        let out = std::mem::take(&mut presenter.out);
        (rows, String::from_utf8(out).unwrap())
    }

    #[test]
    fn first_present_clears_and_writes_all_rows() {
        let mut buffer = GlyphBuffer::new(3, 2, 1);
        buffer.fill_glyph(PixelRect::new(0, 0, 1, 1), 'A', GREEN);
        let mut presenter = Presenter::new(Vec::new());
        let (rows, out) = render(&mut presenter, &mut buffer);
        assert_eq!(rows, 2);
        assert!(out.contains("\x1b[2J"));
        assert!(out.contains("\x1b[38;2;0;255;0m"));
        assert!(out.contains('A'));
    }

    #[test]
    fn clean_buffer_writes_nothing() {
        let mut buffer = GlyphBuffer::new(3, 2, 1);
        let mut presenter = Presenter::new(Vec::new());
        render(&mut presenter, &mut buffer);
        let (rows, out) = render(&mut presenter, &mut buffer);
        assert_eq!(rows, 0);
        assert!(out.is_empty());
    }

    #[test]
    fn only_dirty_rows_are_written() {
        let mut buffer = GlyphBuffer::new(4, 4, 1);
        let mut presenter = Presenter::new(Vec::new());
        render(&mut presenter, &mut buffer);

        buffer.fill_glyph(PixelRect::new(2, 3, 1, 1), 'Z', GREEN);
        let (rows, out) = render(&mut presenter, &mut buffer);
        assert_eq!(rows, 1);
        // Row 3 → CSI 4;1 H.
        assert!(out.contains("\x1b[4;1H"));
        assert!(!out.contains("\x1b[1;1H"));
    }

    #[test]
    fn repeated_color_is_not_re_emitted() {
        let mut buffer = GlyphBuffer::new(3, 1, 1);
        for x in 0..3 {
            buffer.fill_glyph(PixelRect::new(x, 0, 1, 1), 'x', GREEN);
        }
        let mut presenter = Presenter::new(Vec::new());
        let (_, out) = render(&mut presenter, &mut buffer);
        assert_eq!(out.matches("38;2;0;255;0").count(), 1);
        assert!(out.contains("xxx"));
    }

    #[test]
    fn rows_past_terminal_height_are_skipped() {
        let mut buffer = GlyphBuffer::new(2, 5, 1);
        let mut presenter = Presenter::new(Vec::new());
        let rows = presenter.present(&mut buffer, 2, 3).unwrap();
        assert_eq!(rows, 3);
    }
}
