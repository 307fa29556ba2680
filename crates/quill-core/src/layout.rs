//! Text measurement
//!
//! Editing never needs pixel geometry; rendering does. Hosts plug their own measurement (a DOM
//! span, a font rasterizer) in through [`TextMeasurer`]. [`MonospaceMeasurer`] is a cell-based
//! implementation using UAX #11 widths.

use crate::buffer::FileState;
use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthChar;

/// Default tab width (in cells) used by [`MonospaceMeasurer`].
pub const DEFAULT_TAB_WIDTH: usize = 4;

/// Font used to render the buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSettings {
    /// CSS font family
    pub family: String,
    /// Font size in pixels
    pub size: f32,
}

impl Default for FontSettings {
    fn default() -> Self {
        Self {
            family: "monospace".to_string(),
            size: 14.0,
        }
    }
}

/// Size of a measured text run in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextExtent {
    /// Advance width
    pub width: f32,
    /// Line height
    pub height: f32,
}

/// Maps a text run and font settings to its pixel extent.
pub trait TextMeasurer {
    /// Measure a single-line run of text.
    fn measure(&self, text: &str, font: &FontSettings) -> TextExtent;
}

impl<F> TextMeasurer for F
where
    F: Fn(&str, &FontSettings) -> TextExtent,
{
    fn measure(&self, text: &str, font: &FontSettings) -> TextExtent {
        self(text, font)
    }
}

/// Cells a character occupies in the monospace grid: 2 for East Asian wide glyphs, 0 for
/// combining marks. Control characters, which have no defined width, count as one cell.
pub fn char_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(1)
}

/// Cells taken by `ch` when it starts at cell `column`. A tab fills up to the next multiple of
/// `tab_width` (treated as at least 1).
pub fn cell_width_at(ch: char, column: usize, tab_width: usize) -> usize {
    match ch {
        '\t' => {
            let stop = tab_width.max(1);
            stop - column % stop
        }
        _ => char_width(ch),
    }
}

/// Total visual width of a string, interpreting `'\t'` using `tab_width`.
pub fn str_width_with_tab_width(s: &str, tab_width: usize) -> usize {
    s.chars()
        .fold(0usize, |x, ch| x.saturating_add(cell_width_at(ch, x, tab_width)))
}

/// Fixed-advance measurement: every cell is `advance_ratio * size` wide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasurer {
    /// Cell width as a fraction of the font size
    pub advance_ratio: f32,
    /// Line height as a fraction of the font size
    pub line_height_ratio: f32,
    /// Tab stop distance in cells
    pub tab_width: usize,
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self {
            advance_ratio: 0.6,
            line_height_ratio: 1.2,
            tab_width: DEFAULT_TAB_WIDTH,
        }
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure(&self, text: &str, font: &FontSettings) -> TextExtent {
        let cells = str_width_with_tab_width(text, self.tab_width);
        TextExtent {
            width: cells as f32 * self.advance_ratio * font.size,
            height: self.line_height_ratio * font.size,
        }
    }
}

impl FileState {
    /// Pixel origin `(x, y)` of a cursor's caret, or `None` if `idx` is out of range.
    pub fn caret_point(
        &self,
        idx: usize,
        measurer: &impl TextMeasurer,
        font: &FontSettings,
    ) -> Option<(f32, f32)> {
        let cursor = self.cursors().get(idx)?;
        let position = self.line_column_of(cursor.pos());
        let line = self.line(position.line)?;
        let prefix: String = line.chars().take(position.column).collect();
        let extent = measurer.measure(&prefix, font);
        Some((extent.width, position.line as f32 * extent.height))
    }
}
