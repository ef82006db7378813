use super::{GlyphMetrics, wrap};

/// A string waiting to be wrapped against a pixel budget.
///
/// Blocks are transient: they borrow the text and font for the duration of a
/// single sizing or drawing call.
#[derive(Clone, Copy, Debug)]
pub struct TextBlock<'a, M: GlyphMetrics + ?Sized> {
    /// The text to wrap. May be empty.
    pub text: &'a str,
    /// Font used for both measuring and drawing.
    pub font: &'a M,
    /// Maximum width of a line in pixels.
    pub max_width: f32,
}

/// Lines of a [`TextBlock`] after greedy wrapping, together with the height
/// each line occupies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WrappedBlock {
    pub lines: Vec<String>,
    pub line_height: i32,
}

impl<'a, M: GlyphMetrics + ?Sized> TextBlock<'a, M> {
    /// Creates a block wrapping `text` against `max_width` pixels.
    pub fn new(text: &'a str, font: &'a M, max_width: f32) -> Self {
        Self {
            text,
            font,
            max_width,
        }
    }

    /// Wraps the text, spacing consecutive lines by the font's line height
    /// plus `spacing` pixels.
    pub fn wrap(&self, spacing: u32) -> WrappedBlock {
        WrappedBlock {
            lines: wrap::wrap(self.text, self.font, self.max_width),
            line_height: self.font.line_height(spacing),
        }
    }
}

impl WrappedBlock {
    /// Vertical space taken by all lines, without any margin.
    pub fn height(&self) -> i32 {
        i32::try_from(self.lines.len())
            .unwrap_or(i32::MAX)
            .saturating_mul(self.line_height)
    }

    /// Number of wrapped lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Whether wrapping produced no lines at all.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Top edge of every line when the block starts at `top`.
    pub fn line_tops(&self, top: i32) -> impl Iterator<Item = (i32, &str)> + '_ {
        self.lines
            .iter()
            .enumerate()
            .map(move |(i, line)| {
                let offset = i32::try_from(i)
                    .unwrap_or(i32::MAX)
                    .saturating_mul(self.line_height);
                (top.saturating_add(offset), line.as_str())
            })
    }
}
