use std::sync::Arc;

/// Coverage bitmap of a single rasterized glyph.
///
/// `xmin` is measured from the pen position, `ymin` from the baseline with
/// the Y axis pointing up, matching `fontdue::Metrics`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphBitmap {
    pub xmin: i32,
    pub ymin: i32,
    pub width: usize,
    pub height: usize,
    pub coverage: Vec<u8>,
}

impl GlyphBitmap {
    /// Bitmap without ink, used for whitespace.
    pub fn empty() -> Self {
        Self {
            xmin: 0,
            ymin: 0,
            width: 0,
            height: 0,
            coverage: Vec::new(),
        }
    }

    /// Whether the bitmap covers no pixel.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Tight box around the ink of a string, relative to the top of its line.
///
/// **Y-axis goes down**
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InkBounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl InkBounds {
    /// Horizontal ink extent.
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Vertical ink extent.
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

/// Measurement abstraction over a sized font.
///
/// Widths are plain sums of advance widths, without kerning: the width of a
/// concatenation equals the sum of the widths of its parts, and glyphs are
/// drawn at exactly their measured pen positions.
pub trait GlyphMetrics {
    /// Horizontal advance of a single character in pixels.
    fn advance(&self, ch: char) -> f32;

    /// Distance from the top of a line to the baseline, in whole pixels.
    fn ascent(&self) -> u32;

    /// Distance from the baseline to the bottom of a line, in whole pixels.
    fn descent(&self) -> u32;

    /// Rasterizes a single character.
    fn rasterize(&self, ch: char) -> GlyphBitmap;

    /// Pixel width of `text`.
    fn width(&self, text: &str) -> f32 {
        text.chars().map(|ch| self.advance(ch)).sum()
    }

    /// Height of one wrapped line: ascent + descent + `spacing`.
    fn line_height(&self, spacing: u32) -> i32 {
        (self.ascent() + self.descent() + spacing) as i32
    }

    /// Ink box of `text` laid out from pen position zero, or `None` when
    /// nothing in it leaves a mark.
    fn ink_bounds(&self, text: &str) -> Option<InkBounds> {
        let baseline = self.ascent() as f32;
        let mut pen_x = 0.0;
        let mut bounds: Option<InkBounds> = None;

        for ch in text.chars() {
            let glyph = self.rasterize(ch);
            if !glyph.is_empty() {
                let left = pen_x + glyph.xmin as f32;
                let top = baseline - (glyph.ymin as f32 + glyph.height as f32);
                let right = left + glyph.width as f32;
                let bottom = top + glyph.height as f32;
                bounds = Some(match bounds {
                    Some(b) => InkBounds {
                        left: b.left.min(left),
                        top: b.top.min(top),
                        right: b.right.max(right),
                        bottom: b.bottom.max(bottom),
                    },
                    None => InkBounds {
                        left,
                        top,
                        right,
                        bottom,
                    },
                });
            }
            pen_x += self.advance(ch);
        }

        bounds
    }
}

/// A parsed outline font bound to a pixel size.
#[derive(Clone)]
pub struct SizedFont {
    font: Arc<fontdue::Font>,
    size: f32,
    ascent: u32,
    descent: u32,
}

impl SizedFont {
    /// Binds `font` to `size`.
    ///
    /// Returns `None` when the face carries no horizontal line metrics.
    pub fn new(font: Arc<fontdue::Font>, size: f32) -> Option<Self> {
        let line_metrics = font.horizontal_line_metrics(size)?;
        Some(Self {
            font,
            size,
            ascent: line_metrics.ascent.max(0.0).ceil() as u32,
            // fontdue reports descent as a negative offset from the baseline.
            descent: (-line_metrics.descent).max(0.0).ceil() as u32,
        })
    }

    /// Pixel size the font is bound to.
    pub fn size(&self) -> f32 {
        self.size
    }
}

impl std::fmt::Debug for SizedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SizedFont")
            .field("name", &self.font.name())
            .field("size", &self.size)
            .field("ascent", &self.ascent)
            .field("descent", &self.descent)
            .finish()
    }
}

impl GlyphMetrics for SizedFont {
    fn advance(&self, ch: char) -> f32 {
        self.font.metrics(ch, self.size).advance_width
    }

    fn ascent(&self) -> u32 {
        self.ascent
    }

    fn descent(&self) -> u32 {
        self.descent
    }

    fn rasterize(&self, ch: char) -> GlyphBitmap {
        let (metrics, coverage) = self.font.rasterize(ch, self.size);
        GlyphBitmap {
            xmin: metrics.xmin,
            ymin: metrics.ymin,
            width: metrics.width,
            height: metrics.height,
            coverage,
        }
    }
}

/// Built-in stand-in used when no outline font can be resolved.
///
/// Every character advances by half the font size and renders as a hollow
/// box, so text stays measurable and visibly placed even without font files.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FallbackFont {
    size: f32,
}

impl FallbackFont {
    /// Fallback font at `size` pixels, at least 1.
    pub fn new(size: f32) -> Self {
        Self {
            size: size.max(1.0),
        }
    }

    /// Nominal pixel size.
    pub fn size(&self) -> f32 {
        self.size
    }
}

impl GlyphMetrics for FallbackFont {
    fn advance(&self, _ch: char) -> f32 {
        self.size * 0.5
    }

    fn ascent(&self) -> u32 {
        (self.size * 0.8).ceil() as u32
    }

    fn descent(&self) -> u32 {
        (self.size * 0.2).ceil() as u32
    }

    fn rasterize(&self, ch: char) -> GlyphBitmap {
        if ch.is_whitespace() || ch.is_control() {
            return GlyphBitmap::empty();
        }

        let width = ((self.advance(ch) - 2.0).floor() as usize).max(1);
        let height = ((self.ascent() as f32 * 0.75).floor() as usize).max(1);
        let mut coverage = vec![0u8; width * height];
        for row in 0..height {
            for col in 0..width {
                if row == 0 || row + 1 == height || col == 0 || col + 1 == width {
                    coverage[row * width + col] = 255;
                }
            }
        }

        GlyphBitmap {
            xmin: 1,
            ymin: 0,
            width,
            height,
            coverage,
        }
    }
}

/// Font handle handed to the layout code: an outline font when one could be
/// resolved, the built-in fallback otherwise.
#[derive(Clone, Debug)]
pub enum CardFont {
    Outline(SizedFont),
    Fallback(FallbackFont),
}

impl CardFont {
    /// Whether this is the built-in fallback.
    pub fn is_fallback(&self) -> bool {
        matches!(self, CardFont::Fallback(_))
    }
}

impl GlyphMetrics for CardFont {
    fn advance(&self, ch: char) -> f32 {
        match self {
            CardFont::Outline(font) => font.advance(ch),
            CardFont::Fallback(font) => font.advance(ch),
        }
    }

    fn ascent(&self) -> u32 {
        match self {
            CardFont::Outline(font) => font.ascent(),
            CardFont::Fallback(font) => font.ascent(),
        }
    }

    fn descent(&self) -> u32 {
        match self {
            CardFont::Outline(font) => font.descent(),
            CardFont::Fallback(font) => font.descent(),
        }
    }

    fn rasterize(&self, ch: char) -> GlyphBitmap {
        match self {
            CardFont::Outline(font) => font.rasterize(ch),
            CardFont::Fallback(font) => font.rasterize(ch),
        }
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_width_is_sum_of_advances() {
        let font = FallbackFont::new(20.0);
        assert_eq!(font.advance('W'), 10.0);
        assert_eq!(font.width("Rougegorge"), 100.0);
        assert_eq!(font.width(""), 0.0);
        assert_eq!(
            font.width("ab cd"),
            font.width("ab") + font.width(" ") + font.width("cd")
        );
    }

    #[test]
    fn test_line_height_includes_spacing() {
        let font = FallbackFont::new(20.0);
        assert_eq!(font.ascent(), 16);
        assert_eq!(font.descent(), 4);
        assert_eq!(font.line_height(0), 20);
        assert_eq!(font.line_height(5), 25);
    }

    #[test]
    fn test_fallback_space_has_no_ink() {
        let font = FallbackFont::new(20.0);
        assert!(font.rasterize(' ').is_empty());
        assert!(font.ink_bounds("   ").is_none());

        let glyph = font.rasterize('a');
        assert_eq!(glyph.width, 8);
        assert_eq!(glyph.height, 12);
        assert_eq!(glyph.coverage.len(), 96);
        // hollow box: border set, centre clear
        assert_eq!(glyph.coverage[0], 255);
        assert_eq!(glyph.coverage[glyph.width + 1], 0);
    }

    #[test]
    fn test_ink_bounds_spans_all_glyphs() {
        let font = FallbackFont::new(20.0);
        let bounds = font.ink_bounds("12").unwrap();
        assert_eq!(bounds.left, 1.0);
        assert_eq!(bounds.right, 10.0 + 1.0 + 8.0);
        assert_eq!(bounds.bottom, 16.0);
        assert_eq!(bounds.top, 4.0);
        assert_eq!(bounds.height(), 12.0);
    }

    #[test]
    fn test_card_font_forwards_to_fallback() {
        let font = CardFont::Fallback(FallbackFont::new(18.0));
        assert!(font.is_fallback());
        assert_eq!(font.advance('x'), 9.0);
        assert_eq!(font.line_height(5), FallbackFont::new(18.0).line_height(5));
    }

    #[test]
    fn test_fallback_clamps_tiny_sizes() {
        let font = FallbackFont::new(0.0);
        assert_eq!(font.size(), 1.0);
        let glyph = font.rasterize('x');
        assert_eq!(glyph.width, 1);
        assert_eq!(glyph.height, 1);
    }
}
