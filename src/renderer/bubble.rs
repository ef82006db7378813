use euclid::default::{Box2D, Point2D};

use crate::renderer::{Canvas, Color};
use crate::text::{GlyphMetrics, TextBlock, WrappedBlock};

/// Vertical space left below every bubble.
pub const BUBBLE_GAP: i32 = 10;

/// Appearance shared by every bubble on a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BubbleStyle {
    pub fill: Color,
    pub corner_radius: u32,
    /// Padding between the bubble edge and its text, on every side.
    pub margin: u32,
    /// Extra pixels added to each line's ascent + descent.
    pub line_spacing: u32,
}

/// Placed bubble rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bubble {
    pub rect: Box2D<i32>,
}

impl Bubble {
    /// Bubble whose top-left corner is `origin`.
    pub fn new(origin: Point2D<i32>, width: i32, height: i32) -> Self {
        Self {
            rect: Box2D::new(
                origin,
                Point2D::new(origin.x.saturating_add(width), origin.y.saturating_add(height)),
            ),
        }
    }

    /// Top-left corner.
    pub fn origin(&self) -> Point2D<i32> {
        self.rect.min
    }

    /// Width in pixels.
    pub fn width(&self) -> i32 {
        self.rect.width()
    }

    /// Height in pixels, margins included.
    pub fn height(&self) -> i32 {
        self.rect.height()
    }

    /// First free row below the bubble, gap included.
    pub fn below(&self) -> i32 {
        self.rect.max.y.saturating_add(BUBBLE_GAP)
    }
}

/// Margin on both sides of a bubble, saturating at `i32::MAX`.
fn padding(margin: u32) -> i32 {
    i32::try_from(margin).unwrap_or(i32::MAX).saturating_mul(2)
}

/// Width available to text inside a bubble.
fn text_width(bubble_width: i32, margin: u32) -> f32 {
    bubble_width.saturating_sub(padding(margin)) as f32
}

/// Wrapped label and content of a two-block bubble.
struct LabeledBlocks {
    label: WrappedBlock,
    content: WrappedBlock,
    gap: i32,
}

impl LabeledBlocks {
    fn new<L, C>(
        label: &str,
        content: &str,
        bubble_width: i32,
        label_font: &L,
        content_font: &C,
        margin: u32,
        line_spacing: u32,
        label_content_gap: u32,
    ) -> Self
    where
        L: GlyphMetrics + ?Sized,
        C: GlyphMetrics + ?Sized,
    {
        let max_width = text_width(bubble_width, margin);
        Self {
            label: TextBlock::new(label, label_font, max_width).wrap(line_spacing),
            content: TextBlock::new(content, content_font, max_width).wrap(line_spacing),
            gap: i32::try_from(label_content_gap).unwrap_or(i32::MAX),
        }
    }

    fn content_height(&self) -> i32 {
        self.label
            .height()
            .saturating_add(self.gap)
            .saturating_add(self.content.height())
    }
}

/// Height of a single-block bubble, computed without drawing.
///
/// `margin + lines × line height + margin`, wrapping against
/// `bubble_width − 2 × margin`.
pub fn measure_bubble<M: GlyphMetrics + ?Sized>(
    text: &str,
    font: &M,
    bubble_width: i32,
    margin: u32,
    line_spacing: u32,
) -> i32 {
    let block = TextBlock::new(text, font, text_width(bubble_width, margin)).wrap(line_spacing);
    padding(margin).saturating_add(block.height())
}

/// Draws a single-block bubble with its top-left corner at `origin`.
///
/// Returns the row just below the bubble plus [`BUBBLE_GAP`].
pub fn draw_bubble<M: GlyphMetrics + ?Sized>(
    canvas: &mut Canvas,
    text: &str,
    origin: Point2D<i32>,
    bubble_width: i32,
    font: &M,
    text_color: Color,
    style: &BubbleStyle,
) -> i32 {
    let margin = i32::try_from(style.margin).unwrap_or(i32::MAX);
    let block =
        TextBlock::new(text, font, text_width(bubble_width, style.margin)).wrap(style.line_spacing);
    let height = padding(style.margin).saturating_add(block.height());
    let bubble = Bubble::new(origin, bubble_width, height);

    fill_bubble(canvas, &bubble, style);
    let (text_x, text_top) = (origin.x.saturating_add(margin), origin.y.saturating_add(margin));
    draw_block(canvas, &block, text_x, text_top, font, text_color);

    bubble.below()
}

/// Height of a label + content bubble, computed without drawing.
pub fn measure_labeled<L, C>(
    label: &str,
    content: &str,
    bubble_width: i32,
    label_font: &L,
    content_font: &C,
    margin: u32,
    label_content_gap: u32,
    line_spacing: u32,
) -> i32
where
    L: GlyphMetrics + ?Sized,
    C: GlyphMetrics + ?Sized,
{
    let blocks = LabeledBlocks::new(
        label,
        content,
        bubble_width,
        label_font,
        content_font,
        margin,
        line_spacing,
        label_content_gap,
    );
    padding(margin).saturating_add(blocks.content_height())
}

/// Draws a bubble holding a label block followed by a content block.
///
/// Both blocks wrap against the same width. The content starts
/// `label_content_gap` pixels below the last label line, even when either
/// block is empty. Returns the row just below the bubble plus
/// [`BUBBLE_GAP`].
pub fn draw_labeled<L, C>(
    canvas: &mut Canvas,
    label: &str,
    content: &str,
    origin: Point2D<i32>,
    bubble_width: i32,
    label_font: &L,
    content_font: &C,
    label_color: Color,
    content_color: Color,
    style: &BubbleStyle,
    label_content_gap: u32,
) -> i32
where
    L: GlyphMetrics + ?Sized,
    C: GlyphMetrics + ?Sized,
{
    let margin = i32::try_from(style.margin).unwrap_or(i32::MAX);
    let blocks = LabeledBlocks::new(
        label,
        content,
        bubble_width,
        label_font,
        content_font,
        style.margin,
        style.line_spacing,
        label_content_gap,
    );
    let bubble = Bubble::new(
        origin,
        bubble_width,
        padding(style.margin).saturating_add(blocks.content_height()),
    );

    fill_bubble(canvas, &bubble, style);

    let text_x = origin.x.saturating_add(margin);
    let label_top = origin.y.saturating_add(margin);
    let content_top = label_top
        .saturating_add(blocks.label.height())
        .saturating_add(blocks.gap);
    draw_block(canvas, &blocks.label, text_x, label_top, label_font, label_color);
    draw_block(canvas, &blocks.content, text_x, content_top, content_font, content_color);

    bubble.below()
}

fn fill_bubble(canvas: &mut Canvas, bubble: &Bubble, style: &BubbleStyle) {
    let origin = bubble.origin();
    canvas.fill_rounded_rect(
        origin.x as f32,
        origin.y as f32,
        bubble.width() as f32,
        bubble.height() as f32,
        style.corner_radius as f32,
        style.fill,
    );
}

fn draw_block<M: GlyphMetrics + ?Sized>(
    canvas: &mut Canvas,
    block: &WrappedBlock,
    x: i32,
    top: i32,
    font: &M,
    color: Color,
) {
    for (line_top, line) in block.line_tops(top) {
        canvas.draw_text(x as f32, line_top as f32, line, font, color);
    }
}
