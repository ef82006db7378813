use image::{Rgb, RgbImage};
use tiny_skia::{
    FillRule, Paint, Path, PathBuilder, Pixmap, PremultipliedColorU8, Rect, Stroke, Transform,
};

use crate::error::{FicheError, Result};
use crate::text::GlyphMetrics;

/// Bezier handle length for a quarter circle.
const KAPPA: f32 = 0.552_284_8;

/// Opaque RGB color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    /// Color from its red, green and blue channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    fn paint(&self) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color_rgba8(self.r, self.g, self.b, 255);
        paint.anti_alias = true;
        paint
    }
}

/// Opaque raster surface the card is drawn on.
///
/// Shapes are filled and stroked by `tiny-skia`; glyph coverage is blended in
/// directly. **Y-axis goes down**, origin at the top-left corner.
pub struct Canvas {
    pixmap: Pixmap,
}

impl Canvas {
    /// Allocates a canvas filled with `background`.
    pub fn new(width: u32, height: u32, background: Color) -> Result<Self> {
        let mut pixmap =
            Pixmap::new(width, height).ok_or(FicheError::CanvasAllocation { width, height })?;
        pixmap.fill(tiny_skia::Color::from_rgba8(
            background.r,
            background.g,
            background.b,
            255,
        ));
        Ok(Self { pixmap })
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Color at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        // Pixmap::pixel only bounds-checks the flat index, so a column past
        // the right edge would wrap onto the next row.
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let px = self.pixmap.pixel(x, y)?.demultiply();
        Some(Color::rgb(px.red(), px.green(), px.blue()))
    }

    /// Copies the canvas into an RGB image.
    pub fn to_rgb_image(&self) -> RgbImage {
        let width = self.width();
        let pixels = self.pixmap.pixels();
        RgbImage::from_fn(width, self.height(), |x, y| {
            let px = pixels[(y * width + x) as usize].demultiply();
            Rgb([px.red(), px.green(), px.blue()])
        })
    }
}

/// Shapes
impl Canvas {
    /// Fills a rectangle with rounded corners.
    ///
    /// The radius is clamped to half the shorter side. Degenerate rectangles
    /// draw nothing.
    pub fn fill_rounded_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        radius: f32,
        color: Color,
    ) {
        if let Some(path) = rounded_rect_path(x, y, width, height, radius) {
            self.fill(&path, color);
        }
    }

    /// Outlines a rectangle with rounded corners.
    pub fn stroke_rounded_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        radius: f32,
        color: Color,
        stroke_width: f32,
    ) {
        if let Some(path) = rounded_rect_path(x, y, width, height, radius) {
            self.stroke(&path, color, stroke_width);
        }
    }

    /// Fills the ellipse inscribed in the given box.
    pub fn fill_ellipse(&mut self, left: f32, top: f32, right: f32, bottom: f32, color: Color) {
        let Some(path) =
            Rect::from_ltrb(left, top, right, bottom).and_then(PathBuilder::from_oval)
        else {
            return;
        };
        self.fill(&path, color);
    }

    /// Draws a straight line.
    pub fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), color: Color, stroke_width: f32) {
        let mut pb = PathBuilder::new();
        pb.move_to(from.0, from.1);
        pb.line_to(to.0, to.1);
        if let Some(path) = pb.finish() {
            self.stroke(&path, color, stroke_width);
        }
    }

    /// Strokes the lower half of the ellipse inscribed in the given box,
    /// running from its right-most point through its bottom to its left-most
    /// point.
    pub fn draw_lower_arc(
        &mut self,
        left: f32,
        top: f32,
        right: f32,
        bottom: f32,
        color: Color,
        stroke_width: f32,
    ) {
        let cx = (left + right) / 2.0;
        let cy = (top + bottom) / 2.0;
        let rx = (right - left) / 2.0;
        let ry = (bottom - top) / 2.0;

        let mut pb = PathBuilder::new();
        pb.move_to(cx + rx, cy);
        pb.cubic_to(cx + rx, cy + ry * KAPPA, cx + rx * KAPPA, cy + ry, cx, cy + ry);
        pb.cubic_to(cx - rx * KAPPA, cy + ry, cx - rx, cy + ry * KAPPA, cx - rx, cy);
        if let Some(path) = pb.finish() {
            self.stroke(&path, color, stroke_width);
        }
    }

    fn fill(&mut self, path: &Path, color: Color) {
        self.pixmap.fill_path(
            path,
            &color.paint(),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }

    fn stroke(&mut self, path: &Path, color: Color, stroke_width: f32) {
        let stroke = Stroke {
            width: stroke_width,
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(path, &color.paint(), &stroke, Transform::identity(), None);
    }
}

/// Text and images
impl Canvas {
    /// Draws a single line of text whose line box starts at `(x, top)`.
    ///
    /// Glyphs are placed at the same pen positions [`GlyphMetrics::width`]
    /// measures, with the baseline `ascent` pixels below `top`.
    pub fn draw_text<M: GlyphMetrics + ?Sized>(
        &mut self,
        x: f32,
        top: f32,
        text: &str,
        font: &M,
        color: Color,
    ) {
        let baseline = top + font.ascent() as f32;
        let mut pen_x = x;

        for ch in text.chars() {
            let glyph = font.rasterize(ch);
            if !glyph.is_empty() {
                let origin_x = (pen_x + glyph.xmin as f32).floor() as i64;
                let origin_y =
                    (baseline - (glyph.ymin as f32 + glyph.height as f32)).floor() as i64;
                self.blend_coverage(origin_x, origin_y, glyph.width, &glyph.coverage, color);
            }
            pen_x += font.advance(ch);
        }
    }

    /// Copies `image` with its top-left corner at `(x, y)`, clipping at the
    /// canvas edges.
    pub fn paste(&mut self, image: &RgbImage, x: i64, y: i64) {
        let width = self.width() as i64;
        let height = self.height() as i64;
        let pixels = self.pixmap.pixels_mut();

        for (col, row, px) in image.enumerate_pixels() {
            let tx = x + col as i64;
            let ty = y + row as i64;
            if tx < 0 || ty < 0 || tx >= width || ty >= height {
                continue;
            }
            if let Some(color) = PremultipliedColorU8::from_rgba(px.0[0], px.0[1], px.0[2], 255) {
                pixels[(ty * width + tx) as usize] = color;
            }
        }
    }

    /// Blends a row-major coverage bitmap of the given width in `color`.
    fn blend_coverage(
        &mut self,
        origin_x: i64,
        origin_y: i64,
        glyph_width: usize,
        coverage: &[u8],
        color: Color,
    ) {
        if glyph_width == 0 {
            return;
        }

        let width = self.width() as i64;
        let height = self.height() as i64;
        let pixels = self.pixmap.pixels_mut();

        for (row, line) in coverage.chunks(glyph_width).enumerate() {
            let iy = origin_y + row as i64;
            if iy < 0 || iy >= height {
                continue;
            }
            for (col, &alpha) in line.iter().enumerate() {
                if alpha == 0 {
                    continue;
                }
                let ix = origin_x + col as i64;
                if ix < 0 || ix >= width {
                    continue;
                }

                let idx = (iy * width + ix) as usize;
                let dst = pixels[idx].demultiply();
                let mix = |src: u8, dst: u8| -> u8 {
                    let a = alpha as u32;
                    ((src as u32 * a + dst as u32 * (255 - a) + 127) / 255) as u8
                };
                if let Some(blended) = PremultipliedColorU8::from_rgba(
                    mix(color.r, dst.red()),
                    mix(color.g, dst.green()),
                    mix(color.b, dst.blue()),
                    255,
                ) {
                    pixels[idx] = blended;
                }
            }
        }
    }
}

/// Builds a rounded-rectangle outline, or `None` for an empty rectangle.
fn rounded_rect_path(x: f32, y: f32, width: f32, height: f32, radius: f32) -> Option<Path> {
    if width <= 0.0 || height <= 0.0 {
        return None;
    }

    let r = radius.min(width / 2.0).min(height / 2.0).max(0.0);
    if r == 0.0 {
        return Some(PathBuilder::from_rect(Rect::from_xywh(x, y, width, height)?));
    }

    let k = r * KAPPA;
    let (right, bottom) = (x + width, y + height);

    let mut pb = PathBuilder::new();
    pb.move_to(x + r, y);
    pb.line_to(right - r, y);
    pb.cubic_to(right - r + k, y, right, y + r - k, right, y + r);
    pb.line_to(right, bottom - r);
    pb.cubic_to(right, bottom - r + k, right - r + k, bottom, right - r, bottom);
    pb.line_to(x + r, bottom);
    pb.cubic_to(x + r - k, bottom, x, bottom - r + k, x, bottom - r);
    pb.line_to(x, y + r);
    pb.cubic_to(x, y + r - k, x + r - k, y, x + r, y);
    pb.close();
    pb.finish()
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::FallbackFont;

    const BG: Color = Color::rgb(250, 245, 235);
    const INK: Color = Color::rgb(50, 50, 50);

    #[test]
    fn test_new_canvas_is_filled() {
        let canvas = Canvas::new(40, 30, BG).unwrap();
        assert_eq!(canvas.width(), 40);
        assert_eq!(canvas.height(), 30);
        assert_eq!(canvas.pixel(0, 0), Some(BG));
        assert_eq!(canvas.pixel(39, 29), Some(BG));
        assert_eq!(canvas.pixel(40, 0), None);
    }

    #[test]
    fn test_pixel_past_right_edge_does_not_wrap() {
        let mut canvas = Canvas::new(40, 30, BG).unwrap();
        canvas.fill_rounded_rect(0.0, 1.0, 10.0, 1.0, 0.0, INK);
        assert_eq!(canvas.pixel(0, 1), Some(INK));
        for x in [40, 41, 79, u32::MAX] {
            assert_eq!(canvas.pixel(x, 0), None, "x = {x}");
        }
        assert_eq!(canvas.pixel(0, 30), None);
        assert_eq!(canvas.pixel(39, 0), Some(BG));
    }

    #[test]
    fn test_zero_sized_canvas_is_an_error() {
        assert!(matches!(
            Canvas::new(0, 10, BG),
            Err(FicheError::CanvasAllocation { width: 0, height: 10 })
        ));
    }

    #[test]
    fn test_rounded_rect_leaves_corners_untouched() {
        let fill = Color::rgb(210, 230, 200);
        let mut canvas = Canvas::new(100, 100, BG).unwrap();
        canvas.fill_rounded_rect(10.0, 10.0, 80.0, 60.0, 20.0, fill);

        assert_eq!(canvas.pixel(50, 40), Some(fill));
        assert_eq!(canvas.pixel(50, 12), Some(fill));
        assert_eq!(canvas.pixel(11, 11), Some(BG));
        assert_eq!(canvas.pixel(50, 80), Some(BG));
    }

    #[test]
    fn test_square_rect_with_zero_radius() {
        let fill = Color::rgb(255, 170, 80);
        let mut canvas = Canvas::new(50, 50, BG).unwrap();
        canvas.fill_rounded_rect(10.0, 10.0, 20.0, 20.0, 0.0, fill);
        assert_eq!(canvas.pixel(11, 11), Some(fill));
        assert_eq!(canvas.pixel(35, 35), Some(BG));
    }

    #[test]
    fn test_draw_text_inks_inside_line_box() {
        let font = FallbackFont::new(20.0);
        let mut canvas = Canvas::new(100, 40, BG).unwrap();
        canvas.draw_text(10.0, 5.0, "ab", &font, INK);

        // first glyph box: x 11..19, y 9..21 (baseline at 21)
        assert_eq!(canvas.pixel(11, 9), Some(INK));
        assert_eq!(canvas.pixel(18, 20), Some(INK));
        assert_eq!(canvas.pixel(14, 14), Some(BG));
        // second glyph starts one advance later
        assert_eq!(canvas.pixel(21, 9), Some(INK));
        assert_eq!(canvas.pixel(10, 9), Some(BG));
    }

    #[test]
    fn test_text_outside_canvas_is_clipped() {
        let font = FallbackFont::new(20.0);
        let mut canvas = Canvas::new(20, 20, BG).unwrap();
        canvas.draw_text(-5.0, -10.0, "xyz", &font, INK);
        canvas.draw_text(15.0, 15.0, "xyz", &font, INK);
        assert_eq!(canvas.pixel(19, 0), Some(BG));
    }

    #[test]
    fn test_paste_copies_and_clips() {
        let mut canvas = Canvas::new(10, 10, BG).unwrap();
        let image = RgbImage::from_pixel(4, 4, Rgb([1, 2, 3]));
        canvas.paste(&image, 8, -2);

        assert_eq!(canvas.pixel(8, 0), Some(Color::rgb(1, 2, 3)));
        assert_eq!(canvas.pixel(9, 1), Some(Color::rgb(1, 2, 3)));
        assert_eq!(canvas.pixel(9, 2), Some(BG));
        assert_eq!(canvas.pixel(7, 0), Some(BG));
    }

    #[test]
    fn test_line_and_arc_touch_expected_pixels() {
        let accent = Color::rgb(195, 215, 180);
        let mut canvas = Canvas::new(100, 60, BG).unwrap();
        canvas.draw_line((10.0, 20.0), (90.0, 20.0), accent, 3.0);
        canvas.draw_lower_arc(20.0, 10.0, 50.0, 50.0, accent, 2.0);

        assert_eq!(canvas.pixel(60, 20), Some(accent));
        // bottom of the arc: centre x 35, y 30 + 20
        assert_ne!(canvas.pixel(35, 49), Some(BG));
        // upper half stays clear
        assert_eq!(canvas.pixel(35, 11), Some(BG));
    }

    #[test]
    fn test_to_rgb_image_matches_pixels() {
        let mut canvas = Canvas::new(8, 8, BG).unwrap();
        canvas.fill_ellipse(0.0, 0.0, 8.0, 8.0, INK);
        let image = canvas.to_rgb_image();
        assert_eq!(image.dimensions(), (8, 8));
        assert_eq!(image.get_pixel(4, 4), &Rgb([50, 50, 50]));
        assert_eq!(image.get_pixel(0, 0), &Rgb([250, 245, 235]));
    }
}
