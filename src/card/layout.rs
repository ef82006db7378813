use euclid::default::{Box2D, Point2D};
use image::{RgbImage, imageops::FilterType};

use crate::card::{CardConfig, CardFields, CardGeometry, Palette};
use crate::error::{FicheError, Result};
use crate::font_system::{FontResolver, FontRole};
use crate::renderer::{
    BUBBLE_GAP, Bubble, BubbleStyle, Canvas, Color, draw_bubble, draw_labeled, measure_bubble,
};
use crate::text::{CardFont, GlyphMetrics};

/// Footer arcs are inscribed in a box reaching this far above the footer line...
const ARC_RISE: i32 = 10;
/// ...and this far below it.
const ARC_DROP: i32 = 30;

/// Where everything ended up on a rendered card.
#[derive(Clone, Debug, PartialEq)]
pub struct CardLayout {
    /// Width shared by the section bubbles.
    pub bubble_width: i32,
    /// One bubble per section, in drawing order.
    pub sections: Vec<Bubble>,
    /// Space reserved for the photo, whether or not one was supplied.
    pub image_region: Box2D<i32>,
    pub photo_pasted: bool,
    /// The wide free-text bubble.
    pub free_text: Bubble,
}

/// A fully drawn card. Immutable once rendered.
pub struct Card {
    canvas: Canvas,
    layout: CardLayout,
}

/// Fonts used on one card.
struct CardFonts {
    title: CardFont,
    label: CardFont,
    body: CardFont,
    badge: CardFont,
}

impl CardFonts {
    fn resolve<R: FontResolver + ?Sized>(fonts: &R, config: &CardConfig) -> Self {
        Self {
            title: fonts.resolve(FontRole::Title, config.title_size as f32),
            label: fonts.resolve(FontRole::Label, config.label_size as f32),
            body: fonts.resolve(FontRole::Body, config.body_size as f32),
            badge: fonts.resolve(FontRole::Badge, config.geometry.badge_font_size as f32),
        }
    }
}

impl Card {
    /// Draws a card from `fields` in a single top-to-bottom pass.
    ///
    /// Out-of-range configuration values are clamped. Missing fonts, empty
    /// fields and text taller than the card degrade the output but never
    /// fail; only an undecodable photo or an unallocatable canvas do.
    pub fn render<R: FontResolver + ?Sized>(
        fields: &CardFields,
        config: &CardConfig,
        fonts: &R,
    ) -> Result<Self> {
        let config = config.clamped();
        let geometry = &config.geometry;
        let palette = config.style.palette();

        // Decode before drawing anything so a bad photo fails fast.
        let photo = fields
            .photo
            .as_deref()
            .map(|bytes| decode_photo(bytes, geometry.image_width, geometry.image_height))
            .transpose()?;

        let fonts = CardFonts::resolve(fonts, &config);
        let mut canvas = Canvas::new(geometry.width, geometry.height, palette.background)?;

        log::debug!(
            "Rendering card {:?} ({}x{}, style {})",
            fields.name,
            geometry.width,
            geometry.height,
            config.style
        );

        draw_title(&mut canvas, &fields.name, &fonts.title, geometry, palette.text);
        draw_badge(&mut canvas, &fields.number, &fonts.badge, geometry);

        let image_region = image_region(geometry);
        let photo_pasted = match &photo {
            Some(photo) => {
                draw_photo(&mut canvas, photo, &image_region, &config, &palette);
                true
            }
            None => false,
        };

        let bubble_width = image_region.min.x - geometry.image_gap - geometry.left_margin;
        let style = BubbleStyle {
            fill: palette.bubble,
            corner_radius: config.corner_radius,
            margin: config.bubble_margin,
            line_spacing: config.line_spacing,
        };

        let mut y = geometry.content_top;
        let mut sections = Vec::with_capacity(7);
        for (section, content) in fields.sections() {
            let origin = Point2D::new(geometry.left_margin, y);
            let below = draw_labeled(
                &mut canvas,
                section.label(),
                content,
                origin,
                bubble_width,
                &fonts.label,
                &fonts.body,
                palette.text,
                palette.text,
                &style,
                config.label_content_gap,
            );
            sections.push(Bubble::new(
                origin,
                bubble_width,
                below - y - BUBBLE_GAP,
            ));
            y = below;
        }

        // The free text never starts beside the photo.
        y = y.max(image_region.max.y + geometry.image_bottom_gap);

        let free_width = geometry.width as i32 - 2 * geometry.outer_margin;
        let free_height = measure_bubble(
            &fields.description,
            &fonts.body,
            free_width,
            config.bubble_margin,
            config.line_spacing,
        );
        let free_y = place_free_text(
            y,
            free_height,
            geometry.height as i32,
            geometry.footer_reserve,
            geometry.placement_factor,
        );
        let free_origin = Point2D::new(geometry.outer_margin, free_y);
        draw_bubble(
            &mut canvas,
            &fields.description,
            free_origin,
            free_width,
            &fonts.body,
            palette.text,
            &style,
        );

        draw_footer(&mut canvas, geometry, palette.accent);

        Ok(Self {
            canvas,
            layout: CardLayout {
                bubble_width,
                sections,
                image_region,
                photo_pasted,
                free_text: Bubble::new(free_origin, free_width, free_height),
            },
        })
    }

    /// The drawn raster.
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Placement of every bubble and the image region.
    pub fn layout(&self) -> &CardLayout {
        &self.layout
    }

    /// Card width in pixels.
    pub fn width(&self) -> u32 {
        self.canvas.width()
    }

    /// Card height in pixels.
    pub fn height(&self) -> u32 {
        self.canvas.height()
    }

    /// Copies the card into an RGB image.
    pub fn to_rgb_image(&self) -> RgbImage {
        self.canvas.to_rgb_image()
    }
}

/// Top edge of the free-text bubble.
///
/// When the bubble fits above the footer reserve it is pushed down by
/// `placement_factor` of the leftover space; otherwise it starts at `cursor`
/// and may run past the bottom of the card.
pub fn place_free_text(
    cursor: i32,
    bubble_height: i32,
    canvas_height: i32,
    footer_reserve: i32,
    placement_factor: f32,
) -> i32 {
    let space = canvas_height - footer_reserve - cursor;
    if bubble_height < space {
        cursor + ((space - bubble_height) as f32 * placement_factor).floor() as i32
    } else {
        log::warn!(
            "Free text needs {bubble_height}px but only {space}px remain; it will overflow the card."
        );
        cursor
    }
}

/// The region reserved for the photo, top-right of the content area.
fn image_region(geometry: &CardGeometry) -> Box2D<i32> {
    let x = geometry.width as i32 - geometry.image_width as i32 - geometry.image_right_inset;
    let y = geometry.content_top;
    Box2D::new(
        Point2D::new(x, y),
        Point2D::new(
            x + geometry.image_width as i32,
            y + geometry.image_height as i32,
        ),
    )
}

/// Decodes the photo and scales it to exactly fill the image region.
fn decode_photo(bytes: &[u8], width: u32, height: u32) -> Result<RgbImage> {
    let decoded = image::load_from_memory(bytes).map_err(FicheError::PhotoDecode)?;
    Ok(image::imageops::resize(
        &decoded.to_rgb8(),
        width,
        height,
        FilterType::Lanczos3,
    ))
}

fn draw_photo(
    canvas: &mut Canvas,
    photo: &RgbImage,
    region: &Box2D<i32>,
    config: &CardConfig,
    palette: &Palette,
) {
    let geometry = &config.geometry;
    let inset = geometry.frame_inset;
    let (x, y) = ((region.min.x - inset) as f32, (region.min.y - inset) as f32);
    let (w, h) = (
        (region.width() + 2 * inset) as f32,
        (region.height() + 2 * inset) as f32,
    );
    let radius = config.corner_radius as f32;

    canvas.fill_rounded_rect(x, y, w, h, radius, palette.background);
    canvas.stroke_rounded_rect(x, y, w, h, radius, palette.accent, geometry.frame_stroke);
    canvas.paste(photo, region.min.x as i64, region.min.y as i64);
}

fn draw_title(
    canvas: &mut Canvas,
    name: &str,
    font: &CardFont,
    geometry: &CardGeometry,
    color: Color,
) {
    let title = name.to_uppercase();
    let x = ((geometry.width as f32 - font.width(&title)) / 2.0).floor();
    canvas.draw_text(x, geometry.title_top as f32, &title, font, color);
}

/// Filled circle with the card number centred on its ink.
fn draw_badge(canvas: &mut Canvas, number: &str, font: &CardFont, geometry: &CardGeometry) {
    let left = geometry.width as i32 - geometry.badge_right_inset;
    let top = geometry.badge_top;
    let (right, bottom) = (left + geometry.badge_diameter, top + geometry.badge_diameter);
    canvas.fill_ellipse(
        left as f32,
        top as f32,
        right as f32,
        bottom as f32,
        geometry.badge_fill,
    );

    let Some(ink) = font.ink_bounds(number) else {
        return;
    };
    let center_x = ((left + right) / 2) as f32;
    let center_y = ((top + bottom) / 2) as f32;
    let x = center_x - ink.width() / 2.0 - ink.left;
    let y = center_y - ink.height() / 2.0 - ink.top;
    canvas.draw_text(x, y, number, font, geometry.badge_text);
}

/// Horizontal rule plus a row of half-ellipse arcs above the bottom edge.
fn draw_footer(canvas: &mut Canvas, geometry: &CardGeometry, accent: Color) {
    let line_y = geometry.height as i32 - geometry.footer_reserve;
    let start = geometry.footer_inset;
    let end = geometry.width as i32 - geometry.footer_inset;

    canvas.draw_line(
        (start as f32, line_y as f32),
        (end as f32, line_y as f32),
        accent,
        geometry.footer_line_stroke,
    );

    let pitch = geometry.arc_pitch.max(1) as usize;
    for x in (start..end).step_by(pitch) {
        canvas.draw_lower_arc(
            x as f32,
            (line_y - ARC_RISE) as f32,
            (x + geometry.arc_pitch) as f32,
            (line_y + ARC_DROP) as f32,
            accent,
            geometry.arc_stroke,
        );
    }
}
