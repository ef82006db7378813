use std::ops::RangeInclusive;

use crate::card::Style;
use crate::error::{FicheError, Result};
use crate::renderer::Color;

/// Font sizes, spacing and bubble knobs chosen by the user.
///
/// Every knob has a documented range. [`CardConfig::validate`] reports the
/// first knob outside its range; rendering clamps instead, so a bad value
/// never aborts a render.
#[derive(Clone, Debug, PartialEq)]
pub struct CardConfig {
    pub style: Style,
    /// Title size in pixels, 30..=80.
    pub title_size: u32,
    /// Section label size in pixels, 16..=36.
    pub label_size: u32,
    /// Body text size in pixels, 14..=30.
    pub body_size: u32,
    /// Extra pixels between lines, 0..=20.
    pub line_spacing: u32,
    /// Bubble corner radius, 0..=50.
    pub corner_radius: u32,
    /// Bubble padding, 5..=30.
    pub bubble_margin: u32,
    /// Space between a section label and its content, 5..=50.
    pub label_content_gap: u32,
    pub geometry: CardGeometry,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            style: Style::default(),
            title_size: 56,
            label_size: 22,
            body_size: 18,
            line_spacing: 5,
            corner_radius: 20,
            bubble_margin: 10,
            label_content_gap: 10,
            geometry: CardGeometry::default(),
        }
    }
}

pub const TITLE_SIZE_RANGE: RangeInclusive<u32> = 30..=80;
pub const LABEL_SIZE_RANGE: RangeInclusive<u32> = 16..=36;
pub const BODY_SIZE_RANGE: RangeInclusive<u32> = 14..=30;
pub const LINE_SPACING_RANGE: RangeInclusive<u32> = 0..=20;
pub const CORNER_RADIUS_RANGE: RangeInclusive<u32> = 0..=50;
pub const BUBBLE_MARGIN_RANGE: RangeInclusive<u32> = 5..=30;
pub const LABEL_CONTENT_GAP_RANGE: RangeInclusive<u32> = 5..=50;

impl CardConfig {
    /// Knobs with their names and ranges, in declaration order.
    fn knobs(&self) -> [(&'static str, u32, RangeInclusive<u32>); 7] {
        [
            ("title_size", self.title_size, TITLE_SIZE_RANGE),
            ("label_size", self.label_size, LABEL_SIZE_RANGE),
            ("body_size", self.body_size, BODY_SIZE_RANGE),
            ("line_spacing", self.line_spacing, LINE_SPACING_RANGE),
            ("corner_radius", self.corner_radius, CORNER_RADIUS_RANGE),
            ("bubble_margin", self.bubble_margin, BUBBLE_MARGIN_RANGE),
            ("label_content_gap", self.label_content_gap, LABEL_CONTENT_GAP_RANGE),
        ]
    }

    /// Checks every knob against its range.
    pub fn validate(&self) -> Result<()> {
        for (field, value, range) in self.knobs() {
            if !range.contains(&value) {
                return Err(FicheError::OutOfRange {
                    field,
                    value,
                    min: *range.start(),
                    max: *range.end(),
                });
            }
        }
        Ok(())
    }

    /// Copy of this configuration with every knob clamped into range.
    pub fn clamped(&self) -> Self {
        let clamp = |field: &str, value: u32, range: RangeInclusive<u32>| {
            let clamped = value.clamp(*range.start(), *range.end());
            if clamped != value {
                log::warn!("{field} = {value} is out of range; using {clamped}.");
            }
            clamped
        };

        Self {
            style: self.style,
            title_size: clamp("title_size", self.title_size, TITLE_SIZE_RANGE),
            label_size: clamp("label_size", self.label_size, LABEL_SIZE_RANGE),
            body_size: clamp("body_size", self.body_size, BODY_SIZE_RANGE),
            line_spacing: clamp("line_spacing", self.line_spacing, LINE_SPACING_RANGE),
            corner_radius: clamp("corner_radius", self.corner_radius, CORNER_RADIUS_RANGE),
            bubble_margin: clamp("bubble_margin", self.bubble_margin, BUBBLE_MARGIN_RANGE),
            label_content_gap: clamp(
                "label_content_gap",
                self.label_content_gap,
                LABEL_CONTENT_GAP_RANGE,
            ),
            geometry: self.geometry.clone(),
        }
    }
}

/// Fixed placement of every element on the card, in pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct CardGeometry {
    pub width: u32,
    pub height: u32,

    /// Top edge of the title line.
    pub title_top: i32,

    /// Badge circle, as distances from the right and top edges.
    pub badge_right_inset: i32,
    pub badge_top: i32,
    pub badge_diameter: i32,
    pub badge_fill: Color,
    pub badge_text: Color,
    pub badge_font_size: u32,

    /// First row available to bubbles; also the top of the image region.
    pub content_top: i32,
    /// Left edge of every bubble.
    pub left_margin: i32,

    pub image_width: u32,
    pub image_height: u32,
    /// Distance between the image region and the right edge.
    pub image_right_inset: i32,
    /// Distance between the bubbles and the image region.
    pub image_gap: i32,
    /// Minimum distance between the image region and the free-text bubble.
    pub image_bottom_gap: i32,
    /// The frame extends this far outside the image region.
    pub frame_inset: i32,
    pub frame_stroke: f32,

    /// Left and right margin of the free-text bubble.
    pub outer_margin: i32,
    /// Rows kept clear of the free-text bubble at the bottom of the card.
    pub footer_reserve: i32,
    /// Fraction of leftover height used to push the free-text bubble down.
    pub placement_factor: f32,

    /// Horizontal inset of the footer line and ornament.
    pub footer_inset: i32,
    pub footer_line_stroke: f32,
    pub arc_pitch: i32,
    pub arc_stroke: f32,
}

impl Default for CardGeometry {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 1400,
            title_top: 60,
            badge_right_inset: 90,
            badge_top: 40,
            badge_diameter: 50,
            badge_fill: Color::rgb(180, 210, 230),
            badge_text: Color::BLACK,
            badge_font_size: 20,
            content_top: 150,
            left_margin: 60,
            image_width: 320,
            image_height: 280,
            image_right_inset: 60,
            image_gap: 30,
            image_bottom_gap: 60,
            frame_inset: 8,
            frame_stroke: 3.0,
            outer_margin: 60,
            footer_reserve: 50,
            placement_factor: 0.1,
            footer_inset: 80,
            footer_line_stroke: 3.0,
            arc_pitch: 30,
            arc_stroke: 2.0,
        }
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(CardConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_reports_first_bad_knob() {
        let config = CardConfig {
            title_size: 90,
            line_spacing: 40,
            ..CardConfig::default()
        };
        match config.validate() {
            Err(FicheError::OutOfRange {
                field,
                value,
                min,
                max,
            }) => {
                assert_eq!(field, "title_size");
                assert_eq!((value, min, max), (90, 30, 80));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_clamped_pulls_knobs_into_range() {
        let config = CardConfig {
            title_size: 10,
            body_size: 99,
            bubble_margin: 0,
            label_content_gap: 51,
            ..CardConfig::default()
        };
        let clamped = config.clamped();
        assert_eq!(clamped.title_size, 30);
        assert_eq!(clamped.body_size, 30);
        assert_eq!(clamped.bubble_margin, 5);
        assert_eq!(clamped.label_content_gap, 50);
        assert_eq!(clamped.label_size, 22);
        assert!(clamped.validate().is_ok());
    }
}
