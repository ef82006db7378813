use image::codecs::jpeg::JpegEncoder;

use crate::card::Card;
use crate::error::{FicheError, Result};

/// Quality used by [`Card::encode_jpeg_default`].
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

impl Card {
    /// Encodes the card as a baseline JPEG. `quality` is clamped to 1..=100.
    pub fn encode_jpeg(&self, quality: u8) -> Result<Vec<u8>> {
        let quality = quality.clamp(1, 100);
        let image = self.to_rgb_image();
        let mut bytes = Vec::new();
        JpegEncoder::new_with_quality(&mut bytes, quality)
            .encode_image(&image)
            .map_err(FicheError::Encode)?;

        log::debug!(
            "Encoded {}x{} card to {} bytes of JPEG (quality {quality})",
            image.width(),
            image.height(),
            bytes.len()
        );
        Ok(bytes)
    }

    /// Encodes the card at [`DEFAULT_JPEG_QUALITY`].
    pub fn encode_jpeg_default(&self) -> Result<Vec<u8>> {
        self.encode_jpeg(DEFAULT_JPEG_QUALITY)
    }
}

/// Download file name for a card about `name`: `fiche_<name>.jpeg`.
///
/// The name is lower-cased, whitespace runs become `_` and anything other
/// than alphanumerics, `_` and `-` is dropped. An empty result yields
/// `fiche.jpeg`.
pub fn file_name(name: &str) -> String {
    let mut stem = String::with_capacity(name.len());
    let mut in_space = false;
    for ch in name.trim().chars() {
        if ch.is_whitespace() {
            if !in_space {
                stem.push('_');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        if ch.is_alphanumeric() || ch == '-' || ch == '_' {
            stem.extend(ch.to_lowercase());
        }
    }

    if stem.is_empty() {
        "fiche.jpeg".to_string()
    } else {
        format!("fiche_{stem}.jpeg")
    }
}
