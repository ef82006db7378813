use std::path::PathBuf;

use parking_lot::Mutex;

use crate::{
    font_storage::FontStorage,
    text::{CardFont, FallbackFont, SizedFont},
};

/// Logical purpose of a font on the card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontRole {
    /// The card title.
    Title,
    /// Section labels inside bubbles.
    Label,
    /// Section content and the free-text bubble.
    Body,
    /// The number inside the badge.
    Badge,
}

impl FontRole {
    pub fn is_bold(&self) -> bool {
        matches!(self, FontRole::Title | FontRole::Label)
    }

    fn weight(&self) -> fontdb::Weight {
        if self.is_bold() {
            fontdb::Weight::BOLD
        } else {
            fontdb::Weight::NORMAL
        }
    }
}

/// Strategy used by the card renderer to obtain fonts.
///
/// Resolution never fails: implementations hand out the built-in
/// [`FallbackFont`] when nothing better is available.
pub trait FontResolver {
    fn resolve(&self, role: FontRole, size: f32) -> CardFont;
}

/// Process-wide font cache backed by a `fontdb` database.
///
/// Faces are parsed lazily on first use, so the storage sits behind a
/// `Mutex`; once warmed up the cache is only read. Every render still builds
/// its own canvas, so a single `FontSystem` can serve concurrent renders.
pub struct FontSystem {
    /// The underlying font storage.
    pub font_storage: Mutex<FontStorage>,
}

impl Default for FontSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FontSystem {
    /// Creates a font system with no faces registered.
    pub fn new() -> Self {
        Self {
            font_storage: Mutex::new(FontStorage::new()),
        }
    }

    /// Creates a font system holding the host's installed fonts.
    pub fn with_system_fonts() -> Self {
        let system = Self::new();
        system.load_system_fonts();
        system
    }
}

/// font storage initialization
impl FontSystem {
    /// Loads the system fonts into the storage.
    pub fn load_system_fonts(&self) {
        self.font_storage.lock().load_system_fonts();
    }

    /// Loads a font from binary data.
    pub fn load_font_binary(&self, data: impl Into<Vec<u8>>) {
        self.font_storage.lock().load_font_binary(data);
    }

    /// Loads a font from a file path.
    pub fn load_font_file(&self, path: PathBuf) -> Result<(), std::io::Error> {
        self.font_storage.lock().load_font_file(path)
    }

    /// Loads all fonts from a directory.
    pub fn load_fonts_dir(&self, dir: PathBuf) {
        self.font_storage.lock().load_fonts_dir(dir)
    }

    /// Sets the family name for the "sans-serif" generic family.
    pub fn set_sans_serif_family(&self, family: impl Into<String>) {
        self.font_storage.lock().set_sans_serif_family(family);
    }

    /// Checks if the storage is empty.
    pub fn is_empty(&self) -> bool {
        self.font_storage.lock().is_empty()
    }

    /// Returns the number of registered faces.
    pub fn len(&self) -> usize {
        self.font_storage.lock().len()
    }
}

impl FontResolver for FontSystem {
    fn resolve(&self, role: FontRole, size: f32) -> CardFont {
        let font = self.font_storage.lock().query_weight(role.weight());

        match font.and_then(|font| SizedFont::new(font, size)) {
            Some(sized) => CardFont::Outline(sized),
            None => {
                log::warn!("No usable {role:?} font at {size}px; using built-in fallback metrics.");
                CardFont::Fallback(FallbackFont::new(size))
            }
        }
    }
}

/// Resolver that always hands out [`FallbackFont`].
///
/// Output is identical on every host, which makes it the resolver of choice
/// for headless rendering and tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct FallbackFonts;

impl FontResolver for FallbackFonts {
    fn resolve(&self, _role: FontRole, size: f32) -> CardFont {
        CardFont::Fallback(FallbackFont::new(size))
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::GlyphMetrics;

    #[test]
    fn test_empty_font_system_degrades_to_fallback() {
        let system = FontSystem::new();
        assert!(system.is_empty());

        let font = system.resolve(FontRole::Title, 56.0);
        assert!(font.is_fallback());
        assert_eq!(font.advance('A'), 28.0);
    }

    #[test]
    fn test_fallback_fonts_honour_size() {
        let font = FallbackFonts.resolve(FontRole::Body, 18.0);
        assert!(font.is_fallback());
        assert_eq!(font.width("abcd"), 36.0);
    }

    #[test]
    fn test_bold_roles() {
        assert!(FontRole::Title.is_bold());
        assert!(FontRole::Label.is_bold());
        assert!(!FontRole::Body.is_bold());
        assert!(!FontRole::Badge.is_bold());
    }
}
