use std::{collections::HashMap, path::PathBuf, sync::Arc};

/// Family names tried, in order, before the generic sans-serif family.
pub const PREFERRED_FAMILIES: &[&str] = &["Arial", "Liberation Sans", "DejaVu Sans"];

/// Font faces known to the card renderer.
///
/// Faces are registered in a `fontdb` database and parsed into `fontdue`
/// fonts the first time they are requested. Parsed fonts are shared through
/// `Arc` so sized handles can outlive the storage lock.
pub struct FontStorage {
    font_db: fontdb::Database,
    /// Parsed faces. Not every face in `font_db` is necessarily loaded here.
    loaded_font: HashMap<fontdb::ID, Arc<fontdue::Font>, fxhash::FxBuildHasher>,
}

impl Default for FontStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl FontStorage {
    /// Creates an empty storage.
    pub fn new() -> Self {
        Self {
            font_db: fontdb::Database::new(),
            loaded_font: HashMap::with_hasher(fxhash::FxBuildHasher::default()),
        }
    }
}

/// Registering faces.
impl FontStorage {
    /// Registers a font from binary data.
    pub fn load_font_binary(&mut self, data: impl Into<Vec<u8>>) {
        self.font_db.load_font_data(data.into());
    }

    /// Registers a font file.
    pub fn load_font_file(&mut self, path: PathBuf) -> Result<(), std::io::Error> {
        self.font_db.load_font_file(path)
    }

    /// Registers every font found in a directory.
    pub fn load_fonts_dir(&mut self, dir: PathBuf) {
        self.font_db.load_fonts_dir(dir)
    }

    /// Registers the fonts installed on the host.
    pub fn load_system_fonts(&mut self) {
        self.font_db.load_system_fonts();
    }

    /// Sets the family name used for the generic "sans-serif" family.
    pub fn set_sans_serif_family(&mut self, family: impl Into<String>) {
        self.font_db.set_sans_serif_family(family);
    }

    pub fn is_empty(&self) -> bool {
        self.font_db.is_empty()
    }

    pub fn len(&self) -> usize {
        self.font_db.len()
    }
}

/// Get `Font`
impl FontStorage {
    /// Finds the best face for the given weight among the preferred families,
    /// falling back to the generic sans-serif family.
    pub fn query_weight(&mut self, weight: fontdb::Weight) -> Option<Arc<fontdue::Font>> {
        let mut families: Vec<fontdb::Family<'_>> = PREFERRED_FAMILIES
            .iter()
            .map(|name| fontdb::Family::Name(*name))
            .collect();
        families.push(fontdb::Family::SansSerif);

        let query = fontdb::Query {
            families: &families,
            weight,
            stretch: fontdb::Stretch::Normal,
            style: fontdb::Style::Normal,
        };
        let id = self.font_db.query(&query)?;
        self.font(id)
    }

    /// Retrieves a parsed font by ID, parsing it on first use.
    pub fn font(&mut self, id: fontdb::ID) -> Option<Arc<fontdue::Font>> {
        use std::collections::hash_map::Entry;

        match self.loaded_font.entry(id) {
            Entry::Occupied(entry) => Some(Arc::clone(entry.get())),
            Entry::Vacant(entry) => {
                let font_result = self.font_db.with_face_data(id, |data, index| {
                    fontdue::Font::from_bytes(
                        data,
                        fontdue::FontSettings {
                            collection_index: index,
                            scale: 40.0,
                            load_substitutions: true,
                        },
                    )
                })?;

                match font_result {
                    Ok(font) => {
                        let r: &mut Arc<fontdue::Font> = entry.insert(Arc::new(font));
                        Some(Arc::clone(r))
                    }
                    Err(e) => {
                        log::error!("Failed to load font (id: {:?}): {}", id, e);
                        None
                    }
                }
            }
        }
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_storage_has_no_match() {
        let mut storage = FontStorage::new();
        assert!(storage.is_empty());
        assert_eq!(storage.len(), 0);
        assert!(storage.query_weight(fontdb::Weight::BOLD).is_none());
    }

    #[test]
    fn test_garbage_binary_is_not_a_face() {
        let mut storage = FontStorage::new();
        storage.load_font_binary(vec![0u8; 64]);
        assert!(storage.query_weight(fontdb::Weight::NORMAL).is_none());
    }
}
