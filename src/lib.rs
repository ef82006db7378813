//! # Fiche
//!
//! Renders fixed-layout information cards: a title, a number badge, an
//! optional framed photo, seven labelled text bubbles, one wide free-text
//! bubble and a decorative footer, drawn on a 1000 x 1400 canvas.
//!
//! ## Overview
//!
//! The core of the library is the pixel-width text wrapper in [`text`]:
//! every bubble's height is computed from exactly the lines that get drawn,
//! so bubbles stack without overlapping. [`FontSystem`] resolves the fonts,
//! [`renderer`] draws bubbles on a [`Canvas`](renderer::Canvas) and
//! [`card`] runs the top-to-bottom layout pass.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use fiche::{Card, CardConfig, CardFields, FontSystem, Style, card::file_name};
//!
//! let fonts = FontSystem::with_system_fonts();
//! let fields = CardFields {
//!     number: "1".into(),
//!     name: "Rougegorge familier".into(),
//!     scientific_name: "Erithacus rubecula".into(),
//!     ..CardFields::default()
//! };
//! let config = CardConfig {
//!     style: Style::from_token("automne"),
//!     ..CardConfig::default()
//! };
//!
//! let card = Card::render(&fields, &config, &fonts)?;
//! std::fs::write(file_name(&fields.name), card.encode_jpeg(90)?).ok();
//! # Ok::<(), fiche::FicheError>(())
//! ```
//!
//! ## Features
//!
//! *   **Pixel-exact wrapping**: greedy word wrap with character-level
//!     splitting of words wider than a whole line.
//! *   **Graceful fonts**: a missing system font degrades to a built-in
//!     fallback instead of failing the render.
//! *   **Thread Safety**: [`FontSystem`] locks internally and can be shared
//!     between renders.

pub mod card;
pub mod error;
pub mod font_storage;
pub mod font_system;
pub mod renderer;
pub mod text;

// common re-exports
pub use card::{Card, CardConfig, CardFields, CardLayout, Style};
pub use error::{FicheError, Result};
pub use font_storage::FontStorage;
pub use font_system::{FallbackFonts, FontResolver, FontRole, FontSystem};

// re-export dependencies
pub use fontdb;
pub use fontdue;
pub use image;
pub use parking_lot;
pub use tiny_skia;
