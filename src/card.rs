//! Card assembly: the fields a card is drawn from, its styles and
//! configuration, the layout pass that draws it and its JPEG export.

pub mod config;
pub mod export;
pub mod fields;
pub mod layout;
pub mod palette;

pub use config::{CardConfig, CardGeometry};
pub use export::{DEFAULT_JPEG_QUALITY, file_name};
pub use fields::{CardFields, Section};
pub use layout::{Card, CardLayout, place_free_text};
pub use palette::{Palette, Style, UnknownStyle};
