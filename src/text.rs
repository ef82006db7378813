/// Transient input and output types of the wrapper.
pub mod data;
/// Font measurement: advance widths, line metrics and glyph coverage.
pub mod metrics;
/// Greedy pixel-width line breaking.
pub mod wrap;

pub use data::{TextBlock, WrappedBlock};
pub use metrics::{CardFont, FallbackFont, GlyphBitmap, GlyphMetrics, InkBounds, SizedFont};
pub use wrap::{split_long_word, wrap};
