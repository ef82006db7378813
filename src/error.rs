/// Errors surfaced by card rendering.
///
/// Text-layout degradations (missing fonts, degenerate widths, empty fields,
/// content taller than the canvas) are absorbed by the renderer and never show
/// up here. Only resource failures the caller has to know about are reported.
#[derive(Debug, thiserror::Error)]
pub enum FicheError {
    /// The optional photo could not be decoded.
    #[error("failed to decode photo: {0}")]
    PhotoDecode(#[source] image::ImageError),

    /// The finished card could not be encoded.
    #[error("failed to encode card: {0}")]
    Encode(#[source] image::ImageError),

    /// The canvas pixel buffer could not be allocated (zero or oversized dimensions).
    #[error("cannot allocate a {width}x{height} canvas")]
    CanvasAllocation { width: u32, height: u32 },

    /// A configuration knob lies outside its documented range.
    #[error("{field} = {value} is outside {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FicheError>;
