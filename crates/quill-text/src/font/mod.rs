pub mod face;
pub mod loader;
pub mod metrics;

pub use face::FontFace;
pub use loader::{FontCache, FontKey, load_font, load_system_default_font};
pub use metrics::{FontMetrics, ScaledFontMetrics};

use core::fmt;

use swash::GlyphId;

/// Errors that can occur while working with fonts.
#[derive(Debug)]
pub enum FontError {
    Io(std::io::Error),
    InvalidFont,
    NoSystemFont,
}

impl fmt::Display for FontError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontError::Io(err) => write!(f, "font I/O error: {err}"),
            FontError::InvalidFont => write!(f, "invalid font data"),
            FontError::NoSystemFont => write!(f, "no suitable system font found"),
        }
    }
}

impl std::error::Error for FontError {}

impl From<std::io::Error> for FontError {
    fn from(err: std::io::Error) -> Self {
        FontError::Io(err)
    }
}

/// Convenient result alias for font-related operations.
pub type Result<T> = std::result::Result<T, FontError>;

/// Capability contract for the font face a shaped run was built against.
///
/// Everything is expressed in font design units with the positive-up
/// convention used by [`FontMetrics`]; consumers scale to pixels with
/// `font_size / design_em_height()`.
pub trait Typeface: fmt::Debug + Send + Sync {
    /// Units per em of the design grid.
    fn design_em_height(&self) -> u16;

    /// Ascent above the baseline (positive).
    fn ascent(&self) -> f32;

    /// Descent below the baseline (positive).
    fn descent(&self) -> f32;

    /// Extra leading between lines.
    fn line_gap(&self) -> f32;

    /// Intrinsic horizontal advance of a glyph.
    fn glyph_advance(&self, glyph: GlyphId) -> f32;
}
