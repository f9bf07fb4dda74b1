//! Shaped glyph runs and the character↔glyph queries over them.

pub mod character_hit;
pub mod glyph_run;

pub use character_hit::{CharacterHit, RunHit};
pub use glyph_run::{Direction, GlyphRun, GlyphRunBuilder};

use core::fmt;

/// Errors raised while constructing a shaped run.
///
/// These indicate a bug in the shaping layer handing over inconsistent
/// arrays; construction aborts rather than producing a partially valid run.
#[derive(Debug, Clone, PartialEq)]
pub enum GlyphRunError {
    /// A run must contain at least one glyph.
    EmptyRun,
    /// Font size must be finite and greater than zero.
    InvalidFontSize(f32),
    /// The cluster map must cover every glyph.
    ClusterCountMismatch { glyphs: usize, clusters: usize },
    /// Supplied advances must cover every glyph.
    AdvanceCountMismatch { glyphs: usize, advances: usize },
    /// Supplied offsets must cover every glyph.
    OffsetCountMismatch { glyphs: usize, offsets: usize },
}

impl fmt::Display for GlyphRunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GlyphRunError::EmptyRun => write!(f, "glyph run has no glyphs"),
            GlyphRunError::InvalidFontSize(size) => {
                write!(f, "invalid font rendering em size: {size}")
            }
            GlyphRunError::ClusterCountMismatch { glyphs, clusters } => {
                write!(f, "{clusters} cluster entries for {glyphs} glyphs")
            }
            GlyphRunError::AdvanceCountMismatch { glyphs, advances } => {
                write!(f, "{advances} advances for {glyphs} glyphs")
            }
            GlyphRunError::OffsetCountMismatch { glyphs, offsets } => {
                write!(f, "{offsets} offsets for {glyphs} glyphs")
            }
        }
    }
}

impl std::error::Error for GlyphRunError {}

/// Convenient result alias for run construction.
pub type Result<T> = std::result::Result<T, GlyphRunError>;
