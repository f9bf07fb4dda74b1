//! Quill: glyph-run geometry for text editing UIs.
//!
//! The root crate is a thin façade; the actual implementation lives in
//! `quill-text`.

pub use quill_text as text;

pub use quill_text::{
    CharacterHit, Direction, Drawable, FontFace, GlyphRun, GlyphRunBuilder, GlyphRunError,
    RenderPlatform, RunHit, Typeface,
};
