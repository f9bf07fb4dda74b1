//! Platform rendering capability consumed by shaped runs.
//!
//! The text core never rasterizes anything itself; it hands a run to a
//! [`RenderPlatform`] exactly once and keeps ownership of the resulting
//! opaque resource for the rest of the run's life.

use core::any::Any;
use core::fmt;

use crate::shaping::GlyphRun;

/// Opaque platform resource that can draw a shaped run.
///
/// The core never inspects the resource; it owns it and releases it (by
/// dropping) together with the run that created it.
pub trait Drawable: fmt::Debug {
    /// Downcast hook for the platform that created the resource.
    fn as_any(&self) -> &dyn Any;
}

/// Capability to turn a shaped run into a platform drawable.
pub trait RenderPlatform {
    /// Create the drawable for `run`, returning the handle together with the
    /// width the platform measured for it.
    ///
    /// Invoked lazily by [`GlyphRun::drawable`], at most once per run.
    fn create_drawable(&self, run: &GlyphRun) -> (Box<dyn Drawable>, f32);
}
