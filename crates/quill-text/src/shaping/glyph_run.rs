use core::ops::Range;
use std::cell::OnceCell;
use std::sync::Arc;

use swash::GlyphId;

use crate::font::Typeface;
use crate::geometry::{Rect, Vector};
use crate::render::{Drawable, RenderPlatform};

use super::{CharacterHit, GlyphRunError, Result, RunHit};

/// Visual direction of a shaped run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    LeftToRight,
    RightToLeft,
}

impl Direction {
    /// Direction implied by a bidirectional embedding level (even = LTR).
    pub fn from_bidi_level(level: u8) -> Self {
        if level & 1 == 0 {
            Direction::LeftToRight
        } else {
            Direction::RightToLeft
        }
    }

    pub fn is_left_to_right(self) -> bool {
        matches!(self, Direction::LeftToRight)
    }
}

/// One run of shaped text: glyphs for a single face, size and direction,
/// with the cluster map back to the source characters.
///
/// Glyphs are stored in visual order, left to right. For right-to-left runs
/// the cluster values therefore decrease along the glyph arrays. All
/// horizontal distances accepted and produced by the queries are measured
/// from the run's visual left edge, for both directions.
///
/// A run is immutable once built. The two derived values (bounds and the
/// platform drawable) are materialized lazily, at most once, and cached;
/// dropping the run releases the drawable. Runs are meant to be read from a
/// single thread.
#[derive(Debug)]
pub struct GlyphRun {
    typeface: Arc<dyn Typeface>,
    font_size: f32,
    glyph_indices: Vec<GlyphId>,
    glyph_advances: Vec<f32>,
    glyph_offsets: Vec<Vector>,
    characters: Vec<u16>,
    character_start: usize,
    glyph_clusters: Vec<u16>,
    bidi_level: u8,
    bounds: OnceCell<Rect>,
    drawable: OnceCell<(Box<dyn Drawable>, f32)>,
}

/// Collects and validates the attributes of a [`GlyphRun`].
///
/// `build` is the only way to obtain a run, so every run in existence has
/// passed validation and no mutation is possible afterwards.
#[derive(Debug)]
pub struct GlyphRunBuilder {
    typeface: Arc<dyn Typeface>,
    font_size: f32,
    glyph_indices: Vec<GlyphId>,
    glyph_advances: Vec<f32>,
    glyph_offsets: Vec<Vector>,
    characters: Vec<u16>,
    character_start: usize,
    glyph_clusters: Vec<u16>,
    bidi_level: u8,
    bounds: Option<Rect>,
}

impl GlyphRunBuilder {
    /// Start a run for the given face and font size (px per em).
    pub fn new(typeface: Arc<dyn Typeface>, font_size: f32) -> Self {
        Self {
            typeface,
            font_size,
            glyph_indices: Vec::new(),
            glyph_advances: Vec::new(),
            glyph_offsets: Vec::new(),
            characters: Vec::new(),
            character_start: 0,
            glyph_clusters: Vec::new(),
            bidi_level: 0,
            bounds: None,
        }
    }

    /// Shaped glyph ids in visual order.
    pub fn glyph_indices(mut self, glyph_indices: Vec<GlyphId>) -> Self {
        self.glyph_indices = glyph_indices;
        self
    }

    /// Per-glyph advances in pixels. Leave empty to derive every advance
    /// from the typeface's intrinsic glyph metrics.
    pub fn glyph_advances(mut self, glyph_advances: Vec<f32>) -> Self {
        self.glyph_advances = glyph_advances;
        self
    }

    /// Per-glyph visual offsets (diacritic placement etc.). May be empty.
    pub fn glyph_offsets(mut self, glyph_offsets: Vec<Vector>) -> Self {
        self.glyph_offsets = glyph_offsets;
        self
    }

    /// Source characters covered by the run, as UTF-16 code units.
    pub fn characters(mut self, characters: Vec<u16>) -> Self {
        self.characters = characters;
        self
    }

    /// Absolute character index of the run's first character.
    pub fn character_start(mut self, character_start: usize) -> Self {
        self.character_start = character_start;
        self
    }

    /// Cluster map: for each glyph, the absolute index of the first
    /// character it renders. Non-decreasing for LTR runs, non-increasing
    /// for RTL runs; that ordering is the shaper's contract and is not
    /// re-validated here.
    pub fn glyph_clusters(mut self, glyph_clusters: Vec<u16>) -> Self {
        self.glyph_clusters = glyph_clusters;
        self
    }

    /// Bidirectional embedding level. Even levels are left-to-right.
    pub fn bidi_level(mut self, bidi_level: u8) -> Self {
        self.bidi_level = bidi_level;
        self
    }

    /// Supply precomputed bounds, skipping the lazy derivation entirely.
    /// Useful when the shaping layer already accumulated the run metrics.
    pub fn bounds(mut self, bounds: Rect) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Validate the collected attributes and produce the immutable run.
    pub fn build(self) -> Result<GlyphRun> {
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(GlyphRunError::InvalidFontSize(self.font_size));
        }
        let glyphs = self.glyph_indices.len();
        if glyphs == 0 {
            return Err(GlyphRunError::EmptyRun);
        }
        if self.glyph_clusters.len() != glyphs {
            return Err(GlyphRunError::ClusterCountMismatch {
                glyphs,
                clusters: self.glyph_clusters.len(),
            });
        }
        if !self.glyph_advances.is_empty() && self.glyph_advances.len() != glyphs {
            return Err(GlyphRunError::AdvanceCountMismatch {
                glyphs,
                advances: self.glyph_advances.len(),
            });
        }
        if !self.glyph_offsets.is_empty() && self.glyph_offsets.len() != glyphs {
            return Err(GlyphRunError::OffsetCountMismatch {
                glyphs,
                offsets: self.glyph_offsets.len(),
            });
        }

        let bounds = OnceCell::new();
        if let Some(precomputed) = self.bounds {
            // Infallible: the cell was created empty just above.
            let _ = bounds.set(precomputed);
        }

        Ok(GlyphRun {
            typeface: self.typeface,
            font_size: self.font_size,
            glyph_indices: self.glyph_indices,
            glyph_advances: self.glyph_advances,
            glyph_offsets: self.glyph_offsets,
            characters: self.characters,
            character_start: self.character_start,
            glyph_clusters: self.glyph_clusters,
            bidi_level: self.bidi_level,
            bounds,
            drawable: OnceCell::new(),
        })
    }
}

impl GlyphRun {
    /// Start building a run for the given face and font size.
    pub fn builder(typeface: Arc<dyn Typeface>, font_size: f32) -> GlyphRunBuilder {
        GlyphRunBuilder::new(typeface, font_size)
    }

    pub fn typeface(&self) -> &Arc<dyn Typeface> {
        &self.typeface
    }

    /// Font size in pixels per em.
    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn glyph_indices(&self) -> &[GlyphId] {
        &self.glyph_indices
    }

    /// Supplied per-glyph advances; empty when advances are derived from
    /// the typeface.
    pub fn glyph_advances(&self) -> &[f32] {
        &self.glyph_advances
    }

    pub fn glyph_offsets(&self) -> &[Vector] {
        &self.glyph_offsets
    }

    /// Source characters covered by the run, as UTF-16 code units.
    pub fn characters(&self) -> &[u16] {
        &self.characters
    }

    /// Absolute character index of the run's first character.
    pub fn character_start(&self) -> usize {
        self.character_start
    }

    /// Absolute character range covered by the run.
    pub fn character_range(&self) -> Range<usize> {
        self.character_start..self.character_start + self.characters.len()
    }

    pub fn glyph_clusters(&self) -> &[u16] {
        &self.glyph_clusters
    }

    pub fn bidi_level(&self) -> u8 {
        self.bidi_level
    }

    pub fn direction(&self) -> Direction {
        Direction::from_bidi_level(self.bidi_level)
    }

    pub fn is_left_to_right(&self) -> bool {
        self.bidi_level & 1 == 0
    }

    pub fn glyph_count(&self) -> usize {
        self.glyph_indices.len()
    }

    /// Conversion factor from font design units to pixels.
    pub fn scale(&self) -> f32 {
        let units_per_em = self.typeface.design_em_height();
        if units_per_em != 0 {
            self.font_size / units_per_em as f32
        } else {
            1.0
        }
    }

    /// Effective advance of glyph `index`: the supplied advance when
    /// present, otherwise the typeface's intrinsic advance scaled to the
    /// run's size.
    pub fn glyph_advance(&self, index: usize) -> f32 {
        if self.glyph_advances.is_empty() {
            self.typeface.glyph_advance(self.glyph_indices[index]) * self.scale()
        } else {
            self.glyph_advances[index]
        }
    }

    /// Conservative visual extent of the run, derived on first access and
    /// cached: width is the sum of effective advances, height the scaled
    /// line height, origin (0, 0).
    pub fn bounds(&self) -> Rect {
        *self.bounds.get_or_init(|| {
            let width = (0..self.glyph_count())
                .map(|index| self.glyph_advance(index))
                .sum();
            let height = (self.typeface.ascent()
                + self.typeface.descent()
                + self.typeface.line_gap())
                * self.scale();
            Rect::new(0.0, 0.0, width, height)
        })
    }

    /// Map a character index to the index of the first glyph of the
    /// cluster containing it.
    ///
    /// Character indices before the run (in glyph array order) clamp to
    /// `Some(0)`; indices past the run's last cluster yield `None`, which
    /// callers must treat as "no glyph covers this position". The result is
    /// monotonic in the character index: non-decreasing for LTR runs,
    /// non-increasing for RTL runs.
    pub fn find_glyph_index(&self, character_index: usize) -> Option<usize> {
        let clusters = &self.glyph_clusters;
        let first = clusters[0] as usize;
        let last = clusters[clusters.len() - 1] as usize;

        if self.is_left_to_right() {
            if character_index < first {
                return Some(0);
            }
            if character_index > last {
                return None;
            }
        } else {
            if character_index > first {
                return Some(0);
            }
            if character_index < last {
                return None;
            }
        }

        // Largest cluster value not exceeding the requested character, via
        // one partition search with a direction-dependent comparator. This
        // lands inside the cluster containing a non-cluster-starting
        // (combining) character position directly.
        let found = if self.is_left_to_right() {
            clusters.partition_point(|&cluster| (cluster as usize) <= character_index) - 1
        } else {
            clusters.partition_point(|&cluster| (cluster as usize) > character_index)
        };

        Some(self.cluster_start(found))
    }

    /// The canonical hit at or after `character_index`, together with the
    /// accumulated advance width of the whole cluster it belongs to.
    ///
    /// The hit's `trailing_length` spans the cluster's characters, which can
    /// exceed its glyph count when trailing combining characters have no
    /// dedicated glyph.
    pub fn find_nearest_character_hit(&self, character_index: usize) -> (CharacterHit, f32) {
        let start = match self.find_glyph_index(character_index) {
            Some(start) => start,
            // Past the run: snap to the last cluster in glyph array order.
            None => self.cluster_start(self.glyph_count() - 1),
        };
        let cluster = self.glyph_clusters[start] as usize;

        let mut width = 0.0;
        let mut end = start;
        while end < self.glyph_count() && self.glyph_clusters[end] as usize == cluster {
            width += self.glyph_advance(end);
            end += 1;
        }

        // The cluster covers every character up to the next cluster in
        // logical order: the following glyph group for LTR, the preceding
        // one for RTL, or the end of the character range for the logically
        // last cluster.
        let next_boundary = if self.is_left_to_right() {
            if end < self.glyph_count() {
                self.glyph_clusters[end] as usize
            } else {
                self.character_range().end
            }
        } else if start > 0 {
            self.glyph_clusters[start - 1] as usize
        } else {
            self.character_range().end
        };
        let trailing_length = next_boundary.saturating_sub(cluster);

        (CharacterHit::trailing(cluster, trailing_length), width)
    }

    /// Distance from the run's visual left edge to the given hit's caret
    /// position. Hits whose end lies past the character range clamp to the
    /// run's logical-end edge: full width for LTR, zero for RTL.
    pub fn distance_from_character_hit(&self, hit: CharacterHit) -> f32 {
        let past_end_distance = || {
            if self.is_left_to_right() {
                self.bounds().width
            } else {
                0.0
            }
        };

        if hit.caret_index() > self.character_range().end {
            return past_end_distance();
        }
        let Some(start) = self.find_glyph_index(hit.first_character_index) else {
            return past_end_distance();
        };

        // A trailing hit sits past the cluster's glyphs for LTR; for RTL
        // the leading edge is the far (right) side, so the roles swap.
        let pointer = if (hit.trailing_length > 0) == self.is_left_to_right() {
            self.cluster_end(start)
        } else {
            start
        };

        (0..pointer).map(|index| self.glyph_advance(index)).sum()
    }

    /// The nearest character hit for a horizontal distance from the run's
    /// visual left edge, with an inside/outside flag.
    ///
    /// Within a cluster the midpoint decides the edge: the half nearer the
    /// run start resolves to the caret edge on that side, the far half to
    /// the opposite edge.
    pub fn character_hit_from_distance(&self, distance: f32) -> RunHit {
        let width = self.bounds().width;

        if distance < 0.0 {
            // Before the run's left edge: the cluster at the glyph array
            // start, on its left-side caret edge (leading for LTR; the
            // trailing edge for RTL, whose logical end is the left side).
            let cluster = self.glyph_clusters[0] as usize;
            let (hit, _) = self.find_nearest_character_hit(cluster);
            let hit = if self.is_left_to_right() {
                CharacterHit::leading(hit.first_character_index)
            } else {
                hit
            };
            return RunHit::new(hit, false);
        }
        if distance > width {
            // Mirror at the glyph array end.
            let cluster = self.glyph_clusters[self.glyph_count() - 1] as usize;
            let (hit, _) = self.find_nearest_character_hit(cluster);
            let hit = if self.is_left_to_right() {
                hit
            } else {
                CharacterHit::leading(hit.first_character_index)
            };
            return RunHit::new(hit, false);
        }

        // Accumulate advances until the glyph whose extent reaches the
        // requested distance.
        let mut offset = 0.0;
        let mut index = 0;
        while index < self.glyph_count() {
            let advance = self.glyph_advance(index);
            if offset + advance >= distance {
                break;
            }
            offset += advance;
            index += 1;
        }
        let index = index.min(self.glyph_count() - 1);

        let cluster = self.glyph_clusters[index] as usize;
        let (hit, cluster_width) = self.find_nearest_character_hit(cluster);

        // x of the cluster edge nearer the run's left side: the leading
        // edge for LTR, the trailing edge for RTL.
        let near_edge = if self.is_left_to_right() {
            self.distance_from_character_hit(CharacterHit::leading(hit.first_character_index))
        } else {
            self.distance_from_character_hit(hit)
        };
        let past_midpoint = distance > near_edge + cluster_width / 2.0;

        let hit = if past_midpoint == self.is_left_to_right() {
            hit
        } else {
            CharacterHit::leading(hit.first_character_index)
        };
        RunHit::new(hit, true)
    }

    /// The caret hit one cluster forward in logical order.
    ///
    /// Returns a hit equal to the input when no further movement is
    /// possible; callers detect the fixed point by comparison.
    pub fn next_caret_character_hit(&self, hit: CharacterHit) -> CharacterHit {
        let range = self.character_range();
        if hit.trailing_length == 0 {
            if hit.first_character_index >= range.end {
                return hit;
            }
            // From a leading edge, advance to the containing cluster's
            // trailing edge.
            let (next, _) = self.find_nearest_character_hit(hit.first_character_index);
            return next;
        }

        let target = hit.caret_index();
        if target >= range.end {
            return hit;
        }
        let (next, _) = self.find_nearest_character_hit(target);
        next
    }

    /// The caret hit one cluster backward in logical order.
    ///
    /// A trailing hit first collapses to its own cluster's leading edge;
    /// a leading hit at the range start is returned unchanged (the stop
    /// signal).
    pub fn previous_caret_character_hit(&self, hit: CharacterHit) -> CharacterHit {
        if hit.trailing_length > 0 {
            return CharacterHit::leading(hit.first_character_index);
        }
        let range = self.character_range();
        if hit.first_character_index <= range.start {
            return hit;
        }
        let (previous, _) = self.find_nearest_character_hit(hit.first_character_index - 1);
        CharacterHit::leading(previous.first_character_index)
    }

    /// The platform drawable for this run, created on first access and
    /// cached; the platform capability is invoked at most once per run.
    pub fn drawable(&self, platform: &dyn RenderPlatform) -> &dyn Drawable {
        self.materialize(platform).0.as_ref()
    }

    /// Width the platform measured when the drawable was created, if it
    /// has been materialized yet.
    pub fn measured_width(&self) -> Option<f32> {
        self.drawable.get().map(|entry| entry.1)
    }

    fn materialize(&self, platform: &dyn RenderPlatform) -> &(Box<dyn Drawable>, f32) {
        self.drawable.get_or_init(|| {
            let (drawable, measured_width) = platform.create_drawable(self);
            log::debug!(
                "materialized drawable for {} glyphs (measured width {measured_width})",
                self.glyph_count()
            );
            (drawable, measured_width)
        })
    }

    /// Index of the first glyph sharing `index`'s cluster value.
    fn cluster_start(&self, index: usize) -> usize {
        let cluster = self.glyph_clusters[index];
        let mut start = index;
        while start > 0 && self.glyph_clusters[start - 1] == cluster {
            start -= 1;
        }
        start
    }

    /// Index one past the last glyph sharing `start`'s cluster value.
    fn cluster_end(&self, start: usize) -> usize {
        let cluster = self.glyph_clusters[start];
        let mut end = start;
        while end < self.glyph_count() && self.glyph_clusters[end] == cluster {
            end += 1;
        }
        end
    }
}
