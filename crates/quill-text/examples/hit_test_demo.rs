use std::sync::Arc;

use quill_text::{GlyphRun, Typeface};

/// Stand-in face with fixed metrics; a real application would use
/// `quill_text::FontFace` (or `load_system_default_font`) instead.
#[derive(Debug)]
struct DemoTypeface;

impl Typeface for DemoTypeface {
    fn design_em_height(&self) -> u16 {
        1000
    }

    fn ascent(&self) -> f32 {
        800.0
    }

    fn descent(&self) -> f32 {
        200.0
    }

    fn line_gap(&self) -> f32 {
        90.0
    }

    fn glyph_advance(&self, glyph: u16) -> f32 {
        400.0 + f32::from(glyph % 5) * 60.0
    }
}

fn main() {
    let typeface: Arc<dyn Typeface> = Arc::new(DemoTypeface);

    // "office" shaped with an "ffi" ligature: 6 characters, 4 glyphs.
    let run = GlyphRun::builder(typeface, 16.0)
        .glyph_indices(vec![20, 77, 12, 9])
        .glyph_advances(vec![9.0, 21.0, 7.5, 8.0])
        .glyph_clusters(vec![0, 1, 4, 5])
        .characters("office".encode_utf16().collect())
        .build()
        .expect("valid run");

    println!("=== Hit Testing Demo ===\n");
    println!("Text: \"office\" ({} glyphs, ffi ligature)", run.glyph_count());
    println!("Run bounds: {:?}\n", run.bounds());

    println!("--- Distance -> Character Hit ---");
    for distance in [-5.0, 0.0, 4.0, 12.0, 25.0, 33.0, 44.0, 60.0] {
        let resolved = run.character_hit_from_distance(distance);
        println!(
            "x = {distance:>6.1}  ->  first {} trailing {} ({})",
            resolved.hit.first_character_index,
            resolved.hit.trailing_length,
            if resolved.is_inside { "inside" } else { "outside" },
        );
    }

    println!("\n--- Character Hit -> Distance ---");
    let mut starts: Vec<usize> = run.glyph_clusters().iter().map(|&c| c as usize).collect();
    starts.dedup();
    for start in starts {
        let (hit, width) = run.find_nearest_character_hit(start);
        let leading = run.distance_from_character_hit(quill_text::CharacterHit::leading(start));
        println!(
            "cluster at {start}: leading edge x = {leading:.1}, width = {width:.1}, spans {} chars",
            hit.trailing_length,
        );
    }
}
