use std::sync::Arc;

use quill_text::{CharacterHit, GlyphRun, Typeface};

#[derive(Debug)]
struct DemoTypeface;

impl Typeface for DemoTypeface {
    fn design_em_height(&self) -> u16 {
        1000
    }

    fn ascent(&self) -> f32 {
        760.0
    }

    fn descent(&self) -> f32 {
        240.0
    }

    fn line_gap(&self) -> f32 {
        0.0
    }

    fn glyph_advance(&self, glyph: u16) -> f32 {
        500.0 + f32::from(glyph % 3) * 40.0
    }
}

fn walk(label: &str, run: &GlyphRun) {
    println!("--- {label} ---");

    let mut hit = CharacterHit::leading(run.character_range().start);
    loop {
        let x = run.distance_from_character_hit(hit);
        println!(
            "caret at first {} trailing {} -> x = {x:.1}",
            hit.first_character_index, hit.trailing_length,
        );
        let next = run.next_caret_character_hit(hit);
        if next == hit {
            // Equal-to-input signals exhausted navigation.
            break;
        }
        hit = next;
    }
    println!();
}

fn main() {
    let typeface: Arc<dyn Typeface> = Arc::new(DemoTypeface);

    println!("=== Caret Navigation Demo ===\n");

    // LTR with an "fi" ligature: "fin" is 3 characters, 2 glyphs.
    let ltr = GlyphRun::builder(typeface.clone(), 14.0)
        .glyph_indices(vec![33, 7])
        .glyph_advances(vec![11.0, 7.0])
        .glyph_clusters(vec![0, 2])
        .characters("fin".encode_utf16().collect())
        .build()
        .expect("valid run");
    walk("LTR, fi ligature", &ltr);

    // RTL: clusters descend along the visual glyph order.
    let rtl = GlyphRun::builder(typeface, 14.0)
        .glyph_indices(vec![101, 102, 103])
        .glyph_advances(vec![8.0, 7.0, 9.0])
        .glyph_clusters(vec![2, 1, 0])
        .characters("שלם".encode_utf16().collect())
        .bidi_level(1)
        .build()
        .expect("valid run");
    walk("RTL", &rtl);
}
