//! Benchmarks for the markup codec and typing through a mounted field
//!
//! Run with: cargo bench markup

use scribe::editable::{markup, DocumentSurface, EditingSurface, MoveTarget, TextEdit};
use scribe::richtext::{FieldProps, RichTextEditor};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

fn sample_markup(paragraphs: usize) -> String {
    let mut out = String::new();
    for i in 0..paragraphs {
        match i % 4 {
            0 => out.push_str("<h2>Section heading</h2>"),
            1 => out.push_str("<p>Plain text with <strong>bold</strong> and <em>italic</em> runs.</p>"),
            2 => out.push_str(r#"<ul><li>first</li><li>see <a href="https://x.example">docs</a></li></ul>"#),
            _ => out.push_str(r#"<p style="text-align: center">centered<img src="a.png"></p>"#),
        }
    }
    out
}

// ============================================================================
// Codec
// ============================================================================

#[divan::bench(args = [10, 100, 1000])]
fn parse(bencher: divan::Bencher, paragraphs: usize) {
    let input = sample_markup(paragraphs);
    bencher.bench(|| markup::parse(divan::black_box(&input)));
}

#[divan::bench(args = [10, 100, 1000])]
fn serialize(bencher: divan::Bencher, paragraphs: usize) {
    let doc = markup::parse(&sample_markup(paragraphs));
    bencher.bench(|| markup::serialize(divan::black_box(&doc)));
}

// ============================================================================
// Editing
// ============================================================================

#[divan::bench(args = [100, 1000])]
fn type_into_surface(bencher: divan::Bencher, paragraphs: usize) {
    let input = sample_markup(paragraphs);
    bencher
        .with_inputs(|| {
            let mut surface = DocumentSurface::from_markup(&input);
            let _ = surface.apply_edit(&TextEdit::Move {
                target: MoveTarget::DocumentEnd,
                extend: false,
            });
            surface
        })
        .bench_local_refs(|surface| {
            for _ in 0..50 {
                let _ = surface.apply_edit(&TextEdit::InsertText("x".into()));
            }
        });
}

#[divan::bench]
fn type_into_field(bencher: divan::Bencher) {
    let input = sample_markup(100);
    bencher
        .with_inputs(|| {
            RichTextEditor::new(FieldProps::new().with_initial_value(input.clone()), |_| {})
        })
        .bench_local_refs(|editor| {
            for _ in 0..50 {
                editor.input(TextEdit::InsertText("x".into()));
            }
        });
}
