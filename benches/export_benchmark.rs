use criterion::{criterion_group, criterion_main, Criterion};
use getaway_planner::export::{paginate, wrap_text, Document, ExportKind, PageLayout};
use getaway_planner::models::{match_score, match_seed};
use std::hint::black_box;

/// A long itinerary: 14 days of headings and bullet points.
fn long_itinerary() -> String {
    (1..=14)
        .map(|day| {
            format!(
                "Day {}: Slow Morning and Coastal Walk\n\
                 - Sleep in, then a long breakfast on the terrace overlooking the water with fresh \
                 pastries and local coffee.\n\
                 - Gentle walk along the bluff trail, stopping at the viewpoints for a few minutes \
                 of mindful breathing.\n\
                 - Early dinner at a small family-run restaurant; phone stays in the room.\n",
                day
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn benchmark_export(c: &mut Criterion) {
    let content = long_itinerary();
    let layout = PageLayout::default();

    let mut group = c.benchmark_group("export");

    group.bench_function("wrap_text", |b| {
        b.iter(|| wrap_text(black_box(&content), layout.columns()))
    });

    let lines = wrap_text(&content, layout.columns());
    group.bench_function("paginate", |b| {
        b.iter(|| paginate(black_box(lines.clone()), &layout))
    });

    group.bench_function("document", |b| {
        b.iter(|| Document::new(ExportKind::Itinerary, black_box(&content)))
    });

    group.finish();
}

fn benchmark_match_score(c: &mut Criterion) {
    let seeds: Vec<String> = (0..3)
        .map(|i| match_seed("a7f3c9e2-getaway-big-sur", i))
        .collect();

    c.bench_function("match_score", |b| {
        b.iter(|| {
            seeds
                .iter()
                .map(|seed| match_score(black_box(seed)) as u32)
                .sum::<u32>()
        })
    });
}

criterion_group!(benches, benchmark_export, benchmark_match_score);
criterion_main!(benches);
