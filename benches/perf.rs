use std::collections::HashSet;
use std::path::PathBuf;

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use ipl_terminal::aggregate;
use ipl_terminal::dataset;
use ipl_terminal::filters::{SeasonFilter, TeamFilter, apply_filters};
use ipl_terminal::sample;

fn fixture_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    path
}

fn bench_apply_filters(c: &mut Criterion) {
    let data = sample::demo_data_sized(12, 60);
    let team = TeamFilter::Team("Chennai Super Kings".to_string());

    c.bench_function("apply_filters", |b| {
        b.iter(|| {
            let rows = apply_filters(black_box(&data.matches), &SeasonFilter::All, &team);
            black_box(rows.len());
        })
    });
}

fn bench_chart_suite(c: &mut Criterion) {
    let data = sample::demo_data_sized(12, 60);
    let season = SeasonFilter::Season(2019);

    c.bench_function("chart_suite", |b| {
        b.iter(|| {
            let rows = apply_filters(black_box(&data.matches), &season, &TeamFilter::All);
            let ids: HashSet<u32> = rows.iter().map(|m| m.id).collect();
            black_box(aggregate::matches_per_season(&rows).len());
            black_box(aggregate::team_wins(&rows).len());
            black_box(aggregate::toss_vs_win(&rows).decided());
            black_box(aggregate::top_venues(&rows).len());
            black_box(aggregate::top_batsmen(&data.deliveries, &ids).len());
            black_box(aggregate::top_bowlers(&data.deliveries, &ids).len());
        })
    });
}

fn bench_matches_csv_parse(c: &mut Criterion) {
    let path = fixture_path("matches_small.csv");

    c.bench_function("matches_csv_parse", |b| {
        b.iter(|| {
            let rows = dataset::load_matches_csv(black_box(&path)).unwrap();
            black_box(rows.len());
        })
    });
}

fn bench_demo_generation(c: &mut Criterion) {
    c.bench_function("demo_generation", |b| {
        b.iter(|| {
            let data = sample::demo_data_sized(black_box(2), black_box(30));
            black_box(data.deliveries.len());
        })
    });
}

criterion_group!(
    perf,
    bench_apply_filters,
    bench_chart_suite,
    bench_matches_csv_parse,
    bench_demo_generation
);
criterion_main!(perf);
