//! SvgKit benchmarks
//!
//! Run with: cargo bench -p svgkit-bench

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use svgkit_animation::FrameEvaluator;
use svgkit_bench::{path_data, standard_fixtures, stylesheet};
use svgkit_css::Stylesheet;
use svgkit_geometry::{GeometryCache, PathMeasure};
use svgkit_path::parse_path;
use svgkit_scene::SvgDocument;

fn path_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("path");

    for segments in [10, 100, 1000] {
        let d = path_data(segments);
        group.throughput(Throughput::Bytes(d.len() as u64));
        group.bench_with_input(BenchmarkId::new("parse", segments), &d, |b, d| {
            b.iter(|| parse_path(d))
        });

        let commands = parse_path(&d);
        group.bench_with_input(BenchmarkId::new("measure", segments), &commands, |b, commands| {
            b.iter(|| PathMeasure::from_commands(commands).length())
        });
    }

    group.finish();
}

fn css_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("css");

    for rules in [10, 100, 500] {
        let css = stylesheet(rules);
        group.throughput(Throughput::Bytes(css.len() as u64));
        group.bench_with_input(BenchmarkId::new("parse", rules), &css, |b, css| {
            b.iter(|| Stylesheet::parse(css))
        });
    }

    group.finish();
}

fn document_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("document");

    for fixture in standard_fixtures() {
        group.throughput(Throughput::Bytes(fixture.svg.len() as u64));
        group.bench_with_input(BenchmarkId::new("parse", fixture.name), &fixture.svg, |b, svg| {
            b.iter(|| SvgDocument::parse(svg))
        });
    }

    group.finish();
}

fn animation_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("animation");

    for fixture in standard_fixtures() {
        let Ok(doc) = SvgDocument::parse(&fixture.svg) else {
            continue;
        };

        group.bench_function(BenchmarkId::new("geometry_cache", fixture.name), |b| {
            b.iter(|| GeometryCache::from_document(&doc).len())
        });

        let evaluator = FrameEvaluator::new(&doc);
        group.bench_function(BenchmarkId::new("frame", fixture.name), |b| {
            let mut elapsed = 0;
            b.iter(|| {
                elapsed += 16;
                evaluator.frame_at_elapsed(elapsed).values.len()
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    path_benchmarks,
    css_benchmarks,
    document_benchmarks,
    animation_benchmarks,
);

criterion_main!(benches);
