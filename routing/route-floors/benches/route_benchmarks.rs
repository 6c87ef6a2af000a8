//! Benchmarks for multi-floor routing.
//!
//! Run with: cargo bench -p route-floors
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p route-floors -- --save-baseline main
//! 2. After changes: cargo bench -p route-floors -- --baseline main

#![allow(missing_docs, clippy::unwrap_used, clippy::cast_possible_truncation)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use curve_types::SplineKind;
use nalgebra::Point3;
use route_floors::{CurveConfig, FloorGrids, FloorRouter, RouteCurve, Sampling};
use route_raster::Rasterizer;
use route_types::{Building, GridConfig, RouteRequest, RoutingConfig};

// =============================================================================
// Venue Setup
// =============================================================================

fn venue() -> Building {
    serde_json::from_str(include_str!("../tests/fixtures/venue.json")).unwrap()
}

/// Lounge on floor 1 to Main Stage on floor 1.
fn same_floor_request() -> RouteRequest {
    RouteRequest::on_floor(
        Point3::new(-20.0, 0.0, -20.0),
        Point3::new(20.0, 0.0, 20.0),
        1,
    )
}

/// Lounge on floor 1 to Innovation Lab on floor 3.
fn three_floor_request() -> RouteRequest {
    RouteRequest::new(
        Point3::new(-20.0, 0.0, -20.0),
        1,
        Point3::new(0.0, 20.0, 0.0),
        3,
    )
}

// =============================================================================
// Rasterization Benchmarks
// =============================================================================

fn bench_rasterize(c: &mut Criterion) {
    let mut group = c.benchmark_group("rasterize");
    let building = venue();

    for cell_size in [4.0, 2.0, 1.0, 0.5] {
        let config = RoutingConfig::new().with_grid(GridConfig::new().with_cell_size(cell_size));
        let rasterizer = Rasterizer::from_config(&config).unwrap();
        let cells = rasterizer.frame().cell_count();

        group.throughput(Throughput::Elements(cells as u64));
        group.bench_with_input(
            BenchmarkId::new("floor_1", cells),
            &rasterizer,
            |b, rasterizer| b.iter(|| rasterizer.rasterize(black_box(&building), 1)),
        );
        group.bench_with_input(
            BenchmarkId::new("all_floors", cells),
            &rasterizer,
            |b, rasterizer| b.iter(|| FloorGrids::build(black_box(&building), rasterizer)),
        );
    }

    group.finish();
}

// =============================================================================
// Routing Benchmarks
// =============================================================================

fn bench_route(c: &mut Criterion) {
    let mut group = c.benchmark_group("route");

    let fresh = FloorRouter::with_defaults(venue()).unwrap();
    let cached = FloorRouter::with_defaults(venue()).unwrap().precomputed();

    for (name, request) in [
        ("same_floor", same_floor_request()),
        ("three_floors", three_floor_request()),
    ] {
        group.bench_with_input(BenchmarkId::new("fresh", name), &request, |b, request| {
            b.iter(|| fresh.route(black_box(request)))
        });
        group.bench_with_input(BenchmarkId::new("precomputed", name), &request, |b, request| {
            b.iter(|| cached.route(black_box(request)))
        });
    }

    group.finish();
}

fn bench_route_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("route_batch");
    let router = FloorRouter::with_defaults(venue()).unwrap().precomputed();

    for size in [4usize, 16, 64] {
        let requests: Vec<_> = (0..size)
            .map(|i| {
                if i % 2 == 0 {
                    same_floor_request()
                } else {
                    three_floor_request()
                }
            })
            .collect();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &requests, |b, requests| {
            b.iter(|| router.route_batch(black_box(requests)))
        });
    }

    group.finish();
}

// =============================================================================
// Curve Benchmarks
// =============================================================================

fn bench_curve(c: &mut Criterion) {
    let mut group = c.benchmark_group("curve");

    let router = FloorRouter::with_defaults(venue()).unwrap();
    let route = router.route(&three_floor_request()).unwrap();
    let waypoints = route.waypoints();

    let configs = [
        ("uniform", CurveConfig::default()),
        ("centripetal", CurveConfig::new().with_kind(SplineKind::Centripetal)),
        (
            "arc_length",
            CurveConfig::new()
                .with_kind(SplineKind::Centripetal)
                .with_sampling(Sampling::ArcLength),
        ),
    ];

    for (name, config) in configs {
        group.bench_with_input(BenchmarkId::new("build", name), &config, |b, config| {
            b.iter(|| RouteCurve::build(black_box(waypoints), config))
        });
    }

    group.finish();
}

// =============================================================================
// Criterion Setup
// =============================================================================

criterion_group!(
    benches,
    bench_rasterize,
    bench_route,
    bench_route_batch,
    bench_curve,
);

criterion_main!(benches);
