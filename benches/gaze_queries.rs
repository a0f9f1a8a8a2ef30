use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gaze_fade::gaze::{is_facing_position, is_within_view};
use gaze_fade::{create_ring_scene, Camera, Stage};
use glam::Vec3;
use std::f32::consts::PI;

/// Deterministic spread of points around the camera
fn scattered_point(seed: u32) -> Vec3 {
    let theta = (seed as f32 * 0.123456) % (2.0 * PI);
    let phi = (seed as f32 * 0.789012) % PI;
    let r = 1.0 + (seed % 50) as f32;
    Vec3::new(
        r * phi.sin() * theta.cos(),
        r * phi.sin() * theta.sin(),
        r * phi.cos(),
    )
}

fn bench_is_facing_position(c: &mut Criterion) {
    let camera = Camera::new(Vec3::new(0.0, 1.6, 0.0), 0.3, -0.1);
    let target = Vec3::new(1.0, 1.5, 8.0);

    c.bench_function("is_facing_position", |b| {
        b.iter(|| black_box(is_facing_position(&camera, black_box(target), black_box(5.0))))
    });
}

fn bench_is_within_view_scattered(c: &mut Criterion) {
    let camera = Camera::default();
    let points: Vec<Vec3> = (0..1000).map(scattered_point).collect();

    c.bench_function("is_within_view_1000_points", |b| {
        b.iter(|| {
            points
                .iter()
                .filter(|p| is_within_view(&camera, black_box(**p)))
                .count()
        })
    });
}

fn bench_stage_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("stage_tick");

    for count in [10u32, 100, 1000].iter() {
        group.bench_with_input(BenchmarkId::new("labels", count), count, |b, &count| {
            let mut stage = Stage::new(create_ring_scene(count, 10.0)).unwrap();
            b.iter(|| {
                stage.camera.turn(0.01);
                black_box(stage.tick(black_box(1.0 / 60.0)))
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_is_facing_position,
    bench_is_within_view_scattered,
    bench_stage_tick,
);
criterion_main!(benches);
