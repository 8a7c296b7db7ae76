//! Benchmarks for the per-tick hot paths: recipient filtering, trail
//! stepping and full batch emission.
//!
//! TARGET: a 500-player world filtered well under 10µs
//!
//! Run with: cargo bench --package volley_networking --bench broadcast_benchmark

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use volley_compat::CompatibilityAccessor;
use volley_networking::{filter_within, trail, EffectsConfig, Emitter, MockEffectHost, Recipient};
use volley_shared::{
    BulletTrail, Color, DustOptions, EffectDescriptor, EyeLocation, ParticleKind, Recoil, SoundPacket, Vec3,
};

fn recipients(count: usize) -> Vec<Recipient> {
    (0..count)
        .map(|i| {
            let ring = (i % 50) as f64 * 4.0;
            let angle = i as f64 * 0.37;
            Recipient::new(i as u64, Vec3::new(ring * angle.cos(), 64.0, ring * angle.sin()))
        })
        .collect()
}

fn sample_trail(length: f64) -> BulletTrail {
    BulletTrail {
        world: 0,
        particle: ParticleKind::Dust,
        dust: Some(DustOptions::new(Color::WHITE, 0.5)),
        start: Vec3::ZERO,
        direction: Vec3::new(1.0, 0.0, 0.0),
        length,
        net_distance: 0.0,
        min_distance: 0.0,
        spacing: 0.25,
        force: false,
    }
}

fn benchmark_filter_500(c: &mut Criterion) {
    let players = recipients(500);

    let mut group = c.benchmark_group("filter_within");
    group.throughput(Throughput::Elements(500));

    group.bench_function("500_recipients_radius_64", |b| {
        b.iter(|| black_box(filter_within(black_box(&players), Vec3::ZERO, 64.0).count()));
    });

    group.finish();
}

fn benchmark_trail_step(c: &mut Criterion) {
    let short = sample_trail(8.0);
    let long = sample_trail(120.0);

    c.bench_function("trail_step_32_points", |b| {
        b.iter(|| black_box(trail::step(black_box(&short)).count()));
    });

    c.bench_function("trail_step_480_points", |b| {
        b.iter(|| black_box(trail::step(black_box(&long)).count()));
    });
}

fn benchmark_emit_batch(c: &mut Criterion) {
    let host = Arc::new(MockEffectHost::new());
    let eye = EyeLocation { position: Vec3::ZERO, yaw: 0.0, pitch: 0.0 };
    host.add_player(0, 1, eye, 0);

    let accessor: &'static CompatibilityAccessor = Box::leak(Box::new(CompatibilityAccessor::new()));
    let emitter = Emitter::new(Arc::clone(&host), EffectsConfig::default())
        .with_accessor(accessor)
        .with_seed(7);

    let batch: Vec<EffectDescriptor> = vec![
        sample_trail(20.0).into(),
        SoundPacket {
            sound: "custom.rifle.shoot".to_owned(),
            world: 0,
            position: Vec3::ZERO,
            volume: 1.0,
            pitch: 1.0,
        }
        .into(),
        Recoil { client: 1, horizontal: 0.5, vertical: -1.0 }.into(),
    ];

    c.bench_function("emit_shot_batch", |b| {
        b.iter(|| {
            let report = emitter.emit_batch(black_box(&batch));
            host.clear_calls();
            black_box(report)
        });
    });
}

criterion_group!(benches, benchmark_filter_500, benchmark_trail_step, benchmark_emit_batch);
criterion_main!(benches);
