//! Benchmarks for chunk generation, streaming and the player tick
//!
//! Run with: cargo bench --bench world_bench

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use tileworld::entity::InputState;
use tileworld::world::{NoiseGenerator, World, WorldGenerator};
use tileworld::{Game, GameConfig};

fn benchmark_noise(c: &mut Criterion) {
    let noise = NoiseGenerator::new(1337);

    c.bench_function("noise1d", |b| {
        let mut x = 0.0f64;
        b.iter(|| {
            x += 0.37;
            black_box(noise.noise1d(black_box(x)))
        });
    });
}

fn benchmark_single_chunk(c: &mut Criterion) {
    let generator = WorldGenerator::new(1337);

    c.bench_function("single_chunk_generation", |b| {
        let mut key = 0i32;
        b.iter(|| {
            key = key.wrapping_add(1);
            black_box(generator.generate_chunk(key))
        });
    });
}

fn benchmark_streaming(c: &mut Criterion) {
    let mut group = c.benchmark_group("streaming");
    group.throughput(Throughput::Elements(64));

    group.bench_function("walk_64_chunks", |b| {
        b.iter(|| {
            let mut world = World::new(1337, 3, 2);
            for center in 0..64 {
                black_box(world.update_streaming(center));
            }
        });
    });

    group.finish();
}

fn benchmark_player_tick(c: &mut Criterion) {
    let mut game = Game::new(GameConfig::default());
    let input = InputState {
        move_right: true,
        jump: true,
        ..Default::default()
    };

    c.bench_function("player_tick", |b| {
        b.iter(|| black_box(game.update(1.0 / 60.0, &input)));
    });
}

criterion_group!(
    benches,
    benchmark_noise,
    benchmark_single_chunk,
    benchmark_streaming,
    benchmark_player_tick
);
criterion_main!(benches);
