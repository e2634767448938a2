use criterion::{
    BenchmarkId, Criterion, black_box, criterion_group, criterion_main,
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use shadowcast::{FovConfig, Grid, Position, ScanMode};

fn open_room(size: usize) -> Grid {
    let mut text = String::new();
    for y in 0..size {
        for x in 0..size {
            let edge = x == 0 || y == 0 || x == size - 1 || y == size - 1;
            text.push(if edge { '#' } else { '.' });
        }
        text.push('\n');
    }
    Grid::from_text(&text).unwrap()
}

fn cave(size: usize) -> Grid {
    let mut rng = StdRng::seed_from_u64(0);
    let mut text = String::new();
    for _ in 0..size {
        for _ in 0..size {
            text.push(if rng.gen_bool(0.15) { '#' } else { '.' });
        }
        text.push('\n');
    }
    Grid::from_text(&text).unwrap()
}

pub fn room_size_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("fov vs room size (open room)");
    for size in [16, 32, 64, 128, 256] {
        let grid = open_room(size);
        let center = Position::new(size as i32 / 2, size as i32 / 2);
        for mode in [ScanMode::Recursive, ScanMode::Worklist] {
            let cfg = FovConfig {
                mode,
                ..FovConfig::default()
            };
            group.bench_function(
                BenchmarkId::new(mode.to_string(), size),
                |b| b.iter(|| black_box(grid.fov(center, &cfg).unwrap())),
            );
        }
    }
}

pub fn cave_radius_sweep(c: &mut Criterion) {
    let grid = cave(256);
    let center = Position::new(128, 128);
    let mut group = c.benchmark_group("fov vs radius (random cave)");
    for radius in [4, 8, 16, 32, 64] {
        let cfg = FovConfig {
            radius: Some(radius),
            ..FovConfig::default()
        };
        group.bench_function(BenchmarkId::new("recursive", radius), |b| {
            b.iter(|| black_box(grid.fov(center, &cfg).unwrap()))
        });
    }
}

criterion_group!(benches, room_size_sweep, cave_radius_sweep);
criterion_main!(benches);
