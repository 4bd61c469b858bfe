//! Benchmarks for the generational arena

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use dockforge_core::alloc::{Arena, HashMap};

#[derive(Clone, Copy, Debug, Default)]
struct NodeData {
    rect: (f32, f32, f32, f32),
    size_hint: f32,
    flags: u32,
}

fn bench_arena_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("arena_insert");

    for size in [10, 100, 1000, 10000] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let mut arena = Arena::new();
                for _ in 0..size {
                    arena.insert(black_box(NodeData::default()));
                }
                arena
            });
        });
    }

    group.finish();
}

fn bench_arena_vs_hashmap_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("arena_lookup");
    let size = 1000;

    let mut arena = Arena::new();
    let handles: Vec<_> = (0..size).map(|_| arena.insert(NodeData::default())).collect();

    let mut map = HashMap::new();
    for i in 0..size {
        map.insert(i, NodeData::default());
    }

    group.bench_function("arena", |b| {
        b.iter(|| {
            let mut total = 0.0;
            for handle in &handles {
                if let Some(node) = arena.get(*handle) {
                    total += node.size_hint;
                }
            }
            black_box(total)
        });
    });

    group.bench_function("hashmap", |b| {
        b.iter(|| {
            let mut total = 0.0;
            for i in 0..size {
                if let Some(node) = map.get(&i) {
                    total += node.size_hint;
                }
            }
            black_box(total)
        });
    });

    group.finish();
}

fn bench_arena_churn(c: &mut Criterion) {
    c.bench_function("arena_churn", |b| {
        b.iter(|| {
            let mut arena = Arena::new();
            let mut live = Vec::with_capacity(256);
            for i in 0..1024u32 {
                live.push(arena.insert(NodeData {
                    flags: i,
                    ..Default::default()
                }));
                if i % 3 == 0 {
                    let handle = live.swap_remove((i as usize * 7) % live.len());
                    arena.remove(handle);
                }
            }
            black_box(arena.len())
        });
    });
}

criterion_group!(
    benches,
    bench_arena_insert,
    bench_arena_vs_hashmap_lookup,
    bench_arena_churn
);
criterion_main!(benches);
