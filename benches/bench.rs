use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use trinary::tree::{Key, Tree};

/// Builds a tree from `size` distinct keys inserted in shuffled order,
/// with every fourth key inserted a second time so duplicate chains stay
/// in play. Shuffling keeps the unbalanced tree's height realistic.
fn shuffled_tree(size: usize) -> Tree {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut keys: Vec<Key> = (0..size as Key).collect();
    keys.extend((0..size as Key).step_by(4));
    keys.shuffle(&mut rng);

    let mut tree = Tree::new();
    for key in keys {
        tree.insert(key);
    }
    tree
}

/// Helper to bench a function on a trinary tree.
/// It creates a group for the given name and closure and runs tests for
/// various tree sizes before finishing the group.
fn bench_helper(c: &mut Criterion, name: &str, f: impl Fn(&mut Tree, Key)) {
    let mut group = c.benchmark_group(name);

    for size in [1 << 3, 1 << 7, 1 << 11, 1 << 15] {
        let tree = shuffled_tree(size);
        let probe = (size / 2) as Key;
        let id = BenchmarkId::new("shuffled", size);

        group.bench_function(id, |b| {
            b.iter_custom(|iters| {
                let mut time = std::time::Duration::ZERO;
                for _ in 0..iters {
                    let mut tree = black_box(tree.clone());
                    let instant = std::time::Instant::now();
                    f(&mut tree, black_box(probe));
                    time += instant.elapsed();
                }
                time
            })
        });
    }

    group.finish();
}

pub fn criterion_benchmark(c: &mut Criterion) {
    bench_helper(c, "insert", |tree, key| {
        tree.insert(key);
    });
    bench_helper(c, "delete", |tree, key| {
        tree.delete(key);
    });
    bench_helper(c, "delete-miss", |tree, key| {
        tree.delete(-key - 1);
    });
    bench_helper(c, "contains", |tree, key| {
        let _found = black_box(tree.contains(key));
    });
    bench_helper(c, "traverse", |tree, _key| {
        let _visited = black_box(tree.levels().count());
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
