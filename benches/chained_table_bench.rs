use chain_table::{ChainedHashMap, ChainedHashSet};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn bench_insert_fresh_10k(c: &mut Criterion) {
    let keys: Vec<String> = lcg(1).take(10_000).map(key).collect();
    let mut group = c.benchmark_group("insert_fresh_10k");
    group.bench_function("chained", |b| {
        b.iter_batched(
            ChainedHashMap::<u64>::new,
            |mut m| {
                for (i, k) in keys.iter().enumerate() {
                    let _ = m.set(k.as_str(), i as u64).unwrap();
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
    group.bench_function("hashbrown", |b| {
        b.iter_batched(
            hashbrown::HashMap::<String, u64>::new,
            |mut m| {
                for (i, k) in keys.iter().enumerate() {
                    m.insert(k.clone(), i as u64);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_get_hit_10k(c: &mut Criterion) {
    let keys: Vec<String> = lcg(2).take(10_000).map(key).collect();
    let mut chained = ChainedHashMap::new();
    let mut baseline = hashbrown::HashMap::new();
    for (i, k) in keys.iter().enumerate() {
        chained.set(k.as_str(), i as u64).unwrap();
        baseline.insert(k.clone(), i as u64);
    }

    let mut group = c.benchmark_group("get_hit_10k");
    group.bench_function("chained", |b| {
        b.iter(|| {
            for k in &keys {
                black_box(chained.get(k));
            }
        })
    });
    group.bench_function("hashbrown", |b| {
        b.iter(|| {
            for k in &keys {
                black_box(baseline.get(k));
            }
        })
    });
    group.finish();
}

fn bench_remove_all_10k(c: &mut Criterion) {
    let keys: Vec<String> = lcg(3).take(10_000).map(key).collect();
    c.bench_function("chained::remove_all_10k", |b| {
        b.iter_batched(
            || {
                let mut m = ChainedHashMap::new();
                for k in &keys {
                    m.set(k.as_str(), ()).unwrap();
                }
                m
            },
            |mut m| {
                for k in &keys {
                    let _ = m.remove(k).unwrap();
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_set_add_duplicates(c: &mut Criterion) {
    // Small key space so most adds hit an existing value.
    let words: Vec<String> = lcg(4).take(10_000).map(|x| key(x % 512)).collect();
    c.bench_function("chained_set::add_mostly_duplicates_10k", |b| {
        b.iter_batched(
            ChainedHashSet::new,
            |mut s| {
                for w in &words {
                    let _ = s.add(w.as_str()).unwrap();
                }
                black_box(s)
            },
            BatchSize::SmallInput,
        )
    });
}

fn config() -> Criterion {
    Criterion::default()
        .warm_up_time(Duration::from_millis(500))
        .measurement_time(Duration::from_secs(3))
}

criterion_group! {
    name = benches;
    config = config();
    targets = bench_insert_fresh_10k, bench_get_hit_10k, bench_remove_all_10k, bench_set_add_duplicates
}
criterion_main!(benches);
