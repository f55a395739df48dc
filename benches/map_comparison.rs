use alloc::format;
use core::hash::Hash;
use core::hint::black_box;

use criterion::AxisScale;
use criterion::BatchSize;
use criterion::Criterion;
use criterion::PlotConfiguration;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use probe_hash::HashMap as ProbeHashMap;
use rand::SeedableRng;
use rand::TryRngCore;
use rand::rngs::OsRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

extern crate alloc;

trait BenchKey: Clone + Hash + Eq {
    fn new(key: u64) -> Self;
}

impl BenchKey for u64 {
    fn new(key: u64) -> Self {
        black_box(key)
    }
}

impl BenchKey for String {
    fn new(key: u64) -> Self {
        black_box(format!("key_{:016X}", key))
    }
}

const SIZES: &[usize] = &[(1 << 10), (1 << 12), (1 << 14)];

fn random_keys<K: BenchKey>(count: usize) -> Vec<K> {
    let mut rng = OsRng;
    (0..count)
        .map(|_| K::new(rng.try_next_u64().unwrap()))
        .collect()
}

fn bench_insert<K: BenchKey>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("insert_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES {
        let keys = random_keys::<K>(*size);
        group.throughput(Throughput::Elements(*size as u64));

        group.bench_function(format!("probe_hash/{size}"), |b| {
            b.iter_batched(
                || {
                    let mut keys = keys.clone();
                    keys.shuffle(&mut SmallRng::from_os_rng());
                    keys
                },
                |keys| {
                    let mut map: ProbeHashMap<K, u64> = ProbeHashMap::new().unwrap();
                    for (i, key) in keys.into_iter().enumerate() {
                        black_box(map.insert(key, i as u64).unwrap());
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter_batched(
                || {
                    let mut keys = keys.clone();
                    keys.shuffle(&mut SmallRng::from_os_rng());
                    keys
                },
                |keys| {
                    let mut map = hashbrown::HashMap::new();
                    for (i, key) in keys.into_iter().enumerate() {
                        black_box(map.insert(key, i as u64));
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("std/{size}"), |b| {
            b.iter_batched(
                || {
                    let mut keys = keys.clone();
                    keys.shuffle(&mut SmallRng::from_os_rng());
                    keys
                },
                |keys| {
                    let mut map = std::collections::HashMap::new();
                    for (i, key) in keys.into_iter().enumerate() {
                        black_box(map.insert(key, i as u64));
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_find_hit<K: BenchKey>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("find_hit_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES {
        let keys = random_keys::<K>(*size);

        let mut probe_map: ProbeHashMap<K, u64> = ProbeHashMap::new().unwrap();
        let mut brown_map = hashbrown::HashMap::new();
        let mut std_map = std::collections::HashMap::new();
        for (i, key) in keys.iter().enumerate() {
            probe_map.insert(key.clone(), i as u64).unwrap();
            brown_map.insert(key.clone(), i as u64);
            std_map.insert(key.clone(), i as u64);
        }

        group.throughput(Throughput::Elements(*size as u64));

        group.bench_function(format!("probe_hash/{size}"), |b| {
            b.iter_batched(
                || {
                    let mut keys = keys.clone();
                    keys.shuffle(&mut SmallRng::from_os_rng());
                    keys
                },
                |keys| {
                    for key in &keys {
                        black_box(probe_map.get(key));
                    }
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter_batched(
                || {
                    let mut keys = keys.clone();
                    keys.shuffle(&mut SmallRng::from_os_rng());
                    keys
                },
                |keys| {
                    for key in &keys {
                        black_box(brown_map.get(key));
                    }
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("std/{size}"), |b| {
            b.iter_batched(
                || {
                    let mut keys = keys.clone();
                    keys.shuffle(&mut SmallRng::from_os_rng());
                    keys
                },
                |keys| {
                    for key in &keys {
                        black_box(std_map.get(key));
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_remove<K: BenchKey>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("remove_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES {
        let keys = random_keys::<K>(*size);

        let mut probe_map: ProbeHashMap<K, u64> = ProbeHashMap::new().unwrap();
        let mut brown_map = hashbrown::HashMap::new();
        let mut std_map = std::collections::HashMap::new();
        for (i, key) in keys.iter().enumerate() {
            probe_map.insert(key.clone(), i as u64).unwrap();
            brown_map.insert(key.clone(), i as u64);
            std_map.insert(key.clone(), i as u64);
        }

        group.throughput(Throughput::Elements(*size as u64));

        group.bench_function(format!("probe_hash/{size}"), |b| {
            b.iter_batched(
                || {
                    let mut keys = keys.clone();
                    keys.shuffle(&mut SmallRng::from_os_rng());
                    (probe_map.clone(), keys)
                },
                |(mut map, keys)| {
                    for key in &keys {
                        black_box(map.remove(key));
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter_batched(
                || {
                    let mut keys = keys.clone();
                    keys.shuffle(&mut SmallRng::from_os_rng());
                    (brown_map.clone(), keys)
                },
                |(mut map, keys)| {
                    for key in &keys {
                        black_box(map.remove(key));
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("std/{size}"), |b| {
            b.iter_batched(
                || {
                    let mut keys = keys.clone();
                    keys.shuffle(&mut SmallRng::from_os_rng());
                    (std_map.clone(), keys)
                },
                |(mut map, keys)| {
                    for key in &keys {
                        black_box(map.remove(key));
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_insert::<u64>,
    bench_insert::<String>,
    bench_find_hit::<u64>,
    bench_find_hit::<String>,
    bench_remove::<u64>,
    bench_remove::<String>,
);

criterion_main!(benches);
