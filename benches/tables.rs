#![allow(
    missing_docs,
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    clippy::similar_names
)]
use std::collections::HashMap;

use criterion::{Criterion, criterion_group, criterion_main};
use probing::{ChainingHashTable, LinearProbingHashTable};
use proptest::{
    collection::vec,
    prelude::any,
    strategy::{Strategy, ValueTree},
    test_runner::TestRunner,
};

const ITEMS_AMOUNT: usize = 1000;
const SAMPLE_SIZE: usize = 10;
// Roughly four entries per bucket
const BUCKETS: usize = 251;
// Load factor of about one half
const SLOTS: usize = 2003;

fn hash_table_benches(c: &mut Criterion) {
    let mut runner = TestRunner::default();
    let items = vec((any::<String>(), any::<String>()), ITEMS_AMOUNT)
        .new_tree(&mut runner)
        .unwrap()
        .current();

    let mut group = c.benchmark_group("Hash table comparison benchmark");
    group.sample_size(SAMPLE_SIZE);

    group.bench_function("chaining set", |b| {
        b.iter(|| {
            let mut table = ChainingHashTable::new(BUCKETS).unwrap();
            for (key, value) in &items {
                table.set(key, value);
            }
            table
        });
    });
    group.bench_function("linear probing set", |b| {
        b.iter(|| {
            let mut table = LinearProbingHashTable::new(SLOTS).unwrap();
            for (key, value) in &items {
                table.set(key, value).unwrap();
            }
            table
        });
    });
    group.bench_function("rust std insert", |b| {
        b.iter(|| {
            let mut map = HashMap::new();
            for (key, value) in &items {
                map.insert(key.clone(), value.clone());
            }
            map
        });
    });

    let mut chained = ChainingHashTable::new(BUCKETS).unwrap();
    let mut probed = LinearProbingHashTable::new(SLOTS).unwrap();
    let mut rust_map = HashMap::new();
    for (key, value) in &items {
        chained.set(key, value);
        probed.set(key, value).unwrap();
        rust_map.insert(key.clone(), value.clone());
    }

    group.bench_function("chaining get", |b| {
        b.iter(|| items.iter().filter(|(key, _)| chained.get(key).is_some()).count());
    });
    group.bench_function("linear probing get", |b| {
        b.iter(|| items.iter().filter(|(key, _)| probed.get(key).is_some()).count());
    });
    group.bench_function("rust std get", |b| {
        b.iter(|| items.iter().filter(|(key, _)| rust_map.get(key).is_some()).count());
    });

    // Tombstones on every other entry lengthen the remaining probe sequences
    for (key, _) in items.iter().step_by(2) {
        probed.delete(key);
    }
    group.bench_function("linear probing get with tombstones", |b| {
        b.iter(|| items.iter().filter(|(key, _)| probed.get(key).is_some()).count());
    });
    group.bench_function("linear probing average probe length", |b| {
        b.iter(|| probed.average_probe_sequence_length());
    });

    group.finish();
}

criterion_group!(benches, hash_table_benches);

criterion_main!(benches);
