use bucket_table::{DefaultHashTraits, DefaultKeyTraits, HashTable, Keyed, SlotList};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::rc::Rc;
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

struct Record {
    id: u64,
}

impl Keyed for Record {
    type Key = u64;
    fn key(&self) -> u64 {
        self.id
    }
}

// 389 buckets: enough spread that 10k entries keep short chains while
// collisions still occur.
type Table =
    HashTable<Rc<Record>, DefaultKeyTraits, DefaultHashTraits, SlotList<Rc<Record>>, 389>;

fn bench_insert(c: &mut Criterion) {
    c.bench_function("bucket_table_insert_10k", |b| {
        b.iter_batched(
            Table::new,
            |mut t| {
                for x in lcg(1).take(10_000) {
                    t.insert(Rc::new(Record { id: x }));
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_find_hit(c: &mut Criterion) {
    c.bench_function("bucket_table_find_hit", |b| {
        let mut t = Table::new();
        let keys: Vec<u64> = lcg(7).take(10_000).collect();
        for &x in &keys {
            t.insert(Rc::new(Record { id: x }));
        }
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(t.find(k));
        })
    });
}

fn bench_find_miss(c: &mut Criterion) {
    c.bench_function("bucket_table_find_miss", |b| {
        let mut t = Table::new();
        for x in lcg(11).take(10_000) {
            t.insert(Rc::new(Record { id: x }));
        }
        let mut miss = lcg(0xdead_beef);
        b.iter(|| {
            // keys unlikely to be in the table
            let k = miss.next().unwrap();
            black_box(t.find(&k));
        })
    });
}

fn bench_erase_insert_cycle(c: &mut Criterion) {
    c.bench_function("bucket_table_erase_insert", |b| {
        let mut t = Table::new();
        let keys: Vec<u64> = lcg(23).take(10_000).collect();
        for &x in &keys {
            t.insert(Rc::new(Record { id: x }));
        }
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            if let Some(rec) = t.erase(k) {
                t.insert(rec);
            }
        })
    });
}

fn bench_iterate(c: &mut Criterion) {
    c.bench_function("bucket_table_iter_10k", |b| {
        let mut t = Table::new();
        for x in lcg(31).take(10_000) {
            t.insert(Rc::new(Record { id: x }));
        }
        b.iter(|| {
            let mut acc = 0u64;
            for p in t.iter() {
                acc = acc.wrapping_add(p.id);
            }
            black_box(acc)
        })
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_insert, bench_find_hit, bench_find_miss, bench_erase_insert_cycle, bench_iterate
}
criterion_main!(benches);
