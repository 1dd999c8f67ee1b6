use criterion::{black_box, criterion_group, criterion_main, Criterion};

use flashdrill_core::engine::{select_weighted, EngineConfig, LearningSession};
use flashdrill_core::model::{Assessment, RawWordRecord, WordEntry};
use flashdrill_core::pool::WordPool;
use flashdrill_core::statistics::aggregate;

fn make_entries(n: usize) -> Vec<WordEntry> {
    (0..n)
        .map(|i| {
            let mut e = WordEntry::new(format!("word-{i}"), "n.", vec!["meaning".into()]);
            e.weight = 0.05 + (i % 7) as f64 * 0.5;
            e.occurrences = (i % 4) as u32;
            e.accumulated_weight = e.occurrences as f64 * e.weight;
            e
        })
        .collect()
}

fn bench_select_weighted(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_weighted");

    for n in [10, 1_000, 10_000] {
        let entries = make_entries(n);
        let total: f64 = entries
            .iter()
            .filter(|e| e.is_eligible(0.1))
            .map(|e| e.weight)
            .sum();
        group.bench_function(format!("n={n}"), |b| {
            b.iter(|| select_weighted(black_box(&entries), 0.1, black_box(total * 0.73)))
        });
    }

    group.finish();
}

fn bench_full_session(c: &mut Criterion) {
    let mut group = c.benchmark_group("session");

    group.bench_function("500 words, all known", |b| {
        let records: Vec<RawWordRecord> = (0..500)
            .map(|i| RawWordRecord::new(&format!("word-{i}"), "n.", &["meaning"]))
            .collect();
        b.iter(|| {
            let pool = WordPool::from_records(records.clone()).unwrap();
            let mut session = LearningSession::seeded(pool, EngineConfig::default(), Some(1));
            let mut next = session.start().unwrap().is_some();
            while next {
                next = session.assess(Assessment::Known).unwrap().is_some();
            }
            black_box(session.results().unwrap().len())
        })
    });

    group.finish();
}

fn bench_aggregate(c: &mut Criterion) {
    let entries = make_entries(10_000);
    c.bench_function("aggregate n=10000", |b| {
        b.iter(|| aggregate(black_box(&entries)))
    });
}

criterion_group!(
    benches,
    bench_select_weighted,
    bench_full_session,
    bench_aggregate
);
criterion_main!(benches);
