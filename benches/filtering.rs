use std::collections::{BTreeMap, BTreeSet};

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use errlens::dataset::{self, CohortSpec, ItemCollection, ItemStore, MetaValue, RawDataset, RawRow};

const ITEM_COUNT: usize = 10_000;

fn seeded_collection() -> ItemCollection {
    let rows = (0..ITEM_COUNT)
        .map(|i| RawRow {
            true_y: "cat".to_string(),
            objects: vec!["object".to_string()],
            metadata: BTreeMap::from([
                (
                    "caption".to_string(),
                    MetaValue::Text(format!("sample image number {i}")),
                ),
                ("score".to_string(), MetaValue::Number(i as f64 / 100.0)),
            ]),
        })
        .collect();
    let predictions = (0..ITEM_COUNT)
        .map(|i| if i % 3 == 0 { "dog" } else { "cat" }.to_string())
        .collect::<Vec<_>>();
    ItemStore::load(Some(&RawDataset { rows }), &predictions)
        .collection()
        .clone()
}

fn half_cohort() -> CohortSpec {
    CohortSpec::new("first half", (0..ITEM_COUNT / 2).collect::<BTreeSet<_>>())
}

fn bench_cohort_filter(c: &mut Criterion) {
    let collection = seeded_collection();
    let cohort = half_cohort();
    c.bench_with_input(
        BenchmarkId::new("cohort_filter", ITEM_COUNT),
        &collection,
        |b, collection| {
            b.iter(|| dataset::filter::apply_cohort(black_box(collection), &cohort, ""));
        },
    );
}

fn bench_cohort_filter_with_search(c: &mut Criterion) {
    let collection = seeded_collection();
    let cohort = half_cohort();
    c.bench_with_input(
        BenchmarkId::new("cohort_filter_with_search", ITEM_COUNT),
        &collection,
        |b, collection| {
            b.iter(|| dataset::filter::apply_cohort(black_box(collection), &cohort, "number 42"));
        },
    );
}

criterion_group!(benches, bench_cohort_filter, bench_cohort_filter_with_search);
criterion_main!(benches);
