use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use platter::{
    FilterSpec, NormalizeConfig, RawIngredient, RawLocalRecipe, RawRemoteRecipe, categories,
    filter, merge,
};

const CUISINES: [&str; 5] = ["Filipino", "Italian", "Mexican", "Japanese", "Indian"];

fn remote_rows(n: usize) -> Vec<RawRemoteRecipe> {
    (0..n)
        .map(|i| RawRemoteRecipe {
            recipe_id: i as i64 + 1,
            title: Some(format!("Remote Dish {i}")),
            description: Some("A reliable weeknight dinner with plenty of leftovers.".into()),
            steps: Some("Prep everything, cook in one pan, season to taste.".into()),
            ingredients: Some(r#"["Garlic","Onion","Soy sauce"]"#.into()),
            category: Some(CUISINES[i % CUISINES.len()].into()),
            user_id: Some((i % 17) as i64 + 1),
            cook_time_minutes: Some(20 + (i % 40) as u32),
            estimated_price: (i % 3 != 0).then(|| 60.0 + (i % 200) as f64),
            ..RawRemoteRecipe::default()
        })
        .collect()
}

fn local_drafts(n: usize) -> Vec<RawLocalRecipe> {
    (0..n)
        .map(|i| RawLocalRecipe {
            id: 10_000 + i as i64,
            name: Some(format!("Draft Dish {i}")),
            ingredients: vec![
                RawIngredient::Name("Rice".into()),
                RawIngredient::Name("Egg".into()),
            ],
            cuisine: Some(CUISINES[(i + 2) % CUISINES.len()].into()),
            // Every fourth draft correlates with a remote row, exercising
            // the de-dup path.
            remote_id: (i % 4 == 0).then(|| (i / 4) as i64 + 1),
            estimated_price: Some(45.0 + i as f64),
            ..RawLocalRecipe::default()
        })
        .collect()
}

fn merge_bench(c: &mut Criterion) {
    let cfg = NormalizeConfig::default();
    let remote = remote_rows(1_000);
    let local = local_drafts(250);

    c.bench_function("merge_1000_remote_250_local", |b| {
        b.iter(|| {
            let records = merge(black_box(Some(remote.as_slice())), black_box(&local), &cfg);
            black_box(records);
        });
    });
}

fn filter_bench(c: &mut Criterion) {
    let cfg = NormalizeConfig::default();
    let remote = remote_rows(1_000);
    let local = local_drafts(250);
    let records = merge(Some(remote.as_slice()), &local, &cfg);
    let spec = FilterSpec::builder()
        .text("dish")
        .category("Filipino")
        .min_price(50.0)
        .max_price(200.0)
        .build()
        .expect("valid bench spec");

    c.bench_function("filter_merged_catalog", |b| {
        b.iter(|| {
            let hits = filter(black_box(&records), black_box(&spec));
            black_box(hits);
        });
    });
}

fn categories_bench(c: &mut Criterion) {
    let cfg = NormalizeConfig::default();
    let remote = remote_rows(1_000);
    let local = local_drafts(250);
    let records = merge(Some(remote.as_slice()), &local, &cfg);

    c.bench_function("categories_merged_catalog", |b| {
        b.iter(|| {
            let labels = categories(black_box(&records));
            black_box(labels);
        });
    });
}

criterion_group!(pipeline_benches, merge_bench, filter_bench, categories_bench);
criterion_main!(pipeline_benches);
