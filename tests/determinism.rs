use std::sync::Arc;

use platter::{
    Catalog, FilterSpec, InMemoryDraftStore, InMemoryRecipeSource, PlatterConfig, RawLocalRecipe,
    RawRemoteRecipe, RecipeId,
};

fn remote_row(recipe_id: i64, title: &str, category: &str) -> RawRemoteRecipe {
    RawRemoteRecipe {
        recipe_id,
        title: Some(title.into()),
        category: Some(category.into()),
        ..RawRemoteRecipe::default()
    }
}

fn draft(id: i64, name: &str) -> RawLocalRecipe {
    RawLocalRecipe {
        id,
        name: Some(name.into()),
        ..RawLocalRecipe::default()
    }
}

fn catalog() -> Catalog {
    let rows = vec![
        remote_row(42, "Kare-Kare", "Filipino"),
        remote_row(43, "Laing", "Filipino"),
    ];
    let drafts = vec![draft(100, "Champorado"), draft(101, "Arroz Caldo")];
    Catalog::new(
        Arc::new(InMemoryRecipeSource::with_recipes(rows)),
        Arc::new(InMemoryDraftStore::with_drafts(drafts)),
        PlatterConfig::default(),
    )
}

#[tokio::test]
async fn repeated_loads_produce_identical_snapshots() {
    let catalog = catalog();

    let first = catalog.load().await;
    let second = catalog.load().await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn merge_order_is_remote_first_then_local_in_input_order() {
    let snapshot = catalog().load().await;

    let ids: Vec<RecipeId> = snapshot.records.iter().map(|record| record.id).collect();
    assert_eq!(
        ids,
        vec![
            RecipeId::Remote(42),
            RecipeId::Remote(43),
            RecipeId::Draft(1),
            RecipeId::Draft(2),
            RecipeId::Draft(3),
            RecipeId::Draft(100),
            RecipeId::Draft(101),
        ]
    );
}

#[tokio::test]
async fn searching_never_mutates_the_snapshot() {
    let snapshot = catalog().load().await;
    let before = snapshot.records.clone();

    let spec = FilterSpec::builder()
        .category("Filipino")
        .build()
        .expect("valid spec");
    let first = snapshot.search(&spec);
    let second = snapshot.search(&spec);

    assert_eq!(first, second);
    assert_eq!(snapshot.records, before);
    assert_eq!(snapshot.categories(), snapshot.categories());
}
