//! Catalog demo binary.
//!
//! Loads the merged catalog from the configured service and draft file, then
//! prints the category labels and the records matching an optional search
//! term given as the first argument.

use std::error::Error;
use std::sync::Arc;

use platter::{Catalog, FilterSpec, HttpRecipeSource, JsonDraftStore, PlatterConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();

    let env_filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| "platter=debug,info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let mut cfg = match std::env::var("PLATTER_CONFIG") {
        Ok(path) => PlatterConfig::from_file(path)?,
        Err(_) => PlatterConfig::default(),
    };
    cfg.apply_env();

    let source = Arc::new(HttpRecipeSource::new(cfg.http.clone()));
    let drafts = Arc::new(JsonDraftStore::new(&cfg.drafts_path));
    let catalog = Catalog::new(source, drafts, cfg);

    let snapshot = catalog.load().await;
    if !snapshot.remote_available {
        eprintln!("warning: recipe service unreachable, showing local records only");
    }

    println!("categories: {}", snapshot.categories().join(", "));

    let spec = match std::env::args().nth(1) {
        Some(term) => FilterSpec::builder().text(term).build()?,
        None => FilterSpec::unrestricted(),
    };

    let hits = snapshot.search(&spec);
    println!("{} of {} recipes:", hits.len(), snapshot.records.len());
    for record in &hits {
        let price = record
            .estimated_price
            .map(|p| format!(" at ₱{p:.2}"))
            .unwrap_or_default();
        println!("  {} [{}]{}", record.name, record.cuisine, price);
    }

    Ok(())
}
