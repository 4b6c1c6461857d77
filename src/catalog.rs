//! Catalog loading and querying.
//!
//! This is the client's home-page flow: fetch the remote rows, fold in the
//! bundled samples and local drafts, merge everything into one canonical
//! list, and answer the category and search questions a catalog page asks.
//! A remote outage is an expected state here, not an error;
//! [`Catalog::load`] always returns a snapshot, flagged with whether the
//! remote side contributed.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use merge::merge;
use normalize::{CanonicalRecipe, normalize_local, normalize_remote};
use query::{FilterSpec, categories, filter};
use store::{DraftStore, RecipeSource};

use crate::ServiceError;
use crate::config::PlatterConfig;
use crate::seed::sample_recipes;
use crate::session::Session;

/// One merged view of the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSnapshot {
    /// Canonical records, remote rows first, then uncorrelated local ones.
    pub records: Vec<CanonicalRecipe>,
    /// False when the snapshot was built from local records alone.
    pub remote_available: bool,
}

impl CatalogSnapshot {
    /// Category labels for the filter UI: the `"All"` sentinel first, then
    /// distinct cuisines in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        categories(&self.records)
    }

    /// Records matching `spec`, keeping snapshot order.
    pub fn search(&self, spec: &FilterSpec) -> Vec<CanonicalRecipe> {
        filter(&self.records, spec)
    }
}

/// A recipe owned by the signed-in user, paired with its moderation state.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnedRecipe {
    pub recipe: CanonicalRecipe,
    /// False for pending remote rows and for drafts that never reached the
    /// service.
    pub approved: bool,
}

/// The aggregation pipeline, wired to one remote source and one draft store.
pub struct Catalog {
    source: Arc<dyn RecipeSource>,
    drafts: Arc<dyn DraftStore>,
    cfg: PlatterConfig,
}

impl Catalog {
    pub fn new(
        source: Arc<dyn RecipeSource>,
        drafts: Arc<dyn DraftStore>,
        cfg: PlatterConfig,
    ) -> Self {
        Catalog {
            source,
            drafts,
            cfg,
        }
    }

    /// Build the merged catalog snapshot.
    ///
    /// Remote rows win over local copies correlated by remote id; local
    /// records without a live remote counterpart are appended in their own
    /// order. When the remote fetch fails the snapshot degrades to samples
    /// plus drafts rather than erroring.
    pub async fn load(&self) -> CatalogSnapshot {
        let start = Instant::now();

        let remote = match self.source.fetch_recipes().await {
            Ok(rows) => Some(rows),
            Err(err) => {
                warn!(error = %err, "catalog_remote_unavailable");
                None
            }
        };

        let mut local = if self.cfg.include_samples {
            sample_recipes()
        } else {
            Vec::new()
        };
        local.extend(self.drafts.read_drafts());

        let records = merge(remote.as_deref(), &local, &self.cfg.normalize);
        info!(
            total = records.len(),
            remote_available = remote.is_some(),
            elapsed_micros = start.elapsed().as_micros(),
            "catalog_load"
        );

        CatalogSnapshot {
            records,
            remote_available: remote.is_some(),
        }
    }

    /// The signed-in user's own recipes: their remote rows, each with its
    /// approval state, plus any of their local drafts that have no live
    /// remote counterpart.
    pub async fn my_recipes(&self, session: &Session) -> Result<Vec<OwnedRecipe>, ServiceError> {
        let rows = self.source.fetch_recipes_by_user(session.id).await?;
        let pushed: HashSet<i64> = rows.iter().map(|row| row.recipe_id).collect();

        let mut owned: Vec<OwnedRecipe> = rows
            .iter()
            .map(|row| OwnedRecipe {
                approved: row.approved,
                recipe: normalize_remote(row, &self.cfg.normalize),
            })
            .collect();

        for draft in self.drafts.read_drafts() {
            if draft.owner.as_deref() != Some(session.email.as_str()) {
                continue;
            }
            // A draft whose remote copy is gone (rejected or deleted) shows
            // up again as local-only.
            if draft.remote_id.is_some_and(|id| pushed.contains(&id)) {
                continue;
            }
            owned.push(OwnedRecipe {
                approved: false,
                recipe: normalize_local(&draft, &self.cfg.normalize),
            });
        }

        Ok(owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use normalize::{RawLocalRecipe, RawRemoteRecipe, RecipeId};
    use store::{InMemoryDraftStore, InMemoryRecipeSource};

    fn remote_row(recipe_id: i64, title: &str, user_id: i64, approved: bool) -> RawRemoteRecipe {
        RawRemoteRecipe {
            recipe_id,
            title: Some(title.into()),
            category: Some("Filipino".into()),
            user_id: Some(user_id),
            approved,
            ..RawRemoteRecipe::default()
        }
    }

    fn draft(id: i64, name: &str, owner: Option<&str>, remote_id: Option<i64>) -> RawLocalRecipe {
        RawLocalRecipe {
            id,
            name: Some(name.into()),
            owner: owner.map(String::from),
            remote_id,
            ..RawLocalRecipe::default()
        }
    }

    fn session() -> Session {
        Session {
            id: 7,
            nickname: "maria".into(),
            email: "maria@example.com".into(),
            is_admin: false,
        }
    }

    fn catalog_with(
        rows: Vec<RawRemoteRecipe>,
        drafts: Vec<RawLocalRecipe>,
        include_samples: bool,
    ) -> (Catalog, Arc<InMemoryRecipeSource>) {
        let source = Arc::new(InMemoryRecipeSource::with_recipes(rows));
        let store = Arc::new(InMemoryDraftStore::with_drafts(drafts));
        let cfg = PlatterConfig {
            include_samples,
            ..PlatterConfig::default()
        };
        (Catalog::new(source.clone(), store, cfg), source)
    }

    #[tokio::test]
    async fn load_merges_remote_samples_and_drafts() {
        let rows = vec![remote_row(41, "Kare-Kare", 7, true)];
        let drafts = vec![
            draft(100, "Pushed Copy", Some("maria@example.com"), Some(41)),
            draft(101, "Local Only", Some("maria@example.com"), None),
        ];
        let (catalog, _) = catalog_with(rows, drafts, true);

        let snapshot = catalog.load().await;

        assert!(snapshot.remote_available);
        // 1 remote + 3 samples + 1 uncorrelated draft; the pushed copy is
        // suppressed in favor of its remote row.
        assert_eq!(snapshot.records.len(), 5);
        assert_eq!(snapshot.records[0].id, RecipeId::Remote(41));
        assert!(
            snapshot
                .records
                .iter()
                .all(|record| record.name != "Pushed Copy")
        );
    }

    #[tokio::test]
    async fn load_survives_remote_outage() {
        let drafts = vec![draft(101, "Local Only", None, None)];
        let (catalog, source) =
            catalog_with(vec![remote_row(41, "Kare-Kare", 7, true)], drafts, true);
        source.set_offline(true);

        let snapshot = catalog.load().await;

        assert!(!snapshot.remote_available);
        assert_eq!(snapshot.records.len(), 4);
        assert!(snapshot.records.iter().all(|record| !record.is_remote()));
    }

    #[tokio::test]
    async fn samples_can_be_disabled() {
        let (catalog, _) =
            catalog_with(Vec::new(), vec![draft(9, "Only Draft", None, None)], false);

        let snapshot = catalog.load().await;

        assert_eq!(snapshot.records.len(), 1);
        assert_eq!(snapshot.records[0].name, "Only Draft");
    }

    #[tokio::test]
    async fn snapshot_answers_categories_and_search() {
        let (catalog, _) =
            catalog_with(vec![remote_row(41, "Kare-Kare", 7, true)], Vec::new(), true);

        let snapshot = catalog.load().await;

        let labels = snapshot.categories();
        assert_eq!(labels[0], "All");
        assert!(labels.contains(&"Italian".to_string()));

        let spec = FilterSpec::builder()
            .text("kare")
            .build()
            .expect("valid spec");
        let hits = snapshot.search(&spec);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Kare-Kare");
    }

    #[tokio::test]
    async fn my_recipes_pairs_rows_with_unpushed_drafts() {
        let rows = vec![
            remote_row(41, "Kare-Kare", 7, true),
            remote_row(42, "Bistek", 7, false),
            remote_row(43, "Someone Elses", 8, true),
        ];
        let drafts = vec![
            draft(100, "Pushed Copy", Some("maria@example.com"), Some(41)),
            draft(101, "Still Local", Some("maria@example.com"), None),
            draft(102, "Foreign Draft", Some("other@example.com"), None),
        ];
        let (catalog, _) = catalog_with(rows, drafts, true);

        let owned = catalog
            .my_recipes(&session())
            .await
            .expect("fetch should succeed");

        assert_eq!(owned.len(), 3);
        assert!(owned[0].approved);
        assert!(!owned[1].approved);
        assert_eq!(owned[2].recipe.name, "Still Local");
        assert!(!owned[2].approved);
    }

    #[tokio::test]
    async fn my_recipes_propagates_store_errors() {
        let (catalog, source) = catalog_with(Vec::new(), Vec::new(), false);
        source.set_offline(true);

        let result = catalog.my_recipes(&session()).await;
        assert!(matches!(result, Err(ServiceError::Store(_))));
    }
}
