//! Platter Merge Layer
//!
//! Combines the two recipe sources into one canonical list. The remote store
//! is authoritative; the local draft store exists to survive remote outages
//! and to hold drafts that have not been pushed yet.
//!
//! ## Precedence rules
//!
//! - Remote rows are emitted first, in store order, all of them.
//! - A local draft whose `remote_id` matches a fetched remote row is
//!   suppressed: the remote copy is the newer truth, the draft is only its
//!   offline shadow.
//! - Drafts without a correlation id (never pushed) and drafts whose remote
//!   counterpart was not returned are emitted after the remote rows.
//!
//! ## Degraded mode
//!
//! When the remote store is unreachable the caller passes `None` and the
//! merged result is exactly the normalized local list. The user keeps seeing
//! their own drafts instead of an error state; consistency is traded for
//! availability.
//!
//! ## Example
//!
//! ```
//! use merge::merge;
//! use normalize::{NormalizeConfig, RawLocalRecipe, RawRemoteRecipe, RecipeId};
//!
//! let cfg = NormalizeConfig::default();
//! let remote = vec![RawRemoteRecipe {
//!     recipe_id: 42,
//!     title: Some("Adobo".into()),
//!     ..RawRemoteRecipe::default()
//! }];
//! let local = vec![
//!     // Already pushed as row 42: suppressed by the merge.
//!     RawLocalRecipe { id: 1, remote_id: Some(42), ..RawLocalRecipe::default() },
//!     // Never pushed: kept, after the remote rows.
//!     RawLocalRecipe { id: 2, name: Some("Draft stew".into()), ..RawLocalRecipe::default() },
//! ];
//!
//! let merged = merge(Some(&remote), &local, &cfg);
//! assert_eq!(merged.len(), 2);
//! assert_eq!(merged[0].id, RecipeId::Remote(42));
//! assert_eq!(merged[1].id, RecipeId::Draft(2));
//! ```
use std::collections::HashSet;
use std::time::Instant;

use tracing::{info, warn};

use normalize::{normalize_local, normalize_remote, CanonicalRecipe, NormalizeConfig};
use normalize::{RawLocalRecipe, RawRemoteRecipe};

/// Merge the two source lists into one de-duplicated canonical list.
///
/// `remote` is `Some(rows)` when the remote fetch succeeded (an empty list is
/// a successful fetch of an empty catalog) and `None` when the store was
/// unreachable. Remote rows win over local drafts that carry the same
/// `remote_id`; see the module docs for the full precedence rules.
pub fn merge(
    remote: Option<&[RawRemoteRecipe]>,
    local: &[RawLocalRecipe],
    cfg: &NormalizeConfig,
) -> Vec<CanonicalRecipe> {
    let start = Instant::now();

    let Some(remote_rows) = remote else {
        let merged: Vec<CanonicalRecipe> = local
            .iter()
            .map(|draft| normalize_local(draft, cfg))
            .collect();
        warn!(
            local_count = merged.len(),
            elapsed_micros = start.elapsed().as_micros(),
            "merge_fallback_local"
        );
        return merged;
    };

    let known_remote: HashSet<i64> = remote_rows.iter().map(|row| row.recipe_id).collect();

    let mut merged: Vec<CanonicalRecipe> = remote_rows
        .iter()
        .map(|row| normalize_remote(row, cfg))
        .collect();

    let mut suppressed = 0usize;
    for draft in local {
        match draft.remote_id {
            Some(id) if known_remote.contains(&id) => suppressed += 1,
            _ => merged.push(normalize_local(draft, cfg)),
        }
    }

    info!(
        remote_count = remote_rows.len(),
        local_count = local.len(),
        suppressed,
        merged_count = merged.len(),
        elapsed_micros = start.elapsed().as_micros(),
        "merge_success"
    );

    merged
}
