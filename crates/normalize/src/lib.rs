//! Platter Normalization Layer
//!
//! This is where raw recipe records enter the aggregation pipeline. The two
//! upstream sources hand over differently-shaped records (backend CRUD rows
//! with service field names, and free-form local drafts) and this stage
//! reduces every one of them to a single [`CanonicalRecipe`].
//!
//! ## What we do here
//!
//! - **Map fields by precedence** - cuisine falls back `cuisine → category →
//!   "Other"`, description falls back `description → instructions → ""`
//! - **Flatten ingredients** - plain strings, `{name, quantity}` objects, and
//!   the remote store's JSON-encoded text column all become one sequence shape
//! - **Apply placeholders** - records without a usable title get a
//!   configurable placeholder instead of being rejected
//! - **Tag provenance** - ids keep their source ([`RecipeId::Remote`] vs
//!   [`RecipeId::Draft`]) so merged lists stay collision-free
//!
//! Normalization is deliberately total: upstream shapes drift across
//! revisions of the system, so malformed optional fields degrade to defaults
//! instead of failing the record. The only fallible surface in this crate is
//! [`NormalizeConfig::validate`].
//!
//! ## Example
//!
//! ```
//! use normalize::{normalize, NormalizeConfig, RawRecipe, RawRemoteRecipe};
//!
//! let cfg = NormalizeConfig::default();
//! let row = RawRemoteRecipe {
//!     recipe_id: 42,
//!     title: Some("Chicken Adobo".into()),
//!     steps: Some("Brown the chicken, then braise in the sauce.".into()),
//!     ingredients: Some(r#"["Chicken", "Soy sauce", "Vinegar"]"#.into()),
//!     category: Some("Filipino".into()),
//!     user_id: Some(9),
//!     ..RawRemoteRecipe::default()
//! };
//!
//! let canonical = normalize(&RawRecipe::Remote(row), &cfg);
//! assert_eq!(canonical.cuisine, "Filipino");
//! assert_eq!(canonical.ingredients.len(), 3);
//! // No description on the row, so the steps text stands in.
//! assert_eq!(canonical.description, canonical.instructions);
//! assert!(canonical.is_user_made);
//! ```
mod config;
mod ingredients;
mod types;

pub use crate::config::{ConfigError, NormalizeConfig};
pub use crate::types::{
    CanonicalRecipe, Ingredient, Owner, RawIngredient, RawLocalRecipe, RawRecipe, RawRemoteRecipe,
    RecipeId,
};

/// Normalize one raw record into the canonical shape.
///
/// Total over all inputs: missing or malformed optional fields degrade to
/// their documented defaults, never to an error. Pure; no side effects.
pub fn normalize(raw: &RawRecipe, cfg: &NormalizeConfig) -> CanonicalRecipe {
    match raw {
        RawRecipe::Remote(row) => normalize_remote(row, cfg),
        RawRecipe::Local(draft) => normalize_local(draft, cfg),
    }
}

/// Normalize a remote CRUD row. See [`normalize`] for the contract.
pub fn normalize_remote(row: &RawRemoteRecipe, cfg: &NormalizeConfig) -> CanonicalRecipe {
    let instructions = clean(row.steps.as_deref()).unwrap_or_default();
    let description = clean(row.description.as_deref()).unwrap_or_else(|| instructions.clone());
    let ingredients = row
        .ingredients
        .as_deref()
        .map(ingredients::parse_ingredient_text)
        .unwrap_or_default();

    CanonicalRecipe {
        id: RecipeId::Remote(row.recipe_id),
        remote_id: Some(row.recipe_id),
        name: clean(row.title.as_deref()).unwrap_or_else(|| cfg.placeholder_name.clone()),
        image: clean(row.image.as_deref()),
        cuisine: clean(row.category.as_deref()).unwrap_or_else(|| cfg.fallback_cuisine.clone()),
        description,
        instructions,
        ingredients,
        cook_time_minutes: row.cook_time_minutes,
        difficulty: clean(row.difficulty.as_deref()),
        estimated_price: row.estimated_price,
        is_user_made: row.user_id.is_some(),
        owner: row.user_id.map(Owner::Id),
    }
}

/// Normalize a local draft. See [`normalize`] for the contract.
pub fn normalize_local(draft: &RawLocalRecipe, cfg: &NormalizeConfig) -> CanonicalRecipe {
    let instructions = clean(draft.instructions.as_deref()).unwrap_or_default();
    let description = clean(draft.description.as_deref()).unwrap_or_else(|| instructions.clone());
    let cuisine = clean(draft.cuisine.as_deref())
        .or_else(|| clean(draft.category.as_deref()))
        .unwrap_or_else(|| cfg.fallback_cuisine.clone());
    let owner = clean(draft.owner.as_deref()).map(Owner::Email);

    CanonicalRecipe {
        id: RecipeId::Draft(draft.id),
        remote_id: draft.remote_id,
        name: clean(draft.name.as_deref()).unwrap_or_else(|| cfg.placeholder_name.clone()),
        image: clean(draft.image.as_deref()),
        cuisine,
        description,
        instructions,
        ingredients: ingredients::from_raw_sequence(&draft.ingredients),
        cook_time_minutes: draft.cook_time_minutes,
        difficulty: clean(draft.difficulty.as_deref()),
        estimated_price: draft.estimated_price,
        is_user_made: owner.is_some(),
        owner,
    }
}

/// Trim an optional field; blank values count as absent.
fn clean(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(String::from)
}
