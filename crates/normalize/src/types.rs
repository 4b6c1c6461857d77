//! Core data model types for the normalize crate.
//!
//! These types represent the two raw record shapes produced by the upstream
//! recipe sources and the single canonical shape that flows to the merge and
//! query stages. They are designed to be:
//!
//! - **Serializable**: wire rows and draft files round-trip via serde
//! - **Cloneable**: cheap to clone for per-aggregation processing
//! - **Comparable**: support equality checks for testing
//! - **Total**: every raw record maps to a canonical one, no error path
//!
//! # Type Hierarchy
//!
//! ```text
//! RawRecipe
//! ├── Remote(RawRemoteRecipe)        backend CRUD row
//! │   ├── recipe_id: i64
//! │   ├── title / description / steps: Option<String>
//! │   ├── ingredients: Option<String>   (JSON-encoded text column)
//! │   ├── category: Option<String>
//! │   ├── user_id: Option<i64>
//! │   └── approved: bool
//! └── Local(RawLocalRecipe)          in-browser draft shape
//!     ├── id: i64                       (epoch-millis draft id)
//!     ├── name / instructions: Option<String>
//!     ├── ingredients: Vec<RawIngredient>
//!     ├── cuisine / category: Option<String>
//!     ├── remote_id: Option<i64>        (backend correlation)
//!     └── owner: Option<String>         (author email)
//!
//!         ↓ normalize()
//!
//! CanonicalRecipe
//! ├── id: RecipeId                   (Remote(n) | Draft(n), unique per list)
//! ├── remote_id: Option<i64>         (merge de-dup key)
//! ├── name: String                   (placeholder applied)
//! ├── cuisine: String                (cuisine → category → fallback)
//! ├── description: String            (description → instructions → "")
//! ├── instructions: String
//! ├── ingredients: Vec<Ingredient>   (always a sequence, never a string)
//! ├── cook_time_minutes / difficulty / estimated_price: Option<_>
//! ├── is_user_made: bool
//! └── owner: Option<Owner>
//! ```
//!
//! # Examples
//!
//! ## Building a local draft
//!
//! ```rust
//! use normalize::{RawIngredient, RawLocalRecipe};
//!
//! let draft = RawLocalRecipe {
//!     id: 1_697_040_000_000,
//!     name: Some("Garlic Fried Rice".to_string()),
//!     ingredients: vec![
//!         RawIngredient::Name("Day-old rice".to_string()),
//!         RawIngredient::Detailed {
//!             name: "Garlic".to_string(),
//!             quantity: Some("6 cloves".to_string()),
//!         },
//!     ],
//!     category: Some("Filipino".to_string()),
//!     owner: Some("cook@example.com".to_string()),
//!     ..RawLocalRecipe::default()
//! };
//! assert!(draft.remote_id.is_none());
//! ```
use serde::{Deserialize, Serialize};

/// Identifier of a canonical recipe, tagged by the source that assigned it.
///
/// Remote ids are assigned by the backend CRUD service; draft ids are
/// client-generated epoch-millisecond timestamps. Keeping the tag makes
/// uniqueness across a merged list structural: remote row 42 and local
/// draft 42 can never collide.
///
/// # Examples
///
/// ```rust
/// use normalize::RecipeId;
///
/// let remote = RecipeId::Remote(42);
/// let draft = RecipeId::Draft(42);
/// assert_ne!(remote, draft);
/// assert_eq!(remote.to_string(), "remote:42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "source", content = "value", rename_all = "lowercase")]
pub enum RecipeId {
    /// Backend-assigned id of a record known to the remote store.
    Remote(i64),
    /// Client-generated id of a locally drafted record.
    Draft(i64),
}

impl RecipeId {
    /// Raw numeric value, without the source tag.
    pub fn value(&self) -> i64 {
        match self {
            RecipeId::Remote(v) | RecipeId::Draft(v) => *v,
        }
    }

    /// True for ids assigned by the remote store.
    pub fn is_remote(&self) -> bool {
        matches!(self, RecipeId::Remote(_))
    }
}

impl std::fmt::Display for RecipeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecipeId::Remote(v) => write!(f, "remote:{v}"),
            RecipeId::Draft(v) => write!(f, "draft:{v}"),
        }
    }
}

/// Authoring user of a recipe, in whichever form the source carries it.
///
/// Remote rows reference their author by numeric user id; local drafts store
/// the signed-in email. "My recipes" views accept either form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Owner {
    /// Backend numeric user id.
    Id(i64),
    /// Draft author email.
    Email(String),
}

impl Owner {
    /// Whether this owner refers to the given user, matched by id or email.
    pub fn is_user(&self, user_id: i64, email: &str) -> bool {
        match self {
            Owner::Id(id) => *id == user_id,
            Owner::Email(e) => e.eq_ignore_ascii_case(email),
        }
    }
}

/// One normalized ingredient entry.
///
/// Raw sources carry ingredients either as plain name strings or as
/// `{name, quantity}` objects; normalization reduces both to this shape so
/// filtering and display never branch on input form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Display name, non-empty after normalization.
    pub name: String,
    /// Free-form amount ("2 cups", "500 g"); absent when the source gave none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
}

impl Ingredient {
    /// Ingredient with a name and no quantity.
    pub fn named(name: impl Into<String>) -> Self {
        Ingredient {
            name: name.into(),
            quantity: None,
        }
    }

    /// Ingredient with both name and quantity.
    pub fn new(name: impl Into<String>, quantity: impl Into<String>) -> Self {
        Ingredient {
            name: name.into(),
            quantity: Some(quantity.into()),
        }
    }
}

/// The single normalized in-memory recipe shape.
///
/// Constructed fresh on every aggregation pass from whatever raw records the
/// sources currently return; never persisted in this form. Field defaults are
/// applied by [`normalize`](crate::normalize); see the field docs for the
/// precedence rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRecipe {
    /// Unique within one merged list; see [`RecipeId`].
    pub id: RecipeId,
    /// Present when the record is also known to the remote store. This is the
    /// key the merge stage uses to suppress local copies of remote records.
    pub remote_id: Option<i64>,
    /// Non-empty display title; placeholder applied when the source had none.
    pub name: String,
    /// URI or embedded data-URI image; `None` means "no image".
    pub image: Option<String>,
    /// Category label, derived `cuisine → category → fallback`.
    pub cuisine: String,
    /// Free text, derived `description → instructions → ""`.
    pub description: String,
    /// Cooking steps; empty string when the source had none.
    pub instructions: String,
    /// Always a sequence (possibly empty), never a bare string.
    pub ingredients: Vec<Ingredient>,
    /// Optional positive cook time.
    pub cook_time_minutes: Option<u32>,
    /// Pass-through label ("Easy"/"Medium"/"Hard"); not validated.
    pub difficulty: Option<String>,
    /// Optional non-negative cost estimate in the application currency unit.
    pub estimated_price: Option<f64>,
    /// True when the record originated from a user-authored source.
    pub is_user_made: bool,
    /// Authoring user, when known; scopes "my recipes" views.
    pub owner: Option<Owner>,
}

impl CanonicalRecipe {
    /// True when this record came from the remote store.
    pub fn is_remote(&self) -> bool {
        self.id.is_remote()
    }

    /// Whether the given user authored this record (id or email match).
    pub fn owned_by(&self, user_id: i64, email: &str) -> bool {
        self.owner
            .as_ref()
            .map(|o| o.is_user(user_id, email))
            .unwrap_or(false)
    }
}

/// One raw ingredient entry as found in draft files.
///
/// The in-browser draft flow historically stored plain strings; sample data
/// and edited drafts store `{name, quantity}` objects. Both deserialize from
/// the same array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawIngredient {
    /// Plain name string, e.g. `"Garlic"`.
    Name(String),
    /// Structured entry, e.g. `{"name": "Garlic", "quantity": "6 cloves"}`.
    Detailed {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        quantity: Option<String>,
    },
}

impl RawIngredient {
    /// The entry's name regardless of form.
    pub fn name(&self) -> &str {
        match self {
            RawIngredient::Name(n) => n,
            RawIngredient::Detailed { name, .. } => name,
        }
    }
}

/// Raw recipe row as produced by the remote CRUD service.
///
/// Field names follow that service's JSON convention (`recipeId`, `steps`,
/// `estimatedPrice`, ...). Every field except the id is optional on input;
/// normalization substitutes defaults rather than rejecting rows.
///
/// The `ingredients` column is a JSON-encoded string (the service stores
/// TEXT); [`normalize`](crate::normalize) parses it leniently.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRemoteRecipe {
    pub recipe_id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub steps: Option<String>,
    /// JSON-encoded ingredient list, e.g. `"[\"Rice\",{\"name\":\"Egg\"}]"`.
    #[serde(default)]
    pub ingredients: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub cook_time_minutes: Option<u32>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub estimated_price: Option<f64>,
    /// Moderation flag; false for freshly submitted recipes.
    #[serde(default)]
    pub approved: bool,
}

/// Raw recipe record as produced by the in-browser draft flow.
///
/// Drafts are persisted locally so user-authored recipes survive remote-store
/// outages. `remote_id` is filled in once a draft has been pushed and the
/// backend id is known; the merge stage then treats the remote copy as
/// authoritative.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLocalRecipe {
    /// Client-generated id, conventionally the creation time in epoch millis.
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<RawIngredient>,
    #[serde(default)]
    pub instructions: Option<String>,
    /// Explicit cuisine label; sample data uses this field.
    #[serde(default)]
    pub cuisine: Option<String>,
    /// Category picked in the draft form; used when `cuisine` is absent.
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub cook_time_minutes: Option<u32>,
    #[serde(default)]
    pub estimated_price: Option<f64>,
    /// Backend id of this draft once pushed; the merge de-dup key.
    #[serde(default)]
    pub remote_id: Option<i64>,
    /// Author email of the signed-in user; absent for built-in samples.
    #[serde(default)]
    pub owner: Option<String>,
}

/// A raw record from either source, tagged by origin.
///
/// The normalizer pattern-matches on the variant instead of probing for
/// field presence, which keeps every default-substitution rule statically
/// checkable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawRecipe {
    /// Row fetched from the remote CRUD service.
    Remote(RawRemoteRecipe),
    /// Draft read from the local store.
    Local(RawLocalRecipe),
}

impl RawRecipe {
    /// Backend correlation id, if this record is known remotely.
    pub fn remote_id(&self) -> Option<i64> {
        match self {
            RawRecipe::Remote(r) => Some(r.recipe_id),
            RawRecipe::Local(l) => l.remote_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recipe_id_tags_keep_sources_apart() {
        assert_ne!(RecipeId::Remote(7), RecipeId::Draft(7));
        assert_eq!(RecipeId::Remote(7).value(), 7);
        assert!(RecipeId::Remote(7).is_remote());
        assert!(!RecipeId::Draft(7).is_remote());
        assert_eq!(RecipeId::Draft(9).to_string(), "draft:9");
    }

    #[test]
    fn owner_matches_by_id_or_email() {
        assert!(Owner::Id(3).is_user(3, "a@b.c"));
        assert!(!Owner::Id(3).is_user(4, "a@b.c"));
        assert!(Owner::Email("Cook@Example.com".into()).is_user(0, "cook@example.com"));
        assert!(!Owner::Email("cook@example.com".into()).is_user(0, "other@example.com"));
    }

    #[test]
    fn raw_ingredient_deserializes_both_forms() {
        let parsed: Vec<RawIngredient> =
            serde_json::from_str(r#"["Rice", {"name": "Egg", "quantity": "2"}]"#)
                .expect("mixed ingredient array should parse");
        assert_eq!(parsed[0].name(), "Rice");
        assert_eq!(parsed[1].name(), "Egg");
        assert!(matches!(
            &parsed[1],
            RawIngredient::Detailed { quantity: Some(q), .. } if q == "2"
        ));
    }

    #[test]
    fn remote_row_accepts_service_field_names() {
        let row: RawRemoteRecipe = serde_json::from_str(
            r#"{
                "recipeId": 42,
                "title": "Adobo",
                "steps": "Brown, braise, reduce.",
                "ingredients": "[\"Chicken\",\"Soy sauce\"]",
                "category": "Filipino",
                "userId": 9,
                "estimatedPrice": 150.0,
                "approved": true
            }"#,
        )
        .expect("service row should parse");
        assert_eq!(row.recipe_id, 42);
        assert_eq!(row.user_id, Some(9));
        assert!(row.approved);
        assert!(row.cook_time_minutes.is_none());
    }

    #[test]
    fn local_draft_round_trips_through_json() {
        let draft = RawLocalRecipe {
            id: 1_697_040_000_000,
            name: Some("Garlic Fried Rice".into()),
            ingredients: vec![RawIngredient::Name("Rice".into())],
            category: Some("Filipino".into()),
            remote_id: Some(42),
            owner: Some("cook@example.com".into()),
            ..RawLocalRecipe::default()
        };
        let json = serde_json::to_string(&draft).expect("draft should serialize");
        let back: RawLocalRecipe = serde_json::from_str(&json).expect("draft should parse");
        assert_eq!(back, draft);
        assert_eq!(back.remote_id, Some(42));
    }
}
