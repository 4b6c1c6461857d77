//! Wire types of the remote CRUD service.
//!
//! Field names follow the service's JSON convention (camelCase, ids like
//! `commentId`). Recipe rows themselves live in the normalize crate as
//! [`RawRemoteRecipe`](normalize::RawRemoteRecipe); this module carries the
//! adjacent entities (comments, ratings, favorites, users) and the request
//! payloads the service accepts.
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A comment row as returned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteComment {
    pub comment_id: i64,
    pub content: String,
    /// Server-side creation time, without timezone (the service stores a
    /// bare local datetime).
    #[serde(default)]
    pub datetime_created_at: Option<NaiveDateTime>,
    pub user_id: i64,
    pub recipe_id: i64,
}

/// A rating row as returned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteRating {
    pub rating_id: i64,
    pub user_id: i64,
    pub recipe_id: i64,
    /// 1 to 5 stars.
    pub score: i32,
    #[serde(default)]
    pub feedback: Option<String>,
}

/// A favorite row: one user bookmarking one recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteFavorite {
    pub favorite_id: i64,
    pub user_id: i64,
    pub recipe_id: i64,
}

/// An account row as returned by the service.
///
/// The service returns the stored password in the row; sign-in compares it
/// client-side (its historical flow), so the field is kept rather than
/// dropped at the deserialization boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteUser {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub password: Option<String>,
    /// Administrator flag; plain data, no cryptographic meaning.
    #[serde(default)]
    pub admin: bool,
}

/// Insert/update payload for a recipe.
///
/// `ingredients` is a JSON-encoded string because the service persists the
/// column as TEXT; callers encode the structured list before pushing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecipe {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<String>,
    pub user_id: i64,
    /// JSON-encoded ingredient list, e.g. `"[\"Rice\",\"Egg\"]"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cook_time_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_price: Option<f64>,
}

/// Insert payload for a comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub recipe_id: i64,
    pub user_id: i64,
    pub content: String,
}

/// Update payload for a comment; only the text can change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentUpdate {
    pub content: String,
}

/// Insert payload for a rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRating {
    pub user_id: i64,
    pub recipe_id: i64,
    pub score: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

/// Update payload for a rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingUpdate {
    pub score: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

/// Insert payload for a favorite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFavorite {
    pub user_id: i64,
    pub recipe_id: i64,
}

/// Registration payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Partial account update; absent fields are left unchanged by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}
