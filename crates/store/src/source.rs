//! The remote recipe service contract.
//!
//! [`RecipeSource`] abstracts the external CRUD service the application
//! consumes. The surface mirrors what the client actually calls (recipes,
//! moderation, comments, ratings, favorites, accounts) and nothing more.
//! Callers hold it as `Arc<dyn RecipeSource>` so the aggregation pipeline and
//! every service stay testable against an in-memory implementation.
//!
//! Moderation and account-listing calls carry the requesting user's id; the
//! HTTP implementation forwards it as the `X-User-Id` header the service
//! checks. It is identification, not authentication; the service treats the
//! admin flag as plain data.
use async_trait::async_trait;

use normalize::RawRemoteRecipe;

use crate::error::StoreError;
use crate::types::{
    CommentUpdate, NewComment, NewFavorite, NewRating, NewRecipe, NewUser, RatingUpdate,
    RemoteComment, RemoteFavorite, RemoteRating, RemoteUser, UserUpdate,
};

/// Client-side contract of the remote recipe CRUD service.
///
/// Every method maps to one service endpoint. All failures come back as
/// [`StoreError`]; none of them are fatal to the application. The catalog
/// falls back to local drafts, mutation flows surface the error and leave
/// state untouched.
#[async_trait]
pub trait RecipeSource: Send + Sync {
    // ── Recipes ─────────────────────────────────────────────────────────

    /// All recipe rows, approved or not. The approval flag rides along.
    async fn fetch_recipes(&self) -> Result<Vec<RawRemoteRecipe>, StoreError>;

    /// Rows authored by one user, for "my recipes" views.
    async fn fetch_recipes_by_user(&self, user_id: i64)
        -> Result<Vec<RawRemoteRecipe>, StoreError>;

    /// Submit a recipe. The service assigns the id and forces the row into
    /// the unapproved state regardless of the payload.
    async fn insert_recipe(&self, recipe: &NewRecipe) -> Result<RawRemoteRecipe, StoreError>;

    /// Replace an existing recipe's fields.
    async fn update_recipe(
        &self,
        recipe_id: i64,
        recipe: &NewRecipe,
    ) -> Result<RawRemoteRecipe, StoreError>;

    /// Delete a recipe row.
    async fn delete_recipe(&self, recipe_id: i64) -> Result<(), StoreError>;

    // ── Moderation (requester id forwarded to the service) ──────────────

    /// Rows awaiting review.
    async fn fetch_pending(&self, admin_id: i64) -> Result<Vec<RawRemoteRecipe>, StoreError>;

    /// Rows already approved.
    async fn fetch_approved(&self, admin_id: i64) -> Result<Vec<RawRemoteRecipe>, StoreError>;

    /// Mark a submission approved.
    async fn approve_recipe(&self, admin_id: i64, recipe_id: i64) -> Result<(), StoreError>;

    /// Reject (delete) a submission.
    async fn reject_recipe(&self, admin_id: i64, recipe_id: i64) -> Result<(), StoreError>;

    // ── Comments ────────────────────────────────────────────────────────

    /// Every comment row; callers scope to a recipe client-side.
    async fn fetch_comments(&self) -> Result<Vec<RemoteComment>, StoreError>;

    async fn insert_comment(&self, comment: &NewComment) -> Result<RemoteComment, StoreError>;

    async fn update_comment(
        &self,
        comment_id: i64,
        update: &CommentUpdate,
    ) -> Result<RemoteComment, StoreError>;

    async fn delete_comment(&self, comment_id: i64) -> Result<(), StoreError>;

    // ── Ratings ─────────────────────────────────────────────────────────

    /// Every rating row; callers scope to a recipe client-side.
    async fn fetch_ratings(&self) -> Result<Vec<RemoteRating>, StoreError>;

    async fn insert_rating(&self, rating: &NewRating) -> Result<RemoteRating, StoreError>;

    async fn update_rating(
        &self,
        rating_id: i64,
        update: &RatingUpdate,
    ) -> Result<RemoteRating, StoreError>;

    async fn delete_rating(&self, rating_id: i64) -> Result<(), StoreError>;

    // ── Favorites ───────────────────────────────────────────────────────

    /// One user's favorite rows.
    async fn fetch_user_favorites(&self, user_id: i64)
        -> Result<Vec<RemoteFavorite>, StoreError>;

    async fn insert_favorite(&self, favorite: &NewFavorite)
        -> Result<RemoteFavorite, StoreError>;

    async fn delete_favorite(&self, favorite_id: i64) -> Result<(), StoreError>;

    // ── Accounts ────────────────────────────────────────────────────────

    /// Create an account. The service returns the stored row.
    async fn register_user(&self, user: &NewUser) -> Result<RemoteUser, StoreError>;

    /// Every account row. Sign-in matches email and password against this
    /// list client-side; admin views pass their requester id along.
    async fn fetch_users(&self, requester: Option<i64>) -> Result<Vec<RemoteUser>, StoreError>;

    /// One account row.
    async fn fetch_user(&self, user_id: i64) -> Result<RemoteUser, StoreError>;

    /// Update account fields; absent fields stay unchanged.
    async fn update_user(
        &self,
        user_id: i64,
        update: &UserUpdate,
        requester: Option<i64>,
    ) -> Result<RemoteUser, StoreError>;

    /// Delete an account.
    async fn delete_user(&self, user_id: i64, requester: Option<i64>) -> Result<(), StoreError>;
}
