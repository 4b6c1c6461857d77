//! reqwest-backed [`RecipeSource`] for the real CRUD service.
//!
//! One shared client with connection pooling; per-request timeouts come from
//! [`HttpConfig`]. Endpoint paths mirror the service verbatim, quirks
//! included: comment and rating updates pass the row id as a query parameter
//! (`/comment/updateComment?commentId=`) while everything else uses path
//! segments. Requester identity, where a call carries one, travels as the
//! `X-User-Id` header.
use std::sync::OnceLock;
use std::time::Duration;
use std::time::Instant;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use normalize::RawRemoteRecipe;

use crate::config::HttpConfig;
use crate::error::StoreError;
use crate::source::RecipeSource;
use crate::types::{
    CommentUpdate, NewComment, NewFavorite, NewRating, NewRecipe, NewUser, RatingUpdate,
    RemoteComment, RemoteFavorite, RemoteRating, RemoteUser, UserUpdate,
};

use async_trait::async_trait;

// Global HTTP client with connection pooling. Connect timeout is fixed;
// the request deadline is applied per call from HttpConfig.
static HTTP_CLIENT: OnceLock<reqwest::Client> = OnceLock::new();

fn http_client() -> &'static reqwest::Client {
    HTTP_CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .pool_max_idle_per_host(16)
            .build()
            .expect("Failed to build HTTP client")
    })
}

/// [`RecipeSource`] over the real CRUD service.
#[derive(Debug, Clone)]
pub struct HttpRecipeSource {
    cfg: HttpConfig,
}

impl HttpRecipeSource {
    pub fn new(cfg: HttpConfig) -> Self {
        HttpRecipeSource { cfg }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.cfg.base_url.trim_end_matches('/'), path)
    }

    fn timeout(&self) -> Duration {
        Duration::from_millis(self.cfg.request_timeout_ms)
    }

    async fn execute(
        &self,
        path: &str,
        requester: Option<i64>,
        build: impl FnOnce(&reqwest::Client, String) -> reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, StoreError> {
        let start = Instant::now();
        let mut request = build(http_client(), self.url(path)).timeout(self.timeout());
        if let Some(id) = requester {
            request = request.header("X-User-Id", id);
        }

        let response = request.send().await.map_err(|err| {
            warn!(path, error = %err, "store_request_failed");
            StoreError::Transport {
                path: path.to_string(),
                message: err.to_string(),
            }
        })?;

        let status = response.status();
        debug!(
            path,
            status = status.as_u16(),
            elapsed_micros = start.elapsed().as_micros(),
            "store_request"
        );

        if !status.is_success() {
            return Err(StoreError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(
        path: &str,
        response: reqwest::Response,
    ) -> Result<T, StoreError> {
        response.json::<T>().await.map_err(|err| StoreError::Decode {
            path: path.to_string(),
            message: err.to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        requester: Option<i64>,
    ) -> Result<T, StoreError> {
        let response = self
            .execute(path, requester, |client, url| client.get(url))
            .await?;
        Self::decode(path, response).await
    }

    async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, StoreError> {
        let response = self
            .execute(path, None, |client, url| client.post(url).json(body))
            .await?;
        Self::decode(path, response).await
    }

    async fn put_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        requester: Option<i64>,
    ) -> Result<T, StoreError> {
        let response = self
            .execute(path, requester, |client, url| client.put(url).json(body))
            .await?;
        Self::decode(path, response).await
    }

    /// PUT where the response body is irrelevant (approve and friends return
    /// confirmation text, not JSON).
    async fn put_unit<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        requester: Option<i64>,
    ) -> Result<(), StoreError> {
        self.execute(path, requester, |client, url| client.put(url).json(body))
            .await
            .map(|_| ())
    }

    /// DELETE; the service answers with confirmation text, discarded here.
    async fn delete_unit(&self, path: &str, requester: Option<i64>) -> Result<(), StoreError> {
        self.execute(path, requester, |client, url| client.delete(url))
            .await
            .map(|_| ())
    }
}

#[async_trait]
impl RecipeSource for HttpRecipeSource {
    async fn fetch_recipes(&self) -> Result<Vec<RawRemoteRecipe>, StoreError> {
        self.get_json("/recipe/getAllRecipes", None).await
    }

    async fn fetch_recipes_by_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<RawRemoteRecipe>, StoreError> {
        self.get_json(&format!("/recipe/getRecipesByUserId/{user_id}"), None)
            .await
    }

    async fn insert_recipe(&self, recipe: &NewRecipe) -> Result<RawRemoteRecipe, StoreError> {
        self.post_json("/recipe/insertRecipe", recipe).await
    }

    async fn update_recipe(
        &self,
        recipe_id: i64,
        recipe: &NewRecipe,
    ) -> Result<RawRemoteRecipe, StoreError> {
        self.put_json(&format!("/recipe/updateRecipe/{recipe_id}"), recipe, None)
            .await
    }

    async fn delete_recipe(&self, recipe_id: i64) -> Result<(), StoreError> {
        self.delete_unit(&format!("/recipe/deleteRecipe/{recipe_id}"), None)
            .await
    }

    async fn fetch_pending(&self, admin_id: i64) -> Result<Vec<RawRemoteRecipe>, StoreError> {
        self.get_json("/recipe/admin/pending", Some(admin_id)).await
    }

    async fn fetch_approved(&self, admin_id: i64) -> Result<Vec<RawRemoteRecipe>, StoreError> {
        self.get_json("/recipe/admin/approved", Some(admin_id)).await
    }

    async fn approve_recipe(&self, admin_id: i64, recipe_id: i64) -> Result<(), StoreError> {
        self.put_unit(
            &format!("/recipe/admin/approve/{recipe_id}"),
            &serde_json::json!({}),
            Some(admin_id),
        )
        .await
    }

    async fn reject_recipe(&self, admin_id: i64, recipe_id: i64) -> Result<(), StoreError> {
        self.delete_unit(&format!("/recipe/admin/reject/{recipe_id}"), Some(admin_id))
            .await
    }

    async fn fetch_comments(&self) -> Result<Vec<RemoteComment>, StoreError> {
        self.get_json("/comment/getAllComments", None).await
    }

    async fn insert_comment(&self, comment: &NewComment) -> Result<RemoteComment, StoreError> {
        self.post_json("/comment/insertComment", comment).await
    }

    async fn update_comment(
        &self,
        comment_id: i64,
        update: &CommentUpdate,
    ) -> Result<RemoteComment, StoreError> {
        self.put_json(
            &format!("/comment/updateComment?commentId={comment_id}"),
            update,
            None,
        )
        .await
    }

    async fn delete_comment(&self, comment_id: i64) -> Result<(), StoreError> {
        self.delete_unit(&format!("/comment/deleteComment/{comment_id}"), None)
            .await
    }

    async fn fetch_ratings(&self) -> Result<Vec<RemoteRating>, StoreError> {
        self.get_json("/rating/getAllRatings", None).await
    }

    async fn insert_rating(&self, rating: &NewRating) -> Result<RemoteRating, StoreError> {
        self.post_json("/rating/insertRating", rating).await
    }

    async fn update_rating(
        &self,
        rating_id: i64,
        update: &RatingUpdate,
    ) -> Result<RemoteRating, StoreError> {
        self.put_json(
            &format!("/rating/updateRating?ratingId={rating_id}"),
            update,
            None,
        )
        .await
    }

    async fn delete_rating(&self, rating_id: i64) -> Result<(), StoreError> {
        self.delete_unit(&format!("/rating/deleteRating/{rating_id}"), None)
            .await
    }

    async fn fetch_user_favorites(
        &self,
        user_id: i64,
    ) -> Result<Vec<RemoteFavorite>, StoreError> {
        self.get_json(&format!("/favorite/getUserFavorites/{user_id}"), None)
            .await
    }

    async fn insert_favorite(
        &self,
        favorite: &NewFavorite,
    ) -> Result<RemoteFavorite, StoreError> {
        self.post_json("/favorite/insertFavorite", favorite).await
    }

    async fn delete_favorite(&self, favorite_id: i64) -> Result<(), StoreError> {
        self.delete_unit(&format!("/favorite/deleteFavorite/{favorite_id}"), None)
            .await
    }

    async fn register_user(&self, user: &NewUser) -> Result<RemoteUser, StoreError> {
        self.post_json("/user/add", user).await
    }

    async fn fetch_users(&self, requester: Option<i64>) -> Result<Vec<RemoteUser>, StoreError> {
        self.get_json("/user/getAll", requester).await
    }

    async fn fetch_user(&self, user_id: i64) -> Result<RemoteUser, StoreError> {
        self.get_json(&format!("/user/get/{user_id}"), None).await
    }

    async fn update_user(
        &self,
        user_id: i64,
        update: &UserUpdate,
        requester: Option<i64>,
    ) -> Result<RemoteUser, StoreError> {
        self.put_json(&format!("/user/update/{user_id}"), update, requester)
            .await
    }

    async fn delete_user(&self, user_id: i64, requester: Option<i64>) -> Result<(), StoreError> {
        self.delete_unit(&format!("/user/delete/{user_id}"), requester)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_join_without_double_slashes() {
        let source = HttpRecipeSource::new(HttpConfig {
            base_url: "http://localhost:8080/".into(),
            ..HttpConfig::default()
        });
        assert_eq!(
            source.url("/recipe/getAllRecipes"),
            "http://localhost:8080/recipe/getAllRecipes"
        );
    }
}
