//! In-memory [`RecipeSource`] for tests and offline demos.
//!
//! Behaves like the real service: inserts assign ids and force submissions
//! into the unapproved pool, `fetch_recipes` returns every row regardless of
//! moderation state, and updates touch only the fields the payload carries.
//! Flipping [`InMemoryRecipeSource::set_offline`] makes every call fail with
//! a transport error, which is how the fallback paths get exercised.
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use normalize::RawRemoteRecipe;

use crate::error::StoreError;
use crate::source::RecipeSource;
use crate::types::{
    CommentUpdate, NewComment, NewFavorite, NewRating, NewRecipe, NewUser, RatingUpdate,
    RemoteComment, RemoteFavorite, RemoteRating, RemoteUser, UserUpdate,
};

#[derive(Debug, Default)]
struct State {
    recipes: Vec<RawRemoteRecipe>,
    comments: Vec<RemoteComment>,
    ratings: Vec<RemoteRating>,
    favorites: Vec<RemoteFavorite>,
    users: Vec<RemoteUser>,
    next_id: i64,
}

/// Service stand-in backed by plain vectors behind a mutex.
#[derive(Debug)]
pub struct InMemoryRecipeSource {
    state: Mutex<State>,
    offline: AtomicBool,
}

impl Default for InMemoryRecipeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRecipeSource {
    pub fn new() -> Self {
        InMemoryRecipeSource {
            state: Mutex::new(State {
                next_id: 1,
                ..State::default()
            }),
            offline: AtomicBool::new(false),
        }
    }

    /// Start with pre-existing recipe rows. Caller-chosen ids are respected;
    /// the id counter resumes above the highest one.
    pub fn with_recipes(rows: Vec<RawRemoteRecipe>) -> Self {
        let source = Self::new();
        {
            let mut state = source.lock();
            for row in rows {
                state.next_id = state.next_id.max(row.recipe_id + 1);
                state.recipes.push(row);
            }
        }
        source
    }

    /// Simulate the service being unreachable. While offline every call
    /// returns [`StoreError::Transport`].
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Seed an account row directly, returning its id.
    pub fn add_user(&self, username: &str, email: &str, password: &str, admin: bool) -> i64 {
        let mut state = self.lock();
        let user_id = take_id(&mut state);
        state.users.push(RemoteUser {
            user_id,
            username: username.to_string(),
            email: email.to_string(),
            password: Some(password.to_string()),
            admin,
        });
        user_id
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().expect("recipe source lock poisoned")
    }

    fn guard(&self, path: &str) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Transport {
                path: path.to_string(),
                message: "connection refused (source offline)".to_string(),
            });
        }
        Ok(())
    }
}

fn take_id(state: &mut State) -> i64 {
    let id = state.next_id;
    state.next_id += 1;
    id
}

fn not_found(path: &str) -> StoreError {
    StoreError::Status {
        path: path.to_string(),
        status: 404,
    }
}

fn row_from_new(recipe_id: i64, recipe: &NewRecipe) -> RawRemoteRecipe {
    RawRemoteRecipe {
        recipe_id,
        title: Some(recipe.title.clone()),
        description: recipe.description.clone(),
        image: recipe.image.clone(),
        steps: recipe.steps.clone(),
        ingredients: recipe.ingredients.clone(),
        category: recipe.category.clone(),
        user_id: Some(recipe.user_id),
        cook_time_minutes: recipe.cook_time_minutes,
        difficulty: recipe.difficulty.clone(),
        estimated_price: recipe.estimated_price,
        approved: false,
    }
}

#[async_trait]
impl RecipeSource for InMemoryRecipeSource {
    async fn fetch_recipes(&self) -> Result<Vec<RawRemoteRecipe>, StoreError> {
        self.guard("/recipe/getAllRecipes")?;
        Ok(self.lock().recipes.clone())
    }

    async fn fetch_recipes_by_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<RawRemoteRecipe>, StoreError> {
        self.guard("/recipe/getRecipesByUserId")?;
        Ok(self
            .lock()
            .recipes
            .iter()
            .filter(|row| row.user_id == Some(user_id))
            .cloned()
            .collect())
    }

    async fn insert_recipe(&self, recipe: &NewRecipe) -> Result<RawRemoteRecipe, StoreError> {
        self.guard("/recipe/insertRecipe")?;
        let mut state = self.lock();
        let recipe_id = take_id(&mut state);
        let row = row_from_new(recipe_id, recipe);
        state.recipes.push(row.clone());
        Ok(row)
    }

    async fn update_recipe(
        &self,
        recipe_id: i64,
        recipe: &NewRecipe,
    ) -> Result<RawRemoteRecipe, StoreError> {
        let path = "/recipe/updateRecipe";
        self.guard(path)?;
        let mut state = self.lock();
        let row = state
            .recipes
            .iter_mut()
            .find(|row| row.recipe_id == recipe_id)
            .ok_or_else(|| not_found(path))?;
        let approved = row.approved;
        *row = row_from_new(recipe_id, recipe);
        row.approved = approved;
        Ok(row.clone())
    }

    async fn delete_recipe(&self, recipe_id: i64) -> Result<(), StoreError> {
        let path = "/recipe/deleteRecipe";
        self.guard(path)?;
        let mut state = self.lock();
        let before = state.recipes.len();
        state.recipes.retain(|row| row.recipe_id != recipe_id);
        if state.recipes.len() == before {
            return Err(not_found(path));
        }
        state.comments.retain(|c| c.recipe_id != recipe_id);
        state.ratings.retain(|r| r.recipe_id != recipe_id);
        state.favorites.retain(|f| f.recipe_id != recipe_id);
        Ok(())
    }

    async fn fetch_pending(&self, _admin_id: i64) -> Result<Vec<RawRemoteRecipe>, StoreError> {
        self.guard("/recipe/admin/pending")?;
        Ok(self
            .lock()
            .recipes
            .iter()
            .filter(|row| !row.approved)
            .cloned()
            .collect())
    }

    async fn fetch_approved(&self, _admin_id: i64) -> Result<Vec<RawRemoteRecipe>, StoreError> {
        self.guard("/recipe/admin/approved")?;
        Ok(self
            .lock()
            .recipes
            .iter()
            .filter(|row| row.approved)
            .cloned()
            .collect())
    }

    async fn approve_recipe(&self, _admin_id: i64, recipe_id: i64) -> Result<(), StoreError> {
        let path = "/recipe/admin/approve";
        self.guard(path)?;
        let mut state = self.lock();
        let row = state
            .recipes
            .iter_mut()
            .find(|row| row.recipe_id == recipe_id)
            .ok_or_else(|| not_found(path))?;
        row.approved = true;
        Ok(())
    }

    async fn reject_recipe(&self, _admin_id: i64, recipe_id: i64) -> Result<(), StoreError> {
        let path = "/recipe/admin/reject";
        self.guard(path)?;
        let mut state = self.lock();
        let before = state.recipes.len();
        state.recipes.retain(|row| row.recipe_id != recipe_id);
        if state.recipes.len() == before {
            return Err(not_found(path));
        }
        Ok(())
    }

    async fn fetch_comments(&self) -> Result<Vec<RemoteComment>, StoreError> {
        self.guard("/comment/getAllComments")?;
        Ok(self.lock().comments.clone())
    }

    async fn insert_comment(&self, comment: &NewComment) -> Result<RemoteComment, StoreError> {
        self.guard("/comment/insertComment")?;
        let mut state = self.lock();
        let row = RemoteComment {
            comment_id: take_id(&mut state),
            content: comment.content.clone(),
            datetime_created_at: Some(Utc::now().naive_utc()),
            user_id: comment.user_id,
            recipe_id: comment.recipe_id,
        };
        state.comments.push(row.clone());
        Ok(row)
    }

    async fn update_comment(
        &self,
        comment_id: i64,
        update: &CommentUpdate,
    ) -> Result<RemoteComment, StoreError> {
        let path = "/comment/updateComment";
        self.guard(path)?;
        let mut state = self.lock();
        let row = state
            .comments
            .iter_mut()
            .find(|row| row.comment_id == comment_id)
            .ok_or_else(|| not_found(path))?;
        row.content = update.content.clone();
        Ok(row.clone())
    }

    async fn delete_comment(&self, comment_id: i64) -> Result<(), StoreError> {
        let path = "/comment/deleteComment";
        self.guard(path)?;
        let mut state = self.lock();
        let before = state.comments.len();
        state.comments.retain(|row| row.comment_id != comment_id);
        if state.comments.len() == before {
            return Err(not_found(path));
        }
        Ok(())
    }

    async fn fetch_ratings(&self) -> Result<Vec<RemoteRating>, StoreError> {
        self.guard("/rating/getAllRatings")?;
        Ok(self.lock().ratings.clone())
    }

    async fn insert_rating(&self, rating: &NewRating) -> Result<RemoteRating, StoreError> {
        self.guard("/rating/insertRating")?;
        let mut state = self.lock();
        let row = RemoteRating {
            rating_id: take_id(&mut state),
            user_id: rating.user_id,
            recipe_id: rating.recipe_id,
            score: rating.score,
            feedback: rating.feedback.clone(),
        };
        state.ratings.push(row.clone());
        Ok(row)
    }

    async fn update_rating(
        &self,
        rating_id: i64,
        update: &RatingUpdate,
    ) -> Result<RemoteRating, StoreError> {
        let path = "/rating/updateRating";
        self.guard(path)?;
        let mut state = self.lock();
        let row = state
            .ratings
            .iter_mut()
            .find(|row| row.rating_id == rating_id)
            .ok_or_else(|| not_found(path))?;
        row.score = update.score;
        row.feedback = update.feedback.clone();
        Ok(row.clone())
    }

    async fn delete_rating(&self, rating_id: i64) -> Result<(), StoreError> {
        let path = "/rating/deleteRating";
        self.guard(path)?;
        let mut state = self.lock();
        let before = state.ratings.len();
        state.ratings.retain(|row| row.rating_id != rating_id);
        if state.ratings.len() == before {
            return Err(not_found(path));
        }
        Ok(())
    }

    async fn fetch_user_favorites(
        &self,
        user_id: i64,
    ) -> Result<Vec<RemoteFavorite>, StoreError> {
        self.guard("/favorite/getUserFavorites")?;
        Ok(self
            .lock()
            .favorites
            .iter()
            .filter(|row| row.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn insert_favorite(
        &self,
        favorite: &NewFavorite,
    ) -> Result<RemoteFavorite, StoreError> {
        self.guard("/favorite/insertFavorite")?;
        let mut state = self.lock();
        let row = RemoteFavorite {
            favorite_id: take_id(&mut state),
            user_id: favorite.user_id,
            recipe_id: favorite.recipe_id,
        };
        state.favorites.push(row.clone());
        Ok(row)
    }

    async fn delete_favorite(&self, favorite_id: i64) -> Result<(), StoreError> {
        let path = "/favorite/deleteFavorite";
        self.guard(path)?;
        let mut state = self.lock();
        let before = state.favorites.len();
        state.favorites.retain(|row| row.favorite_id != favorite_id);
        if state.favorites.len() == before {
            return Err(not_found(path));
        }
        Ok(())
    }

    async fn register_user(&self, user: &NewUser) -> Result<RemoteUser, StoreError> {
        self.guard("/user/add")?;
        let mut state = self.lock();
        let row = RemoteUser {
            user_id: take_id(&mut state),
            username: user.username.clone(),
            email: user.email.clone(),
            password: Some(user.password.clone()),
            admin: false,
        };
        state.users.push(row.clone());
        Ok(row)
    }

    async fn fetch_users(&self, _requester: Option<i64>) -> Result<Vec<RemoteUser>, StoreError> {
        self.guard("/user/getAll")?;
        Ok(self.lock().users.clone())
    }

    async fn fetch_user(&self, user_id: i64) -> Result<RemoteUser, StoreError> {
        let path = "/user/get";
        self.guard(path)?;
        self.lock()
            .users
            .iter()
            .find(|row| row.user_id == user_id)
            .cloned()
            .ok_or_else(|| not_found(path))
    }

    async fn update_user(
        &self,
        user_id: i64,
        update: &UserUpdate,
        _requester: Option<i64>,
    ) -> Result<RemoteUser, StoreError> {
        let path = "/user/update";
        self.guard(path)?;
        let mut state = self.lock();
        let row = state
            .users
            .iter_mut()
            .find(|row| row.user_id == user_id)
            .ok_or_else(|| not_found(path))?;
        if let Some(username) = &update.username {
            row.username = username.clone();
        }
        if let Some(email) = &update.email {
            row.email = email.clone();
        }
        if let Some(password) = &update.password {
            row.password = Some(password.clone());
        }
        Ok(row.clone())
    }

    async fn delete_user(&self, user_id: i64, _requester: Option<i64>) -> Result<(), StoreError> {
        let path = "/user/delete";
        self.guard(path)?;
        let mut state = self.lock();
        let before = state.users.len();
        state.users.retain(|row| row.user_id != user_id);
        if state.users.len() == before {
            return Err(not_found(path));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(title: &str, user_id: i64) -> NewRecipe {
        NewRecipe {
            title: title.to_string(),
            user_id,
            ..NewRecipe::default()
        }
    }

    #[tokio::test]
    async fn inserts_land_unapproved_and_still_list() {
        let source = InMemoryRecipeSource::new();
        let row = source.insert_recipe(&submission("Laksa", 7)).await.unwrap();
        assert!(!row.approved);

        let all = source.fetch_recipes().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].title.as_deref(), Some("Laksa"));
    }

    #[tokio::test]
    async fn approve_moves_row_between_moderation_pools() {
        let source = InMemoryRecipeSource::new();
        let row = source.insert_recipe(&submission("Pho", 3)).await.unwrap();

        assert_eq!(source.fetch_pending(1).await.unwrap().len(), 1);
        assert!(source.fetch_approved(1).await.unwrap().is_empty());

        source.approve_recipe(1, row.recipe_id).await.unwrap();
        assert!(source.fetch_pending(1).await.unwrap().is_empty());
        assert_eq!(source.fetch_approved(1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn reject_removes_the_row_entirely() {
        let source = InMemoryRecipeSource::new();
        let row = source.insert_recipe(&submission("Tagine", 3)).await.unwrap();
        source.reject_recipe(1, row.recipe_id).await.unwrap();
        assert!(source.fetch_recipes().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn offline_turns_every_call_into_transport_errors() {
        let source = InMemoryRecipeSource::new();
        source.set_offline(true);
        let err = source.fetch_recipes().await.unwrap_err();
        assert!(matches!(err, StoreError::Transport { .. }));

        source.set_offline(false);
        assert!(source.fetch_recipes().await.is_ok());
    }

    #[tokio::test]
    async fn missing_rows_surface_as_404() {
        let source = InMemoryRecipeSource::new();
        let err = source.delete_recipe(99).await.unwrap_err();
        assert!(matches!(err, StoreError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn favorites_filter_by_user() {
        let source = InMemoryRecipeSource::new();
        source
            .insert_favorite(&NewFavorite { user_id: 1, recipe_id: 10 })
            .await
            .unwrap();
        source
            .insert_favorite(&NewFavorite { user_id: 2, recipe_id: 10 })
            .await
            .unwrap();

        let mine = source.fetch_user_favorites(1).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].user_id, 1);
    }

    #[tokio::test]
    async fn user_update_touches_only_provided_fields() {
        let source = InMemoryRecipeSource::new();
        let id = source.add_user("rene", "rene@example.com", "hunter22", false);
        let updated = source
            .update_user(
                id,
                &UserUpdate {
                    username: Some("renata".to_string()),
                    email: None,
                    password: None,
                },
                Some(id),
            )
            .await
            .unwrap();
        assert_eq!(updated.username, "renata");
        assert_eq!(updated.email, "rene@example.com");
    }

    #[tokio::test]
    async fn comments_are_stamped_on_insert() {
        let source = InMemoryRecipeSource::new();
        let row = source
            .insert_comment(&NewComment {
                recipe_id: 5,
                user_id: 2,
                content: "Needs more lime".to_string(),
            })
            .await
            .unwrap();
        assert!(row.datetime_created_at.is_some());
    }

    #[tokio::test]
    async fn deleting_a_recipe_cascades_to_engagement_rows() {
        let source = InMemoryRecipeSource::new();
        let row = source.insert_recipe(&submission("Mole", 4)).await.unwrap();
        source
            .insert_comment(&NewComment {
                recipe_id: row.recipe_id,
                user_id: 4,
                content: "First!".to_string(),
            })
            .await
            .unwrap();
        source.delete_recipe(row.recipe_id).await.unwrap();
        assert!(source.fetch_comments().await.unwrap().is_empty());
    }
}
