//! Favorites, comments, and ratings.
//!
//! Every mutation here is confirm-then-update: the call awaits the remote
//! confirmation, then re-fetches the affected collection and returns that as
//! the new ground truth. A failed call therefore leaves whatever the caller
//! last fetched untouched; there is no optimistic state to roll back.
//!
//! The service exposes comments and ratings only as full-table fetches, so
//! the per-recipe views filter client-side.

use std::sync::Arc;

use tracing::info;

use store::{
    CommentUpdate, NewComment, NewFavorite, NewRating, RatingUpdate, RecipeSource, RemoteComment,
    RemoteFavorite, RemoteRating,
};

use crate::ServiceError;
use crate::session::Session;

/// Favorites, comments, and ratings over one recipe source.
pub struct EngagementService {
    source: Arc<dyn RecipeSource>,
}

impl EngagementService {
    pub fn new(source: Arc<dyn RecipeSource>) -> Self {
        EngagementService { source }
    }

    /// One user's favorite set.
    pub async fn favorites_of(&self, user_id: i64) -> Result<Vec<RemoteFavorite>, ServiceError> {
        Ok(self.source.fetch_user_favorites(user_id).await?)
    }

    /// Add `recipe_id` to the session user's favorites, or remove it when it
    /// is already there. Returns the refreshed favorite set.
    pub async fn toggle_favorite(
        &self,
        session: &Session,
        recipe_id: i64,
    ) -> Result<Vec<RemoteFavorite>, ServiceError> {
        let current = self.source.fetch_user_favorites(session.id).await?;
        match current.iter().find(|fav| fav.recipe_id == recipe_id) {
            Some(existing) => {
                self.source.delete_favorite(existing.favorite_id).await?;
                info!(user_id = session.id, recipe_id, "favorite_removed");
            }
            None => {
                self.source
                    .insert_favorite(&NewFavorite {
                        user_id: session.id,
                        recipe_id,
                    })
                    .await?;
                info!(user_id = session.id, recipe_id, "favorite_added");
            }
        }
        Ok(self.source.fetch_user_favorites(session.id).await?)
    }

    /// Comments on one recipe, in service order.
    pub async fn comments_for(&self, recipe_id: i64) -> Result<Vec<RemoteComment>, ServiceError> {
        let all = self.source.fetch_comments().await?;
        Ok(all
            .into_iter()
            .filter(|comment| comment.recipe_id == recipe_id)
            .collect())
    }

    /// Post a comment and return the recipe's refreshed thread.
    pub async fn add_comment(
        &self,
        session: &Session,
        recipe_id: i64,
        content: &str,
    ) -> Result<Vec<RemoteComment>, ServiceError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(ServiceError::EmptyContent);
        }
        self.source
            .insert_comment(&NewComment {
                recipe_id,
                user_id: session.id,
                content: content.to_string(),
            })
            .await?;
        self.comments_for(recipe_id).await
    }

    /// Replace a comment's text and return the recipe's refreshed thread.
    pub async fn edit_comment(
        &self,
        session: &Session,
        comment_id: i64,
        content: &str,
    ) -> Result<Vec<RemoteComment>, ServiceError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(ServiceError::EmptyContent);
        }
        let updated = self
            .source
            .update_comment(
                comment_id,
                &CommentUpdate {
                    content: content.to_string(),
                },
            )
            .await?;
        info!(user_id = session.id, comment_id, "comment_edited");
        self.comments_for(updated.recipe_id).await
    }

    /// Delete a comment and return the recipe's refreshed thread.
    pub async fn remove_comment(
        &self,
        comment_id: i64,
        recipe_id: i64,
    ) -> Result<Vec<RemoteComment>, ServiceError> {
        self.source.delete_comment(comment_id).await?;
        self.comments_for(recipe_id).await
    }

    /// Ratings of one recipe, in service order.
    pub async fn ratings_for(&self, recipe_id: i64) -> Result<Vec<RemoteRating>, ServiceError> {
        let all = self.source.fetch_ratings().await?;
        Ok(all
            .into_iter()
            .filter(|rating| rating.recipe_id == recipe_id)
            .collect())
    }

    /// Set the session user's rating for a recipe.
    ///
    /// One rating per user and recipe: when a row for `(user, recipe)` exists
    /// it is updated in place, otherwise a new one is inserted. The match is
    /// made client-side because the service has no upsert. Returns the
    /// recipe's refreshed rating list.
    pub async fn rate(
        &self,
        session: &Session,
        recipe_id: i64,
        score: i32,
        feedback: Option<&str>,
    ) -> Result<Vec<RemoteRating>, ServiceError> {
        if !(1..=5).contains(&score) {
            return Err(ServiceError::ScoreOutOfRange(score));
        }
        let feedback = feedback
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(String::from);

        let all = self.source.fetch_ratings().await?;
        let existing = all
            .iter()
            .find(|rating| rating.user_id == session.id && rating.recipe_id == recipe_id);
        match existing {
            Some(row) => {
                self.source
                    .update_rating(row.rating_id, &RatingUpdate { score, feedback })
                    .await?;
                info!(user_id = session.id, recipe_id, score, "rating_updated");
            }
            None => {
                self.source
                    .insert_rating(&NewRating {
                        user_id: session.id,
                        recipe_id,
                        score,
                        feedback,
                    })
                    .await?;
                info!(user_id = session.id, recipe_id, score, "rating_added");
            }
        }
        self.ratings_for(recipe_id).await
    }
}

/// Mean score of a rating list; `None` when the list is empty.
pub fn mean_score(ratings: &[RemoteRating]) -> Option<f64> {
    if ratings.is_empty() {
        return None;
    }
    let sum: i64 = ratings.iter().map(|rating| i64::from(rating.score)).sum();
    Some(sum as f64 / ratings.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::InMemoryRecipeSource;

    fn service_with_source() -> (EngagementService, Arc<InMemoryRecipeSource>) {
        let source = Arc::new(InMemoryRecipeSource::new());
        (EngagementService::new(source.clone()), source)
    }

    fn session(id: i64) -> Session {
        Session {
            id,
            nickname: format!("user{id}"),
            email: format!("user{id}@example.com"),
            is_admin: false,
        }
    }

    #[tokio::test]
    async fn toggle_favorite_inserts_then_removes() {
        let (service, _) = service_with_source();
        let maria = session(7);

        let favorites = service
            .toggle_favorite(&maria, 41)
            .await
            .expect("toggle on should succeed");
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].recipe_id, 41);

        let favorites = service
            .toggle_favorite(&maria, 41)
            .await
            .expect("toggle off should succeed");
        assert!(favorites.is_empty());
    }

    #[tokio::test]
    async fn comments_filter_to_the_recipe() {
        let (service, source) = service_with_source();
        let maria = session(7);

        service
            .add_comment(&maria, 41, "Lovely sauce")
            .await
            .expect("first comment");
        service
            .add_comment(&maria, 99, "Different recipe")
            .await
            .expect("second comment");

        let thread = service.comments_for(41).await.expect("fetch thread");
        assert_eq!(thread.len(), 1);
        assert_eq!(thread[0].content, "Lovely sauce");

        // The full table still holds both.
        let all = source.fetch_comments().await.expect("fetch all");
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn blank_comments_are_rejected_before_the_wire() {
        let (service, source) = service_with_source();
        source.set_offline(true);

        let result = service.add_comment(&session(7), 41, "   ").await;
        assert!(matches!(result, Err(ServiceError::EmptyContent)));
    }

    #[tokio::test]
    async fn edit_and_remove_refresh_the_thread() {
        let (service, _) = service_with_source();
        let maria = session(7);

        let thread = service
            .add_comment(&maria, 41, "Frist!")
            .await
            .expect("post comment");
        let comment_id = thread[0].comment_id;

        let thread = service
            .edit_comment(&maria, comment_id, "First!")
            .await
            .expect("edit comment");
        assert_eq!(thread.len(), 1);
        assert_eq!(thread[0].content, "First!");

        let thread = service
            .remove_comment(comment_id, 41)
            .await
            .expect("remove comment");
        assert!(thread.is_empty());
    }

    #[tokio::test]
    async fn rate_inserts_then_updates_in_place() {
        let (service, _) = service_with_source();
        let maria = session(7);

        let ratings = service
            .rate(&maria, 41, 4, Some("Solid"))
            .await
            .expect("first rating");
        assert_eq!(ratings.len(), 1);
        assert_eq!(ratings[0].score, 4);

        let ratings = service
            .rate(&maria, 41, 2, None)
            .await
            .expect("second rating");
        assert_eq!(ratings.len(), 1, "re-rating must not add a second row");
        assert_eq!(ratings[0].score, 2);

        // A different user gets their own row.
        let ratings = service
            .rate(&session(8), 41, 5, None)
            .await
            .expect("other user rating");
        assert_eq!(ratings.len(), 2);
    }

    #[tokio::test]
    async fn out_of_range_scores_are_rejected() {
        let (service, _) = service_with_source();

        for score in [0, 6, -3] {
            let result = service.rate(&session(7), 41, score, None).await;
            assert!(matches!(
                result,
                Err(ServiceError::ScoreOutOfRange(s)) if s == score
            ));
        }
    }

    #[tokio::test]
    async fn failed_mutation_leaves_confirmed_state_alone() {
        let (service, source) = service_with_source();
        let maria = session(7);

        let confirmed = service
            .toggle_favorite(&maria, 41)
            .await
            .expect("toggle on");
        assert_eq!(confirmed.len(), 1);

        source.set_offline(true);
        let result = service.toggle_favorite(&maria, 42).await;
        assert!(matches!(result, Err(ServiceError::Store(_))));

        source.set_offline(false);
        let after = service.favorites_of(7).await.expect("refetch");
        assert_eq!(after, confirmed);
    }

    #[test]
    fn mean_score_averages_or_abstains() {
        assert_eq!(mean_score(&[]), None);

        let rows = vec![
            RemoteRating {
                rating_id: 1,
                user_id: 7,
                recipe_id: 41,
                score: 4,
                feedback: None,
            },
            RemoteRating {
                rating_id: 2,
                user_id: 8,
                recipe_id: 41,
                score: 5,
                feedback: Some("Great".into()),
            },
        ];
        assert_eq!(mean_score(&rows), Some(4.5));
    }
}
