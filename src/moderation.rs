//! Admin review queues and user administration.
//!
//! The service trusts an `X-User-Id` header for its admin endpoints, so the
//! real gate is client-side: every method here checks the session's admin
//! flag before anything goes out on the wire. Mutations follow the same
//! confirm-then-refetch policy as engagement; approve and reject return the
//! refreshed pending queue.

use std::sync::Arc;

use tracing::info;

use normalize::{CanonicalRecipe, NormalizeConfig, RawRemoteRecipe, normalize_remote};
use store::{RecipeSource, RemoteUser};

use crate::ServiceError;
use crate::session::Session;

/// Moderation operations, available to admin sessions only.
pub struct ModerationService {
    source: Arc<dyn RecipeSource>,
    normalize_cfg: NormalizeConfig,
}

impl ModerationService {
    pub fn new(source: Arc<dyn RecipeSource>, normalize_cfg: NormalizeConfig) -> Self {
        ModerationService {
            source,
            normalize_cfg,
        }
    }

    /// Recipes awaiting review.
    pub async fn pending(&self, session: &Session) -> Result<Vec<CanonicalRecipe>, ServiceError> {
        require_admin(session)?;
        let rows = self.source.fetch_pending(session.id).await?;
        Ok(self.normalized(&rows))
    }

    /// Recipes already approved.
    pub async fn approved(&self, session: &Session) -> Result<Vec<CanonicalRecipe>, ServiceError> {
        require_admin(session)?;
        let rows = self.source.fetch_approved(session.id).await?;
        Ok(self.normalized(&rows))
    }

    /// Approve one pending recipe and return the refreshed pending queue.
    pub async fn approve(
        &self,
        session: &Session,
        recipe_id: i64,
    ) -> Result<Vec<CanonicalRecipe>, ServiceError> {
        require_admin(session)?;
        self.source.approve_recipe(session.id, recipe_id).await?;
        info!(admin_id = session.id, recipe_id, "recipe_approved");
        let rows = self.source.fetch_pending(session.id).await?;
        Ok(self.normalized(&rows))
    }

    /// Reject one pending recipe (the service deletes the row) and return
    /// the refreshed pending queue.
    pub async fn reject(
        &self,
        session: &Session,
        recipe_id: i64,
    ) -> Result<Vec<CanonicalRecipe>, ServiceError> {
        require_admin(session)?;
        self.source.reject_recipe(session.id, recipe_id).await?;
        info!(admin_id = session.id, recipe_id, "recipe_rejected");
        let rows = self.source.fetch_pending(session.id).await?;
        Ok(self.normalized(&rows))
    }

    /// Every account row, for the admin user table.
    pub async fn users(&self, session: &Session) -> Result<Vec<RemoteUser>, ServiceError> {
        require_admin(session)?;
        Ok(self.source.fetch_users(Some(session.id)).await?)
    }

    /// Delete an account.
    pub async fn remove_user(&self, session: &Session, user_id: i64) -> Result<(), ServiceError> {
        require_admin(session)?;
        self.source.delete_user(user_id, Some(session.id)).await?;
        info!(admin_id = session.id, user_id, "user_removed");
        Ok(())
    }

    fn normalized(&self, rows: &[RawRemoteRecipe]) -> Vec<CanonicalRecipe> {
        rows.iter()
            .map(|row| normalize_remote(row, &self.normalize_cfg))
            .collect()
    }
}

fn require_admin(session: &Session) -> Result<(), ServiceError> {
    if session.is_admin {
        Ok(())
    } else {
        Err(ServiceError::NotAdmin)
    }
}
