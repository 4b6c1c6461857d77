//! Draft authoring and submission.
//!
//! New recipes are written to the local draft store first and pushed to the
//! remote service second. The push is allowed to fail: the draft then stands
//! alone in the catalog until a later edit reaches the service. When the push
//! succeeds, the returned recipe id is recorded on the stored draft; that
//! correlation is what lets the merge stage suppress the local copy once the
//! remote row starts appearing in fetches.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{info, warn};

use normalize::{RawIngredient, RawLocalRecipe};
use store::{DraftStore, NewRecipe, RecipeSource, StoreError};

use crate::session::Session;

const MIN_NAME_CHARS: usize = 3;
const MIN_INSTRUCTIONS_CHARS: usize = 10;
const MAX_IMAGE_BYTES: usize = 2 * 1024 * 1024;

/// Form input for a new or edited recipe.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftRecipe {
    pub name: String,
    pub description: String,
    /// Usually a data URI produced by the picker; size-capped on validation.
    pub image: Option<String>,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub category: String,
    pub difficulty: Option<String>,
    pub cook_time_minutes: Option<u32>,
    pub estimated_price: Option<f64>,
}

/// Why a draft was refused or could not be stored.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SubmissionError {
    #[error("recipe name must be at least 3 characters")]
    NameTooShort,
    #[error("a category is required")]
    MissingCategory,
    #[error("at least one ingredient is required")]
    NoIngredients,
    #[error("instructions must be at least 10 characters")]
    InstructionsTooShort,
    #[error("estimated price must not be negative")]
    NegativePrice,
    #[error("image exceeds the 2 MiB limit")]
    ImageTooLarge,
    #[error("no draft with id {0}")]
    UnknownDraft(i64),
    #[error("draft could not be persisted: {0}")]
    Persist(#[from] StoreError),
}

/// What `submit` accomplished.
///
/// `remote_id` is `None` when the service could not be reached; the draft is
/// still stored locally and shows up in the merged catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionOutcome {
    pub draft_id: i64,
    pub remote_id: Option<i64>,
}

/// Draft CRUD plus the local-first push flow.
pub struct SubmissionService {
    source: Arc<dyn RecipeSource>,
    drafts: Arc<dyn DraftStore>,
}

impl SubmissionService {
    pub fn new(source: Arc<dyn RecipeSource>, drafts: Arc<dyn DraftStore>) -> Self {
        SubmissionService { source, drafts }
    }

    /// Validate, persist locally, then push to the service.
    ///
    /// Only local persistence failures become errors. A failed push is
    /// reported through `SubmissionOutcome::remote_id` staying `None`.
    pub async fn submit(
        &self,
        session: &Session,
        draft: &DraftRecipe,
    ) -> Result<SubmissionOutcome, SubmissionError> {
        validate(draft)?;

        let draft_id = Utc::now().timestamp_millis();
        let record = local_record(draft_id, session, draft);

        let mut all = self.drafts.read_drafts();
        all.push(record);
        self.drafts.write_drafts(&all)?;

        let names: Vec<&str> = draft
            .ingredients
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .collect();
        let push_result = match serde_json::to_string(&names) {
            Ok(encoded) => {
                self.source
                    .insert_recipe(&new_recipe(session, draft, encoded))
                    .await
            }
            Err(err) => Err(StoreError::Serialize(err)),
        };

        let remote_id = match push_result {
            Ok(row) => Some(row.recipe_id),
            Err(err) => {
                warn!(error = %err, draft_id, "submission_push_failed");
                None
            }
        };

        if let Some(recipe_id) = remote_id {
            if let Some(stored) = all.iter_mut().find(|record| record.id == draft_id) {
                stored.remote_id = Some(recipe_id);
            }
            self.drafts.write_drafts(&all)?;
        }

        info!(draft_id, pushed = remote_id.is_some(), "submission_complete");
        Ok(SubmissionOutcome { draft_id, remote_id })
    }

    /// Replace a stored draft's content, keeping its id, owner, and remote
    /// correlation. When the draft was pushed before, the remote row is
    /// updated too; that remote update failing is logged, not fatal.
    pub async fn update_draft(
        &self,
        session: &Session,
        draft_id: i64,
        draft: &DraftRecipe,
    ) -> Result<(), SubmissionError> {
        validate(draft)?;

        let mut all = self.drafts.read_drafts();
        let stored = all
            .iter_mut()
            .find(|record| record.id == draft_id && owned_by(record, session))
            .ok_or(SubmissionError::UnknownDraft(draft_id))?;

        let remote_id = stored.remote_id;
        let mut replacement = local_record(draft_id, session, draft);
        replacement.remote_id = remote_id;
        *stored = replacement;
        self.drafts.write_drafts(&all)?;

        if let Some(recipe_id) = remote_id {
            let names: Vec<&str> = draft
                .ingredients
                .iter()
                .map(|name| name.trim())
                .filter(|name| !name.is_empty())
                .collect();
            let push_result = match serde_json::to_string(&names) {
                Ok(encoded) => self
                    .source
                    .update_recipe(recipe_id, &new_recipe(session, draft, encoded))
                    .await
                    .map(|_| ()),
                Err(err) => Err(StoreError::Serialize(err)),
            };
            if let Err(err) = push_result {
                warn!(error = %err, draft_id, recipe_id, "draft_remote_update_failed");
            }
        }

        Ok(())
    }

    /// Remove a stored draft. When it was pushed before, the remote row is
    /// deleted too; that remote delete failing is logged, not fatal.
    pub async fn delete_draft(
        &self,
        session: &Session,
        draft_id: i64,
    ) -> Result<(), SubmissionError> {
        let all = self.drafts.read_drafts();
        let stored = all
            .iter()
            .find(|record| record.id == draft_id && owned_by(record, session))
            .ok_or(SubmissionError::UnknownDraft(draft_id))?;

        if let Some(recipe_id) = stored.remote_id {
            if let Err(err) = self.source.delete_recipe(recipe_id).await {
                warn!(error = %err, draft_id, recipe_id, "draft_remote_delete_failed");
            }
        }

        let remaining: Vec<RawLocalRecipe> = all
            .into_iter()
            .filter(|record| record.id != draft_id)
            .collect();
        self.drafts.write_drafts(&remaining)?;
        Ok(())
    }

    /// The stored drafts belonging to `owner_email`.
    pub fn drafts_of(&self, owner_email: &str) -> Vec<RawLocalRecipe> {
        self.drafts
            .read_drafts()
            .into_iter()
            .filter(|record| record.owner.as_deref() == Some(owner_email))
            .collect()
    }
}

/// The original form rules, checked before anything is stored or sent.
pub fn validate(draft: &DraftRecipe) -> Result<(), SubmissionError> {
    if draft.name.trim().chars().count() < MIN_NAME_CHARS {
        return Err(SubmissionError::NameTooShort);
    }
    if draft.category.trim().is_empty() {
        return Err(SubmissionError::MissingCategory);
    }
    if !draft.ingredients.iter().any(|name| !name.trim().is_empty()) {
        return Err(SubmissionError::NoIngredients);
    }
    if draft.instructions.trim().chars().count() < MIN_INSTRUCTIONS_CHARS {
        return Err(SubmissionError::InstructionsTooShort);
    }
    if draft.estimated_price.is_some_and(|price| price < 0.0) {
        return Err(SubmissionError::NegativePrice);
    }
    if draft.image.as_ref().is_some_and(|uri| uri.len() > MAX_IMAGE_BYTES) {
        return Err(SubmissionError::ImageTooLarge);
    }
    Ok(())
}

fn owned_by(record: &RawLocalRecipe, session: &Session) -> bool {
    record.owner.as_deref() == Some(session.email.as_str())
}

fn local_record(draft_id: i64, session: &Session, draft: &DraftRecipe) -> RawLocalRecipe {
    RawLocalRecipe {
        id: draft_id,
        name: Some(draft.name.trim().to_string()),
        description: non_blank(&draft.description),
        image: draft.image.clone(),
        ingredients: draft
            .ingredients
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .map(|name| RawIngredient::Name(name.to_string()))
            .collect(),
        instructions: non_blank(&draft.instructions),
        cuisine: None,
        category: non_blank(&draft.category),
        difficulty: draft.difficulty.clone(),
        cook_time_minutes: draft.cook_time_minutes,
        estimated_price: draft.estimated_price,
        remote_id: None,
        owner: Some(session.email.clone()),
    }
}

fn new_recipe(session: &Session, draft: &DraftRecipe, encoded_ingredients: String) -> NewRecipe {
    NewRecipe {
        title: draft.name.trim().to_string(),
        description: non_blank(&draft.description),
        image: draft.image.clone(),
        steps: non_blank(&draft.instructions),
        user_id: session.id,
        ingredients: Some(encoded_ingredients),
        category: non_blank(&draft.category),
        difficulty: draft.difficulty.clone(),
        cook_time_minutes: draft.cook_time_minutes,
        estimated_price: draft.estimated_price,
    }
}

fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
