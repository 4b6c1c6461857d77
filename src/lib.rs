//! Workspace umbrella crate for Platter, a client-side recipe aggregation
//! pipeline.
//!
//! This crate stitches the stage crates (normalize, merge, query, store)
//! together and adds the user-facing services on top: catalog loading,
//! accounts, engagement (favorites, comments, ratings), recipe submission,
//! and admin moderation. Callers build a [`Catalog`] (or one of the
//! services) from a [`RecipeSource`] and go.

mod catalog;
mod config;
mod engagement;
mod moderation;
mod seed;
mod session;
mod submission;

pub use merge::merge;
pub use normalize::{
    CanonicalRecipe, Ingredient, NormalizeConfig, Owner, RawIngredient, RawLocalRecipe, RawRecipe,
    RawRemoteRecipe, RecipeId, normalize, normalize_local, normalize_remote,
};
pub use query::{
    CATEGORY_ALL, CategoryFilter, FilterSpec, FilterSpecBuilder, QueryError, categories, filter,
    matches_spec,
};
#[cfg(feature = "http")]
pub use store::HttpRecipeSource;
pub use store::{
    CommentUpdate, DraftStore, HttpConfig, InMemoryDraftStore, InMemoryRecipeSource,
    JsonDraftStore, NewComment, NewFavorite, NewRating, NewRecipe, NewUser, RatingUpdate,
    RecipeSource, RemoteComment, RemoteFavorite, RemoteRating, RemoteUser, StoreError, UserUpdate,
};

pub use crate::catalog::{Catalog, CatalogSnapshot, OwnedRecipe};
pub use crate::config::{ConfigLoadError, PlatterConfig};
pub use crate::engagement::{EngagementService, mean_score};
pub use crate::moderation::ModerationService;
pub use crate::seed::sample_recipes;
pub use crate::session::{AccountService, Session};
pub use crate::submission::{DraftRecipe, SubmissionError, SubmissionOutcome, SubmissionService};

use std::error::Error;
use std::fmt;

/// Errors that can occur in the user-facing services.
///
/// Validation failures are separate variants so a front end can map each one
/// to its own form message; everything the wire can throw stays wrapped in
/// [`ServiceError::Store`].
#[derive(Debug)]
pub enum ServiceError {
    Store(StoreError),
    InvalidCredentials,
    DuplicateEmail,
    UsernameTooShort,
    InvalidEmail,
    PasswordTooShort,
    NotAdmin,
    EmptyContent,
    ScoreOutOfRange(i32),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Store(err) => write!(f, "store failure: {err}"),
            ServiceError::InvalidCredentials => write!(f, "invalid email or password"),
            ServiceError::DuplicateEmail => {
                write!(f, "an account with this email already exists")
            }
            ServiceError::UsernameTooShort => {
                write!(f, "username must be at least 3 characters")
            }
            ServiceError::InvalidEmail => write!(f, "email address is not well-formed"),
            ServiceError::PasswordTooShort => {
                write!(f, "password must be at least 8 characters")
            }
            ServiceError::NotAdmin => write!(f, "this action requires an admin session"),
            ServiceError::EmptyContent => write!(f, "content must not be blank"),
            ServiceError::ScoreOutOfRange(score) => {
                write!(f, "rating score {score} is outside the 1..=5 range")
            }
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ServiceError::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        ServiceError::Store(value)
    }
}
