//! Platter Storage Layer
//!
//! Everything the pipeline reads from or writes to lives behind this crate's
//! two seams: [`RecipeSource`] for the remote CRUD service and [`DraftStore`]
//! for recipes saved on this device.
//!
//! ## What we do here
//!
//! - **Talk to the service** - [`HttpRecipeSource`] speaks the service's
//!   actual endpoints (recipes, comments, ratings, favorites, accounts,
//!   moderation) over a pooled reqwest client.
//! - **Keep drafts on disk** - [`JsonDraftStore`] persists local recipes as
//!   pretty-printed JSON and never fails a read; a broken file just means an
//!   empty draft list plus a warning in the logs.
//! - **Fake it for tests** - [`InMemoryRecipeSource`] and
//!   [`InMemoryDraftStore`] mimic both seams without a network or filesystem,
//!   including an offline switch for exercising fallback paths.
//! - **Type the failures** - every remote problem comes back as a
//!   [`StoreError`] so callers can tell transport trouble from a 4xx from a
//!   body that would not decode.
//!
//! ## Example
//!
//! ```
//! use normalize::RawLocalRecipe;
//! use store::{DraftStore, InMemoryDraftStore};
//!
//! let drafts = InMemoryDraftStore::new();
//! drafts
//!     .write_drafts(&[RawLocalRecipe {
//!         id: 1,
//!         name: Some("Adobo".into()),
//!         ..RawLocalRecipe::default()
//!     }])
//!     .unwrap();
//!
//! assert_eq!(drafts.read_drafts().len(), 1);
//! ```
mod config;
mod drafts;
mod error;
mod memory;
mod source;
mod types;

#[cfg(feature = "http")]
mod http;

pub use crate::config::{ConfigError, HttpConfig};
pub use crate::drafts::{DraftStore, InMemoryDraftStore, JsonDraftStore};
pub use crate::error::StoreError;
pub use crate::memory::InMemoryRecipeSource;
pub use crate::source::RecipeSource;
pub use crate::types::{
    CommentUpdate, NewComment, NewFavorite, NewRating, NewRecipe, NewUser, RatingUpdate,
    RemoteComment, RemoteFavorite, RemoteRating, RemoteUser, UserUpdate,
};

#[cfg(feature = "http")]
pub use crate::http::HttpRecipeSource;
