//! Platter Query Layer
//!
//! Answers the two questions every catalog page asks about a merged recipe
//! list: "which categories exist?" and "which records match this search?".
//!
//! - [`categories`] returns the filter-UI label sequence, sentinel `"All"`
//!   first and exactly once, then distinct cuisines in first-seen order.
//! - [`filter`] applies a validated [`FilterSpec`] (free text, category, and
//!   price range, AND-composed), preserving input order.
//!
//! Specs are built through [`FilterSpec::builder`], which is where invalid
//! input (negative or inverted price bounds) is rejected; the engine itself
//! assumes well-formed specs. Both operations are pure functions over the
//! list they are given.
//!
//! ## Example
//!
//! ```
//! use normalize::{normalize_local, NormalizeConfig, RawLocalRecipe};
//! use query::{categories, filter, FilterSpec};
//!
//! let cfg = NormalizeConfig::default();
//! let records: Vec<_> = [
//!     ("Adobo", "Filipino"),
//!     ("Carbonara", "Italian"),
//! ]
//! .iter()
//! .enumerate()
//! .map(|(i, (name, cuisine))| {
//!     normalize_local(
//!         &RawLocalRecipe {
//!             id: i as i64 + 1,
//!             name: Some((*name).into()),
//!             cuisine: Some((*cuisine).into()),
//!             ..RawLocalRecipe::default()
//!         },
//!         &cfg,
//!     )
//! })
//! .collect();
//!
//! assert_eq!(categories(&records), vec!["All", "Filipino", "Italian"]);
//!
//! let spec = FilterSpec::builder().text("car").build().unwrap();
//! let hits = filter(&records, &spec);
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].name, "Carbonara");
//! ```
mod engine;
mod types;

pub use crate::engine::{categories, filter, matches_spec};
pub use crate::types::{CategoryFilter, FilterSpec, FilterSpecBuilder, QueryError, CATEGORY_ALL};
