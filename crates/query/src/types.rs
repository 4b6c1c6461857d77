//! Filter specification types.
//!
//! [`FilterSpec`] describes one catalog query: free-text search, a category
//! restriction, and an optional price range. Specs are constructed through
//! [`FilterSpec::builder`], which validates price bounds up front; the
//! filter engine itself assumes well-formed input and never re-checks.
use thiserror::Error;

/// Sentinel category meaning "no category restriction".
///
/// Always the first entry of [`categories`](crate::categories) output, and
/// never emitted twice even when a record's cuisine literally carries this
/// value.
pub const CATEGORY_ALL: &str = "All";

/// Category restriction of a filter.
///
/// The builder maps the literal sentinel string (and a missing or blank
/// category) to [`CategoryFilter::All`]; anything else becomes an exact,
/// case-sensitive cuisine match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    /// No restriction.
    All,
    /// Keep only records whose cuisine equals this label exactly.
    Named(String),
}

impl CategoryFilter {
    /// Whether the given cuisine label passes this restriction.
    pub fn admits(&self, cuisine: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            // Exact match, case preserved: "Filipino" and "filipino" are
            // distinct labels at filter time.
            CategoryFilter::Named(wanted) => cuisine == wanted,
        }
    }
}

/// A validated catalog query.
///
/// All predicates combine with logical AND; inactive predicates (empty text,
/// `All` category, absent bounds) admit everything. Construction goes through
/// [`FilterSpec::builder`] so an invalid price range can never reach the
/// filter engine.
///
/// # Examples
///
/// ```rust
/// use query::FilterSpec;
///
/// let spec = FilterSpec::builder()
///     .text("  adobo ")
///     .category("Filipino")
///     .min_price(100.0)
///     .max_price(200.0)
///     .build()
///     .expect("bounds are valid");
///
/// assert_eq!(spec.text(), Some("adobo"));
/// assert!(spec.has_price_bound());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    text: Option<String>,
    category: CategoryFilter,
    min_price: Option<f64>,
    max_price: Option<f64>,
}

impl FilterSpec {
    /// Start building a spec. See [`FilterSpecBuilder`].
    pub fn builder() -> FilterSpecBuilder {
        FilterSpecBuilder::default()
    }

    /// A spec with no active predicate; filtering with it returns the input.
    pub fn unrestricted() -> Self {
        FilterSpec {
            text: None,
            category: CategoryFilter::All,
            min_price: None,
            max_price: None,
        }
    }

    /// Trimmed free-text query, `None` when text search is inactive.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// The category restriction.
    pub fn category(&self) -> &CategoryFilter {
        &self.category
    }

    /// Lower price bound, if active.
    pub fn min_price(&self) -> Option<f64> {
        self.min_price
    }

    /// Upper price bound, if active.
    pub fn max_price(&self) -> Option<f64> {
        self.max_price
    }

    /// True when at least one price bound is active. Unpriced records are
    /// excluded whenever this holds.
    pub fn has_price_bound(&self) -> bool {
        self.min_price.is_some() || self.max_price.is_some()
    }
}

impl Default for FilterSpec {
    fn default() -> Self {
        FilterSpec::unrestricted()
    }
}

/// Builder for [`FilterSpec`].
///
/// Input is taken as it arrives from a search form: raw text, a category
/// label, optional numeric bounds. [`build`](FilterSpecBuilder::build)
/// normalizes the text (trim; blank means inactive), resolves the category
/// sentinel, and validates the price range.
#[derive(Debug, Clone, Default)]
pub struct FilterSpecBuilder {
    text: Option<String>,
    category: Option<String>,
    min_price: Option<f64>,
    max_price: Option<f64>,
}

impl FilterSpecBuilder {
    /// Free-text query. Blank input deactivates text search.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Category label. The sentinel `"All"` (or blank input) means no
    /// restriction.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Lower price bound, inclusive.
    pub fn min_price(mut self, price: f64) -> Self {
        self.min_price = Some(price);
        self
    }

    /// Upper price bound, inclusive.
    pub fn max_price(mut self, price: f64) -> Self {
        self.max_price = Some(price);
        self
    }

    /// Validate and construct the spec.
    ///
    /// # Errors
    ///
    /// - [`QueryError::NonFinitePrice`] for NaN or infinite bounds
    /// - [`QueryError::NegativePrice`] for bounds below zero
    /// - [`QueryError::InvertedPriceRange`] when min exceeds max
    pub fn build(self) -> Result<FilterSpec, QueryError> {
        if let Some(min) = self.min_price {
            validate_bound("min_price", min)?;
        }
        if let Some(max) = self.max_price {
            validate_bound("max_price", max)?;
        }
        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            if min > max {
                return Err(QueryError::InvertedPriceRange { min, max });
            }
        }

        let text = self
            .text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from);

        let category = match self.category.as_deref().map(str::trim) {
            None | Some("") => CategoryFilter::All,
            Some(label) if label == CATEGORY_ALL => CategoryFilter::All,
            Some(label) => CategoryFilter::Named(label.to_string()),
        };

        Ok(FilterSpec {
            text,
            category,
            min_price: self.min_price,
            max_price: self.max_price,
        })
    }
}

fn validate_bound(bound: &'static str, value: f64) -> Result<(), QueryError> {
    if !value.is_finite() {
        return Err(QueryError::NonFinitePrice { bound, value });
    }
    if value < 0.0 {
        return Err(QueryError::NegativePrice { bound, value });
    }
    Ok(())
}

/// Errors produced when building a [`FilterSpec`].
///
/// These surface to the search form before any filtering happens; the filter
/// engine never sees an invalid specification.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum QueryError {
    /// A price bound was NaN or infinite.
    #[error("price bound `{bound}` must be a finite number")]
    NonFinitePrice { bound: &'static str, value: f64 },
    /// A price bound was below zero.
    #[error("price bound `{bound}` must be non-negative, got {value}")]
    NegativePrice { bound: &'static str, value: f64 },
    /// The lower bound exceeded the upper bound.
    #[error("price range is inverted: min {min} exceeds max {max}")]
    InvertedPriceRange { min: f64, max: f64 },
}
