//! Error types produced by the store crate.
//!
//! Store errors are typed so callers can tell a dead network apart from a
//! rejecting service or a corrupt local file, and degrade accordingly: the
//! aggregation layer treats any remote failure as "source unreachable" and
//! falls back to local drafts, while mutation flows surface the error to the
//! user untouched.
//!
//! # Error Categories
//!
//! | Error | Category | Description |
//! |-------|----------|-------------|
//! | [`Transport`](StoreError::Transport) | Remote | Request never produced an HTTP status |
//! | [`Status`](StoreError::Status) | Remote | Service answered with a non-success status |
//! | [`Decode`](StoreError::Decode) | Remote | Response body did not match the expected shape |
//! | [`Io`](StoreError::Io) | Local | Draft file could not be written |
//! | [`Serialize`](StoreError::Serialize) | Local | Draft list could not be encoded |
//!
//! Draft *reads* never error: [`DraftStore::read_drafts`](crate::DraftStore::read_drafts)
//! degrades to an empty list instead.
use thiserror::Error;

/// Errors from the remote recipe service client and the local draft store.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    /// Network-level failure: DNS, connect, TLS, or timeout before any
    /// HTTP status was available.
    #[error("transport failure for `{path}`: {message}")]
    Transport { path: String, message: String },

    /// The service answered with a non-success HTTP status.
    #[error("request to `{path}` failed with status {status}")]
    Status { path: String, status: u16 },

    /// The response body arrived but could not be decoded.
    #[error("response from `{path}` could not be decoded: {message}")]
    Decode { path: String, message: String },

    /// The draft file could not be written.
    #[error("draft store I/O failure at `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The draft list could not be encoded for persistence.
    #[error("draft serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StoreError {
    /// True for failures of the remote service (as opposed to local
    /// persistence). The catalog's local-fallback policy keys off this.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            StoreError::Transport { .. } | StoreError::Status { .. } | StoreError::Decode { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_and_local_failures_are_distinguishable() {
        let transport = StoreError::Transport {
            path: "/recipe/getAllRecipes".into(),
            message: "connection refused".into(),
        };
        let status = StoreError::Status {
            path: "/recipe/insertRecipe".into(),
            status: 500,
        };
        let io = StoreError::Io {
            path: "drafts.json".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };

        assert!(transport.is_remote());
        assert!(status.is_remote());
        assert!(!io.is_remote());
    }

    #[test]
    fn messages_carry_the_failing_path() {
        let err = StoreError::Status {
            path: "/recipe/admin/approve/7".into(),
            status: 403,
        };
        let rendered = err.to_string();
        assert!(rendered.contains("/recipe/admin/approve/7"));
        assert!(rendered.contains("403"));
    }
}
