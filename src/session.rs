//! Session identity and account management.
//!
//! The recipe service has no login endpoint. The client signs in by fetching
//! the account list and matching email and password locally, then keeps the
//! matched identity around for the lifetime of the tab. [`AccountService`]
//! implements that flow; the other services take the resulting [`Session`]
//! by reference. Anonymity is the absence of a `Session`, not a variant of
//! one.
//!
//! All field validation happens here, before anything touches the wire, so
//! a form can reject bad input even while the service is unreachable.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use store::{NewUser, RecipeSource, RemoteUser, UserUpdate};

use crate::ServiceError;

const MIN_USERNAME_CHARS: usize = 3;
const MIN_PASSWORD_CHARS: usize = 8;

/// A signed-in user, held client-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: i64,
    pub nickname: String,
    pub email: String,
    pub is_admin: bool,
}

impl Session {
    /// Map a service account row into the client-side identity shape.
    pub fn from_user(user: &RemoteUser) -> Self {
        Session {
            id: user.user_id,
            nickname: user.username.clone(),
            email: user.email.clone(),
            is_admin: user.admin,
        }
    }
}

/// Registration, sign-in, and profile management over the account endpoints.
pub struct AccountService {
    source: Arc<dyn RecipeSource>,
}

impl AccountService {
    pub fn new(source: Arc<dyn RecipeSource>) -> Self {
        AccountService { source }
    }

    /// Create an account and sign it in.
    ///
    /// The service stores duplicate emails without complaint, so uniqueness
    /// is checked here against the full account list before the insert.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, ServiceError> {
        let username = username.trim();
        if username.chars().count() < MIN_USERNAME_CHARS {
            return Err(ServiceError::UsernameTooShort);
        }
        if !valid_email(email) {
            return Err(ServiceError::InvalidEmail);
        }
        if password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(ServiceError::PasswordTooShort);
        }

        let users = self.source.fetch_users(None).await?;
        if users.iter().any(|user| user.email == email) {
            return Err(ServiceError::DuplicateEmail);
        }

        let created = self
            .source
            .register_user(&NewUser {
                username: username.to_string(),
                email: email.to_string(),
                password: password.to_string(),
            })
            .await?;
        info!(user_id = created.user_id, "register_success");
        Ok(Session::from_user(&created))
    }

    /// Sign in by matching email and password against the account list.
    ///
    /// Matching is exact, including case. Anything that does not line up
    /// collapses into [`ServiceError::InvalidCredentials`]; the caller never
    /// learns whether the email exists.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ServiceError> {
        if !valid_email(email) {
            return Err(ServiceError::InvalidEmail);
        }
        if password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(ServiceError::PasswordTooShort);
        }

        let users = self.source.fetch_users(None).await?;
        let matched = users
            .iter()
            .find(|user| user.email == email && user.password.as_deref() == Some(password));
        match matched {
            Some(user) => {
                info!(user_id = user.user_id, admin = user.admin, "login_success");
                Ok(Session::from_user(user))
            }
            None => Err(ServiceError::InvalidCredentials),
        }
    }

    /// One account row, for profile views.
    pub async fn profile(&self, user_id: i64) -> Result<RemoteUser, ServiceError> {
        Ok(self.source.fetch_user(user_id).await?)
    }

    /// Update the signed-in user's own account and return the refreshed
    /// session. Fields left `None` keep their stored values.
    pub async fn update_profile(
        &self,
        session: &Session,
        update: &UserUpdate,
    ) -> Result<Session, ServiceError> {
        if let Some(username) = &update.username {
            if username.trim().chars().count() < MIN_USERNAME_CHARS {
                return Err(ServiceError::UsernameTooShort);
            }
        }
        if let Some(email) = &update.email {
            if !valid_email(email) {
                return Err(ServiceError::InvalidEmail);
            }
        }
        if let Some(password) = &update.password {
            if password.chars().count() < MIN_PASSWORD_CHARS {
                return Err(ServiceError::PasswordTooShort);
            }
        }

        let updated = self
            .source
            .update_user(session.id, update, Some(session.id))
            .await?;
        Ok(Session::from_user(&updated))
    }

    /// Delete the signed-in user's own account. The session is dead after
    /// this; drop it.
    pub async fn delete_account(&self, session: &Session) -> Result<(), ServiceError> {
        self.source
            .delete_user(session.id, Some(session.id))
            .await?;
        Ok(())
    }
}

/// Shape check for emails: one `@`, a dot somewhere after it, no whitespace,
/// every part non-empty. Deliverability is the service's problem.
fn valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    let clean = |part: &str| {
        !part.is_empty() && !part.contains('@') && !part.contains(char::is_whitespace)
    };
    clean(local) && clean(host) && clean(tld)
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::InMemoryRecipeSource;

    fn service_with_source() -> (AccountService, Arc<InMemoryRecipeSource>) {
        let source = Arc::new(InMemoryRecipeSource::new());
        (AccountService::new(source.clone()), source)
    }

    #[tokio::test]
    async fn register_then_login_round_trip() {
        let (service, _) = service_with_source();

        let session = service
            .register("  maria  ", "maria@example.com", "longenough")
            .await
            .expect("registration should succeed");
        assert_eq!(session.nickname, "maria");
        assert!(!session.is_admin);

        let again = service
            .login("maria@example.com", "longenough")
            .await
            .expect("login should succeed");
        assert_eq!(again, session);
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email() {
        let (service, source) = service_with_source();
        source.add_user("first", "taken@example.com", "password1", false);

        let result = service
            .register("second", "taken@example.com", "password2")
            .await;
        assert!(matches!(result, Err(ServiceError::DuplicateEmail)));
    }

    #[tokio::test]
    async fn validation_runs_before_the_wire() {
        let (service, source) = service_with_source();
        source.set_offline(true);

        let result = service.register("ab", "a@b.c", "longenough").await;
        assert!(matches!(result, Err(ServiceError::UsernameTooShort)));

        let result = service.login("maria@example.com", "short").await;
        assert!(matches!(result, Err(ServiceError::PasswordTooShort)));
    }

    #[tokio::test]
    async fn login_matches_password_exactly() {
        let (service, source) = service_with_source();
        source.add_user("maria", "maria@example.com", "PassWord99", false);

        let result = service.login("maria@example.com", "password99").await;
        assert!(matches!(result, Err(ServiceError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn login_matches_email_case_sensitively() {
        let (service, source) = service_with_source();
        source.add_user("maria", "maria@example.com", "PassWord99", false);

        let result = service.login("Maria@example.com", "PassWord99").await;
        assert!(matches!(result, Err(ServiceError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn admin_flag_flows_into_session() {
        let (service, source) = service_with_source();
        source.add_user("root", "admin@example.com", "opensesame", true);

        let session = service
            .login("admin@example.com", "opensesame")
            .await
            .expect("admin login should succeed");
        assert!(session.is_admin);
    }

    #[tokio::test]
    async fn update_profile_refreshes_session() {
        let (service, _) = service_with_source();
        let session = service
            .register("maria", "maria@example.com", "longenough")
            .await
            .expect("registration should succeed");

        let update = UserUpdate {
            username: Some("maria_v2".into()),
            ..UserUpdate::default()
        };
        let refreshed = service
            .update_profile(&session, &update)
            .await
            .expect("update should succeed");
        assert_eq!(refreshed.nickname, "maria_v2");
        assert_eq!(refreshed.email, session.email);
    }

    #[test]
    fn email_shape_checks() {
        assert!(valid_email("user@example.com"));
        assert!(valid_email("first.last@sub.example.co"));
        assert!(!valid_email("no-at-sign.example.com"));
        assert!(!valid_email("two@@example.com"));
        assert!(!valid_email("spaced name@example.com"));
        assert!(!valid_email("user@example"));
        assert!(!valid_email("user@.com"));
        assert!(!valid_email("@example.com"));
        assert!(!valid_email("user@example."));
    }
}
