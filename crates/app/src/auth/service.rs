//! Auth service.

use std::sync::LazyLock;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rand::{RngCore, rngs::OsRng};
use regex::Regex;
use tracing::{Span, info};
use zeroize::Zeroizing;

use crate::{
    auth::{
        AuthServiceError, Credentials, IssuedToken, JwtManager, NewUser, Principal, RoleName,
        UserAttributes, UserRecord, UserUuid, hash_password,
        repository::{PgAuthRepository, UserInsert},
        verify_password,
    },
    database::Db,
    domain::accounts::{records::AccountUuid, repository::PgAccountsRepository},
    events::{AppEvent, EventBus},
};

/// Minimum number of characters in a password.
pub const MIN_PASSWORD_LENGTH: usize = 8;

const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,6}$";

const RESET_TOKEN_BYTES: usize = 32;

static EMAIL_REGEX: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(EMAIL_PATTERN).ok());

/// Whether `email` looks like a deliverable address.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX
        .as_ref()
        .is_some_and(|regex| regex.is_match(email))
}

fn check_password(password: &str) -> Result<(), AuthServiceError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthServiceError::WeakPassword(MIN_PASSWORD_LENGTH));
    }

    Ok(())
}

fn generate_reset_token() -> String {
    let mut bytes = Zeroizing::new([0_u8; RESET_TOKEN_BYTES]);

    OsRng.fill_bytes(bytes.as_mut());

    bytes.iter().map(|byte| format!("{byte:02x}")).collect()
}

#[derive(Debug, Clone)]
pub struct PgAuthService {
    db: Db,
    users: PgAuthRepository,
    accounts: PgAccountsRepository,
    jwt: JwtManager,
    events: EventBus,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db, jwt: JwtManager, events: EventBus) -> Self {
        Self {
            db,
            users: PgAuthRepository::new(),
            accounts: PgAccountsRepository::new(),
            jwt,
            events,
        }
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    #[tracing::instrument(
        name = "auth.service.register",
        skip(self, user),
        fields(user_uuid = tracing::field::Empty, account_uuid = tracing::field::Empty),
        err
    )]
    async fn register(&self, user: NewUser) -> Result<UserRecord, AuthServiceError> {
        let email = user.email.trim();

        if !is_valid_email(email) {
            return Err(AuthServiceError::InvalidEmail);
        }

        check_password(&user.password)?;

        let mut tx = self.db.begin().await?;

        if self.users.find_user_by_email(&mut tx, email).await?.is_some() {
            return Err(AuthServiceError::DuplicateEmail);
        }

        let password_hash = hash_password(&user.password)?;

        let attributes = UserAttributes {
            name: user.name.clone(),
            mobile: user.mobile.clone(),
        };

        let record = self
            .users
            .create_user(
                &mut tx,
                UserInsert {
                    uuid: UserUuid::new(),
                    email,
                    password_hash: &password_hash,
                    mobile: user.mobile.as_deref(),
                    attributes: &attributes,
                },
            )
            .await?;

        self.users
            .grant_role(&mut tx, record.uuid, RoleName::User)
            .await?;

        let account = self
            .accounts
            .create_account(&mut tx, AccountUuid::new(), record.uuid, user.name.as_deref())
            .await?;

        tx.commit().await?;

        let span = Span::current();

        span.record("user_uuid", tracing::field::display(record.uuid));
        span.record("account_uuid", tracing::field::display(account.uuid));

        info!(user_uuid = %record.uuid, account_uuid = %account.uuid, "registered user");

        self.events.publish(AppEvent::UserRegistered {
            email: record.email.clone(),
            name: user.name,
        });

        Ok(record)
    }

    #[tracing::instrument(
        name = "auth.service.login",
        skip(self, credentials),
        fields(user_uuid = tracing::field::Empty),
        err
    )]
    async fn login(&self, credentials: Credentials) -> Result<IssuedToken, AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self
            .users
            .find_user_by_email(&mut tx, credentials.email.trim())
            .await?
            .ok_or(AuthServiceError::BadCredentials)?;

        if !verify_password(&credentials.password, &user.password_hash) {
            return Err(AuthServiceError::BadCredentials);
        }

        Span::current().record("user_uuid", tracing::field::display(user.uuid));

        let account = self.accounts.get_account_by_user(&mut tx, user.uuid).await?;
        let roles = self.users.list_roles(&mut tx, user.uuid).await?;

        tx.commit().await?;

        let principal = Principal {
            user: user.uuid,
            account: account.uuid,
            roles,
        };

        let bearer_token = self.jwt.issue(&principal, Timestamp::now())?;

        Ok(IssuedToken {
            bearer_token,
            roles: principal.roles,
        })
    }

    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Principal, AuthServiceError> {
        Ok(self.jwt.validate(bearer_token)?)
    }

    #[tracing::instrument(name = "auth.service.roles", skip(self), fields(user_uuid = %user), err)]
    async fn roles(&self, user: UserUuid) -> Result<Vec<RoleName>, AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let roles = self.users.list_roles(&mut tx, user).await?;

        tx.commit().await?;

        Ok(roles)
    }

    #[tracing::instrument(
        name = "auth.service.forgot_password",
        skip(self, email),
        fields(user_uuid = tracing::field::Empty),
        err
    )]
    async fn forgot_password(&self, email: &str) -> Result<(), AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self
            .users
            .find_user_by_email(&mut tx, email.trim())
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        Span::current().record("user_uuid", tracing::field::display(user.uuid));

        let token_uid = generate_reset_token();

        self.users
            .set_token_uid(&mut tx, user.uuid, &token_uid)
            .await?;

        tx.commit().await?;

        info!(user_uuid = %user.uuid, "requested password reset");

        self.events.publish(AppEvent::PasswordResetRequested {
            email: user.email,
            token_uid,
        });

        Ok(())
    }

    #[tracing::instrument(
        name = "auth.service.reset_password",
        skip(self, token_uid, password),
        fields(user_uuid = tracing::field::Empty),
        err
    )]
    async fn reset_password(
        &self,
        token_uid: &str,
        password: Zeroizing<String>,
    ) -> Result<(), AuthServiceError> {
        check_password(&password)?;

        let password_hash = hash_password(&password)?;

        let mut tx = self.db.begin().await?;

        let user = self
            .users
            .reset_password(&mut tx, token_uid, &password_hash)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        tx.commit().await?;

        Span::current().record("user_uuid", tracing::field::display(user));

        info!(user_uuid = %user, "reset password");

        Ok(())
    }

    #[tracing::instrument(
        name = "auth.service.grant_role",
        skip(self, email),
        fields(role = %role),
        err
    )]
    async fn grant_role(&self, email: &str, role: RoleName) -> Result<(), AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self
            .users
            .find_user_by_email(&mut tx, email.trim())
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        self.users.grant_role(&mut tx, user.uuid, role).await?;

        tx.commit().await?;

        info!(user_uuid = %user.uuid, role = %role, "granted role");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create a user with `ROLE_USER` and an empty account.
    async fn register(&self, user: NewUser) -> Result<UserRecord, AuthServiceError>;

    /// Exchange credentials for a signed bearer token.
    async fn login(&self, credentials: Credentials) -> Result<IssuedToken, AuthServiceError>;

    /// Resolve a bearer token to the caller it was issued to.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Principal, AuthServiceError>;

    /// Roles currently granted to a user.
    async fn roles(&self, user: UserUuid) -> Result<Vec<RoleName>, AuthServiceError>;

    /// Issue a password reset token and notify the user.
    async fn forgot_password(&self, email: &str) -> Result<(), AuthServiceError>;

    /// Set a new password using a reset token.
    async fn reset_password(
        &self,
        token_uid: &str,
        password: Zeroizing<String>,
    ) -> Result<(), AuthServiceError>;

    /// Grant a role to the user with the given email.
    async fn grant_role(&self, email: &str, role: RoleName) -> Result<(), AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::{TestContext, helpers::new_user};

    use super::*;

    #[test]
    fn email_pattern_compiles_and_matches() {
        assert!(EMAIL_REGEX.is_some());
        assert!(is_valid_email("budi.santoso+shoes@example.co.id"));
        assert!(!is_valid_email("budi@localhost"));
        assert!(!is_valid_email("not an email"));
    }

    #[test]
    fn reset_tokens_are_random_hex() {
        let first = generate_reset_token();

        assert_eq!(first.len(), RESET_TOKEN_BYTES * 2);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(first, generate_reset_token());
    }

    #[tokio::test]
    async fn register_grants_user_role_and_publishes_event() -> TestResult {
        let mut ctx = TestContext::new().await;

        let user = ctx.auth.register(new_user("budi@example.com")).await?;

        assert_eq!(user.email, "budi@example.com");
        assert_ne!(user.password_hash, "password123");
        assert_eq!(ctx.auth.roles(user.uuid).await?, vec![RoleName::User]);

        assert_eq!(
            ctx.events.try_recv()?,
            AppEvent::UserRegistered {
                email: "budi@example.com".to_string(),
                name: Some("Test Customer".to_string()),
            }
        );

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_case_insensitively() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.auth.register(new_user("budi@example.com")).await?;

        let result = ctx.auth.register(new_user("BUDI@example.com")).await;

        assert!(
            matches!(result, Err(AuthServiceError::DuplicateEmail)),
            "expected DuplicateEmail, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn invalid_registration_is_rejected() {
        let ctx = TestContext::new().await;

        let result = ctx.auth.register(new_user("not-an-email")).await;

        assert!(matches!(result, Err(AuthServiceError::InvalidEmail)));

        let mut user = new_user("budi@example.com");
        user.password = Zeroizing::new("short".to_string());

        let result = ctx.auth.register(user).await;

        assert!(matches!(result, Err(AuthServiceError::WeakPassword(8))));
    }

    #[tokio::test]
    async fn login_issues_token_for_account() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.auth.register(new_user("budi@example.com")).await?;

        let issued = ctx
            .auth
            .login(Credentials {
                email: "budi@example.com".to_string(),
                password: Zeroizing::new("password123".to_string()),
            })
            .await?;

        let principal = ctx.auth.authenticate_bearer(&issued.bearer_token).await?;

        assert_eq!(issued.roles, vec![RoleName::User]);
        assert_eq!(principal.roles, vec![RoleName::User]);

        Ok(())
    }

    #[tokio::test]
    async fn login_with_wrong_password_is_bad_credentials() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.auth.register(new_user("budi@example.com")).await?;

        for (email, password) in [
            ("budi@example.com", "wrong-password"),
            ("nobody@example.com", "password123"),
        ] {
            let result = ctx
                .auth
                .login(Credentials {
                    email: email.to_string(),
                    password: Zeroizing::new(password.to_string()),
                })
                .await;

            assert!(
                matches!(result, Err(AuthServiceError::BadCredentials)),
                "expected BadCredentials for {email}, got {result:?}"
            );
        }

        Ok(())
    }

    #[tokio::test]
    async fn invalid_bearer_token_is_rejected() {
        let ctx = TestContext::new().await;

        let result = ctx.auth.authenticate_bearer("garbage").await;

        assert!(matches!(result, Err(AuthServiceError::InvalidToken)));
    }

    #[tokio::test]
    async fn password_reset_flow() -> TestResult {
        let mut ctx = TestContext::new().await;

        ctx.auth.register(new_user("budi@example.com")).await?;
        ctx.events.try_recv()?;

        ctx.auth.forgot_password("budi@example.com").await?;

        let AppEvent::PasswordResetRequested { email, token_uid } = ctx.events.try_recv()? else {
            panic!("expected a password reset event");
        };

        assert_eq!(email, "budi@example.com");

        ctx.auth
            .reset_password(&token_uid, Zeroizing::new("new-password".to_string()))
            .await?;

        ctx.auth
            .login(Credentials {
                email: "budi@example.com".to_string(),
                password: Zeroizing::new("new-password".to_string()),
            })
            .await?;

        let reused = ctx
            .auth
            .reset_password(&token_uid, Zeroizing::new("another-password".to_string()))
            .await;

        assert!(matches!(reused, Err(AuthServiceError::NotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn forgot_password_for_unknown_email_is_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.auth.forgot_password("nobody@example.com").await;

        assert!(matches!(result, Err(AuthServiceError::NotFound)));
    }

    #[tokio::test]
    async fn grant_role_adds_admin() -> TestResult {
        let ctx = TestContext::new().await;

        let user = ctx.auth.register(new_user("admin@example.com")).await?;

        ctx.auth.grant_role("admin@example.com", RoleName::Admin).await?;
        ctx.auth.grant_role("admin@example.com", RoleName::Admin).await?;

        assert_eq!(
            ctx.auth.roles(user.uuid).await?,
            vec![RoleName::Admin, RoleName::User]
        );

        Ok(())
    }
}
