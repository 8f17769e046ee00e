//! Password Reset Handlers

use std::{fmt, sync::Arc};

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::{auth::errors::into_status_error, extensions::*, state::State};

/// Forgot Password Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ForgotPasswordRequest {
    pub email: String,
}

/// Reset Password Request
#[derive(Serialize, Deserialize, ToSchema)]
pub(crate) struct ResetPasswordRequest {
    /// Token from the password reset email
    pub token_uid: String,
    pub password: String,
}

impl fmt::Debug for ResetPasswordRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ResetPasswordRequest { .. }")
    }
}

/// Forgot Password Handler
///
/// Emails a reset token to the user.
#[endpoint(
    tags("auth"),
    summary = "Forgot Password",
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Reset email queued"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn forgot(
    json: JsonBody<ForgotPasswordRequest>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .auth
        .forgot_password(&json.into_inner().email)
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Reset Password Handler
#[endpoint(
    tags("auth"),
    summary = "Reset Password",
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Password changed"),
        (status_code = StatusCode::NOT_FOUND, description = "Unknown reset token"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn reset(
    json: JsonBody<ResetPasswordRequest>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    state
        .app
        .auth
        .reset_password(&request.token_uid, Zeroizing::new(request.password))
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use serde_json::json;
    use testresult::TestResult;

    use shoeclean_app::auth::{AuthServiceError, MockAuthService};

    use crate::test_helpers::Mocks;

    use super::*;

    fn make_service(auth: MockAuthService) -> Service {
        Mocks {
            auth,
            ..Mocks::default()
        }
        .anonymous_service(
            Router::with_path("auth/passwords")
                .push(Router::with_path("forgot").post(forgot))
                .push(Router::with_path("reset").post(reset)),
        )
    }

    #[tokio::test]
    async fn test_forgot_password_returns_204() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_forgot_password()
            .once()
            .withf(|email| email == "budi@example.com")
            .return_once(|_| Ok(()));

        let res = TestClient::post("http://example.com/auth/passwords/forgot")
            .json(&json!({ "email": "budi@example.com" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn test_forgot_password_for_unknown_email_returns_404() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_forgot_password()
            .once()
            .return_once(|_| Err(AuthServiceError::NotFound));

        let res = TestClient::post("http://example.com/auth/passwords/forgot")
            .json(&json!({ "email": "nobody@example.com" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_reset_password_returns_204() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_reset_password()
            .once()
            .withf(|token, password| token == "abc123" && password.as_str() == "new-password")
            .return_once(|_, _| Ok(()));

        let res = TestClient::post("http://example.com/auth/passwords/reset")
            .json(&json!({ "token_uid": "abc123", "password": "new-password" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }
}
