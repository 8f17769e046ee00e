//! Roles Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{auth::errors::into_status_error, extensions::*, state::State};

/// Roles Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RolesResponse {
    /// Roles currently granted to the caller
    pub roles: Vec<String>,
}

/// Roles Handler
///
/// Reads the caller's roles from storage rather than from the token, so grants
/// made after login are visible.
#[endpoint(
    tags("auth"),
    summary = "Current Roles",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<RolesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.principal_or_401()?.user;

    let roles = state
        .app
        .auth
        .roles(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(RolesResponse {
        roles: roles.iter().map(ToString::to_string).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use shoeclean_app::auth::{MockAuthService, RoleName};

    use crate::test_helpers::{Mocks, TEST_USER_UUID};

    use super::*;

    #[tokio::test]
    async fn test_roles_are_loaded_for_the_caller() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_roles()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(|_| Ok(vec![RoleName::User]));

        let service = Mocks {
            auth,
            ..Mocks::default()
        }
        .customer_service(Router::with_path("auth/roles").get(handler));

        let mut res = TestClient::get("http://example.com/auth/roles")
            .send(&service)
            .await;

        let body: RolesResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.roles, vec!["ROLE_USER"]);

        Ok(())
    }

    #[tokio::test]
    async fn test_anonymous_caller_gets_401() -> TestResult {
        let service = Mocks::default().anonymous_service(Router::with_path("auth/roles").get(handler));

        let res = TestClient::get("http://example.com/auth/roles")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
