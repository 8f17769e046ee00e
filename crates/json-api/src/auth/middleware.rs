//! Auth middleware.

use std::sync::Arc;

use salvo::{http::header::AUTHORIZATION, prelude::*};

use shoeclean_app::auth::{AuthServiceError, Principal, RoleName};

use crate::{auth::errors::into_status_error, extensions::*, state::State};

/// Resolve the bearer token to a [`Principal`] in the depot.
#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    match authenticate(req, depot).await {
        Ok(principal) => {
            depot.insert_principal(principal);
            ctrl.call_next(req, depot, res).await;
        }
        Err(error) => reject(res, ctrl, error),
    }
}

/// Only let callers holding `ROLE_ADMIN` through.
#[salvo::handler]
pub(crate) async fn require_admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let admitted = depot.principal_or_401().and_then(|principal| {
        if principal.has_role(RoleName::Admin) {
            Ok(())
        } else {
            Err(StatusError::forbidden().brief("ROLE_ADMIN is required"))
        }
    });

    match admitted {
        Ok(()) => {
            ctrl.call_next(req, depot, res).await;
        }
        Err(error) => reject(res, ctrl, error),
    }
}

async fn authenticate(req: &Request, depot: &Depot) -> Result<Principal, StatusError> {
    let token = extract_bearer_token(req).ok_or_else(|| {
        StatusError::unauthorized().brief("Missing or invalid Authorization header")
    })?;

    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .auth
        .authenticate_bearer(token)
        .await
        .map_err(|error| match error {
            AuthServiceError::NotFound => {
                StatusError::unauthorized().brief("Bearer token is invalid or expired")
            }
            error => into_status_error(error),
        })
}

fn reject(res: &mut Response, ctrl: &mut FlowCtrl, error: StatusError) {
    res.render(error);
    ctrl.skip_rest();
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}

#[cfg(test)]
mod tests {
    use salvo::{
        affix_state::inject,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use shoeclean_app::auth::MockAuthService;

    use crate::test_helpers::{
        Mocks, TEST_ACCOUNT_UUID, inject_admin, inject_customer, test_principal,
    };

    use super::*;

    #[salvo::handler]
    async fn echo_account(depot: &mut Depot, res: &mut Response) {
        let account = depot
            .account_or_401()
            .map_or_else(|_missing| "missing".to_owned(), |uuid| uuid.to_string());

        res.render(account);
    }

    fn make_service(auth: MockAuthService) -> Service {
        let state = Mocks {
            auth,
            ..Mocks::default()
        }
        .into_state();

        Service::new(
            Router::new()
                .hoop(inject(state))
                .hoop(handler)
                .push(Router::new().get(echo_account)),
        )
    }

    fn expect_no_authentication() -> MockAuthService {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer().never();

        auth
    }

    #[tokio::test]
    async fn test_missing_authorization_header_returns_401() -> TestResult {
        let res = TestClient::get("http://example.com")
            .send(&make_service(expect_no_authentication()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_non_bearer_authorization_header_returns_401() -> TestResult {
        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Basic abc123", true)
            .send(&make_service(expect_no_authentication()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_token_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .once()
            .withf(|token| token == "abc123")
            .return_once(|_| Err(AuthServiceError::InvalidToken));

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer abc123", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_valid_token_injects_principal() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .once()
            .withf(|token| token == "abc123")
            .return_once(|_| Ok(test_principal(vec![RoleName::User])));

        let mut res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "bearer abc123", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, TEST_ACCOUNT_UUID.to_string());

        Ok(())
    }

    #[salvo::handler]
    async fn ok() -> &'static str {
        "ok"
    }

    #[tokio::test]
    async fn test_require_admin_rejects_customers_with_403() -> TestResult {
        let service = Service::new(
            Router::new()
                .hoop(inject_customer)
                .hoop(require_admin)
                .get(ok),
        );

        let res = TestClient::get("http://example.com").send(&service).await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_require_admin_rejects_anonymous_with_401() -> TestResult {
        let service = Service::new(Router::new().hoop(require_admin).get(ok));

        let res = TestClient::get("http://example.com").send(&service).await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_require_admin_lets_admins_through() -> TestResult {
        let service = Service::new(
            Router::new()
                .hoop(inject_admin)
                .hoop(require_admin)
                .get(ok),
        );

        let mut res = TestClient::get("http://example.com").send(&service).await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, "ok");

        Ok(())
    }
}
