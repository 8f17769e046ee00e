//! Account Details Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shoeclean_app::domain::accounts::records::AccountDetails;

use crate::{
    accounts::errors::into_status_error, addresses::get::AddressResponse, extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AccountDetailsResponse {
    /// The unique identifier of the account
    pub uuid: Uuid,

    pub name: Option<String>,

    pub email: String,

    pub mobile: Option<String>,

    pub profile_picture_url: Option<String>,

    /// Whether the email address has been verified
    pub is_email_verified: bool,

    /// The address orders are picked up from by default
    pub main_address: Option<AddressResponse>,
}

impl From<AccountDetails> for AccountDetailsResponse {
    fn from(details: AccountDetails) -> Self {
        Self {
            uuid: details.account.into(),
            name: details.name,
            email: details.email,
            mobile: details.mobile,
            profile_picture_url: details.profile_picture_url,
            is_email_verified: details.is_email_verified,
            main_address: details.main_address.map(Into::into),
        }
    }
}

/// Account Details Handler
///
/// Returns the caller's profile.
#[endpoint(
    tags("accounts"),
    summary = "Account Details",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<AccountDetailsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let account = depot.account_or_401()?;

    let details = state
        .app
        .accounts
        .get_account_details(account)
        .await
        .map_err(into_status_error)?;

    Ok(Json(details.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use shoeclean_app::domain::{
        accounts::{AccountsServiceError, MockAccountsService},
        addresses::records::AddressUuid,
    };

    use crate::test_helpers::{Mocks, TEST_ACCOUNT_UUID, make_address};

    use super::*;

    fn make_service(accounts: MockAccountsService) -> Service {
        Mocks {
            accounts,
            ..Mocks::default()
        }
        .customer_service(Router::with_path("accounts/details").get(handler))
    }

    #[tokio::test]
    async fn test_details_include_main_address() -> TestResult {
        let address = AddressUuid::new();
        let mut accounts = MockAccountsService::new();

        accounts
            .expect_get_account_details()
            .once()
            .withf(|account| *account == TEST_ACCOUNT_UUID)
            .return_once(move |account| {
                Ok(AccountDetails {
                    account,
                    name: Some("Budi".to_owned()),
                    email: "budi@example.com".to_owned(),
                    mobile: Some("+628123456789".to_owned()),
                    profile_picture_url: None,
                    is_email_verified: false,
                    main_address: Some(make_address(address)),
                })
            });

        let mut res = TestClient::get("http://example.com/accounts/details")
            .send(&make_service(accounts))
            .await;

        let body: AccountDetailsResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.email, "budi@example.com");
        assert!(!body.is_email_verified);
        assert_eq!(
            body.main_address.map(|main| main.uuid),
            Some(address.into_uuid())
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_account_returns_404() -> TestResult {
        let mut accounts = MockAccountsService::new();

        accounts
            .expect_get_account_details()
            .once()
            .return_once(|_| Err(AccountsServiceError::NotFound));

        let res = TestClient::get("http://example.com/accounts/details")
            .send(&make_service(accounts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
