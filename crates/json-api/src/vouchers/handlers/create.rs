//! Create Voucher Handler

use std::sync::Arc;

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use shoeclean::vouchers::{AmountType, VoucherType};
use shoeclean_app::domain::vouchers::data::NewVoucher;

use crate::{
    extensions::*,
    state::State,
    vouchers::{errors::into_status_error, get::VoucherResponse},
};

/// Create Voucher Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateVoucherRequest {
    pub code: String,

    /// DISCOUNT or FREE_PAIR
    pub voucher_type: String,

    /// AMOUNT or PERCENTAGE, defaults to AMOUNT
    #[serde(default)]
    pub amount_type: Option<String>,

    /// Currency amount, percentage or number of free pairs
    pub amount: String,

    /// Number of redemptions
    pub quantity: i32,

    /// RFC 3339 timestamp
    pub expired_at: String,
}

impl TryFrom<CreateVoucherRequest> for NewVoucher {
    type Error = StatusError;

    fn try_from(request: CreateVoucherRequest) -> Result<Self, Self::Error> {
        let amount_type = match request.amount_type {
            Some(amount_type) => amount_type.parse::<AmountType>().or_400("invalid amount_type")?,
            None => AmountType::default(),
        };

        Ok(NewVoucher {
            code: request.code,
            voucher_type: request
                .voucher_type
                .parse::<VoucherType>()
                .or_400("invalid voucher_type")?,
            amount_type,
            amount: request.amount.parse::<Decimal>().or_400("invalid amount")?,
            quantity: request.quantity,
            expired_at: request
                .expired_at
                .parse::<Timestamp>()
                .or_400("invalid expired_at")?,
        })
    }
}

/// Create Voucher Handler
#[endpoint(
    tags("backoffice"),
    summary = "Create Voucher",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Voucher created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::CONFLICT, description = "Voucher code already exists"),
        (status_code = StatusCode::FORBIDDEN, description = "ROLE_ADMIN is required"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateVoucherRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<VoucherResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let voucher = NewVoucher::try_from(json.into_inner())?;

    let voucher = state
        .app
        .vouchers
        .create_voucher(voucher)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/v1/vouchers/{}", voucher.code), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(voucher.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use shoeclean_app::domain::vouchers::{MockVouchersService, VouchersServiceError};

    use crate::test_helpers::{Mocks, make_voucher};

    use super::*;

    fn make_service(vouchers: MockVouchersService) -> Service {
        Mocks {
            vouchers,
            ..Mocks::default()
        }
        .admin_service(Router::with_path("backoffice/vouchers").post(handler))
    }

    #[tokio::test]
    async fn test_create_free_pair_voucher() -> TestResult {
        let mut vouchers = MockVouchersService::new();

        vouchers
            .expect_create_voucher()
            .once()
            .withf(|voucher| {
                voucher.voucher_type == VoucherType::FreePair
                    && voucher.amount_type == AmountType::Amount
                    && voucher.amount == Decimal::ONE
                    && voucher.quantity == 50
            })
            .return_once(|voucher| Ok(make_voucher(&voucher.code)));

        let mut res = TestClient::post("http://example.com/backoffice/vouchers")
            .json(&json!({
                "code": "GRATIS1",
                "voucher_type": "FREE_PAIR",
                "amount": "1",
                "quantity": 50,
                "expired_at": "2030-01-01T00:00:00Z"
            }))
            .send(&make_service(vouchers))
            .await;

        let body: VoucherResponse = res.take_json().await?;
        let location = res.headers().get(LOCATION).and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some("/v1/vouchers/GRATIS1"));
        assert_eq!(body.code, "GRATIS1");

        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_expiry_returns_400() -> TestResult {
        let mut vouchers = MockVouchersService::new();

        vouchers.expect_create_voucher().never();

        let res = TestClient::post("http://example.com/backoffice/vouchers")
            .json(&json!({
                "code": "GRATIS1",
                "voucher_type": "FREE_PAIR",
                "amount": "1",
                "quantity": 50,
                "expired_at": "next tuesday"
            }))
            .send(&make_service(vouchers))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_code_returns_409() -> TestResult {
        let mut vouchers = MockVouchersService::new();

        vouchers
            .expect_create_voucher()
            .once()
            .return_once(|_| Err(VouchersServiceError::AlreadyExists));

        let res = TestClient::post("http://example.com/backoffice/vouchers")
            .json(&json!({
                "code": "HEMAT10",
                "voucher_type": "DISCOUNT",
                "amount_type": "PERCENTAGE",
                "amount": "10",
                "quantity": 5,
                "expired_at": "2030-01-01T00:00:00Z"
            }))
            .send(&make_service(vouchers))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
