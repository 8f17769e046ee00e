//! Get Voucher Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shoeclean_app::domain::vouchers::records::VoucherRecord;

use crate::{extensions::*, state::State, vouchers::errors::into_status_error};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VoucherResponse {
    pub uuid: Uuid,

    pub code: String,

    /// DISCOUNT or FREE_PAIR
    pub voucher_type: String,

    /// AMOUNT or PERCENTAGE
    pub amount_type: String,

    pub amount: String,

    /// Remaining redemptions
    pub quantity: i32,

    pub expired_at: String,
}

impl From<VoucherRecord> for VoucherResponse {
    fn from(voucher: VoucherRecord) -> Self {
        Self {
            uuid: voucher.uuid.into(),
            code: voucher.code,
            voucher_type: voucher.voucher_type.to_string(),
            amount_type: voucher.amount_type.to_string(),
            amount: voucher.amount.to_string(),
            quantity: voucher.quantity,
            expired_at: voucher.expired_at.to_string(),
        }
    }
}

/// Get Voucher Handler
///
/// Only vouchers that can still be redeemed are returned; exhausted or expired
/// vouchers answer 400 with the reason.
#[endpoint(
    tags("vouchers"),
    summary = "Get Voucher",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Voucher is redeemable"),
        (status_code = StatusCode::BAD_REQUEST, description = "Voucher is exhausted or expired"),
        (status_code = StatusCode::NOT_FOUND, description = "Voucher not found"),
    ),
)]
pub(crate) async fn handler(
    code: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<VoucherResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let voucher = state
        .app
        .vouchers
        .get_voucher(&code.into_inner(), Timestamp::now())
        .await
        .map_err(into_status_error)?;

    Ok(Json(voucher.into()))
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use shoeclean::vouchers::VoucherError;
    use shoeclean_app::domain::vouchers::{MockVouchersService, VouchersServiceError};

    use crate::test_helpers::{Mocks, make_voucher};

    use super::*;

    fn make_service(vouchers: MockVouchersService) -> Service {
        Mocks {
            vouchers,
            ..Mocks::default()
        }
        .customer_service(Router::with_path("vouchers/{code}").get(handler))
    }

    #[tokio::test]
    async fn test_get_redeemable_voucher() -> TestResult {
        let mut vouchers = MockVouchersService::new();

        vouchers
            .expect_get_voucher()
            .once()
            .withf(|code, _| code == "HEMAT10")
            .return_once(|code, _| Ok(make_voucher(code)));

        let mut res = TestClient::get("http://example.com/vouchers/HEMAT10")
            .send(&make_service(vouchers))
            .await;

        let body: VoucherResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.code, "HEMAT10");
        assert_eq!(body.voucher_type, "DISCOUNT");
        assert_eq!(body.amount, "10000");

        Ok(())
    }

    #[tokio::test]
    async fn test_exhausted_voucher_returns_400() -> TestResult {
        let mut vouchers = MockVouchersService::new();

        vouchers.expect_get_voucher().once().return_once(|_, _| {
            Err(VouchersServiceError::Unavailable(
                VoucherError::QuotaExceeded { quantity: 0 },
            ))
        });

        let res = TestClient::get("http://example.com/vouchers/HEMAT10")
            .send(&make_service(vouchers))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_expired_voucher_returns_400() -> TestResult {
        let mut vouchers = MockVouchersService::new();

        vouchers.expect_get_voucher().once().return_once(|_, now| {
            Err(VouchersServiceError::Unavailable(VoucherError::Expired {
                expired_at: now - SignedDuration::from_hours(1),
            }))
        });

        let res = TestClient::get("http://example.com/vouchers/LAMA")
            .send(&make_service(vouchers))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_voucher_returns_404() -> TestResult {
        let mut vouchers = MockVouchersService::new();

        vouchers
            .expect_get_voucher()
            .once()
            .return_once(|_, _| Err(VouchersServiceError::NotFound));

        let res = TestClient::get("http://example.com/vouchers/NOPE")
            .send(&make_service(vouchers))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
