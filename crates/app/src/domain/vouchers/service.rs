//! Vouchers service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use shoeclean::vouchers;
use tracing::info;

use crate::{
    database::Db,
    domain::vouchers::{
        VouchersServiceError,
        data::NewVoucher,
        records::{VoucherRecord, VoucherUuid},
        repository::PgVouchersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgVouchersService {
    db: Db,
    repository: PgVouchersRepository,
}

impl PgVouchersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgVouchersRepository::new(),
        }
    }
}

#[async_trait]
impl VouchersService for PgVouchersService {
    #[tracing::instrument(name = "vouchers.service.get_voucher", skip(self), err)]
    async fn get_voucher(
        &self,
        code: &str,
        now: Timestamp,
    ) -> Result<VoucherRecord, VouchersServiceError> {
        let mut tx = self.db.begin().await?;

        let voucher = self
            .repository
            .get_voucher_by_code(&mut tx, code.trim())
            .await?;

        tx.commit().await?;

        Ok(vouchers::validate(voucher, now)?)
    }

    #[tracing::instrument(
        name = "vouchers.service.create_voucher",
        skip(self, voucher),
        fields(
            code = %voucher.code,
            voucher_type = %voucher.voucher_type,
            voucher_uuid = tracing::field::Empty
        ),
        err
    )]
    async fn create_voucher(
        &self,
        mut voucher: NewVoucher,
    ) -> Result<VoucherRecord, VouchersServiceError> {
        voucher.code = voucher.code.trim().to_owned();

        if voucher.code.is_empty() {
            return Err(VouchersServiceError::BlankCode);
        }

        let uuid = VoucherUuid::new();

        tracing::Span::current().record("voucher_uuid", tracing::field::display(uuid));

        let mut tx = self.db.begin().await?;

        let record = self.repository.create_voucher(&mut tx, uuid, &voucher).await?;

        tx.commit().await?;

        info!(voucher_uuid = %record.uuid, code = %record.code, "created voucher");

        Ok(record)
    }
}

#[automock]
#[async_trait]
pub trait VouchersService: Send + Sync {
    /// Look up a voucher by code and check it can still be redeemed at `now`.
    async fn get_voucher(
        &self,
        code: &str,
        now: Timestamp,
    ) -> Result<VoucherRecord, VouchersServiceError>;

    /// Create a voucher.
    async fn create_voucher(
        &self,
        voucher: NewVoucher,
    ) -> Result<VoucherRecord, VouchersServiceError>;
}
