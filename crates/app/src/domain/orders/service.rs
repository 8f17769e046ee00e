//! Orders service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rust_decimal::Decimal;
use shoeclean::{
    orders::{OrderStatus, generate_usc_id},
    pricing::{OrderPricing, price_order},
    vouchers::{self, VoucherError},
};
use sqlx::{Postgres, Transaction};
use tracing::{Span, info, warn};

use crate::{
    database::Db,
    domain::{
        accounts::records::AccountUuid,
        addresses::repository::PgAddressesRepository,
        catalogs::{records::CatalogRecord, repository::PgCatalogsRepository},
        orders::{
            OrdersServiceError,
            data::{NewOrder, OrderConfirmation},
            records::{OrderDetails, OrderRecord, OrderUuid},
            repository::{OrderInsert, PgOrdersRepository},
        },
        transactions::{
            records::{TransactionRecord, TransactionUuid},
            repository::PgTransactionsRepository,
        },
        vouchers::{records::VoucherRecord, repository::PgVouchersRepository},
    },
};

/// How many USC IDs are tried before giving up on an order.
pub const USC_ID_ATTEMPTS: usize = 5;

/// Most pairs a single order may hold.
pub const MAX_TOTAL_PAIRS: u32 = 100;

/// Largest amount the `NUMERIC(12, 2)` money columns hold.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2);

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    delivery_fee: Decimal,
    repository: PgOrdersRepository,
    addresses: PgAddressesRepository,
    catalogs: PgCatalogsRepository,
    vouchers: PgVouchersRepository,
    transactions: PgTransactionsRepository,
}

impl PgOrdersService {
    /// `delivery_fee` is added to the total of every order.
    #[must_use]
    pub fn new(db: Db, delivery_fee: Decimal) -> Self {
        Self {
            db,
            delivery_fee,
            repository: PgOrdersRepository::new(),
            addresses: PgAddressesRepository::new(),
            catalogs: PgCatalogsRepository::new(),
            vouchers: PgVouchersRepository::new(),
            transactions: PgTransactionsRepository::new(),
        }
    }

    fn price(
        &self,
        order: &OrderRecord,
        catalog: &CatalogRecord,
        voucher: Option<&VoucherRecord>,
    ) -> Result<OrderPricing, OrdersServiceError> {
        let discount = voucher.map(VoucherRecord::discount);

        let pricing = price_order(
            catalog.price,
            order.total_pairs,
            discount.as_ref(),
            self.delivery_fee,
        )?;

        ensure_storable(&pricing)?;

        Ok(pricing)
    }

    async fn details(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &OrderRecord,
        voucher: Option<&VoucherRecord>,
    ) -> Result<OrderDetails, OrdersServiceError> {
        let address = self
            .addresses
            .get_address(tx, order.account_uuid, order.address_uuid)
            .await
            .map_err(OrdersServiceError::missing(OrdersServiceError::AddressNotFound))?;

        let catalog = self
            .catalogs
            .get_catalog_by_uuid(tx, order.catalog_uuid)
            .await
            .map_err(OrdersServiceError::missing(OrdersServiceError::CatalogNotFound))?;

        let sneakers = self.repository.list_order_sneakers(tx, order.uuid).await?;

        let pricing = self.price(order, &catalog, voucher)?;

        Ok(OrderDetails::new(
            order,
            address,
            sneakers,
            catalog.service_type,
            voucher.map(|voucher| voucher.code.clone()),
            &pricing,
        ))
    }

    async fn voucher_by_code(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &str,
        now: Timestamp,
    ) -> Result<VoucherRecord, OrdersServiceError> {
        let voucher = self
            .vouchers
            .get_voucher_by_code(tx, code.trim())
            .await
            .map_err(OrdersServiceError::missing(OrdersServiceError::VoucherNotFound))?;

        Ok(vouchers::validate(voucher, now)?)
    }
}

/// Reject prices the transaction columns cannot hold.
fn ensure_storable(pricing: &OrderPricing) -> Result<(), OrdersServiceError> {
    if pricing.subtotal > MAX_AMOUNT || pricing.total_amount > MAX_AMOUNT {
        return Err(OrdersServiceError::AmountTooLarge(MAX_AMOUNT));
    }

    Ok(())
}

#[async_trait]
impl OrdersService for PgOrdersService {
    #[tracing::instrument(
        name = "orders.service.get_order",
        skip(self),
        fields(account_uuid = %account),
        err
    )]
    async fn get_order(
        &self,
        account: AccountUuid,
        usc_id: &str,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let order = self.repository.get_order(&mut tx, account, usc_id).await?;

        tx.commit().await?;

        Ok(order)
    }

    #[tracing::instrument(
        name = "orders.service.get_order_details",
        skip(self),
        fields(account_uuid = %account),
        err
    )]
    async fn get_order_details(
        &self,
        account: AccountUuid,
        usc_id: &str,
    ) -> Result<OrderDetails, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let order = self.repository.get_order(&mut tx, account, usc_id).await?;

        let voucher = match order.voucher_uuid {
            Some(voucher) => Some(self.vouchers.get_voucher(&mut tx, voucher).await?),
            None => None,
        };

        let details = self.details(&mut tx, &order, voucher.as_ref()).await?;

        tx.commit().await?;

        Ok(details)
    }

    #[tracing::instrument(
        name = "orders.service.preview_voucher",
        skip(self),
        fields(account_uuid = %account),
        err
    )]
    async fn preview_voucher(
        &self,
        account: AccountUuid,
        usc_id: &str,
        code: &str,
    ) -> Result<OrderDetails, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let order = self.repository.get_order(&mut tx, account, usc_id).await?;
        let voucher = self.voucher_by_code(&mut tx, code, Timestamp::now()).await?;
        let details = self.details(&mut tx, &order, Some(&voucher)).await?;

        tx.rollback().await?;

        Ok(details)
    }

    #[tracing::instrument(
        name = "orders.service.create_order",
        skip(self, order),
        fields(
            account_uuid = %account,
            order_uuid = tracing::field::Empty,
            usc_id = tracing::field::Empty
        ),
        err
    )]
    async fn create_order(
        &self,
        account: AccountUuid,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError> {
        if order.total_pairs == 0 {
            return Err(OrdersServiceError::NoPairs);
        }

        if order.total_pairs > MAX_TOTAL_PAIRS {
            return Err(OrdersServiceError::TooManyPairs(MAX_TOTAL_PAIRS));
        }

        if order.sneakers.is_empty() {
            return Err(OrdersServiceError::NoSneakers);
        }

        let mut tx = self.db.begin().await?;

        let address = self
            .addresses
            .get_address(&mut tx, account, order.address)
            .await
            .map_err(OrdersServiceError::missing(OrdersServiceError::AddressNotFound))?;

        let catalog = self
            .catalogs
            .get_catalog(&mut tx, order.service_type)
            .await
            .map_err(OrdersServiceError::missing(OrdersServiceError::CatalogNotFound))?;

        ensure_storable(&price_order(
            catalog.price,
            order.total_pairs,
            None,
            self.delivery_fee,
        )?)?;

        let uuid = OrderUuid::new();
        let placed_at = Timestamp::now();
        let mut created = None;

        for attempt in 1..=USC_ID_ATTEMPTS {
            let usc_id = generate_usc_id(placed_at, &mut rand::thread_rng());

            let insert = OrderInsert {
                uuid,
                usc_id: &usc_id,
                account,
                address: address.uuid,
                catalog: catalog.uuid,
                total_pairs: order.total_pairs,
            };

            created = self.repository.create_order(&mut tx, insert).await?;

            if created.is_some() {
                break;
            }

            warn!(attempt, usc_id = %usc_id, "USC ID already taken");
        }

        let record = created.ok_or(OrdersServiceError::UscIdExhausted)?;

        let linked = self
            .repository
            .link_sneakers(&mut tx, record.uuid, account, &order.sneakers)
            .await?;

        if linked == 0 {
            return Err(OrdersServiceError::NoSneakers);
        }

        tx.commit().await?;

        let span = Span::current();

        span.record("order_uuid", tracing::field::display(record.uuid));
        span.record("usc_id", record.usc_id.as_str());

        info!(order_uuid = %record.uuid, usc_id = %record.usc_id, "created order");

        Ok(record)
    }

    #[tracing::instrument(
        name = "orders.service.confirm_order",
        skip(self, confirmation),
        fields(
            account_uuid = %account,
            method = %confirmation.method,
            voucher_uuid = tracing::field::Empty
        ),
        err
    )]
    async fn confirm_order(
        &self,
        account: AccountUuid,
        usc_id: &str,
        confirmation: OrderConfirmation,
    ) -> Result<TransactionRecord, OrdersServiceError> {
        let now = Timestamp::now();

        let mut tx = self.db.begin().await?;

        let order = self.repository.lock_order(&mut tx, account, usc_id).await?;

        if order.status != OrderStatus::PendingConfirmation {
            return Err(OrdersServiceError::AlreadyConfirmed);
        }

        let voucher = match confirmation.voucher_code.as_deref() {
            Some(code) if !code.trim().is_empty() => {
                let voucher = self.voucher_by_code(&mut tx, code, now).await?;

                if !self.vouchers.consume_voucher(&mut tx, voucher.uuid, now).await? {
                    return Err(VoucherError::QuotaExceeded { quantity: 0 }.into());
                }

                Span::current().record("voucher_uuid", tracing::field::display(voucher.uuid));

                Some(voucher)
            }
            Some(_) | None => None,
        };

        let catalog = self
            .catalogs
            .get_catalog_by_uuid(&mut tx, order.catalog_uuid)
            .await
            .map_err(OrdersServiceError::missing(OrdersServiceError::CatalogNotFound))?;

        let pricing = self.price(&order, &catalog, voucher.as_ref())?;

        let order = self
            .repository
            .confirm_order(&mut tx, order.uuid, voucher.as_ref().map(|voucher| voucher.uuid))
            .await?;

        let transaction = self
            .transactions
            .create_transaction(
                &mut tx,
                TransactionUuid::new(),
                order.uuid,
                &pricing,
                confirmation.method,
            )
            .await?;

        tx.commit().await?;

        info!(
            order_uuid = %order.uuid,
            transaction_uuid = %transaction.uuid,
            final_amount = %transaction.final_amount,
            "confirmed order"
        );

        Ok(transaction)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Retrieve an order of the account by its USC ID.
    async fn get_order(
        &self,
        account: AccountUuid,
        usc_id: &str,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Price an order using the voucher attached to it, if any.
    async fn get_order_details(
        &self,
        account: AccountUuid,
        usc_id: &str,
    ) -> Result<OrderDetails, OrdersServiceError>;

    /// Price an order with a voucher without redeeming it.
    async fn preview_voucher(
        &self,
        account: AccountUuid,
        usc_id: &str,
        code: &str,
    ) -> Result<OrderDetails, OrdersServiceError>;

    /// Place an order awaiting confirmation.
    async fn create_order(
        &self,
        account: AccountUuid,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Confirm an order, redeeming its voucher and recording the transaction.
    async fn confirm_order(
        &self,
        account: AccountUuid,
        usc_id: &str,
        confirmation: OrderConfirmation,
    ) -> Result<TransactionRecord, OrdersServiceError>;
}
