//! Test helpers.

use std::sync::Arc;

use jiff::{SignedDuration, Timestamp};
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use shoeclean::{
    catalog::ServiceType,
    orders::OrderStatus,
    vouchers::{AmountType, VoucherType},
};
use shoeclean_app::{
    auth::{MockAuthService, Principal, RoleName, UserUuid},
    context::AppContext,
    domain::{
        accounts::{MockAccountsService, records::AccountUuid},
        addresses::{
            MockAddressesService,
            records::{AddressRecord, AddressUuid},
        },
        catalogs::MockCatalogsService,
        notifications::MockNotificationsService,
        orders::{MockOrdersService, records::OrderDetails},
        sneakers::{
            MockSneakersService,
            records::{SneakerRecord, SneakerUuid},
        },
        transactions::MockTransactionsService,
        vouchers::{
            MockVouchersService,
            records::{VoucherRecord, VoucherUuid},
        },
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_ACCOUNT_UUID: AccountUuid = AccountUuid::from_uuid(Uuid::nil());

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::max());

pub(crate) fn test_principal(roles: Vec<RoleName>) -> Principal {
    Principal {
        user: TEST_USER_UUID,
        account: TEST_ACCOUNT_UUID,
        roles,
    }
}

#[salvo::handler]
pub(crate) async fn inject_customer(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_principal(test_principal(vec![RoleName::User]));
    ctrl.call_next(req, depot, res).await;
}

#[salvo::handler]
pub(crate) async fn inject_admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_principal(test_principal(vec![RoleName::Admin, RoleName::User]));
    ctrl.call_next(req, depot, res).await;
}

pub(crate) fn make_address(uuid: AddressUuid) -> AddressRecord {
    AddressRecord {
        uuid,
        account_uuid: TEST_ACCOUNT_UUID,
        label: "Home".to_owned(),
        line: "Jl. Sudirman 1".to_owned(),
        city: "Jakarta".to_owned(),
        district: "Tanah Abang".to_owned(),
        subdistrict: "Bendungan Hilir".to_owned(),
        state: "DKI Jakarta".to_owned(),
        is_main: false,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_sneaker(uuid: SneakerUuid) -> SneakerRecord {
    SneakerRecord {
        uuid,
        account_uuid: TEST_ACCOUNT_UUID,
        brand: "Nike".to_owned(),
        color: "White".to_owned(),
        image_url: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// Two pairs of deep cleaning at 15000, no voucher, no delivery fee.
pub(crate) fn make_order_details(usc_id: &str) -> OrderDetails {
    OrderDetails {
        usc_id: usc_id.to_owned(),
        address: make_address(AddressUuid::new()),
        sneakers: vec![SneakerUuid::new()],
        total_pairs: 2,
        service_type: ServiceType::DeepCleaning,
        status: OrderStatus::PendingConfirmation,
        voucher_code: None,
        price: Decimal::from(15_000),
        subtotal: Decimal::from(30_000),
        discount: Decimal::ZERO,
        delivery_fee: Decimal::ZERO,
        total_amount: Decimal::from(30_000),
    }
}

/// A flat 10000 discount voucher with plenty of quota left.
pub(crate) fn make_voucher(code: &str) -> VoucherRecord {
    VoucherRecord {
        uuid: VoucherUuid::new(),
        code: code.to_owned(),
        voucher_type: VoucherType::Discount,
        amount_type: AmountType::Amount,
        amount: Decimal::from(10_000),
        quantity: 10,
        expired_at: Timestamp::now() + SignedDuration::from_hours(24 * 30),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// One mock per service; anything a test does not replace rejects every call.
pub(crate) struct Mocks {
    pub(crate) auth: MockAuthService,
    pub(crate) accounts: MockAccountsService,
    pub(crate) addresses: MockAddressesService,
    pub(crate) catalogs: MockCatalogsService,
    pub(crate) sneakers: MockSneakersService,
    pub(crate) vouchers: MockVouchersService,
    pub(crate) orders: MockOrdersService,
    pub(crate) transactions: MockTransactionsService,
}

impl Default for Mocks {
    fn default() -> Self {
        Self {
            auth: strict_auth_mock(),
            accounts: strict_accounts_mock(),
            addresses: strict_addresses_mock(),
            catalogs: strict_catalogs_mock(),
            sneakers: strict_sneakers_mock(),
            vouchers: strict_vouchers_mock(),
            orders: strict_orders_mock(),
            transactions: strict_transactions_mock(),
        }
    }
}

impl Mocks {
    pub(crate) fn into_state(self) -> Arc<State> {
        let mut notifications = MockNotificationsService::new();

        notifications.expect_send_email().never();

        State::from_app_context(AppContext {
            auth: Arc::new(self.auth),
            accounts: Arc::new(self.accounts),
            addresses: Arc::new(self.addresses),
            catalogs: Arc::new(self.catalogs),
            sneakers: Arc::new(self.sneakers),
            vouchers: Arc::new(self.vouchers),
            orders: Arc::new(self.orders),
            transactions: Arc::new(self.transactions),
            notifications: Arc::new(notifications),
        })
    }

    /// Serve `route` without an authenticated caller.
    pub(crate) fn anonymous_service(self, route: Router) -> Service {
        Service::new(Router::new().hoop(inject(self.into_state())).push(route))
    }

    /// Serve `route` as a customer holding only `ROLE_USER`.
    pub(crate) fn customer_service(self, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(self.into_state()))
                .hoop(inject_customer)
                .push(route),
        )
    }

    /// Serve `route` as a caller holding `ROLE_ADMIN`.
    pub(crate) fn admin_service(self, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(self.into_state()))
                .hoop(inject_admin)
                .push(route),
        )
    }
}

pub(crate) fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_register().never();
    auth.expect_login().never();
    auth.expect_authenticate_bearer().never();
    auth.expect_roles().never();
    auth.expect_forgot_password().never();
    auth.expect_reset_password().never();
    auth.expect_grant_role().never();

    auth
}

pub(crate) fn strict_accounts_mock() -> MockAccountsService {
    let mut accounts = MockAccountsService::new();

    accounts.expect_get_account_details().never();

    accounts
}

pub(crate) fn strict_addresses_mock() -> MockAddressesService {
    let mut addresses = MockAddressesService::new();

    addresses.expect_list_addresses().never();
    addresses.expect_get_address().never();
    addresses.expect_create_address().never();
    addresses.expect_replace_address().never();
    addresses.expect_patch_address().never();
    addresses.expect_delete_address().never();
    addresses.expect_set_main_address().never();

    addresses
}

pub(crate) fn strict_catalogs_mock() -> MockCatalogsService {
    let mut catalogs = MockCatalogsService::new();

    catalogs.expect_list_catalogs().never();
    catalogs.expect_get_catalog().never();
    catalogs.expect_upsert_catalog().never();

    catalogs
}

pub(crate) fn strict_sneakers_mock() -> MockSneakersService {
    let mut sneakers = MockSneakersService::new();

    sneakers.expect_list_sneakers().never();
    sneakers.expect_get_sneaker().never();
    sneakers.expect_create_sneaker().never();
    sneakers.expect_replace_sneaker().never();
    sneakers.expect_patch_sneaker().never();
    sneakers.expect_delete_sneaker().never();

    sneakers
}

pub(crate) fn strict_vouchers_mock() -> MockVouchersService {
    let mut vouchers = MockVouchersService::new();

    vouchers.expect_get_voucher().never();
    vouchers.expect_create_voucher().never();

    vouchers
}

pub(crate) fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_get_order().never();
    orders.expect_get_order_details().never();
    orders.expect_preview_voucher().never();
    orders.expect_create_order().never();
    orders.expect_confirm_order().never();

    orders
}

pub(crate) fn strict_transactions_mock() -> MockTransactionsService {
    let mut transactions = MockTransactionsService::new();

    transactions.expect_list_transactions().never();

    transactions
}
