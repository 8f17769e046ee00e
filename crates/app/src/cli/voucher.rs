use clap::{Args, Subcommand};
use jiff::Timestamp;
use rust_decimal::Decimal;
use shoeclean::vouchers::{AmountType, VoucherType};
use shoeclean_app::{
    database::Db,
    domain::vouchers::{PgVouchersService, VouchersService, data::NewVoucher},
};

#[derive(Debug, Args)]
pub(crate) struct VoucherCommand {
    #[command(subcommand)]
    command: VoucherSubcommand,
}

#[derive(Debug, Subcommand)]
enum VoucherSubcommand {
    /// Create a voucher
    Create(CreateVoucherArgs),
}

#[derive(Debug, Args)]
struct CreateVoucherArgs {
    #[arg(long)]
    code: String,

    /// DISCOUNT or FREE_PAIR
    #[arg(long)]
    voucher_type: VoucherType,

    /// AMOUNT or PERCENTAGE
    #[arg(long, default_value = "AMOUNT")]
    amount_type: AmountType,

    #[arg(long)]
    amount: Decimal,

    /// Number of redemptions available
    #[arg(long)]
    quantity: i32,

    /// Expiry timestamp (RFC 3339)
    #[arg(long)]
    expires_at: Timestamp,
}

pub(crate) async fn run(command: VoucherCommand, db: Db) -> Result<(), String> {
    match command.command {
        VoucherSubcommand::Create(args) => create(args, db).await,
    }
}

async fn create(args: CreateVoucherArgs, db: Db) -> Result<(), String> {
    if args.expires_at <= Timestamp::now() {
        return Err("expires-at must be in the future".to_string());
    }

    let voucher = PgVouchersService::new(db)
        .create_voucher(NewVoucher {
            code: args.code,
            voucher_type: args.voucher_type,
            amount_type: args.amount_type,
            amount: args.amount,
            quantity: args.quantity,
            expired_at: args.expires_at,
        })
        .await
        .map_err(|error| format!("failed to create voucher: {error}"))?;

    println!("voucher_uuid: {}", voucher.uuid);
    println!("code: {}", voucher.code);
    println!("expired_at: {}", voucher.expired_at);

    Ok(())
}
