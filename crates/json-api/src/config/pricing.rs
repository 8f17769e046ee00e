//! Pricing Config

use clap::Args;
use rust_decimal::Decimal;

/// Order pricing settings.
#[derive(Debug, Args)]
pub struct PricingConfig {
    /// Flat delivery fee added to every order total
    #[arg(long, env = "DELIVERY_FEE", default_value_t = Decimal::ZERO)]
    pub delivery_fee: Decimal,
}
