//! Transactions

use std::{fmt, str::FromStr};

use crate::labels::UnknownLabelError;

/// Payment state of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransactionStatus {
    /// Payment received.
    Paid,

    /// Awaiting payment.
    #[default]
    Unpaid,

    /// Transaction voided.
    Canceled,

    /// Order fulfilled and settled.
    Success,
}

impl TransactionStatus {
    /// The persisted label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Paid => "PAID",
            Self::Unpaid => "UNPAID",
            Self::Canceled => "CANCELED",
            Self::Success => "SUCCESS",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionStatus {
    type Err = UnknownLabelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        [Self::Paid, Self::Unpaid, Self::Canceled, Self::Success]
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| UnknownLabelError::new("transaction status", value))
    }
}

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransactionMethod {
    /// Paid to the courier on delivery.
    #[default]
    CashOnDelivery,

    /// Paid by bank transfer.
    BankTransfer,
}

impl TransactionMethod {
    /// The persisted label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CashOnDelivery => "CASH_ON_DELIVERY",
            Self::BankTransfer => "BANK_TRANSFER",
        }
    }
}

impl fmt::Display for TransactionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionMethod {
    type Err = UnknownLabelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        [Self::CashOnDelivery, Self::BankTransfer]
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| UnknownLabelError::new("transaction method", value))
    }
}
