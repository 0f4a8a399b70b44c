use anyhow::Result;
use chrono::NaiveDate;
use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Append-only log entry inside a position. `cost` is the flat brokerage
/// fee charged on the trade, not the traded amount.
#[derive(Clone, Debug, Deserialize, Getters, Serialize, new)]
pub struct Transaction {
    date: NaiveDate,
    transaction_type: TransactionType,
    quantity: i64,
    price: Decimal,
    cost: Decimal,
    notes: String,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub enum TransactionType {
    Buy,
    Sell,
}

impl TransactionType {
    pub fn parse_str(s: &str) -> Result<TransactionType> {
        match s {
            "Buy" => Ok(TransactionType::Buy),
            "Sell" => Ok(TransactionType::Sell),
            _ => Err(anyhow::anyhow!("Unknown transaction type '{}'", s)),
        }
    }

    pub fn to_str(&self) -> &str {
        match self {
            TransactionType::Buy => "Buy",
            TransactionType::Sell => "Sell",
        }
    }
}
