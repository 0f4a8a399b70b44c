use anyhow::Result;
use chrono::NaiveDate;
use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A realized sale. Created once by a sell operation and never mutated.
#[derive(Clone, Debug, Deserialize, Getters, Serialize, new)]
pub struct SoldLot {
    symbol: String,
    name: String,
    quantity: i64,
    buy_price: Decimal,
    sell_price: Decimal,
    buy_date: NaiveDate,
    sell_date: NaiveDate,
    holding_days: i64,
    tax_category: TaxCategory,
    profit_loss: Decimal,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum TaxCategory {
    ShortTerm,
    LongTerm,
}

impl TaxCategory {
    /// 365-day threshold: anything held less than a year is short-term.
    pub fn from_holding_days(days: i64) -> TaxCategory {
        if days < 365 {
            TaxCategory::ShortTerm
        } else {
            TaxCategory::LongTerm
        }
    }

    pub fn parse_str(s: &str) -> Result<TaxCategory> {
        match s {
            "short_term" => Ok(TaxCategory::ShortTerm),
            "long_term" => Ok(TaxCategory::LongTerm),
            _ => Err(anyhow::anyhow!("Unknown tax category '{}'", s)),
        }
    }

    pub fn to_str(&self) -> &str {
        match self {
            TaxCategory::ShortTerm => "short_term",
            TaxCategory::LongTerm => "long_term",
        }
    }
}
