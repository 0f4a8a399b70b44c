use chrono::NaiveDate;
use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Transient price snapshot returned by the gateway. Market cap and sector
/// are provider-supplied and frequently absent; absent means unknown.
#[derive(Clone, Debug, Deserialize, Getters, Serialize, new)]
pub struct Quote {
    symbol: String,
    name: String,
    price: Decimal,
    previous_close: Option<Decimal>,
    volume: Option<i64>,
    market_cap: Option<Decimal>,
    sector: Option<String>,
    day_high: Option<Decimal>,
    day_low: Option<Decimal>,
}

impl Quote {
    pub fn change(&self) -> Option<Decimal> {
        self.previous_close.map(|prev| self.price - prev)
    }

    pub fn change_percent(&self) -> Option<Decimal> {
        match self.previous_close {
            Some(prev) if !prev.is_zero() => {
                Some(((self.price - prev) / prev * Decimal::from(100)).round_dp(2))
            }
            _ => None,
        }
    }
}

/// Per-symbol outcome of a batch fetch. A failed symbol keeps its slot with
/// an empty quote instead of being dropped.
#[derive(Clone, Debug, Getters, new)]
pub struct BatchQuote {
    symbol: String,
    quote: Option<Quote>,
}

#[derive(Clone, Debug, Deserialize, Getters, Serialize, new)]
pub struct HistoryRow {
    date: NaiveDate,
    open: Decimal,
    high: Decimal,
    low: Decimal,
    close: Decimal,
    volume: i64,
}

#[derive(Clone, Debug, Deserialize, Getters, Serialize, new)]
pub struct DividendRow {
    date: NaiveDate,
    amount: Decimal,
}
