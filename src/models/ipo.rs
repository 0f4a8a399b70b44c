use chrono::NaiveDate;
use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Getters, Serialize, new)]
pub struct IpoListing {
    symbol: String,
    company_name: String,
    exchange: String,
    price_band_low: Decimal,
    price_band_high: Decimal,
    expected_date: NaiveDate,
    issue_size: String,
    lot_size: i64,
    sector: String,
    status: IpoStatus,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum IpoStatus {
    Upcoming,
    Open,
    Closed,
    Listed,
}

impl IpoStatus {
    pub fn to_str(&self) -> &str {
        match self {
            IpoStatus::Upcoming => "Upcoming",
            IpoStatus::Open => "Open",
            IpoStatus::Closed => "Closed",
            IpoStatus::Listed => "Listed",
        }
    }
}
