use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::DashboardError;

/// Flat synthetic brokerage fee of 0.5% per trade.
const FEE_RATE: Decimal = dec!(0.005);

static SYMBOL_PATTERN: OnceLock<Regex> = OnceLock::new();

fn symbol_pattern() -> &'static Regex {
    SYMBOL_PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Z0-9][A-Z0-9&.\-]*$").expect("symbol pattern is valid")
    })
}

/// Uppercases and qualifies a ticker with the default NSE suffix unless it
/// already carries a recognized exchange suffix.
pub fn normalize_symbol(symbol: &str) -> Result<String, DashboardError> {
    let trimmed = symbol.trim();
    if trimmed.is_empty() {
        return Err(DashboardError::InvalidInput(
            "symbol must not be empty".to_string(),
        ));
    }

    let upper = trimmed.to_uppercase();
    if !symbol_pattern().is_match(&upper) {
        return Err(DashboardError::InvalidInput(format!(
            "malformed symbol '{}'",
            trimmed
        )));
    }

    if upper.ends_with(".NS") || upper.ends_with(".BO") {
        Ok(upper)
    } else {
        Ok(format!("{}.NS", upper))
    }
}

pub fn transaction_fee(price: Decimal, quantity: i64) -> Decimal {
    (price * Decimal::from(quantity) * FEE_RATE).round_dp(2)
}

/// Indian financial year, April to March: August 2026 falls in "2026-27".
pub fn financial_year_label(today: NaiveDate) -> String {
    let year = today.year();
    if today.month() < 4 {
        format!("{}-{:02}", year - 1, year % 100)
    } else {
        format!("{}-{:02}", year, (year + 1) % 100)
    }
}
