use chrono::NaiveDate;
use derive_getters::Getters;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::{
    app::utils::financial_year_label,
    models::{SoldLot, TaxCategory},
};

#[derive(Clone, Debug, Getters)]
pub struct TaxConfig {
    short_term_rate: Decimal,
    long_term_rate: Decimal,
    long_term_exemption: Decimal,
}

impl Default for TaxConfig {
    fn default() -> Self {
        Self {
            short_term_rate: dec!(0.15),
            long_term_rate: dec!(0.10),
            long_term_exemption: dec!(100000),
        }
    }
}

impl TaxConfig {
    pub fn from_env() -> Self {
        let defaults = TaxConfig::default();
        TaxConfig {
            short_term_rate: env_decimal("SHORT_TERM_TAX_RATE")
                .unwrap_or(defaults.short_term_rate),
            long_term_rate: env_decimal("LONG_TERM_TAX_RATE").unwrap_or(defaults.long_term_rate),
            long_term_exemption: env_decimal("LONG_TERM_EXEMPTION")
                .unwrap_or(defaults.long_term_exemption),
        }
    }
}

fn env_decimal(key: &str) -> Option<Decimal> {
    std::env::var(key).ok().and_then(|v| v.parse::<Decimal>().ok())
}

#[derive(Clone, Debug, Getters)]
pub struct TaxSummary {
    financial_year: String,
    short_term_gain: Decimal,
    short_term_tax: Decimal,
    long_term_gain: Decimal,
    long_term_taxable_gain: Decimal,
    long_term_tax: Decimal,
    total_tax: Decimal,
}

/// Pure over the sold-lot history; an empty history yields all zeros.
/// Losses net against gains inside each bucket before the zero floor.
pub fn compute_tax(lots: &[SoldLot], config: &TaxConfig, today: NaiveDate) -> TaxSummary {
    let mut short_term_gain = Decimal::ZERO;
    let mut long_term_gain = Decimal::ZERO;

    for lot in lots {
        match lot.tax_category() {
            TaxCategory::ShortTerm => short_term_gain += *lot.profit_loss(),
            TaxCategory::LongTerm => long_term_gain += *lot.profit_loss(),
        }
    }

    let short_term_tax =
        (short_term_gain.max(Decimal::ZERO) * config.short_term_rate).round_dp(2);
    let long_term_taxable_gain =
        (long_term_gain - config.long_term_exemption).max(Decimal::ZERO);
    let long_term_tax = (long_term_taxable_gain * config.long_term_rate).round_dp(2);

    TaxSummary {
        financial_year: financial_year_label(today),
        short_term_gain,
        short_term_tax,
        long_term_gain,
        long_term_taxable_gain,
        long_term_tax,
        total_tax: short_term_tax + long_term_tax,
    }
}
