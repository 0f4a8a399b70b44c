use std::collections::HashMap;

use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{DividendRow, Position};

#[derive(Clone, Debug, Getters, new)]
pub struct SectorAllocation {
    sector: String,
    value: Decimal,
    percent: Decimal,
}

/// Portfolio value grouped by sector, largest first. Positions without a
/// known sector bucket under `Unknown`; an empty portfolio yields zero
/// percentages rather than a division error.
pub fn sector_allocation(positions: &[Position]) -> Vec<SectorAllocation> {
    let total: Decimal = positions.iter().map(|p| p.valuation()).sum();

    let mut by_sector: HashMap<String, Decimal> = HashMap::new();
    for position in positions {
        let sector = position
            .sector()
            .clone()
            .unwrap_or_else(|| "Unknown".to_string());
        *by_sector.entry(sector).or_insert(Decimal::ZERO) += position.valuation();
    }

    let mut allocations: Vec<SectorAllocation> = by_sector
        .into_iter()
        .map(|(sector, value)| {
            let percent = if total.is_zero() {
                Decimal::ZERO
            } else {
                (value / total * Decimal::from(100)).round_dp(2)
            };
            SectorAllocation::new(sector, value.round_dp(2), percent)
        })
        .collect();
    allocations.sort_by(|a, b| b.value().cmp(a.value()));
    allocations
}

/// Distance-from-equal-weight heuristic (100 = perfectly equal weights),
/// not a statistical diversification measure.
pub fn diversification_score(positions: &[Position]) -> Decimal {
    if positions.is_empty() {
        return Decimal::ZERO;
    }
    let total: Decimal = positions.iter().map(|p| p.valuation()).sum();
    if total.is_zero() {
        return Decimal::ZERO;
    }

    let ideal = Decimal::from(100) / Decimal::from(positions.len() as i64);
    let deviation: Decimal = positions
        .iter()
        .map(|p| (p.valuation() / total * Decimal::from(100) - ideal).abs())
        .sum();

    (Decimal::from(100) - deviation / Decimal::from(2))
        .max(Decimal::ZERO)
        .round_dp(2)
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConcentrationRisk {
    High,
    Medium,
    Low,
}

impl ConcentrationRisk {
    pub fn to_str(&self) -> &str {
        match self {
            ConcentrationRisk::High => "High",
            ConcentrationRisk::Medium => "Medium",
            ConcentrationRisk::Low => "Low",
        }
    }
}

pub fn concentration_risk(positions: &[Position]) -> ConcentrationRisk {
    let total: Decimal = positions.iter().map(|p| p.valuation()).sum();
    if total.is_zero() {
        return ConcentrationRisk::Low;
    }
    let top = positions
        .iter()
        .map(|p| p.valuation())
        .max()
        .unwrap_or(Decimal::ZERO);
    let top_percent = top / total * Decimal::from(100);

    if top_percent > dec!(30) {
        ConcentrationRisk::High
    } else if top_percent > dec!(20) {
        ConcentrationRisk::Medium
    } else {
        ConcentrationRisk::Low
    }
}

#[derive(Clone, Debug, Getters, new)]
pub struct DividendYield {
    symbol: String,
    name: String,
    ttm_dividend: Decimal,
    current_price: Option<Decimal>,
    yield_percent: Option<Decimal>,
}

/// Trailing-twelve-month dividend yield per open position, read from the
/// account's dividend cache.
pub fn dividend_yields(
    positions: &[Position],
    dividend_cache: &HashMap<String, Vec<DividendRow>>,
) -> Vec<DividendYield> {
    positions
        .iter()
        .map(|position| {
            let ttm: Decimal = dividend_cache
                .get(position.symbol())
                .map(|rows| rows.iter().map(|row| *row.amount()).sum())
                .unwrap_or(Decimal::ZERO);
            let current_price = *position.current_price();
            let yield_percent = current_price.and_then(|price| {
                if price.is_zero() {
                    None
                } else {
                    Some((ttm / price * Decimal::from(100)).round_dp(2))
                }
            });
            DividendYield::new(
                position.symbol().clone(),
                position.name().clone(),
                ttm.round_dp(2),
                current_price,
                yield_percent,
            )
        })
        .collect()
}
