use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Getters, Serialize, new)]
pub struct FundQuote {
    symbol: String,
    name: String,
    nav: Decimal,
    previous_nav: Option<Decimal>,
    category: FundCategory,
    aum: Option<Decimal>,
    expense_ratio: Option<Decimal>,
}

impl FundQuote {
    pub fn change(&self) -> Option<Decimal> {
        self.previous_nav.map(|prev| self.nav - prev)
    }

    pub fn change_percent(&self) -> Option<Decimal> {
        match self.previous_nav {
            Some(prev) if !prev.is_zero() => {
                Some(((self.nav - prev) / prev * Decimal::from(100)).round_dp(2))
            }
            _ => None,
        }
    }

    pub fn risk_level(&self) -> RiskLevel {
        self.category.risk_level()
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum FundCategory {
    LargeCap,
    MidCap,
    SmallCap,
    Debt,
    Hybrid,
    Index,
    Equity,
}

impl FundCategory {
    /// Best-effort classification from the fund name; plain equity funds
    /// are the fallback bucket.
    pub fn classify(name: &str) -> FundCategory {
        let name = name.to_lowercase();
        if name.contains("large cap") {
            FundCategory::LargeCap
        } else if name.contains("mid cap") {
            FundCategory::MidCap
        } else if name.contains("small cap") {
            FundCategory::SmallCap
        } else if name.contains("debt") || name.contains("bond") {
            FundCategory::Debt
        } else if name.contains("hybrid") || name.contains("balanced") {
            FundCategory::Hybrid
        } else if name.contains("index") {
            FundCategory::Index
        } else {
            FundCategory::Equity
        }
    }

    pub fn risk_level(&self) -> RiskLevel {
        match self {
            FundCategory::LargeCap | FundCategory::Index | FundCategory::Debt => RiskLevel::Low,
            FundCategory::SmallCap => RiskLevel::High,
            _ => RiskLevel::Moderate,
        }
    }

    pub fn to_str(&self) -> &str {
        match self {
            FundCategory::LargeCap => "Large Cap",
            FundCategory::MidCap => "Mid Cap",
            FundCategory::SmallCap => "Small Cap",
            FundCategory::Debt => "Debt",
            FundCategory::Hybrid => "Hybrid",
            FundCategory::Index => "Index",
            FundCategory::Equity => "Equity",
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn to_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
        }
    }
}
