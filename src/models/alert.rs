use anyhow::Result;
use chrono::{DateTime, Local};
use clap::ValueEnum;
use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price alert. Mutated only to flip `triggered`; removed explicitly.
#[derive(Clone, Debug, Deserialize, Getters, Serialize, new)]
pub struct Alert {
    id: String,
    symbol: String,
    target_price: Decimal,
    direction: AlertDirection,
    created_at: DateTime<Local>,
    triggered: bool,
    triggered_at: Option<DateTime<Local>>,
}

impl Alert {
    pub fn condition_met(&self, price: Decimal) -> bool {
        match self.direction {
            AlertDirection::Above => price >= self.target_price,
            AlertDirection::Below => price <= self.target_price,
        }
    }

    pub fn mark_triggered(&mut self, at: DateTime<Local>) {
        self.triggered = true;
        self.triggered_at = Some(at);
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize, ValueEnum)]
pub enum AlertDirection {
    Above,
    Below,
}

impl AlertDirection {
    pub fn parse_str(s: &str) -> Result<AlertDirection> {
        match s {
            "above" => Ok(AlertDirection::Above),
            "below" => Ok(AlertDirection::Below),
            _ => Err(anyhow::anyhow!("Unknown alert direction '{}'", s)),
        }
    }

    pub fn to_str(&self) -> &str {
        match self {
            AlertDirection::Above => "above",
            AlertDirection::Below => "below",
        }
    }
}
