use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Local, NaiveDate};
use clap::ValueEnum;
use derive_getters::Getters;
use derive_new::new;
use reqwest::Client;
use rust_decimal::Decimal;
use tracing::warn;
use uuid::Uuid;

use crate::{
    api::{utils::build_client, yahoo},
    app::utils::{normalize_symbol, transaction_fee},
    error::DashboardError,
    models::{
        Alert, AlertDirection, DividendRow, Position, SoldLot, TaxCategory, Transaction,
        TransactionType,
    },
};

/// NSE large caps seeded into a fresh watchlist.
pub const DEFAULT_WATCHLIST: [&str; 10] = [
    "RELIANCE.NS",
    "TCS.NS",
    "HDFCBANK.NS",
    "INFY.NS",
    "BAJFINANCE.NS",
    "SBIN.NS",
    "ICICIBANK.NS",
    "HINDUNILVR.NS",
    "ADANIENT.NS",
    "TATAMOTORS.NS",
];

/// Funds shown on the Funds tab.
pub const DEFAULT_FUNDS: [&str; 5] = [
    "HDFC-TOP-100-FUND-DIRECT-PLAN-GROWTH.MF",
    "SBI-BLUECHIP-FUND-DIRECT-GROWTH.MF",
    "ICICI-PRU-BLUECHIP-FUND-DIRECT-PLAN-GROWTH.MF",
    "AXIS-BLUECHIP-FUND-DIRECT-GROWTH.MF",
    "MIRAE-ASSET-LARGE-CAP-FUND-DIRECT-PLAN-GROWTH.MF",
];

const DIVIDEND_FETCH_DELAY_MS: u64 = 250;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum BuyMode {
    #[default]
    New,
    Average,
}

/// What happens when a `new`-mode buy hits a symbol that is already held.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum DuplicatePolicy {
    #[default]
    Reject,
    Average,
}

impl DuplicatePolicy {
    pub fn from_env() -> Self {
        match std::env::var("DUPLICATE_BUY_POLICY")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "average" => DuplicatePolicy::Average,
            _ => DuplicatePolicy::Reject,
        }
    }
}

#[derive(Clone, Debug, Getters, new)]
pub struct BuyReceipt {
    symbol: String,
    quantity: i64,
    price: Decimal,
    fee: Decimal,
    avg_buy_price: Decimal,
    total_quantity: i64,
}

#[derive(Clone, Debug)]
pub enum SellOutcome {
    Filled(SoldLot),
    /// Trigger not met; the ledger is untouched and no lot was created.
    Pending {
        symbol: String,
        trigger_price: Decimal,
        market_price: Decimal,
    },
}

/// All session state in one aggregate: watchlist, open positions, realized
/// lots, alerts and the transient dividend cache. Every mutation goes
/// through here; the persistence layer saves the aggregate as a whole.
#[derive(Debug, Getters)]
pub struct Account {
    watchlist: Vec<String>,
    positions: Vec<Position>,
    sold_lots: Vec<SoldLot>,
    alerts: Vec<Alert>,
    dividend_cache: HashMap<String, Vec<DividendRow>>,
    duplicate_policy: DuplicatePolicy,
    client: Client,
}

impl Account {
    pub fn new(duplicate_policy: DuplicatePolicy) -> Self {
        Self {
            watchlist: DEFAULT_WATCHLIST.iter().map(|s| s.to_string()).collect(),
            positions: Vec::new(),
            sold_lots: Vec::new(),
            alerts: Vec::new(),
            dividend_cache: HashMap::new(),
            duplicate_policy,
            client: build_client(),
        }
    }

    /// Rehydrates a stored account.
    pub fn from_parts(
        watchlist: Vec<String>,
        positions: Vec<Position>,
        sold_lots: Vec<SoldLot>,
        alerts: Vec<Alert>,
        duplicate_policy: DuplicatePolicy,
    ) -> Self {
        Self {
            watchlist,
            positions,
            sold_lots,
            alerts,
            dividend_cache: HashMap::new(),
            duplicate_policy,
            client: build_client(),
        }
    }

    // ── Buying ────────────────────────────────────────────────────────────

    #[allow(clippy::too_many_arguments)]
    pub async fn buy(
        &mut self,
        symbol: &str,
        quantity: i64,
        price: Option<Decimal>,
        date: Option<NaiveDate>,
        mode: BuyMode,
        sector: Option<String>,
        notes: Option<String>,
    ) -> Result<BuyReceipt, DashboardError> {
        let symbol = normalize_symbol(symbol)?;
        validate_quantity(quantity)?;
        if let Some(price) = price {
            validate_price(price)?;
        }
        let date = date.unwrap_or_else(|| Local::now().date_naive());
        let notes = notes.unwrap_or_default();

        if self.position_index(&symbol).is_some() {
            let price = match price {
                Some(price) => price,
                None => *yahoo::fetch_quote(&symbol, &self.client).await?.price(),
            };
            self.record_additional_buy(&symbol, quantity, price, date, mode, notes)
        } else {
            let quote = yahoo::fetch_quote(&symbol, &self.client).await?;
            let price = price.unwrap_or_else(|| *quote.price());
            let sector = sector.or_else(|| quote.sector().clone());
            self.record_new_position(
                &symbol,
                quote.name(),
                sector,
                quantity,
                price,
                date,
                notes,
            )
        }
    }

    pub fn record_new_position(
        &mut self,
        symbol: &str,
        name: &str,
        sector: Option<String>,
        quantity: i64,
        price: Decimal,
        date: NaiveDate,
        notes: String,
    ) -> Result<BuyReceipt, DashboardError> {
        validate_quantity(quantity)?;
        validate_price(price)?;
        if self.position_index(symbol).is_some() {
            return Err(DashboardError::DuplicateSymbol(symbol.to_string()));
        }

        let fee = transaction_fee(price, quantity);
        let avg_buy_price = price.round_dp(2);
        let transaction =
            Transaction::new(date, TransactionType::Buy, quantity, price, fee, notes);
        self.positions.push(Position::new(
            symbol.to_string(),
            name.to_string(),
            quantity,
            avg_buy_price,
            None,
            date,
            date,
            sector,
            fee,
            vec![transaction],
        ));

        Ok(BuyReceipt::new(
            symbol.to_string(),
            quantity,
            price,
            fee,
            avg_buy_price,
            quantity,
        ))
    }

    pub fn record_additional_buy(
        &mut self,
        symbol: &str,
        quantity: i64,
        price: Decimal,
        date: NaiveDate,
        mode: BuyMode,
        notes: String,
    ) -> Result<BuyReceipt, DashboardError> {
        validate_quantity(quantity)?;
        validate_price(price)?;
        let idx = self
            .position_index(symbol)
            .ok_or_else(|| DashboardError::PositionNotFound(symbol.to_string()))?;

        if mode == BuyMode::New && self.duplicate_policy == DuplicatePolicy::Reject {
            return Err(DashboardError::DuplicateSymbol(symbol.to_string()));
        }

        let fee = transaction_fee(price, quantity);
        let position = &mut self.positions[idx];
        position.apply_buy(Transaction::new(
            date,
            TransactionType::Buy,
            quantity,
            price,
            fee,
            notes,
        ));

        Ok(BuyReceipt::new(
            symbol.to_string(),
            quantity,
            price,
            fee,
            *position.avg_buy_price(),
            *position.quantity(),
        ))
    }

    // ── Selling ───────────────────────────────────────────────────────────

    pub async fn sell(
        &mut self,
        symbol: &str,
        quantity: i64,
        trigger_price: Decimal,
    ) -> Result<SellOutcome, DashboardError> {
        let symbol = normalize_symbol(symbol)?;
        validate_quantity(quantity)?;

        let held = *self
            .find_position(&symbol)
            .ok_or_else(|| DashboardError::PositionNotFound(symbol.clone()))?
            .quantity();
        if held < quantity {
            return Err(DashboardError::InsufficientQuantity {
                symbol,
                held,
                requested: quantity,
            });
        }

        let market_price = *yahoo::fetch_quote(&symbol, &self.client).await?.price();
        let today = Local::now().date_naive();
        self.settle_sell(&symbol, quantity, market_price, trigger_price, today)
    }

    /// Applies a sale at the live market price, or reports it pending when
    /// the trigger has not been reached. P/L is realized against the
    /// blended average cost; the position disappears at zero quantity.
    pub fn settle_sell(
        &mut self,
        symbol: &str,
        quantity: i64,
        market_price: Decimal,
        trigger_price: Decimal,
        today: NaiveDate,
    ) -> Result<SellOutcome, DashboardError> {
        let idx = self
            .position_index(symbol)
            .ok_or_else(|| DashboardError::PositionNotFound(symbol.to_string()))?;
        let held = *self.positions[idx].quantity();
        if held < quantity {
            return Err(DashboardError::InsufficientQuantity {
                symbol: symbol.to_string(),
                held,
                requested: quantity,
            });
        }

        if trigger_price > Decimal::ZERO && market_price < trigger_price {
            return Ok(SellOutcome::Pending {
                symbol: symbol.to_string(),
                trigger_price,
                market_price,
            });
        }

        let position = &mut self.positions[idx];
        let holding_days = (today - *position.purchase_date()).num_days();
        let profit_loss =
            ((market_price - *position.avg_buy_price()) * Decimal::from(quantity)).round_dp(2);
        let lot = SoldLot::new(
            symbol.to_string(),
            position.name().clone(),
            quantity,
            *position.avg_buy_price(),
            market_price,
            *position.purchase_date(),
            today,
            holding_days,
            TaxCategory::from_holding_days(holding_days),
            profit_loss,
        );

        position.reduce(quantity, today);
        if *position.quantity() == 0 {
            self.positions.remove(idx);
        }
        self.sold_lots.push(lot.clone());

        Ok(SellOutcome::Filled(lot))
    }

    // ── Watchlist ─────────────────────────────────────────────────────────

    pub async fn add_watch(&mut self, symbol: &str) -> Result<String, DashboardError> {
        let symbol = normalize_symbol(symbol)?;
        if self.watchlist.contains(&symbol) {
            return Err(DashboardError::DuplicateSymbol(symbol));
        }
        yahoo::fetch_quote(&symbol, &self.client).await?;
        self.record_watch(&symbol)?;
        Ok(symbol)
    }

    pub fn record_watch(&mut self, symbol: &str) -> Result<(), DashboardError> {
        if self.watchlist.iter().any(|s| s == symbol) {
            return Err(DashboardError::DuplicateSymbol(symbol.to_string()));
        }
        self.watchlist.push(symbol.to_string());
        Ok(())
    }

    pub fn remove_watch(&mut self, symbol: &str) -> Result<String, DashboardError> {
        let symbol = normalize_symbol(symbol)?;
        let idx = self
            .watchlist
            .iter()
            .position(|s| s == &symbol)
            .ok_or_else(|| {
                DashboardError::NotFound(format!("{} is not on the watchlist", symbol))
            })?;
        self.watchlist.remove(idx);
        Ok(symbol)
    }

    pub fn reset_watchlist(&mut self) {
        self.watchlist = DEFAULT_WATCHLIST.iter().map(|s| s.to_string()).collect();
    }

    // ── Alerts ────────────────────────────────────────────────────────────

    pub async fn add_alert(
        &mut self,
        symbol: &str,
        target_price: Decimal,
        direction: AlertDirection,
    ) -> Result<Alert, DashboardError> {
        let symbol = normalize_symbol(symbol)?;
        validate_price(target_price)?;
        let market_price = *yahoo::fetch_quote(&symbol, &self.client).await?.price();
        self.record_alert(&symbol, target_price, direction, market_price)
    }

    /// An alert must describe a crossing that has not happened yet.
    pub fn record_alert(
        &mut self,
        symbol: &str,
        target_price: Decimal,
        direction: AlertDirection,
        market_price: Decimal,
    ) -> Result<Alert, DashboardError> {
        validate_price(target_price)?;
        let already_met = match direction {
            AlertDirection::Above => target_price <= market_price,
            AlertDirection::Below => target_price >= market_price,
        };
        if already_met {
            return Err(DashboardError::PriceConstraintViolated(format!(
                "{} alert at {} is already satisfied at market price {}",
                direction.to_str(),
                target_price,
                market_price
            )));
        }

        let alert = Alert::new(
            Uuid::new_v4().to_string(),
            symbol.to_string(),
            target_price,
            direction,
            Local::now(),
            false,
            None,
        );
        self.alerts.push(alert.clone());
        Ok(alert)
    }

    pub fn remove_alert(&mut self, id: &str) -> Result<(), DashboardError> {
        let idx = self
            .alerts
            .iter()
            .position(|alert| alert.id() == id)
            .ok_or_else(|| DashboardError::NotFound(format!("no alert with id {}", id)))?;
        self.alerts.remove(idx);
        Ok(())
    }

    /// One batch fetch for all distinct symbols with pending alerts, then
    /// flips whichever conditions now hold. Triggered alerts stay listed.
    pub async fn check_alerts(&mut self) -> Result<Vec<Alert>, DashboardError> {
        let mut symbols: Vec<String> = self
            .alerts
            .iter()
            .filter(|alert| !alert.triggered())
            .map(|alert| alert.symbol().clone())
            .collect();
        symbols.sort();
        symbols.dedup();
        if symbols.is_empty() {
            return Ok(Vec::new());
        }

        let quotes = yahoo::fetch_batch_quotes(&symbols, &self.client).await;
        let prices: HashMap<String, Decimal> = quotes
            .iter()
            .filter_map(|entry| {
                entry
                    .quote()
                    .as_ref()
                    .map(|quote| (entry.symbol().clone(), *quote.price()))
            })
            .collect();

        Ok(self.apply_alert_prices(&prices, Local::now()))
    }

    pub fn apply_alert_prices(
        &mut self,
        prices: &HashMap<String, Decimal>,
        now: DateTime<Local>,
    ) -> Vec<Alert> {
        let mut fired = Vec::new();
        for alert in self.alerts.iter_mut() {
            if *alert.triggered() {
                continue;
            }
            if let Some(price) = prices.get(alert.symbol()) {
                if alert.condition_met(*price) {
                    alert.mark_triggered(now);
                    fired.push(alert.clone());
                }
            }
        }
        fired
    }

    // ── Refresh ───────────────────────────────────────────────────────────

    /// Refreshes the cached market price of every open position. A symbol
    /// that fails keeps its previous price.
    pub async fn refresh_prices(&mut self) {
        let symbols: Vec<String> = self.positions.iter().map(|p| p.symbol().clone()).collect();
        if symbols.is_empty() {
            return;
        }

        let quotes = yahoo::fetch_batch_quotes(&symbols, &self.client).await;
        let prices: HashMap<String, Decimal> = quotes
            .iter()
            .filter_map(|entry| {
                entry
                    .quote()
                    .as_ref()
                    .map(|quote| (entry.symbol().clone(), *quote.price()))
            })
            .collect();

        for position in self.positions.iter_mut() {
            position.set_current_price(prices.get(position.symbol()).copied());
        }
    }

    /// Fills the dividend cache for every open position.
    pub async fn refresh_dividends(&mut self) {
        let symbols: Vec<String> = self.positions.iter().map(|p| p.symbol().clone()).collect();
        for (i, symbol) in symbols.into_iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(Duration::from_millis(DIVIDEND_FETCH_DELAY_MS)).await;
            }
            match yahoo::fetch_dividends(&symbol, &self.client).await {
                Ok(rows) => {
                    self.dividend_cache.insert(symbol, rows);
                }
                Err(err) => warn!(symbol = %symbol, error = %err, "dividend fetch failed"),
            }
        }
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    pub fn find_position(&self, symbol: &str) -> Option<&Position> {
        self.positions.iter().find(|p| p.symbol() == symbol)
    }

    fn position_index(&self, symbol: &str) -> Option<usize> {
        self.positions.iter().position(|p| p.symbol() == symbol)
    }
}

fn validate_quantity(quantity: i64) -> Result<(), DashboardError> {
    if quantity <= 0 {
        return Err(DashboardError::InvalidInput(
            "quantity must be a positive integer".to_string(),
        ));
    }
    Ok(())
}

fn validate_price(price: Decimal) -> Result<(), DashboardError> {
    if price <= Decimal::ZERO {
        return Err(DashboardError::InvalidInput(
            "price must be positive".to_string(),
        ));
    }
    Ok(())
}
