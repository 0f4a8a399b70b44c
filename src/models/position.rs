use chrono::NaiveDate;
use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Transaction;

/// An open holding. Quantity stays above zero for as long as the position
/// exists; a position sold down to zero is removed from the account.
#[derive(Clone, Debug, Deserialize, Getters, Serialize, new)]
pub struct Position {
    symbol: String,
    name: String,
    quantity: i64,
    avg_buy_price: Decimal,
    current_price: Option<Decimal>,
    purchase_date: NaiveDate,
    last_transaction_date: NaiveDate,
    sector: Option<String>,
    total_fees: Decimal,
    transactions: Vec<Transaction>,
}

impl Position {
    /// Folds another buy into the position at the blended average price,
    /// rounded to two decimals.
    pub fn apply_buy(&mut self, transaction: Transaction) {
        let held = Decimal::from(self.quantity);
        let added = Decimal::from(*transaction.quantity());
        let blended =
            (held * self.avg_buy_price + added * *transaction.price()) / (held + added);

        self.avg_buy_price = blended.round_dp(2);
        self.quantity += *transaction.quantity();
        self.total_fees += *transaction.cost();
        self.last_transaction_date = *transaction.date();
        self.transactions.push(transaction);
    }

    pub fn reduce(&mut self, quantity: i64, date: NaiveDate) {
        self.quantity -= quantity;
        self.last_transaction_date = date;
    }

    /// Keeps the previous price when a refresh came back empty.
    pub fn set_current_price(&mut self, price: Option<Decimal>) {
        if price.is_some() {
            self.current_price = price;
        }
    }

    /// Market value of the holding; falls back to the average cost when no
    /// live price is known.
    pub fn valuation(&self) -> Decimal {
        self.current_price.unwrap_or(self.avg_buy_price) * Decimal::from(self.quantity)
    }

    pub fn cost_basis(&self) -> Decimal {
        self.avg_buy_price * Decimal::from(self.quantity)
    }

    pub fn unrealized_pl(&self) -> Option<Decimal> {
        self.current_price
            .map(|price| ((price - self.avg_buy_price) * Decimal::from(self.quantity)).round_dp(2))
    }

    pub fn unrealized_pl_percent(&self) -> Option<Decimal> {
        let cost = self.cost_basis();
        if cost.is_zero() {
            return None;
        }
        self.unrealized_pl()
            .map(|pl| (pl / cost * Decimal::from(100)).round_dp(2))
    }
}
