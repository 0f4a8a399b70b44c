use anyhow::Result;
use rust_decimal::prelude::ToPrimitive;
use sqlx::{Pool, Sqlite};

use crate::{
    app::Account,
    models::{Alert, Position, SoldLot, Transaction},
};

/// Saves the whole aggregate in one transaction, so a half-applied
/// mutation can never become visible.
pub async fn save_account(connection: &Pool<Sqlite>, account: &Account) -> Result<()> {
    let mut tx = connection.begin().await?;

    sqlx::query("DELETE FROM alerts").execute(&mut *tx).await?;
    sqlx::query("DELETE FROM sold_lots")
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM transactions")
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM positions")
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM watchlist")
        .execute(&mut *tx)
        .await?;

    for (i, symbol) in account.watchlist().iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO watchlist (symbol, sort_order)
            VALUES (?, ?)
            "#,
        )
        .bind(symbol)
        .bind(i as i64)
        .execute(&mut *tx)
        .await?;
    }

    for position in account.positions() {
        insert_position(position, &mut tx).await?;
        for transaction in position.transactions() {
            insert_transaction(position.symbol(), transaction, &mut tx).await?;
        }
    }

    for lot in account.sold_lots() {
        insert_sold_lot(lot, &mut tx).await?;
    }

    for alert in account.alerts() {
        insert_alert(alert, &mut tx).await?;
    }

    tx.commit().await?;

    Ok(())
}

async fn insert_position(
    position: &Position,
    tx: &mut sqlx::Transaction<'_, Sqlite>,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO positions
        (symbol, name, quantity, avg_buy_price, purchase_date, last_transaction_date, sector, total_fees)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(position.symbol())
    .bind(position.name())
    .bind(position.quantity())
    .bind(position.avg_buy_price().round_dp(4).to_f64())
    .bind(position.purchase_date().to_string())
    .bind(position.last_transaction_date().to_string())
    .bind(position.sector())
    .bind(position.total_fees().round_dp(4).to_f64())
    .execute(&mut **tx)
    .await?;

    Ok(())
}

async fn insert_transaction(
    symbol: &str,
    transaction: &Transaction,
    tx: &mut sqlx::Transaction<'_, Sqlite>,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO transactions
        (symbol, transaction_date, transaction_type, quantity, price, cost, notes)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(symbol)
    .bind(transaction.date().to_string())
    .bind(transaction.transaction_type().to_str())
    .bind(transaction.quantity())
    .bind(transaction.price().round_dp(4).to_f64())
    .bind(transaction.cost().round_dp(4).to_f64())
    .bind(transaction.notes())
    .execute(&mut **tx)
    .await?;

    Ok(())
}

async fn insert_sold_lot(lot: &SoldLot, tx: &mut sqlx::Transaction<'_, Sqlite>) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO sold_lots
        (symbol, name, quantity, buy_price, sell_price, buy_date, sell_date, holding_days, tax_category, profit_loss)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(lot.symbol())
    .bind(lot.name())
    .bind(lot.quantity())
    .bind(lot.buy_price().round_dp(4).to_f64())
    .bind(lot.sell_price().round_dp(4).to_f64())
    .bind(lot.buy_date().to_string())
    .bind(lot.sell_date().to_string())
    .bind(lot.holding_days())
    .bind(lot.tax_category().to_str())
    .bind(lot.profit_loss().round_dp(4).to_f64())
    .execute(&mut **tx)
    .await?;

    Ok(())
}

async fn insert_alert(alert: &Alert, tx: &mut sqlx::Transaction<'_, Sqlite>) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO alerts
        (id, symbol, target_price, direction, created_at, triggered, triggered_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(alert.id())
    .bind(alert.symbol())
    .bind(alert.target_price().round_dp(4).to_f64())
    .bind(alert.direction().to_str())
    .bind(alert.created_at().to_rfc3339())
    .bind(*alert.triggered())
    .bind(alert.triggered_at().as_ref().map(|dt| dt.to_rfc3339()))
    .execute(&mut **tx)
    .await?;

    Ok(())
}
