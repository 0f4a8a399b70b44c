use anyhow::Result;
use sqlx::{Pool, Sqlite};

use crate::{
    app::account::{Account, DuplicatePolicy},
    db::utils::{
        parse_alert, parse_position, parse_sold_lot, parse_string_from_row, parse_transaction,
    },
};

/// Loads the stored aggregate. A brand-new database (nothing stored at all)
/// starts from the default watchlist.
pub async fn load_account(
    connection: &Pool<Sqlite>,
    duplicate_policy: DuplicatePolicy,
) -> Result<Account> {
    let watchlist_rows = sqlx::query("SELECT symbol FROM watchlist ORDER BY sort_order")
        .fetch_all(connection)
        .await?;
    let mut watchlist = Vec::with_capacity(watchlist_rows.len());
    for row in watchlist_rows {
        watchlist.push(parse_string_from_row(&row, "symbol")?);
    }

    let position_rows = sqlx::query("SELECT * FROM positions ORDER BY symbol")
        .fetch_all(connection)
        .await?;
    let mut positions = Vec::with_capacity(position_rows.len());
    for row in position_rows {
        let symbol = parse_string_from_row(&row, "symbol")?;
        let transaction_rows = sqlx::query(
            "SELECT * FROM transactions WHERE symbol = ? ORDER BY transaction_date, id",
        )
        .bind(&symbol)
        .fetch_all(connection)
        .await?;
        let mut transactions = Vec::with_capacity(transaction_rows.len());
        for transaction_row in transaction_rows {
            transactions.push(parse_transaction(transaction_row)?);
        }
        positions.push(parse_position(row, transactions)?);
    }

    let lot_rows = sqlx::query("SELECT * FROM sold_lots ORDER BY sell_date, id")
        .fetch_all(connection)
        .await?;
    let mut sold_lots = Vec::with_capacity(lot_rows.len());
    for row in lot_rows {
        sold_lots.push(parse_sold_lot(row)?);
    }

    let alert_rows = sqlx::query("SELECT * FROM alerts ORDER BY created_at")
        .fetch_all(connection)
        .await?;
    let mut alerts = Vec::with_capacity(alert_rows.len());
    for row in alert_rows {
        alerts.push(parse_alert(row)?);
    }

    if watchlist.is_empty() && positions.is_empty() && sold_lots.is_empty() && alerts.is_empty() {
        return Ok(Account::new(duplicate_policy));
    }

    Ok(Account::from_parts(
        watchlist,
        positions,
        sold_lots,
        alerts,
        duplicate_policy,
    ))
}
