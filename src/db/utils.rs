use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDate};
use rust_decimal::{Decimal, prelude::FromPrimitive};
use sqlx::{Row, sqlite::SqliteRow};

use crate::models::{
    Alert, AlertDirection, Position, SoldLot, TaxCategory, Transaction, TransactionType,
};

pub fn parse_i64_from_row(row: &SqliteRow, column: &str) -> Result<i64> {
    row.try_get::<i64, _>(column)
        .with_context(|| format!("Failed to parse i64 from column '{}'", column))
}

pub fn parse_string_from_row(row: &SqliteRow, column: &str) -> Result<String> {
    row.try_get::<String, _>(column)
        .with_context(|| format!("Failed to parse String from column '{}'", column))
}

pub fn parse_opt_string_from_row(row: &SqliteRow, column: &str) -> Result<Option<String>> {
    row.try_get::<Option<String>, _>(column)
        .with_context(|| format!("Failed to parse Option<String> from column '{}'", column))
}

pub fn parse_f64_from_row(row: &SqliteRow, column: &str) -> Result<f64> {
    row.try_get::<f64, _>(column)
        .with_context(|| format!("Failed to parse f64 from column '{}'", column))
}

pub fn parse_decimal_from_row(row: &SqliteRow, column: &str) -> Result<Decimal> {
    let value = parse_f64_from_row(row, column)?;
    Decimal::from_f64(value)
        .with_context(|| format!("Failed to convert f64 to Decimal for column '{}'", column))
}

pub fn parse_bool_from_row(row: &SqliteRow, column: &str) -> Result<bool> {
    let value: i64 = row
        .try_get(column)
        .with_context(|| format!("Failed to parse bool from column '{}'", column))?;
    Ok(value != 0)
}

pub fn parse_date_from_row(row: &SqliteRow, column: &str) -> Result<NaiveDate> {
    let value = parse_string_from_row(row, column)?;
    NaiveDate::parse_from_str(&value, "%Y-%m-%d")
        .with_context(|| format!("Failed to parse date from column '{}'", column))
}

pub fn parse_datetime_from_row(row: &SqliteRow, column: &str) -> Result<DateTime<Local>> {
    let value = parse_string_from_row(row, column)?;
    Ok(DateTime::parse_from_rfc3339(&value)
        .with_context(|| format!("Failed to parse datetime from column '{}'", column))?
        .with_timezone(&Local))
}

pub fn parse_opt_datetime_from_row(
    row: &SqliteRow,
    column: &str,
) -> Result<Option<DateTime<Local>>> {
    let value: Option<String> = row
        .try_get(column)
        .with_context(|| format!("Failed to read column '{}'", column))?;
    match value {
        Some(value) => Ok(Some(
            DateTime::parse_from_rfc3339(&value)
                .with_context(|| format!("Failed to parse datetime from column '{}'", column))?
                .with_timezone(&Local),
        )),
        None => Ok(None),
    }
}

pub fn parse_transaction(row: SqliteRow) -> Result<Transaction> {
    let date = parse_date_from_row(&row, "transaction_date")?;
    let transaction_type =
        TransactionType::parse_str(&parse_string_from_row(&row, "transaction_type")?)?;
    let quantity = parse_i64_from_row(&row, "quantity")?;
    let price = parse_decimal_from_row(&row, "price")?;
    let cost = parse_decimal_from_row(&row, "cost")?;
    let notes = parse_string_from_row(&row, "notes")?;

    Ok(Transaction::new(
        date,
        transaction_type,
        quantity,
        price,
        cost,
        notes,
    ))
}

pub fn parse_position(row: SqliteRow, transactions: Vec<Transaction>) -> Result<Position> {
    Ok(Position::new(
        parse_string_from_row(&row, "symbol")?,
        parse_string_from_row(&row, "name")?,
        parse_i64_from_row(&row, "quantity")?,
        parse_decimal_from_row(&row, "avg_buy_price")?,
        None,
        parse_date_from_row(&row, "purchase_date")?,
        parse_date_from_row(&row, "last_transaction_date")?,
        parse_opt_string_from_row(&row, "sector")?,
        parse_decimal_from_row(&row, "total_fees")?,
        transactions,
    ))
}

pub fn parse_sold_lot(row: SqliteRow) -> Result<SoldLot> {
    Ok(SoldLot::new(
        parse_string_from_row(&row, "symbol")?,
        parse_string_from_row(&row, "name")?,
        parse_i64_from_row(&row, "quantity")?,
        parse_decimal_from_row(&row, "buy_price")?,
        parse_decimal_from_row(&row, "sell_price")?,
        parse_date_from_row(&row, "buy_date")?,
        parse_date_from_row(&row, "sell_date")?,
        parse_i64_from_row(&row, "holding_days")?,
        TaxCategory::parse_str(&parse_string_from_row(&row, "tax_category")?)?,
        parse_decimal_from_row(&row, "profit_loss")?,
    ))
}

pub fn parse_alert(row: SqliteRow) -> Result<Alert> {
    Ok(Alert::new(
        parse_string_from_row(&row, "id")?,
        parse_string_from_row(&row, "symbol")?,
        parse_decimal_from_row(&row, "target_price")?,
        AlertDirection::parse_str(&parse_string_from_row(&row, "direction")?)?,
        parse_datetime_from_row(&row, "created_at")?,
        parse_bool_from_row(&row, "triggered")?,
        parse_opt_datetime_from_row(&row, "triggered_at")?,
    ))
}
