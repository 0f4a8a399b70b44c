use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use csv::WriterBuilder;
use rust_decimal::Decimal;

use crate::{
    app::{report::DividendYield, tax::TaxSummary},
    models::{Position, SoldLot},
};

/// Writes the open-position report. Returns the path of the created file.
pub fn export_portfolio(positions: &[Position], dir: &Path, today: NaiveDate) -> Result<PathBuf> {
    let path = stamped_path(dir, "portfolio", today)?;
    let mut writer = WriterBuilder::new()
        .from_path(&path)
        .with_context(|| format!("Failed to create CSV file at {}", path.display()))?;

    writer.write_record([
        "Symbol",
        "Company Name",
        "Quantity",
        "Buy Price",
        "Current Price",
        "Buy Date",
        "Holding Period (Days)",
        "Current Value",
        "Cost Basis",
        "Profit/Loss",
        "Profit/Loss %",
        "Sector",
    ])?;

    for position in positions {
        let holding_days = (today - *position.purchase_date()).num_days();
        writer.write_record([
            position.symbol().clone(),
            position.name().clone(),
            position.quantity().to_string(),
            position.avg_buy_price().to_string(),
            fmt_opt(*position.current_price()),
            position.purchase_date().to_string(),
            holding_days.to_string(),
            position.valuation().round_dp(2).to_string(),
            position.cost_basis().round_dp(2).to_string(),
            fmt_opt(position.unrealized_pl()),
            fmt_opt(position.unrealized_pl_percent()),
            position
                .sector()
                .clone()
                .unwrap_or_else(|| "Unknown".to_string()),
        ])?;
    }

    writer.flush()?;
    Ok(path)
}

/// Writes the realized-lot report with the tax summary appended below the
/// lot rows.
pub fn export_tax(
    lots: &[SoldLot],
    summary: &TaxSummary,
    dir: &Path,
    today: NaiveDate,
) -> Result<PathBuf> {
    let path = stamped_path(dir, "tax", today)?;
    let mut writer = WriterBuilder::new()
        .flexible(true)
        .from_path(&path)
        .with_context(|| format!("Failed to create CSV file at {}", path.display()))?;

    writer.write_record([
        "Symbol",
        "Company Name",
        "Quantity",
        "Buy Price",
        "Sell Price",
        "Buy Date",
        "Sell Date",
        "Holding Period (Days)",
        "Tax Category",
        "Profit/Loss",
    ])?;

    for lot in lots {
        writer.write_record([
            lot.symbol().clone(),
            lot.name().clone(),
            lot.quantity().to_string(),
            lot.buy_price().to_string(),
            lot.sell_price().to_string(),
            lot.buy_date().to_string(),
            lot.sell_date().to_string(),
            lot.holding_days().to_string(),
            lot.tax_category().to_str().to_string(),
            lot.profit_loss().to_string(),
        ])?;
    }

    writer.write_record([""])?;
    writer.write_record(["Financial Year", summary.financial_year()])?;
    writer.write_record(["Short-Term Gain", &summary.short_term_gain().to_string()])?;
    writer.write_record(["Short-Term Tax", &summary.short_term_tax().to_string()])?;
    writer.write_record(["Long-Term Gain", &summary.long_term_gain().to_string()])?;
    writer.write_record([
        "Long-Term Taxable Gain",
        &summary.long_term_taxable_gain().to_string(),
    ])?;
    writer.write_record(["Long-Term Tax", &summary.long_term_tax().to_string()])?;
    writer.write_record(["Total Tax", &summary.total_tax().to_string()])?;

    writer.flush()?;
    Ok(path)
}

/// Writes the dividend-yield report.
pub fn export_dividends(yields: &[DividendYield], dir: &Path, today: NaiveDate) -> Result<PathBuf> {
    let path = stamped_path(dir, "dividends", today)?;
    let mut writer = WriterBuilder::new()
        .from_path(&path)
        .with_context(|| format!("Failed to create CSV file at {}", path.display()))?;

    writer.write_record([
        "Symbol",
        "Company Name",
        "Dividends (TTM)",
        "Current Price",
        "Yield %",
    ])?;

    for row in yields {
        writer.write_record([
            row.symbol().clone(),
            row.name().clone(),
            row.ttm_dividend().to_string(),
            fmt_opt(*row.current_price()),
            fmt_opt(*row.yield_percent()),
        ])?;
    }

    writer.flush()?;
    Ok(path)
}

fn stamped_path(dir: &Path, report: &str, today: NaiveDate) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory {}", dir.display()))?;
    Ok(dir.join(format!("{}_{}.csv", report, today.format("%Y%m%d"))))
}

fn fmt_opt(value: Option<Decimal>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "N/A".to_string())
}
