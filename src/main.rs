use std::path::PathBuf;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use dotenv::dotenv;
use rust_decimal::Decimal;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use tracing_subscriber::EnvFilter;

use finance_dashboard_tui::{
    app::{
        App,
        account::{Account, BuyMode, DuplicatePolicy, SellOutcome},
        export, report,
        tax::{TaxConfig, compute_tax},
    },
    db,
    models::AlertDirection,
};

#[derive(Parser)]
#[command(
    name = "finance-dashboard-tui",
    about = "Terminal dashboard for Indian stocks, funds and portfolio tracking"
)]
struct Cli {
    /// Path to the SQLite database file
    #[arg(long, default_value = "dashboard.db")]
    db: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Buy shares, opening or extending a position
    Buy {
        symbol: String,
        quantity: i64,
        /// Execution price; defaults to the live market price
        #[arg(long)]
        price: Option<Decimal>,
        /// Trade date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long, value_enum, default_value = "new")]
        mode: BuyMode,
        /// Sector override when the provider does not report one
        #[arg(long)]
        sector: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Sell shares at the live market price
    Sell {
        symbol: String,
        quantity: i64,
        /// Minimum price; the order stays pending while the market is below it
        #[arg(long, default_value = "0")]
        trigger: Decimal,
    },
    /// Track a symbol on the watchlist
    Watch { symbol: String },
    /// Stop tracking a symbol
    Unwatch { symbol: String },
    /// Restore the default watchlist
    ResetWatchlist,
    /// Create a price alert
    Alert {
        symbol: String,
        target: Decimal,
        #[arg(value_enum)]
        direction: AlertDirection,
    },
    /// Delete an alert by id
    RemoveAlert { id: String },
    /// Re-check pending alerts against live prices
    CheckAlerts,
    /// Write a CSV report
    Export {
        #[arg(value_enum)]
        report: ReportKind,
        #[arg(long, default_value = "exports")]
        dir: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ReportKind {
    Portfolio,
    Tax,
    Dividends,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let db_path = shellexpand::tilde(&cli.db).into_owned();
    let db_connect_options = SqliteConnectOptions::new()
        .filename(&db_path)
        .create_if_missing(true);
    let connection = SqlitePool::connect_with(db_connect_options).await?;
    db::init::create_tables(&connection).await?;

    let mut account = db::read::load_account(&connection, DuplicatePolicy::from_env()).await?;

    match cli.command {
        Some(command) => run_command(command, &mut account, &connection).await?,
        None => {
            let mut app = App::new(account, connection);
            app.run().await?;
        }
    }

    Ok(())
}

async fn run_command(
    command: Command,
    account: &mut Account,
    connection: &SqlitePool,
) -> Result<()> {
    let today = Local::now().date_naive();

    match command {
        Command::Buy {
            symbol,
            quantity,
            price,
            date,
            mode,
            sector,
            notes,
        } => {
            let receipt = account
                .buy(&symbol, quantity, price, date, mode, sector, notes)
                .await?;
            db::write::save_account(connection, account).await?;
            println!(
                "Bought {} x {} at ₹{} (fee ₹{}), holding {} at avg ₹{}",
                receipt.quantity(),
                receipt.symbol(),
                receipt.price(),
                receipt.fee(),
                receipt.total_quantity(),
                receipt.avg_buy_price(),
            );
        }
        Command::Sell {
            symbol,
            quantity,
            trigger,
        } => {
            let outcome = account.sell(&symbol, quantity, trigger).await?;
            match outcome {
                SellOutcome::Filled(lot) => {
                    db::write::save_account(connection, account).await?;
                    println!(
                        "Sold {} x {} at ₹{}, P/L ₹{} ({}, held {} days)",
                        lot.quantity(),
                        lot.symbol(),
                        lot.sell_price(),
                        lot.profit_loss(),
                        lot.tax_category().to_str(),
                        lot.holding_days(),
                    );
                }
                SellOutcome::Pending {
                    symbol,
                    trigger_price,
                    market_price,
                } => {
                    println!(
                        "Order pending for {}: market ₹{} is below trigger ₹{}",
                        symbol, market_price, trigger_price
                    );
                }
            }
        }
        Command::Watch { symbol } => {
            let symbol = account.add_watch(&symbol).await?;
            db::write::save_account(connection, account).await?;
            println!("Added {} to the watchlist", symbol);
        }
        Command::Unwatch { symbol } => {
            let symbol = account.remove_watch(&symbol)?;
            db::write::save_account(connection, account).await?;
            println!("Removed {} from the watchlist", symbol);
        }
        Command::ResetWatchlist => {
            account.reset_watchlist();
            db::write::save_account(connection, account).await?;
            println!("Watchlist restored to defaults");
        }
        Command::Alert {
            symbol,
            target,
            direction,
        } => {
            let alert = account.add_alert(&symbol, target, direction).await?;
            db::write::save_account(connection, account).await?;
            println!(
                "Alert {} set: {} {} ₹{}",
                alert.id(),
                alert.symbol(),
                alert.direction().to_str(),
                alert.target_price(),
            );
        }
        Command::RemoveAlert { id } => {
            account.remove_alert(&id)?;
            db::write::save_account(connection, account).await?;
            println!("Alert {} removed", id);
        }
        Command::CheckAlerts => {
            let fired = account.check_alerts().await?;
            db::write::save_account(connection, account).await?;
            if fired.is_empty() {
                println!("No alerts triggered");
            }
            for alert in fired {
                println!(
                    "Triggered: {} {} ₹{}",
                    alert.symbol(),
                    alert.direction().to_str(),
                    alert.target_price(),
                );
            }
        }
        Command::Export { report: kind, dir } => {
            let dir = PathBuf::from(shellexpand::tilde(&dir).into_owned());
            let path = match kind {
                ReportKind::Portfolio => {
                    account.refresh_prices().await;
                    export::export_portfolio(account.positions(), &dir, today)?
                }
                ReportKind::Tax => {
                    let summary =
                        compute_tax(account.sold_lots(), &TaxConfig::from_env(), today);
                    export::export_tax(account.sold_lots(), &summary, &dir, today)?
                }
                ReportKind::Dividends => {
                    account.refresh_prices().await;
                    account.refresh_dividends().await;
                    let yields =
                        report::dividend_yields(account.positions(), account.dividend_cache());
                    export::export_dividends(&yields, &dir, today)?
                }
            };
            println!("Report written to {}", path.display());
        }
    }

    Ok(())
}
