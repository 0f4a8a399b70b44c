use sqlx::sqlite::SqliteQueryResult;

pub async fn create_tables(connection: &sqlx::Pool<sqlx::Sqlite>) -> Result<(), sqlx::Error> {
    create_watchlist(connection).await?;
    create_positions(connection).await?;
    create_transactions(connection).await?;
    create_sold_lots(connection).await?;
    create_alerts(connection).await?;
    Ok(())
}

pub async fn create_watchlist(
    connection: &sqlx::Pool<sqlx::Sqlite>,
) -> Result<SqliteQueryResult, sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS watchlist (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            symbol TEXT NOT NULL UNIQUE,
            sort_order INTEGER NOT NULL,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(connection)
    .await
}

pub async fn create_positions(
    connection: &sqlx::Pool<sqlx::Sqlite>,
) -> Result<SqliteQueryResult, sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS positions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            symbol TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            quantity INTEGER NOT NULL,
            avg_buy_price REAL NOT NULL,
            purchase_date TEXT NOT NULL,
            last_transaction_date TEXT NOT NULL,
            sector TEXT,
            total_fees REAL NOT NULL,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(connection)
    .await
}

pub async fn create_transactions(
    connection: &sqlx::Pool<sqlx::Sqlite>,
) -> Result<SqliteQueryResult, sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS transactions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            symbol TEXT NOT NULL,
            transaction_date TEXT NOT NULL,
            transaction_type TEXT NOT NULL,
            quantity INTEGER NOT NULL,
            price REAL NOT NULL,
            cost REAL NOT NULL,
            notes TEXT NOT NULL DEFAULT '',
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(connection)
    .await
}

pub async fn create_sold_lots(
    connection: &sqlx::Pool<sqlx::Sqlite>,
) -> Result<SqliteQueryResult, sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sold_lots (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            symbol TEXT NOT NULL,
            name TEXT NOT NULL,
            quantity INTEGER NOT NULL,
            buy_price REAL NOT NULL,
            sell_price REAL NOT NULL,
            buy_date TEXT NOT NULL,
            sell_date TEXT NOT NULL,
            holding_days INTEGER NOT NULL,
            tax_category TEXT NOT NULL,
            profit_loss REAL NOT NULL,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(connection)
    .await
}

pub async fn create_alerts(
    connection: &sqlx::Pool<sqlx::Sqlite>,
) -> Result<SqliteQueryResult, sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS alerts (
            id TEXT PRIMARY KEY,
            symbol TEXT NOT NULL,
            target_price REAL NOT NULL,
            direction TEXT NOT NULL,
            created_at TEXT NOT NULL,
            triggered INTEGER NOT NULL DEFAULT 0,
            triggered_at TEXT
        )
        "#,
    )
    .execute(connection)
    .await
}
