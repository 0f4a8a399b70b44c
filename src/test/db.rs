#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

    use crate::{
        app::account::{Account, DuplicatePolicy},
        db,
        models::AlertDirection,
    };

    fn day(year: i32, month: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, d).unwrap()
    }

    async fn memory_pool() -> SqlitePool {
        // One connection, or each pooled connection would get its own
        // private in-memory database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        db::init::create_tables(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn account_round_trips_through_sqlite() {
        let pool = memory_pool().await;

        let mut account = Account::new(DuplicatePolicy::Reject);
        account
            .record_new_position(
                "INFY.NS",
                "Infosys",
                Some("Information Technology".to_string()),
                10,
                dec!(1500),
                day(2025, 1, 2),
                "first lot".to_string(),
            )
            .unwrap();
        account
            .settle_sell("INFY.NS", 4, dec!(1600), Decimal::ZERO, day(2025, 6, 2))
            .unwrap();
        account
            .record_alert("TCS.NS", dec!(4000), AlertDirection::Above, dec!(3500))
            .unwrap();
        account.remove_watch("TATAMOTORS.NS").unwrap();

        db::write::save_account(&pool, &account).await.unwrap();
        let loaded = db::read::load_account(&pool, DuplicatePolicy::Reject)
            .await
            .unwrap();

        assert_eq!(loaded.watchlist().len(), 9);
        assert_eq!(loaded.positions().len(), 1);
        let position = &loaded.positions()[0];
        assert_eq!(position.symbol(), "INFY.NS");
        assert_eq!(*position.quantity(), 6);
        assert_eq!(*position.avg_buy_price(), dec!(1500));
        assert_eq!(position.transactions().len(), 1);
        assert_eq!(position.transactions()[0].notes(), "first lot");
        assert_eq!(loaded.sold_lots().len(), 1);
        assert_eq!(*loaded.sold_lots()[0].profit_loss(), dec!(400));
        assert_eq!(loaded.alerts().len(), 1);
        assert_eq!(loaded.alerts()[0].symbol(), "TCS.NS");
        assert!(!*loaded.alerts()[0].triggered());
    }

    #[tokio::test]
    async fn fresh_database_seeds_the_default_watchlist() {
        let pool = memory_pool().await;
        let account = db::read::load_account(&pool, DuplicatePolicy::Reject)
            .await
            .unwrap();

        assert_eq!(account.watchlist().len(), 10);
        assert!(account.positions().is_empty());
        assert!(account.sold_lots().is_empty());
    }

    #[tokio::test]
    async fn save_is_idempotent_over_reloads() {
        let pool = memory_pool().await;

        let mut account = Account::new(DuplicatePolicy::Reject);
        account.record_watch("WIPRO.NS").unwrap();
        db::write::save_account(&pool, &account).await.unwrap();

        let loaded = db::read::load_account(&pool, DuplicatePolicy::Reject)
            .await
            .unwrap();
        db::write::save_account(&pool, &loaded).await.unwrap();
        let reloaded = db::read::load_account(&pool, DuplicatePolicy::Reject)
            .await
            .unwrap();

        assert_eq!(reloaded.watchlist().len(), 11);
        assert_eq!(reloaded.watchlist()[10], "WIPRO.NS");
    }
}
