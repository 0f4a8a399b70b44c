#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::{Local, NaiveDate};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::{
        app::account::{Account, BuyMode, DuplicatePolicy, SellOutcome},
        error::DashboardError,
        models::{AlertDirection, TaxCategory},
    };

    fn day(year: i32, month: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, d).unwrap()
    }

    fn account() -> Account {
        Account::new(DuplicatePolicy::Reject)
    }

    fn account_with_infy() -> Account {
        let mut account = account();
        account
            .record_new_position(
                "INFY.NS",
                "Infosys",
                Some("Information Technology".to_string()),
                10,
                dec!(1500),
                day(2025, 1, 2),
                String::new(),
            )
            .unwrap();
        account
    }

    #[test]
    fn new_buy_opens_position_with_fee() {
        let account = account_with_infy();
        let position = &account.positions()[0];

        assert_eq!(*position.quantity(), 10);
        assert_eq!(*position.avg_buy_price(), dec!(1500));
        // 0.5% of 15,000
        assert_eq!(*position.total_fees(), dec!(75.00));
        assert_eq!(position.transactions().len(), 1);
    }

    #[test]
    fn zero_quantity_buy_is_rejected() {
        let mut account = account();
        let err = account
            .record_new_position(
                "INFY.NS",
                "Infosys",
                None,
                0,
                dec!(1500),
                day(2025, 1, 2),
                String::new(),
            )
            .unwrap_err();
        assert!(matches!(err, DashboardError::InvalidInput(_)));
    }

    #[test]
    fn averaging_blends_prices() {
        let mut account = account();
        account
            .record_new_position(
                "TCS.NS",
                "Tata Consultancy Services",
                None,
                5,
                dec!(3000),
                day(2025, 1, 2),
                String::new(),
            )
            .unwrap();
        account
            .record_additional_buy(
                "TCS.NS",
                5,
                dec!(3400),
                day(2025, 2, 2),
                BuyMode::Average,
                String::new(),
            )
            .unwrap();

        let position = &account.positions()[0];
        assert_eq!(*position.avg_buy_price(), dec!(3200));
        assert_eq!(*position.quantity(), 10);
        assert_eq!(*position.last_transaction_date(), day(2025, 2, 2));
        assert_eq!(position.transactions().len(), 2);
    }

    #[test]
    fn equal_quantity_average_is_midpoint() {
        let mut account = account();
        account
            .record_new_position(
                "SBIN.NS",
                "State Bank of India",
                None,
                7,
                dec!(100.10),
                day(2025, 1, 2),
                String::new(),
            )
            .unwrap();
        account
            .record_additional_buy(
                "SBIN.NS",
                7,
                dec!(100.20),
                day(2025, 1, 3),
                BuyMode::Average,
                String::new(),
            )
            .unwrap();

        assert_eq!(*account.positions()[0].avg_buy_price(), dec!(100.15));
    }

    #[test]
    fn duplicate_new_buy_is_rejected() {
        let mut account = account_with_infy();
        let err = account
            .record_additional_buy(
                "INFY.NS",
                5,
                dec!(1550),
                day(2025, 2, 2),
                BuyMode::New,
                String::new(),
            )
            .unwrap_err();
        assert!(matches!(err, DashboardError::DuplicateSymbol(_)));
    }

    #[test]
    fn duplicate_new_buy_averages_under_average_policy() {
        let mut account = Account::new(DuplicatePolicy::Average);
        account
            .record_new_position(
                "INFY.NS",
                "Infosys",
                None,
                10,
                dec!(1500),
                day(2025, 1, 2),
                String::new(),
            )
            .unwrap();
        account
            .record_additional_buy(
                "INFY.NS",
                10,
                dec!(1600),
                day(2025, 2, 2),
                BuyMode::New,
                String::new(),
            )
            .unwrap();

        assert_eq!(*account.positions()[0].avg_buy_price(), dec!(1550));
        assert_eq!(*account.positions()[0].quantity(), 20);
    }

    #[test]
    fn partial_sell_realizes_against_average_cost() {
        let mut account = account_with_infy();
        let outcome = account
            .settle_sell("INFY.NS", 4, dec!(1600), Decimal::ZERO, day(2025, 6, 2))
            .unwrap();

        let lot = match outcome {
            SellOutcome::Filled(lot) => lot,
            SellOutcome::Pending { .. } => panic!("expected a filled sale"),
        };
        assert_eq!(*lot.profit_loss(), dec!(400));
        assert_eq!(*lot.sell_price(), dec!(1600));
        assert_eq!(*lot.tax_category(), TaxCategory::ShortTerm);
        assert_eq!(*account.positions()[0].quantity(), 6);
        assert_eq!(account.sold_lots().len(), 1);
    }

    #[test]
    fn full_sell_removes_position() {
        let mut account = account_with_infy();
        account
            .settle_sell("INFY.NS", 10, dec!(1600), Decimal::ZERO, day(2025, 6, 2))
            .unwrap();

        assert!(account.positions().is_empty());
        assert_eq!(account.sold_lots().len(), 1);
    }

    #[test]
    fn selling_more_than_held_fails() {
        let mut account = account_with_infy();
        let err = account
            .settle_sell("INFY.NS", 11, dec!(1600), Decimal::ZERO, day(2025, 6, 2))
            .unwrap_err();
        assert!(matches!(err, DashboardError::InsufficientQuantity { .. }));
    }

    #[test]
    fn selling_unknown_symbol_fails() {
        let mut account = account();
        let err = account
            .settle_sell("TCS.NS", 1, dec!(3000), Decimal::ZERO, day(2025, 6, 2))
            .unwrap_err();
        assert!(matches!(err, DashboardError::PositionNotFound(_)));
    }

    #[test]
    fn unmet_trigger_leaves_ledger_unchanged() {
        let mut account = account_with_infy();
        let outcome = account
            .settle_sell("INFY.NS", 4, dec!(1600), dec!(1700), day(2025, 6, 2))
            .unwrap();

        assert!(matches!(outcome, SellOutcome::Pending { .. }));
        assert_eq!(*account.positions()[0].quantity(), 10);
        assert!(account.sold_lots().is_empty());
    }

    #[test]
    fn met_trigger_executes_at_market_price() {
        let mut account = account_with_infy();
        let outcome = account
            .settle_sell("INFY.NS", 4, dec!(1600), dec!(1550), day(2025, 6, 2))
            .unwrap();

        match outcome {
            SellOutcome::Filled(lot) => assert_eq!(*lot.sell_price(), dec!(1600)),
            SellOutcome::Pending { .. } => panic!("trigger was already met"),
        }
    }

    #[test]
    fn long_holding_is_long_term() {
        let mut account = account();
        account
            .record_new_position(
                "HDFCBANK.NS",
                "HDFC Bank",
                None,
                10,
                dec!(1400),
                day(2024, 1, 2),
                String::new(),
            )
            .unwrap();
        let outcome = account
            .settle_sell("HDFCBANK.NS", 10, dec!(1700), Decimal::ZERO, day(2025, 6, 2))
            .unwrap();

        match outcome {
            SellOutcome::Filled(lot) => {
                assert_eq!(*lot.holding_days(), 517);
                assert_eq!(*lot.tax_category(), TaxCategory::LongTerm);
            }
            SellOutcome::Pending { .. } => panic!("expected a filled sale"),
        }
    }

    #[test]
    fn buy_quantities_sum_to_open_plus_sold() {
        let mut account = account_with_infy();
        account
            .record_additional_buy(
                "INFY.NS",
                5,
                dec!(1550),
                day(2025, 2, 2),
                BuyMode::Average,
                String::new(),
            )
            .unwrap();
        account
            .settle_sell("INFY.NS", 4, dec!(1600), Decimal::ZERO, day(2025, 6, 2))
            .unwrap();

        let position = &account.positions()[0];
        let bought: i64 = position.transactions().iter().map(|t| *t.quantity()).sum();
        let sold: i64 = account.sold_lots().iter().map(|lot| *lot.quantity()).sum();
        assert_eq!(bought, *position.quantity() + sold);
    }

    #[test]
    fn duplicate_watch_is_rejected() {
        let mut account = account();
        let err = account.record_watch("RELIANCE.NS").unwrap_err();
        assert!(matches!(err, DashboardError::DuplicateSymbol(_)));
    }

    #[test]
    fn unwatch_missing_symbol_fails() {
        let mut account = account();
        let err = account.remove_watch("ZZZ").unwrap_err();
        assert!(matches!(err, DashboardError::NotFound(_)));
    }

    #[test]
    fn reset_restores_default_watchlist() {
        let mut account = account();
        account.remove_watch("RELIANCE.NS").unwrap();
        account.record_watch("WIPRO.NS").unwrap();

        account.reset_watchlist();
        assert_eq!(account.watchlist().len(), 10);
        assert_eq!(account.watchlist()[0], "RELIANCE.NS");
    }

    #[test]
    fn already_met_alert_is_rejected() {
        let mut account = account();
        let err = account
            .record_alert("TCS.NS", dec!(3000), AlertDirection::Above, dec!(3500))
            .unwrap_err();
        assert!(matches!(err, DashboardError::PriceConstraintViolated(_)));

        let err = account
            .record_alert("TCS.NS", dec!(3600), AlertDirection::Below, dec!(3500))
            .unwrap_err();
        assert!(matches!(err, DashboardError::PriceConstraintViolated(_)));
    }

    #[test]
    fn alert_triggers_on_crossing_and_stays_listed() {
        let mut account = account();
        account
            .record_alert("TCS.NS", dec!(4000), AlertDirection::Above, dec!(3500))
            .unwrap();

        let mut prices = HashMap::new();
        prices.insert("TCS.NS".to_string(), dec!(4100));
        let fired = account.apply_alert_prices(&prices, Local::now());

        assert_eq!(fired.len(), 1);
        assert_eq!(account.alerts().len(), 1);
        assert!(*account.alerts()[0].triggered());

        // A triggered alert is not fired twice.
        let fired = account.apply_alert_prices(&prices, Local::now());
        assert!(fired.is_empty());
    }

    #[test]
    fn alert_below_target_does_not_trigger() {
        let mut account = account();
        account
            .record_alert("TCS.NS", dec!(4000), AlertDirection::Above, dec!(3500))
            .unwrap();

        let mut prices = HashMap::new();
        prices.insert("TCS.NS".to_string(), dec!(3900));
        let fired = account.apply_alert_prices(&prices, Local::now());

        assert!(fired.is_empty());
        assert!(!*account.alerts()[0].triggered());
    }

    #[test]
    fn remove_alert_by_id() {
        let mut account = account();
        let alert = account
            .record_alert("TCS.NS", dec!(4000), AlertDirection::Above, dec!(3500))
            .unwrap();

        account.remove_alert(alert.id()).unwrap();
        assert!(account.alerts().is_empty());

        let err = account.remove_alert(alert.id()).unwrap_err();
        assert!(matches!(err, DashboardError::NotFound(_)));
    }
}
