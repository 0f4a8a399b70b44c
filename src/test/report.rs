#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::{
        app::report::{
            ConcentrationRisk, concentration_risk, dividend_yields, diversification_score,
            sector_allocation,
        },
        models::{DividendRow, Position},
    };

    fn day(year: i32, month: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, d).unwrap()
    }

    fn position(
        symbol: &str,
        sector: Option<&str>,
        quantity: i64,
        avg: Decimal,
        current: Option<Decimal>,
    ) -> Position {
        Position::new(
            symbol.to_string(),
            symbol.to_string(),
            quantity,
            avg,
            current,
            day(2025, 1, 2),
            day(2025, 1, 2),
            sector.map(String::from),
            Decimal::ZERO,
            Vec::new(),
        )
    }

    #[test]
    fn single_position_scores_100() {
        let positions = [position("INFY.NS", None, 10, dec!(1500), Some(dec!(1600)))];
        assert_eq!(diversification_score(&positions), dec!(100));
    }

    #[test]
    fn empty_portfolio_scores_zero() {
        assert_eq!(diversification_score(&[]), Decimal::ZERO);
        assert_eq!(concentration_risk(&[]), ConcentrationRisk::Low);
        assert!(sector_allocation(&[]).is_empty());
    }

    #[test]
    fn equal_weights_split_allocation_evenly() {
        let positions = [
            position(
                "INFY.NS",
                Some("Information Technology"),
                10,
                dec!(100),
                Some(dec!(100)),
            ),
            position(
                "SBIN.NS",
                Some("Financial Services"),
                10,
                dec!(100),
                Some(dec!(100)),
            ),
        ];
        let allocations = sector_allocation(&positions);

        assert_eq!(allocations.len(), 2);
        assert_eq!(*allocations[0].percent(), dec!(50.00));
        assert_eq!(*allocations[1].percent(), dec!(50.00));
    }

    #[test]
    fn unknown_sector_buckets_under_unknown() {
        let positions = [position("INFY.NS", None, 10, dec!(100), Some(dec!(100)))];
        let allocations = sector_allocation(&positions);

        assert_eq!(allocations[0].sector(), "Unknown");
        assert_eq!(*allocations[0].value(), dec!(1000.00));
    }

    #[test]
    fn missing_price_values_at_average_cost() {
        let positions = [position("INFY.NS", None, 10, dec!(120), None)];
        let allocations = sector_allocation(&positions);

        assert_eq!(*allocations[0].value(), dec!(1200.00));
    }

    #[test]
    fn concentration_tiers_follow_top_holding() {
        let two_equal = [
            position("A.NS", None, 1, dec!(100), Some(dec!(100))),
            position("B.NS", None, 1, dec!(100), Some(dec!(100))),
        ];
        assert_eq!(concentration_risk(&two_equal), ConcentrationRisk::High);

        let four_equal = [
            position("A.NS", None, 1, dec!(100), Some(dec!(100))),
            position("B.NS", None, 1, dec!(100), Some(dec!(100))),
            position("C.NS", None, 1, dec!(100), Some(dec!(100))),
            position("D.NS", None, 1, dec!(100), Some(dec!(100))),
        ];
        assert_eq!(concentration_risk(&four_equal), ConcentrationRisk::Medium);

        let six_equal = [
            position("A.NS", None, 1, dec!(100), Some(dec!(100))),
            position("B.NS", None, 1, dec!(100), Some(dec!(100))),
            position("C.NS", None, 1, dec!(100), Some(dec!(100))),
            position("D.NS", None, 1, dec!(100), Some(dec!(100))),
            position("E.NS", None, 1, dec!(100), Some(dec!(100))),
            position("F.NS", None, 1, dec!(100), Some(dec!(100))),
        ];
        assert_eq!(concentration_risk(&six_equal), ConcentrationRisk::Low);
    }

    #[test]
    fn skewed_portfolio_scores_below_balanced_one() {
        let balanced = [
            position("A.NS", None, 10, dec!(100), Some(dec!(100))),
            position("B.NS", None, 10, dec!(100), Some(dec!(100))),
        ];
        let skewed = [
            position("A.NS", None, 90, dec!(100), Some(dec!(100))),
            position("B.NS", None, 10, dec!(100), Some(dec!(100))),
        ];

        assert_eq!(diversification_score(&balanced), dec!(100));
        assert_eq!(diversification_score(&skewed), dec!(60.00));
    }

    #[test]
    fn dividend_yield_uses_trailing_total() {
        let positions = [position("INFY.NS", None, 10, dec!(90), Some(dec!(100)))];
        let mut cache = HashMap::new();
        cache.insert(
            "INFY.NS".to_string(),
            vec![
                DividendRow::new(day(2025, 3, 1), dec!(2.5)),
                DividendRow::new(day(2025, 9, 1), dec!(3.5)),
            ],
        );

        let yields = dividend_yields(&positions, &cache);
        assert_eq!(*yields[0].ttm_dividend(), dec!(6.0));
        assert_eq!(*yields[0].yield_percent(), Some(dec!(6.00)));
    }

    #[test]
    fn dividend_yield_without_price_is_unknown() {
        let positions = [position("INFY.NS", None, 10, dec!(90), None)];
        let yields = dividend_yields(&positions, &HashMap::new());

        assert_eq!(*yields[0].ttm_dividend(), Decimal::ZERO);
        assert_eq!(*yields[0].yield_percent(), None);
    }
}
