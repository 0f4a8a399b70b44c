#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::{
        app::tax::{TaxConfig, compute_tax},
        models::{SoldLot, TaxCategory},
    };

    fn day(year: i32, month: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, d).unwrap()
    }

    fn lot(profit_loss: Decimal, holding_days: i64) -> SoldLot {
        SoldLot::new(
            "TCS.NS".to_string(),
            "Tata Consultancy Services".to_string(),
            10,
            dec!(3000),
            dec!(3100),
            day(2024, 1, 1),
            day(2024, 6, 1),
            holding_days,
            TaxCategory::from_holding_days(holding_days),
            profit_loss,
        )
    }

    #[test]
    fn empty_history_yields_all_zeros() {
        let summary = compute_tax(&[], &TaxConfig::default(), day(2026, 8, 6));

        assert_eq!(*summary.short_term_gain(), Decimal::ZERO);
        assert_eq!(*summary.short_term_tax(), Decimal::ZERO);
        assert_eq!(*summary.long_term_gain(), Decimal::ZERO);
        assert_eq!(*summary.long_term_taxable_gain(), Decimal::ZERO);
        assert_eq!(*summary.long_term_tax(), Decimal::ZERO);
        assert_eq!(*summary.total_tax(), Decimal::ZERO);
    }

    #[test]
    fn long_term_gain_at_exemption_is_untaxed() {
        let lots = [lot(dec!(100000), 400)];
        let summary = compute_tax(&lots, &TaxConfig::default(), day(2026, 8, 6));

        assert_eq!(*summary.long_term_gain(), dec!(100000));
        assert_eq!(*summary.long_term_taxable_gain(), Decimal::ZERO);
        assert_eq!(*summary.long_term_tax(), Decimal::ZERO);
    }

    #[test]
    fn long_term_gain_above_exemption_is_taxed_at_ten_percent() {
        let lots = [lot(dec!(150000), 400)];
        let summary = compute_tax(&lots, &TaxConfig::default(), day(2026, 8, 6));

        assert_eq!(*summary.long_term_taxable_gain(), dec!(50000));
        assert_eq!(*summary.long_term_tax(), dec!(5000.00));
        assert_eq!(*summary.total_tax(), dec!(5000.00));
    }

    #[test]
    fn short_term_losses_net_before_the_floor() {
        let lots = [lot(dec!(10000), 100), lot(dec!(-4000), 200)];
        let summary = compute_tax(&lots, &TaxConfig::default(), day(2026, 8, 6));

        assert_eq!(*summary.short_term_gain(), dec!(6000));
        assert_eq!(*summary.short_term_tax(), dec!(900.00));
    }

    #[test]
    fn net_short_term_loss_owes_nothing() {
        let lots = [lot(dec!(1000), 100), lot(dec!(-5000), 200)];
        let summary = compute_tax(&lots, &TaxConfig::default(), day(2026, 8, 6));

        assert_eq!(*summary.short_term_gain(), dec!(-4000));
        assert_eq!(*summary.short_term_tax(), Decimal::ZERO);
        assert_eq!(*summary.total_tax(), Decimal::ZERO);
    }

    #[test]
    fn buckets_are_taxed_independently() {
        let lots = [lot(dec!(20000), 100), lot(dec!(180000), 500)];
        let summary = compute_tax(&lots, &TaxConfig::default(), day(2026, 8, 6));

        assert_eq!(*summary.short_term_tax(), dec!(3000.00));
        assert_eq!(*summary.long_term_taxable_gain(), dec!(80000));
        assert_eq!(*summary.long_term_tax(), dec!(8000.00));
        assert_eq!(*summary.total_tax(), dec!(11000.00));
    }

    #[test]
    fn financial_year_rolls_over_in_april() {
        let summary = compute_tax(&[], &TaxConfig::default(), day(2026, 2, 1));
        assert_eq!(summary.financial_year(), "2025-26");

        let summary = compute_tax(&[], &TaxConfig::default(), day(2026, 3, 31));
        assert_eq!(summary.financial_year(), "2025-26");

        let summary = compute_tax(&[], &TaxConfig::default(), day(2026, 4, 1));
        assert_eq!(summary.financial_year(), "2026-27");

        let summary = compute_tax(&[], &TaxConfig::default(), day(2026, 8, 6));
        assert_eq!(summary.financial_year(), "2026-27");
    }
}
