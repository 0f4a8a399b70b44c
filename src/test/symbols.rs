#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use crate::{
        app::utils::{financial_year_label, normalize_symbol, transaction_fee},
        error::DashboardError,
    };

    #[test]
    fn bare_symbol_gets_the_nse_suffix() {
        assert_eq!(normalize_symbol("tcs").unwrap(), "TCS.NS");
        assert_eq!(normalize_symbol(" infy ").unwrap(), "INFY.NS");
    }

    #[test]
    fn recognized_suffixes_are_preserved() {
        assert_eq!(normalize_symbol("SBIN.bo").unwrap(), "SBIN.BO");
        assert_eq!(normalize_symbol("reliance.ns").unwrap(), "RELIANCE.NS");
    }

    #[test]
    fn ampersand_tickers_are_accepted() {
        assert_eq!(normalize_symbol("m&m").unwrap(), "M&M.NS");
    }

    #[test]
    fn empty_symbol_is_rejected() {
        let err = normalize_symbol("   ").unwrap_err();
        assert!(matches!(err, DashboardError::InvalidInput(_)));
    }

    #[test]
    fn garbage_symbol_is_rejected() {
        let err = normalize_symbol("bad symbol").unwrap_err();
        assert!(matches!(err, DashboardError::InvalidInput(_)));
    }

    #[test]
    fn fee_is_half_a_percent_rounded() {
        assert_eq!(transaction_fee(dec!(1500), 10), dec!(75.00));
        assert_eq!(transaction_fee(dec!(333.33), 3), dec!(5.00));
        assert_eq!(transaction_fee(dec!(10), 1), dec!(0.05));
    }

    #[test]
    fn financial_year_follows_the_april_boundary() {
        let day = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
        assert_eq!(financial_year_label(day(2026, 2, 1)), "2025-26");
        assert_eq!(financial_year_label(day(2026, 4, 1)), "2026-27");
        assert_eq!(financial_year_label(day(2025, 12, 31)), "2025-26");
    }
}
