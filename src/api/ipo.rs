use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{IpoListing, IpoStatus};

/// Upcoming listings. There is no public feed for the Indian IPO calendar,
/// so the table ships with the app and is refreshed by hand.
pub fn upcoming_ipos() -> Vec<IpoListing> {
    vec![
        listing(
            "TATACAP",
            "Tata Capital Ltd",
            "NSE",
            dec!(310),
            dec!(326),
            2025,
            10,
            13,
            "₹15,512 Cr",
            46,
            "Financial Services",
            IpoStatus::Listed,
        ),
        listing(
            "LGEIL",
            "LG Electronics India Ltd",
            "NSE",
            dec!(1080),
            dec!(1140),
            2025,
            10,
            14,
            "₹11,607 Cr",
            13,
            "Consumer Goods",
            IpoStatus::Listed,
        ),
        listing(
            "LENSKART",
            "Lenskart Solutions Ltd",
            "NSE",
            dec!(382),
            dec!(402),
            2025,
            11,
            10,
            "₹7,278 Cr",
            37,
            "Consumer Goods",
            IpoStatus::Closed,
        ),
        listing(
            "GROWW",
            "Billionbrains Garage Ventures Ltd",
            "NSE",
            dec!(95),
            dec!(100),
            2025,
            11,
            12,
            "₹6,632 Cr",
            150,
            "Financial Services",
            IpoStatus::Closed,
        ),
        listing(
            "PHONEPE",
            "PhonePe Ltd",
            "NSE",
            dec!(510),
            dec!(540),
            2026,
            8,
            24,
            "₹12,000 Cr",
            27,
            "Financial Services",
            IpoStatus::Open,
        ),
        listing(
            "NSEIN",
            "National Stock Exchange of India Ltd",
            "BSE",
            dec!(1650),
            dec!(1750),
            2026,
            9,
            15,
            "₹10,500 Cr",
            8,
            "Financial Services",
            IpoStatus::Upcoming,
        ),
        listing(
            "BOAT",
            "Imagine Marketing Ltd",
            "NSE",
            dec!(260),
            dec!(275),
            2026,
            10,
            5,
            "₹2,500 Cr",
            54,
            "Consumer Goods",
            IpoStatus::Upcoming,
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn listing(
    symbol: &str,
    company_name: &str,
    exchange: &str,
    band_low: Decimal,
    band_high: Decimal,
    year: i32,
    month: u32,
    day: u32,
    issue_size: &str,
    lot_size: i64,
    sector: &str,
    status: IpoStatus,
) -> IpoListing {
    IpoListing::new(
        symbol.to_string(),
        company_name.to_string(),
        exchange.to_string(),
        band_low,
        band_high,
        NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default(),
        issue_size.to_string(),
        lot_size,
        sector.to_string(),
        status,
    )
}
