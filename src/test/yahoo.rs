#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use crate::api::{
        yahoo::{display_name, history_rows, quote_from_meta},
        yahoo_dto::ChartResponseDto,
    };

    const QUOTE_PAYLOAD: &str = r#"{
        "chart": {
            "result": [{
                "meta": {
                    "symbol": "INFY.NS",
                    "longName": "Infosys Limited",
                    "regularMarketPrice": 1600.5,
                    "previousClose": 1580.0,
                    "regularMarketVolume": 1234567,
                    "regularMarketDayHigh": 1612.0,
                    "regularMarketDayLow": 1588.25
                }
            }],
            "error": null
        }
    }"#;

    const HISTORY_PAYLOAD: &str = r#"{
        "chart": {
            "result": [{
                "meta": {
                    "symbol": "INFY.NS",
                    "regularMarketPrice": 1600.5
                },
                "timestamp": [1735689600, 1735776000, 1735862400],
                "indicators": {
                    "quote": [{
                        "open": [1590.0, null, 1602.0],
                        "high": [1605.0, null, 1610.0],
                        "low": [1585.0, null, 1598.0],
                        "close": [1600.0, null, 1604.5],
                        "volume": [100000, null, 120000]
                    }]
                }
            }],
            "error": null
        }
    }"#;

    #[test]
    fn chart_meta_decodes_into_a_quote() {
        let res: ChartResponseDto = serde_json::from_str(QUOTE_PAYLOAD).unwrap();
        let result = res.chart().result().as_ref().unwrap().first().unwrap();

        let quote = quote_from_meta("INFY.NS", result.meta()).unwrap();
        assert_eq!(quote.symbol(), "INFY.NS");
        assert_eq!(quote.name(), "Infosys Limited");
        assert_eq!(*quote.price(), dec!(1600.5));
        assert_eq!(quote.change(), Some(dec!(20.5)));
        assert_eq!(*quote.volume(), Some(1234567));
        // Not supplied by the provider, so explicitly unknown.
        assert_eq!(*quote.market_cap(), None);
        assert_eq!(*quote.sector(), None);
    }

    #[test]
    fn missing_price_is_not_a_quote() {
        let payload = r#"{"chart":{"result":[{"meta":{"symbol":"ZZZ.NS"}}],"error":null}}"#;
        let res: ChartResponseDto = serde_json::from_str(payload).unwrap();
        let result = res.chart().result().as_ref().unwrap().first().unwrap();

        assert!(quote_from_meta("ZZZ.NS", result.meta()).is_err());
    }

    #[test]
    fn history_rows_skip_provider_gaps() {
        let res: ChartResponseDto = serde_json::from_str(HISTORY_PAYLOAD).unwrap();
        let result = res.chart().result().as_ref().unwrap().first().unwrap();

        let rows = history_rows(result);
        assert_eq!(rows.len(), 2);
        assert_eq!(
            *rows[0].date(),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
        );
        assert_eq!(*rows[0].close(), dec!(1600.0));
        assert_eq!(*rows[1].close(), dec!(1604.5));
        assert_eq!(*rows[1].volume(), 120000);
    }

    #[test]
    fn display_name_drops_exchange_suffixes() {
        assert_eq!(display_name("INFY.NS"), "INFY");
        assert_eq!(display_name("SBIN.BO"), "SBIN");
        assert_eq!(display_name("PLAIN"), "PLAIN");
    }
}
