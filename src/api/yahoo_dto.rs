use std::collections::HashMap;

use derive_getters::Getters;
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize, Getters)]
pub struct ChartResponseDto {
    chart: ChartDto,
}

#[derive(Debug, Deserialize, Getters)]
pub struct ChartDto {
    result: Option<Vec<ChartResultDto>>,
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize, Getters)]
pub struct ChartResultDto {
    meta: ChartMetaDto,
    timestamp: Option<Vec<i64>>,
    indicators: Option<IndicatorsDto>,
    events: Option<EventsDto>,
}

#[derive(Debug, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct ChartMetaDto {
    symbol: Option<String>,
    long_name: Option<String>,
    regular_market_price: Option<Decimal>,
    previous_close: Option<Decimal>,
    chart_previous_close: Option<Decimal>,
    regular_market_volume: Option<i64>,
    regular_market_day_high: Option<Decimal>,
    regular_market_day_low: Option<Decimal>,
    market_cap: Option<Decimal>,
    sector: Option<String>,
}

#[derive(Debug, Deserialize, Getters)]
pub struct IndicatorsDto {
    quote: Option<Vec<QuoteIndicatorDto>>,
}

#[derive(Debug, Deserialize, Getters)]
pub struct QuoteIndicatorDto {
    open: Option<Vec<Option<Decimal>>>,
    high: Option<Vec<Option<Decimal>>>,
    low: Option<Vec<Option<Decimal>>>,
    close: Option<Vec<Option<Decimal>>>,
    volume: Option<Vec<Option<i64>>>,
}

#[derive(Debug, Deserialize, Getters)]
pub struct EventsDto {
    dividends: Option<HashMap<String, DividendEventDto>>,
}

#[derive(Debug, Deserialize, Getters)]
pub struct DividendEventDto {
    amount: Decimal,
    date: i64,
}

#[derive(Debug, Deserialize, Getters)]
pub struct QuoteResponseDto {
    #[serde(rename = "quoteResponse")]
    quote_response: QuoteListDto,
}

#[derive(Debug, Deserialize, Getters)]
pub struct QuoteListDto {
    result: Option<Vec<FundDetailDto>>,
}

#[derive(Debug, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct FundDetailDto {
    long_name: Option<String>,
    short_name: Option<String>,
    total_assets: Option<Decimal>,
    #[serde(rename = "yield")]
    expense_ratio: Option<Decimal>,
}
