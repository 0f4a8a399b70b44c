use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Client;
use rust_decimal::Decimal;
use tracing::warn;

use crate::{
    api::{
        utils::get_json,
        yahoo_dto::{ChartMetaDto, ChartResponseDto, ChartResultDto, QuoteResponseDto},
    },
    error::DashboardError,
    models::{BatchQuote, DividendRow, FundCategory, FundQuote, HistoryRow, Quote},
};

const BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Pause between sequential calls of a batch; the provider throttles
/// bursts from a single address.
const BATCH_DELAY_MS: u64 = 250;

pub async fn fetch_quote(symbol: &str, client: &Client) -> Result<Quote, DashboardError> {
    let url = format!("{}/v8/finance/chart/{}?interval=1d", BASE_URL, symbol);
    let res: ChartResponseDto = get_json(client, &url).await?;
    let result = first_chart_result(&res, symbol)?;
    quote_from_meta(symbol, result.meta())
}

/// Best-effort quotes for a list of symbols. A symbol that fails keeps its
/// slot with an empty quote; results are ordered by market cap descending,
/// unknown caps sorting as zero.
pub async fn fetch_batch_quotes(symbols: &[String], client: &Client) -> Vec<BatchQuote> {
    let mut entries = Vec::with_capacity(symbols.len());

    for (i, symbol) in symbols.iter().enumerate() {
        if i > 0 {
            tokio::time::sleep(Duration::from_millis(BATCH_DELAY_MS)).await;
        }
        match fetch_quote(symbol, client).await {
            Ok(quote) => entries.push(BatchQuote::new(symbol.clone(), Some(quote))),
            Err(err) => {
                warn!(symbol = %symbol, error = %err, "quote fetch failed");
                entries.push(BatchQuote::new(symbol.clone(), None));
            }
        }
    }

    entries.sort_by(|a, b| market_cap_of(b).cmp(&market_cap_of(a)));
    entries
}

pub async fn fetch_history(
    symbol: &str,
    period: HistoryPeriod,
    client: &Client,
) -> Result<Vec<HistoryRow>, DashboardError> {
    let now = Utc::now().timestamp();
    let start = (now - period.seconds()).max(0);
    let url = format!(
        "{}/v8/finance/chart/{}?interval=1d&period1={}&period2={}",
        BASE_URL, symbol, start, now
    );
    let res: ChartResponseDto = get_json(client, &url).await?;
    let result = first_chart_result(&res, symbol)?;
    Ok(history_rows(result))
}

pub async fn fetch_dividends(
    symbol: &str,
    client: &Client,
) -> Result<Vec<DividendRow>, DashboardError> {
    let now = Utc::now().timestamp();
    let start = now - HistoryPeriod::OneYear.seconds();
    let url = format!(
        "{}/v8/finance/chart/{}?interval=1d&period1={}&period2={}&events=div",
        BASE_URL, symbol, start, now
    );
    let res: ChartResponseDto = get_json(client, &url).await?;
    let result = first_chart_result(&res, symbol)?;

    let mut rows: Vec<DividendRow> = result
        .events()
        .as_ref()
        .and_then(|events| events.dividends().as_ref())
        .map(|dividends| {
            dividends
                .values()
                .filter_map(|div| {
                    DateTime::from_timestamp(*div.date(), 0)
                        .map(|dt| DividendRow::new(dt.date_naive(), *div.amount()))
                })
                .collect()
        })
        .unwrap_or_default();
    rows.sort_by_key(|row| *row.date());

    Ok(rows)
}

pub async fn fetch_fund_quote(
    fund_symbol: &str,
    client: &Client,
) -> Result<FundQuote, DashboardError> {
    let url = format!("{}/v8/finance/chart/{}?interval=1d", BASE_URL, fund_symbol);
    let res: ChartResponseDto = get_json(client, &url).await?;
    let result = first_chart_result(&res, fund_symbol)?;
    let meta = result.meta();

    let nav = (*meta.regular_market_price())
        .ok_or_else(|| DashboardError::SymbolNotFound(fund_symbol.to_string()))?;
    let previous_nav = (*meta.previous_close()).or(*meta.chart_previous_close());

    // Name, AUM and expense ratio come from the quote endpoint, best-effort.
    let detail_url = format!("{}/v7/finance/quote?symbols={}", BASE_URL, fund_symbol);
    let detail = match get_json::<QuoteResponseDto>(client, &detail_url).await {
        Ok(res) => res
            .quote_response()
            .result()
            .as_ref()
            .and_then(|list| list.first())
            .map(|d| {
                (
                    d.long_name().clone().or_else(|| d.short_name().clone()),
                    *d.total_assets(),
                    *d.expense_ratio(),
                )
            }),
        Err(err) => {
            warn!(symbol = %fund_symbol, error = %err, "fund detail fetch failed");
            None
        }
    };

    let (detail_name, aum, expense_ratio) = detail.unwrap_or((None, None, None));
    let name = detail_name.unwrap_or_else(|| fund_display_name(meta, fund_symbol));
    let category = FundCategory::classify(&name);

    Ok(FundQuote::new(
        fund_symbol.to_string(),
        name,
        nav,
        previous_nav,
        category,
        aum,
        expense_ratio,
    ))
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HistoryPeriod {
    FiveDays,
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
    TwoYears,
    FiveYears,
    Max,
}

impl HistoryPeriod {
    pub fn seconds(&self) -> i64 {
        match self {
            HistoryPeriod::FiveDays => 432_000,
            HistoryPeriod::OneMonth => 2_592_000,
            HistoryPeriod::ThreeMonths => 7_776_000,
            HistoryPeriod::SixMonths => 15_552_000,
            HistoryPeriod::OneYear => 31_536_000,
            HistoryPeriod::TwoYears => 63_072_000,
            HistoryPeriod::FiveYears => 157_680_000,
            HistoryPeriod::Max => 9_999_999_999,
        }
    }
}

fn first_chart_result<'a>(
    res: &'a ChartResponseDto,
    symbol: &str,
) -> Result<&'a ChartResultDto, DashboardError> {
    if res.chart().error().is_some() {
        return Err(DashboardError::SymbolNotFound(symbol.to_string()));
    }
    res.chart()
        .result()
        .as_ref()
        .and_then(|results| results.first())
        .ok_or_else(|| DashboardError::SymbolNotFound(symbol.to_string()))
}

pub(crate) fn quote_from_meta(symbol: &str, meta: &ChartMetaDto) -> Result<Quote, DashboardError> {
    let price = (*meta.regular_market_price())
        .ok_or_else(|| DashboardError::SymbolNotFound(symbol.to_string()))?;
    let previous_close = (*meta.previous_close()).or(*meta.chart_previous_close());
    let resolved_symbol = meta.symbol().clone().unwrap_or_else(|| symbol.to_string());
    let name = meta
        .long_name()
        .clone()
        .unwrap_or_else(|| display_name(&resolved_symbol));

    Ok(Quote::new(
        resolved_symbol,
        name,
        price,
        previous_close,
        *meta.regular_market_volume(),
        *meta.market_cap(),
        meta.sector().clone(),
        *meta.regular_market_day_high(),
        *meta.regular_market_day_low(),
    ))
}

pub(crate) fn history_rows(result: &ChartResultDto) -> Vec<HistoryRow> {
    let timestamps = match result.timestamp() {
        Some(timestamps) => timestamps,
        None => return Vec::new(),
    };
    let quote = match result
        .indicators()
        .as_ref()
        .and_then(|ind| ind.quote().as_ref())
        .and_then(|quotes| quotes.first())
    {
        Some(quote) => quote,
        None => return Vec::new(),
    };

    let mut rows = Vec::with_capacity(timestamps.len());
    for (i, ts) in timestamps.iter().enumerate() {
        // Rows without a close are provider gaps and get dropped.
        let close = match series_at(quote.close(), i) {
            Some(close) => close,
            None => continue,
        };
        let date = match DateTime::from_timestamp(*ts, 0) {
            Some(dt) => dt.date_naive(),
            None => continue,
        };
        rows.push(HistoryRow::new(
            date,
            series_at(quote.open(), i).unwrap_or(close),
            series_at(quote.high(), i).unwrap_or(close),
            series_at(quote.low(), i).unwrap_or(close),
            close,
            volume_at(quote.volume(), i).unwrap_or(0),
        ));
    }
    rows
}

/// Exchange suffixes are for routing, not display.
pub fn display_name(symbol: &str) -> String {
    symbol
        .strip_suffix(".NS")
        .or_else(|| symbol.strip_suffix(".BO"))
        .unwrap_or(symbol)
        .to_string()
}

fn fund_display_name(meta: &ChartMetaDto, fallback: &str) -> String {
    let raw = meta.symbol().clone().unwrap_or_else(|| fallback.to_string());
    raw.strip_suffix(".MF").unwrap_or(&raw).replace('-', " ")
}

fn market_cap_of(entry: &BatchQuote) -> Decimal {
    entry
        .quote()
        .as_ref()
        .and_then(|quote| *quote.market_cap())
        .unwrap_or(Decimal::ZERO)
}

fn series_at(series: &Option<Vec<Option<Decimal>>>, idx: usize) -> Option<Decimal> {
    series.as_ref().and_then(|values| values.get(idx).copied().flatten())
}

fn volume_at(series: &Option<Vec<Option<i64>>>, idx: usize) -> Option<i64> {
    series.as_ref().and_then(|values| values.get(idx).copied().flatten())
}
