use chrono::Local;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Sparkline, Table, Tabs},
};
use rust_decimal::{Decimal, prelude::ToPrimitive};
use strum::IntoEnumIterator;

use crate::app::{
    app::{App, Tab},
    report,
    tax::compute_tax,
};

pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_tabs(frame, chunks[0], app);

    match app.tab {
        Tab::Watchlist => render_watchlist(frame, chunks[1], app),
        Tab::Portfolio => render_portfolio(frame, chunks[1], app),
        Tab::Allocation => render_allocation(frame, chunks[1], app),
        Tab::Tax => render_tax(frame, chunks[1], app),
        Tab::Dividends => render_dividends(frame, chunks[1], app),
        Tab::Alerts => render_alerts(frame, chunks[1], app),
        Tab::Funds => render_funds(frame, chunks[1], app),
        Tab::Ipos => render_ipos(frame, chunks[1], app),
    }

    let hints = Paragraph::new(
        "q quit │ Tab/←→ switch │ ↑↓ select │ Enter history (watchlist) │ F5 refresh │ c check alerts │ Esc close",
    )
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(hints, chunks[2]);

    if app.history_popup.is_some() {
        render_history_popup(frame, app);
    }
    if let Some(message) = app.popup_message.clone() {
        render_popup(frame, &message, Color::Cyan);
    }
    if let Some(message) = app.error_popup.clone() {
        render_popup(frame, &message, Color::Red);
    }
}

fn render_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<String> = Tab::iter().map(|tab| tab.to_string()).collect();
    let selected = Tab::iter().position(|tab| tab == app.tab).unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .block(
            Block::default()
                .title("Finance Dashboard")
                .borders(Borders::ALL),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, area);
}

fn render_watchlist(frame: &mut Frame, area: Rect, app: &mut App) {
    if app.quotes.is_empty() {
        render_empty(frame, area, "No quotes loaded yet. Press F5 to refresh.");
        return;
    }

    let header = header_row(&["Symbol", "Name", "Price", "Change", "Change %", "Volume"]);

    let rows: Vec<Row> = app
        .quotes
        .iter()
        .map(|entry| match entry.quote() {
            Some(quote) => {
                let change = quote.change();
                let color = change.map(gain_color).unwrap_or(Color::White);
                Row::new([
                    Cell::from(entry.symbol().clone()),
                    Cell::from(quote.name().clone()),
                    Cell::from(fmt_money(*quote.price())),
                    Cell::from(fmt_opt_signed(change)).style(Style::default().fg(color)),
                    Cell::from(fmt_opt_pct(quote.change_percent()))
                        .style(Style::default().fg(color)),
                    Cell::from(
                        (*quote.volume())
                            .map(|v| v.to_string())
                            .unwrap_or_else(|| "N/A".to_string()),
                    ),
                ])
            }
            // Failed symbols stay visible instead of silently dropping out.
            None => Row::new([
                Cell::from(entry.symbol().clone()),
                Cell::from("N/A"),
                Cell::from("Error").style(Style::default().fg(Color::Red)),
                Cell::from("N/A"),
                Cell::from("N/A"),
                Cell::from("N/A"),
            ]),
        })
        .collect();

    let widths = [
        Constraint::Length(16),
        Constraint::Length(34),
        Constraint::Length(12),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(14),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().title("Watchlist").borders(Borders::ALL))
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

fn render_portfolio(frame: &mut Frame, area: Rect, app: &mut App) {
    let positions = app.account.positions();
    if positions.is_empty() {
        render_empty(frame, area, "No open positions. Use the buy command to start.");
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    let header = header_row(&[
        "Symbol", "Name", "Qty", "Avg Price", "Price", "Value", "Cost", "P/L", "P/L %",
    ]);

    let rows: Vec<Row> = positions
        .iter()
        .map(|position| {
            let pl = position.unrealized_pl();
            let color = pl.map(gain_color).unwrap_or(Color::White);
            Row::new([
                Cell::from(position.symbol().clone()),
                Cell::from(position.name().clone()),
                Cell::from(position.quantity().to_string()),
                Cell::from(fmt_money(*position.avg_buy_price())),
                Cell::from(fmt_opt_money(*position.current_price())),
                Cell::from(fmt_money(position.valuation().round_dp(2))),
                Cell::from(fmt_money(position.cost_basis().round_dp(2))),
                Cell::from(fmt_opt_signed(pl)).style(Style::default().fg(color)),
                Cell::from(fmt_opt_pct(position.unrealized_pl_percent()))
                    .style(Style::default().fg(color)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(14),
        Constraint::Length(26),
        Constraint::Length(8),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(14),
        Constraint::Length(14),
        Constraint::Length(12),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().title("Positions").borders(Borders::ALL))
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let total_value: Decimal = positions.iter().map(|p| p.valuation()).sum();
    let total_cost: Decimal = positions.iter().map(|p| p.cost_basis()).sum();
    let score = report::diversification_score(positions);
    let risk = report::concentration_risk(positions);
    let summary = Paragraph::new(format!(
        "Value {}  Cost {}  P/L {}  │  Diversification {}  Concentration {}",
        fmt_money(total_value.round_dp(2)),
        fmt_money(total_cost.round_dp(2)),
        fmt_signed((total_value - total_cost).round_dp(2)),
        score,
        risk.to_str(),
    ))
    .block(Block::default().borders(Borders::ALL));

    frame.render_stateful_widget(table, chunks[0], &mut app.table_state);
    frame.render_widget(summary, chunks[1]);
}

fn render_allocation(frame: &mut Frame, area: Rect, app: &mut App) {
    let positions = app.account.positions();
    if positions.is_empty() {
        render_empty(frame, area, "No open positions to allocate.");
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    let allocations = report::sector_allocation(positions);
    let header = header_row(&["Sector", "Value", "Allocation %"]);
    let rows: Vec<Row> = allocations
        .iter()
        .map(|allocation| {
            Row::new([
                Cell::from(allocation.sector().clone()),
                Cell::from(fmt_money(*allocation.value())),
                Cell::from(format!("{:.2}%", allocation.percent())),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(30),
        Constraint::Length(16),
        Constraint::Length(14),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title("Sector Allocation")
                .borders(Borders::ALL),
        )
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let summary = Paragraph::new(format!(
        "Diversification score {}  │  Concentration risk {}",
        report::diversification_score(positions),
        report::concentration_risk(positions).to_str(),
    ))
    .block(Block::default().borders(Borders::ALL));

    frame.render_stateful_widget(table, chunks[0], &mut app.table_state);
    frame.render_widget(summary, chunks[1]);
}

fn render_tax(frame: &mut Frame, area: Rect, app: &mut App) {
    let lots = app.account.sold_lots();
    let summary = compute_tax(lots, &app.tax_config, Local::now().date_naive());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(5)])
        .split(area);

    let header = header_row(&[
        "Symbol", "Qty", "Buy", "Sell", "Sell Date", "Days", "Category", "P/L",
    ]);
    let rows: Vec<Row> = lots
        .iter()
        .map(|lot| {
            let color = gain_color(*lot.profit_loss());
            Row::new([
                Cell::from(lot.symbol().clone()),
                Cell::from(lot.quantity().to_string()),
                Cell::from(fmt_money(*lot.buy_price())),
                Cell::from(fmt_money(*lot.sell_price())),
                Cell::from(lot.sell_date().to_string()),
                Cell::from(lot.holding_days().to_string()),
                Cell::from(lot.tax_category().to_str()),
                Cell::from(fmt_signed(*lot.profit_loss())).style(Style::default().fg(color)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(14),
        Constraint::Length(8),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(8),
        Constraint::Length(12),
        Constraint::Length(12),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().title("Sold Lots").borders(Borders::ALL))
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let text = format!(
        "FY {}\nShort-term gain {}  tax {}\nLong-term gain {}  taxable {}  tax {}  │  Total tax {}",
        summary.financial_year(),
        fmt_signed(*summary.short_term_gain()),
        fmt_money(*summary.short_term_tax()),
        fmt_signed(*summary.long_term_gain()),
        fmt_money(*summary.long_term_taxable_gain()),
        fmt_money(*summary.long_term_tax()),
        fmt_money(*summary.total_tax()),
    );
    let summary_widget =
        Paragraph::new(text).block(Block::default().title("Tax Summary").borders(Borders::ALL));

    frame.render_stateful_widget(table, chunks[0], &mut app.table_state);
    frame.render_widget(summary_widget, chunks[1]);
}

fn render_dividends(frame: &mut Frame, area: Rect, app: &mut App) {
    let yields = report::dividend_yields(app.account.positions(), app.account.dividend_cache());
    if yields.is_empty() {
        render_empty(frame, area, "No open positions to report dividends for.");
        return;
    }

    let header = header_row(&["Symbol", "Name", "Dividends (TTM)", "Price", "Yield %"]);
    let rows: Vec<Row> = yields
        .iter()
        .map(|row| {
            Row::new([
                Cell::from(row.symbol().clone()),
                Cell::from(row.name().clone()),
                Cell::from(fmt_money(*row.ttm_dividend())),
                Cell::from(fmt_opt_money(*row.current_price())),
                Cell::from(fmt_opt_pct(*row.yield_percent()))
                    .style(Style::default().fg(Color::Green)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(14),
        Constraint::Length(30),
        Constraint::Length(16),
        Constraint::Length(12),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title("Dividend Yield")
                .borders(Borders::ALL),
        )
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

fn render_alerts(frame: &mut Frame, area: Rect, app: &mut App) {
    let alerts = app.account.alerts();
    if alerts.is_empty() {
        render_empty(frame, area, "No alerts set. Use the alert command to add one.");
        return;
    }

    let header = header_row(&["ID", "Symbol", "Target", "Direction", "Status", "Created"]);
    let rows: Vec<Row> = alerts
        .iter()
        .map(|alert| {
            let (status, color) = if *alert.triggered() {
                ("Triggered", Color::Green)
            } else {
                ("Pending", Color::Yellow)
            };
            Row::new([
                Cell::from(alert.id().chars().take(8).collect::<String>()),
                Cell::from(alert.symbol().clone()),
                Cell::from(fmt_money(*alert.target_price())),
                Cell::from(alert.direction().to_str()),
                Cell::from(status).style(Style::default().fg(color)),
                Cell::from(alert.created_at().format("%Y-%m-%d %H:%M").to_string()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(10),
        Constraint::Length(14),
        Constraint::Length(12),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(18),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().title("Alerts").borders(Borders::ALL))
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

fn render_funds(frame: &mut Frame, area: Rect, app: &mut App) {
    if app.funds.is_empty() {
        render_empty(frame, area, "No fund data loaded yet. Press F5 to refresh.");
        return;
    }

    let header = header_row(&["Name", "NAV", "Change %", "Category", "Risk", "Expense", "AUM"]);
    let rows: Vec<Row> = app
        .funds
        .iter()
        .map(|fund| {
            let color = fund.change().map(gain_color).unwrap_or(Color::White);
            Row::new([
                Cell::from(fund.name().clone()),
                Cell::from(fmt_money(*fund.nav())),
                Cell::from(fmt_opt_pct(fund.change_percent()))
                    .style(Style::default().fg(color)),
                Cell::from(fund.category().to_str()),
                Cell::from(fund.risk_level().to_str()),
                Cell::from(
                    (*fund.expense_ratio())
                        .map(|ratio| format!("{:.2}%", ratio))
                        .unwrap_or_else(|| "N/A".to_string()),
                ),
                Cell::from(fmt_opt_aum(*fund.aum())),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(42),
        Constraint::Length(12),
        Constraint::Length(10),
        Constraint::Length(12),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(14),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().title("Mutual Funds").borders(Borders::ALL))
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

fn render_ipos(frame: &mut Frame, area: Rect, app: &mut App) {
    if app.ipos.is_empty() {
        render_empty(frame, area, "No upcoming listings.");
        return;
    }

    let header = header_row(&[
        "Symbol", "Company", "Exchange", "Price Band", "Date", "Issue Size", "Lot", "Sector",
        "Status",
    ]);
    let rows: Vec<Row> = app
        .ipos
        .iter()
        .map(|ipo| {
            Row::new([
                Cell::from(ipo.symbol().clone()),
                Cell::from(ipo.company_name().clone()),
                Cell::from(ipo.exchange().clone()),
                Cell::from(format!(
                    "₹{}-₹{}",
                    ipo.price_band_low(),
                    ipo.price_band_high()
                )),
                Cell::from(ipo.expected_date().to_string()),
                Cell::from(ipo.issue_size().clone()),
                Cell::from(ipo.lot_size().to_string()),
                Cell::from(ipo.sector().clone()),
                Cell::from(ipo.status().to_str()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(10),
        Constraint::Length(34),
        Constraint::Length(8),
        Constraint::Length(14),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(6),
        Constraint::Length(20),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title("Upcoming IPOs")
                .borders(Borders::ALL),
        )
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

fn render_history_popup(frame: &mut Frame, app: &App) {
    let popup = match &app.history_popup {
        Some(popup) => popup,
        None => return,
    };

    let area = centered_rect(70, 60, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!("{}: 1 month", popup.symbol))
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if popup.rows.is_empty() {
        let empty = Paragraph::new("No history available.")
            .style(Style::default().fg(Color::Yellow));
        frame.render_widget(empty, inner);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    let closes: Vec<Decimal> = popup.rows.iter().map(|row| *row.close()).collect();
    let low = closes.iter().copied().min().unwrap_or(Decimal::ZERO);
    let high = closes.iter().copied().max().unwrap_or(Decimal::ZERO);
    let last = closes.last().copied().unwrap_or(Decimal::ZERO);

    let span = high - low;
    let data: Vec<u64> = closes
        .iter()
        .map(|close| {
            if span.is_zero() {
                50
            } else {
                ((*close - low) / span * Decimal::from(100))
                    .to_u64()
                    .unwrap_or(0)
            }
        })
        .collect();

    let sparkline = Sparkline::default()
        .data(&data)
        .style(Style::default().fg(Color::Cyan));
    frame.render_widget(sparkline, chunks[0]);

    let stats = Paragraph::new(format!(
        "Low {}  High {}  Last {}",
        fmt_money(low),
        fmt_money(high),
        fmt_money(last)
    ));
    frame.render_widget(stats, chunks[1]);
}

fn render_popup(frame: &mut Frame, message: &str, color: Color) {
    let area = centered_rect(50, 20, frame.area());
    frame.render_widget(Clear, area);
    let popup = Paragraph::new(message.to_string())
        .style(Style::default().fg(color))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(popup, area);
}

fn render_empty(frame: &mut Frame, area: Rect, message: &str) {
    let empty = Paragraph::new(message.to_string())
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(empty, area);
}

fn header_row(titles: &[&'static str]) -> Row<'static> {
    let cells = titles
        .iter()
        .map(|title| Cell::from(*title).style(Style::default().fg(Color::Yellow)));
    Row::new(cells).height(1)
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

fn gain_color(value: Decimal) -> Color {
    if value >= Decimal::ZERO {
        Color::Green
    } else {
        Color::Red
    }
}

fn fmt_money(value: Decimal) -> String {
    format!("₹{:.2}", value)
}

fn fmt_opt_money(value: Option<Decimal>) -> String {
    value.map(fmt_money).unwrap_or_else(|| "N/A".to_string())
}

fn fmt_signed(value: Decimal) -> String {
    if value >= Decimal::ZERO {
        format!("+{:.2}", value)
    } else {
        format!("{:.2}", value)
    }
}

fn fmt_opt_signed(value: Option<Decimal>) -> String {
    value.map(fmt_signed).unwrap_or_else(|| "N/A".to_string())
}

fn fmt_opt_pct(value: Option<Decimal>) -> String {
    value
        .map(|v| format!("{:.2}%", v))
        .unwrap_or_else(|| "N/A".to_string())
}

fn fmt_opt_aum(value: Option<Decimal>) -> String {
    value
        .map(|aum| format!("₹{:.2} Cr", aum / Decimal::from(10_000_000)))
        .unwrap_or_else(|| "N/A".to_string())
}
