use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
    widgets::TableState,
};
use sqlx::{Pool, Sqlite};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};
use tracing::warn;

use crate::{
    api::{self, HistoryPeriod, yahoo},
    app::{Account, account::DEFAULT_FUNDS, report, tax::TaxConfig, ui},
    db,
    models::{BatchQuote, FundQuote, HistoryRow, IpoListing},
};

const FUND_FETCH_DELAY_MS: u64 = 250;

#[derive(Clone, Copy, Debug, Display, EnumIter, Eq, PartialEq)]
pub enum Tab {
    Watchlist,
    Portfolio,
    Allocation,
    Tax,
    Dividends,
    Alerts,
    Funds,
    #[strum(serialize = "IPOs")]
    Ipos,
}

impl Tab {
    fn next(self) -> Tab {
        let tabs: Vec<Tab> = Tab::iter().collect();
        let idx = tabs.iter().position(|t| *t == self).unwrap_or(0);
        tabs[(idx + 1) % tabs.len()]
    }

    fn previous(self) -> Tab {
        let tabs: Vec<Tab> = Tab::iter().collect();
        let idx = tabs.iter().position(|t| *t == self).unwrap_or(0);
        tabs[(idx + tabs.len() - 1) % tabs.len()]
    }
}

pub struct HistoryPopup {
    pub symbol: String,
    pub rows: Vec<HistoryRow>,
}

pub struct App {
    pub(crate) account: Account,
    pool: Pool<Sqlite>,
    pub(crate) tab: Tab,
    pub(crate) table_state: TableState,
    pub(crate) quotes: Vec<BatchQuote>,
    pub(crate) funds: Vec<FundQuote>,
    pub(crate) ipos: Vec<IpoListing>,
    pub(crate) tax_config: TaxConfig,
    pub(crate) history_popup: Option<HistoryPopup>,
    pub(crate) popup_message: Option<String>,
    pub(crate) error_popup: Option<String>,
}

impl App {
    pub fn new(account: Account, pool: Pool<Sqlite>) -> Self {
        Self {
            account,
            pool,
            tab: Tab::Watchlist,
            table_state: TableState::default(),
            quotes: Vec::new(),
            funds: Vec::new(),
            ipos: api::upcoming_ipos(),
            tax_config: TaxConfig::from_env(),
            history_popup: None,
            popup_message: None,
            error_popup: None,
        }
    }

    fn show_popup(&mut self, message: &str) {
        self.popup_message = Some(message.to_string());
    }

    fn clear_popup(&mut self) {
        self.popup_message = None;
    }

    fn show_error_popup(&mut self, message: &str) {
        self.error_popup = Some(message.to_string());
    }

    fn clear_error_popup(&mut self) {
        self.error_popup = None;
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.run_app(&mut terminal).await;

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    async fn run_app<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        self.show_popup("Loading market data...");
        terminal.draw(|frame| ui::render(frame, self))?;
        self.refresh().await;
        self.clear_popup();

        loop {
            terminal.draw(|frame| ui::render(frame, self))?;

            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Esc => {
                        self.history_popup = None;
                        self.clear_popup();
                        self.clear_error_popup();
                        self.table_state.select(None);
                    }
                    KeyCode::Enter => {
                        if self.error_popup.is_some() {
                            self.clear_error_popup();
                            continue;
                        }
                        if self.popup_message.is_some() {
                            self.clear_popup();
                            continue;
                        }
                        if self.history_popup.is_some() {
                            self.history_popup = None;
                            continue;
                        }
                        if self.tab == Tab::Watchlist {
                            self.open_history_popup().await;
                        }
                    }
                    KeyCode::Tab | KeyCode::Right => {
                        self.tab = self.tab.next();
                        self.table_state.select(None);
                    }
                    KeyCode::BackTab | KeyCode::Left => {
                        self.tab = self.tab.previous();
                        self.table_state.select(None);
                    }
                    KeyCode::Down => self.select_next(),
                    KeyCode::Up => self.select_previous(),
                    KeyCode::F(5) => {
                        self.show_popup("Refreshing market data...");
                        terminal.draw(|frame| ui::render(frame, self))?;
                        self.refresh().await;
                        self.clear_popup();
                    }
                    KeyCode::Char('c') => {
                        self.show_popup("Checking alerts...");
                        terminal.draw(|frame| ui::render(frame, self))?;
                        self.clear_popup();
                        self.check_alerts().await;
                    }
                    _ => {}
                }
            }
        }
    }

    async fn refresh(&mut self) {
        let quotes =
            yahoo::fetch_batch_quotes(self.account.watchlist(), self.account.client()).await;
        self.quotes = quotes;

        self.account.refresh_prices().await;
        self.account.refresh_dividends().await;

        let mut funds = Vec::with_capacity(DEFAULT_FUNDS.len());
        for (i, symbol) in DEFAULT_FUNDS.iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(Duration::from_millis(FUND_FETCH_DELAY_MS)).await;
            }
            match yahoo::fetch_fund_quote(symbol, self.account.client()).await {
                Ok(fund) => funds.push(fund),
                Err(err) => warn!(symbol = %symbol, error = %err, "fund fetch failed"),
            }
        }
        self.funds = funds;
        self.ipos = api::upcoming_ipos();
    }

    async fn check_alerts(&mut self) {
        let checked = self.account.check_alerts().await;
        match checked {
            Ok(fired) => {
                let saved = db::write::save_account(&self.pool, &self.account).await;
                if let Err(err) = saved {
                    self.show_error_popup(&format!("Error saving account: {:?}", err));
                } else {
                    self.show_popup(&format!("{} alert(s) triggered", fired.len()));
                }
            }
            Err(err) => self.show_error_popup(&format!("Error checking alerts: {}", err)),
        }
    }

    async fn open_history_popup(&mut self) {
        let symbol = match self
            .table_state
            .selected()
            .and_then(|idx| self.quotes.get(idx))
        {
            Some(entry) => entry.symbol().clone(),
            None => return,
        };

        let fetched =
            yahoo::fetch_history(&symbol, HistoryPeriod::OneMonth, self.account.client()).await;
        match fetched {
            Ok(rows) => self.history_popup = Some(HistoryPopup { symbol, rows }),
            Err(err) => self.show_error_popup(&format!("Error fetching history: {}", err)),
        }
    }

    fn select_next(&mut self) {
        let rows = self.row_count();
        if rows == 0 {
            return;
        }
        let idx = match self.table_state.selected() {
            Some(idx) => {
                if idx >= rows - 1 {
                    0
                } else {
                    idx + 1
                }
            }
            None => 0,
        };
        self.table_state.select(Some(idx));
    }

    fn select_previous(&mut self) {
        let rows = self.row_count();
        if rows == 0 {
            return;
        }
        let idx = match self.table_state.selected() {
            Some(idx) => {
                if idx == 0 {
                    rows - 1
                } else {
                    idx - 1
                }
            }
            None => 0,
        };
        self.table_state.select(Some(idx));
    }

    fn row_count(&self) -> usize {
        match self.tab {
            Tab::Watchlist => self.quotes.len(),
            Tab::Portfolio => self.account.positions().len(),
            Tab::Allocation => report::sector_allocation(self.account.positions()).len(),
            Tab::Tax => self.account.sold_lots().len(),
            Tab::Dividends => self.account.positions().len(),
            Tab::Alerts => self.account.alerts().len(),
            Tab::Funds => self.funds.len(),
            Tab::Ipos => self.ipos.len(),
        }
    }
}
