//! Dashboard payloads: home page and events page
//!
//! Both views validate the request timestamp, load a fresh table from their
//! [`TransactionSource`] and never fail: any error is logged and replaced by
//! a zero-valued fallback payload.

use std::cmp::Ordering;
use std::path::PathBuf;

use chrono::{NaiveDateTime, Timelike};
use tracing::{debug, warn};

use crate::config::{Config, UserSettings};
use crate::error::{Error, Result};
use crate::import::load_transactions;
use crate::market::{MarketData, StubMarketData};
use crate::models::{EventsBucket, EventsPage, HomePage, Transaction, TransactionTable};

/// Layout of the timestamp accepted by the views
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Masked card numbers shown on the home page
pub const MASKED_CARDS: [&str; 2] = ["•••• 1234", "•••• 5678"];

/// Number of transactions in the home page top list
pub const TOP_TRANSACTIONS: usize = 5;

/// Greeting used when the home page falls back
pub const FALLBACK_GREETING: &str = "Добрый день";

/// Where a view gets its transactions from
pub trait TransactionSource {
    fn load(&self) -> Result<TransactionTable>;
}

/// Operations export on disk, re-read on every call
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TransactionSource for FileSource {
    fn load(&self) -> Result<TransactionTable> {
        Ok(load_transactions(&self.path))
    }
}

impl TransactionSource for TransactionTable {
    fn load(&self) -> Result<TransactionTable> {
        Ok(self.clone())
    }
}

/// Greeting for the time of day
///
/// Morning is [05:00, 12:00), day [12:00, 17:00), evening [17:00, 23:00),
/// night otherwise.
pub fn get_greeting<T: Timelike>(time: &T) -> &'static str {
    match time.hour() {
        5..=11 => "Доброе утро",
        12..=16 => "Добрый день",
        17..=22 => "Добрый вечер",
        _ => "Доброй ночи",
    }
}

/// Parse a view timestamp (`YYYY-MM-DD HH:MM:SS`)
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), TIMESTAMP_FORMAT)
        .map_err(|e| Error::InvalidTimestamp(format!("{}: {}", s, e)))
}

/// The `n` largest transactions by amount; equal amounts keep source order
///
/// Amounts are finite after loading, so `-0.0` and `0.0` compare equal.
pub fn top_transactions(table: &TransactionTable, n: usize) -> Vec<Transaction> {
    let mut rows = table.rows().to_vec();
    rows.sort_by(|a, b| b.amount.partial_cmp(&a.amount).unwrap_or(Ordering::Equal));
    rows.truncate(n);
    rows
}

impl HomePage {
    /// Payload returned when the home page cannot be built
    pub fn fallback() -> Self {
        Self {
            greeting: FALLBACK_GREETING.to_string(),
            cards: Vec::new(),
            currency_rates: Vec::new(),
            stock_prices: Vec::new(),
            top_transactions: Vec::new(),
        }
    }
}

/// Home and events views over one transaction source
pub struct Dashboard<S, M> {
    source: S,
    market: M,
    settings: UserSettings,
}

impl Dashboard<FileSource, StubMarketData> {
    /// Dashboard over the configured data file with stub market data
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(FileSource::new(&config.data_file), StubMarketData::new())
            .with_settings(config.load_user_settings()?))
    }
}

impl<S: TransactionSource, M: MarketData> Dashboard<S, M> {
    pub fn new(source: S, market: M) -> Self {
        Self {
            source,
            market,
            settings: UserSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: UserSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Home page for `timestamp`, or [`HomePage::fallback`] on any error
    pub fn home_page(&self, timestamp: &str) -> HomePage {
        self.try_home_page(timestamp).unwrap_or_else(|e| {
            warn!("Home page fell back: {}", e);
            HomePage::fallback()
        })
    }

    /// Home page for `timestamp`, reporting the first error
    pub fn try_home_page(&self, timestamp: &str) -> Result<HomePage> {
        let now = parse_timestamp(timestamp)?;
        let table = self.source.load()?;

        let page = HomePage {
            greeting: get_greeting(&now).to_string(),
            cards: MASKED_CARDS.iter().map(|c| c.to_string()).collect(),
            currency_rates: self.market.currency_rates(&self.settings.user_currencies)?,
            stock_prices: self.market.stock_prices(&self.settings.user_stocks)?,
            top_transactions: top_transactions(&table, TOP_TRANSACTIONS),
        };

        debug!(
            "Home page built from {} transactions",
            table.len()
        );
        Ok(page)
    }

    /// Events page for `timestamp`, or all zeros on any error
    pub fn events_page(&self, timestamp: &str) -> EventsPage {
        self.try_events_page(timestamp).unwrap_or_else(|e| {
            warn!("Events page fell back: {}", e);
            EventsPage::default()
        })
    }

    /// Expense and income totals, reporting the first error
    pub fn try_events_page(&self, timestamp: &str) -> Result<EventsPage> {
        parse_timestamp(timestamp)?;
        let table = self.source.load()?;

        let mut page = EventsPage::default();
        for tx in &table {
            let bucket: &mut EventsBucket = if tx.is_expense() {
                &mut page.expenses
            } else if tx.is_income() {
                &mut page.income
            } else {
                continue;
            };
            bucket.total_amount += tx.amount;
            bucket.count += 1;
        }
        Ok(page)
    }
}
