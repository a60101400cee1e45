//! spendlens Core Library
//!
//! Analytics over a personal bank operations export:
//! - Loader for XLSX/XLS/ODS and CSV exports
//! - Date-range filtering (day, week, month, year)
//! - Spending reports by category, weekday and workday
//! - Cashback leaders, investment rounding and description search
//! - Home and events dashboard payloads
//! - Market data providers and the report log

pub mod config;
pub mod date_filter;
pub mod error;
pub mod import;
pub mod market;
pub mod models;
pub mod report_log;
pub mod reports;
pub mod services;
pub mod views;

#[cfg(test)]
mod test_utils;

pub use config::{Config, UserSettings};
pub use date_filter::{filter_transactions_by_date, filter_transactions_by_date_str, DateRange};
pub use error::{Error, Result};
pub use import::{load_transactions, try_load_transactions};
pub use market::{MarketData, StubMarketData};
pub use models::{
    CashbackLeaders, CurrencyRate, EventsBucket, EventsPage, HomePage, StockPrice, Transaction,
    TransactionTable, WorkdaySpending,
};
pub use report_log::{ReportLog, ReportRecord};
pub use reports::{spending_by_category, spending_by_weekday, spending_by_workday};
pub use services::{
    investment_bank, person_transfers_search, phone_number_search, profitable_cashback_categories,
    simple_search,
};
pub use views::{get_greeting, Dashboard, FileSource, TransactionSource};
