//! Domain models for spendlens

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Column headers of the bank operations export
pub mod columns {
    pub const OPERATION_DATE: &str = "Дата операции";
    pub const AMOUNT: &str = "Сумма операции";
    pub const CATEGORY: &str = "Категория";
    pub const DESCRIPTION: &str = "Описание";
    pub const CASHBACK: &str = "Бонусы (включая кэшбэк)";
}

/// Date layout used by the operations export
pub const OPERATION_DATE_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// A single bank operation
///
/// Serializes as a literal record keyed by the export's column headers so
/// dashboard output matches the source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "Дата операции", with = "operation_date")]
    pub operation_date: NaiveDateTime,
    /// Negative = expense, positive = income
    #[serde(rename = "Сумма операции")]
    pub amount: f64,
    #[serde(rename = "Категория")]
    pub category: String,
    #[serde(rename = "Описание")]
    pub description: String,
    #[serde(rename = "Бонусы (включая кэшбэк)")]
    pub cashback: f64,
}

impl Transaction {
    pub fn new(operation_date: NaiveDateTime, amount: f64) -> Self {
        Self {
            operation_date,
            amount,
            category: String::new(),
            description: String::new(),
            cashback: 0.0,
        }
    }

    /// Builder pattern: set category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Builder pattern: set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder pattern: set cashback
    pub fn with_cashback(mut self, cashback: f64) -> Self {
        self.cashback = cashback;
        self
    }

    /// Calendar date of the operation (time-of-day dropped)
    pub fn date(&self) -> NaiveDate {
        self.operation_date.date()
    }

    /// Weekday index, 0 = Monday .. 6 = Sunday
    pub fn weekday_index(&self) -> u32 {
        self.operation_date.weekday().num_days_from_monday()
    }

    pub fn is_expense(&self) -> bool {
        self.amount < 0.0
    }

    pub fn is_income(&self) -> bool {
        self.amount > 0.0
    }
}

mod operation_date {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::OPERATION_DATE_FORMAT;

    pub fn serialize<S: Serializer>(
        date: &NaiveDateTime,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(OPERATION_DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<NaiveDateTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, OPERATION_DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Normalized transactions in source order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TransactionTable {
    rows: Vec<Transaction>,
}

impl TransactionTable {
    pub fn new(rows: Vec<Transaction>) -> Self {
        Self { rows }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[Transaction] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of all amounts
    pub fn total_amount(&self) -> f64 {
        self.rows.iter().map(|t| t.amount).sum()
    }

    /// New table with the rows matching `predicate`, order preserved
    pub fn filtered<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&Transaction) -> bool,
    {
        Self {
            rows: self.rows.iter().filter(|t| predicate(t)).cloned().collect(),
        }
    }

    pub fn into_rows(self) -> Vec<Transaction> {
        self.rows
    }
}

impl From<Vec<Transaction>> for TransactionTable {
    fn from(rows: Vec<Transaction>) -> Self {
        Self::new(rows)
    }
}

impl FromIterator<Transaction> for TransactionTable {
    fn from_iter<I: IntoIterator<Item = Transaction>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a TransactionTable {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

// ========== Report Models ==========

/// Spending per calendar date
pub type DailySpending = BTreeMap<NaiveDate, f64>;

/// Spending per weekday index (0 = Monday)
pub type WeekdaySpending = BTreeMap<u32, f64>;

/// Workday vs weekend spending split
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct WorkdaySpending {
    pub weekdays: f64,
    pub weekends: f64,
}

/// Categories with the largest cashback, highest first
///
/// Serializes as a JSON object whose key order follows the ranking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CashbackLeaders(pub Vec<(String, f64)>);

impl CashbackLeaders {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, category: &str) -> Option<f64> {
        self.0
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, value)| *value)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }
}

impl Serialize for CashbackLeaders {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (category, cashback) in &self.0 {
            map.serialize_entry(category, cashback)?;
        }
        map.end()
    }
}

// ========== Dashboard Models ==========

/// Exchange rate for one currency
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrencyRate {
    pub currency: String,
    pub rate: f64,
}

/// Quote for one stock ticker
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockPrice {
    pub stock: String,
    pub price: f64,
}

/// Home page payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomePage {
    pub greeting: String,
    pub cards: Vec<String>,
    pub currency_rates: Vec<CurrencyRate>,
    pub stock_prices: Vec<StockPrice>,
    pub top_transactions: Vec<Transaction>,
}

/// Total and count for one side of the events page
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct EventsBucket {
    pub total_amount: f64,
    pub count: usize,
}

/// Events page payload
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct EventsPage {
    pub expenses: EventsBucket,
    pub income: EventsBucket,
}
