//! Cashback, investment and search services over a transaction table

use std::collections::BTreeMap;
use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use tracing::debug;

use crate::models::{CashbackLeaders, Transaction, TransactionTable};

/// Number of categories kept by [`profitable_cashback_categories`]
pub const CASHBACK_LEADERS: usize = 3;

/// Keywords of an institutional transfer (bank, organization)
const INSTITUTION_MARKERS: [&str; 2] = ["банк", "организация"];

/// Keyword of a transfer
const TRANSFER_MARKER: &str = "перевод";

fn phone_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?:\+7|8)?[\s-]?\(?\d{3}\)?[\s-]?\d{3}[\s-]?\d{2}[\s-]?\d{2}")
            .expect("invalid phone regex")
    })
}

/// Categories with the largest summed cashback in a given month
///
/// Returns at most [`CASHBACK_LEADERS`] entries, highest first. Equal totals
/// keep alphabetical category order.
pub fn profitable_cashback_categories(
    table: &TransactionTable,
    year: i32,
    month: u32,
) -> CashbackLeaders {
    let mut by_category: BTreeMap<&str, f64> = BTreeMap::new();
    for tx in table
        .iter()
        .filter(|t| t.operation_date.year() == year && t.operation_date.month() == month)
    {
        *by_category.entry(tx.category.as_str()).or_default() += tx.cashback;
    }

    let mut ranked: Vec<(String, f64)> = by_category
        .into_iter()
        .map(|(category, cashback)| (category.to_string(), cashback))
        .collect();
    // Stable sort keeps alphabetical order between equal totals
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(CASHBACK_LEADERS);

    debug!("Cashback leaders for {}-{:02}: {:?}", year, month, ranked);
    CashbackLeaders(ranked)
}

/// Amount set aside by rounding: `|sum of expenses in month| * percent / 100`
///
/// `month` is `YYYY-MM`; a malformed month matches nothing and yields 0.
pub fn investment_bank(month: &str, table: &TransactionTable, percent: f64) -> f64 {
    let Some((year, month_num)) = parse_month(month) else {
        debug!("Unparseable month {:?}, nothing to invest", month);
        return 0.0;
    };

    let expenses: f64 = table
        .iter()
        .filter(|t| {
            t.operation_date.year() == year && t.operation_date.month() == month_num
        })
        .filter(|t| t.is_expense())
        .map(|t| t.amount)
        .sum();

    (expenses * percent / 100.0).abs()
}

fn parse_month(month: &str) -> Option<(i32, u32)> {
    let date = NaiveDate::parse_from_str(&format!("{}-01", month.trim()), "%Y-%m-%d").ok()?;
    Some((date.year(), date.month()))
}

/// Transactions whose description contains `query`, ignoring case
pub fn simple_search(table: &TransactionTable, query: &str) -> Vec<Transaction> {
    let query = query.to_lowercase();
    table
        .iter()
        .filter(|t| t.description.to_lowercase().contains(&query))
        .cloned()
        .collect()
}

/// Transactions whose description contains a Russian phone number
pub fn phone_number_search(table: &TransactionTable) -> Vec<Transaction> {
    let re = phone_regex();
    table
        .iter()
        .filter(|t| re.is_match(&t.description))
        .cloned()
        .collect()
}

/// Transfers to private persons (not to banks or organizations)
pub fn person_transfers_search(table: &TransactionTable) -> Vec<Transaction> {
    table
        .iter()
        .filter(|t| is_person_transfer(&t.description))
        .cloned()
        .collect()
}

fn is_person_transfer(description: &str) -> bool {
    let description = description.to_lowercase();
    description.contains(TRANSFER_MARKER)
        && !INSTITUTION_MARKERS
            .iter()
            .any(|marker| description.contains(marker))
}
