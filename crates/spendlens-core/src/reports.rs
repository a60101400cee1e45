//! Spending reports grouped by date, weekday and workday

use tracing::debug;

use crate::models::{DailySpending, TransactionTable, WeekdaySpending, WorkdaySpending};

/// Sum of amounts per calendar date for one category (exact, case-sensitive)
pub fn spending_by_category(table: &TransactionTable, category: &str) -> DailySpending {
    let mut by_date = DailySpending::new();
    for tx in table.iter().filter(|t| t.category == category) {
        *by_date.entry(tx.date()).or_default() += tx.amount;
    }

    debug!(
        "Category {:?}: {} dates with spending",
        category,
        by_date.len()
    );
    by_date
}

/// Sum of amounts per weekday, 0 = Monday .. 6 = Sunday
///
/// Only weekdays that have transactions appear in the result.
pub fn spending_by_weekday(table: &TransactionTable) -> WeekdaySpending {
    let mut by_weekday = WeekdaySpending::new();
    for tx in table {
        *by_weekday.entry(tx.weekday_index()).or_default() += tx.amount;
    }
    by_weekday
}

/// Sum of amounts on Monday–Friday versus Saturday–Sunday
pub fn spending_by_workday(table: &TransactionTable) -> WorkdaySpending {
    table
        .iter()
        .fold(WorkdaySpending::default(), |mut split, tx| {
            if tx.weekday_index() < 5 {
                split.weekdays += tx.amount;
            } else {
                split.weekends += tx.amount;
            }
            split
        })
}
