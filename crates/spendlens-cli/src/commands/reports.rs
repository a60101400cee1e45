//! Filter, spending report, cashback and investment commands

use anyhow::{Context, Result};
use serde_json::json;
use spendlens_core::{
    filter_transactions_by_date_str, investment_bank, profitable_cashback_categories,
    spending_by_category, spending_by_weekday, spending_by_workday,
};
use tracing::info;

use super::{print_json, AppContext};

/// Print the transactions inside the window around `date`
pub fn cmd_filter(ctx: &AppContext, date: &str, range: &str) -> Result<()> {
    let table = ctx.load_table();
    let filtered = filter_transactions_by_date_str(&table, date, range)
        .with_context(|| format!("Cannot filter by date '{}' with range '{}'", date, range))?;

    info!("{} of {} transactions in range", filtered.len(), table.len());
    print_json(&filtered)
}

pub fn cmd_report_category(ctx: &AppContext, category: &str) -> Result<()> {
    let result = spending_by_category(&ctx.load_table(), category);
    ctx.record("spending_by_category", &json!({ "category": category }), &result)?;
    print_json(&result)
}

pub fn cmd_report_weekday(ctx: &AppContext) -> Result<()> {
    let result = spending_by_weekday(&ctx.load_table());
    ctx.record("spending_by_weekday", &json!({}), &result)?;
    print_json(&result)
}

pub fn cmd_report_workday(ctx: &AppContext) -> Result<()> {
    let result = spending_by_workday(&ctx.load_table());
    ctx.record("spending_by_workday", &json!({}), &result)?;
    print_json(&result)
}

pub fn cmd_cashback(ctx: &AppContext, year: i32, month: u32) -> Result<()> {
    let leaders = profitable_cashback_categories(&ctx.load_table(), year, month);
    if leaders.is_empty() {
        info!("No cashback for {}-{:02}", year, month);
    }
    print_json(&leaders)
}

pub fn cmd_invest(ctx: &AppContext, month: &str, percent: f64) -> Result<()> {
    let saved = investment_bank(month, &ctx.load_table(), percent);
    print_json(&json!({ "month": month, "percent": percent, "saved": saved }))
}
