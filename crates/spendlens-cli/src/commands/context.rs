//! Shared command context and the demo command
//!
//! This module contains:
//! - `AppContext` - Resolved config, table loading and report recording
//! - `cmd_demo` - Run every view, report and search once

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Datelike;
use serde::Serialize;
use spendlens_core::{Config, ReportLog, TransactionTable};
use tracing::debug;

use super::{reports, search, views};

/// Configuration and collaborators shared by every command
pub struct AppContext {
    pub config: Config,
    pub report_log: Option<ReportLog>,
}

impl AppContext {
    /// Resolve configuration from the environment, then apply CLI overrides
    pub fn new(file: Option<&Path>, settings: Option<&Path>, report_log: Option<&Path>) -> Self {
        Self::with_config(Config::from_env(), file, settings, report_log)
    }

    pub fn with_config(
        mut config: Config,
        file: Option<&Path>,
        settings: Option<&Path>,
        report_log: Option<&Path>,
    ) -> Self {
        if let Some(file) = file {
            config = config.with_data_file(file);
        }
        if let Some(settings) = settings {
            config = config.with_user_settings(settings);
        }
        debug!("Using data file {}", config.data_file.display());

        Self {
            config,
            report_log: report_log.map(ReportLog::new),
        }
    }

    /// Load the configured export; load failures leave the table empty
    pub fn load_table(&self) -> TransactionTable {
        spendlens_core::load_transactions(&self.config.data_file)
    }

    /// Append a report record when a report log is configured
    pub fn record<A, R>(&self, function: &str, args: &A, result: &R) -> Result<()>
    where
        A: Serialize + ?Sized,
        R: Serialize + ?Sized,
    {
        if let Some(log) = &self.report_log {
            log.record(function, args, result).with_context(|| {
                format!("Failed to write report log {}", log.path().display())
            })?;
        }
        Ok(())
    }
}

pub fn cmd_demo(ctx: &AppContext, timestamp: &str) -> Result<()> {
    let now = spendlens_core::views::parse_timestamp(timestamp)
        .context("Invalid demo timestamp (use YYYY-MM-DD HH:MM:SS)")?;
    let month = now.format("%Y-%m").to_string();

    println!("=== Home Page ===");
    views::cmd_home(ctx, timestamp)?;

    println!("\n=== Events Page ===");
    views::cmd_events(ctx, timestamp)?;

    println!("\n=== Profitable Cashback Categories ===");
    reports::cmd_cashback(ctx, now.year(), now.month())?;

    println!("\n=== Investment Savings (50%) ===");
    reports::cmd_invest(ctx, &month, 50.0)?;

    println!("\n=== Search: магазин ===");
    search::cmd_search_text(ctx, "магазин")?;

    println!("\n=== Search: phone numbers ===");
    search::cmd_search_phone(ctx)?;

    println!("\n=== Search: transfers to persons ===");
    search::cmd_search_transfers(ctx)?;

    println!("\n=== Spending by Category (Супермаркеты) ===");
    reports::cmd_report_category(ctx, "Супермаркеты")?;

    println!("\n=== Spending by Weekday ===");
    reports::cmd_report_weekday(ctx)?;

    println!("\n=== Spending by Workday ===");
    reports::cmd_report_workday(ctx)?;

    Ok(())
}
