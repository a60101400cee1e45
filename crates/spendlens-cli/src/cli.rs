//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// spendlens - Spending analytics over a bank operations export
#[derive(Parser)]
#[command(name = "spendlens")]
#[command(about = "Spending reports and dashboards from a bank operations export", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Operations export (XLSX/XLS/ODS or CSV)
    ///
    /// Overrides the SPENDLENS_DATA_FILE environment variable.
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    /// User settings file (JSON or TOML) with currency and stock lists
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    /// Append a JSON line for every computed report to this file
    #[arg(long, global = true)]
    pub report_log: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the home page (greeting, cards, quotes, top transactions)
    Home {
        /// Request time as "YYYY-MM-DD HH:MM:SS"
        timestamp: String,
    },

    /// Show expense and income totals
    Events {
        /// Request time as "YYYY-MM-DD HH:MM:SS"
        timestamp: String,
    },

    /// List transactions inside a date window
    Filter {
        /// Reference date (YYYY-MM-DD or DD.MM.YYYY)
        #[arg(short, long)]
        date: String,

        /// Window: D, W, M, Y or ALL
        #[arg(short, long, default_value = "M")]
        range: String,
    },

    /// Spending reports
    Report {
        #[command(subcommand)]
        action: ReportAction,
    },

    /// Top 3 cashback categories for a month
    Cashback {
        #[arg(short, long)]
        year: i32,

        #[arg(short, long)]
        month: u32,
    },

    /// Amount set aside by rounding a month's expenses
    Invest {
        /// Month as YYYY-MM
        #[arg(short, long)]
        month: String,

        /// Share of expenses to set aside, in percent
        #[arg(short, long, default_value = "10")]
        percent: f64,
    },

    /// Search transaction descriptions
    Search {
        #[command(subcommand)]
        action: SearchAction,
    },

    /// Run every view, report and search once
    Demo {
        /// Request time used for the views
        #[arg(long, default_value = "2023-05-15 14:30:00")]
        timestamp: String,
    },
}

#[derive(Subcommand)]
pub enum ReportAction {
    /// Daily spending in one category
    Category {
        /// Category name (exact, case-sensitive)
        name: String,
    },

    /// Spending per weekday (0 = Monday)
    Weekday,

    /// Spending on weekdays versus weekends
    Workday,
}

#[derive(Subcommand)]
pub enum SearchAction {
    /// Case-insensitive substring search
    Text {
        query: String,
    },

    /// Descriptions containing a phone number
    Phone,

    /// Transfers to private persons
    Transfers,
}
