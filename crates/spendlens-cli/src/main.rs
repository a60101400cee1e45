//! spendlens CLI - Spending analytics over a bank operations export
//!
//! Usage:
//!   spendlens home "2023-05-15 14:30:00"        Home page JSON
//!   spendlens filter --date 2023-05-15 -r W     Transactions in a window
//!   spendlens report category Супермаркеты      Daily spending in a category
//!   spendlens demo                              Run everything once

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;
use commands::AppContext;

fn main() -> Result<()> {
    // Variables already set in the environment win over .env
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact().with_writer(std::io::stderr))
        .init();

    let ctx = AppContext::new(
        cli.file.as_deref(),
        cli.settings.as_deref(),
        cli.report_log.as_deref(),
    );

    match cli.command {
        Commands::Home { timestamp } => commands::cmd_home(&ctx, &timestamp),
        Commands::Events { timestamp } => commands::cmd_events(&ctx, &timestamp),
        Commands::Filter { date, range } => commands::cmd_filter(&ctx, &date, &range),
        Commands::Report { action } => match action {
            ReportAction::Category { name } => commands::cmd_report_category(&ctx, &name),
            ReportAction::Weekday => commands::cmd_report_weekday(&ctx),
            ReportAction::Workday => commands::cmd_report_workday(&ctx),
        },
        Commands::Cashback { year, month } => commands::cmd_cashback(&ctx, year, month),
        Commands::Invest { month, percent } => commands::cmd_invest(&ctx, &month, percent),
        Commands::Search { action } => match action {
            SearchAction::Text { query } => commands::cmd_search_text(&ctx, &query),
            SearchAction::Phone => commands::cmd_search_phone(&ctx),
            SearchAction::Transfers => commands::cmd_search_transfers(&ctx),
        },
        Commands::Demo { timestamp } => commands::cmd_demo(&ctx, &timestamp),
    }
}
