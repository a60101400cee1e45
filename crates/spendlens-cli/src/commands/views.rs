//! Dashboard commands

use anyhow::{Context, Result};
use serde_json::json;
use spendlens_core::{Dashboard, FileSource, StubMarketData};

use super::{print_json, AppContext};

fn dashboard(ctx: &AppContext) -> Result<Dashboard<FileSource, StubMarketData>> {
    Dashboard::from_config(&ctx.config).with_context(|| {
        format!(
            "Failed to load user settings from {}",
            ctx.config.user_settings.display()
        )
    })
}

pub fn cmd_home(ctx: &AppContext, timestamp: &str) -> Result<()> {
    let page = dashboard(ctx)?.home_page(timestamp);
    ctx.record("home_page", &json!({ "timestamp": timestamp }), &page)?;
    print_json(&page)
}

pub fn cmd_events(ctx: &AppContext, timestamp: &str) -> Result<()> {
    let page = dashboard(ctx)?.events_page(timestamp);
    ctx.record("events_page", &json!({ "timestamp": timestamp }), &page)?;
    print_json(&page)
}
