//! Description search commands

use anyhow::Result;
use spendlens_core::{person_transfers_search, phone_number_search, simple_search};
use tracing::info;

use super::{print_json, AppContext};

pub fn cmd_search_text(ctx: &AppContext, query: &str) -> Result<()> {
    let found = simple_search(&ctx.load_table(), query);
    info!("Found {} transactions matching '{}'", found.len(), query);
    print_json(&found)
}

pub fn cmd_search_phone(ctx: &AppContext) -> Result<()> {
    let found = phone_number_search(&ctx.load_table());
    info!("Found {} transactions with phone numbers", found.len());
    print_json(&found)
}

pub fn cmd_search_transfers(ctx: &AppContext) -> Result<()> {
    let found = person_transfers_search(&ctx.load_table());
    info!("Found {} transfers to persons", found.len());
    print_json(&found)
}
