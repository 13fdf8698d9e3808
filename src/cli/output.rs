//! Output formatting for `zenland` commands.
//!
//! Human-readable tables by default, JSON with `--json`.

use serde::Serialize;
use tabled::{Table, Tabled};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Table,
    Json,
}

impl OutputMode {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputMode::Json
        } else {
            OutputMode::Table
        }
    }
}

/// Print rows as a table, or the rows themselves as a JSON array.
pub fn print_items<T: Tabled + Serialize>(items: &[T], mode: OutputMode) -> anyhow::Result<()> {
    match mode {
        OutputMode::Table => {
            if items.is_empty() {
                println!("(no results)");
            } else {
                println!("{}", Table::new(items));
            }
        }
        OutputMode::Json => println!("{}", serde_json::to_string_pretty(items)?),
    }
    Ok(())
}

/// Print a single record. Records are nested, so both modes pretty-print JSON.
pub fn print_item<T: Serialize>(item: &T, _mode: OutputMode) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(item)?);
    Ok(())
}

/// Footer for paged listings; suppressed in JSON mode to keep stdout parseable.
pub fn print_page_footer(shown: usize, total: u64, has_next: bool, mode: OutputMode) {
    if mode == OutputMode::Table {
        let more = if has_next { ", more available" } else { "" };
        println!("{shown} of {total}{more}");
    }
}

pub fn print_not_found(kind: &str, id: &str) {
    eprintln!("\x1b[33mno {kind} found for {id}\x1b[0m");
}

/// Shorten `0x` addresses for table cells
pub fn short_address(address: &str) -> String {
    let len = address.len();
    if len > 12 && address.is_char_boundary(6) && address.is_char_boundary(len - 4) {
        format!("{}…{}", &address[..6], &address[len - 4..])
    } else {
        address.to_string()
    }
}

/// Unix seconds as `YYYY-MM-DD HH:MM`, blank when out of range
pub fn format_timestamp(secs: u64) -> String {
    i64::try_from(secs)
        .ok()
        .and_then(|s| chrono::DateTime::from_timestamp(s, 0))
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}
