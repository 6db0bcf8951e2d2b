// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_month(s: &str) -> Result<String> {
    chrono::NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
    Ok(s.to_string())
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// Display label for a month, e.g. "2025-11" -> "November 2025".
pub fn month_label(month: &str) -> Result<String> {
    let first = NaiveDate::parse_from_str(&format!("{}-01", month), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", month))?;
    Ok(first.format("%B %Y").to_string())
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn id_for_user(conn: &Connection, username: &str) -> Result<i64> {
    let mut stmt = conn.prepare("SELECT id FROM users WHERE username=?1")?;
    let id: i64 = stmt
        .query_row(params![username], |r| r.get(0))
        .with_context(|| format!("User '{}' not found", username))?;
    Ok(id)
}

// Default user settings
pub fn get_default_user(conn: &Connection) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key='default_user'",
            [],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v)
}

pub fn set_default_user(conn: &Connection, username: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('default_user', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![username],
    )?;
    Ok(())
}

/// Resolve `--user` or fall back to the configured default user.
pub fn resolve_user(conn: &Connection, m: &clap::ArgMatches) -> Result<i64> {
    if let Some(name) = m.get_one::<String>("user") {
        return id_for_user(conn, name.trim());
    }
    match get_default_user(conn)? {
        Some(name) => id_for_user(conn, &name),
        None => bail!("No user given; pass --user or set one with 'user set-default'"),
    }
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

pub fn yes_no(b: bool) -> &'static str {
    if b { "Yes" } else { "No" }
}
