// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{parse_date, parse_decimal, resolve_user};
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use rusqlite::{Connection, params};

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("expenses", sub)) => import_expenses(conn, sub),
        _ => Ok(()),
    }
}

fn parse_bool(s: &str) -> bool {
    matches!(
        s.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "y"
    )
}

/// Expected columns: date,category,subcategory,description,amount,recurring,bill.
/// The whole file lands in one transaction; any bad row aborts the import.
fn import_expenses(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").unwrap().trim();
    let user_id = resolve_user(conn, sub)?;
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path))?;

    let tx = conn.transaction()?;
    let mut count = 0usize;
    for result in rdr.records() {
        let rec = result?;
        let date_raw = rec.get(0).context("date missing")?.trim().to_string();
        let category = rec.get(1).context("category missing")?.trim().to_string();
        let subcategory = rec
            .get(2)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string());
        let description = rec
            .get(3)
            .context("description missing")?
            .trim()
            .to_string();
        let amount_raw = rec.get(4).context("amount missing")?.trim().to_string();
        let is_recurring = rec.get(5).map(parse_bool).unwrap_or(false);
        let bill_raw = rec.get(6).map(parse_bool).unwrap_or(false);

        let date = parse_date(&date_raw)
            .with_context(|| format!("Invalid expense date '{}'", date_raw))?;
        let amount = parse_decimal(&amount_raw)
            .with_context(|| format!("Invalid amount '{}' for {}", amount_raw, description))?;
        let is_bill = category == "Subscription" && bill_raw;

        tx.execute(
            "INSERT INTO expenses(user_id, date, category, subcategory, description, amount, is_recurring, is_active, is_bill)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 1, ?8)",
            params![
                user_id,
                date.to_string(),
                category,
                subcategory,
                description,
                amount.to_string(),
                is_recurring,
                is_bill
            ],
        )?;
        count += 1;
    }
    tx.commit()?;
    println!("Imported {} expense(s) from {}", count, path);
    Ok(())
}
