// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Expense;
use crate::utils::{
    maybe_print_json, parse_date, parse_decimal, pretty_table, resolve_user, yes_no,
};
use anyhow::{Result, anyhow, bail};
use regex::Regex;
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        Some(("cancel", sub)) => cancel(conn, sub)?,
        _ => {}
    }
    Ok(())
}

/// The bill flag only means something on Subscription rows; everything else
/// gets it cleared. Subscriptions always start active.
fn coerce_flags(category: &str, bill: bool, inactive: bool) -> (bool, bool) {
    if category == "Subscription" {
        (bill, true)
    } else {
        (false, !inactive)
    }
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = resolve_user(conn, sub)?;
    let date = parse_date(sub.get_one::<String>("date").unwrap().trim())?;
    let category = sub.get_one::<String>("category").unwrap().trim().to_string();
    let subcategory = sub
        .get_one::<String>("subcategory")
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string());
    let description = sub.get_one::<String>("description").unwrap().trim();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap().trim())?;
    let is_recurring = sub.get_flag("recurring");
    let (is_bill, is_active) =
        coerce_flags(&category, sub.get_flag("bill"), sub.get_flag("inactive"));

    conn.execute(
        "INSERT INTO expenses(user_id, date, category, subcategory, description, amount, is_recurring, is_active, is_bill)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            user_id,
            date.to_string(),
            category,
            subcategory,
            description,
            amount.to_string(),
            is_recurring,
            is_active,
            is_bill
        ],
    )?;
    println!("Recorded {} on {} for '{}' ({})", amount, date, description, category);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.category.clone(),
                    r.subcategory.clone(),
                    r.description.clone(),
                    r.amount.clone(),
                    yes_no(r.is_recurring).into(),
                    yes_no(r.is_active).into(),
                    yes_no(r.is_bill).into(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "Id",
                    "Date",
                    "Category",
                    "Subcategory",
                    "Description",
                    "Amount",
                    "Recurring",
                    "Active",
                    "Bill"
                ],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct ExpenseRow {
    pub id: i64,
    pub date: String,
    pub category: String,
    pub subcategory: String,
    pub description: String,
    pub amount: String,
    pub is_recurring: bool,
    pub is_active: bool,
    pub is_bill: bool,
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<ExpenseRow>> {
    let user_id = resolve_user(conn, sub)?;
    let matcher = sub
        .get_one::<String>("match")
        .map(|p| Regex::new(p).map_err(|err| anyhow!("Invalid regex pattern '{}': {}", p, err)))
        .transpose()?;

    let mut sql = String::from(
        "SELECT id, date, category, subcategory, description, amount, is_recurring, is_active, is_bill
         FROM expenses WHERE user_id=?",
    );
    let mut params_vec: Vec<String> = vec![user_id.to_string()];

    if let Some(month) = sub.get_one::<String>("month") {
        sql.push_str(" AND substr(date,1,7)=?");
        params_vec.push(month.into());
    }
    if let Some(cat) = sub.get_one::<String>("category") {
        sql.push_str(" AND category=?");
        params_vec.push(cat.into());
    }
    sql.push_str(" ORDER BY date DESC, id DESC");
    if let Some(limit) = sub.get_one::<usize>("limit") {
        sql.push_str(" LIMIT ?");
        params_vec.push(limit.to_string());
    }

    let mut stmt = conn.prepare(&sql)?;
    let params: Vec<&dyn rusqlite::ToSql> = params_vec
        .iter()
        .map(|s| s as &dyn rusqlite::ToSql)
        .collect();
    let mut rows = stmt.query(rusqlite::params_from_iter(params))?;

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let description: String = r.get(4)?;
        if let Some(ref re) = matcher {
            if !re.is_match(&description) {
                continue;
            }
        }
        data.push(ExpenseRow {
            id: r.get(0)?,
            date: r.get(1)?,
            category: r.get(2)?,
            subcategory: r.get::<_, Option<String>>(3)?.unwrap_or_default(),
            description,
            amount: r.get(5)?,
            is_recurring: r.get(6)?,
            is_active: r.get(7)?,
            is_bill: r.get(8)?,
        });
    }
    Ok(data)
}

/// All expense rows for one user whose date falls inside `month` (YYYY-MM),
/// read in one statement so a report sees a consistent snapshot.
pub fn month_expenses(conn: &Connection, user_id: i64, month: &str) -> Result<Vec<Expense>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, date, category, subcategory, description, amount, is_recurring, is_active, is_bill
         FROM expenses WHERE user_id=?1 AND substr(date,1,7)=?2 ORDER BY date, id",
    )?;
    let mut rows = stmt.query(params![user_id, month])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let date_s: String = r.get(2)?;
        let amount_s: String = r.get(6)?;
        out.push(Expense {
            id: r.get(0)?,
            user_id: r.get(1)?,
            date: parse_date(&date_s)?,
            category: r.get(3)?,
            subcategory: r.get(4)?,
            description: r.get(5)?,
            amount: parse_decimal(&amount_s)?,
            is_recurring: r.get(7)?,
            is_active: r.get(8)?,
            is_bill: r.get(9)?,
        });
    }
    Ok(out)
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = resolve_user(conn, sub)?;
    let id = *sub.get_one::<i64>("id").unwrap();
    let date = parse_date(sub.get_one::<String>("date").unwrap().trim())?;
    let category = sub.get_one::<String>("category").unwrap().trim().to_string();
    let subcategory = sub
        .get_one::<String>("subcategory")
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string());
    let description = sub.get_one::<String>("description").unwrap().trim();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap().trim())?;
    let is_recurring = sub.get_flag("recurring");
    let (is_bill, is_active) =
        coerce_flags(&category, sub.get_flag("bill"), sub.get_flag("inactive"));

    let changed = conn.execute(
        "UPDATE expenses SET date=?1, category=?2, subcategory=?3, description=?4, amount=?5,
                is_recurring=?6, is_active=?7, is_bill=?8
         WHERE id=?9 AND user_id=?10",
        params![
            date.to_string(),
            category,
            subcategory,
            description,
            amount.to_string(),
            is_recurring,
            is_active,
            is_bill,
            id,
            user_id
        ],
    )?;
    if changed == 0 {
        bail!("Expense {} not found", id);
    }
    println!("Updated expense {}", id);
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = resolve_user(conn, sub)?;
    let id = *sub.get_one::<i64>("id").unwrap();
    let changed = conn.execute(
        "DELETE FROM expenses WHERE id=?1 AND user_id=?2",
        params![id, user_id],
    )?;
    if changed == 0 {
        bail!("Expense {} not found", id);
    }
    println!("Deleted expense {}", id);
    Ok(())
}

fn cancel(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = resolve_user(conn, sub)?;
    let id = *sub.get_one::<i64>("id").unwrap();
    let category: Option<String> = conn
        .query_row(
            "SELECT category FROM expenses WHERE id=?1 AND user_id=?2",
            params![id, user_id],
            |r| r.get(0),
        )
        .optional()?;
    match category.as_deref() {
        None => bail!("Expense {} not found", id),
        Some("Subscription") => {}
        Some(_) => bail!("Only subscriptions can be cancelled"),
    }
    conn.execute(
        "UPDATE expenses SET is_active=0 WHERE id=?1 AND user_id=?2",
        params![id, user_id],
    )?;
    println!("Cancelled subscription {}", id);
    Ok(())
}
