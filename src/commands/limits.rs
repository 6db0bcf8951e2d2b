// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::MonthLimits;
use crate::utils::{maybe_print_json, parse_decimal, parse_month, pretty_table, resolve_user};
use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(conn, sub)?,
        Some(("show", sub)) => show(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let month = parse_month(sub.get_one::<String>("month").unwrap().trim())?;
    let user_id = resolve_user(conn, sub)?;
    let defaults = MonthLimits::default();

    let arg_or = |name: &str, fallback: rust_decimal::Decimal| -> Result<rust_decimal::Decimal> {
        match sub.get_one::<String>(name) {
            Some(s) => parse_decimal(s.trim()),
            None => Ok(fallback),
        }
    };
    let fixed = arg_or("fixed", defaults.fixed_bills_loans)?;
    let variable = arg_or("variable", defaults.variable_spending)?;
    let invest_min = arg_or("invest-min", defaults.investing_min)?;
    let invest_max = arg_or("invest-max", defaults.investing_max)?;

    conn.execute(
        "INSERT INTO budget_limits(user_id, month, fixed_bills_loans, variable_spending, investing_min, investing_max)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(user_id, month) DO UPDATE SET
             fixed_bills_loans=excluded.fixed_bills_loans,
             variable_spending=excluded.variable_spending,
             investing_min=excluded.investing_min,
             investing_max=excluded.investing_max,
             updated_at=datetime('now')",
        params![
            user_id,
            month,
            fixed.to_string(),
            variable.to_string(),
            invest_min.to_string(),
            invest_max.to_string()
        ],
    )?;
    println!(
        "Limits set for {}: fixed {} / variable {} / investing {}-{}",
        month, fixed, variable, invest_min, invest_max
    );
    Ok(())
}

#[derive(Serialize)]
struct LimitsRow {
    month: String,
    #[serde(flatten)]
    limits: MonthLimits,
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = parse_month(sub.get_one::<String>("month").unwrap().trim())?;
    let user_id = resolve_user(conn, sub)?;
    let limits = month_limits(conn, user_id, &month)?;

    let row = LimitsRow {
        month: month.clone(),
        limits,
    };
    if !maybe_print_json(json_flag, jsonl_flag, &row)? {
        println!(
            "{}",
            pretty_table(
                &[
                    "Month",
                    "Fixed Bills + Loans",
                    "Variable Spending",
                    "Investing Min",
                    "Investing Max"
                ],
                vec![vec![
                    row.month,
                    row.limits.fixed_bills_loans.to_string(),
                    row.limits.variable_spending.to_string(),
                    row.limits.investing_min.to_string(),
                    row.limits.investing_max.to_string(),
                ]],
            )
        );
    }
    Ok(())
}

/// The stored limits for (user, month), or the defaults when no record
/// exists. Reading never creates a row.
pub fn month_limits(conn: &Connection, user_id: i64, month: &str) -> Result<MonthLimits> {
    let stored: Option<(String, String, String, String)> = conn
        .query_row(
            "SELECT fixed_bills_loans, variable_spending, investing_min, investing_max
             FROM budget_limits WHERE user_id=?1 AND month=?2",
            params![user_id, month],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
        )
        .optional()?;
    match stored {
        Some((fixed, variable, min, max)) => Ok(MonthLimits {
            fixed_bills_loans: fixed
                .parse()
                .with_context(|| format!("Invalid limit '{}' for {}", fixed, month))?,
            variable_spending: variable
                .parse()
                .with_context(|| format!("Invalid limit '{}' for {}", variable, month))?,
            investing_min: min
                .parse()
                .with_context(|| format!("Invalid limit '{}' for {}", min, month))?,
            investing_max: max
                .parse()
                .with_context(|| format!("Invalid limit '{}' for {}", max, month))?,
        }),
        None => Ok(MonthLimits::default()),
    }
}
