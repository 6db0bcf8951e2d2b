// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::budget::{self, BudgetReport};
use crate::commands::{expenses, limits};
use crate::email;
use crate::utils::{maybe_print_json, month_label, parse_month, pretty_table, resolve_user};
use anyhow::{Result, bail};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("budget", sub)) => budget_report(conn, sub)?,
        Some(("render", sub)) => render(conn, sub)?,
        _ => {}
    }
    Ok(())
}

/// One consistent read of the month's rows and limits, then the pure
/// aggregation pass.
pub fn compute(conn: &Connection, user_id: i64, month: &str) -> Result<BudgetReport> {
    let rows = expenses::month_expenses(conn, user_id, month)?;
    let month_limits = limits::month_limits(conn, user_id, month)?;
    let label = month_label(month)?;
    Ok(budget::aggregate(&label, &rows, &month_limits))
}

fn budget_report(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = parse_month(sub.get_one::<String>("month").unwrap().trim())?;
    let user_id = resolve_user(conn, sub)?;

    let report = compute(conn, user_id, &month)?;
    if maybe_print_json(json_flag, jsonl_flag, &report)? {
        return Ok(());
    }

    println!("Budget report for {}", report.month);
    let bucket_rows = vec![
        vec![
            "Fixed Bills + Loans".to_string(),
            format!("{:.2}", report.fixed_bills_loans_spent),
            format!("{:.2}", report.fixed_bills_loans_limit),
            format!("{:.1}%", report.fixed_bills_loans_percent),
            report.fixed_bills_loans_status.to_string(),
        ],
        vec![
            "Variable Spending".to_string(),
            format!("{:.2}", report.variable_spending_spent),
            format!("{:.2}", report.variable_spending_limit),
            format!("{:.1}%", report.variable_spending_percent),
            report.variable_spending_status.to_string(),
        ],
    ];
    println!(
        "{}",
        pretty_table(&["Bucket", "Spent", "Limit", "Used", "Status"], bucket_rows)
    );
    println!(
        "Investment: {:.2} (target {:.2} - {:.2}) [{}]",
        report.investment_total,
        report.investment_min,
        report.investment_max,
        report.investment_status
    );
    println!("Income: {:.2}", report.income_total);
    println!(
        "Remaining buffer: {:.2} [{}]",
        report.remaining_buffer, report.buffer_status
    );

    if !report.top_categories.is_empty() {
        let cat_rows: Vec<Vec<String>> = report
            .top_categories
            .iter()
            .map(|t| vec![t.category.clone(), format!("{:.2}", t.total)])
            .collect();
        println!("{}", pretty_table(&["Top Category", "Total"], cat_rows));
    }
    Ok(())
}

fn render(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let month = parse_month(sub.get_one::<String>("month").unwrap().trim())?;
    let user_id = resolve_user(conn, sub)?;
    let html_path = sub.get_one::<String>("html");
    let text_path = sub.get_one::<String>("text");
    if html_path.is_none() && text_path.is_none() {
        bail!("Nothing to render; pass --html and/or --text");
    }

    let report = compute(conn, user_id, &month)?;
    let generated_at = chrono::Local::now()
        .format("%B %d, %Y at %I:%M %p")
        .to_string();
    let content = email::render_budget_email(&report, &generated_at);

    println!("Subject: {}", content.subject);
    if let Some(path) = html_path {
        std::fs::write(path, &content.html)?;
        println!("Wrote HTML body to {}", path);
    }
    if let Some(path) = text_path {
        std::fs::write(path, &content.text)?;
        println!("Wrote text body to {}", path);
    }
    Ok(())
}
