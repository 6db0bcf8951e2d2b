// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection) -> Result<()> {
    let mut rows = Vec::new();

    // 1) Bill flag on non-subscription rows
    let mut stmt = conn.prepare(
        "SELECT id, category FROM expenses WHERE is_bill=1 AND category != 'Subscription'",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let cat: String = r.get(1)?;
        rows.push(vec![
            "bill_flag_not_subscription".into(),
            format!("expense {} ({})", id, cat),
        ]);
    }

    // 2) Months holding duplicate copies of the same recurring expense
    let mut stmt2 = conn.prepare(
        "SELECT user_id, substr(date,1,7) AS month, category, description, COUNT(*) AS n
         FROM expenses WHERE is_recurring=1
         GROUP BY user_id, substr(date,1,7), category, description, amount
         HAVING COUNT(*) > 1",
    )?;
    let mut cur2 = stmt2.query([])?;
    while let Some(r) = cur2.next()? {
        let uid: i64 = r.get(0)?;
        let month: String = r.get(1)?;
        let cat: String = r.get(2)?;
        let desc: String = r.get(3)?;
        let n: i64 = r.get(4)?;
        rows.push(vec![
            "duplicate_recurring".into(),
            format!("user {} {} {} '{}' x{}", uid, month, cat, desc, n),
        ]);
    }

    // 3) Limit records with an inverted investing range
    let mut stmt3 = conn
        .prepare("SELECT user_id, month, investing_min, investing_max FROM budget_limits")?;
    let mut cur3 = stmt3.query([])?;
    while let Some(r) = cur3.next()? {
        let uid: i64 = r.get(0)?;
        let month: String = r.get(1)?;
        let min_s: String = r.get(2)?;
        let max_s: String = r.get(3)?;
        match (min_s.parse::<Decimal>(), max_s.parse::<Decimal>()) {
            (Ok(min), Ok(max)) if min > max => {
                rows.push(vec![
                    "inverted_investing_range".into(),
                    format!("user {} {} ({} > {})", uid, month, min, max),
                ]);
            }
            (Ok(_), Ok(_)) => {}
            _ => {
                rows.push(vec![
                    "invalid_limit_amount".into(),
                    format!("user {} {}", uid, month),
                ]);
            }
        }
    }

    // 4) Stored amounts that no longer parse
    let mut stmt4 = conn.prepare("SELECT id, amount FROM expenses")?;
    let mut cur4 = stmt4.query([])?;
    while let Some(r) = cur4.next()? {
        let id: i64 = r.get(0)?;
        let amt: String = r.get(1)?;
        if amt.parse::<Decimal>().is_err() {
            rows.push(vec![
                "invalid_amount".into(),
                format!("expense {} ('{}')", id, amt),
            ]);
        }
    }

    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
