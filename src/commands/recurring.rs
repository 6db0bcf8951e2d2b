// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{parse_month, resolve_user};
use anyhow::Result;
use rusqlite::{Connection, OptionalExtension, params};

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("generate", sub)) => generate(conn, sub),
        _ => Ok(()),
    }
}

/// Copy every active recurring expense into the target month, dated the 1st,
/// unless a row with the same (category, description, amount) already exists
/// there. Runs in one transaction; rows inserted earlier in the pass are
/// visible to the duplicate check, so duplicate templates collapse to one.
fn generate(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let month = parse_month(sub.get_one::<String>("month").unwrap().trim())?;
    let user_id = resolve_user(conn, sub)?;

    let tx = conn.transaction()?;
    let mut generated = 0usize;
    {
        let templates: Vec<(String, Option<String>, String, String, bool)> = {
            let mut stmt = tx.prepare(
                "SELECT category, subcategory, description, amount, is_bill
                 FROM expenses WHERE user_id=?1 AND is_recurring=1 AND is_active=1
                 ORDER BY id",
            )?;
            let rows = stmt.query_map(params![user_id], |r| {
                Ok((
                    r.get::<_, String>(0)?,
                    r.get::<_, Option<String>>(1)?,
                    r.get::<_, String>(2)?,
                    r.get::<_, String>(3)?,
                    r.get::<_, bool>(4)?,
                ))
            })?;
            let mut out = Vec::new();
            for row in rows {
                out.push(row?);
            }
            out
        };

        let mut exists_stmt = tx.prepare(
            "SELECT 1 FROM expenses
             WHERE user_id=?1 AND category=?2 AND description=?3 AND amount=?4
               AND substr(date,1,7)=?5 LIMIT 1",
        )?;
        let mut insert_stmt = tx.prepare(
            "INSERT INTO expenses(user_id, date, category, subcategory, description, amount, is_recurring, is_active, is_bill)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, 1, 1, ?7)",
        )?;

        for (category, subcategory, description, amount, is_bill) in templates {
            let existing: Option<i32> = exists_stmt
                .query_row(
                    params![user_id, category, description, amount, month],
                    |r| r.get(0),
                )
                .optional()?;
            if existing.is_none() {
                insert_stmt.execute(params![
                    user_id,
                    format!("{}-01", month),
                    category,
                    subcategory,
                    description,
                    amount,
                    is_bill
                ])?;
                generated += 1;
            }
        }
    }
    tx.commit()?;
    println!("Generated {} recurring expense(s) for {}", generated, month);
    Ok(())
}
