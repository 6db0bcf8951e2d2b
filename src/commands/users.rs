// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{id_for_user, pretty_table, set_default_user};
use anyhow::Result;
use rusqlite::{Connection, params};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let username = sub.get_one::<String>("username").unwrap().trim();
            let email = sub.get_one::<String>("email").unwrap().trim();
            conn.execute(
                "INSERT INTO users(username, email) VALUES (?1, ?2)",
                params![username, email],
            )?;
            println!("Added user '{}' <{}>", username, email);
        }
        Some(("list", _)) => {
            let mut stmt =
                conn.prepare("SELECT username, email, created_at FROM users ORDER BY username")?;
            let rows = stmt.query_map([], |r| {
                Ok((
                    r.get::<_, String>(0)?,
                    r.get::<_, String>(1)?,
                    r.get::<_, String>(2)?,
                ))
            })?;
            let mut data = Vec::new();
            for row in rows {
                let (u, e, c) = row?;
                data.push(vec![u, e, c]);
            }
            println!("{}", pretty_table(&["Username", "Email", "Created"], data));
        }
        Some(("rm", sub)) => {
            let username = sub.get_one::<String>("username").unwrap().trim();
            conn.execute("DELETE FROM users WHERE username=?1", params![username])?;
            println!("Removed user '{}'", username);
        }
        Some(("set-default", sub)) => {
            let username = sub.get_one::<String>("username").unwrap().trim();
            // Unknown names must not become the default.
            id_for_user(conn, username)?;
            set_default_user(conn, username)?;
            println!("Default user set to '{}'", username);
        }
        _ => {}
    }
    Ok(())
}
