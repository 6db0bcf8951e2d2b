// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;
use spendlog::{cli, commands::expenses, commands::users, utils};

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(r#"
        PRAGMA foreign_keys = ON;
        CREATE TABLE settings(key TEXT PRIMARY KEY, value TEXT NOT NULL);
        CREATE TABLE users(id INTEGER PRIMARY KEY AUTOINCREMENT, username TEXT NOT NULL UNIQUE, email TEXT NOT NULL UNIQUE, created_at TEXT NOT NULL DEFAULT (datetime('now')));
        CREATE TABLE expenses(id INTEGER PRIMARY KEY AUTOINCREMENT, user_id INTEGER NOT NULL, date TEXT NOT NULL, category TEXT NOT NULL, subcategory TEXT, description TEXT NOT NULL, amount TEXT NOT NULL, is_recurring INTEGER NOT NULL DEFAULT 0, is_active INTEGER NOT NULL DEFAULT 1, is_bill INTEGER NOT NULL DEFAULT 0, created_at TEXT NOT NULL DEFAULT (datetime('now')));
    "#).unwrap();
    conn
}

fn run_user(conn: &Connection, args: &[&str]) -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches_from(args);
    match matches.subcommand() {
        Some(("user", sub)) => users::handle(conn, sub),
        _ => panic!("expected a user subcommand"),
    }
}

#[test]
fn default_user_backs_commands_without_an_explicit_owner() {
    let conn = setup();
    run_user(
        &conn,
        &[
            "spendlog", "user", "add", "--username", "bob", "--email", "bob@example.com",
        ],
    )
    .unwrap();
    run_user(
        &conn,
        &["spendlog", "user", "set-default", "--username", "bob"],
    )
    .unwrap();

    // No --user: falls back to the configured default
    let matches = cli::build_cli().get_matches_from([
        "spendlog", "expense", "add", "--date", "2025-11-03", "--category", "Groceries",
        "--description", "weekly shop", "--amount", "82.50",
    ]);
    match matches.subcommand() {
        Some(("expense", sub)) => expenses::handle(&conn, sub).unwrap(),
        _ => panic!("expected an expense subcommand"),
    }
    let owner: i64 = conn
        .query_row("SELECT user_id FROM expenses", [], |r| r.get(0))
        .unwrap();
    assert_eq!(owner, utils::id_for_user(&conn, "bob").unwrap());
}

#[test]
fn set_default_rejects_unknown_users() {
    let conn = setup();
    let err = run_user(
        &conn,
        &["spendlog", "user", "set-default", "--username", "nobody"],
    );
    assert!(err.is_err());
    assert!(utils::get_default_user(&conn).unwrap().is_none());
}

#[test]
fn commands_fail_without_a_user_or_default() {
    let conn = setup();
    let matches = cli::build_cli().get_matches_from([
        "spendlog", "expense", "add", "--date", "2025-11-03", "--category", "Groceries",
        "--description", "weekly shop", "--amount", "82.50",
    ]);
    let result = match matches.subcommand() {
        Some(("expense", sub)) => expenses::handle(&conn, sub),
        _ => panic!("expected an expense subcommand"),
    };
    assert!(result.is_err());
}
