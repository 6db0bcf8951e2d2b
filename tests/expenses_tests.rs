// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;
use spendlog::{cli, commands::expenses};

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(r#"
        PRAGMA foreign_keys = ON;
        CREATE TABLE settings(key TEXT PRIMARY KEY, value TEXT NOT NULL);
        CREATE TABLE users(id INTEGER PRIMARY KEY AUTOINCREMENT, username TEXT NOT NULL UNIQUE, email TEXT NOT NULL UNIQUE, created_at TEXT NOT NULL DEFAULT (datetime('now')));
        CREATE TABLE expenses(id INTEGER PRIMARY KEY AUTOINCREMENT, user_id INTEGER NOT NULL, date TEXT NOT NULL, category TEXT NOT NULL, subcategory TEXT, description TEXT NOT NULL, amount TEXT NOT NULL, is_recurring INTEGER NOT NULL DEFAULT 0, is_active INTEGER NOT NULL DEFAULT 1, is_bill INTEGER NOT NULL DEFAULT 0, created_at TEXT NOT NULL DEFAULT (datetime('now')));
    "#).unwrap();
    conn.execute(
        "INSERT INTO users(username, email) VALUES('alice','alice@example.com')",
        [],
    )
    .unwrap();
    conn
}

fn run_expense(conn: &Connection, args: &[&str]) -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches_from(args);
    match matches.subcommand() {
        Some(("expense", sub)) => expenses::handle(conn, sub),
        _ => panic!("expected an expense subcommand"),
    }
}

#[test]
fn bill_flag_cleared_outside_subscriptions() {
    let conn = setup();
    run_expense(
        &conn,
        &[
            "spendlog", "expense", "add", "--user", "alice", "--date", "2025-11-03",
            "--category", "Groceries", "--description", "weekly shop", "--amount", "82.50",
            "--bill",
        ],
    )
    .unwrap();
    let (bill, active): (bool, bool) = conn
        .query_row(
            "SELECT is_bill, is_active FROM expenses WHERE description='weekly shop'",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .unwrap();
    assert!(!bill);
    assert!(active);
}

#[test]
fn subscriptions_keep_bill_flag_and_start_active() {
    let conn = setup();
    // --inactive must be ignored for subscriptions
    run_expense(
        &conn,
        &[
            "spendlog", "expense", "add", "--user", "alice", "--date", "2025-11-01",
            "--category", "Subscription", "--description", "Netflix", "--amount", "15.99",
            "--bill", "--inactive",
        ],
    )
    .unwrap();
    let (bill, active): (bool, bool) = conn
        .query_row(
            "SELECT is_bill, is_active FROM expenses WHERE description='Netflix'",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .unwrap();
    assert!(bill);
    assert!(active);
}

#[test]
fn cancel_only_flips_the_active_flag() {
    let conn = setup();
    run_expense(
        &conn,
        &[
            "spendlog", "expense", "add", "--user", "alice", "--date", "2025-11-01",
            "--category", "Subscription", "--description", "Gym", "--amount", "40",
        ],
    )
    .unwrap();
    run_expense(
        &conn,
        &["spendlog", "expense", "cancel", "--user", "alice", "--id", "1"],
    )
    .unwrap();
    let (active, count): (bool, i64) = conn
        .query_row(
            "SELECT is_active, (SELECT COUNT(*) FROM expenses) FROM expenses WHERE id=1",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .unwrap();
    assert!(!active);
    assert_eq!(count, 1);
}

#[test]
fn cancel_rejects_non_subscriptions() {
    let conn = setup();
    run_expense(
        &conn,
        &[
            "spendlog", "expense", "add", "--user", "alice", "--date", "2025-11-03",
            "--category", "Groceries", "--description", "weekly shop", "--amount", "82.50",
        ],
    )
    .unwrap();
    let err = run_expense(
        &conn,
        &["spendlog", "expense", "cancel", "--user", "alice", "--id", "1"],
    );
    assert!(err.is_err());
}

#[test]
fn edit_applies_the_same_coercions() {
    let conn = setup();
    run_expense(
        &conn,
        &[
            "spendlog", "expense", "add", "--user", "alice", "--date", "2025-11-01",
            "--category", "Subscription", "--description", "Netflix", "--amount", "15.99",
            "--bill",
        ],
    )
    .unwrap();
    // Recategorizing away from Subscription clears the bill flag even if asked for
    run_expense(
        &conn,
        &[
            "spendlog", "expense", "edit", "--user", "alice", "--id", "1", "--date",
            "2025-11-01", "--category", "Entertainment", "--description", "Netflix",
            "--amount", "15.99", "--bill",
        ],
    )
    .unwrap();
    let bill: bool = conn
        .query_row("SELECT is_bill FROM expenses WHERE id=1", [], |r| r.get(0))
        .unwrap();
    assert!(!bill);
}

#[test]
fn rm_is_scoped_to_the_owner() {
    let conn = setup();
    conn.execute(
        "INSERT INTO users(username, email) VALUES('bob','bob@example.com')",
        [],
    )
    .unwrap();
    run_expense(
        &conn,
        &[
            "spendlog", "expense", "add", "--user", "alice", "--date", "2025-11-03",
            "--category", "Groceries", "--description", "weekly shop", "--amount", "82.50",
        ],
    )
    .unwrap();
    let err = run_expense(
        &conn,
        &["spendlog", "expense", "rm", "--user", "bob", "--id", "1"],
    );
    assert!(err.is_err());
    run_expense(
        &conn,
        &["spendlog", "expense", "rm", "--user", "alice", "--id", "1"],
    )
    .unwrap();
}

#[test]
fn list_filters_by_description_regex() {
    let conn = setup();
    conn.execute(
        "INSERT INTO expenses(user_id, date, category, description, amount) VALUES(1,'2025-11-05','Bills','Hydro One','120.50')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO expenses(user_id, date, category, description, amount) VALUES(1,'2025-11-06','Groceries','Market run','54.25')",
        [],
    )
    .unwrap();
    let matches = cli::build_cli().get_matches_from([
        "spendlog", "expense", "list", "--user", "alice", "--month", "2025-11", "--match",
        "(?i)hydro",
    ]);
    let sub = match matches.subcommand() {
        Some(("expense", esub)) => match esub.subcommand() {
            Some(("list", lsub)) => lsub,
            _ => panic!("expected list"),
        },
        _ => panic!("expected expense"),
    };
    let rows = expenses::query_rows(&conn, sub).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].description, "Hydro One");
}

#[test]
fn list_rejects_invalid_regex() {
    let conn = setup();
    let matches = cli::build_cli().get_matches_from([
        "spendlog", "expense", "list", "--user", "alice", "--match", "(?P< ",
    ]);
    let sub = match matches.subcommand() {
        Some(("expense", esub)) => match esub.subcommand() {
            Some(("list", lsub)) => lsub,
            _ => panic!("expected list"),
        },
        _ => panic!("expected expense"),
    };
    assert!(expenses::query_rows(&conn, sub).is_err());
}

#[test]
fn month_expenses_reads_typed_rows() {
    let conn = setup();
    conn.execute(
        "INSERT INTO expenses(user_id, date, category, description, amount) VALUES(1,'2025-11-05','Bills','Hydro','120.50')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO expenses(user_id, date, category, description, amount) VALUES(1,'2025-12-01','Bills','Hydro','120.50')",
        [],
    )
    .unwrap();
    let rows = expenses::month_expenses(&conn, 1, "2025-11").unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].amount, "120.50".parse().unwrap());
    assert_eq!(
        rows[0].date,
        chrono::NaiveDate::from_ymd_opt(2025, 11, 5).unwrap()
    );
}
