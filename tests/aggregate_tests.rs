// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use spendlog::budget::{self, BucketStatus, BufferStatus, InvestmentStatus};
use spendlog::models::{Expense, MonthLimits};

fn exp(category: &str, amount: &str, is_bill: bool) -> Expense {
    Expense {
        id: 0,
        user_id: 1,
        date: chrono::NaiveDate::from_ymd_opt(2025, 11, 5).unwrap(),
        category: category.to_string(),
        subcategory: None,
        description: format!("{} row", category),
        amount: amount.parse().unwrap(),
        is_recurring: false,
        is_active: true,
        is_bill,
    }
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

#[test]
fn monthly_totals_and_buffer() {
    let expenses = vec![
        exp("Bills", "300", false),
        exp("Groceries", "150", false),
        exp("Income", "5000", false),
        exp("Investment", "1600", false),
    ];
    let report = budget::aggregate("November 2025", &expenses, &MonthLimits::default());

    assert_eq!(report.month, "November 2025");
    assert_eq!(report.fixed_bills_loans_spent, dec("300"));
    assert_eq!(report.variable_spending_spent, dec("150"));
    assert_eq!(report.investment_total, dec("1600"));
    assert_eq!(report.income_total, dec("5000"));
    assert_eq!(report.remaining_buffer, dec("2950"));
    assert_eq!(report.fixed_bills_loans_percent, dec("50"));
    assert_eq!(report.fixed_bills_loans_status, BucketStatus::Ok);
    assert_eq!(report.investment_status, InvestmentStatus::Ok);
    assert_eq!(report.buffer_status, BufferStatus::Ok);

    // Income and Investment never show up as top categories
    let names: Vec<&str> = report
        .top_categories
        .iter()
        .map(|t| t.category.as_str())
        .collect();
    assert_eq!(names, vec!["Bills", "Groceries"]);
}

#[test]
fn subscription_bills_count_as_fixed() {
    let expenses = vec![
        exp("Subscription", "50", true),
        exp("Subscription", "15", false),
    ];
    let report = budget::aggregate("November 2025", &expenses, &MonthLimits::default());
    assert_eq!(report.fixed_bills_loans_spent, dec("50"));
    assert_eq!(report.variable_spending_spent, dec("15"));
}

#[test]
fn bucket_sums_partition_the_month() {
    let expenses = vec![
        exp("Bills", "120", false),
        exp("Loans", "200", false),
        exp("Subscription", "50", true),
        exp("Subscription", "15", false),
        exp("Groceries", "90", false),
        exp("Restaurants", "60", false),
        exp("Gifts", "40", false),
        exp("Income", "4000", false),
        exp("Investment", "500", false),
        exp("Payment", "250", false),
    ];
    let report = budget::aggregate("November 2025", &expenses, &MonthLimits::default());

    let total: Decimal = expenses.iter().map(|e| e.amount).sum();
    let payment = dec("250");
    assert_eq!(
        report.fixed_bills_loans_spent
            + report.variable_spending_spent
            + report.income_total
            + report.investment_total
            + payment,
        total
    );
    // Unrecognized categories land in variable spending
    assert_eq!(report.variable_spending_spent, dec("205"));
}

#[test]
fn zero_limit_yields_zero_percent() {
    let limits = MonthLimits {
        fixed_bills_loans: Decimal::ZERO,
        variable_spending: dec("-10"),
        ..MonthLimits::default()
    };
    let expenses = vec![exp("Bills", "300", false), exp("Groceries", "50", false)];
    let report = budget::aggregate("November 2025", &expenses, &limits);
    assert_eq!(report.fixed_bills_loans_percent, Decimal::ZERO);
    assert_eq!(report.variable_spending_percent, Decimal::ZERO);
    assert_eq!(report.fixed_bills_loans_status, BucketStatus::Ok);
}

#[test]
fn warning_and_exceeded_thresholds() {
    let expenses = vec![exp("Bills", "480", false), exp("Groceries", "800", false)];
    let report = budget::aggregate("November 2025", &expenses, &MonthLimits::default());
    // 480/600 = 80% exactly
    assert_eq!(report.fixed_bills_loans_status, BucketStatus::Warning);
    // 800/800 = 100%
    assert_eq!(report.variable_spending_status, BucketStatus::Exceeded);
}

#[test]
fn top_categories_keep_the_five_largest() {
    let expenses = vec![
        exp("Groceries", "100", false),
        exp("Restaurants", "90", false),
        exp("Coffee", "80", false),
        exp("Transit", "70", false),
        exp("Gifts", "60", false),
        exp("Books", "50", false),
    ];
    let report = budget::aggregate("November 2025", &expenses, &MonthLimits::default());
    let names: Vec<&str> = report
        .top_categories
        .iter()
        .map(|t| t.category.as_str())
        .collect();
    assert_eq!(
        names,
        vec!["Groceries", "Restaurants", "Coffee", "Transit", "Gifts"]
    );
    assert_eq!(report.top_categories[0].total, dec("100"));
    assert_eq!(report.top_categories[4].total, dec("60"));
}

#[test]
fn equal_totals_keep_first_seen_order() {
    let expenses = vec![
        exp("Restaurants", "75", false),
        exp("Groceries", "75", false),
        exp("Coffee", "20", false),
    ];
    let report = budget::aggregate("November 2025", &expenses, &MonthLimits::default());
    let names: Vec<&str> = report
        .top_categories
        .iter()
        .map(|t| t.category.as_str())
        .collect();
    assert_eq!(names, vec!["Restaurants", "Groceries", "Coffee"]);
}

#[test]
fn empty_month_is_all_zero() {
    let report = budget::aggregate("November 2025", &[], &MonthLimits::default());
    assert_eq!(report.fixed_bills_loans_spent, Decimal::ZERO);
    assert_eq!(report.variable_spending_spent, Decimal::ZERO);
    assert_eq!(report.income_total, Decimal::ZERO);
    assert_eq!(report.investment_total, Decimal::ZERO);
    assert_eq!(report.remaining_buffer, Decimal::ZERO);
    assert!(report.top_categories.is_empty());
    assert_eq!(report.buffer_status, BufferStatus::Ok);
    assert_eq!(report.investment_status, InvestmentStatus::BelowTarget);
}

#[test]
fn negative_buffer_flags_the_report() {
    let expenses = vec![exp("Bills", "900", false), exp("Income", "100", false)];
    let report = budget::aggregate("November 2025", &expenses, &MonthLimits::default());
    assert_eq!(report.remaining_buffer, dec("-800"));
    assert_eq!(report.buffer_status, BufferStatus::Negative);
}

#[test]
fn aggregation_is_deterministic() {
    let expenses = vec![
        exp("Bills", "300", false),
        exp("Groceries", "150", false),
        exp("Income", "5000", false),
    ];
    let a = budget::aggregate("November 2025", &expenses, &MonthLimits::default());
    let b = budget::aggregate("November 2025", &expenses, &MonthLimits::default());
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}
