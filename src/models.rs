// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub user_id: i64,
    pub date: NaiveDate,
    pub category: String,
    pub subcategory: Option<String>,
    pub description: String,
    pub amount: Decimal,
    pub is_recurring: bool,
    /// For subscriptions: false once cancelled. Cancellation never deletes rows.
    pub is_active: bool,
    /// Only meaningful for Subscription rows; forced false everywhere else.
    pub is_bill: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetLimit {
    pub id: i64,
    pub user_id: i64,
    pub month: String, // YYYY-MM
    pub fixed_bills_loans: Decimal,
    pub variable_spending: Decimal,
    pub investing_min: Decimal,
    pub investing_max: Decimal,
}

/// The four monthly ceilings. A month with no stored record uses `default()`;
/// reads never persist the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthLimits {
    pub fixed_bills_loans: Decimal,
    pub variable_spending: Decimal,
    pub investing_min: Decimal,
    pub investing_max: Decimal,
}

impl Default for MonthLimits {
    fn default() -> Self {
        MonthLimits {
            fixed_bills_loans: Decimal::new(600, 0),
            variable_spending: Decimal::new(800, 0),
            investing_min: Decimal::new(1500, 0),
            investing_max: Decimal::new(1800, 0),
        }
    }
}
