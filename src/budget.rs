// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Expense, MonthLimits};

/// Where one expense row lands in the monthly report. Every row falls into
/// exactly one bucket, so the bucket sums partition the month's total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    FixedBill,
    Variable,
    Income,
    Investment,
    Payment,
}

/// Category names are matched exactly and case-sensitively ("Bills", not
/// "bills"). Anything outside the fixed vocabulary, including non-bill
/// subscriptions, is variable spending.
pub fn classify(category: &str, is_bill: bool) -> Bucket {
    match category {
        "Bills" | "Loans" => Bucket::FixedBill,
        "Subscription" if is_bill => Bucket::FixedBill,
        "Income" => Bucket::Income,
        "Investment" => Bucket::Investment,
        "Payment" => Bucket::Payment,
        _ => Bucket::Variable,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketStatus {
    Ok,
    Warning,
    Exceeded,
}

impl BucketStatus {
    fn from_percent(percent: Decimal) -> Self {
        if percent >= Decimal::ONE_HUNDRED {
            BucketStatus::Exceeded
        } else if percent >= Decimal::new(80, 0) {
            BucketStatus::Warning
        } else {
            BucketStatus::Ok
        }
    }
}

impl std::fmt::Display for BucketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            BucketStatus::Ok => "OK",
            BucketStatus::Warning => "WARNING",
            BucketStatus::Exceeded => "EXCEEDED",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestmentStatus {
    Ok,
    BelowTarget,
    AboveMax,
}

impl std::fmt::Display for InvestmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            InvestmentStatus::Ok => "OK",
            InvestmentStatus::BelowTarget => "BELOW TARGET",
            InvestmentStatus::AboveMax => "ABOVE MAX",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BufferStatus {
    Ok,
    Negative,
}

impl std::fmt::Display for BufferStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            BufferStatus::Ok => "OK",
            BufferStatus::Negative => "NEGATIVE",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
}

/// Derived report data for one user and month. Ephemeral; never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct BudgetReport {
    pub month: String,
    pub fixed_bills_loans_spent: Decimal,
    pub fixed_bills_loans_limit: Decimal,
    pub fixed_bills_loans_percent: Decimal,
    pub fixed_bills_loans_status: BucketStatus,
    pub variable_spending_spent: Decimal,
    pub variable_spending_limit: Decimal,
    pub variable_spending_percent: Decimal,
    pub variable_spending_status: BucketStatus,
    pub investment_total: Decimal,
    pub investment_min: Decimal,
    pub investment_max: Decimal,
    pub investment_status: InvestmentStatus,
    pub income_total: Decimal,
    pub remaining_buffer: Decimal,
    pub buffer_status: BufferStatus,
    pub top_categories: Vec<CategoryTotal>,
}

/// spent/limit as a percentage, or zero when the limit is zero or negative.
fn percent_of(spent: Decimal, limit: Decimal) -> Decimal {
    if limit <= Decimal::ZERO {
        Decimal::ZERO
    } else {
        spent / limit * Decimal::ONE_HUNDRED
    }
}

/// Aggregate one month of expense rows against that month's limits.
///
/// Pure: no I/O, no clock, same inputs always yield the same report. The
/// active flag is not consulted; rows already materialized in the period
/// count as-is, cancelled or not.
pub fn aggregate(month_label: &str, expenses: &[Expense], limits: &MonthLimits) -> BudgetReport {
    let mut fixed = Decimal::ZERO;
    let mut variable = Decimal::ZERO;
    let mut income = Decimal::ZERO;
    let mut investment = Decimal::ZERO;

    // Insertion-ordered so the later stable sort breaks ties by first
    // appearance in the input.
    let mut category_totals: Vec<CategoryTotal> = Vec::new();

    for exp in expenses {
        match classify(&exp.category, exp.is_bill) {
            Bucket::FixedBill => fixed += exp.amount,
            Bucket::Variable => variable += exp.amount,
            Bucket::Income => income += exp.amount,
            Bucket::Investment => investment += exp.amount,
            Bucket::Payment => {}
        }

        if !matches!(exp.category.as_str(), "Income" | "Investment" | "Payment") {
            match category_totals
                .iter_mut()
                .find(|t| t.category == exp.category)
            {
                Some(entry) => entry.total += exp.amount,
                None => category_totals.push(CategoryTotal {
                    category: exp.category.clone(),
                    total: exp.amount,
                }),
            }
        }
    }

    category_totals.sort_by(|a, b| b.total.cmp(&a.total));
    category_totals.truncate(5);

    let remaining_buffer = income - (fixed + variable + investment);

    let fixed_percent = percent_of(fixed, limits.fixed_bills_loans);
    let variable_percent = percent_of(variable, limits.variable_spending);

    let investment_status = if investment < limits.investing_min {
        InvestmentStatus::BelowTarget
    } else if investment > limits.investing_max {
        InvestmentStatus::AboveMax
    } else {
        InvestmentStatus::Ok
    };

    let buffer_status = if remaining_buffer >= Decimal::ZERO {
        BufferStatus::Ok
    } else {
        BufferStatus::Negative
    };

    BudgetReport {
        month: month_label.to_string(),
        fixed_bills_loans_spent: fixed,
        fixed_bills_loans_limit: limits.fixed_bills_loans,
        fixed_bills_loans_percent: fixed_percent,
        fixed_bills_loans_status: BucketStatus::from_percent(fixed_percent),
        variable_spending_spent: variable,
        variable_spending_limit: limits.variable_spending,
        variable_spending_percent: variable_percent,
        variable_spending_status: BucketStatus::from_percent(variable_percent),
        investment_total: investment,
        investment_min: limits.investing_min,
        investment_max: limits.investing_max,
        investment_status,
        income_total: income,
        remaining_buffer,
        buffer_status,
        top_categories: category_totals,
    }
}
